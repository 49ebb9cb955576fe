// ABOUTME: Full analysis command for headway-cli
// ABOUTME: Schedules one pass through the coalescing scheduler and prints its report
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::Path;
use std::sync::Arc;

use headway::input::load_input;
use headway::intelligence::HeadacheAnalysisEngine;
use headway::scheduler::{AnalysisScheduler, PassOutcome};
use headway::{AppError, AppResult};
use tracing::info;

use crate::helpers::io::print_json;

/// Run one analysis pass for `subject` and print the outcome
pub async fn run(
    engine: HeadacheAnalysisEngine,
    input_path: &Path,
    subject: &str,
    compact: bool,
) -> AppResult<()> {
    let input = load_input(input_path)?;
    info!(
        events = input.events.len(),
        snapshots = input.snapshots.len(),
        "Loaded analysis input"
    );

    let scheduler = AnalysisScheduler::new(Arc::new(engine));
    let mut reports = scheduler.subscribe(subject).await;
    let request_id = scheduler.request(subject, input).await.request_id();

    let report = reports
        .wait_for(|report| report.as_ref().is_some_and(|r| r.request_id == request_id))
        .await
        .map_err(|e| AppError::internal(format!("Scheduler stopped before publishing: {e}")))?
        .clone()
        .ok_or_else(|| AppError::internal("Scheduler published an empty report"))?;

    match &report.outcome {
        PassOutcome::Analyzed { outcome } => print_json(outcome, compact),
        PassOutcome::Failed { message } => Err(AppError::invalid_input(message.clone())),
    }
}
