// ABOUTME: Loading of analysis input documents from JSON files or stdin
// ABOUTME: Parses and validates AnalysisInput before it reaches the engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use headway_core::errors::{AppError, AppResult};
use headway_intelligence::AnalysisInput;
use tracing::debug;

/// Path value that selects stdin
pub const STDIN_PATH: &str = "-";

/// Parse and validate an input document
///
/// # Errors
///
/// Returns an error if the document is not valid JSON or an episode fails
/// validation
pub fn parse_input(raw: &str) -> AppResult<AnalysisInput> {
    let input: AnalysisInput = serde_json::from_str(raw)?;
    input.validate()?;
    debug!(
        events = input.events.len(),
        snapshots = input.snapshots.len(),
        forecasts = input.forecast_snapshots.len(),
        "Analysis input parsed"
    );
    Ok(input)
}

/// Load an input document from `path`; [`STDIN_PATH`] reads stdin
///
/// # Errors
///
/// Returns an error if the file cannot be read or [`parse_input`] rejects it
pub fn load_input(path: &Path) -> AppResult<AnalysisInput> {
    let raw = if path == Path::new(STDIN_PATH) {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(path).map_err(|e| {
            AppError::invalid_input(format!("Cannot read {}: {e}", path.display())).with_source(e)
        })?
    };
    parse_input(&raw)
}
