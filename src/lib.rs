// ABOUTME: Main library entry point for the Headway headache insight engine host
// ABOUTME: Re-exports the engine crates and provides logging and analysis scheduling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Headway
//!
//! Host-side plumbing around the Headway analysis engine: structured
//! logging and a coalescing scheduler that decides when analysis passes
//! run. The engine itself lives in `headway-intelligence` and the shared
//! data model in `headway-core`; both are re-exported here.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use headway::intelligence::{AnalysisConfig, AnalysisInput, HeadacheAnalysisEngine};
//! use headway::scheduler::AnalysisScheduler;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = HeadacheAnalysisEngine::new(AnalysisConfig::from_environment()?)?;
//!     let scheduler = AnalysisScheduler::new(Arc::new(engine));
//!
//!     let mut reports = scheduler.subscribe("user-1").await;
//!     scheduler.request("user-1", AnalysisInput::default()).await;
//!     reports.changed().await?;
//!     Ok(())
//! }
//! ```

/// Shared error types, data model and constants
pub use headway_core as core;
/// Analysis engine
pub use headway_intelligence as intelligence;

/// Input document loading
pub mod input;

/// Structured logging setup
pub mod logging;

/// Coalescing analysis scheduler
pub mod scheduler;

pub use headway_core::errors::{AppError, AppResult, ErrorCode};
