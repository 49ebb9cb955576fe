// ABOUTME: Core types and constants for the Headway headache insight engine
// ABOUTME: Foundation crate with error handling, diary/signal data model, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Headway Core
//!
//! Foundation crate providing shared types and constants for the Headway
//! headache analysis engine. This crate is designed to change infrequently,
//! enabling incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AppResult`
//! - **constants**: Analysis constants organized by engine component
//! - **models**: Headache events, signal samples, snapshots and personal factors

/// Unified error handling system with standard error codes
pub mod errors;

/// Analysis constants organized by engine component
pub mod constants;

/// Core data models (`HeadacheEvent`, `SignalSnapshot`, `PersonalThresholds`, etc.)
pub mod models;
