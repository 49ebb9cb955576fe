// ABOUTME: Core data models for headache diary events, signal samples and personal factors
// ABOUTME: Re-exports HeadacheEvent, SignalSnapshot, Factor and PersonalThresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Plain value objects exchanged between the engine and the host application.
//! The engine never stores or mutates them; every analysis pass receives an
//! owned or borrowed copy and returns freshly derived structures.
//!
//! ## Core Models
//!
//! - `HeadacheEvent`: one logged episode with intensity, timing and context tags
//! - `SignalSample<T>`: one measured value of a physiological or weather metric
//! - `SignalSnapshot`: all samples available for one calendar day
//! - `Factor`: the taxonomy of candidate trigger factors
//! - `PersonalThresholds`: personalised weather sensitivity thresholds

mod event;
mod factor;
mod profile;
mod signal;

pub use event::{HeadacheEvent, MedicationEntry, Trigger, MAX_INTENSITY, MIN_INTENSITY};
pub use factor::{Factor, HealthMetric, WeatherVariable};
pub use profile::{Gender, PersonalFactors, PersonalThresholds, ThresholdSource};
pub use signal::{HealthSnapshot, SignalSample, SignalSnapshot, WeatherSnapshot};
