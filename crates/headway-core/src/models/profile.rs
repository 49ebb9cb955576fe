// ABOUTME: Personal factors and personalised weather sensitivity thresholds
// ABOUTME: Defaults apply until enough headache-day history exists to learn thresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::event::MedicationEntry;
use crate::constants::thresholds::{
    DEFAULT_HUMIDITY, DEFAULT_LOW_PRESSURE, DEFAULT_PRESSURE_CHANGE, DEFAULT_TEMPERATURE_CHANGE,
};

/// Self-reported gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// Female
    Female,
    /// Male
    Male,
    /// Other or undisclosed
    Other,
}

/// Where a set of thresholds came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdSource {
    /// Fixed population defaults
    Default,
    /// Learned from the user's headache-day history
    Learned,
}

/// Personalised trigger thresholds for weather sensitivity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PersonalThresholds {
    /// Absolute 24h pressure change (hPa) considered a trigger
    pub pressure_change_threshold: f64,
    /// Absolute 24h temperature change (°C) considered a trigger
    pub temperature_change_threshold: f64,
    /// Relative humidity (%) considered a trigger
    pub humidity_threshold: f64,
    /// Barometric pressure (hPa) below which pressure is considered low
    pub low_pressure_threshold: f64,
    /// Whether these values are defaults or learned
    pub source: ThresholdSource,
}

impl Default for PersonalThresholds {
    fn default() -> Self {
        Self {
            pressure_change_threshold: DEFAULT_PRESSURE_CHANGE,
            temperature_change_threshold: DEFAULT_TEMPERATURE_CHANGE,
            humidity_threshold: DEFAULT_HUMIDITY,
            low_pressure_threshold: DEFAULT_LOW_PRESSURE,
            source: ThresholdSource::Default,
        }
    }
}

impl PersonalThresholds {
    /// Whether the thresholds were learned from history
    #[must_use]
    pub fn is_learned(&self) -> bool {
        self.source == ThresholdSource::Learned
    }
}

/// Personal context supplied alongside the diary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalFactors {
    /// Age in years
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Self-reported gender
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    /// Most recent headache, if known outside the supplied history
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_headache: Option<DateTime<Utc>>,
    /// Typical menstrual cycle length in days
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycle_length_days: Option<u32>,
    /// Medication taken outside logged episodes
    pub medication_history: Vec<MedicationEntry>,
    /// Thresholds learned in an earlier pass; relearned when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<PersonalThresholds>,
}
