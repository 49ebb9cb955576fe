// ABOUTME: Risk prediction types and the sub-model seam used by the ensemble predictor
// ABOUTME: Risk tiers, per-model predictions, contributing factors and the prediction context
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Ensemble risk prediction.
//!
//! Four independent sub-models each score a target day from read-only
//! history. The ensemble combines their outputs in a fixed order, so the
//! result never depends on which model finished first.

mod ensemble;
mod features;
mod pattern;
mod statistical;
mod threshold_rule;
mod time_series;

pub use ensemble::{EnsembleRiskPredictor, RiskPrediction};
pub use features::FeatureVector;
pub use pattern::{PatternMatchingModel, WindowSummary};
pub use statistical::StatisticalModel;
pub use threshold_rule::ThresholdRuleModel;
pub use time_series::TimeSeriesModel;

use chrono::NaiveDate;
use headway_core::models::{PersonalThresholds, SignalSnapshot, WeatherSnapshot};
use serde::{Deserialize, Serialize};

use crate::history::DailyHistory;

/// Categorical headache risk
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    /// Not enough information to say
    Unknown,
    /// Level 1
    Low,
    /// Level 2
    Moderate,
    /// Level 3
    High,
    /// Level 4
    VeryHigh,
}

impl RiskTier {
    /// Integer level 1-4, `None` for `Unknown`
    #[must_use]
    pub const fn level(self) -> Option<u8> {
        match self {
            Self::Unknown => None,
            Self::Low => Some(1),
            Self::Moderate => Some(2),
            Self::High => Some(3),
            Self::VeryHigh => Some(4),
        }
    }

    /// Tier for an integer level, clamped into 1-4
    #[must_use]
    pub const fn from_level(level: u8) -> Self {
        match level {
            0 | 1 => Self::Low,
            2 => Self::Moderate,
            3 => Self::High,
            _ => Self::VeryHigh,
        }
    }

    /// Tier of `score` against ascending `[moderate, high, very_high]` breakpoints
    #[must_use]
    pub fn from_score(score: f64, breakpoints: [f64; 3]) -> Self {
        let [moderate, high, very_high] = breakpoints;
        if score < moderate {
            Self::Low
        } else if score < high {
            Self::Moderate
        } else if score < very_high {
            Self::High
        } else {
            Self::VeryHigh
        }
    }

    /// Whether the tier is moderate or above
    #[must_use]
    pub fn is_elevated(self) -> bool {
        self >= Self::Moderate
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::VeryHigh => "very high",
        }
    }
}

/// Sub-model identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionModel {
    /// Similar-day lookup
    Statistical,
    /// 7-day weather pattern matching
    PatternMatching,
    /// Personal threshold rules
    ThresholdRule,
    /// Headache-frequency extrapolation
    TimeSeries,
}

/// Named contribution to a risk score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributingFactor {
    /// Factor display name
    pub name: String,
    /// Contribution to the risk score
    pub contribution: f64,
}

impl ContributingFactor {
    /// Create a contributing factor
    #[must_use]
    pub fn new(name: impl Into<String>, contribution: f64) -> Self {
        Self {
            name: name.into(),
            contribution,
        }
    }
}

/// Output of one sub-model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelPrediction {
    /// Producing model
    pub model: PredictionModel,
    /// Tier, `Unknown` when the model could not decide
    pub risk_tier: RiskTier,
    /// Underlying score in [0, 1]
    pub risk_score: f64,
    /// Confidence in [0, 1]
    pub confidence: f64,
    /// Factors behind the score
    pub factors: Vec<ContributingFactor>,
}

impl ModelPrediction {
    /// Zero-confidence prediction for a model lacking data
    #[must_use]
    pub const fn unknown(model: PredictionModel) -> Self {
        Self {
            model,
            risk_tier: RiskTier::Unknown,
            risk_score: 0.0,
            confidence: 0.0,
            factors: Vec::new(),
        }
    }
}

/// Everything a sub-model may read when scoring a target day
#[derive(Debug, Clone)]
pub struct PredictionContext<'a> {
    /// Observed history, oldest first
    pub history: &'a DailyHistory,
    /// Day being scored
    pub target_date: NaiveDate,
    /// Signals expected on the target day
    pub current: &'a SignalSnapshot,
    /// Weather of the days preceding the target, oldest first
    pub recent_weather: Vec<Option<WeatherSnapshot>>,
    /// Thresholds in effect
    pub thresholds: &'a PersonalThresholds,
}

/// A sub-model of the ensemble
pub trait RiskModel: Sync {
    /// Which model this is
    fn model(&self) -> PredictionModel;

    /// Score the context's target day
    fn predict(&self, context: &PredictionContext<'_>) -> ModelPrediction;
}

/// Tier breakpoints shared by the rate-based models
pub(crate) const RATE_TIER_BREAKPOINTS: [f64; 3] = [0.2, 0.4, 0.6];

/// Tier breakpoints of the threshold-rule model
pub(crate) const RULE_TIER_BREAKPOINTS: [f64; 3] = [0.3, 0.5, 0.7];
