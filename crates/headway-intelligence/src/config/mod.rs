// ABOUTME: Configuration-driven parameters for the headache analysis pipeline
// ABOUTME: Environment-overridable settings for correlation, ensemble, forecast and insight stages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Analysis configuration.
//!
//! The configuration is owned by the engine instance the host application
//! builds; there is no process-wide configuration singleton.

mod error;

pub use error::ConfigError;

use std::env;
use std::str::FromStr;

use headway_core::constants::{correlation, ensemble, forecast, insights, statistics};
use serde::{Deserialize, Serialize};

/// Correlation analyzer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationConfig {
    /// Events required before correlations are computed
    pub min_events: usize,
    /// p-value below which a correlation may be significant
    pub significance_alpha: f64,
    /// Paired samples required before a correlation may be significant
    pub min_samples_for_significance: usize,
}

/// Trigger combination miner settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinationConfig {
    /// Whether declared and custom trigger tags join the active-factor set
    pub include_declared_triggers: bool,
}

/// How the ensemble averages sub-model tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnsembleNormalization {
    /// Tier average divides by the sum of `weight * confidence`
    ConfidenceWeighted,
    /// Tier average divides by the sum of model weights
    ModelWeight,
}

impl FromStr for EnsembleNormalization {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "confidence_weighted" | "confidence" => Ok(Self::ConfidenceWeighted),
            "model_weight" | "model" => Ok(Self::ModelWeight),
            _ => Err(()),
        }
    }
}

/// Relative weight of each ensemble sub-model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelWeights {
    /// Similarity-based statistical lookup
    pub statistical: f64,
    /// Weather pattern matching
    pub pattern: f64,
    /// Personal threshold rules
    pub threshold: f64,
    /// Time-series extrapolation
    pub time_series: f64,
}

impl ModelWeights {
    /// Sum of all weights
    #[must_use]
    pub fn total(&self) -> f64 {
        self.statistical + self.pattern + self.threshold + self.time_series
    }
}

/// Ensemble predictor settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnsembleConfig {
    /// Sub-model weights
    pub weights: ModelWeights,
    /// Tier averaging variant
    pub normalization: EnsembleNormalization,
    /// Confidence below which recommendations state low confidence
    pub confidence_threshold: f64,
    /// Contributing factors kept after aggregation
    pub max_contributing_factors: usize,
}

/// Forecast settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Days forecast ahead
    pub horizon_days: u32,
    /// Confidence lost per day beyond the first
    pub confidence_decay_per_day: f64,
}

/// Insight composer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightConfig {
    /// Maximum insights returned
    pub max_insights: usize,
    /// Cycle length used when the user did not supply one
    pub default_cycle_length_days: u32,
}

/// Main analysis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Correlation analyzer settings
    pub correlation: CorrelationConfig,
    /// Combination miner settings
    pub combinations: CombinationConfig,
    /// Ensemble settings
    pub ensemble: EnsembleConfig,
    /// Forecast settings
    pub forecast: ForecastConfig,
    /// Insight settings
    pub insights: InsightConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            correlation: CorrelationConfig {
                min_events: correlation::MIN_EVENTS,
                significance_alpha: statistics::SIGNIFICANCE_ALPHA,
                min_samples_for_significance: statistics::MIN_SAMPLES_FOR_SIGNIFICANCE,
            },
            combinations: CombinationConfig {
                include_declared_triggers: true,
            },
            ensemble: EnsembleConfig {
                weights: ModelWeights {
                    statistical: ensemble::WEIGHT_STATISTICAL,
                    pattern: ensemble::WEIGHT_PATTERN,
                    threshold: ensemble::WEIGHT_THRESHOLD,
                    time_series: ensemble::WEIGHT_TIME_SERIES,
                },
                normalization: EnsembleNormalization::ConfidenceWeighted,
                confidence_threshold: ensemble::CONFIDENCE_THRESHOLD,
                max_contributing_factors: ensemble::MAX_CONTRIBUTING_FACTORS,
            },
            forecast: ForecastConfig {
                horizon_days: forecast::DEFAULT_HORIZON_DAYS,
                confidence_decay_per_day: forecast::CONFIDENCE_DECAY_PER_DAY,
            },
            insights: InsightConfig {
                max_insights: insights::DEFAULT_MAX_INSIGHTS,
                default_cycle_length_days: insights::DEFAULT_CYCLE_LENGTH_DAYS,
            },
        }
    }
}

fn env_override<T: FromStr>(variable: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(variable) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Parse {
                variable,
                value: raw,
            }),
        Err(_) => Ok(None),
    }
}

impl AnalysisConfig {
    /// Load configuration from environment variables with fallback to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if an override cannot be parsed or the resulting
    /// configuration fails validation
    pub fn from_environment() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(min_events) = env_override("HEADWAY_MIN_EVENTS")? {
            config.correlation.min_events = min_events;
        }
        if let Some(include) = env_override("HEADWAY_INCLUDE_DECLARED_TRIGGERS")? {
            config.combinations.include_declared_triggers = include;
        }
        if let Some(threshold) = env_override("HEADWAY_CONFIDENCE_THRESHOLD")? {
            config.ensemble.confidence_threshold = threshold;
        }
        if let Some(normalization) = env_override("HEADWAY_ENSEMBLE_NORMALIZATION")? {
            config.ensemble.normalization = normalization;
        }
        if let Some(horizon) = env_override("HEADWAY_FORECAST_HORIZON_DAYS")? {
            config.forecast.horizon_days = horizon;
        }
        if let Some(max_insights) = env_override("HEADWAY_MAX_INSIGHTS")? {
            config.insights.max_insights = max_insights;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.correlation.min_events == 0 {
            return Err(ConfigError::ValueOutOfRange("min_events must be > 0"));
        }

        if !(0.0..=1.0).contains(&self.correlation.significance_alpha) {
            return Err(ConfigError::InvalidRange(
                "significance_alpha must be between 0 and 1",
            ));
        }

        if !(0.0..=1.0).contains(&self.ensemble.confidence_threshold) {
            return Err(ConfigError::InvalidRange(
                "confidence_threshold must be between 0 and 1",
            ));
        }

        let weights = &self.ensemble.weights;
        let all_positive = [
            weights.statistical,
            weights.pattern,
            weights.threshold,
            weights.time_series,
        ]
        .iter()
        .all(|w| *w > 0.0);
        if !all_positive {
            return Err(ConfigError::InvalidWeights(
                "every ensemble weight must be > 0".to_owned(),
            ));
        }

        let weight_sum = weights.total();
        if (weight_sum - 1.0).abs() > 0.01 {
            return Err(ConfigError::InvalidWeights(format!(
                "Ensemble weights must sum to 1.0, got {weight_sum}"
            )));
        }

        if self.ensemble.max_contributing_factors == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "max_contributing_factors must be > 0",
            ));
        }

        if self.forecast.horizon_days == 0 || self.forecast.horizon_days > forecast::MAX_HORIZON_DAYS
        {
            return Err(ConfigError::ValueOutOfRange(
                "horizon_days must be between 1 and 30",
            ));
        }

        if !(0.0..1.0).contains(&self.forecast.confidence_decay_per_day) {
            return Err(ConfigError::InvalidRange(
                "confidence_decay_per_day must be in [0, 1)",
            ));
        }

        if self.insights.max_insights == 0 {
            return Err(ConfigError::ValueOutOfRange("max_insights must be > 0"));
        }

        if self.insights.default_cycle_length_days == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "default_cycle_length_days must be > 0",
            ));
        }

        Ok(())
    }
}
