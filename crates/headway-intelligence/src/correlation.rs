// ABOUTME: Factor correlation analysis between signal metrics and headache intensity
// ABOUTME: Computes Pearson correlation, significance, risk tier and description per factor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::cmp::Ordering;

use headway_core::constants::correlation::{TIER_HIGH, TIER_MODERATE, TIER_VERY_HIGH};
use headway_core::models::{Factor, HealthMetric};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::CorrelationConfig;
use crate::history::DailyHistory;
use crate::statistical_analysis::StatisticalAnalyzer;

/// Correlations weaker than this are described as no clear relationship
const NEGLIGIBLE_CORRELATION: f64 = 0.1;

/// Paired samples required before a factor is reported
const MIN_PAIRED_SAMPLES: usize = 3;

/// Factor name used by the insufficient-data placeholder
pub const INSUFFICIENT_DATA_FACTOR: &str = "Insufficient data";

/// Risk tier of a correlation magnitude
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationTier {
    /// |r| < 0.3
    Low,
    /// 0.3 <= |r| < 0.5
    Moderate,
    /// 0.5 <= |r| < 0.7
    High,
    /// |r| >= 0.7
    VeryHigh,
}

impl CorrelationTier {
    /// Classify a correlation coefficient by magnitude
    #[must_use]
    pub fn from_coefficient(correlation: f64) -> Self {
        let magnitude = correlation.abs();
        if magnitude < TIER_MODERATE {
            Self::Low
        } else if magnitude < TIER_HIGH {
            Self::Moderate
        } else if magnitude < TIER_VERY_HIGH {
            Self::High
        } else {
            Self::VeryHigh
        }
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::VeryHigh => "very high",
        }
    }
}

/// Correlation of one factor with headache intensity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationResult {
    /// Factor analysed, `None` for the insufficient-data placeholder
    pub factor: Option<Factor>,
    /// Display name of the factor
    pub factor_name: String,
    /// Pearson coefficient in [-1, 1]
    pub correlation: f64,
    /// Approximate p-value
    pub p_value: f64,
    /// Paired samples used
    pub sample_size: usize,
    /// `p_value < alpha` and `sample_size >= min_samples`
    pub is_significant: bool,
    /// Tier of |correlation|
    pub risk_tier: CorrelationTier,
    /// User-facing description
    pub description: String,
}

impl CorrelationResult {
    /// Placeholder returned when too few episodes exist
    #[must_use]
    pub fn insufficient_data(events_logged: usize, min_events: usize) -> Self {
        let missing = min_events.saturating_sub(events_logged).max(1);
        Self {
            factor: None,
            factor_name: INSUFFICIENT_DATA_FACTOR.to_owned(),
            correlation: 0.0,
            p_value: 1.0,
            sample_size: events_logged,
            is_significant: false,
            risk_tier: CorrelationTier::Low,
            description: format!(
                "Log at least {missing} more {} to discover what influences your headaches",
                if missing == 1 { "headache" } else { "headaches" }
            ),
        }
    }

    /// Whether this is the insufficient-data placeholder
    #[must_use]
    pub const fn is_placeholder(&self) -> bool {
        self.factor.is_none()
    }

    /// Correlated health metric, if this result is for one
    #[must_use]
    pub const fn health_metric(&self) -> Option<HealthMetric> {
        match self.factor {
            Some(Factor::Health(metric)) => Some(metric),
            _ => None,
        }
    }
}

/// Correlates every available factor with daily headache intensity
pub struct FactorCorrelationAnalyzer {
    config: CorrelationConfig,
}

impl FactorCorrelationAnalyzer {
    /// Create an analyzer
    #[must_use]
    pub const fn new(config: CorrelationConfig) -> Self {
        Self { config }
    }

    /// Analyse `history` containing `events_logged` episodes
    ///
    /// Each factor is paired day by day with the day's worst intensity (0.0
    /// on headache-free days); days missing the factor are skipped. Results
    /// are sorted by descending |correlation|. With fewer than the
    /// configured number of episodes a single placeholder is returned.
    #[must_use]
    pub fn analyze(&self, history: &DailyHistory, events_logged: usize) -> Vec<CorrelationResult> {
        if events_logged < self.config.min_events {
            return vec![CorrelationResult::insufficient_data(
                events_logged,
                self.config.min_events,
            )];
        }

        let mut results: Vec<CorrelationResult> = Factor::all()
            .into_iter()
            .filter_map(|factor| self.correlate(history, factor))
            .collect();

        results.sort_by(|a, b| {
            b.correlation
                .abs()
                .partial_cmp(&a.correlation.abs())
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.factor_name.cmp(&b.factor_name))
        });

        debug!(
            factors = results.len(),
            significant = results.iter().filter(|r| r.is_significant).count(),
            "Factor correlations computed"
        );

        results
    }

    fn correlate(&self, history: &DailyHistory, factor: Factor) -> Option<CorrelationResult> {
        let (values, intensities): (Vec<f64>, Vec<f64>) = history
            .days()
            .iter()
            .filter_map(|day| day.value(factor).map(|v| (v, day.intensity())))
            .unzip();

        if values.len() < MIN_PAIRED_SAMPLES {
            return None;
        }

        let sample_size = values.len();
        let correlation = StatisticalAnalyzer::pearson_correlation(&values, &intensities);
        let p_value = StatisticalAnalyzer::approximate_p_value(correlation, sample_size);
        let is_significant = p_value < self.config.significance_alpha
            && sample_size >= self.config.min_samples_for_significance;
        let risk_tier = CorrelationTier::from_coefficient(correlation);
        let trend = StatisticalAnalyzer::linear_trend_slope(&values);

        Some(CorrelationResult {
            factor: Some(factor),
            factor_name: factor.display_name().to_owned(),
            correlation,
            p_value,
            sample_size,
            is_significant,
            risk_tier,
            description: describe(factor, correlation, is_significant, trend),
        })
    }
}

fn describe(factor: Factor, correlation: f64, is_significant: bool, trend: f64) -> String {
    let name = factor.display_name();
    if correlation.abs() < NEGLIGIBLE_CORRELATION {
        return format!("No clear relationship between {name} and your headaches");
    }

    let direction = if correlation > 0.0 { "Higher" } else { "Lower" };
    let strength = CorrelationTier::from_coefficient(correlation).label();
    let confidence = if is_significant {
        "statistically significant"
    } else {
        "not yet statistically significant"
    };
    let recent = if trend > 0.0 {
        "rising"
    } else if trend < 0.0 {
        "falling"
    } else {
        "steady"
    };

    format!(
        "{direction} {name} is linked to stronger headaches ({strength} correlation, r = {correlation:.2}, {confidence}); {name} has been {recent} over your history"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_breakpoints() {
        assert_eq!(CorrelationTier::from_coefficient(0.29), CorrelationTier::Low);
        assert_eq!(CorrelationTier::from_coefficient(-0.3), CorrelationTier::Moderate);
        assert_eq!(CorrelationTier::from_coefficient(0.5), CorrelationTier::High);
        assert_eq!(CorrelationTier::from_coefficient(-0.95), CorrelationTier::VeryHigh);
    }

    #[test]
    fn test_placeholder_counts_missing_events() {
        let placeholder = CorrelationResult::insufficient_data(2, 3);
        assert!(placeholder.is_placeholder());
        assert!(placeholder.description.contains("1 more headache "));
    }
}
