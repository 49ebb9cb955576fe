// ABOUTME: Data-quality assessment gating whether predictions over a history are trustworthy
// ABOUTME: Computes coverage and overlap of diary records with signal data and a quality tier
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: day counts are far below 2^52

use headway_core::constants::data_quality::{
    ACCEPTABLE_DAYS, EXCELLENT_DAYS, GATE_MIN_COVERAGE, GATE_MIN_OVERLAPPING_DAYS, GOOD_DAYS,
    MINIMAL_DAYS,
};
use serde::{Deserialize, Serialize};

/// Tolerance used when comparing coverage against the gate
const COVERAGE_TOLERANCE: f64 = 1e-9;

/// Per-day availability flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayFlags {
    /// Signal data (health or weather) exists for the day
    pub has_signal_data: bool,
    /// An episode started that day
    pub had_event: bool,
    /// The user logged the day (episode or headache-free check-in)
    pub record_exists: bool,
}

impl DayFlags {
    /// Signal data and a diary record both exist
    #[must_use]
    pub const fn is_overlapping(self) -> bool {
        self.has_signal_data && (self.record_exists || self.had_event)
    }
}

/// Categorical quality of a history
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    /// Fewer than 14 overlapping days
    Insufficient,
    /// 14-29 overlapping days
    Minimal,
    /// 30-59 overlapping days
    Acceptable,
    /// 60-89 overlapping days
    Good,
    /// 90 or more overlapping days
    Excellent,
}

impl QualityTier {
    /// Classify an overlapping-day count
    #[must_use]
    pub const fn from_overlapping_days(days: usize) -> Self {
        if days < MINIMAL_DAYS {
            Self::Insufficient
        } else if days < ACCEPTABLE_DAYS {
            Self::Minimal
        } else if days < GOOD_DAYS {
            Self::Acceptable
        } else if days < EXCELLENT_DAYS {
            Self::Good
        } else {
            Self::Excellent
        }
    }

    /// Overlapping days required to reach this tier
    #[must_use]
    pub const fn minimum_days(self) -> usize {
        match self {
            Self::Insufficient => 0,
            Self::Minimal => MINIMAL_DAYS,
            Self::Acceptable => ACCEPTABLE_DAYS,
            Self::Good => GOOD_DAYS,
            Self::Excellent => EXCELLENT_DAYS,
        }
    }

    /// Next tier up, `None` at the top
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Insufficient => Some(Self::Minimal),
            Self::Minimal => Some(Self::Acceptable),
            Self::Acceptable => Some(Self::Good),
            Self::Good => Some(Self::Excellent),
            Self::Excellent => None,
        }
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Insufficient => "insufficient",
            Self::Minimal => "minimal",
            Self::Acceptable => "acceptable",
            Self::Good => "good",
            Self::Excellent => "excellent",
        }
    }
}

/// Data-quality assessment of a history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataQualityReport {
    /// Calendar days spanned
    pub total_days: usize,
    /// Days with both signal data and a diary record
    pub overlapping_days: usize,
    /// `overlapping_days / total_days`
    pub coverage: f64,
    /// Share of recorded days that also carry signal data
    pub consistency: f64,
    /// Quality tier by overlapping days
    pub tier: QualityTier,
    /// Whether the prediction gate passes
    pub is_acceptable: bool,
    /// Further fully logged days needed to pass the gate
    pub days_needed: usize,
    /// User-facing summary
    pub message: String,
}

/// Data-quality assessor
pub struct DataQualityAssessor;

impl DataQualityAssessor {
    /// Assess per-day flags spanning a contiguous history
    #[must_use]
    pub fn assess(flags: &[DayFlags]) -> DataQualityReport {
        let total_days = flags.len();
        let overlapping_days = flags.iter().filter(|f| f.is_overlapping()).count();
        let recorded_days = flags
            .iter()
            .filter(|f| f.record_exists || f.had_event)
            .count();

        let coverage = ratio(overlapping_days, total_days);
        let consistency = ratio(overlapping_days, recorded_days);
        let tier = QualityTier::from_overlapping_days(overlapping_days);
        let is_acceptable = Self::is_quality_acceptable(overlapping_days, coverage);
        let days_needed = if is_acceptable {
            0
        } else {
            Self::days_needed(overlapping_days, total_days)
        };

        let message = if is_acceptable {
            format!(
                "Data quality is {} ({overlapping_days} of {total_days} days fully logged)",
                tier.label()
            )
        } else {
            format!(
                "Need {days_needed} more {} of logged symptoms with health or weather data for reliable predictions",
                if days_needed == 1 { "day" } else { "days" }
            )
        };

        DataQualityReport {
            total_days,
            overlapping_days,
            coverage,
            consistency,
            tier,
            is_acceptable,
            days_needed,
            message,
        }
    }

    /// Prediction gate: at least 30 overlapping days and 70% coverage
    #[must_use]
    pub fn is_quality_acceptable(overlapping_days: usize, coverage: f64) -> bool {
        overlapping_days >= GATE_MIN_OVERLAPPING_DAYS
            && coverage + COVERAGE_TOLERANCE >= GATE_MIN_COVERAGE
    }

    /// Fully logged days that must be added to pass the gate
    ///
    /// Covers both the overlap floor and the coverage ratio, assuming every
    /// added day is fully logged.
    #[must_use]
    pub fn days_needed(overlapping_days: usize, total_days: usize) -> usize {
        let for_overlap = GATE_MIN_OVERLAPPING_DAYS.saturating_sub(overlapping_days);

        // (o + k) / (t + k) >= c  <=>  k >= (c·t - o) / (1 - c)
        let deficit = GATE_MIN_COVERAGE.mul_add(total_days as f64, -(overlapping_days as f64));
        let for_coverage = if deficit > COVERAGE_TOLERANCE {
            (deficit / (1.0 - GATE_MIN_COVERAGE) - COVERAGE_TOLERANCE).ceil() as usize
        } else {
            0
        };

        for_overlap.max(for_coverage)
    }

    /// Days missing to reach the next quality tier, `None` at the top tier
    #[must_use]
    pub fn days_until_next_tier(overlapping_days: usize) -> Option<usize> {
        QualityTier::from_overlapping_days(overlapping_days)
            .next()
            .map(|tier| tier.minimum_days().saturating_sub(overlapping_days))
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_day() -> DayFlags {
        DayFlags {
            has_signal_data: true,
            had_event: false,
            record_exists: true,
        }
    }

    #[test]
    fn test_gate_boundaries() {
        assert!(DataQualityAssessor::is_quality_acceptable(30, 0.70));
        assert!(!DataQualityAssessor::is_quality_acceptable(29, 0.71));
        assert!(!DataQualityAssessor::is_quality_acceptable(30, 0.69));
    }

    #[test]
    fn test_signal_without_record_does_not_overlap() {
        let flags = DayFlags {
            has_signal_data: true,
            ..DayFlags::default()
        };
        assert!(!flags.is_overlapping());
    }

    #[test]
    fn test_days_needed_accounts_for_coverage() {
        // 30 overlapping of 50 days: coverage 0.6, needs k with (30+k)/(50+k) >= 0.7
        assert_eq!(DataQualityAssessor::days_needed(30, 50), 17);
        assert_eq!(DataQualityAssessor::days_needed(20, 20), 10);
    }

    #[test]
    fn test_assess_full_history() {
        let report = DataQualityAssessor::assess(&vec![full_day(); 45]);

        assert_eq!(report.overlapping_days, 45);
        assert_eq!(report.tier, QualityTier::Acceptable);
        assert!(report.is_acceptable);
        assert_eq!(report.days_needed, 0);
    }
}
