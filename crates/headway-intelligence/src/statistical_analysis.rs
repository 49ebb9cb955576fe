// ABOUTME: Statistical primitives for headache factor analysis
// ABOUTME: Pearson correlation, bucketed p-value approximation, OLS slope, moving average, percentiles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: sample counts are far below 2^52

//! Pure numeric functions with no state.
//!
//! Degenerate input (mismatched lengths, too few points, zero variance) never
//! faults: every primitive returns its neutral value instead.

use headway_core::constants::statistics::{
    P_VALUE_MODERATE, P_VALUE_NONE, P_VALUE_STRONG, P_VALUE_WEAK, T_BREAKPOINT_MODERATE,
    T_BREAKPOINT_STRONG, T_BREAKPOINT_WEAK,
};

/// Stateless statistical analyzer
pub struct StatisticalAnalyzer;

impl StatisticalAnalyzer {
    /// Pearson correlation coefficient of two equally long series
    ///
    /// Returns 0.0 when the series differ in length, hold fewer than two
    /// points, or either has zero variance.
    #[must_use]
    pub fn pearson_correlation(x: &[f64], y: &[f64]) -> f64 {
        if x.len() != y.len() || x.len() < 2 {
            return 0.0;
        }

        let n = x.len() as f64;
        let sum_x: f64 = x.iter().sum();
        let sum_y: f64 = y.iter().sum();
        let sum_xy: f64 = x.iter().zip(y).map(|(a, b)| a * b).sum();
        let sum_xx: f64 = x.iter().map(|a| a * a).sum();
        let sum_yy: f64 = y.iter().map(|b| b * b).sum();

        let numerator = n.mul_add(sum_xy, -(sum_x * sum_y));
        let variance_x = n.mul_add(sum_xx, -(sum_x * sum_x));
        let variance_y = n.mul_add(sum_yy, -(sum_y * sum_y));
        let denominator = (variance_x * variance_y).sqrt();

        if !denominator.is_finite() || denominator <= f64::EPSILON {
            return 0.0;
        }

        (numerator / denominator).clamp(-1.0, 1.0)
    }

    /// Approximate two-tailed p-value for a correlation coefficient
    ///
    /// Maps the t-statistic `r * sqrt((n - 2) / (1 - r²))` onto fixed
    /// breakpoints instead of evaluating the Student's t CDF. Returns 1.0
    /// when `sample_size <= 2`.
    #[must_use]
    pub fn approximate_p_value(correlation: f64, sample_size: usize) -> f64 {
        if sample_size <= 2 || !correlation.is_finite() {
            return 1.0;
        }

        Self::p_value_for_t(Self::t_statistic(correlation, sample_size))
    }

    /// Bucketed p-value for a t-statistic
    ///
    /// `|t|` must lie strictly above a breakpoint to reach its bucket, so
    /// `|t| = 2.0` still reports 0.1.
    #[must_use]
    pub fn p_value_for_t(t_stat: f64) -> f64 {
        let t_abs = t_stat.abs();
        if t_abs > T_BREAKPOINT_STRONG {
            P_VALUE_STRONG
        } else if t_abs > T_BREAKPOINT_MODERATE {
            P_VALUE_MODERATE
        } else if t_abs > T_BREAKPOINT_WEAK {
            P_VALUE_WEAK
        } else {
            P_VALUE_NONE
        }
    }

    /// t-statistic of a correlation coefficient; infinite for |r| = 1
    #[must_use]
    pub fn t_statistic(correlation: f64, sample_size: usize) -> f64 {
        let r = correlation.clamp(-1.0, 1.0);
        let unexplained = r.mul_add(-r, 1.0);
        if unexplained <= 0.0 {
            return if r.is_sign_negative() {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            };
        }
        let degrees_of_freedom = sample_size.saturating_sub(2) as f64;
        r * (degrees_of_freedom / unexplained).sqrt()
    }

    /// Ordinary least-squares slope over indices `0..n`
    ///
    /// Returns 0.0 for fewer than two values.
    #[must_use]
    pub fn linear_trend_slope(values: &[f64]) -> f64 {
        if values.len() <= 1 {
            return 0.0;
        }

        let n = values.len() as f64;
        let sum_x: f64 = (0..values.len()).map(|i| i as f64).sum();
        let sum_y: f64 = values.iter().sum();
        let sum_xy: f64 = values.iter().enumerate().map(|(i, y)| i as f64 * y).sum();
        let sum_xx: f64 = (0..values.len()).map(|i| (i * i) as f64).sum();

        let denominator = n.mul_add(sum_xx, -(sum_x * sum_x));
        if denominator.abs() < f64::EPSILON {
            return 0.0;
        }

        n.mul_add(sum_xy, -(sum_x * sum_y)) / denominator
    }

    /// Simple moving average
    ///
    /// Returns the input unchanged when it is shorter than `window` (or the
    /// window is zero); otherwise `len - window + 1` running means.
    #[must_use]
    pub fn moving_average(series: &[f64], window: usize) -> Vec<f64> {
        if window == 0 || series.len() < window {
            return series.to_vec();
        }

        series
            .windows(window)
            .map(|w| w.iter().sum::<f64>() / window as f64)
            .collect()
    }

    /// Percentile by index selection
    ///
    /// Sorts ascending and picks index `floor((n - 1) * p)`. With
    /// `invert_direction` the index is mirrored from the high end, so the
    /// 75th inverted percentile reads as the 25th from the low end.
    /// Returns `None` for an empty input.
    #[must_use]
    pub fn percentile(values: &[f64], p: f64, invert_direction: bool) -> Option<f64> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let last = sorted.len() - 1;
        let offset = ((last as f64) * p.clamp(0.0, 1.0)).floor() as usize;
        let index = if invert_direction {
            last - offset.min(last)
        } else {
            offset.min(last)
        };
        sorted.get(index).copied()
    }

    /// Arithmetic mean; 0.0 for an empty input
    #[must_use]
    pub fn mean(values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        values.iter().sum::<f64>() / values.len() as f64
    }
}
