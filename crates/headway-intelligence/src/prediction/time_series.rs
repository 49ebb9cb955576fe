// ABOUTME: Time-series risk model extrapolating recent headache frequency
// ABOUTME: Moving average of the daily headache indicator plus trend and seasonal terms
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: day counts are far below 2^52

use chrono::Datelike;
use headway_core::constants::ensemble::{
    SEASONAL_FACTORS, TIME_SERIES_CONFIDENCE_CAP, TIME_SERIES_CONFIDENCE_DAYS,
    TIME_SERIES_MIN_POINTS, TIME_SERIES_SEASONAL_WEIGHT, TIME_SERIES_TREND_WEIGHT,
    TIME_SERIES_WINDOW,
};

use super::{
    ContributingFactor, ModelPrediction, PredictionContext, PredictionModel, RiskModel, RiskTier,
    RATE_TIER_BREAKPOINTS,
};
use crate::history::DayRecord;
use crate::statistical_analysis::StatisticalAnalyzer;

/// Headache-frequency extrapolation
pub struct TimeSeriesModel;

impl TimeSeriesModel {
    /// Seasonal factor for a month number (1 = January)
    #[must_use]
    pub fn seasonal_factor(month: u32) -> f64 {
        month
            .checked_sub(1)
            .and_then(|index| SEASONAL_FACTORS.get(index as usize))
            .copied()
            .unwrap_or(0.0)
    }
}

impl RiskModel for TimeSeriesModel {
    fn model(&self) -> PredictionModel {
        PredictionModel::TimeSeries
    }

    fn predict(&self, context: &PredictionContext<'_>) -> ModelPrediction {
        let series: Vec<f64> = context
            .history
            .days()
            .iter()
            .filter(|day| day.record_exists && day.date < context.target_date)
            .map(DayRecord::headache_indicator)
            .collect();

        if series.len() < TIME_SERIES_MIN_POINTS {
            return ModelPrediction::unknown(self.model());
        }

        let smoothed = StatisticalAnalyzer::moving_average(&series, TIME_SERIES_WINDOW);
        let recent = smoothed.last().copied().unwrap_or(0.0);
        let trend = StatisticalAnalyzer::linear_trend_slope(&series);
        let seasonal = Self::seasonal_factor(context.target_date.month());

        let score = TIME_SERIES_SEASONAL_WEIGHT
            .mul_add(seasonal, TIME_SERIES_TREND_WEIGHT.mul_add(trend, recent))
            .clamp(0.0, 1.0);
        let confidence =
            (series.len() as f64 / TIME_SERIES_CONFIDENCE_DAYS).min(TIME_SERIES_CONFIDENCE_CAP);

        let mut factors = vec![ContributingFactor::new("Recent headache frequency", recent)];
        if trend > 0.0 {
            factors.push(ContributingFactor::new(
                "Rising headache trend",
                TIME_SERIES_TREND_WEIGHT * trend,
            ));
        }
        factors.push(ContributingFactor::new(
            "Seasonal pattern",
            TIME_SERIES_SEASONAL_WEIGHT * seasonal,
        ));
        factors.retain(|f| f.contribution > 0.0);

        ModelPrediction {
            model: self.model(),
            risk_tier: RiskTier::from_score(score, RATE_TIER_BREAKPOINTS),
            risk_score: score,
            confidence,
            factors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seasonal_factor_lookup() {
        assert!((TimeSeriesModel::seasonal_factor(1) - 0.10).abs() < f64::EPSILON);
        assert!((TimeSeriesModel::seasonal_factor(7) - 0.05).abs() < f64::EPSILON);
        assert!((TimeSeriesModel::seasonal_factor(0) - 0.0).abs() < f64::EPSILON);
        assert!((TimeSeriesModel::seasonal_factor(13) - 0.0).abs() < f64::EPSILON);
    }
}
