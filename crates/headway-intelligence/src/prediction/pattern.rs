// ABOUTME: Seven-day weather pattern matching risk model
// ABOUTME: Slides a weather summary window across history and checks the following day for episodes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: match counts are far below 2^52

use headway_core::constants::ensemble::{
    PATTERN_CONFIDENCE_PENALTY, PATTERN_MIN_MATCHES, PATTERN_SIMILARITY, PATTERN_WINDOW_DAYS,
    STATISTICAL_CONFIDENCE_CAP,
};
use headway_core::models::WeatherSnapshot;
use serde::{Deserialize, Serialize};

use super::{
    ContributingFactor, ModelPrediction, PredictionContext, PredictionModel, RiskModel, RiskTier,
    RATE_TIER_BREAKPOINTS,
};
use crate::history::DayRecord;
use crate::statistical_analysis::StatisticalAnalyzer;

/// Normalising divisors for (mean temperature, mean pressure, temperature slope, pressure slope)
const SUMMARY_SCALES: [f64; 4] = [10.0, 20.0, 2.0, 3.0];

/// Readings of each variable a window needs before it can be summarised
const MIN_WINDOW_READINGS: usize = 4;

/// Compact description of a weather window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowSummary {
    /// Mean temperature (°C)
    pub mean_temperature: f64,
    /// Mean pressure (hPa)
    pub mean_pressure: f64,
    /// Temperature slope (°C/day)
    pub temperature_trend: f64,
    /// Pressure slope (hPa/day)
    pub pressure_trend: f64,
}

impl WindowSummary {
    /// Summarise a window, `None` when it lacks readings
    #[must_use]
    pub fn from_window<'a, I>(window: I) -> Option<Self>
    where
        I: IntoIterator<Item = Option<&'a WeatherSnapshot>>,
    {
        let mut temperatures = Vec::with_capacity(PATTERN_WINDOW_DAYS);
        let mut pressures = Vec::with_capacity(PATTERN_WINDOW_DAYS);
        for weather in window.into_iter().flatten() {
            if let Some(t) = weather.temperature_celsius.filter(|v| v.is_finite()) {
                temperatures.push(t);
            }
            if let Some(p) = weather.pressure_hpa.filter(|v| v.is_finite()) {
                pressures.push(p);
            }
        }

        if temperatures.len() < MIN_WINDOW_READINGS || pressures.len() < MIN_WINDOW_READINGS {
            return None;
        }

        Some(Self {
            mean_temperature: StatisticalAnalyzer::mean(&temperatures),
            mean_pressure: StatisticalAnalyzer::mean(&pressures),
            temperature_trend: StatisticalAnalyzer::linear_trend_slope(&temperatures),
            pressure_trend: StatisticalAnalyzer::linear_trend_slope(&pressures),
        })
    }

    /// `1 - mean of scaled absolute differences`, clamped at 0
    #[must_use]
    pub fn similarity(&self, other: &Self) -> f64 {
        let differences = [
            (self.mean_temperature - other.mean_temperature).abs(),
            (self.mean_pressure - other.mean_pressure).abs(),
            (self.temperature_trend - other.temperature_trend).abs(),
            (self.pressure_trend - other.pressure_trend).abs(),
        ];
        let normalized: f64 = differences
            .iter()
            .zip(SUMMARY_SCALES)
            .map(|(d, scale)| d / scale)
            .sum::<f64>()
            / SUMMARY_SCALES.len() as f64;
        (1.0 - normalized).max(0.0)
    }
}

/// Weather pattern matching
pub struct PatternMatchingModel;

impl RiskModel for PatternMatchingModel {
    fn model(&self) -> PredictionModel {
        PredictionModel::PatternMatching
    }

    fn predict(&self, context: &PredictionContext<'_>) -> ModelPrediction {
        let recent_start = context
            .recent_weather
            .len()
            .saturating_sub(PATTERN_WINDOW_DAYS);
        let Some(current) = WindowSummary::from_window(
            context
                .recent_weather
                .iter()
                .skip(recent_start)
                .map(Option::as_ref),
        ) else {
            return ModelPrediction::unknown(self.model());
        };

        let days = context.history.days();
        let outcomes: Vec<bool> = days
            .windows(PATTERN_WINDOW_DAYS + 1)
            .filter(|span| span.last().is_some_and(|next| next.date < context.target_date))
            .filter_map(|span| {
                let (next, window) = span.split_last()?;
                let summary =
                    WindowSummary::from_window(window.iter().map(DayRecord::weather))?;
                (summary.similarity(&current) > PATTERN_SIMILARITY).then_some(next.had_event())
            })
            .collect();

        if outcomes.len() < PATTERN_MIN_MATCHES {
            return ModelPrediction::unknown(self.model());
        }

        let headache_rate =
            outcomes.iter().filter(|hit| **hit).count() as f64 / outcomes.len() as f64;
        let confidence = outcomes.len().min(STATISTICAL_CONFIDENCE_CAP) as f64
            / STATISTICAL_CONFIDENCE_CAP as f64
            * PATTERN_CONFIDENCE_PENALTY;

        let mut factors = Vec::new();
        let pressure_share = (current.pressure_trend.abs() / SUMMARY_SCALES[3]).min(1.0);
        if pressure_share > 0.0 {
            let name = if current.pressure_trend < 0.0 {
                "Falling pressure trend"
            } else {
                "Rising pressure trend"
            };
            factors.push(ContributingFactor::new(name, headache_rate * pressure_share));
        }
        let temperature_share = (current.temperature_trend.abs() / SUMMARY_SCALES[2]).min(1.0);
        if temperature_share > 0.0 {
            factors.push(ContributingFactor::new(
                "Temperature trend",
                headache_rate * temperature_share,
            ));
        }

        ModelPrediction {
            model: self.model(),
            risk_tier: RiskTier::from_score(headache_rate, RATE_TIER_BREAKPOINTS),
            risk_score: headache_rate,
            confidence,
            factors,
        }
    }
}
