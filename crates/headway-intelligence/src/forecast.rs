// ABOUTME: Multi-day risk forecast and predictive alert generation
// ABOUTME: Runs the ensemble per horizon day over supplied weather forecasts with decaying confidence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{Days, NaiveDate};
use headway_core::constants::ensemble::PATTERN_WINDOW_DAYS;
use headway_core::models::{PersonalThresholds, SignalSnapshot, WeatherSnapshot};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ForecastConfig;
use crate::data_quality::DataQualityReport;
use crate::history::{DailyHistory, DayRecord};
use crate::prediction::{EnsembleRiskPredictor, PredictionContext, RiskPrediction, RiskTier};
use crate::trigger_combinations::WeatherCondition;

/// Risk forecast for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskForecastDay {
    /// Forecast day
    pub date: NaiveDate,
    /// Risk score in [0, 1]
    pub risk_score: f64,
    /// Risk tier
    pub risk_tier: RiskTier,
    /// Likely triggers, strongest first
    pub predicted_triggers: Vec<String>,
    /// Weather conditions expected to hold
    pub weather_conditions: Vec<WeatherCondition>,
    /// Confidence in [0, 1], decaying with distance
    pub confidence: f64,
}

/// Alert for a forecast day with elevated risk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictiveAlert {
    /// Day the alert is for
    pub date: NaiveDate,
    /// Risk tier (moderate or above)
    pub risk_tier: RiskTier,
    /// Risk score in [0, 1]
    pub risk_score: f64,
    /// Most likely triggers
    pub primary_triggers: Vec<String>,
    /// Alert headline
    pub message: String,
    /// Preventive actions
    pub recommendations: Vec<String>,
}

/// Triggers named in an alert
const ALERT_TRIGGERS: usize = 3;

/// Builds horizon forecasts from the ensemble
pub struct RiskForecaster {
    config: ForecastConfig,
}

impl RiskForecaster {
    /// Create a forecaster
    #[must_use]
    pub const fn new(config: ForecastConfig) -> Self {
        Self { config }
    }

    /// Horizon days following `reference`
    #[must_use]
    pub fn target_dates(&self, reference: NaiveDate) -> Vec<NaiveDate> {
        (1..=u64::from(self.config.horizon_days))
            .filter_map(|offset| reference.checked_add_days(Days::new(offset)))
            .collect()
    }

    /// Confidence of the day `day_index` days out (1 = first day)
    #[must_use]
    pub fn decayed_confidence(&self, confidence: f64, day_index: usize) -> f64 {
        let steps = f64::from(u32::try_from(day_index.saturating_sub(1)).unwrap_or(u32::MAX));
        (confidence * self.config.confidence_decay_per_day.mul_add(-steps, 1.0).max(0.0))
            .clamp(0.0, 1.0)
    }

    /// Run the ensemble for every horizon day, in date order
    ///
    /// A day uses its supplied forecast snapshot when present, otherwise the
    /// most recent observed snapshot.
    #[must_use]
    pub fn predict_days(
        &self,
        predictor: &EnsembleRiskPredictor,
        quality: &DataQualityReport,
        history: &DailyHistory,
        thresholds: &PersonalThresholds,
        forecast_snapshots: &[SignalSnapshot],
        reference: NaiveDate,
    ) -> Vec<(RiskPrediction, SignalSnapshot)> {
        let latest_observed = history.latest_snapshot();

        self.target_dates(reference)
            .into_par_iter()
            .map(|date| {
                let snapshot = forecast_snapshots
                    .iter()
                    .find(|s| s.date == date)
                    .or(latest_observed)
                    .map_or_else(
                        || SignalSnapshot::new(date),
                        |s| SignalSnapshot {
                            date,
                            ..s.clone()
                        },
                    );
                let context = PredictionContext {
                    history,
                    target_date: date,
                    current: &snapshot,
                    recent_weather: recent_weather(history, forecast_snapshots, date),
                    thresholds,
                };
                let prediction = predictor.predict(quality, &context);
                (prediction, snapshot)
            })
            .collect()
    }

    /// Convert per-day predictions into forecast days
    #[must_use]
    pub fn forecast_days(
        &self,
        predictions: &[(RiskPrediction, SignalSnapshot)],
        thresholds: &PersonalThresholds,
    ) -> Vec<RiskForecastDay> {
        let days: Vec<RiskForecastDay> = predictions
            .iter()
            .enumerate()
            .map(|(index, (prediction, snapshot))| {
                let weather_conditions = snapshot
                    .weather
                    .as_ref()
                    .map(|w| WeatherCondition::active(w, thresholds))
                    .unwrap_or_default();

                let mut predicted_triggers: Vec<String> = weather_conditions
                    .iter()
                    .map(|c| c.display_name().to_owned())
                    .collect();
                for factor in &prediction.contributing_factors {
                    if !predicted_triggers.contains(&factor.name) {
                        predicted_triggers.push(factor.name.clone());
                    }
                }

                RiskForecastDay {
                    date: prediction.date,
                    risk_score: prediction.risk_score.clamp(0.0, 1.0),
                    risk_tier: prediction.risk_tier,
                    predicted_triggers,
                    weather_conditions,
                    confidence: self.decayed_confidence(prediction.confidence, index + 1),
                }
            })
            .collect();

        debug!(days = days.len(), "Risk forecast built");
        days
    }

    /// Alerts for forecast days at moderate risk or above
    ///
    /// Days whose confidence is below `confidence_threshold` get a message
    /// stating the low confidence instead of a firm warning.
    #[must_use]
    pub fn alerts(days: &[RiskForecastDay], confidence_threshold: f64) -> Vec<PredictiveAlert> {
        days.iter()
            .filter(|day| day.risk_tier.is_elevated())
            .map(|day| {
                let primary_triggers: Vec<String> = day
                    .predicted_triggers
                    .iter()
                    .take(ALERT_TRIGGERS)
                    .cloned()
                    .collect();

                let tier = day.risk_tier.label();
                let message = if day.confidence < confidence_threshold {
                    format!(
                        "Possible {tier} headache risk on {}. Confidence is low, so treat this as an early heads-up",
                        day.date
                    )
                } else if primary_triggers.is_empty() {
                    format!("{} headache risk forecast for {}", capitalize(tier), day.date)
                } else {
                    format!(
                        "{} headache risk forecast for {}: watch for {}",
                        capitalize(tier),
                        day.date,
                        primary_triggers.join(", ")
                    )
                };

                let mut recommendations: Vec<String> = day
                    .weather_conditions
                    .iter()
                    .map(|c| condition_recommendation(*c).to_owned())
                    .collect();
                if recommendations.is_empty() {
                    recommendations
                        .push("Keep regular sleep, meals and hydration".to_owned());
                }
                if day.risk_tier >= RiskTier::High {
                    recommendations.push(
                        "Keep your usual medication at hand and plan a lighter schedule"
                            .to_owned(),
                    );
                }

                PredictiveAlert {
                    date: day.date,
                    risk_tier: day.risk_tier,
                    risk_score: day.risk_score,
                    primary_triggers,
                    message,
                    recommendations,
                }
            })
            .collect()
    }
}

fn recent_weather(
    history: &DailyHistory,
    forecast_snapshots: &[SignalSnapshot],
    target: NaiveDate,
) -> Vec<Option<WeatherSnapshot>> {
    (1..=PATTERN_WINDOW_DAYS as u64)
        .rev()
        .map(|back| {
            let date = target.checked_sub_days(Days::new(back))?;
            history
                .day(date)
                .and_then(DayRecord::weather)
                .or_else(|| {
                    forecast_snapshots
                        .iter()
                        .find(|s| s.date == date)
                        .and_then(|s| s.weather.as_ref())
                })
                .cloned()
        })
        .collect()
}

const fn condition_recommendation(condition: WeatherCondition) -> &'static str {
    match condition {
        WeatherCondition::PressureChange => {
            "Pressure is shifting: drink water early and keep your medication nearby"
        }
        WeatherCondition::LowPressure => "Low pressure expected: plan lighter activities",
        WeatherCondition::Humidity => "Humid day ahead: stay hydrated and keep cool",
        WeatherCondition::TemperatureChange => {
            "Large temperature swing: dress in layers and avoid sudden heat or cold"
        }
        WeatherCondition::HighWind => "Strong wind: limit long exposure outdoors",
        WeatherCondition::HighUv => "High UV: wear sunglasses and limit glare",
        WeatherCondition::Precipitation => {
            "Storms likely: keep rescue medication with you"
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;

    fn forecaster() -> RiskForecaster {
        RiskForecaster::new(AnalysisConfig::default().forecast)
    }

    #[test]
    fn test_target_dates_start_after_reference() {
        let reference = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        let dates = forecaster().target_dates(reference);

        assert_eq!(dates.len(), 7);
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2025, 7, 1).unwrap());
    }

    #[test]
    fn test_confidence_decays_five_percent_per_day() {
        let f = forecaster();
        assert!((f.decayed_confidence(0.8, 1) - 0.8).abs() < 1e-12);
        assert!((f.decayed_confidence(0.8, 3) - 0.72).abs() < 1e-12);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("very high"), "Very high");
        assert_eq!(capitalize(""), "");
    }
}
