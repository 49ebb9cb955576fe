// ABOUTME: Integration tests for multi-day risk forecasting and predictive alerts
// ABOUTME: Validates horizon dates, confidence decay, snapshot selection and alert wording
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use headway::core::models::{PersonalThresholds, WeatherSnapshot};
use headway::intelligence::config::ForecastConfig;
use headway::intelligence::{
    AnalysisConfig, DailyHistory, DataQualityAssessor, EnsembleRiskPredictor, RiskForecastDay,
    RiskForecaster, RiskTier, WeatherCondition,
};
use helpers::synthetic_data::{day, event_on, health_on, weather_on};

fn forecaster(horizon_days: u32) -> RiskForecaster {
    RiskForecaster::new(ForecastConfig {
        horizon_days,
        confidence_decay_per_day: 0.05,
    })
}

fn forecast_day(
    offset: u64,
    risk_tier: RiskTier,
    confidence: f64,
    weather_conditions: Vec<WeatherCondition>,
) -> RiskForecastDay {
    RiskForecastDay {
        date: day(offset),
        risk_score: 0.5,
        risk_tier,
        predicted_triggers: weather_conditions
            .iter()
            .map(|c| c.display_name().to_owned())
            .collect(),
        weather_conditions,
        confidence,
    }
}

#[test]
fn test_horizon_starts_after_reference() {
    let dates = forecaster(7).target_dates(day(9));
    assert_eq!(dates.len(), 7);
    assert_eq!(dates[0], day(10));
    assert_eq!(dates[6], day(16));
}

#[test]
fn test_confidence_decays_per_day() {
    let forecaster = forecaster(7);
    assert!((forecaster.decayed_confidence(0.8, 1) - 0.8).abs() < 1e-9);
    assert!((forecaster.decayed_confidence(0.8, 3) - 0.72).abs() < 1e-9);
    assert!(forecaster.decayed_confidence(0.8, 7) < forecaster.decayed_confidence(0.8, 6));
}

#[test]
fn test_gated_forecast_uses_latest_snapshot() {
    let events: Vec<_> = (0..3).map(|i| event_on(day(i), 6)).collect();
    let snapshots: Vec<_> = (0..5).map(|i| health_on(day(i), 7.0, None)).collect();
    let history = DailyHistory::build(&events, &snapshots, &[]);
    let quality = DataQualityAssessor::assess(&history.flags());
    let predictor = EnsembleRiskPredictor::new(AnalysisConfig::default().ensemble);
    let thresholds = PersonalThresholds::default();

    let forecast_weather = weather_on(
        day(6),
        WeatherSnapshot {
            humidity_percent: Some(99.0),
            ..WeatherSnapshot::default()
        },
    );

    let predictions = forecaster(7).predict_days(
        &predictor,
        &quality,
        &history,
        &thresholds,
        &[forecast_weather],
        day(4),
    );

    assert_eq!(predictions.len(), 7);
    for (index, (prediction, snapshot)) in predictions.iter().enumerate() {
        assert_eq!(prediction.date, day(5 + index as u64));
        assert_eq!(snapshot.date, prediction.date);
        assert_eq!(prediction.risk_tier, RiskTier::Unknown);
        assert!(prediction.confidence.abs() < 1e-12);
    }
    // Day 6 carries the supplied forecast, the rest reuse the latest observation
    assert!(predictions[1].1.weather.is_some());
    assert!(predictions[0].1.health.is_some());

    let days = forecaster(7).forecast_days(&predictions, &thresholds);
    assert_eq!(days[1].weather_conditions, vec![WeatherCondition::Humidity]);
    assert!(days[1]
        .predicted_triggers
        .contains(&"High humidity".to_owned()));
}

#[test]
fn test_alerts_only_for_elevated_days() {
    let days = vec![
        forecast_day(1, RiskTier::Low, 0.9, Vec::new()),
        forecast_day(2, RiskTier::Unknown, 0.0, Vec::new()),
        forecast_day(3, RiskTier::Moderate, 0.9, vec![WeatherCondition::Humidity]),
        forecast_day(4, RiskTier::VeryHigh, 0.9, vec![WeatherCondition::PressureChange]),
    ];

    let alerts = RiskForecaster::alerts(&days, 0.7);
    assert_eq!(alerts.len(), 2);
    assert_eq!(alerts[0].date, day(3));
    assert!(alerts[0].message.contains("High humidity"));
    assert_eq!(alerts[1].risk_tier, RiskTier::VeryHigh);
    assert!(alerts[1].recommendations.len() >= 2);
    assert!(alerts[1]
        .recommendations
        .iter()
        .any(|r| r.contains("medication")));
}

#[test]
fn test_low_confidence_alert_is_worded_as_heads_up() {
    let days = vec![forecast_day(1, RiskTier::High, 0.4, Vec::new())];
    let alerts = RiskForecaster::alerts(&days, 0.7);

    assert_eq!(alerts.len(), 1);
    assert!(alerts[0].message.contains("Confidence is low"));
    assert!(!alerts[0].recommendations.is_empty());
}
