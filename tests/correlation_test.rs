// ABOUTME: Integration tests for factor correlation analysis against headache intensity
// ABOUTME: Validates pressure-drop detection, significance, ordering and the too-few-events placeholder
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use headway::core::models::{Factor, HealthMetric, WeatherSnapshot, WeatherVariable};
use headway::intelligence::{
    AnalysisConfig, CorrelationTier, DailyHistory, FactorCorrelationAnalyzer,
};
use helpers::synthetic_data::{day, event_on, health_on, weather_on};

fn analyzer() -> FactorCorrelationAnalyzer {
    FactorCorrelationAnalyzer::new(AnalysisConfig::default().correlation)
}

/// 40 days; pressure drops 6 hPa on exactly the days with intensity 7 or more
fn pressure_drop_history() -> (DailyHistory, usize) {
    let mut events = Vec::new();
    let mut snapshots = Vec::new();
    let mut check_ins = Vec::new();

    for offset in 0..40_u64 {
        let date = day(offset);
        let heavy = offset % 4 == 0;
        let weather = WeatherSnapshot {
            pressure_change_24h: Some(if heavy { -6.0 } else { 0.0 }),
            ..WeatherSnapshot::default()
        };
        snapshots.push(weather_on(date, weather));
        if heavy {
            events.push(event_on(date, 7 + u8::try_from(offset % 3).unwrap()));
        } else {
            check_ins.push(date);
        }
    }

    let count = events.len();
    (DailyHistory::build(&events, &snapshots, &check_ins), count)
}

#[test]
fn test_pressure_drop_is_strong_and_significant() {
    let (history, events) = pressure_drop_history();
    let results = analyzer().analyze(&history, events);

    let pressure = results
        .iter()
        .find(|r| r.factor == Some(Factor::Weather(WeatherVariable::PressureChange)))
        .expect("pressure change analysed");

    assert!(pressure.correlation < -0.6, "r = {}", pressure.correlation);
    assert!(pressure.is_significant);
    assert_eq!(pressure.sample_size, 40);
    assert_eq!(pressure.risk_tier, CorrelationTier::VeryHigh);
    assert!(pressure.description.contains("statistically significant"));
}

#[test]
fn test_too_few_events_yields_placeholder() {
    let (history, _) = pressure_drop_history();
    let results = analyzer().analyze(&history, 2);

    assert_eq!(results.len(), 1);
    let placeholder = &results[0];
    assert!(placeholder.is_placeholder());
    assert!(!placeholder.is_significant);
    assert!(placeholder.description.contains("1 more headache"));
}

#[test]
fn test_results_sorted_by_absolute_correlation() {
    let mut events = Vec::new();
    let mut snapshots = Vec::new();
    for offset in 0..30_u64 {
        let date = day(offset);
        let headache = offset % 3 == 0;
        // Sleep tracks headaches closely, humidity only loosely
        let sleep = if headache { 5.0 } else { 8.0 };
        let humidity = if offset % 2 == 0 { 80.0 } else { 50.0 };
        snapshots.push(health_on(date, sleep, None));
        snapshots.push(weather_on(
            date,
            WeatherSnapshot {
                humidity_percent: Some(humidity),
                ..WeatherSnapshot::default()
            },
        ));
        if headache {
            events.push(event_on(date, 6));
        }
    }
    let history = DailyHistory::build(&events, &snapshots, &[]);
    let results = analyzer().analyze(&history, events.len());

    assert_eq!(
        results[0].factor,
        Some(Factor::Health(HealthMetric::SleepDuration))
    );
    assert!(results[0].correlation < -0.9);
    for pair in results.windows(2) {
        assert!(pair[0].correlation.abs() >= pair[1].correlation.abs());
    }
}

#[test]
fn test_factor_with_too_few_samples_is_skipped() {
    let events: Vec<_> = (0..5).map(|i| event_on(day(i), 5)).collect();
    let snapshots = vec![
        health_on(day(0), 6.0, None),
        health_on(day(1), 7.0, None),
    ];
    let history = DailyHistory::build(&events, &snapshots, &[]);

    let results = analyzer().analyze(&history, events.len());
    assert!(results.is_empty());
}

#[test]
fn test_tier_breakpoints() {
    assert_eq!(CorrelationTier::from_coefficient(0.1), CorrelationTier::Low);
    assert_eq!(CorrelationTier::from_coefficient(-0.45), CorrelationTier::Moderate);
    assert_eq!(CorrelationTier::from_coefficient(0.5), CorrelationTier::High);
    assert_eq!(CorrelationTier::from_coefficient(-0.7), CorrelationTier::VeryHigh);
}
