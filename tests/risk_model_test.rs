// ABOUTME: Integration tests for the four ensemble sub-models scored in isolation
// ABOUTME: Validates match floors, confidence caps, rule weights and tier breakpoints per model
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use chrono::NaiveDate;
use headway::core::models::{
    HeadacheEvent, PersonalThresholds, SignalSnapshot, ThresholdSource, WeatherSnapshot,
};
use headway::intelligence::prediction::{
    PatternMatchingModel, PredictionContext, RiskModel, StatisticalModel, ThresholdRuleModel,
    TimeSeriesModel,
};
use headway::intelligence::{DailyHistory, ModelPrediction, RiskTier};
use helpers::synthetic_data::{day, event_on, weather_on};

const EPSILON: f64 = 1e-9;

fn calm() -> WeatherSnapshot {
    WeatherSnapshot {
        temperature_celsius: Some(15.0),
        pressure_hpa: Some(1012.0),
        humidity_percent: Some(55.0),
        ..WeatherSnapshot::default()
    }
}

fn stormy() -> WeatherSnapshot {
    WeatherSnapshot {
        temperature_celsius: Some(4.0),
        pressure_hpa: Some(975.0),
        humidity_percent: Some(97.0),
        ..WeatherSnapshot::default()
    }
}

fn score(
    model: &dyn RiskModel,
    history: &DailyHistory,
    target: NaiveDate,
    current: &SignalSnapshot,
    recent_weather: Vec<Option<WeatherSnapshot>>,
    thresholds: &PersonalThresholds,
) -> ModelPrediction {
    model.predict(&PredictionContext {
        history,
        target_date: target,
        current,
        recent_weather,
        thresholds,
    })
}

fn rules(weather: WeatherSnapshot, thresholds: &PersonalThresholds) -> ModelPrediction {
    let history = DailyHistory::default();
    let current = weather_on(day(0), weather);
    score(&ThresholdRuleModel, &history, day(0), &current, Vec::new(), thresholds)
}

/// `similar` calm days (the first `headaches` of them with an episode) followed
/// by ten stormy headache days
fn similarity_history(similar: u64, headaches: u64) -> DailyHistory {
    let mut snapshots = Vec::new();
    let mut events: Vec<HeadacheEvent> = Vec::new();
    for offset in 0..similar {
        snapshots.push(weather_on(day(offset), calm()));
        if offset < headaches {
            events.push(event_on(day(offset), 6));
        }
    }
    for offset in similar..similar + 10 {
        snapshots.push(weather_on(day(offset), stormy()));
        events.push(event_on(day(offset), 8));
    }
    DailyHistory::build(&events, &snapshots, &[])
}

#[test]
fn test_statistical_model_needs_five_matches() {
    let history = similarity_history(4, 2);
    let target = day(100);
    let current = weather_on(target, calm());
    let thresholds = PersonalThresholds::default();

    let prediction = score(&StatisticalModel, &history, target, &current, Vec::new(), &thresholds);
    assert_eq!(prediction.risk_tier, RiskTier::Unknown);
    assert!(prediction.confidence.abs() < EPSILON);

    let history = similarity_history(5, 2);
    let prediction = score(&StatisticalModel, &history, target, &current, Vec::new(), &thresholds);
    // 2 of 5 similar days had an episode; the stormy days never match
    assert!((prediction.risk_score - 0.4).abs() < EPSILON);
    assert_eq!(prediction.risk_tier, RiskTier::High);
    assert!((prediction.confidence - 0.25).abs() < EPSILON);
}

#[test]
fn test_statistical_confidence_caps_at_twenty_matches() {
    let history = similarity_history(30, 0);
    let target = day(100);
    let current = weather_on(target, calm());

    let prediction = score(
        &StatisticalModel,
        &history,
        target,
        &current,
        Vec::new(),
        &PersonalThresholds::default(),
    );

    assert!((prediction.confidence - 1.0).abs() < EPSILON);
    assert_eq!(prediction.risk_tier, RiskTier::Low);
    assert!(prediction.risk_score.abs() < EPSILON);
}

#[test]
fn test_statistical_model_without_current_features_is_unknown() {
    let history = similarity_history(10, 5);
    let current = SignalSnapshot::new(day(100));

    let prediction = score(
        &StatisticalModel,
        &history,
        day(100),
        &current,
        Vec::new(),
        &PersonalThresholds::default(),
    );
    assert_eq!(prediction.risk_tier, RiskTier::Unknown);
}

/// `days` identical calm days with episodes on the given offsets
fn pattern_history(days: u64, headache_offsets: &[u64]) -> DailyHistory {
    let snapshots: Vec<SignalSnapshot> = (0..days).map(|d| weather_on(day(d), calm())).collect();
    let events: Vec<HeadacheEvent> = headache_offsets.iter().map(|d| event_on(day(*d), 7)).collect();
    DailyHistory::build(&events, &snapshots, &[])
}

fn pattern_score(history: &DailyHistory, target: NaiveDate) -> ModelPrediction {
    let current = weather_on(target, calm());
    score(
        &PatternMatchingModel,
        history,
        target,
        &current,
        vec![Some(calm()); 7],
        &PersonalThresholds::default(),
    )
}

#[test]
fn test_pattern_model_needs_three_matching_windows() {
    // Days 0-8: two complete 7+1 day windows before the target
    let history = pattern_history(9, &[8]);
    let prediction = pattern_score(&history, day(9));
    assert_eq!(prediction.risk_tier, RiskTier::Unknown);

    // Days 0-9: windows followed by days 7, 8 and 9
    let history = pattern_history(10, &[8]);
    let prediction = pattern_score(&history, day(10));
    assert!((prediction.risk_score - 1.0 / 3.0).abs() < EPSILON);
    assert_eq!(prediction.risk_tier, RiskTier::Moderate);
    assert!((prediction.confidence - 3.0 / 20.0 * 0.9).abs() < EPSILON);
}

#[test]
fn test_pattern_confidence_carries_penalty_at_cap() {
    let history = pattern_history(40, &[10, 20, 30]);
    let prediction = pattern_score(&history, day(40));

    // 33 matching windows, capped at 20, scaled by 0.9
    assert!((prediction.confidence - 0.9).abs() < EPSILON);
    assert!((prediction.risk_score - 3.0 / 33.0).abs() < EPSILON);
    assert_eq!(prediction.risk_tier, RiskTier::Low);
}

#[test]
fn test_pattern_model_without_recent_weather_is_unknown() {
    let history = pattern_history(30, &[]);
    let current = weather_on(day(30), calm());
    let prediction = score(
        &PatternMatchingModel,
        &history,
        day(30),
        &current,
        vec![None; 7],
        &PersonalThresholds::default(),
    );
    assert_eq!(prediction.risk_tier, RiskTier::Unknown);
}

#[test]
fn test_threshold_rules_sum_fixed_weights() {
    let defaults = PersonalThresholds::default();

    let everything = rules(
        WeatherSnapshot {
            pressure_change_24h: Some(-5.0),
            temperature_change_24h: Some(9.0),
            humidity_percent: Some(85.0),
            pressure_hpa: Some(1000.0),
            ..WeatherSnapshot::default()
        },
        &defaults,
    );
    assert!((everything.risk_score - 1.0).abs() < EPSILON);
    assert_eq!(everything.risk_tier, RiskTier::VeryHigh);
    assert!((everything.confidence - 0.6).abs() < EPSILON);
    let weights: Vec<f64> = everything.factors.iter().map(|f| f.contribution).collect();
    assert_eq!(weights, vec![0.30, 0.25, 0.20, 0.25]);

    let changes = rules(
        WeatherSnapshot {
            pressure_change_24h: Some(4.0),
            temperature_change_24h: Some(-8.5),
            humidity_percent: Some(50.0),
            pressure_hpa: Some(1015.0),
            ..WeatherSnapshot::default()
        },
        &defaults,
    );
    assert!((changes.risk_score - 0.55).abs() < EPSILON);
    assert_eq!(changes.risk_tier, RiskTier::High);

    let damp_and_low = rules(
        WeatherSnapshot {
            pressure_change_24h: Some(0.5),
            temperature_change_24h: Some(1.0),
            humidity_percent: Some(90.0),
            pressure_hpa: Some(1001.0),
            ..WeatherSnapshot::default()
        },
        &defaults,
    );
    assert!((damp_and_low.risk_score - 0.45).abs() < EPSILON);
    assert_eq!(damp_and_low.risk_tier, RiskTier::Moderate);

    let damp = rules(
        WeatherSnapshot {
            humidity_percent: Some(90.0),
            pressure_hpa: Some(1015.0),
            ..WeatherSnapshot::default()
        },
        &defaults,
    );
    assert!((damp.risk_score - 0.20).abs() < EPSILON);
    assert_eq!(damp.risk_tier, RiskTier::Low);
}

#[test]
fn test_threshold_rule_confidence_scales_with_evaluated_rules() {
    let learned = PersonalThresholds {
        source: ThresholdSource::Learned,
        ..PersonalThresholds::default()
    };

    let prediction = rules(
        WeatherSnapshot {
            pressure_change_24h: Some(-3.5),
            ..WeatherSnapshot::default()
        },
        &learned,
    );

    // One of four rules evaluated, at the learned-threshold confidence
    assert!((prediction.confidence - 0.8 / 4.0).abs() < EPSILON);
    assert!((prediction.risk_score - 0.30).abs() < EPSILON);
    assert_eq!(prediction.risk_tier, RiskTier::Moderate);

    let silent = rules(WeatherSnapshot::default(), &learned);
    assert_eq!(silent.risk_tier, RiskTier::Unknown);
}

fn check_in_history(days: u64, headache_every: Option<u64>) -> DailyHistory {
    let mut events = Vec::new();
    let mut check_ins = Vec::new();
    for offset in 0..days {
        if headache_every.is_some_and(|n| offset % n == 0) {
            events.push(event_on(day(offset), 6));
        } else {
            check_ins.push(day(offset));
        }
    }
    DailyHistory::build(&events, &[], &check_ins)
}

fn time_series_score(history: &DailyHistory, target: NaiveDate) -> ModelPrediction {
    let current = SignalSnapshot::new(target);
    score(
        &TimeSeriesModel,
        history,
        target,
        &current,
        Vec::new(),
        &PersonalThresholds::default(),
    )
}

#[test]
fn test_time_series_needs_thirty_recorded_days() {
    let history = check_in_history(29, None);
    assert_eq!(time_series_score(&history, day(29)).risk_tier, RiskTier::Unknown);

    let history = check_in_history(30, None);
    let prediction = time_series_score(&history, day(30));
    assert!((prediction.confidence - 0.3).abs() < EPSILON);
    // Headache-free history in January: only the seasonal term 0.2 × 0.10 remains
    assert!((prediction.risk_score - 0.02).abs() < EPSILON);
    assert_eq!(prediction.risk_tier, RiskTier::Low);
}

#[test]
fn test_time_series_confidence_caps_below_one() {
    let history = check_in_history(150, Some(1));
    let prediction = time_series_score(&history, day(150));

    assert!((prediction.confidence - 0.9).abs() < EPSILON);
    assert!((prediction.risk_score - 1.0).abs() < EPSILON);
    assert_eq!(prediction.risk_tier, RiskTier::VeryHigh);
}
