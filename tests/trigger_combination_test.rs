// ABOUTME: Integration tests for trigger combination mining and risk scoring
// ABOUTME: Validates order-independent keys, risk formula, ranking and mining over synthetic diaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use headway::core::models::{PersonalThresholds, WeatherSnapshot};
use headway::intelligence::config::CombinationConfig;
use headway::intelligence::trigger_combinations::CombinationObservation;
use headway::intelligence::{
    AnalysisConfig, DailyHistory, FactorCorrelationAnalyzer, PersonalThresholdLearner,
    TriggerCombinationMiner, WeatherCondition,
};
use helpers::synthetic_data::{day, morning, SyntheticDiaryBuilder};

fn observation(factors: &[&str], intensity: u8, offset: u64) -> CombinationObservation {
    CombinationObservation {
        factors: factors.iter().map(|f| (*f).to_owned()).collect(),
        intensity,
        occurred_at: morning(day(offset)),
    }
}

#[test]
fn test_humidity_and_pressure_change_risk_score() {
    let observations =
        (0..10).map(|i| observation(&["Humidity", "PressureChange"], 8, i));
    let combinations = TriggerCombinationMiner::aggregate(observations);

    assert_eq!(combinations.len(), 1);
    let combination = &combinations[0];
    assert_eq!(combination.key, "Humidity + PressureChange");
    assert_eq!(combination.frequency, 10);
    assert!((combination.average_intensity - 8.0).abs() < 1e-9);
    assert!((combination.risk_score - 0.9).abs() < 1e-9);
    assert_eq!(combination.occurrence_dates.len(), 10);
    assert_eq!(combination.last_occurrence, morning(day(9)));
}

#[test]
fn test_factor_order_and_duplicates_do_not_split_keys() {
    let combinations = TriggerCombinationMiner::aggregate(vec![
        observation(&["PressureChange", "Humidity"], 6, 0),
        observation(&["Humidity", "PressureChange", "Humidity"], 8, 1),
    ]);

    assert_eq!(combinations.len(), 1);
    assert_eq!(combinations[0].frequency, 2);
    assert_eq!(combinations[0].factors, vec!["Humidity", "PressureChange"]);
    assert!((combinations[0].average_intensity - 7.0).abs() < 1e-9);
}

#[test]
fn test_empty_factor_sets_are_skipped() {
    let combinations = TriggerCombinationMiner::aggregate(vec![
        observation(&[], 9, 0),
        observation(&["  "], 9, 1),
        observation(&["Stress"], 4, 2),
    ]);
    assert_eq!(combinations.len(), 1);
    assert_eq!(combinations[0].key, "Stress");
}

#[test]
fn test_risk_score_saturates_frequency() {
    assert!((TriggerCombinationMiner::risk_score(25, 10.0) - 1.0).abs() < 1e-9);
    assert!((TriggerCombinationMiner::risk_score(5, 6.0) - 0.55).abs() < 1e-9);
}

#[test]
fn test_combinations_ranked_by_risk() {
    let mut observations: Vec<CombinationObservation> =
        (0..3).map(|i| observation(&["Stress"], 4, i)).collect();
    observations.extend((3..9).map(|i| observation(&["Alcohol", "LackOfSleep"], 9, i)));

    let combinations = TriggerCombinationMiner::aggregate(observations);
    assert_eq!(combinations[0].key, "Alcohol + LackOfSleep");
    assert!(combinations[0].risk_score > combinations[1].risk_score);
}

#[test]
fn test_condition_with_missing_reading_is_undecided() {
    let weather = WeatherSnapshot {
        humidity_percent: Some(90.0),
        ..WeatherSnapshot::default()
    };
    let thresholds = PersonalThresholds::default();

    assert_eq!(WeatherCondition::Humidity.holds(&weather, &thresholds), Some(true));
    assert_eq!(WeatherCondition::PressureChange.holds(&weather, &thresholds), None);
    assert_eq!(
        WeatherCondition::active(&weather, &thresholds),
        vec![WeatherCondition::Humidity]
    );
}

fn mine_synthetic(include_declared_triggers: bool) -> Vec<headway::intelligence::TriggerCombination> {
    let input = SyntheticDiaryBuilder::new(7).days(90).build();
    let history = DailyHistory::build(&input.events, &input.snapshots, &input.check_in_days);
    let correlations = FactorCorrelationAnalyzer::new(AnalysisConfig::default().correlation)
        .analyze(&history, input.events.len());
    let thresholds = PersonalThresholdLearner::learn(&history);

    TriggerCombinationMiner::new(CombinationConfig {
        include_declared_triggers,
    })
    .mine(&input.events, &history, &correlations, &thresholds)
}

#[test]
fn test_mining_synthetic_diary() {
    let combinations = mine_synthetic(true);

    assert!(!combinations.is_empty());
    for combination in &combinations {
        let mut sorted = combination.factors.clone();
        sorted.sort();
        assert_eq!(combination.factors, sorted);
        assert_eq!(
            combination.key,
            TriggerCombinationMiner::combination_key(&combination.factors)
        );
        assert!((0.0..=1.0).contains(&combination.risk_score));
    }
    for pair in combinations.windows(2) {
        assert!(pair[0].risk_score >= pair[1].risk_score);
    }
    assert!(combinations
        .iter()
        .any(|c| c.factors.iter().any(|f| f == "WeatherChange")));
}

#[test]
fn test_declared_triggers_can_be_excluded() {
    let combinations = mine_synthetic(false);
    assert!(combinations
        .iter()
        .all(|c| c.factors.iter().all(|f| f != "WeatherChange")));
}
