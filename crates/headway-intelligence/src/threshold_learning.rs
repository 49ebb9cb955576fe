// ABOUTME: Personal weather-sensitivity threshold learning from headache-day history
// ABOUTME: Derives thresholds by percentile analysis with floors, falling back to defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use headway_core::constants::thresholds::{
    HUMIDITY_FLOOR, LOW_PRESSURE_CEILING, LOW_PRESSURE_FLOOR, MIN_HEADACHE_POINTS,
    MIN_HISTORY_POINTS, PRESSURE_CHANGE_FLOOR, TEMPERATURE_CHANGE_FLOOR, UPPER_PERCENTILE,
};
use headway_core::models::{PersonalThresholds, ThresholdSource, WeatherSnapshot};
use tracing::{debug, info};

use crate::history::DailyHistory;
use crate::statistical_analysis::StatisticalAnalyzer;

/// Learns personal weather thresholds
pub struct PersonalThresholdLearner;

impl PersonalThresholdLearner {
    /// Learn thresholds from `history`
    ///
    /// Requires at least 30 days with weather data, 10 of them headache
    /// days; otherwise the fixed defaults are returned unchanged. A variable
    /// missing from every headache day keeps its default.
    #[must_use]
    pub fn learn(history: &DailyHistory) -> PersonalThresholds {
        let weather_days: Vec<(&WeatherSnapshot, bool)> = history
            .days()
            .iter()
            .filter_map(|day| day.weather().map(|w| (w, day.had_event())))
            .collect();
        let headache_weather: Vec<&WeatherSnapshot> = weather_days
            .iter()
            .filter(|(_, had_event)| *had_event)
            .map(|(w, _)| *w)
            .collect();

        if weather_days.len() < MIN_HISTORY_POINTS || headache_weather.len() < MIN_HEADACHE_POINTS
        {
            debug!(
                history_points = weather_days.len(),
                headache_points = headache_weather.len(),
                "Not enough history to learn thresholds, using defaults"
            );
            return PersonalThresholds::default();
        }

        Self::from_headache_days(&headache_weather)
    }

    fn from_headache_days(days: &[&WeatherSnapshot]) -> PersonalThresholds {
        let defaults = PersonalThresholds::default();

        let pressure_changes: Vec<f64> = days
            .iter()
            .filter_map(|w| w.pressure_change_24h.map(f64::abs))
            .collect();
        let temperature_changes: Vec<f64> = days
            .iter()
            .filter_map(|w| w.temperature_change_24h.map(f64::abs))
            .collect();
        let humidity: Vec<f64> = days.iter().filter_map(|w| w.humidity_percent).collect();
        let pressure: Vec<f64> = days.iter().filter_map(|w| w.pressure_hpa).collect();

        let thresholds = PersonalThresholds {
            pressure_change_threshold: StatisticalAnalyzer::percentile(
                &pressure_changes,
                UPPER_PERCENTILE,
                false,
            )
            .map_or(defaults.pressure_change_threshold, |v| {
                v.max(PRESSURE_CHANGE_FLOOR)
            }),
            temperature_change_threshold: StatisticalAnalyzer::percentile(
                &temperature_changes,
                UPPER_PERCENTILE,
                false,
            )
            .map_or(defaults.temperature_change_threshold, |v| {
                v.max(TEMPERATURE_CHANGE_FLOOR)
            }),
            humidity_threshold: StatisticalAnalyzer::percentile(&humidity, UPPER_PERCENTILE, false)
                .map_or(defaults.humidity_threshold, |v| v.max(HUMIDITY_FLOOR)),
            // Lower pressure is the adverse direction
            low_pressure_threshold: StatisticalAnalyzer::percentile(
                &pressure,
                UPPER_PERCENTILE,
                true,
            )
            .map_or(defaults.low_pressure_threshold, |v| {
                v.clamp(LOW_PRESSURE_FLOOR, LOW_PRESSURE_CEILING)
            }),
            source: ThresholdSource::Learned,
        };

        info!(
            pressure_change = thresholds.pressure_change_threshold,
            temperature_change = thresholds.temperature_change_threshold,
            humidity = thresholds.humidity_threshold,
            low_pressure = thresholds.low_pressure_threshold,
            headache_points = days.len(),
            "Personal thresholds learned"
        );

        thresholds
    }
}
