// ABOUTME: Trigger combination mining over headache episodes and their active factors
// ABOUTME: Aggregates co-occurring factor sets under order-independent keys and ranks them by risk
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: occurrence counts are far below 2^52

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{DateTime, NaiveDate, Utc};
use headway_core::constants::combinations::{
    ACTIVE_HEALTH_CORRELATION, ACTIVE_WEATHER_HEADACHE_RATE, FREQUENCY_SATURATION, HIGH_UV_INDEX,
    HIGH_WIND_KMH, INTENSITY_SCALE, KEY_DELIMITER, MIN_CONDITION_DAYS,
    PRECIPITATION_CHANCE_PERCENT,
};
use headway_core::models::{
    Factor, HeadacheEvent, HealthMetric, PersonalThresholds, WeatherSnapshot,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::CombinationConfig;
use crate::correlation::CorrelationResult;
use crate::history::{DailyHistory, DayRecord};
use crate::statistical_analysis::StatisticalAnalyzer;

/// Weather condition that may act as a trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WeatherCondition {
    /// 24h pressure swing at or beyond the personal threshold
    PressureChange,
    /// Pressure below the personal low-pressure threshold
    LowPressure,
    /// Humidity at or above the personal threshold
    Humidity,
    /// 24h temperature swing at or beyond the personal threshold
    TemperatureChange,
    /// Strong wind
    HighWind,
    /// High UV index
    HighUv,
    /// Likely precipitation
    Precipitation,
}

impl WeatherCondition {
    /// All conditions
    pub const ALL: [Self; 7] = [
        Self::PressureChange,
        Self::LowPressure,
        Self::Humidity,
        Self::TemperatureChange,
        Self::HighWind,
        Self::HighUv,
        Self::Precipitation,
    ];

    /// Key used in combination keys
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::PressureChange => "PressureChange",
            Self::LowPressure => "LowPressure",
            Self::Humidity => "Humidity",
            Self::TemperatureChange => "TemperatureChange",
            Self::HighWind => "HighWind",
            Self::HighUv => "HighUv",
            Self::Precipitation => "Precipitation",
        }
    }

    /// Human-readable name
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::PressureChange => "Barometric pressure change",
            Self::LowPressure => "Low barometric pressure",
            Self::Humidity => "High humidity",
            Self::TemperatureChange => "Temperature swing",
            Self::HighWind => "Strong wind",
            Self::HighUv => "High UV index",
            Self::Precipitation => "Rain or storms",
        }
    }

    /// Whether the condition holds, `None` when the needed reading is missing
    #[must_use]
    pub fn holds(self, weather: &WeatherSnapshot, thresholds: &PersonalThresholds) -> Option<bool> {
        let holds = match self {
            Self::PressureChange => {
                weather.pressure_change_24h?.abs() >= thresholds.pressure_change_threshold
            }
            Self::LowPressure => weather.pressure_hpa? < thresholds.low_pressure_threshold,
            Self::Humidity => weather.humidity_percent? >= thresholds.humidity_threshold,
            Self::TemperatureChange => {
                weather.temperature_change_24h?.abs() >= thresholds.temperature_change_threshold
            }
            Self::HighWind => weather.wind_speed_kmh? > HIGH_WIND_KMH,
            Self::HighUv => weather.uv_index? > HIGH_UV_INDEX,
            Self::Precipitation => weather.precipitation_chance? >= PRECIPITATION_CHANCE_PERCENT,
        };
        Some(holds)
    }

    /// Conditions holding for `weather`
    #[must_use]
    pub fn active(weather: &WeatherSnapshot, thresholds: &PersonalThresholds) -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|c| c.holds(weather, thresholds) == Some(true))
            .collect()
    }
}

/// Historical headache rate on days a condition held
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConditionRate {
    /// Condition
    pub condition: WeatherCondition,
    /// Days the condition held
    pub days: usize,
    /// Of those, days with an episode
    pub headache_days: usize,
    /// `headache_days / days`
    pub rate: f64,
}

/// One episode's active factor set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinationObservation {
    /// Active factor keys, in any order and possibly repeated
    pub factors: Vec<String>,
    /// Episode intensity
    pub intensity: u8,
    /// Episode start
    pub occurred_at: DateTime<Utc>,
}

/// Aggregated statistics for one distinct factor set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerCombination {
    /// Sorted, deduplicated factor keys joined with `" + "`
    pub key: String,
    /// Factor keys in key order
    pub factors: Vec<String>,
    /// Episodes with exactly this set
    pub frequency: usize,
    /// Mean intensity of those episodes
    pub average_intensity: f64,
    /// `(min(frequency / 10, 1) + average_intensity / 10) / 2`
    pub risk_score: f64,
    /// Most recent episode start
    pub last_occurrence: DateTime<Utc>,
    /// Distinct days the set occurred on
    pub occurrence_dates: Vec<NaiveDate>,
}

struct Accumulator {
    factors: Vec<String>,
    occurrences: usize,
    total_intensity: f64,
    last_occurrence: DateTime<Utc>,
    dates: BTreeSet<NaiveDate>,
}

/// Mines co-occurring trigger sets from episode history
pub struct TriggerCombinationMiner {
    config: CombinationConfig,
}

impl TriggerCombinationMiner {
    /// Create a miner
    #[must_use]
    pub const fn new(config: CombinationConfig) -> Self {
        Self { config }
    }

    /// Order-independent key for a factor set
    #[must_use]
    pub fn combination_key<S: AsRef<str>>(factors: &[S]) -> String {
        Self::normalize(factors).join(KEY_DELIMITER)
    }

    /// Composite risk of a combination
    #[must_use]
    pub fn risk_score(occurrences: usize, average_intensity: f64) -> f64 {
        let frequency_score = (occurrences as f64 / FREQUENCY_SATURATION).min(1.0);
        let intensity_score = average_intensity / INTENSITY_SCALE;
        f64::midpoint(frequency_score, intensity_score).clamp(0.0, 1.0)
    }

    /// Headache rate on days each condition held
    #[must_use]
    pub fn condition_rates(
        history: &DailyHistory,
        thresholds: &PersonalThresholds,
    ) -> Vec<ConditionRate> {
        WeatherCondition::ALL
            .into_iter()
            .map(|condition| {
                let (days, headache_days) = history
                    .days()
                    .iter()
                    .filter(|day| {
                        day.weather()
                            .and_then(|w| condition.holds(w, thresholds))
                            .unwrap_or(false)
                    })
                    .fold((0, 0), |(days, hits), day| {
                        (days + 1, hits + usize::from(day.had_event()))
                    });
                ConditionRate {
                    condition,
                    days,
                    headache_days,
                    rate: if days == 0 {
                        0.0
                    } else {
                        headache_days as f64 / days as f64
                    },
                }
            })
            .collect()
    }

    /// Mine and rank combinations for `events`
    #[must_use]
    pub fn mine(
        &self,
        events: &[HeadacheEvent],
        history: &DailyHistory,
        correlations: &[CorrelationResult],
        thresholds: &PersonalThresholds,
    ) -> Vec<TriggerCombination> {
        let observations = self.observations(events, history, correlations, thresholds);
        let combinations = Self::aggregate(observations);
        debug!(
            combinations = combinations.len(),
            "Trigger combinations mined"
        );
        combinations
    }

    /// Active factor set of every episode
    #[must_use]
    pub fn observations(
        &self,
        events: &[HeadacheEvent],
        history: &DailyHistory,
        correlations: &[CorrelationResult],
        thresholds: &PersonalThresholds,
    ) -> Vec<CombinationObservation> {
        let active_health = active_health_metrics(history, correlations);
        let active_conditions: Vec<WeatherCondition> = Self::condition_rates(history, thresholds)
            .into_iter()
            .filter(|r| r.days >= MIN_CONDITION_DAYS && r.rate > ACTIVE_WEATHER_HEADACHE_RATE)
            .map(|r| r.condition)
            .collect();

        events
            .iter()
            .map(|event| {
                let mut factors = Vec::new();
                if let Some(day) = history.day(event.date()) {
                    factors.extend(
                        active_health
                            .iter()
                            .filter(|h| h.is_adverse(day))
                            .map(|h| h.metric.key().to_owned()),
                    );
                    if let Some(weather) = day.weather() {
                        factors.extend(
                            active_conditions
                                .iter()
                                .filter(|c| c.holds(weather, thresholds) == Some(true))
                                .map(|c| c.key().to_owned()),
                        );
                    }
                }
                if self.config.include_declared_triggers {
                    factors.extend(event.triggers().iter().map(|t| t.key().to_owned()));
                    factors.extend(event.custom_triggers().iter().cloned());
                }
                CombinationObservation {
                    factors,
                    intensity: event.intensity(),
                    occurred_at: event.start(),
                }
            })
            .collect()
    }

    /// Aggregate observations per combination key, sorted by descending risk
    ///
    /// Observations with no active factor are skipped.
    #[must_use]
    pub fn aggregate<I>(observations: I) -> Vec<TriggerCombination>
    where
        I: IntoIterator<Item = CombinationObservation>,
    {
        let mut by_key: HashMap<String, Accumulator> = HashMap::new();

        for observation in observations {
            let factors = Self::normalize(&observation.factors);
            if factors.is_empty() {
                continue;
            }
            let key = factors.join(KEY_DELIMITER);
            let entry = by_key.entry(key).or_insert_with(|| Accumulator {
                factors,
                occurrences: 0,
                total_intensity: 0.0,
                last_occurrence: observation.occurred_at,
                dates: BTreeSet::new(),
            });
            entry.occurrences += 1;
            entry.total_intensity += f64::from(observation.intensity);
            entry.last_occurrence = entry.last_occurrence.max(observation.occurred_at);
            entry.dates.insert(observation.occurred_at.date_naive());
        }

        let mut combinations: Vec<TriggerCombination> = by_key
            .into_iter()
            .map(|(key, acc)| {
                let average_intensity = acc.total_intensity / acc.occurrences as f64;
                TriggerCombination {
                    key,
                    factors: acc.factors,
                    frequency: acc.occurrences,
                    average_intensity,
                    risk_score: Self::risk_score(acc.occurrences, average_intensity),
                    last_occurrence: acc.last_occurrence,
                    occurrence_dates: acc.dates.into_iter().collect(),
                }
            })
            .collect();

        combinations.sort_by(|a, b| {
            b.risk_score
                .partial_cmp(&a.risk_score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.key.cmp(&b.key))
        });
        combinations
    }

    fn normalize<S: AsRef<str>>(factors: &[S]) -> Vec<String> {
        factors
            .iter()
            .map(|f| f.as_ref().trim())
            .filter(|f| !f.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_owned)
            .collect()
    }
}

/// Health metric strongly correlated with intensity, with its historical mean
struct ActiveHealthMetric {
    metric: HealthMetric,
    mean: f64,
    positive: bool,
}

impl ActiveHealthMetric {
    fn is_adverse(&self, day: &DayRecord) -> bool {
        day.value(Factor::Health(self.metric)).is_some_and(|value| {
            if self.positive {
                value > self.mean
            } else {
                value < self.mean
            }
        })
    }
}

fn active_health_metrics(
    history: &DailyHistory,
    correlations: &[CorrelationResult],
) -> Vec<ActiveHealthMetric> {
    correlations
        .iter()
        .filter(|c| c.is_significant && c.correlation.abs() > ACTIVE_HEALTH_CORRELATION)
        .filter_map(|c| {
            let metric = c.health_metric()?;
            let values: Vec<f64> = history
                .days()
                .iter()
                .filter_map(|d| d.value(Factor::Health(metric)))
                .collect();
            Some(ActiveHealthMetric {
                metric,
                mean: StatisticalAnalyzer::mean(&values),
                positive: c.correlation > 0.0,
            })
        })
        .collect()
}
