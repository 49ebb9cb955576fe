// ABOUTME: Candidate trigger factor taxonomy covering physiological metrics and weather variables
// ABOUTME: Provides stable keys for combination mining and display names for insight text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use serde::{Deserialize, Serialize};

/// Physiological metrics supplied by the health data collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthMetric {
    /// Heart-rate variability (SDNN, ms)
    HeartRateVariability,
    /// Resting heart rate (bpm)
    RestingHeartRate,
    /// Total sleep duration (hours)
    SleepDuration,
    /// Share of sleep spent in deep sleep (%)
    DeepSleepPercentage,
    /// Day of the menstrual cycle
    CycleDay,
    /// Basal body temperature (°C)
    BasalBodyTemperature,
    /// Body weight (kg)
    Weight,
    /// Daily step count
    Steps,
    /// Active energy burned (kcal)
    ActiveEnergy,
    /// Mindfulness minutes
    MindfulMinutes,
    /// Blood oxygen saturation (%)
    BloodOxygen,
    /// Respiratory rate (breaths/min)
    RespiratoryRate,
}

impl HealthMetric {
    /// Every metric, in reporting order
    pub const ALL: [Self; 12] = [
        Self::HeartRateVariability,
        Self::RestingHeartRate,
        Self::SleepDuration,
        Self::DeepSleepPercentage,
        Self::CycleDay,
        Self::BasalBodyTemperature,
        Self::Weight,
        Self::Steps,
        Self::ActiveEnergy,
        Self::MindfulMinutes,
        Self::BloodOxygen,
        Self::RespiratoryRate,
    ];

    /// Stable identifier used inside combination keys
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::HeartRateVariability => "HeartRateVariability",
            Self::RestingHeartRate => "RestingHeartRate",
            Self::SleepDuration => "SleepDuration",
            Self::DeepSleepPercentage => "DeepSleep",
            Self::CycleDay => "CycleDay",
            Self::BasalBodyTemperature => "BasalTemperature",
            Self::Weight => "Weight",
            Self::Steps => "Steps",
            Self::ActiveEnergy => "ActiveEnergy",
            Self::MindfulMinutes => "MindfulMinutes",
            Self::BloodOxygen => "BloodOxygen",
            Self::RespiratoryRate => "RespiratoryRate",
        }
    }

    /// Human-readable name
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::HeartRateVariability => "heart rate variability",
            Self::RestingHeartRate => "resting heart rate",
            Self::SleepDuration => "sleep duration",
            Self::DeepSleepPercentage => "deep sleep",
            Self::CycleDay => "menstrual cycle",
            Self::BasalBodyTemperature => "basal body temperature",
            Self::Weight => "body weight",
            Self::Steps => "step count",
            Self::ActiveEnergy => "active energy",
            Self::MindfulMinutes => "mindful minutes",
            Self::BloodOxygen => "blood oxygen",
            Self::RespiratoryRate => "respiratory rate",
        }
    }

    /// Whether the metric follows a monthly hormonal cycle
    #[must_use]
    pub const fn is_cyclic(self) -> bool {
        matches!(self, Self::CycleDay | Self::BasalBodyTemperature)
    }
}

/// Weather variables supplied by the weather collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherVariable {
    /// Air temperature (°C)
    Temperature,
    /// Barometric pressure (hPa)
    Pressure,
    /// Relative humidity (%)
    Humidity,
    /// Wind speed (km/h)
    WindSpeed,
    /// UV index
    UvIndex,
    /// Chance of precipitation (%)
    PrecipitationChance,
    /// Pressure change over the previous 24h (hPa)
    PressureChange,
    /// Temperature change over the previous 24h (°C)
    TemperatureChange,
    /// Humidity change over the previous 24h (%)
    HumidityChange,
}

impl WeatherVariable {
    /// Every variable, in reporting order
    pub const ALL: [Self; 9] = [
        Self::Temperature,
        Self::Pressure,
        Self::Humidity,
        Self::WindSpeed,
        Self::UvIndex,
        Self::PrecipitationChance,
        Self::PressureChange,
        Self::TemperatureChange,
        Self::HumidityChange,
    ];

    /// Stable identifier used inside combination keys
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Temperature => "Temperature",
            Self::Pressure => "Pressure",
            Self::Humidity => "Humidity",
            Self::WindSpeed => "WindSpeed",
            Self::UvIndex => "UvIndex",
            Self::PrecipitationChance => "Precipitation",
            Self::PressureChange => "PressureChange",
            Self::TemperatureChange => "TemperatureChange",
            Self::HumidityChange => "HumidityChange",
        }
    }

    /// Human-readable name
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Pressure => "barometric pressure",
            Self::Humidity => "humidity",
            Self::WindSpeed => "wind speed",
            Self::UvIndex => "UV index",
            Self::PrecipitationChance => "chance of rain",
            Self::PressureChange => "pressure change",
            Self::TemperatureChange => "temperature change",
            Self::HumidityChange => "humidity change",
        }
    }
}

/// A candidate trigger factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "source", content = "metric", rename_all = "snake_case")]
pub enum Factor {
    /// Physiological metric
    Health(HealthMetric),
    /// Weather variable
    Weather(WeatherVariable),
}

impl Factor {
    /// Every factor, health metrics first
    #[must_use]
    pub fn all() -> Vec<Self> {
        HealthMetric::ALL
            .iter()
            .copied()
            .map(Self::Health)
            .chain(WeatherVariable::ALL.iter().copied().map(Self::Weather))
            .collect()
    }

    /// Stable identifier used inside combination keys
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Health(metric) => metric.key(),
            Self::Weather(variable) => variable.key(),
        }
    }

    /// Human-readable name
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Health(metric) => metric.display_name(),
            Self::Weather(variable) => variable.display_name(),
        }
    }

    /// Whether the factor is a weather variable
    #[must_use]
    pub const fn is_weather(self) -> bool {
        matches!(self, Self::Weather(_))
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_factor_keys_are_unique() {
        let keys: HashSet<&str> = Factor::all().into_iter().map(Factor::key).collect();
        assert_eq!(keys.len(), HealthMetric::ALL.len() + WeatherVariable::ALL.len());
    }

    #[test]
    fn test_keys_contain_no_delimiter_characters() {
        for factor in Factor::all() {
            assert!(!factor.key().contains(' '));
            assert!(!factor.key().contains('+'));
        }
    }
}
