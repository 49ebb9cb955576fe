// ABOUTME: Signal sample and per-day snapshot models for physiological and weather data
// ABOUTME: Every metric is an explicit optional field; absent metrics are skipped, never faked
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::factor::{Factor, HealthMetric, WeatherVariable};

/// One measured value of a metric at or around a timestamp
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalSample<T> {
    /// Measured value
    pub value: T,
    /// When the value was measured (or the end of its sampling window)
    pub timestamp: DateTime<Utc>,
    /// Slope relative to the prior window, if the collaborator computed one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<f64>,
    /// Population standard deviation within the sampling window
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variability: Option<f64>,
}

impl<T> SignalSample<T> {
    /// Create a sample without trend or variability
    #[must_use]
    pub const fn new(value: T, timestamp: DateTime<Utc>) -> Self {
        Self {
            value,
            timestamp,
            trend: None,
            variability: None,
        }
    }
}

fn as_f64(sample: Option<&SignalSample<f64>>) -> Option<f64> {
    sample.map(|s| s.value).filter(|v| v.is_finite())
}

fn count_as_f64(sample: Option<&SignalSample<u32>>) -> Option<f64> {
    sample.map(|s| f64::from(s.value))
}

/// Physiological samples available for one day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthSnapshot {
    /// Heart-rate variability (ms)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heart_rate_variability: Option<SignalSample<f64>>,
    /// Resting heart rate (bpm)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resting_heart_rate: Option<SignalSample<f64>>,
    /// Sleep duration (hours)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_duration: Option<SignalSample<f64>>,
    /// Deep sleep share (%)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deep_sleep_percentage: Option<SignalSample<f64>>,
    /// Day of the menstrual cycle (1 = first day of period)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycle_day: Option<SignalSample<u32>>,
    /// Basal body temperature (°C)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basal_body_temperature: Option<SignalSample<f64>>,
    /// Body weight (kg)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<SignalSample<f64>>,
    /// Step count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<SignalSample<u32>>,
    /// Active energy (kcal)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_energy: Option<SignalSample<f64>>,
    /// Mindful minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mindful_minutes: Option<SignalSample<f64>>,
    /// Blood oxygen saturation (%)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_oxygen: Option<SignalSample<f64>>,
    /// Respiratory rate (breaths/min)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub respiratory_rate: Option<SignalSample<f64>>,
}

impl HealthSnapshot {
    /// Value of `metric`, `None` when the metric was not supplied
    #[must_use]
    pub fn value(&self, metric: HealthMetric) -> Option<f64> {
        match metric {
            HealthMetric::HeartRateVariability => as_f64(self.heart_rate_variability.as_ref()),
            HealthMetric::RestingHeartRate => as_f64(self.resting_heart_rate.as_ref()),
            HealthMetric::SleepDuration => as_f64(self.sleep_duration.as_ref()),
            HealthMetric::DeepSleepPercentage => as_f64(self.deep_sleep_percentage.as_ref()),
            HealthMetric::CycleDay => count_as_f64(self.cycle_day.as_ref()),
            HealthMetric::BasalBodyTemperature => as_f64(self.basal_body_temperature.as_ref()),
            HealthMetric::Weight => as_f64(self.weight.as_ref()),
            HealthMetric::Steps => count_as_f64(self.steps.as_ref()),
            HealthMetric::ActiveEnergy => as_f64(self.active_energy.as_ref()),
            HealthMetric::MindfulMinutes => as_f64(self.mindful_minutes.as_ref()),
            HealthMetric::BloodOxygen => as_f64(self.blood_oxygen.as_ref()),
            HealthMetric::RespiratoryRate => as_f64(self.respiratory_rate.as_ref()),
        }
    }

    /// Whether at least one metric is present
    #[must_use]
    pub fn has_any(&self) -> bool {
        HealthMetric::ALL.iter().any(|m| self.value(*m).is_some())
    }
}

/// Weather observation (or forecast) for one day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherSnapshot {
    /// Air temperature (°C)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_celsius: Option<f64>,
    /// Barometric pressure (hPa)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure_hpa: Option<f64>,
    /// Relative humidity (%)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity_percent: Option<f64>,
    /// Wind speed (km/h)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_speed_kmh: Option<f64>,
    /// UV index
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uv_index: Option<f64>,
    /// Chance of precipitation (%)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precipitation_chance: Option<f64>,
    /// Pressure change over the previous 24h (hPa)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure_change_24h: Option<f64>,
    /// Temperature change over the previous 24h (°C)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_change_24h: Option<f64>,
    /// Humidity change over the previous 24h (%)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity_change_24h: Option<f64>,
}

impl WeatherSnapshot {
    /// Value of `variable`, `None` when it was not supplied
    #[must_use]
    pub fn value(&self, variable: WeatherVariable) -> Option<f64> {
        let value = match variable {
            WeatherVariable::Temperature => self.temperature_celsius,
            WeatherVariable::Pressure => self.pressure_hpa,
            WeatherVariable::Humidity => self.humidity_percent,
            WeatherVariable::WindSpeed => self.wind_speed_kmh,
            WeatherVariable::UvIndex => self.uv_index,
            WeatherVariable::PrecipitationChance => self.precipitation_chance,
            WeatherVariable::PressureChange => self.pressure_change_24h,
            WeatherVariable::TemperatureChange => self.temperature_change_24h,
            WeatherVariable::HumidityChange => self.humidity_change_24h,
        };
        value.filter(|v| v.is_finite())
    }

    /// Whether at least one variable is present
    #[must_use]
    pub fn has_any(&self) -> bool {
        WeatherVariable::ALL.iter().any(|v| self.value(*v).is_some())
    }
}

/// All signal data available for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalSnapshot {
    /// Calendar day the samples belong to
    pub date: NaiveDate,
    /// Physiological samples
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<HealthSnapshot>,
    /// Weather observation or forecast
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<WeatherSnapshot>,
}

impl SignalSnapshot {
    /// Create an empty snapshot for `date`
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self {
            date,
            health: None,
            weather: None,
        }
    }

    /// Attach physiological samples
    #[must_use]
    pub fn with_health(mut self, health: HealthSnapshot) -> Self {
        self.health = Some(health);
        self
    }

    /// Attach a weather observation
    #[must_use]
    pub fn with_weather(mut self, weather: WeatherSnapshot) -> Self {
        self.weather = Some(weather);
        self
    }

    /// Value of `factor` on this day
    #[must_use]
    pub fn value(&self, factor: Factor) -> Option<f64> {
        match factor {
            Factor::Health(metric) => self.health.as_ref().and_then(|h| h.value(metric)),
            Factor::Weather(variable) => self.weather.as_ref().and_then(|w| w.value(variable)),
        }
    }

    /// Whether the snapshot carries any usable sample
    #[must_use]
    pub fn has_data(&self) -> bool {
        self.health.as_ref().is_some_and(HealthSnapshot::has_any)
            || self.weather.as_ref().is_some_and(WeatherSnapshot::has_any)
    }

    /// Merge `other` into `self`, keeping existing samples and filling gaps
    pub fn merge(&mut self, other: Self) {
        if let Some(health) = other.health {
            match self.health.as_mut() {
                Some(existing) => fill_health(existing, &health),
                None => self.health = Some(health),
            }
        }
        if let Some(weather) = other.weather {
            match self.weather.as_mut() {
                Some(existing) => fill_weather(existing, &weather),
                None => self.weather = Some(weather),
            }
        }
    }
}

fn fill_health(target: &mut HealthSnapshot, source: &HealthSnapshot) {
    target.heart_rate_variability = target.heart_rate_variability.or(source.heart_rate_variability);
    target.resting_heart_rate = target.resting_heart_rate.or(source.resting_heart_rate);
    target.sleep_duration = target.sleep_duration.or(source.sleep_duration);
    target.deep_sleep_percentage = target.deep_sleep_percentage.or(source.deep_sleep_percentage);
    target.cycle_day = target.cycle_day.or(source.cycle_day);
    target.basal_body_temperature = target.basal_body_temperature.or(source.basal_body_temperature);
    target.weight = target.weight.or(source.weight);
    target.steps = target.steps.or(source.steps);
    target.active_energy = target.active_energy.or(source.active_energy);
    target.mindful_minutes = target.mindful_minutes.or(source.mindful_minutes);
    target.blood_oxygen = target.blood_oxygen.or(source.blood_oxygen);
    target.respiratory_rate = target.respiratory_rate.or(source.respiratory_rate);
}

fn fill_weather(target: &mut WeatherSnapshot, source: &WeatherSnapshot) {
    target.temperature_celsius = target.temperature_celsius.or(source.temperature_celsius);
    target.pressure_hpa = target.pressure_hpa.or(source.pressure_hpa);
    target.humidity_percent = target.humidity_percent.or(source.humidity_percent);
    target.wind_speed_kmh = target.wind_speed_kmh.or(source.wind_speed_kmh);
    target.uv_index = target.uv_index.or(source.uv_index);
    target.precipitation_chance = target.precipitation_chance.or(source.precipitation_chance);
    target.pressure_change_24h = target.pressure_change_24h.or(source.pressure_change_24h);
    target.temperature_change_24h = target.temperature_change_24h.or(source.temperature_change_24h);
    target.humidity_change_24h = target.humidity_change_24h.or(source.humidity_change_24h);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 7, 0, 0).unwrap()
    }

    #[test]
    fn test_absent_metric_is_none() {
        let snapshot = SignalSnapshot::new(at().date_naive());
        assert!(!snapshot.has_data());
        assert_eq!(snapshot.value(Factor::Health(HealthMetric::Steps)), None);
        assert_eq!(snapshot.value(Factor::Weather(WeatherVariable::Pressure)), None);
    }

    #[test]
    fn test_non_finite_values_are_skipped() {
        let weather = WeatherSnapshot {
            pressure_hpa: Some(f64::NAN),
            humidity_percent: Some(70.0),
            ..WeatherSnapshot::default()
        };
        assert_eq!(weather.value(WeatherVariable::Pressure), None);
        assert_eq!(weather.value(WeatherVariable::Humidity), Some(70.0));
    }

    #[test]
    fn test_merge_fills_gaps_only() {
        let mut first = SignalSnapshot::new(at().date_naive()).with_health(HealthSnapshot {
            sleep_duration: Some(SignalSample::new(6.5, at())),
            ..HealthSnapshot::default()
        });
        let second = SignalSnapshot::new(at().date_naive()).with_health(HealthSnapshot {
            sleep_duration: Some(SignalSample::new(8.0, at())),
            steps: Some(SignalSample::new(9000, at())),
            ..HealthSnapshot::default()
        });
        first.merge(second);
        assert_eq!(first.value(Factor::Health(HealthMetric::SleepDuration)), Some(6.5));
        assert_eq!(first.value(Factor::Health(HealthMetric::Steps)), Some(9000.0));
    }
}
