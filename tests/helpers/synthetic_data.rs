// ABOUTME: Synthetic headache diary generator for automated engine testing
// ABOUTME: Creates reproducible daily weather, sleep and episode histories with pressure-driven headaches
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use chrono::{DateTime, Days, NaiveDate, Utc};
use headway::core::models::{
    HeadacheEvent, HealthSnapshot, MedicationEntry, SignalSample, SignalSnapshot, Trigger,
    WeatherSnapshot,
};
use headway::intelligence::AnalysisInput;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// First day of every synthetic history
#[must_use]
pub fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

/// `offset` days after [`base_date`]
#[must_use]
pub fn day(offset: u64) -> NaiveDate {
    base_date().checked_add_days(Days::new(offset)).unwrap()
}

/// Morning timestamp on `date`
#[must_use]
pub fn morning(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(9, 0, 0).unwrap().and_utc()
}

/// Episode starting on the morning of `date`
#[must_use]
pub fn event_on(date: NaiveDate, intensity: u8) -> HeadacheEvent {
    HeadacheEvent::new(morning(date), intensity).unwrap()
}

/// Snapshot carrying only weather
#[must_use]
pub fn weather_on(date: NaiveDate, weather: WeatherSnapshot) -> SignalSnapshot {
    SignalSnapshot::new(date).with_weather(weather)
}

/// Snapshot carrying a sleep duration and a cycle day
#[must_use]
pub fn health_on(date: NaiveDate, sleep_hours: f64, cycle_day: Option<u32>) -> SignalSnapshot {
    let at = morning(date);
    SignalSnapshot::new(date).with_health(HealthSnapshot {
        sleep_duration: Some(SignalSample::new(sleep_hours, at)),
        cycle_day: cycle_day.map(|d| SignalSample::new(d, at)),
        ..HealthSnapshot::default()
    })
}

/// Builder for reproducible synthetic diaries
///
/// Every generated day carries weather and sleep data and is either a
/// headache day or a headache-free check-in. Headaches fall on "front"
/// days with a sharp pressure drop and high humidity, so pressure change
/// and humidity correlate strongly with intensity.
#[derive(Debug, Clone)]
pub struct SyntheticDiaryBuilder {
    rng: ChaCha8Rng,
    days: u64,
    front_probability: f64,
    cycle_length: Option<u32>,
    forecast_days: u64,
}

impl SyntheticDiaryBuilder {
    /// Create a builder with a deterministic seed
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            days: 120,
            front_probability: 0.25,
            cycle_length: None,
            forecast_days: 0,
        }
    }

    /// Number of observed days
    #[must_use]
    pub const fn days(mut self, days: u64) -> Self {
        self.days = days;
        self
    }

    /// Share of days with a weather front
    #[must_use]
    pub const fn front_probability(mut self, probability: f64) -> Self {
        self.front_probability = probability;
        self
    }

    /// Attach menstrual cycle days; headaches then also cluster on cycle days 1-2
    #[must_use]
    pub const fn with_cycle(mut self, length: u32) -> Self {
        self.cycle_length = Some(length);
        self
    }

    /// Supply weather forecasts for this many days after the last observed day
    #[must_use]
    pub const fn with_forecast(mut self, days: u64) -> Self {
        self.forecast_days = days;
        self
    }

    /// Last observed day
    #[must_use]
    pub fn last_day(&self) -> NaiveDate {
        day(self.days.saturating_sub(1))
    }

    /// Generate the diary
    #[must_use]
    pub fn build(mut self) -> AnalysisInput {
        let mut input = AnalysisInput::default();

        for offset in 0..self.days {
            let date = day(offset);
            let front = self.rng.gen_bool(self.front_probability);
            let cycle_day = self
                .cycle_length
                .map(|len| u32::try_from(offset).unwrap() % len + 1);
            let cyclic_headache = cycle_day.is_some_and(|d| d <= 2);

            input.snapshots.push(self.weather_snapshot(date, front));
            let sleep = if front {
                self.rng.gen_range(5.0..6.0)
            } else {
                self.rng.gen_range(6.5..8.5)
            };
            input.snapshots.push(health_on(date, sleep, cycle_day));

            if front || cyclic_headache {
                let intensity = if front {
                    self.rng.gen_range(7..=9)
                } else {
                    self.rng.gen_range(5..=7)
                };
                let mut event = event_on(date, intensity);
                if front {
                    event = event.with_trigger(Trigger::WeatherChange);
                }
                input.events.push(event);
            } else {
                input.check_in_days.push(date);
            }
        }

        for offset in self.days..self.days + self.forecast_days {
            let date = day(offset);
            let front = offset % 3 == 0;
            input.forecast_snapshots.push(self.weather_snapshot(date, front));
        }

        input.reference_date = Some(day(self.days.saturating_sub(1)));
        input
    }

    fn weather_snapshot(&mut self, date: NaiveDate, front: bool) -> SignalSnapshot {
        let weather = if front {
            WeatherSnapshot {
                temperature_celsius: Some(self.rng.gen_range(8.0..14.0)),
                pressure_hpa: Some(self.rng.gen_range(996.0..1002.0)),
                humidity_percent: Some(self.rng.gen_range(85.0..95.0)),
                wind_speed_kmh: Some(self.rng.gen_range(20.0..40.0)),
                pressure_change_24h: Some(self.rng.gen_range(-9.0..-6.0)),
                temperature_change_24h: Some(self.rng.gen_range(-6.0..-3.0)),
                ..WeatherSnapshot::default()
            }
        } else {
            WeatherSnapshot {
                temperature_celsius: Some(self.rng.gen_range(12.0..20.0)),
                pressure_hpa: Some(self.rng.gen_range(1010.0..1020.0)),
                humidity_percent: Some(self.rng.gen_range(45.0..70.0)),
                wind_speed_kmh: Some(self.rng.gen_range(0.0..15.0)),
                pressure_change_24h: Some(self.rng.gen_range(-1.0..1.0)),
                temperature_change_24h: Some(self.rng.gen_range(-1.5..1.5)),
                ..WeatherSnapshot::default()
            }
        };
        weather_on(date, weather)
    }
}

/// Medication entries on each of the `days` days ending at `last`
#[must_use]
pub fn daily_medication(last: NaiveDate, days: u64) -> Vec<MedicationEntry> {
    (0..days)
        .map(|back| {
            let date = last.checked_sub_days(Days::new(back)).unwrap();
            MedicationEntry::new(morning(date), "ibuprofen")
        })
        .collect()
}
