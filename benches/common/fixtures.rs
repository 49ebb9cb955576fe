// ABOUTME: Deterministic diary fixtures for benchmarks
// ABOUTME: Generates daily weather, sleep and episodes without randomness so runs are comparable
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]

use chrono::{Days, NaiveDate};
use headway::core::models::{
    HeadacheEvent, HealthSnapshot, SignalSample, SignalSnapshot, Trigger, WeatherSnapshot,
};
use headway::intelligence::AnalysisInput;

/// Diary lengths used across benchmarks
#[derive(Debug, Clone, Copy)]
pub enum DiaryLength {
    /// Six weeks, just past the quality gate
    Short,
    /// One season
    Season,
    /// One year
    Year,
}

impl DiaryLength {
    /// Number of days
    #[must_use]
    pub const fn days(self) -> u64 {
        match self {
            Self::Short => 42,
            Self::Season => 90,
            Self::Year => 365,
        }
    }
}

/// Generate a diary with a front every fourth day and a week of forecasts
///
/// # Panics
///
/// Panics if the generated dates overflow, which cannot happen for the
/// supported lengths.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn generate_diary(length: DiaryLength) -> AnalysisInput {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let mut input = AnalysisInput::default();
    let days = length.days();

    for offset in 0..days + 7 {
        let date = start.checked_add_days(Days::new(offset)).unwrap();
        let front = offset % 4 == 0 || offset % 11 == 0;
        let wobble = ((offset * 37) % 10) as f64 / 10.0;
        let weather = WeatherSnapshot {
            temperature_celsius: Some(12.0 + wobble * 6.0),
            pressure_hpa: Some(if front { 999.0 + wobble } else { 1013.0 + wobble * 4.0 }),
            humidity_percent: Some(if front { 86.0 + wobble * 8.0 } else { 55.0 + wobble * 10.0 }),
            pressure_change_24h: Some(if front { -6.0 - wobble * 2.0 } else { wobble - 0.5 }),
            temperature_change_24h: Some(if front { -4.0 } else { wobble }),
            ..WeatherSnapshot::default()
        };
        let snapshot = SignalSnapshot::new(date).with_weather(weather);

        if offset >= days {
            input.forecast_snapshots.push(snapshot);
            continue;
        }

        let at = date.and_hms_opt(8, 0, 0).unwrap().and_utc();
        input.snapshots.push(snapshot.with_health(HealthSnapshot {
            sleep_duration: Some(SignalSample::new((if front { 5.5 } else { 7.5 }) + wobble, at)),
            cycle_day: Some(SignalSample::new((offset % 28) as u32 + 1, at)),
            ..HealthSnapshot::default()
        }));

        if front {
            let intensity = 6 + (offset % 4) as u8;
            input.events.push(
                HeadacheEvent::new(at, intensity)
                    .unwrap()
                    .with_trigger(Trigger::WeatherChange),
            );
        } else {
            input.check_in_days.push(date);
        }
    }

    input.reference_date = start.checked_add_days(Days::new(days - 1));
    input
}
