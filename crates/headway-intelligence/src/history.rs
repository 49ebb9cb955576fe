// ABOUTME: Daily history builder folding diary events and signal snapshots into calendar days
// ABOUTME: Produces one DayRecord per day spanned, the common input of every analyzer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Daily history.
//!
//! Every analyzer works on calendar days rather than raw events: a day has at
//! most one intensity (the day's worst episode) and one merged signal
//! snapshot. The history spans every day between the first and last input
//! date, so gaps appear as days without a record.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Days, NaiveDate};
use headway_core::models::{
    Factor, HeadacheEvent, HealthMetric, SignalSnapshot, Trigger, WeatherSnapshot,
};
use serde::{Deserialize, Serialize};

use crate::data_quality::DayFlags;

/// Everything known about one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    /// Calendar day
    pub date: NaiveDate,
    /// Merged signal data for the day
    pub signals: Option<SignalSnapshot>,
    /// Highest intensity logged that day
    pub max_intensity: Option<u8>,
    /// Episodes starting that day
    pub event_count: usize,
    /// Declared triggers across the day's episodes
    pub triggers: BTreeSet<Trigger>,
    /// Custom trigger tags across the day's episodes
    pub custom_triggers: BTreeSet<String>,
    /// Whether any medication was taken that day
    pub took_medication: bool,
    /// Whether the user logged anything (episode or headache-free check-in)
    pub record_exists: bool,
    /// Headache known from personal context without a logged episode
    #[serde(default)]
    pub reported_headache: bool,
}

impl DayRecord {
    fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            signals: None,
            max_intensity: None,
            event_count: 0,
            triggers: BTreeSet::new(),
            custom_triggers: BTreeSet::new(),
            took_medication: false,
            record_exists: false,
            reported_headache: false,
        }
    }

    /// Whether an episode started this day
    #[must_use]
    pub const fn had_event(&self) -> bool {
        self.event_count > 0
    }

    /// Day intensity, 0.0 for headache-free days
    #[must_use]
    pub fn intensity(&self) -> f64 {
        self.max_intensity.map_or(0.0, f64::from)
    }

    /// 1.0 on headache days (logged or reported), 0.0 otherwise
    #[must_use]
    pub fn headache_indicator(&self) -> f64 {
        if self.had_event() || self.reported_headache {
            1.0
        } else {
            0.0
        }
    }

    /// Value of `factor` on this day
    #[must_use]
    pub fn value(&self, factor: Factor) -> Option<f64> {
        self.signals.as_ref().and_then(|s| s.value(factor))
    }

    /// Weather observation for the day
    #[must_use]
    pub fn weather(&self) -> Option<&WeatherSnapshot> {
        self.signals
            .as_ref()
            .and_then(|s| s.weather.as_ref())
            .filter(|w| w.has_any())
    }

    /// Current cycle day, if tracked
    #[must_use]
    pub fn cycle_day(&self) -> Option<f64> {
        self.value(Factor::Health(HealthMetric::CycleDay))
    }

    /// Whether any usable signal sample exists for the day
    #[must_use]
    pub fn has_signal_data(&self) -> bool {
        self.signals.as_ref().is_some_and(SignalSnapshot::has_data)
    }

    /// Data-quality flags for the day
    #[must_use]
    pub fn flags(&self) -> DayFlags {
        DayFlags {
            has_signal_data: self.has_signal_data(),
            had_event: self.had_event(),
            record_exists: self.record_exists,
        }
    }
}

/// Contiguous day-by-day history, oldest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyHistory {
    days: Vec<DayRecord>,
}

impl DailyHistory {
    /// Fold events, signal snapshots and headache-free check-ins into days
    ///
    /// Snapshots sharing a date are merged; an episode counts on the day it
    /// started.
    #[must_use]
    pub fn build(
        events: &[HeadacheEvent],
        snapshots: &[SignalSnapshot],
        check_in_days: &[NaiveDate],
    ) -> Self {
        let mut by_date: BTreeMap<NaiveDate, DayRecord> = BTreeMap::new();

        for event in events {
            let day = by_date
                .entry(event.date())
                .or_insert_with_key(|date| DayRecord::empty(*date));
            day.event_count += 1;
            day.record_exists = true;
            day.max_intensity = Some(
                day.max_intensity
                    .map_or(event.intensity(), |m| m.max(event.intensity())),
            );
            day.triggers.extend(event.triggers().iter().copied());
            day.custom_triggers
                .extend(event.custom_triggers().iter().cloned());
            day.took_medication |= !event.medications().is_empty();
        }

        for snapshot in snapshots {
            let day = by_date
                .entry(snapshot.date)
                .or_insert_with_key(|date| DayRecord::empty(*date));
            match day.signals.as_mut() {
                Some(existing) => existing.merge(snapshot.clone()),
                None => day.signals = Some(snapshot.clone()),
            }
        }

        for date in check_in_days {
            by_date
                .entry(*date)
                .or_insert_with_key(|date| DayRecord::empty(*date))
                .record_exists = true;
        }

        let (Some(first), Some(last)) = (
            by_date.keys().next().copied(),
            by_date.keys().next_back().copied(),
        ) else {
            return Self::default();
        };

        let mut days = Vec::with_capacity(by_date.len());
        let mut cursor = first;
        while cursor <= last {
            days.push(
                by_date
                    .remove(&cursor)
                    .unwrap_or_else(|| DayRecord::empty(cursor)),
            );
            match cursor.checked_add_days(Days::new(1)) {
                Some(next) => cursor = next,
                None => break,
            }
        }

        Self { days }
    }

    /// Mark `date` as a headache day known outside the logged episodes
    ///
    /// The history is extended forward to `date` when needed. Dates before
    /// the first day are ignored, as are days that already carry an episode.
    #[must_use]
    pub fn with_reported_headache(mut self, date: NaiveDate) -> Self {
        let Some(last) = self.days.last().map(|d| d.date) else {
            let mut day = DayRecord::empty(date);
            day.record_exists = true;
            day.reported_headache = true;
            self.days.push(day);
            return self;
        };

        let mut cursor = last;
        while cursor < date {
            match cursor.checked_add_days(Days::new(1)) {
                Some(next) => {
                    self.days.push(DayRecord::empty(next));
                    cursor = next;
                }
                None => break,
            }
        }

        if let Some(day) = self.day_mut(date) {
            if !day.had_event() {
                day.record_exists = true;
                day.reported_headache = true;
            }
        }
        self
    }

    fn day_mut(&mut self, date: NaiveDate) -> Option<&mut DayRecord> {
        let first = self.days.first()?.date;
        let offset = usize::try_from((date - first).num_days()).ok()?;
        self.days.get_mut(offset)
    }

    /// Days oldest first
    #[must_use]
    pub fn days(&self) -> &[DayRecord] {
        &self.days
    }

    /// Number of calendar days spanned
    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Whether the history holds no days
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Record for `date`
    #[must_use]
    pub fn day(&self, date: NaiveDate) -> Option<&DayRecord> {
        let first = self.days.first()?.date;
        let offset = usize::try_from((date - first).num_days()).ok()?;
        self.days.get(offset)
    }

    /// Most recent day
    #[must_use]
    pub fn last_day(&self) -> Option<&DayRecord> {
        self.days.last()
    }

    /// Days on which an episode started
    pub fn headache_days(&self) -> impl Iterator<Item = &DayRecord> {
        self.days.iter().filter(|d| d.had_event())
    }

    /// Data-quality flags, one per day
    #[must_use]
    pub fn flags(&self) -> Vec<DayFlags> {
        self.days.iter().map(DayRecord::flags).collect()
    }

    /// Whether any day carries signal data
    #[must_use]
    pub fn has_any_signal(&self) -> bool {
        self.days.iter().any(DayRecord::has_signal_data)
    }

    /// Signals of the most recent day that has any
    #[must_use]
    pub fn latest_snapshot(&self) -> Option<&SignalSnapshot> {
        self.days
            .iter()
            .rev()
            .filter(|d| d.has_signal_data())
            .find_map(|d| d.signals.as_ref())
    }
}
