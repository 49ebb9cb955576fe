// ABOUTME: Headache diary event model with intensity, timing, trigger tags and medication
// ABOUTME: Validates the 1-10 intensity scale and end-after-start invariant
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Lowest intensity on the diary scale
pub const MIN_INTENSITY: u8 = 1;
/// Highest intensity on the diary scale
pub const MAX_INTENSITY: u8 = 10;

/// Trigger tags a user can declare when logging an episode
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    /// Emotional or work stress
    Stress,
    /// Short or disturbed sleep
    LackOfSleep,
    /// Not enough fluids
    Dehydration,
    /// Alcohol consumption
    Alcohol,
    /// Caffeine intake or withdrawal
    Caffeine,
    /// Missed or delayed meal
    SkippedMeal,
    /// Bright or flickering light
    BrightLight,
    /// Loud environment
    LoudNoise,
    /// Perfume, smoke or other strong odours
    StrongSmell,
    /// Long screen sessions
    ScreenTime,
    /// Physical exertion
    Exercise,
    /// Perceived weather change
    WeatherChange,
    /// Menstruation or other hormonal change
    Hormonal,
    /// Travel or time-zone change
    Travel,
    /// Specific food
    Food,
}

impl Trigger {
    /// Stable identifier used inside combination keys
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Stress => "Stress",
            Self::LackOfSleep => "LackOfSleep",
            Self::Dehydration => "Dehydration",
            Self::Alcohol => "Alcohol",
            Self::Caffeine => "Caffeine",
            Self::SkippedMeal => "SkippedMeal",
            Self::BrightLight => "BrightLight",
            Self::LoudNoise => "LoudNoise",
            Self::StrongSmell => "StrongSmell",
            Self::ScreenTime => "ScreenTime",
            Self::Exercise => "Exercise",
            Self::WeatherChange => "WeatherChange",
            Self::Hormonal => "Hormonal",
            Self::Travel => "Travel",
            Self::Food => "Food",
        }
    }

    /// Human-readable name
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Stress => "stress",
            Self::LackOfSleep => "lack of sleep",
            Self::Dehydration => "dehydration",
            Self::Alcohol => "alcohol",
            Self::Caffeine => "caffeine",
            Self::SkippedMeal => "skipped meals",
            Self::BrightLight => "bright light",
            Self::LoudNoise => "loud noise",
            Self::StrongSmell => "strong smells",
            Self::ScreenTime => "screen time",
            Self::Exercise => "exercise",
            Self::WeatherChange => "weather changes",
            Self::Hormonal => "hormonal changes",
            Self::Travel => "travel",
            Self::Food => "specific foods",
        }
    }
}

/// A dose of medication taken for an episode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationEntry {
    /// When the dose was taken
    pub taken_at: DateTime<Utc>,
    /// Substance name (e.g., "ibuprofen", "sumatriptan")
    pub substance: String,
    /// Free-text dose (e.g., "400 mg")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dose: Option<String>,
    /// Whether the dose relieved the pain
    #[serde(default)]
    pub relief_achieved: bool,
    /// When relief set in, if it did
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relief_time: Option<DateTime<Utc>>,
}

impl MedicationEntry {
    /// Create a medication entry without relief information
    #[must_use]
    pub fn new(taken_at: DateTime<Utc>, substance: impl Into<String>) -> Self {
        Self {
            taken_at,
            substance: substance.into(),
            dose: None,
            relief_achieved: false,
            relief_time: None,
        }
    }

    /// Time from intake to relief, if relief was recorded
    #[must_use]
    pub fn time_to_relief(&self) -> Option<Duration> {
        self.relief_time
            .filter(|_| self.relief_achieved)
            .map(|relief| relief - self.taken_at)
    }
}

/// One logged headache episode
///
/// Fields are private so the intensity scale and the end-after-start
/// invariant hold for every event built through the constructors. Events
/// deserialized from external input must be checked with [`Self::validate`].
///
/// # Examples
///
/// ```rust
/// use headway_core::models::{HeadacheEvent, Trigger};
/// use chrono::{Duration, Utc};
///
/// let start = Utc::now() - Duration::hours(3);
/// let mut event = HeadacheEvent::new(start, 7)
///     .unwrap()
///     .with_trigger(Trigger::Stress)
///     .with_note("after a long meeting");
/// event.end_at(start + Duration::hours(2)).unwrap();
///
/// assert!(!event.is_ongoing());
/// assert_eq!(event.intensity(), 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadacheEvent {
    id: Uuid,
    start: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end: Option<DateTime<Utc>>,
    intensity: u8,
    #[serde(default)]
    note: String,
    #[serde(default)]
    triggers: BTreeSet<Trigger>,
    #[serde(default)]
    custom_triggers: BTreeSet<String>,
    #[serde(default)]
    medications: Vec<MedicationEntry>,
}

impl HeadacheEvent {
    /// Create an ongoing episode
    ///
    /// # Errors
    ///
    /// Returns an error if `intensity` is outside 1-10
    pub fn new(start: DateTime<Utc>, intensity: u8) -> AppResult<Self> {
        Self::check_intensity(intensity)?;
        Ok(Self {
            id: Uuid::new_v4(),
            start,
            end: None,
            intensity,
            note: String::new(),
            triggers: BTreeSet::new(),
            custom_triggers: BTreeSet::new(),
            medications: Vec::new(),
        })
    }

    /// Attach a declared trigger tag
    #[must_use]
    pub fn with_trigger(mut self, trigger: Trigger) -> Self {
        self.triggers.insert(trigger);
        self
    }

    /// Attach a custom trigger tag; blank tags are ignored
    #[must_use]
    pub fn with_custom_trigger(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        let trimmed = tag.trim();
        if !trimmed.is_empty() {
            self.custom_triggers.insert(trimmed.to_owned());
        }
        self
    }

    /// Attach a free-text note
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Attach a medication entry
    #[must_use]
    pub fn with_medication(mut self, medication: MedicationEntry) -> Self {
        self.medications.push(medication);
        self
    }

    /// Mark the episode as ended
    ///
    /// # Errors
    ///
    /// Returns an error if `end` precedes the start of the episode
    pub fn end_at(&mut self, end: DateTime<Utc>) -> AppResult<()> {
        if end < self.start {
            return Err(AppError::invalid_input(format!(
                "Episode end {end} precedes its start {}",
                self.start
            )));
        }
        self.end = Some(end);
        Ok(())
    }

    /// Update the intensity rating
    ///
    /// # Errors
    ///
    /// Returns an error if `intensity` is outside 1-10
    pub fn set_intensity(&mut self, intensity: u8) -> AppResult<()> {
        Self::check_intensity(intensity)?;
        self.intensity = intensity;
        Ok(())
    }

    /// Check the invariants of an event built outside the constructors
    ///
    /// # Errors
    ///
    /// Returns an error if intensity is outside 1-10 or end precedes start
    pub fn validate(&self) -> AppResult<()> {
        Self::check_intensity(self.intensity)?;
        if let Some(end) = self.end {
            if end < self.start {
                return Err(AppError::invalid_input(format!(
                    "Event {} ends before it starts",
                    self.id
                )));
            }
        }
        Ok(())
    }

    fn check_intensity(intensity: u8) -> AppResult<()> {
        if (MIN_INTENSITY..=MAX_INTENSITY).contains(&intensity) {
            Ok(())
        } else {
            Err(AppError::value_out_of_range(format!(
                "Intensity {intensity} is outside {MIN_INTENSITY}-{MAX_INTENSITY}"
            )))
        }
    }

    /// Event identifier
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Episode start
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Episode end, `None` while ongoing
    #[must_use]
    pub const fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }

    /// Calendar day (UTC) the episode started on
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    /// Intensity on the 1-10 scale
    #[must_use]
    pub const fn intensity(&self) -> u8 {
        self.intensity
    }

    /// Free-text note
    #[must_use]
    pub fn note(&self) -> &str {
        &self.note
    }

    /// Declared trigger tags
    #[must_use]
    pub const fn triggers(&self) -> &BTreeSet<Trigger> {
        &self.triggers
    }

    /// Custom trigger tags
    #[must_use]
    pub const fn custom_triggers(&self) -> &BTreeSet<String> {
        &self.custom_triggers
    }

    /// Medication taken for this episode
    #[must_use]
    pub fn medications(&self) -> &[MedicationEntry] {
        &self.medications
    }

    /// Whether the episode has not been ended yet
    #[must_use]
    pub const fn is_ongoing(&self) -> bool {
        self.end.is_none()
    }

    /// Episode duration, `None` while ongoing
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        self.end.map(|end| end - self.start)
    }
}
