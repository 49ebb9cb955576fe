// ABOUTME: Insight composition turning analysis outputs into prioritized recommendations
// ABOUTME: Rule-based selection of cyclic, environmental, combination and lifestyle insights
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: event counts are far below 2^52

//! Insight composition.
//!
//! Purely templated text assembly: which rules fire, and at what priority,
//! is fixed; only the wording carries the user's numbers.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use chrono::{Days, NaiveDate};
use headway_core::constants::insights::{
    COMBINATION_RISK, CYCLIC_CORRELATION, FACTOR_CORRELATION, FREQUENT_TRIGGER_SHARE,
    MEDICATION_OVERUSE_DAYS, MEDICATION_WINDOW_DAYS,
};
use headway_core::models::{Factor, HeadacheEvent, HealthMetric, PersonalFactors, Trigger};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::InsightConfig;
use crate::correlation::CorrelationResult;
use crate::history::DailyHistory;
use crate::trigger_combinations::TriggerCombination;

/// Episodes required before declared triggers are ranked
const MIN_EVENTS_FOR_TRIGGER_SHARE: usize = 3;

/// Insight category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightCategory {
    /// Menstrual or other cyclic physiological factor
    CyclicHormonal,
    /// Weather and environment
    Environmental,
    /// Co-occurring trigger sets
    CombinedTriggers,
    /// Sleep, activity, medication and declared habits
    Lifestyle,
}

/// Insight priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightPriority {
    /// Nice to know
    Low,
    /// Worth acting on
    Medium,
    /// Act on first
    High,
}

/// One user-facing insight
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    /// Category
    pub category: InsightCategory,
    /// Priority
    pub priority: InsightPriority,
    /// Short headline
    pub title: String,
    /// Explanation
    pub message: String,
    /// Concrete preventive actions
    pub actions: Vec<String>,
    /// Factors the insight is about
    pub related_factors: Vec<String>,
}

/// Analysis outputs an insight pass reads
#[derive(Debug, Clone, Copy)]
pub struct InsightInputs<'a> {
    /// Factor correlations
    pub correlations: &'a [CorrelationResult],
    /// Trigger combinations
    pub combinations: &'a [TriggerCombination],
    /// Episode history
    pub events: &'a [HeadacheEvent],
    /// Daily history
    pub history: &'a DailyHistory,
    /// Personal context
    pub personal: &'a PersonalFactors,
    /// Day the analysis runs for
    pub reference_date: NaiveDate,
}

/// Composes prioritized insights
pub struct InsightComposer {
    config: InsightConfig,
}

impl InsightComposer {
    /// Create a composer
    #[must_use]
    pub const fn new(config: InsightConfig) -> Self {
        Self { config }
    }

    /// Compose de-duplicated insights, highest priority first
    #[must_use]
    pub fn compose(&self, inputs: &InsightInputs<'_>) -> Vec<Insight> {
        let mut insights = Vec::new();
        insights.extend(self.cyclic_insights(inputs));
        insights.extend(environmental_insights(inputs.correlations));
        insights.extend(lifestyle_insights(inputs.correlations));
        insights.extend(combination_insights(inputs.combinations));
        insights.extend(medication_overuse_insight(inputs));
        insights.extend(frequent_trigger_insights(inputs.events));

        let mut seen = HashSet::new();
        insights.retain(|i| seen.insert((i.category, i.title.clone())));
        // Stable sort keeps rule order within a priority
        insights.sort_by(|a, b| b.priority.cmp(&a.priority));
        insights.truncate(self.config.max_insights);

        debug!(insights = insights.len(), "Insights composed");
        insights
    }

    fn cyclic_insights(&self, inputs: &InsightInputs<'_>) -> Vec<Insight> {
        let cycle_length = inputs
            .personal
            .cycle_length_days
            .filter(|len| *len > 0)
            .unwrap_or(self.config.default_cycle_length_days);

        strong(inputs.correlations, CYCLIC_CORRELATION)
            .filter(|c| c.health_metric().is_some_and(HealthMetric::is_cyclic))
            .map(|c| {
                let anchor = next_cycle_start(inputs.history, cycle_length, inputs.reference_date)
                    .and_then(|start| {
                        Some((
                            start.checked_sub_days(Days::new(2))?,
                            start.checked_sub_days(Days::new(1))?,
                        ))
                    });
                let window = anchor.map_or_else(
                    || "In the 1-2 days before your period starts".to_owned(),
                    |(first, second)| format!("On {first} and {second}"),
                );
                Insight {
                    category: InsightCategory::CyclicHormonal,
                    priority: InsightPriority::High,
                    title: "Cycle-related headache pattern".to_owned(),
                    message: format!(
                        "Your headaches follow your cycle closely ({} correlation r = {:.2}). Preventive steps work best just before your period",
                        c.factor_name, c.correlation
                    ),
                    actions: vec![
                        format!("{window}, prioritise sleep, hydration and regular meals"),
                        format!("{window}, avoid stacking other known triggers"),
                        "Ask your doctor about short-term preventive treatment timed to your cycle"
                            .to_owned(),
                    ],
                    related_factors: vec![c.factor_name.clone()],
                }
            })
            .collect()
    }
}

fn strong(
    correlations: &[CorrelationResult],
    threshold: f64,
) -> impl Iterator<Item = &CorrelationResult> {
    correlations
        .iter()
        .filter(move |c| !c.is_placeholder() && c.correlation.abs() > threshold)
}

/// Expected first day of the next cycle, from the latest cycle-day reading
fn next_cycle_start(
    history: &DailyHistory,
    cycle_length: u32,
    reference: NaiveDate,
) -> Option<NaiveDate> {
    let (date, cycle_day) = history
        .days()
        .iter()
        .rev()
        .find_map(|d| d.cycle_day().map(|v| (d.date, v)))?;
    let cycle_day = cycle_day.round().max(1.0) as u64;
    let length = u64::from(cycle_length.max(1));
    // Day 1 is the first day of a period
    let remaining = length - (cycle_day - 1) % length;
    let mut start = date.checked_add_days(Days::new(remaining))?;
    while start <= reference {
        start = start.checked_add_days(Days::new(length))?;
    }
    Some(start)
}

fn environmental_insights(correlations: &[CorrelationResult]) -> Vec<Insight> {
    let physiological_link = strong(correlations, FACTOR_CORRELATION)
        .any(|c| matches!(c.factor, Some(Factor::Health(_))));

    strong(correlations, FACTOR_CORRELATION)
        .filter(|c| c.factor.is_some_and(Factor::is_weather))
        .map(|c| {
            let (priority, message) = if physiological_link {
                (
                    InsightPriority::High,
                    format!(
                        "{} (r = {:.2}) adds to the physiological factors already linked to your headaches",
                        c.factor_name, c.correlation
                    ),
                )
            } else {
                (
                    InsightPriority::Medium,
                    format!(
                        "{} is linked to your headaches (r = {:.2})",
                        c.factor_name, c.correlation
                    ),
                )
            };
            Insight {
                category: InsightCategory::Environmental,
                priority,
                title: format!("{} affects your headaches", c.factor_name),
                message,
                actions: vec![
                    "Check the forecast each morning and plan lighter days when conditions match"
                        .to_owned(),
                    "Keep water and your usual medication with you on those days".to_owned(),
                ],
                related_factors: vec![c.factor_name.clone()],
            }
        })
        .collect()
}

fn lifestyle_insights(correlations: &[CorrelationResult]) -> Vec<Insight> {
    strong(correlations, FACTOR_CORRELATION)
        .filter_map(|c| {
            let metric = c.health_metric().filter(|m| !m.is_cyclic())?;
            let direction = if c.correlation > 0.0 { "higher" } else { "lower" };
            Some(Insight {
                category: InsightCategory::Lifestyle,
                priority: InsightPriority::Medium,
                title: format!("{} and your headaches", c.factor_name),
                message: format!(
                    "Headaches are stronger when your {} is {direction} than usual (r = {:.2})",
                    c.factor_name.to_lowercase(),
                    c.correlation
                ),
                actions: vec![metric_action(metric).to_owned()],
                related_factors: vec![c.factor_name.clone()],
            })
        })
        .collect()
}

const fn metric_action(metric: HealthMetric) -> &'static str {
    match metric {
        HealthMetric::SleepDuration | HealthMetric::DeepSleepPercentage => {
            "Keep a consistent bedtime and wake time, including weekends"
        }
        HealthMetric::HeartRateVariability | HealthMetric::RestingHeartRate => {
            "Schedule recovery time and stress management on strained days"
        }
        HealthMetric::Steps | HealthMetric::ActiveEnergy => {
            "Keep activity levels steady rather than alternating rest and intense days"
        }
        HealthMetric::MindfulMinutes => "Make a short daily relaxation practice a habit",
        HealthMetric::Weight => "Keep regular meals and discuss weight changes with your doctor",
        HealthMetric::BloodOxygen | HealthMetric::RespiratoryRate => {
            "Mention breathing or oxygen changes to your doctor"
        }
        HealthMetric::CycleDay | HealthMetric::BasalBodyTemperature => {
            "Track your cycle to anticipate higher-risk days"
        }
    }
}

fn combination_insights(combinations: &[TriggerCombination]) -> Vec<Insight> {
    combinations
        .iter()
        .filter(|c| c.risk_score > COMBINATION_RISK)
        .map(|c| Insight {
            category: InsightCategory::CombinedTriggers,
            priority: InsightPriority::High,
            title: format!("Avoid {} together", c.factors.join(" and ")),
            message: format!(
                "{} occurred together in {} headaches with average intensity {:.1}",
                c.key, c.frequency, c.average_intensity
            ),
            actions: vec![format!(
                "When one of {} is unavoidable, take extra care to avoid the others",
                c.factors.join(", ")
            )],
            related_factors: c.factors.clone(),
        })
        .collect()
}

fn medication_overuse_insight(inputs: &InsightInputs<'_>) -> Option<Insight> {
    let window_start = inputs
        .reference_date
        .checked_sub_days(Days::new(MEDICATION_WINDOW_DAYS))?;
    let medication_days: BTreeSet<NaiveDate> = inputs
        .events
        .iter()
        .flat_map(HeadacheEvent::medications)
        .chain(&inputs.personal.medication_history)
        .map(|m| m.taken_at.date_naive())
        .filter(|d| *d > window_start && *d <= inputs.reference_date)
        .collect();

    (medication_days.len() >= MEDICATION_OVERUSE_DAYS).then(|| Insight {
        category: InsightCategory::Lifestyle,
        priority: InsightPriority::High,
        title: "Frequent medication use".to_owned(),
        message: format!(
            "You took headache medication on {} of the last {MEDICATION_WINDOW_DAYS} days. Frequent use can itself cause rebound headaches",
            medication_days.len()
        ),
        actions: vec![
            "Talk to your doctor about medication-overuse headache and preventive options"
                .to_owned(),
        ],
        related_factors: vec!["Medication".to_owned()],
    })
}

fn frequent_trigger_insights(events: &[HeadacheEvent]) -> Vec<Insight> {
    if events.len() < MIN_EVENTS_FOR_TRIGGER_SHARE {
        return Vec::new();
    }

    let mut counts: BTreeMap<Trigger, usize> = BTreeMap::new();
    for trigger in events.iter().flat_map(HeadacheEvent::triggers) {
        *counts.entry(*trigger).or_insert(0) += 1;
    }

    let total = events.len() as f64;
    let mut frequent: Vec<(Trigger, usize)> = counts
        .into_iter()
        .filter(|(_, count)| *count as f64 / total >= FREQUENT_TRIGGER_SHARE)
        .collect();
    frequent.sort_by(|a, b| b.1.cmp(&a.1));

    frequent
        .into_iter()
        .map(|(trigger, count)| Insight {
            category: InsightCategory::Lifestyle,
            priority: InsightPriority::Medium,
            title: format!("{} is a frequent trigger", trigger.display_name()),
            message: format!(
                "You tagged {} in {count} of {} headaches ({:.0}%)",
                trigger.display_name().to_lowercase(),
                events.len(),
                count as f64 / total * 100.0
            ),
            actions: vec![format!(
                "Plan ahead for {} and note what helps",
                trigger.display_name().to_lowercase()
            )],
            related_factors: vec![trigger.key().to_owned()],
        })
        .collect()
}
