// ABOUTME: Headache analysis engine running one full correlation and prediction pass
// ABOUTME: Validates input, gates on data availability and assembles the structured analysis result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! The analysis engine service object.
//!
//! The host application builds one engine from an [`AnalysisConfig`] and
//! calls [`HeadacheAnalysisEngine::analyze`] whenever new data warrants a
//! recompute. The engine holds no mutable state and performs no I/O.

use chrono::{DateTime, NaiveDate, Utc};
use headway_core::constants::input::MAX_SPAN_DAYS;
use headway_core::errors::{AppError, AppResult};
use headway_core::models::{HeadacheEvent, PersonalFactors, PersonalThresholds, SignalSnapshot};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::config::{AnalysisConfig, ConfigError};
use crate::correlation::{CorrelationResult, FactorCorrelationAnalyzer};
use crate::data_quality::{DataQualityAssessor, DataQualityReport};
use crate::forecast::{PredictiveAlert, RiskForecastDay, RiskForecaster};
use crate::history::DailyHistory;
use crate::insights::{Insight, InsightComposer, InsightInputs};
use crate::prediction::{EnsembleRiskPredictor, RiskPrediction};
use crate::threshold_learning::PersonalThresholdLearner;
use crate::trigger_combinations::{TriggerCombination, TriggerCombinationMiner};

/// Data handed to one analysis pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisInput {
    /// Logged episodes in any order
    pub events: Vec<HeadacheEvent>,
    /// Observed daily signal snapshots; entries after the reference date are treated as forecasts
    pub snapshots: Vec<SignalSnapshot>,
    /// Forecast snapshots for upcoming days
    pub forecast_snapshots: Vec<SignalSnapshot>,
    /// Days logged as headache-free
    pub check_in_days: Vec<NaiveDate>,
    /// Personal context
    pub personal_factors: PersonalFactors,
    /// Day the analysis runs for; defaults to the latest input date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_date: Option<NaiveDate>,
}

impl AnalysisInput {
    /// Validate every episode and the overall date span
    ///
    /// # Errors
    ///
    /// Returns an error if an episode has an out-of-range intensity or ends
    /// before it starts, or if the input dates span more than
    /// [`MAX_SPAN_DAYS`] days
    pub fn validate(&self) -> AppResult<()> {
        self.events.iter().try_for_each(HeadacheEvent::validate)?;

        let mut dates = self.dates().chain(self.reference_date);
        let Some(first) = dates.next() else {
            return Ok(());
        };
        let (earliest, latest) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
        let span = (latest - earliest).num_days().unsigned_abs();
        if span > MAX_SPAN_DAYS {
            return Err(AppError::value_out_of_range(format!(
                "input dates span {span} days from {earliest} to {latest}; at most {MAX_SPAN_DAYS} are supported"
            )));
        }
        Ok(())
    }

    /// Every calendar date the input mentions
    fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.events
            .iter()
            .map(HeadacheEvent::date)
            .chain(self.snapshots.iter().map(|s| s.date))
            .chain(self.forecast_snapshots.iter().map(|s| s.date))
            .chain(self.check_in_days.iter().copied())
            .chain(self.personal_factors.last_headache.as_ref().map(DateTime::date_naive))
    }

    /// Episodes that started on or before `reference`
    fn events_until(&self, reference: NaiveDate) -> Vec<HeadacheEvent> {
        self.events
            .iter()
            .filter(|e| e.date() <= reference)
            .cloned()
            .collect()
    }

    /// Reference date of the pass
    #[must_use]
    pub fn resolved_reference_date(&self) -> NaiveDate {
        self.reference_date.unwrap_or_else(|| {
            self.events
                .iter()
                .map(HeadacheEvent::date)
                .chain(self.snapshots.iter().map(|s| s.date))
                .chain(self.check_in_days.iter().copied())
                .max()
                .unwrap_or_else(|| Utc::now().date_naive())
        })
    }

    /// Split snapshots into observed (up to `reference`) and forecast ones
    fn partition_snapshots(&self, reference: NaiveDate) -> (Vec<SignalSnapshot>, Vec<SignalSnapshot>) {
        let (observed, mut future): (Vec<SignalSnapshot>, Vec<SignalSnapshot>) = self
            .snapshots
            .iter()
            .cloned()
            .partition(|s| s.date <= reference);
        future.extend(
            self.forecast_snapshots
                .iter()
                .filter(|s| s.date > reference)
                .cloned(),
        );
        (observed, future)
    }
}

/// Complete output of an analysis pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Day the pass ran for
    pub reference_date: NaiveDate,
    /// Data-quality assessment
    pub data_quality: DataQualityReport,
    /// Factor correlations, strongest first
    pub correlations: Vec<CorrelationResult>,
    /// Trigger combinations, riskiest first
    pub combinations: Vec<TriggerCombination>,
    /// Thresholds used for the pass
    pub thresholds: PersonalThresholds,
    /// Prediction for the first forecast day
    pub prediction: RiskPrediction,
    /// Forecast for the configured horizon
    pub forecast: Vec<RiskForecastDay>,
    /// Prioritized insights
    pub insights: Vec<Insight>,
    /// Alerts for elevated forecast days
    pub alerts: Vec<PredictiveAlert>,
}

/// Result of an analysis pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    /// Full analysis
    Complete(Box<AnalysisResult>),
    /// Too few episodes to analyse
    InsufficientData {
        /// Further episodes needed
        records_needed: usize,
        /// User-facing hint
        message: String,
    },
    /// No health or weather data was supplied at all
    NoDataSource {
        /// User-facing hint
        message: String,
    },
}

impl AnalysisOutcome {
    /// Full result, if the pass completed
    #[must_use]
    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            Self::Complete(result) => Some(result),
            _ => None,
        }
    }
}

/// Headache correlation and risk-prediction engine
pub struct HeadacheAnalysisEngine {
    config: AnalysisConfig,
    correlations: FactorCorrelationAnalyzer,
    combinations: TriggerCombinationMiner,
    predictor: EnsembleRiskPredictor,
    forecaster: RiskForecaster,
    composer: InsightComposer,
}

impl Default for HeadacheAnalysisEngine {
    fn default() -> Self {
        Self::build(AnalysisConfig::default())
    }
}

impl HeadacheAnalysisEngine {
    /// Create an engine with a validated configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid
    pub fn new(config: AnalysisConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: AnalysisConfig) -> Self {
        Self {
            correlations: FactorCorrelationAnalyzer::new(config.correlation.clone()),
            combinations: TriggerCombinationMiner::new(config.combinations.clone()),
            predictor: EnsembleRiskPredictor::new(config.ensemble.clone()),
            forecaster: RiskForecaster::new(config.forecast.clone()),
            composer: InsightComposer::new(config.insights.clone()),
            config,
        }
    }

    /// Configuration in use
    #[must_use]
    pub const fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Assess data quality of the input's observed history
    ///
    /// # Errors
    ///
    /// Returns an error if the input is invalid
    pub fn assess_quality(input: &AnalysisInput) -> AppResult<DataQualityReport> {
        input.validate()?;
        let reference_date = input.resolved_reference_date();
        let history = Self::history(input, &input.events_until(reference_date), reference_date);
        Ok(DataQualityAssessor::assess(&history.flags()))
    }

    /// Thresholds the engine would use for the input
    ///
    /// # Errors
    ///
    /// Returns an error if the input is invalid
    pub fn thresholds(input: &AnalysisInput) -> AppResult<PersonalThresholds> {
        input.validate()?;
        let reference_date = input.resolved_reference_date();
        let history = Self::history(input, &input.events_until(reference_date), reference_date);
        Ok(Self::resolve_thresholds(&history, &input.personal_factors))
    }

    /// Run a full analysis pass
    ///
    /// Missing or insufficient data yields an [`AnalysisOutcome`] variant
    /// rather than an error.
    ///
    /// # Errors
    ///
    /// Returns an error only if the input is invalid
    #[instrument(skip_all, fields(events = input.events.len(), snapshots = input.snapshots.len()))]
    pub fn analyze(&self, input: &AnalysisInput) -> AppResult<AnalysisOutcome> {
        input.validate()?;

        let reference_date = input.resolved_reference_date();
        let events = input.events_until(reference_date);

        let min_events = self.config.correlation.min_events;
        if events.len() < min_events {
            let records_needed = min_events - events.len();
            info!(records_needed, "Not enough headaches logged for analysis");
            return Ok(AnalysisOutcome::InsufficientData {
                records_needed,
                message: format!(
                    "Need at least {records_needed} more headache {} before patterns can be analysed ({min_events} required)",
                    if records_needed == 1 { "record" } else { "records" }
                ),
            });
        }

        let (_, forecast_snapshots) = input.partition_snapshots(reference_date);
        let history = Self::history(input, &events, reference_date);

        if !history.has_any_signal() && forecast_snapshots.is_empty() {
            warn!("No health or weather data supplied");
            return Ok(AnalysisOutcome::NoDataSource {
                message: "No health or weather data is available. Connect a health or weather source to discover your triggers".to_owned(),
            });
        }

        let data_quality = DataQualityAssessor::assess(&history.flags());
        info!(
            tier = data_quality.tier.label(),
            overlapping_days = data_quality.overlapping_days,
            coverage = data_quality.coverage,
            acceptable = data_quality.is_acceptable,
            "Data quality assessed"
        );

        let (correlations, thresholds) = rayon::join(
            || self.correlations.analyze(&history, events.len()),
            || Self::resolve_thresholds(&history, &input.personal_factors),
        );
        let combinations =
            self.combinations
                .mine(&events, &history, &correlations, &thresholds);

        let predictions = self.forecaster.predict_days(
            &self.predictor,
            &data_quality,
            &history,
            &thresholds,
            &forecast_snapshots,
            reference_date,
        );
        let forecast = self.forecaster.forecast_days(&predictions, &thresholds);
        let alerts =
            RiskForecaster::alerts(&forecast, self.config.ensemble.confidence_threshold);
        let prediction = predictions.into_iter().next().map_or_else(
            || RiskPrediction::gated(reference_date, &data_quality),
            |(prediction, _)| prediction,
        );

        let insights = self.composer.compose(&InsightInputs {
            correlations: &correlations,
            combinations: &combinations,
            events: &events,
            history: &history,
            personal: &input.personal_factors,
            reference_date,
        });

        info!(
            correlations = correlations.len(),
            combinations = combinations.len(),
            tier = prediction.risk_tier.label(),
            confidence = prediction.confidence,
            insights = insights.len(),
            alerts = alerts.len(),
            "Analysis pass complete"
        );

        Ok(AnalysisOutcome::Complete(Box::new(AnalysisResult {
            reference_date,
            data_quality,
            correlations,
            combinations,
            thresholds,
            prediction,
            forecast,
            insights,
            alerts,
        })))
    }

    fn history(
        input: &AnalysisInput,
        events: &[HeadacheEvent],
        reference_date: NaiveDate,
    ) -> DailyHistory {
        let (observed, _) = input.partition_snapshots(reference_date);
        let check_ins: Vec<NaiveDate> = input
            .check_in_days
            .iter()
            .copied()
            .filter(|d| *d <= reference_date)
            .collect();
        let history = DailyHistory::build(events, &observed, &check_ins);
        match input.personal_factors.last_headache.as_ref().map(DateTime::date_naive) {
            Some(date) if date <= reference_date => history.with_reported_headache(date),
            _ => history,
        }
    }

    /// Learned thresholds when history allows, else supplied ones, else defaults
    fn resolve_thresholds(history: &DailyHistory, personal: &PersonalFactors) -> PersonalThresholds {
        let learned = PersonalThresholdLearner::learn(history);
        if learned.is_learned() {
            learned
        } else {
            personal.thresholds.unwrap_or(learned)
        }
    }
}
