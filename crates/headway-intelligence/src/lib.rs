// ABOUTME: Headache correlation, trigger mining, ensemble risk prediction and insight engine
// ABOUTME: Pure in-memory analysis over diary events and physiological and weather signals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Headway Intelligence
//!
//! The analysis engine behind Headway. A pass flows leaf-first:
//!
//! 1. [`history`] folds events and signal snapshots into calendar days
//! 2. [`data_quality`] gates whether predictions are trustworthy
//! 3. [`correlation`] and [`threshold_learning`] run side by side
//! 4. [`trigger_combinations`] mines co-occurring factor sets
//! 5. [`prediction`] combines four sub-models per forecast day
//! 6. [`insights`] and [`forecast`] turn everything into text and alerts
//!
//! [`engine::HeadacheAnalysisEngine`] runs the whole pass.

/// Analysis configuration and validation
pub mod config;
/// Factor correlation analysis
pub mod correlation;
/// Data-quality assessment and prediction gate
pub mod data_quality;
/// Engine service object and analysis input/output types
pub mod engine;
/// Horizon forecasts and predictive alerts
pub mod forecast;
/// Daily history builder
pub mod history;
/// Insight composition
pub mod insights;
/// Ensemble risk prediction and its sub-models
pub mod prediction;
/// Pure statistical primitives
pub mod statistical_analysis;
/// Personal threshold learning
pub mod threshold_learning;
/// Trigger combination mining
pub mod trigger_combinations;

pub use config::{AnalysisConfig, ConfigError, EnsembleNormalization};
pub use correlation::{CorrelationResult, CorrelationTier, FactorCorrelationAnalyzer};
pub use data_quality::{DataQualityAssessor, DataQualityReport, DayFlags, QualityTier};
pub use engine::{AnalysisInput, AnalysisOutcome, AnalysisResult, HeadacheAnalysisEngine};
pub use forecast::{PredictiveAlert, RiskForecastDay, RiskForecaster};
pub use history::{DailyHistory, DayRecord};
pub use insights::{Insight, InsightCategory, InsightComposer, InsightPriority};
pub use prediction::{EnsembleRiskPredictor, ModelPrediction, RiskPrediction, RiskTier};
pub use statistical_analysis::StatisticalAnalyzer;
pub use threshold_learning::PersonalThresholdLearner;
pub use trigger_combinations::{
    TriggerCombination, TriggerCombinationMiner, WeatherCondition,
};
