// ABOUTME: Ensemble risk predictor combining four independent sub-models
// ABOUTME: Data-quality gate, parallel sub-model evaluation and confidence-weighted combination
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    ContributingFactor, ModelPrediction, PatternMatchingModel, PredictionContext, PredictionModel,
    RiskModel, RiskTier, StatisticalModel, ThresholdRuleModel, TimeSeriesModel,
};
use crate::config::{EnsembleConfig, EnsembleNormalization};
use crate::data_quality::DataQualityReport;

/// Combined prediction for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskPrediction {
    /// Day predicted
    pub date: NaiveDate,
    /// Combined tier
    pub risk_tier: RiskTier,
    /// Confidence-weighted mean of sub-model scores, in [0, 1]
    pub risk_score: f64,
    /// Overall confidence in [0, 1]
    pub confidence: f64,
    /// Strongest contributing factors, descending
    pub contributing_factors: Vec<ContributingFactor>,
    /// Sub-model outputs in fixed model order
    pub model_predictions: Vec<ModelPrediction>,
    /// User-facing recommendation
    pub recommendation: String,
    /// Whether confidence fell below the configured threshold
    pub is_low_confidence: bool,
}

impl RiskPrediction {
    /// Zero-confidence prediction returned when the data-quality gate fails
    #[must_use]
    pub fn gated(date: NaiveDate, quality: &DataQualityReport) -> Self {
        Self {
            date,
            risk_tier: RiskTier::Unknown,
            risk_score: 0.0,
            confidence: 0.0,
            contributing_factors: Vec::new(),
            model_predictions: Vec::new(),
            recommendation: quality.message.clone(),
            is_low_confidence: true,
        }
    }
}

/// Ensemble of the statistical, pattern, threshold-rule and time-series models
pub struct EnsembleRiskPredictor {
    config: EnsembleConfig,
}

impl EnsembleRiskPredictor {
    /// Create a predictor
    #[must_use]
    pub const fn new(config: EnsembleConfig) -> Self {
        Self { config }
    }

    /// Predict the context's target day
    ///
    /// Returns a zero-confidence "more data needed" prediction without
    /// running any model when the data-quality gate fails.
    #[must_use]
    pub fn predict(
        &self,
        quality: &DataQualityReport,
        context: &PredictionContext<'_>,
    ) -> RiskPrediction {
        if !quality.is_acceptable {
            debug!(
                date = %context.target_date,
                days_needed = quality.days_needed,
                "Data-quality gate failed, skipping ensemble"
            );
            return RiskPrediction::gated(context.target_date, quality);
        }

        let predictions = Self::run_models(context);
        self.combine(context.target_date, predictions)
    }

    /// Run all four sub-models concurrently, returned in fixed model order
    #[must_use]
    pub fn run_models(context: &PredictionContext<'_>) -> Vec<ModelPrediction> {
        let ((statistical, pattern), (threshold, time_series)) = rayon::join(
            || {
                rayon::join(
                    || StatisticalModel.predict(context),
                    || PatternMatchingModel.predict(context),
                )
            },
            || {
                rayon::join(
                    || ThresholdRuleModel.predict(context),
                    || TimeSeriesModel.predict(context),
                )
            },
        );
        vec![statistical, pattern, threshold, time_series]
    }

    /// Weight of a sub-model
    #[must_use]
    pub fn weight(&self, model: PredictionModel) -> f64 {
        let weights = &self.config.weights;
        match model {
            PredictionModel::Statistical => weights.statistical,
            PredictionModel::PatternMatching => weights.pattern,
            PredictionModel::ThresholdRule => weights.threshold,
            PredictionModel::TimeSeries => weights.time_series,
        }
    }

    /// Combine sub-model predictions into one
    ///
    /// Each model counts with `weight * confidence`. The tier is the rounded
    /// weighted mean of tier levels; overall confidence is
    /// `Σ(weight·confidence) / Σ(weight)`, which is 0 when every model
    /// reports zero confidence.
    #[must_use]
    pub fn combine(&self, date: NaiveDate, predictions: Vec<ModelPrediction>) -> RiskPrediction {
        let total_weight: f64 = predictions.iter().map(|p| self.weight(p.model)).sum();

        let mut confidence_weight = 0.0;
        let mut weighted_levels = 0.0;
        let mut weighted_scores = 0.0;
        for prediction in &predictions {
            let Some(level) = prediction.risk_tier.level() else {
                continue;
            };
            let effective = self.weight(prediction.model) * prediction.confidence.clamp(0.0, 1.0);
            confidence_weight += effective;
            weighted_levels += effective * f64::from(level);
            weighted_scores += effective * prediction.risk_score;
        }

        let confidence = if total_weight > 0.0 {
            (confidence_weight / total_weight).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let (risk_tier, risk_score) = if confidence_weight > 0.0 {
            let denominator = match self.config.normalization {
                EnsembleNormalization::ConfidenceWeighted => confidence_weight,
                EnsembleNormalization::ModelWeight => total_weight,
            };
            let level = (weighted_levels / denominator).round().clamp(1.0, 4.0) as u8;
            (
                RiskTier::from_level(level),
                (weighted_scores / confidence_weight).clamp(0.0, 1.0),
            )
        } else {
            (RiskTier::Unknown, 0.0)
        };

        let contributing_factors = self.top_factors(&predictions);
        let is_low_confidence = confidence < self.config.confidence_threshold;
        let recommendation = recommendation_for(risk_tier, is_low_confidence);

        debug!(
            %date,
            tier = risk_tier.label(),
            risk_score,
            confidence,
            "Ensemble prediction combined"
        );

        RiskPrediction {
            date,
            risk_tier,
            risk_score,
            confidence,
            contributing_factors,
            model_predictions: predictions,
            recommendation,
            is_low_confidence,
        }
    }

    fn top_factors(&self, predictions: &[ModelPrediction]) -> Vec<ContributingFactor> {
        let mut totals: HashMap<&str, f64> = HashMap::new();
        for factor in predictions.iter().flat_map(|p| &p.factors) {
            *totals.entry(factor.name.as_str()).or_insert(0.0) += factor.contribution;
        }

        let mut factors: Vec<ContributingFactor> = totals
            .into_iter()
            .map(|(name, contribution)| ContributingFactor::new(name, contribution))
            .collect();
        factors.sort_by(|a, b| {
            b.contribution
                .total_cmp(&a.contribution)
                .then_with(|| a.name.cmp(&b.name))
        });
        factors.truncate(self.config.max_contributing_factors);
        factors
    }
}

fn recommendation_for(tier: RiskTier, is_low_confidence: bool) -> String {
    if is_low_confidence {
        return "Low confidence prediction: keep logging headaches and headache-free days to improve accuracy".to_owned();
    }
    match tier {
        RiskTier::Unknown => "Not enough information to estimate today's risk".to_owned(),
        RiskTier::Low => "Low headache risk. Keep up your usual routine".to_owned(),
        RiskTier::Moderate => {
            "Moderate headache risk. Stay hydrated and keep regular meals and sleep".to_owned()
        }
        RiskTier::High => {
            "High headache risk. Limit known triggers and keep your medication at hand".to_owned()
        }
        RiskTier::VeryHigh => "Very high headache risk. Plan a lighter day, avoid known triggers and follow your treatment plan early".to_owned(),
    }
}
