// ABOUTME: Similarity-based statistical risk model over historical days
// ABOUTME: Headache rate among days whose weighted feature similarity to the target exceeds 0.8
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: match counts are far below 2^52

use headway_core::constants::ensemble::{
    STATISTICAL_CONFIDENCE_CAP, STATISTICAL_MIN_MATCHES, STATISTICAL_SIMILARITY,
};

use super::{
    ContributingFactor, FeatureVector, ModelPrediction, PredictionContext, PredictionModel,
    RiskModel, RiskTier, RATE_TIER_BREAKPOINTS,
};

/// Deviation (in feature scale units) at which a factor's contribution saturates
const DEVIATION_SATURATION: f64 = 2.0;

/// Similar-day lookup
pub struct StatisticalModel;

impl RiskModel for StatisticalModel {
    fn model(&self) -> PredictionModel {
        PredictionModel::Statistical
    }

    fn predict(&self, context: &PredictionContext<'_>) -> ModelPrediction {
        let current = FeatureVector::from_snapshot(context.current);
        if !current.has_any() {
            return ModelPrediction::unknown(self.model());
        }

        let historical: Vec<(FeatureVector, bool)> = context
            .history
            .days()
            .iter()
            .filter(|day| day.date != context.target_date)
            .filter_map(|day| {
                day.signals
                    .as_ref()
                    .map(|s| (FeatureVector::from_snapshot(s), day.had_event()))
            })
            .filter(|(features, _)| features.has_any())
            .collect();

        let matches: Vec<bool> = historical
            .iter()
            .filter(|(features, _)| {
                current
                    .similarity(features)
                    .is_some_and(|s| s > STATISTICAL_SIMILARITY)
            })
            .map(|(_, had_event)| *had_event)
            .collect();

        if matches.len() < STATISTICAL_MIN_MATCHES {
            return ModelPrediction::unknown(self.model());
        }

        let headache_rate =
            matches.iter().filter(|hit| **hit).count() as f64 / matches.len() as f64;
        let confidence =
            matches.len().min(STATISTICAL_CONFIDENCE_CAP) as f64 / STATISTICAL_CONFIDENCE_CAP as f64;

        let baseline = FeatureVector::mean(historical.iter().map(|(features, _)| features));
        let mut factors: Vec<ContributingFactor> = current
            .deviations(&baseline)
            .into_iter()
            .filter(|(_, deviation)| *deviation > 0.0)
            .map(|(factor, deviation)| {
                ContributingFactor::new(
                    factor.display_name(),
                    headache_rate * (deviation / DEVIATION_SATURATION).min(1.0),
                )
            })
            .filter(|f| f.contribution > 0.0)
            .collect();
        factors.sort_by(|a, b| b.contribution.total_cmp(&a.contribution));

        ModelPrediction {
            model: self.model(),
            risk_tier: RiskTier::from_score(headache_rate, RATE_TIER_BREAKPOINTS),
            risk_score: headache_rate,
            confidence,
            factors,
        }
    }
}
