// ABOUTME: Personal threshold rule risk model
// ABOUTME: Sums fixed risk weights for every weather rule the target day exceeds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: at most four rules

use headway_core::constants::ensemble::{
    RULE_CONFIDENCE_DEFAULT, RULE_CONFIDENCE_LEARNED, RULE_WEIGHT_HUMIDITY,
    RULE_WEIGHT_LOW_PRESSURE, RULE_WEIGHT_PRESSURE_CHANGE, RULE_WEIGHT_TEMPERATURE_CHANGE,
};

use super::{
    ContributingFactor, ModelPrediction, PredictionContext, PredictionModel, RiskModel, RiskTier,
    RULE_TIER_BREAKPOINTS,
};
use crate::trigger_combinations::WeatherCondition;

/// Rules evaluated and the risk weight each contributes when exceeded
const RULES: [(WeatherCondition, f64); 4] = [
    (WeatherCondition::PressureChange, RULE_WEIGHT_PRESSURE_CHANGE),
    (WeatherCondition::TemperatureChange, RULE_WEIGHT_TEMPERATURE_CHANGE),
    (WeatherCondition::Humidity, RULE_WEIGHT_HUMIDITY),
    (WeatherCondition::LowPressure, RULE_WEIGHT_LOW_PRESSURE),
];

/// Personal threshold rules
pub struct ThresholdRuleModel;

impl RiskModel for ThresholdRuleModel {
    fn model(&self) -> PredictionModel {
        PredictionModel::ThresholdRule
    }

    fn predict(&self, context: &PredictionContext<'_>) -> ModelPrediction {
        let Some(weather) = context.current.weather.as_ref() else {
            return ModelPrediction::unknown(self.model());
        };

        let mut evaluated = 0_usize;
        let mut score = 0.0;
        let mut factors = Vec::new();
        for (condition, weight) in RULES {
            match condition.holds(weather, context.thresholds) {
                Some(true) => {
                    evaluated += 1;
                    score += weight;
                    factors.push(ContributingFactor::new(condition.display_name(), weight));
                }
                Some(false) => evaluated += 1,
                None => {}
            }
        }

        if evaluated == 0 {
            return ModelPrediction::unknown(self.model());
        }

        let base_confidence = if context.thresholds.is_learned() {
            RULE_CONFIDENCE_LEARNED
        } else {
            RULE_CONFIDENCE_DEFAULT
        };

        ModelPrediction {
            model: self.model(),
            risk_tier: RiskTier::from_score(score, RULE_TIER_BREAKPOINTS),
            risk_score: score,
            confidence: base_confidence * evaluated as f64 / RULES.len() as f64,
            factors,
        }
    }
}
