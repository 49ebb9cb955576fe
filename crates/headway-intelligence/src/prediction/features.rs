// ABOUTME: Feature vectors used by the similarity-based statistical model
// ABOUTME: Weighted, scaled Euclidean distance between daily signal snapshots
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use headway_core::models::{Factor, HealthMetric, SignalSnapshot, WeatherVariable};
use serde::{Deserialize, Serialize};

/// (factor, weight, scale) of every feature
///
/// A difference of one `scale` unit contributes `weight` to the distance.
const FEATURES: [(Factor, f64, f64); 8] = [
    (Factor::Weather(WeatherVariable::Pressure), 1.0, 10.0),
    (Factor::Weather(WeatherVariable::PressureChange), 1.5, 3.0),
    (Factor::Weather(WeatherVariable::Temperature), 0.5, 10.0),
    (Factor::Weather(WeatherVariable::TemperatureChange), 1.0, 5.0),
    (Factor::Weather(WeatherVariable::Humidity), 0.75, 20.0),
    (Factor::Health(HealthMetric::SleepDuration), 1.0, 2.0),
    (Factor::Health(HealthMetric::HeartRateVariability), 0.75, 20.0),
    (Factor::Health(HealthMetric::RestingHeartRate), 0.5, 10.0),
];

/// Feature values of one day; absent features are `None`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    values: Vec<Option<f64>>,
}

impl FeatureVector {
    /// Extract features from a snapshot
    #[must_use]
    pub fn from_snapshot(snapshot: &SignalSnapshot) -> Self {
        Self {
            values: FEATURES
                .iter()
                .map(|(factor, _, _)| snapshot.value(*factor))
                .collect(),
        }
    }

    /// Whether any feature is present
    #[must_use]
    pub fn has_any(&self) -> bool {
        self.values.iter().any(Option::is_some)
    }

    /// Weighted squared distance over the features both vectors carry,
    /// normalised by the weight of those features
    ///
    /// Returns `None` when the vectors share no feature.
    #[must_use]
    pub fn weighted_distance(&self, other: &Self) -> Option<f64> {
        let (distance, weight) = self
            .values
            .iter()
            .zip(&other.values)
            .zip(FEATURES.iter())
            .filter_map(|((a, b), (_, weight, scale))| {
                let delta = (a.as_ref()? - b.as_ref()?) / scale;
                Some((weight * delta * delta, *weight))
            })
            .fold((0.0, 0.0), |(d, w), (dd, dw)| (d + dd, w + dw));

        (weight > 0.0).then_some(distance / weight)
    }

    /// Similarity in (0, 1]: `exp(-sqrt(weighted_distance))`
    #[must_use]
    pub fn similarity(&self, other: &Self) -> Option<f64> {
        self.weighted_distance(other).map(|d| (-d.sqrt()).exp())
    }

    /// Scaled deviation from `baseline` per feature, as (factor, |z|) pairs
    #[must_use]
    pub fn deviations(&self, baseline: &Self) -> Vec<(Factor, f64)> {
        self.values
            .iter()
            .zip(&baseline.values)
            .zip(FEATURES.iter())
            .filter_map(|((value, base), (factor, _, scale))| {
                Some((*factor, ((value.as_ref()? - base.as_ref()?) / scale).abs()))
            })
            .collect()
    }

    /// Per-feature mean of `vectors`
    #[must_use]
    pub fn mean<'a, I>(vectors: I) -> Self
    where
        I: IntoIterator<Item = &'a Self>,
    {
        let mut sums = [0.0_f64; FEATURES.len()];
        let mut counts = [0_u32; FEATURES.len()];
        for vector in vectors {
            for (i, value) in vector.values.iter().enumerate() {
                if let (Some(v), Some(sum), Some(count)) = (value, sums.get_mut(i), counts.get_mut(i))
                {
                    *sum += v;
                    *count += 1;
                }
            }
        }
        Self {
            values: sums
                .iter()
                .zip(counts)
                .map(|(sum, count)| (count > 0).then_some(sum / f64::from(count)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use headway_core::models::WeatherSnapshot;

    fn snapshot(pressure: f64, humidity: f64) -> SignalSnapshot {
        SignalSnapshot::new(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()).with_weather(
            WeatherSnapshot {
                pressure_hpa: Some(pressure),
                humidity_percent: Some(humidity),
                ..WeatherSnapshot::default()
            },
        )
    }

    #[test]
    fn test_identical_days_are_fully_similar() {
        let a = FeatureVector::from_snapshot(&snapshot(1012.0, 55.0));
        assert!((a.similarity(&a).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_similarity_decreases_with_distance() {
        let base = FeatureVector::from_snapshot(&snapshot(1012.0, 55.0));
        let near = FeatureVector::from_snapshot(&snapshot(1011.0, 56.0));
        let far = FeatureVector::from_snapshot(&snapshot(990.0, 95.0));

        assert!(base.similarity(&near).unwrap() > base.similarity(&far).unwrap());
    }

    #[test]
    fn test_disjoint_vectors_have_no_similarity() {
        let empty = FeatureVector::from_snapshot(&SignalSnapshot::new(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        ));
        let full = FeatureVector::from_snapshot(&snapshot(1012.0, 55.0));
        assert!(empty.similarity(&full).is_none());
    }
}
