// ABOUTME: Analysis constants for the Headway engine organized by component
// ABOUTME: Statistical breakpoints, quality gates, ensemble weights and threshold defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Analysis constants.
//!
//! Breakpoints in this module are part of the engine's observable contract:
//! changing one changes which tier or insight a given history produces.

/// Statistical primitive constants
pub mod statistics {
    /// |t| strictly above which the approximate p-value is 0.01
    pub const T_BREAKPOINT_STRONG: f64 = 2.6;
    /// |t| strictly above which the approximate p-value is 0.05
    pub const T_BREAKPOINT_MODERATE: f64 = 2.0;
    /// |t| strictly above which the approximate p-value is 0.1
    pub const T_BREAKPOINT_WEAK: f64 = 1.7;

    /// p-value reported above the strong breakpoint
    pub const P_VALUE_STRONG: f64 = 0.01;
    /// p-value reported above the moderate breakpoint
    pub const P_VALUE_MODERATE: f64 = 0.05;
    /// p-value reported above the weak breakpoint
    pub const P_VALUE_WEAK: f64 = 0.1;
    /// p-value reported below every breakpoint
    pub const P_VALUE_NONE: f64 = 0.2;

    /// Significance level used by the correlation analyzer
    pub const SIGNIFICANCE_ALPHA: f64 = 0.05;
    /// Minimum paired samples before a correlation may be called significant
    pub const MIN_SAMPLES_FOR_SIGNIFICANCE: usize = 20;
}

/// Input validation constants
pub mod input {
    /// Widest span of calendar days one analysis input may cover
    pub const MAX_SPAN_DAYS: u64 = 3660;
}

/// Data-quality gate constants
pub mod data_quality {
    /// Overlapping days below which data is insufficient
    pub const MINIMAL_DAYS: usize = 14;
    /// Overlapping days below which data is minimal
    pub const ACCEPTABLE_DAYS: usize = 30;
    /// Overlapping days below which data is acceptable
    pub const GOOD_DAYS: usize = 60;
    /// Overlapping days below which data is good
    pub const EXCELLENT_DAYS: usize = 90;

    /// Overlapping days required by the prediction gate
    pub const GATE_MIN_OVERLAPPING_DAYS: usize = 30;
    /// Coverage ratio required by the prediction gate
    pub const GATE_MIN_COVERAGE: f64 = 0.7;
}

/// Correlation analyzer constants
pub mod correlation {
    /// Events required before correlations are computed
    pub const MIN_EVENTS: usize = 3;

    /// |r| below which a factor is a low-risk factor
    pub const TIER_MODERATE: f64 = 0.3;
    /// |r| below which a factor is a moderate-risk factor
    pub const TIER_HIGH: f64 = 0.5;
    /// |r| below which a factor is a high-risk factor
    pub const TIER_VERY_HIGH: f64 = 0.7;
}

/// Trigger combination miner constants
pub mod combinations {
    /// Delimiter joining factor keys inside a combination key
    pub const KEY_DELIMITER: &str = " + ";
    /// Correlation magnitude above which a health metric counts as active
    pub const ACTIVE_HEALTH_CORRELATION: f64 = 0.5;
    /// Historical headache rate above which a weather condition counts as active
    pub const ACTIVE_WEATHER_HEADACHE_RATE: f64 = 0.5;
    /// Days a weather condition must have held before its headache rate is trusted
    pub const MIN_CONDITION_DAYS: usize = 3;
    /// Occurrences at which the frequency score saturates
    pub const FREQUENCY_SATURATION: f64 = 10.0;
    /// Intensity scale used to normalise average intensity
    pub const INTENSITY_SCALE: f64 = 10.0;

    /// Wind speed (km/h) above which the `HighWind` condition holds
    pub const HIGH_WIND_KMH: f64 = 30.0;
    /// UV index above which the `HighUv` condition holds
    pub const HIGH_UV_INDEX: f64 = 7.0;
    /// Precipitation chance (%) above which the `Precipitation` condition holds
    pub const PRECIPITATION_CHANCE_PERCENT: f64 = 60.0;
}

/// Personal threshold learner constants
pub mod thresholds {
    /// History points required before thresholds are learned
    pub const MIN_HISTORY_POINTS: usize = 30;
    /// Headache days with signal data required before thresholds are learned
    pub const MIN_HEADACHE_POINTS: usize = 10;

    /// Default 24h pressure change sensitivity (hPa)
    pub const DEFAULT_PRESSURE_CHANGE: f64 = 3.0;
    /// Default 24h temperature change sensitivity (°C)
    pub const DEFAULT_TEMPERATURE_CHANGE: f64 = 8.0;
    /// Default relative humidity sensitivity (%)
    pub const DEFAULT_HUMIDITY: f64 = 80.0;
    /// Default low barometric pressure sensitivity (hPa)
    pub const DEFAULT_LOW_PRESSURE: f64 = 1005.0;

    /// Upper percentile used for change and humidity thresholds
    pub const UPPER_PERCENTILE: f64 = 0.75;

    /// Learned pressure change threshold never goes below this (hPa)
    pub const PRESSURE_CHANGE_FLOOR: f64 = 2.0;
    /// Learned temperature change threshold never goes below this (°C)
    pub const TEMPERATURE_CHANGE_FLOOR: f64 = 3.0;
    /// Learned humidity threshold never goes below this (%)
    pub const HUMIDITY_FLOOR: f64 = 60.0;
    /// Learned low pressure threshold never goes below this (hPa)
    pub const LOW_PRESSURE_FLOOR: f64 = 980.0;
    /// Learned low pressure threshold never exceeds standard sea-level pressure (hPa)
    pub const LOW_PRESSURE_CEILING: f64 = 1013.25;
}

/// Ensemble predictor constants
pub mod ensemble {
    /// Similarity above which a historical day matches the current day
    pub const STATISTICAL_SIMILARITY: f64 = 0.8;
    /// Matches required by the statistical model
    pub const STATISTICAL_MIN_MATCHES: usize = 5;
    /// Match count at which statistical confidence saturates
    pub const STATISTICAL_CONFIDENCE_CAP: usize = 20;

    /// Days in a pattern window
    pub const PATTERN_WINDOW_DAYS: usize = 7;
    /// Similarity above which a historical window matches
    pub const PATTERN_SIMILARITY: f64 = 0.7;
    /// Matches required by the pattern model
    pub const PATTERN_MIN_MATCHES: usize = 3;
    /// Confidence penalty applied to the pattern model
    pub const PATTERN_CONFIDENCE_PENALTY: f64 = 0.9;

    /// Risk weight contributed by an exceeded pressure change rule
    pub const RULE_WEIGHT_PRESSURE_CHANGE: f64 = 0.30;
    /// Risk weight contributed by an exceeded temperature change rule
    pub const RULE_WEIGHT_TEMPERATURE_CHANGE: f64 = 0.25;
    /// Risk weight contributed by an exceeded humidity rule
    pub const RULE_WEIGHT_HUMIDITY: f64 = 0.20;
    /// Risk weight contributed by an exceeded low pressure rule
    pub const RULE_WEIGHT_LOW_PRESSURE: f64 = 0.25;
    /// Threshold model confidence when thresholds were learned
    pub const RULE_CONFIDENCE_LEARNED: f64 = 0.8;
    /// Threshold model confidence when thresholds are defaults
    pub const RULE_CONFIDENCE_DEFAULT: f64 = 0.6;

    /// History points required by the time-series model
    pub const TIME_SERIES_MIN_POINTS: usize = 30;
    /// Moving-average window of the time-series model
    pub const TIME_SERIES_WINDOW: usize = 7;
    /// Weight of the trend slope in the time-series score
    pub const TIME_SERIES_TREND_WEIGHT: f64 = 0.1;
    /// Weight of the seasonal factor in the time-series score
    pub const TIME_SERIES_SEASONAL_WEIGHT: f64 = 0.2;
    /// History length at which time-series confidence reaches its cap
    pub const TIME_SERIES_CONFIDENCE_DAYS: f64 = 100.0;
    /// Maximum time-series confidence
    pub const TIME_SERIES_CONFIDENCE_CAP: f64 = 0.9;

    /// Weight of the statistical model
    pub const WEIGHT_STATISTICAL: f64 = 0.3;
    /// Weight of the pattern model
    pub const WEIGHT_PATTERN: f64 = 0.25;
    /// Weight of the threshold model
    pub const WEIGHT_THRESHOLD: f64 = 0.25;
    /// Weight of the time-series model
    pub const WEIGHT_TIME_SERIES: f64 = 0.2;

    /// Contributing factors kept after aggregation
    pub const MAX_CONTRIBUTING_FACTORS: usize = 5;
    /// Confidence below which recommendations state low confidence
    pub const CONFIDENCE_THRESHOLD: f64 = 0.7;

    /// Month-indexed (January first) seasonal headache factor
    pub const SEASONAL_FACTORS: [f64; 12] = [
        0.10, 0.10, 0.15, 0.15, 0.10, 0.05, 0.05, 0.05, 0.10, 0.15, 0.15, 0.10,
    ];
}

/// Forecast and alert constants
pub mod forecast {
    /// Default forecast horizon in days
    pub const DEFAULT_HORIZON_DAYS: u32 = 7;
    /// Maximum configurable horizon in days
    pub const MAX_HORIZON_DAYS: u32 = 30;
    /// Confidence lost per forecast day beyond the first
    pub const CONFIDENCE_DECAY_PER_DAY: f64 = 0.05;
}

/// Insight composer constants
pub mod insights {
    /// Cycle-day correlation above which a cyclic insight is raised
    pub const CYCLIC_CORRELATION: f64 = 0.6;
    /// Correlation above which environmental and lifestyle insights are raised
    pub const FACTOR_CORRELATION: f64 = 0.5;
    /// Combination risk above which an avoid-co-occurrence insight is raised
    pub const COMBINATION_RISK: f64 = 0.7;
    /// Default cycle length in days
    pub const DEFAULT_CYCLE_LENGTH_DAYS: u32 = 28;
    /// Distinct medication days in the trailing window that signal overuse
    pub const MEDICATION_OVERUSE_DAYS: usize = 10;
    /// Trailing window for medication overuse, in days
    pub const MEDICATION_WINDOW_DAYS: u64 = 30;
    /// Share of events carrying a declared trigger that makes it frequent
    pub const FREQUENT_TRIGGER_SHARE: f64 = 0.3;
    /// Default maximum number of insights returned
    pub const DEFAULT_MAX_INSIGHTS: usize = 10;
}
