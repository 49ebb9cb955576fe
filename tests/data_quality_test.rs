// ABOUTME: Integration tests for data-quality assessment and the prediction gate
// ABOUTME: Validates overlap counting, coverage gate boundaries, tiers and days-needed estimates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use headway::intelligence::{DailyHistory, DataQualityAssessor, DayFlags, QualityTier};
use helpers::synthetic_data::{day, event_on, health_on};

const fn logged_day() -> DayFlags {
    DayFlags {
        has_signal_data: true,
        had_event: false,
        record_exists: true,
    }
}

const fn signal_only_day() -> DayFlags {
    DayFlags {
        has_signal_data: true,
        had_event: false,
        record_exists: false,
    }
}

#[test]
fn test_gate_boundaries() {
    assert!(DataQualityAssessor::is_quality_acceptable(30, 0.70));
    assert!(!DataQualityAssessor::is_quality_acceptable(29, 0.71));
    assert!(!DataQualityAssessor::is_quality_acceptable(30, 0.69));
    assert!(DataQualityAssessor::is_quality_acceptable(120, 1.0));
}

#[test]
fn test_days_needed() {
    // 0.7 * 50 - 30 = 5 missing, each added day closes 0.3 of it
    assert_eq!(DataQualityAssessor::days_needed(30, 50), 17);
    assert_eq!(DataQualityAssessor::days_needed(10, 10), 20);
    assert_eq!(DataQualityAssessor::days_needed(40, 40), 0);
}

#[test]
fn test_assess_fully_logged_history() {
    let flags = vec![logged_day(); 40];
    let report = DataQualityAssessor::assess(&flags);

    assert_eq!(report.total_days, 40);
    assert_eq!(report.overlapping_days, 40);
    assert!((report.coverage - 1.0).abs() < 1e-9);
    assert_eq!(report.tier, QualityTier::Acceptable);
    assert!(report.is_acceptable);
    assert_eq!(report.days_needed, 0);
}

#[test]
fn test_assess_sparse_history() {
    let mut flags = vec![logged_day(); 20];
    flags.extend(vec![signal_only_day(); 20]);
    let report = DataQualityAssessor::assess(&flags);

    assert_eq!(report.overlapping_days, 20);
    assert!((report.coverage - 0.5).abs() < 1e-9);
    assert!((report.consistency - 1.0).abs() < 1e-9);
    assert_eq!(report.tier, QualityTier::Minimal);
    assert!(!report.is_acceptable);
    assert_eq!(report.days_needed, 27);
    assert!(report.message.contains("27 more days"));
}

#[test]
fn test_assess_empty_history() {
    let report = DataQualityAssessor::assess(&[]);
    assert_eq!(report.total_days, 0);
    assert!(report.coverage.abs() < 1e-9);
    assert_eq!(report.tier, QualityTier::Insufficient);
    assert!(!report.is_acceptable);
}

#[test]
fn test_event_day_without_check_in_counts_as_overlapping() {
    let flags = DayFlags {
        has_signal_data: true,
        had_event: true,
        record_exists: false,
    };
    assert!(flags.is_overlapping());
    assert!(!signal_only_day().is_overlapping());
}

#[test]
fn test_days_until_next_tier() {
    assert_eq!(DataQualityAssessor::days_until_next_tier(40), Some(20));
    assert_eq!(DataQualityAssessor::days_until_next_tier(0), Some(14));
    assert_eq!(DataQualityAssessor::days_until_next_tier(95), None);
}

#[test]
fn test_history_gaps_lower_coverage() {
    // Logged on day 0 and day 9 only; the eight days between are empty
    let events = [event_on(day(0), 6), event_on(day(9), 6)];
    let snapshots = [health_on(day(0), 7.0, None), health_on(day(9), 6.0, None)];
    let history = DailyHistory::build(&events, &snapshots, &[]);

    let report = DataQualityAssessor::assess(&history.flags());
    assert_eq!(report.total_days, 10);
    assert_eq!(report.overlapping_days, 2);
    assert!((report.coverage - 0.2).abs() < 1e-9);
}
