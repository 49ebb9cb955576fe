// ABOUTME: Tests for loading analysis input documents from disk
// ABOUTME: Covers valid files, malformed JSON, invalid episodes and missing paths
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::fs;

use headway::input::{load_input, parse_input};
use headway::ErrorCode;
use tempfile::TempDir;

const VALID_INPUT: &str = r#"{
    "events": [
        {"id": "6f1c1c52-7a7e-4a57-9d1e-0b7d1f6b8a11", "start": "2025-01-01T09:00:00Z", "intensity": 6},
        {"id": "0b52c0d3-1f0e-4d7c-9a5c-55e1c7d0f2a4", "start": "2025-01-03T18:30:00Z", "intensity": 4}
    ],
    "snapshots": [
        {"date": "2025-01-01", "weather": {"pressure_hpa": 1001.0, "humidity_percent": 88.0}}
    ],
    "check_in_days": ["2025-01-02"]
}"#;

#[test]
fn test_load_valid_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("diary.json");
    fs::write(&path, VALID_INPUT).unwrap();

    let input = load_input(&path).unwrap();

    assert_eq!(input.events.len(), 2);
    assert_eq!(input.snapshots.len(), 1);
    assert_eq!(input.check_in_days.len(), 1);
    assert!(input.reference_date.is_none());
}

#[test]
fn test_missing_file_is_invalid_input() {
    let dir = TempDir::new().unwrap();
    let error = load_input(&dir.path().join("absent.json")).unwrap_err();

    assert_eq!(error.code, ErrorCode::InvalidInput);
    assert!(error.message.contains("absent.json"));
}

#[test]
fn test_malformed_json_is_serialization_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{\"events\": [").unwrap();

    let error = load_input(&path).unwrap_err();
    assert_eq!(error.code, ErrorCode::SerializationError);
}

#[test]
fn test_out_of_range_intensity_is_rejected() {
    let raw = r#"{"events": [{"id": "6f1c1c52-7a7e-4a57-9d1e-0b7d1f6b8a11", "start": "2025-01-01T09:00:00Z", "intensity": 0}]}"#;

    let error = parse_input(raw).unwrap_err();
    assert_eq!(error.code, ErrorCode::ValueOutOfRange);
}

#[test]
fn test_empty_document_parses_to_empty_input() {
    let input = parse_input("{}").unwrap();

    assert!(input.events.is_empty());
    assert!(input.snapshots.is_empty());
    assert!(input.forecast_snapshots.is_empty());
}
