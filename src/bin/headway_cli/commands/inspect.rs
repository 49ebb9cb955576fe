// ABOUTME: Inspection commands for headway-cli
// ABOUTME: Prints personal thresholds or the data-quality assessment for an input file
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::Path;

use headway::input::load_input;
use headway::intelligence::HeadacheAnalysisEngine;
use headway::AppResult;

use crate::helpers::io::print_json;

/// Print the thresholds the engine would use
pub fn thresholds(input_path: &Path, compact: bool) -> AppResult<()> {
    let input = load_input(input_path)?;
    print_json(&HeadacheAnalysisEngine::thresholds(&input)?, compact)
}

/// Print the data-quality assessment
pub fn quality(input_path: &Path, compact: bool) -> AppResult<()> {
    let input = load_input(input_path)?;
    print_json(&HeadacheAnalysisEngine::assess_quality(&input)?, compact)
}
