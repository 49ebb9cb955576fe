// ABOUTME: Helper modules for headway-cli
// ABOUTME: Input loading and JSON output formatting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod io;
