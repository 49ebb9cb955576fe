// ABOUTME: Re-exports command modules for headway-cli
// ABOUTME: Provides access to analysis and inspection commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod analyze;
pub mod inspect;
