// ABOUTME: Re-exports command modules for fitanalysis-cli
// ABOUTME: Provides the analyze, activities and config commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod activities;
pub mod analyze;
pub mod config;
