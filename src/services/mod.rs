// ABOUTME: Domain service layer for analysis logic shared by the upload route and the CLI
// ABOUTME: Keeps decoding, metrics and recording out of the HTTP handlers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Protocol-agnostic analysis logic. The HTTP handlers and the CLI call the
//! same functions so both produce identical reports for the same file.

/// FIT analysis: decode, build series, compute metrics, optionally record
pub mod analysis;

pub use analysis::{analyze_fit_bytes, record_analysis, AnalysisReport, RecordRequest};
