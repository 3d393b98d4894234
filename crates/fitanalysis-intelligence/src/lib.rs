// ABOUTME: Power metrics engine and record extraction for FIT activity analysis
// ABOUTME: Pure computation over decoded records - shared by the server and the CLI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # fitanalysis intelligence
//!
//! - **extractor**: per-field time series and the aligned [`ActivityFrame`]
//! - **metrics**: Normalized Power, Intensity Factor, Training Stress Score
//! - **summary**: flattened per-activity statistics for the metadata store
//!
//! ```rust
//! use fitanalysis_intelligence::{MetricsStatus, PowerMetrics};
//!
//! let metrics = PowerMetrics::compute(&[100.0; 3600], 200.0);
//! assert_eq!(metrics.status, MetricsStatus::Ok);
//! assert_eq!(metrics.tss.map(f64::round), Some(25.0));
//! ```

/// Metrics engine error conditions
pub mod error;
/// Record extraction and the named-series container
pub mod extractor;
/// Normalized Power, Intensity Factor and TSS
pub mod metrics;
/// Per-activity summary statistics
pub mod summary;

pub use error::MetricsError;
pub use extractor::{extract_series, ActivityFrame, TimeSeries};
pub use metrics::{
    intensity_factor, normalized_power, training_stress_score, MetricsEngine, MetricsStatus,
    PowerMetrics, NOMINAL_SAMPLE_INTERVAL_SECS, NP_WINDOW_SAMPLES,
};
pub use summary::ActivitySummary;
