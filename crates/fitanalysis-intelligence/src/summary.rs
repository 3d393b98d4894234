// ABOUTME: Flattened per-activity summary statistics handed to the metadata recorder
// ABOUTME: Duration, average/max power and heart rate, plus the optional power metrics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::extractor::ActivityFrame;
use crate::metrics::{MetricsEngine, PowerMetrics};
use chrono::{DateTime, Utc};
use fitanalysis_core::models::RecordField;
use serde::{Deserialize, Serialize};

/// Summary statistics of one analyzed activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivitySummary {
    /// Number of decoded records
    pub record_count: usize,
    /// Timestamp of the first record
    pub start_time: Option<DateTime<Utc>>,
    /// Seconds between the first and last record
    pub duration_seconds: f64,
    /// Largest cumulative distance reading, in meters
    pub distance_meters: Option<f64>,
    /// Mean power over samples carrying power
    pub average_power: Option<f64>,
    /// Peak power
    pub max_power: Option<f64>,
    /// Mean heart rate over samples carrying heart rate
    pub average_heart_rate: Option<f64>,
    /// Peak heart rate
    pub max_heart_rate: Option<f64>,
    /// Power metrics, when a threshold power was supplied
    pub metrics: Option<PowerMetrics>,
}

impl ActivitySummary {
    /// Summarize `frame`, computing power metrics when `threshold_power` is given
    #[must_use]
    pub fn from_frame(
        frame: &ActivityFrame,
        engine: &MetricsEngine,
        threshold_power: Option<f64>,
    ) -> Self {
        let power = frame.series(RecordField::Power);
        let heart_rate = frame.series(RecordField::HeartRate);

        let metrics = threshold_power.map(|ftp| engine.compute(&power.values(), ftp));

        Self {
            record_count: frame.len(),
            start_time: frame.timestamps().first().copied(),
            duration_seconds: frame.elapsed_seconds(),
            distance_meters: frame.series(RecordField::Distance).max(),
            average_power: power.mean(),
            max_power: power.max(),
            average_heart_rate: heart_rate.mean(),
            max_heart_rate: heart_rate.max(),
            metrics,
        }
    }
}
