// ABOUTME: Loads a FIT file from disk and exposes its series and power metrics
// ABOUTME: Validates the path up front and wraps decoded records in an ActivityFrame
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::decoder::decode_fit_bytes;
use crate::constants::defaults::FIT_EXTENSION;
use crate::errors::{AppError, AppResult};
use fitanalysis_core::models::{Record, RecordField};
use fitanalysis_intelligence::{
    normalized_power, ActivityFrame, ActivitySummary, MetricsEngine, PowerMetrics, TimeSeries,
};
use chrono::NaiveTime;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Loader for a single FIT file
#[derive(Debug, Clone)]
pub struct FitDataLoader {
    file_path: PathBuf,
}

impl FitDataLoader {
    /// Create a loader for `file_path`
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the file does not exist
    pub fn new(file_path: impl Into<PathBuf>) -> AppResult<Self> {
        let file_path = file_path.into();
        if !file_path.is_file() {
            return Err(AppError::not_found(format!(
                "FIT file {}",
                file_path.display()
            ))
            .with_resource_id(file_path.display().to_string()));
        }

        let has_fit_extension = file_path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                ext.eq_ignore_ascii_case(FIT_EXTENSION.trim_start_matches('.'))
            });
        if !has_fit_extension {
            warn!(
                "File {} does not have a {FIT_EXTENSION} extension",
                file_path.display()
            );
        }

        Ok(Self { file_path })
    }

    /// Path this loader reads
    #[must_use]
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Read and decode the file
    ///
    /// # Errors
    ///
    /// Returns a storage error if the file cannot be read, or `InvalidFormat`
    /// if it is not a readable FIT file
    pub fn load(&self) -> AppResult<ActivityData> {
        let bytes = std::fs::read(&self.file_path)?;
        let records = decode_fit_bytes(&bytes)
            .map_err(|e| e.with_resource_id(self.file_path.display().to_string()))?;

        info!(
            records = records.len(),
            "Loaded FIT file {}",
            self.file_path.display()
        );
        Ok(ActivityData::from_records(&records))
    }
}

/// Decoded activity ready for analysis
#[derive(Debug, Clone)]
pub struct ActivityData {
    frame: ActivityFrame,
    engine: MetricsEngine,
}

impl ActivityData {
    /// Wrap already-decoded records
    #[must_use]
    pub fn from_records(records: &[Record]) -> Self {
        Self {
            frame: ActivityFrame::from_records(records),
            engine: MetricsEngine::default(),
        }
    }

    /// Replace the metrics engine, e.g. for a non-default sample interval
    #[must_use]
    pub fn with_engine(mut self, engine: MetricsEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Aligned record columns
    #[must_use]
    pub const fn frame(&self) -> &ActivityFrame {
        &self.frame
    }

    /// Heart-rate samples
    #[must_use]
    pub fn heart_rate(&self) -> TimeSeries {
        self.frame.series(RecordField::HeartRate)
    }

    /// Power samples
    #[must_use]
    pub fn power(&self) -> TimeSeries {
        self.frame.series(RecordField::Power)
    }

    /// Highest power recorded at each time of day
    #[must_use]
    pub fn max_power_by_time(&self) -> BTreeMap<NaiveTime, f64> {
        self.power().max_by_time_of_day()
    }

    /// Normalized Power, or `None` without power samples
    #[must_use]
    pub fn normalized_power(&self) -> Option<f64> {
        normalized_power(&self.power().values()).ok()
    }

    /// Intensity Factor against `threshold_power`
    #[must_use]
    pub fn intensity_factor(&self, threshold_power: f64) -> Option<f64> {
        self.metrics(threshold_power).intensity_factor
    }

    /// Training Stress Score against `threshold_power`
    #[must_use]
    pub fn training_stress_score(&self, threshold_power: f64) -> Option<f64> {
        self.metrics(threshold_power).tss
    }

    /// All power metrics with their status
    #[must_use]
    pub fn metrics(&self, threshold_power: f64) -> PowerMetrics {
        self.engine.compute(&self.power().values(), threshold_power)
    }

    /// Summary statistics, with metrics when a threshold is given
    #[must_use]
    pub fn summary(&self, threshold_power: Option<f64>) -> ActivitySummary {
        ActivitySummary::from_frame(&self.frame, &self.engine, threshold_power)
    }
}
