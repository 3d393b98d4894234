// ABOUTME: Record extraction into per-field time series and an aligned named-series container
// ABOUTME: Pure transformations over decoded records - no interpolation, no resampling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Record extraction
//!
//! Records are sparse: a heart-rate strap may drop out while the power meter
//! keeps reporting. [`extract_series`] keeps only the records that carry the
//! requested field. [`ActivityFrame`] keeps every record and exposes each field
//! as a column of optional values aligned with the record timestamps.

use chrono::{DateTime, NaiveTime, Utc};
use fitanalysis_core::models::{Record, RecordField};
use serde::Serialize;
use std::collections::BTreeMap;

/// Ordered `(timestamp, value)` samples of one field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    /// Field these samples belong to
    pub field: RecordField,
    /// Samples in source record order
    pub points: Vec<(DateTime<Utc>, f64)>,
}

impl TimeSeries {
    /// Empty series for `field`
    #[must_use]
    pub const fn empty(field: RecordField) -> Self {
        Self {
            field,
            points: Vec::new(),
        }
    }

    /// Number of samples
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series has no samples
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Sample values without timestamps
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|(_, value)| *value).collect()
    }

    /// Sample timestamps without values
    #[must_use]
    pub fn timestamps(&self) -> Vec<DateTime<Utc>> {
        self.points.iter().map(|(ts, _)| *ts).collect()
    }

    /// Arithmetic mean of the values
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        if self.points.is_empty() {
            return None;
        }
        let sum: f64 = self.points.iter().map(|(_, value)| value).sum();
        Some(sum / self.points.len() as f64)
    }

    /// Largest value
    #[must_use]
    pub fn max(&self) -> Option<f64> {
        self.points.iter().map(|(_, value)| *value).reduce(f64::max)
    }

    /// Largest value per UTC time of day, ordered by time
    ///
    /// Samples sharing a wall-clock second, whether duplicated within one
    /// activity or spread across days, collapse into a single entry.
    #[must_use]
    pub fn max_by_time_of_day(&self) -> BTreeMap<NaiveTime, f64> {
        let mut maxima = BTreeMap::new();
        for (timestamp, value) in &self.points {
            maxima
                .entry(timestamp.time())
                .and_modify(|current: &mut f64| *current = current.max(*value))
                .or_insert(*value);
        }
        maxima
    }
}

/// Extract the samples of `field` from `records`, preserving order
///
/// Records without a usable value for `field` are skipped. An empty input, or
/// a field no record carries, yields an empty series.
#[must_use]
pub fn extract_series(records: &[Record], field: RecordField) -> TimeSeries {
    let points = records
        .iter()
        .filter_map(|record| record.get(field).map(|value| (record.timestamp, value)))
        .collect();
    TimeSeries { field, points }
}

/// Named series container aligned on record timestamps
///
/// A column exists only for fields that at least one record carries; inside
/// a column, records lacking the field hold `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActivityFrame {
    timestamps: Vec<DateTime<Utc>>,
    columns: BTreeMap<RecordField, Vec<Option<f64>>>,
}

impl ActivityFrame {
    /// Build the frame from decoded records
    #[must_use]
    pub fn from_records(records: &[Record]) -> Self {
        let timestamps = records.iter().map(|record| record.timestamp).collect();

        let mut columns = BTreeMap::new();
        for field in RecordField::ALL {
            if records.iter().any(|record| record.has(field)) {
                let column = records.iter().map(|record| record.get(field)).collect();
                columns.insert(field, column);
            }
        }

        Self {
            timestamps,
            columns,
        }
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Whether the frame holds no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Record timestamps
    #[must_use]
    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    /// Fields with a column in this frame
    pub fn fields(&self) -> impl Iterator<Item = RecordField> + '_ {
        self.columns.keys().copied()
    }

    /// Aligned column for `field`, if any record carries it
    #[must_use]
    pub fn column(&self, field: RecordField) -> Option<&[Option<f64>]> {
        self.columns.get(&field).map(Vec::as_slice)
    }

    /// Present samples of `field` with their timestamps
    #[must_use]
    pub fn series(&self, field: RecordField) -> TimeSeries {
        let Some(column) = self.columns.get(&field) else {
            return TimeSeries::empty(field);
        };
        let points = self
            .timestamps
            .iter()
            .zip(column)
            .filter_map(|(ts, value)| value.map(|v| (*ts, v)))
            .collect();
        TimeSeries { field, points }
    }

    /// Seconds between the first and the last record
    #[must_use]
    pub fn elapsed_seconds(&self) -> f64 {
        match (self.timestamps.first(), self.timestamps.last()) {
            (Some(first), Some(last)) => (*last - *first).num_milliseconds() as f64 / 1000.0,
            _ => 0.0,
        }
    }
}
