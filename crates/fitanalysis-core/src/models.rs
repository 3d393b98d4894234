// ABOUTME: Activity record model with a closed set of sampled field names
// ABOUTME: Records are sparse - any field may be absent for a given timestamp
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::errors::AppError;

/// Sampled quantities a FIT `record` message may carry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RecordField {
    /// Heart rate in bpm
    HeartRate,
    /// Power in watts
    Power,
    /// Cadence in rpm
    Cadence,
    /// Altitude in meters
    Altitude,
    /// Speed in m/s
    Speed,
    /// Cumulative distance in meters
    Distance,
    /// Temperature in degrees Celsius
    Temperature,
}

impl RecordField {
    /// Every known field, in column order
    pub const ALL: [Self; 7] = [
        Self::HeartRate,
        Self::Power,
        Self::Cadence,
        Self::Altitude,
        Self::Speed,
        Self::Distance,
        Self::Temperature,
    ];

    /// Column name used in JSON payloads and logs
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::HeartRate => "heart_rate",
            Self::Power => "power",
            Self::Cadence => "cadence",
            Self::Altitude => "altitude",
            Self::Speed => "speed",
            Self::Distance => "distance",
            Self::Temperature => "temperature",
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RecordField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| AppError::invalid_input(format!("Unknown record field: '{s}'")))
    }
}

/// One timestamped observation from an activity file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Sample time
    pub timestamp: DateTime<Utc>,
    /// Values present in this sample
    #[serde(default)]
    pub fields: BTreeMap<RecordField, f64>,
}

impl Record {
    /// Create a record with no field values
    #[must_use]
    pub const fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style setter
    #[must_use]
    pub fn with(mut self, field: RecordField, value: f64) -> Self {
        self.fields.insert(field, value);
        self
    }

    /// Set a field, replacing any earlier value
    pub fn set(&mut self, field: RecordField, value: f64) {
        self.fields.insert(field, value);
    }

    /// Value of `field`, if present and finite
    #[must_use]
    pub fn get(&self, field: RecordField) -> Option<f64> {
        self.fields.get(&field).copied().filter(|v| v.is_finite())
    }

    /// Whether this record carries a usable value for `field`
    #[must_use]
    pub fn has(&self, field: RecordField) -> bool {
        self.get(field).is_some()
    }
}
