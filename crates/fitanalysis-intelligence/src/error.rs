// ABOUTME: Error conditions of the power metrics engine
// ABOUTME: Keeps "no data" and "invalid threshold" distinguishable for callers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use fitanalysis_core::errors::AppError;
use thiserror::Error;

/// Conditions under which a metric cannot be computed
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MetricsError {
    /// The power series holds no usable samples
    #[error("No power samples available")]
    NoData,

    /// Threshold power is zero, negative or not a number
    #[error("Threshold power must be a positive number of watts, got {0}")]
    InvalidThreshold(f64),

    /// Nominal sampling interval is zero, negative or not a number
    #[error("Sample interval must be a positive number of seconds, got {0}")]
    InvalidSampleInterval(f64),
}

impl From<MetricsError> for AppError {
    fn from(error: MetricsError) -> Self {
        match error {
            MetricsError::NoData => Self::no_data(error.to_string()),
            MetricsError::InvalidThreshold(_) | MetricsError::InvalidSampleInterval(_) => {
                Self::out_of_range(error.to_string())
            }
        }
    }
}
