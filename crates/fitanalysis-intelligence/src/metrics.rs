// ABOUTME: Normalized Power, Intensity Factor and Training Stress Score over a power series
// ABOUTME: Index-weighted 30-sample rolling mean, 4th-power mean, 4th root; TSS from sample count
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Power metrics engine
//!
//! `NP = ⁴√(mean(rolling_mean_30(power)⁴))`, `IF = NP / threshold`,
//! `TSS = (duration_s x NP x IF) / (threshold x 3600) x 100`.
//!
//! Samples are weighted equally per index; the series is assumed to be
//! recorded at a nominal fixed interval (one second unless configured).
//!
//! # Scientific References
//!
//! - Coggan, A. & Allen, H. (2010). "Training and Racing with a Power Meter." `VeloPress`.

use crate::error::MetricsError;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Rolling window length used for Normalized Power
pub const NP_WINDOW_SAMPLES: usize = 30;

/// Nominal spacing between samples, in seconds
pub const NOMINAL_SAMPLE_INTERVAL_SECS: f64 = 1.0;

const SECONDS_PER_HOUR: f64 = 3600.0;
const TSS_SCALE: f64 = 100.0;

/// Fixed-size window over the most recent power samples
struct RollingWindow {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl RollingWindow {
    fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a sample and return the mean of the current window
    fn push(&mut self, sample: f64) -> f64 {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }
}

/// Reject thresholds that would produce misleading ratios
///
/// # Errors
///
/// Returns [`MetricsError::InvalidThreshold`] for zero, negative or non-finite values
pub fn validate_threshold(threshold_power: f64) -> Result<f64, MetricsError> {
    if threshold_power.is_finite() && threshold_power > 0.0 {
        Ok(threshold_power)
    } else {
        Err(MetricsError::InvalidThreshold(threshold_power))
    }
}

/// Normalized Power of `power`
///
/// Non-finite samples are ignored. The first 29 rolling means average over the
/// available prefix rather than padding with zeros.
///
/// # Errors
///
/// Returns [`MetricsError::NoData`] when no usable sample remains
pub fn normalized_power(power: &[f64]) -> Result<f64, MetricsError> {
    let mut window = RollingWindow::new(NP_WINDOW_SAMPLES);
    let mut fourth_power_sum = 0.0;
    let mut count = 0_usize;

    for &sample in power.iter().filter(|sample| sample.is_finite()) {
        let rolling_mean = window.push(sample);
        fourth_power_sum += rolling_mean.powi(4);
        count += 1;
    }

    if count == 0 {
        return Err(MetricsError::NoData);
    }

    Ok((fourth_power_sum / count as f64).powf(0.25))
}

/// Intensity Factor from a Normalized Power value
///
/// # Errors
///
/// Returns [`MetricsError::InvalidThreshold`] for a non-positive threshold
pub fn intensity_factor(normalized_power: f64, threshold_power: f64) -> Result<f64, MetricsError> {
    let threshold_power = validate_threshold(threshold_power)?;
    Ok(normalized_power / threshold_power)
}

/// Training Stress Score
///
/// # Errors
///
/// Returns [`MetricsError::InvalidThreshold`] for a non-positive threshold
pub fn training_stress_score(
    duration_seconds: f64,
    normalized_power: f64,
    intensity_factor: f64,
    threshold_power: f64,
) -> Result<f64, MetricsError> {
    let threshold_power = validate_threshold(threshold_power)?;
    Ok((duration_seconds * normalized_power * intensity_factor)
        / (threshold_power * SECONDS_PER_HOUR)
        * TSS_SCALE)
}

/// Outcome of one metrics computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricsStatus {
    /// All three metrics were computed
    Ok,
    /// The power series was empty or held no usable samples
    NoData,
    /// Threshold power was zero, negative or not a number
    InvalidThreshold,
}

/// Metrics for one analyzed power series
///
/// Numeric fields are populated only when `status` is [`MetricsStatus::Ok`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerMetrics {
    /// Normalized Power in watts
    pub normalized_power: Option<f64>,
    /// Intensity Factor (NP / threshold)
    pub intensity_factor: Option<f64>,
    /// Training Stress Score
    pub tss: Option<f64>,
    /// Threshold power the ratios were computed against
    pub threshold_power: f64,
    /// Computation outcome
    pub status: MetricsStatus,
}

impl PowerMetrics {
    /// Compute metrics at the nominal one-second sampling interval
    #[must_use]
    pub fn compute(power: &[f64], threshold_power: f64) -> Self {
        MetricsEngine::default().compute(power, threshold_power)
    }

    /// Metrics carrying only a failure status
    #[must_use]
    pub const fn failed(threshold_power: f64, status: MetricsStatus) -> Self {
        Self {
            normalized_power: None,
            intensity_factor: None,
            tss: None,
            threshold_power,
            status,
        }
    }

    /// Whether every metric was computed
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == MetricsStatus::Ok
    }
}

/// Metrics engine parameterized by the nominal sampling interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsEngine {
    sample_interval_secs: f64,
}

impl Default for MetricsEngine {
    fn default() -> Self {
        Self {
            sample_interval_secs: NOMINAL_SAMPLE_INTERVAL_SECS,
        }
    }
}

impl MetricsEngine {
    /// Engine for series recorded every `seconds`
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::InvalidSampleInterval`] for non-positive intervals
    pub fn with_sample_interval(seconds: f64) -> Result<Self, MetricsError> {
        if seconds.is_finite() && seconds > 0.0 {
            Ok(Self {
                sample_interval_secs: seconds,
            })
        } else {
            Err(MetricsError::InvalidSampleInterval(seconds))
        }
    }

    /// Nominal sample spacing in seconds
    #[must_use]
    pub const fn sample_interval_secs(&self) -> f64 {
        self.sample_interval_secs
    }

    /// Duration covered by `sample_count` samples
    #[must_use]
    pub fn duration_seconds(&self, sample_count: usize) -> f64 {
        sample_count as f64 * self.sample_interval_secs
    }

    /// Compute all metrics, folding failures into the status
    #[must_use]
    pub fn compute(&self, power: &[f64], threshold_power: f64) -> PowerMetrics {
        match self.try_compute(power, threshold_power) {
            Ok(metrics) => metrics,
            Err(MetricsError::NoData) => {
                PowerMetrics::failed(threshold_power, MetricsStatus::NoData)
            }
            Err(MetricsError::InvalidThreshold(_) | MetricsError::InvalidSampleInterval(_)) => {
                PowerMetrics::failed(threshold_power, MetricsStatus::InvalidThreshold)
            }
        }
    }

    /// Compute all metrics
    ///
    /// The threshold is validated before the series is inspected, so an
    /// invalid threshold is reported even for an empty series.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::InvalidThreshold`] or [`MetricsError::NoData`]
    pub fn try_compute(
        &self,
        power: &[f64],
        threshold_power: f64,
    ) -> Result<PowerMetrics, MetricsError> {
        let threshold_power = validate_threshold(threshold_power)?;
        let np = normalized_power(power)?;
        let if_value = intensity_factor(np, threshold_power)?;

        let sample_count = power.iter().filter(|sample| sample.is_finite()).count();
        let duration = self.duration_seconds(sample_count);
        let tss = training_stress_score(duration, np, if_value, threshold_power)?;

        tracing::debug!(
            samples = sample_count,
            normalized_power = np,
            intensity_factor = if_value,
            tss,
            "Computed power metrics"
        );

        Ok(PowerMetrics {
            normalized_power: Some(np),
            intensity_factor: Some(if_value),
            tss: Some(tss),
            threshold_power,
            status: MetricsStatus::Ok,
        })
    }
}
