// ABOUTME: Property tests for Normalized Power, Intensity Factor and Training Stress Score
// ABOUTME: Checks the reference scenarios and scaling behavior of the metrics engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used)]

use chrono::{Duration, TimeZone, Utc};
use fitanalysis::models::{Record, RecordField};
use fitanalysis_intelligence::{
    extract_series, intensity_factor, normalized_power, ActivityFrame, MetricsEngine,
    MetricsError, MetricsStatus, PowerMetrics, NP_WINDOW_SAMPLES,
};

const EPS: f64 = 1e-9;

/// Alternating blocks of hard and easy efforts
fn interval_session(blocks: usize) -> Vec<f64> {
    (0..blocks)
        .flat_map(|block| {
            let watts = if block % 2 == 0 { 320.0 } else { 120.0 };
            std::iter::repeat(watts).take(60)
        })
        .collect()
}

#[test]
fn test_reference_constant_hour() {
    let metrics = PowerMetrics::compute(&[100.0; 3600], 200.0);
    assert!(metrics.is_ok());
    assert!((metrics.normalized_power.unwrap() - 100.0).abs() < EPS);
    assert!((metrics.intensity_factor.unwrap() - 0.5).abs() < EPS);
    assert!((metrics.tss.unwrap() - 25.0).abs() < EPS);
}

#[test]
fn test_constant_series_np_equals_constant() {
    for watts in [50.0, 187.5, 400.0] {
        for len in [1, NP_WINDOW_SAMPLES - 1, NP_WINDOW_SAMPLES, 500] {
            let np = normalized_power(&vec![watts; len]).unwrap();
            assert!((np - watts).abs() < 1e-6, "watts={watts} len={len} np={np}");
        }
    }
}

#[test]
fn test_variable_effort_np_exceeds_average() {
    let power = interval_session(20);
    let average = power.iter().sum::<f64>() / power.len() as f64;
    let np = normalized_power(&power).unwrap();
    assert!(np > average);
    assert!(np <= 320.0);
}

#[test]
fn test_intensity_factor_is_inverse_in_threshold() {
    let np = normalized_power(&interval_session(10)).unwrap();
    let at_200 = intensity_factor(np, 200.0).unwrap();
    let at_400 = intensity_factor(np, 400.0).unwrap();
    assert!((at_200 - 2.0 * at_400).abs() < EPS);
}

#[test]
fn test_tss_scales_with_duration() {
    let one_hour = PowerMetrics::compute(&[150.0; 3600], 250.0);
    let two_hours = PowerMetrics::compute(&[150.0; 7200], 250.0);
    assert!((two_hours.tss.unwrap() - 2.0 * one_hour.tss.unwrap()).abs() < 1e-6);
    // An hour at threshold is 100 TSS
    let at_threshold = PowerMetrics::compute(&[250.0; 3600], 250.0);
    assert!((at_threshold.tss.unwrap() - 100.0).abs() < 1e-6);
}

#[test]
fn test_empty_series_is_no_data() {
    let metrics = PowerMetrics::compute(&[], 200.0);
    assert_eq!(metrics.status, MetricsStatus::NoData);
    assert_eq!(metrics.normalized_power, None);
    assert_eq!(metrics.intensity_factor, None);
    assert_eq!(metrics.tss, None);
    assert_eq!(normalized_power(&[]), Err(MetricsError::NoData));
}

#[test]
fn test_invalid_threshold_is_reported_before_no_data() {
    let metrics = PowerMetrics::compute(&[100.0; 60], -5.0);
    assert_eq!(metrics.status, MetricsStatus::InvalidThreshold);
    assert_eq!(metrics.tss, None);

    let engine = MetricsEngine::default();
    assert_eq!(
        engine.try_compute(&[], 0.0),
        Err(MetricsError::InvalidThreshold(0.0))
    );
    assert_eq!(
        engine.compute(&[], f64::NAN).status,
        MetricsStatus::InvalidThreshold
    );
}

#[test]
fn test_metrics_json_shape() {
    let json = serde_json::to_value(PowerMetrics::compute(&[], 200.0)).unwrap();
    assert_eq!(json["status"], "no_data");
    assert!(json["normalized_power"].is_null());
    assert_eq!(json["threshold_power"], 200.0);
}

#[test]
fn test_extractor_tolerates_missing_fields() {
    let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
    let records = vec![
        Record::new(start)
            .with(RecordField::HeartRate, 100.0)
            .with(RecordField::Power, 150.0),
        Record::new(start + Duration::seconds(1))
            .with(RecordField::HeartRate, 101.0)
            .with(RecordField::Power, 151.0),
        Record::new(start + Duration::seconds(2)).with(RecordField::Power, 152.0),
    ];

    let hr = extract_series(&records, RecordField::HeartRate);
    assert_eq!(hr.values(), vec![100.0, 101.0]);

    let power = extract_series(&records, RecordField::Power);
    assert_eq!(power.values(), vec![150.0, 151.0, 152.0]);
    assert_eq!(power.timestamps()[2], start + Duration::seconds(2));

    assert!(extract_series(&records, RecordField::Cadence).is_empty());
    assert!(extract_series(&[], RecordField::Power).is_empty());

    let frame = ActivityFrame::from_records(&records);
    assert_eq!(
        frame.column(RecordField::HeartRate).unwrap(),
        &[Some(100.0), Some(101.0), None]
    );
    assert_eq!(frame.series(RecordField::Power), power);
}
