// ABOUTME: Integration tests for the SQLite metadata store
// ABOUTME: Covers insert, skip-if-exists, listing, lookups and read-only stores
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{encode_fit, init_test_logging, steady_samples};
use fitanalysis::config::DatabaseConfig;
use fitanalysis::database::{ActivityMetadata, MetadataRecorder, MetadataStore, RecordOutcome};
use fitanalysis::errors::ErrorCode;
use fitanalysis::services::{analyze_fit_bytes, record_analysis, RecordRequest};

async fn memory_store() -> MetadataStore {
    init_test_logging();
    MetadataStore::new(&DatabaseConfig {
        path: ":memory:".into(),
        read_only: false,
    })
    .await
    .unwrap()
}

fn sample_metadata(activity_id: &str) -> ActivityMetadata {
    ActivityMetadata {
        activity_id: activity_id.to_owned(),
        activity_name: Some("Morning Ride".to_owned()),
        activity_type: Some("cycling".to_owned()),
        distance: Some(10_000.0),
        duration: Some(3600.0),
        calories: Some(500),
        average_heart_rate: Some(150.0),
        max_heart_rate: Some(180.0),
        average_power: Some(200.0),
        max_power: Some(400.0),
        file_path: Some("/path/to/activity.fit".to_owned()),
        ..ActivityMetadata::default()
    }
}

#[tokio::test]
async fn test_record_and_get_activity() {
    let store = memory_store().await;

    let outcome = store.record(&sample_metadata("12345")).await.unwrap();
    assert_eq!(outcome, RecordOutcome::Stored);

    let row = store.get_activity("12345").await.unwrap().unwrap();
    assert_eq!(row.activity_name.as_deref(), Some("Morning Ride"));
    assert_eq!(row.calories, Some(500));
    assert_eq!(row.max_power, Some(400.0));
    assert_eq!(row.file_path.as_deref(), Some("/path/to/activity.fit"));

    assert!(store.get_activity("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_existing_activity_is_skipped() {
    let store = memory_store().await;
    store.record(&sample_metadata("12345")).await.unwrap();

    let mut changed = sample_metadata("12345");
    changed.activity_name = Some("Renamed".to_owned());
    let outcome = store.record(&changed).await.unwrap();
    assert_eq!(outcome, RecordOutcome::AlreadyExists);

    let rows = store.list_activities().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].activity_name.as_deref(), Some("Morning Ride"));
}

#[tokio::test]
async fn test_list_activities_in_creation_order() {
    let store = memory_store().await;
    for id in ["a", "b", "c"] {
        store.record(&sample_metadata(id)).await.unwrap();
    }

    let ids: Vec<String> = store
        .list_activities()
        .await
        .unwrap()
        .into_iter()
        .map(|row| row.activity_id)
        .collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn test_blank_activity_id_is_rejected() {
    let store = memory_store().await;
    let err = store.record(&sample_metadata("  ")).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::MissingRequiredField);
}

#[tokio::test]
async fn test_record_analysis_flattens_metrics() {
    let store = memory_store().await;
    let mut report =
        analyze_fit_bytes(&encode_fit(&steady_samples(3600, 100, 140)), Some(200.0)).unwrap();

    let request = RecordRequest {
        activity_id: "ride-1".to_owned(),
        activity_name: Some("Steady".to_owned()),
        ..RecordRequest::default()
    };
    let outcome = record_analysis(&store, &mut report, request).await.unwrap();
    assert_eq!(outcome, RecordOutcome::Stored);
    assert_eq!(report.recorded, Some(RecordOutcome::Stored));

    let row = store.get_activity("ride-1").await.unwrap().unwrap();
    assert!((row.normalized_power.unwrap() - 100.0).abs() < 1e-9);
    assert!((row.tss.unwrap() - 25.0).abs() < 1e-9);
    assert_eq!(row.threshold_power, Some(200.0));
    assert_eq!(row.average_heart_rate, Some(140.0));
}

#[tokio::test]
async fn test_file_store_persists_and_read_only_rejects_writes() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let config = DatabaseConfig {
        path: dir.path().join("fit_metadata.db"),
        read_only: false,
    };

    let store = MetadataStore::new(&config).await.unwrap();
    store.record(&sample_metadata("persisted")).await.unwrap();
    store.close().await;

    let read_only = MetadataStore::new(&DatabaseConfig {
        read_only: true,
        ..config
    })
    .await
    .unwrap();
    assert!(read_only.is_read_only());
    assert_eq!(read_only.list_activities().await.unwrap().len(), 1);

    let err = read_only
        .record(&sample_metadata("new"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::DatabaseError);
    read_only.close().await;
}
