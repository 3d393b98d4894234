// ABOUTME: Activities table schema, row types and queries for the metadata store
// ABOUTME: Inserts skip existing identifiers via ON CONFLICT DO NOTHING
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{MetadataStore, RecordOutcome};
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use fitanalysis_intelligence::ActivitySummary;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Summary statistics to record for one activity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityMetadata {
    /// Caller-supplied unique identifier
    pub activity_id: String,
    /// Display name
    pub activity_name: Option<String>,
    /// Sport or activity type
    pub activity_type: Option<String>,
    /// Time of the first record
    pub start_time: Option<DateTime<Utc>>,
    /// Distance in meters
    pub distance: Option<f64>,
    /// Elapsed duration in seconds
    pub duration: Option<f64>,
    /// Energy in kilocalories
    pub calories: Option<i64>,
    /// Mean heart rate in bpm
    pub average_heart_rate: Option<f64>,
    /// Peak heart rate in bpm
    pub max_heart_rate: Option<f64>,
    /// Mean power in watts
    pub average_power: Option<f64>,
    /// Peak power in watts
    pub max_power: Option<f64>,
    /// Normalized Power in watts
    pub normalized_power: Option<f64>,
    /// Intensity Factor
    pub intensity_factor: Option<f64>,
    /// Training Stress Score
    pub tss: Option<f64>,
    /// Threshold power the metrics used
    pub threshold_power: Option<f64>,
    /// Source file, when analyzed from disk
    pub file_path: Option<String>,
}

impl ActivityMetadata {
    /// Flatten an activity summary into a row for `activity_id`
    #[must_use]
    pub fn from_summary(activity_id: impl Into<String>, summary: &ActivitySummary) -> Self {
        let metrics = summary.metrics.as_ref();
        Self {
            activity_id: activity_id.into(),
            start_time: summary.start_time,
            distance: summary.distance_meters,
            duration: Some(summary.duration_seconds),
            average_heart_rate: summary.average_heart_rate,
            max_heart_rate: summary.max_heart_rate,
            average_power: summary.average_power,
            max_power: summary.max_power,
            normalized_power: metrics.and_then(|m| m.normalized_power),
            intensity_factor: metrics.and_then(|m| m.intensity_factor),
            tss: metrics.and_then(|m| m.tss),
            threshold_power: metrics.map(|m| m.threshold_power),
            ..Self::default()
        }
    }

    /// Set the display name
    #[must_use]
    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.activity_name = name;
        self
    }

    /// Set the activity type
    #[must_use]
    pub fn with_type(mut self, activity_type: Option<String>) -> Self {
        self.activity_type = activity_type;
        self
    }

    /// Set the source file path
    #[must_use]
    pub fn with_file_path(mut self, file_path: impl Into<String>) -> Self {
        self.file_path = Some(file_path.into());
        self
    }
}

/// Stored activity row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ActivityRow {
    /// Unique identifier
    pub activity_id: String,
    /// Display name
    pub activity_name: Option<String>,
    /// Sport or activity type
    pub activity_type: Option<String>,
    /// Time of the first record
    pub start_time: Option<DateTime<Utc>>,
    /// Distance in meters
    pub distance: Option<f64>,
    /// Elapsed duration in seconds
    pub duration: Option<f64>,
    /// Energy in kilocalories
    pub calories: Option<i64>,
    /// Mean heart rate in bpm
    pub average_heart_rate: Option<f64>,
    /// Peak heart rate in bpm
    pub max_heart_rate: Option<f64>,
    /// Mean power in watts
    pub average_power: Option<f64>,
    /// Peak power in watts
    pub max_power: Option<f64>,
    /// Normalized Power in watts
    pub normalized_power: Option<f64>,
    /// Intensity Factor
    pub intensity_factor: Option<f64>,
    /// Training Stress Score
    pub tss: Option<f64>,
    /// Threshold power the metrics used
    pub threshold_power: Option<f64>,
    /// Source file
    pub file_path: Option<String>,
    /// When the row was written
    pub created_at: DateTime<Utc>,
}

const SELECT_COLUMNS: &str = r"
    SELECT activity_id, activity_name, activity_type, start_time, distance, duration,
           calories, average_heart_rate, max_heart_rate, average_power, max_power,
           normalized_power, intensity_factor, tss, threshold_power, file_path, created_at
    FROM activities
";

impl MetadataStore {
    /// Create the activities table
    pub(super) async fn migrate_activities(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS activities (
                activity_id TEXT PRIMARY KEY,
                activity_name TEXT,
                activity_type TEXT,
                start_time TEXT,
                distance REAL,
                duration REAL,
                calories INTEGER,
                average_heart_rate REAL,
                max_heart_rate REAL,
                average_power REAL,
                max_power REAL,
                normalized_power REAL,
                intensity_factor REAL,
                tss REAL,
                threshold_power REAL,
                file_path TEXT,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_activities_created_at ON activities(created_at)")
            .execute(self.pool())
            .await?;

        Ok(())
    }

    pub(super) async fn insert_activity(
        &self,
        metadata: &ActivityMetadata,
    ) -> AppResult<RecordOutcome> {
        if metadata.activity_id.trim().is_empty() {
            return Err(AppError::missing_field("activity_id"));
        }

        let result = sqlx::query(
            r"
            INSERT INTO activities (
                activity_id, activity_name, activity_type, start_time, distance, duration,
                calories, average_heart_rate, max_heart_rate, average_power, max_power,
                normalized_power, intensity_factor, tss, threshold_power, file_path, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)
            ON CONFLICT(activity_id) DO NOTHING
            ",
        )
        .bind(&metadata.activity_id)
        .bind(&metadata.activity_name)
        .bind(&metadata.activity_type)
        .bind(metadata.start_time)
        .bind(metadata.distance)
        .bind(metadata.duration)
        .bind(metadata.calories)
        .bind(metadata.average_heart_rate)
        .bind(metadata.max_heart_rate)
        .bind(metadata.average_power)
        .bind(metadata.max_power)
        .bind(metadata.normalized_power)
        .bind(metadata.intensity_factor)
        .bind(metadata.tss)
        .bind(metadata.threshold_power)
        .bind(&metadata.file_path)
        .bind(Utc::now())
        .execute(self.pool())
        .await
        .map_err(|e| {
            AppError::database(format!("Failed to record activity: {e}"))
                .with_resource_id(metadata.activity_id.clone())
                .with_source(e)
        })?;

        if result.rows_affected() == 0 {
            info!(
                activity_id = %metadata.activity_id,
                "Activity already exists in metadata store. Skipping."
            );
            Ok(RecordOutcome::AlreadyExists)
        } else {
            info!(activity_id = %metadata.activity_id, "Recorded activity metadata");
            Ok(RecordOutcome::Stored)
        }
    }

    pub(super) async fn fetch_activities(&self) -> AppResult<Vec<ActivityRow>> {
        let rows = sqlx::query_as::<_, ActivityRow>(&format!(
            "{SELECT_COLUMNS} ORDER BY created_at, activity_id"
        ))
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }

    pub(super) async fn fetch_activity(&self, activity_id: &str) -> AppResult<Option<ActivityRow>> {
        let row = sqlx::query_as::<_, ActivityRow>(&format!(
            "{SELECT_COLUMNS} WHERE activity_id = ?1"
        ))
        .bind(activity_id)
        .fetch_optional(self.pool())
        .await?;
        Ok(row)
    }
}
