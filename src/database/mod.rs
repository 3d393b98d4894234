// ABOUTME: SQLite metadata store recording one summary row per analyzed activity
// ABOUTME: Opens the pool, creates the activities table and exposes the MetadataRecorder seam
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Metadata Store
//!
//! A thin `SQLite` layer over `sqlx`. Each analyzed activity is stored at most
//! once; recording an identifier that already exists leaves the row untouched
//! and reports [`RecordOutcome::AlreadyExists`].

mod activities;

pub use activities::{ActivityMetadata, ActivityRow};

use crate::config::DatabaseConfig;
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::{debug, info};

/// Result of recording one activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordOutcome {
    /// A new row was written
    Stored,
    /// A row with this identifier already existed and was left untouched
    AlreadyExists,
}

/// Persistence seam used by the upload endpoint and the CLI
#[async_trait]
pub trait MetadataRecorder: Send + Sync {
    /// Record one activity's summary
    async fn record(&self, metadata: &ActivityMetadata) -> AppResult<RecordOutcome>;

    /// All recorded activities, oldest first
    async fn list_activities(&self) -> AppResult<Vec<ActivityRow>>;

    /// One recorded activity
    async fn get_activity(&self, activity_id: &str) -> AppResult<Option<ActivityRow>>;

    /// Verify the backing store still answers queries
    async fn ping(&self) -> AppResult<()>;
}

/// `SQLite`-backed metadata store
#[derive(Clone)]
pub struct MetadataStore {
    pool: SqlitePool,
    read_only: bool,
}

impl MetadataStore {
    /// Open (and unless read-only, initialize) the store described by `config`
    ///
    /// # Errors
    ///
    /// Returns a database error if the connection or table creation fails
    pub async fn new(config: &DatabaseConfig) -> AppResult<Self> {
        let options = if config.is_memory() {
            SqliteConnectOptions::from_str(&config.connection_string())
                .map_err(|e| AppError::database(format!("Invalid database URL: {e}")))?
        } else {
            SqliteConnectOptions::new()
                .filename(&config.path)
                .create_if_missing(!config.read_only)
                .read_only(config.read_only)
        };

        // Every in-memory connection is its own database, so keep exactly one alive
        let pool_options = if config.is_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(4)
        };

        let pool = pool_options.connect_with(options).await.map_err(|e| {
            AppError::database(format!(
                "Failed to open metadata store {}: {e}",
                config.path.display()
            ))
            .with_source(e)
        })?;

        let store = Self {
            pool,
            read_only: config.read_only,
        };

        if store.read_only {
            debug!("Metadata store opened read-only; skipping table creation");
        } else {
            store.migrate().await?;
        }

        info!(
            path = %config.path.display(),
            read_only = config.read_only,
            "Metadata store ready"
        );
        Ok(store)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Whether the store was opened without write access
    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Create tables
    ///
    /// # Errors
    ///
    /// Returns a database error if a statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_activities().await
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl MetadataRecorder for MetadataStore {
    async fn record(&self, metadata: &ActivityMetadata) -> AppResult<RecordOutcome> {
        self.insert_activity(metadata).await
    }

    async fn list_activities(&self) -> AppResult<Vec<ActivityRow>> {
        self.fetch_activities().await
    }

    async fn get_activity(&self, activity_id: &str) -> AppResult<Option<ActivityRow>> {
        self.fetch_activity(activity_id).await
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
