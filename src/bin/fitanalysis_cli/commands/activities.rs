// ABOUTME: Activity listing command for fitanalysis-cli
// ABOUTME: Reads recorded rows from the metadata store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use fitanalysis::{
    config::DatabaseConfig,
    database::{MetadataRecorder, MetadataStore},
    errors::AppResult,
};

use crate::helpers::display::display_activities;

/// List recorded activities
pub async fn list(database: &DatabaseConfig, json: bool) -> AppResult<()> {
    let store = MetadataStore::new(database).await?;
    let rows = store.list_activities().await;
    store.close().await;
    let rows = rows?;

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        display_activities(&rows);
    }
    Ok(())
}
