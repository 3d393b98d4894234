// ABOUTME: Analyze command for fitanalysis-cli
// ABOUTME: Loads a FIT file, prints the report and optionally records it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use clap::Args;
use fitanalysis::{
    config::DatabaseConfig,
    database::MetadataStore,
    errors::AppResult,
    fit::FitDataLoader,
    services::{record_analysis, AnalysisReport, RecordRequest},
};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::helpers::display::{display_max_power_by_time, display_record_outcome, display_report};

/// Arguments of `analyze`
#[derive(Args)]
pub struct AnalyzeArgs {
    /// FIT file to analyze
    file: PathBuf,

    /// Threshold power in watts (metrics are skipped without it)
    #[arg(long)]
    threshold_power: Option<f64>,

    /// Print the full report as JSON
    #[arg(long)]
    json: bool,

    /// Record the summary in the metadata store
    #[arg(long)]
    record: bool,

    /// Activity identifier (defaults to the file stem)
    #[arg(long)]
    activity_id: Option<String>,

    /// Activity display name
    #[arg(long)]
    name: Option<String>,

    /// Activity type, e.g. cycling
    #[arg(long)]
    activity_type: Option<String>,

    /// Also print the highest power at each time of day
    #[arg(long)]
    max_power_by_time: bool,
}

fn default_activity_id(file: &Path) -> String {
    file.file_stem()
        .map_or_else(|| file.display().to_string(), |stem| stem.to_string_lossy().into_owned())
}

/// Run `analyze`
pub async fn run(database: &DatabaseConfig, args: AnalyzeArgs) -> AppResult<()> {
    let activity = FitDataLoader::new(&args.file)?.load()?;
    let mut report = AnalysisReport::from_activity(&activity, args.threshold_power);

    if args.record {
        let request = RecordRequest {
            activity_id: args
                .activity_id
                .unwrap_or_else(|| default_activity_id(&args.file)),
            activity_name: args.name,
            activity_type: args.activity_type,
            file_path: Some(args.file.display().to_string()),
        };
        info!("Recording activity {}", request.activity_id);

        let store = MetadataStore::new(database).await?;
        let outcome = record_analysis(&store, &mut report, request).await;
        store.close().await;
        outcome?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        display_report(&args.file, &report);
        if let Some(outcome) = report.recorded {
            display_record_outcome(outcome);
        }
    }

    if args.max_power_by_time {
        display_max_power_by_time(&activity.max_power_by_time());
    }

    Ok(())
}
