// ABOUTME: Output formatting helpers for fitanalysis-cli
// ABOUTME: Renders analysis reports and recorded activity tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use fitanalysis::{
    database::{ActivityRow, RecordOutcome},
    services::AnalysisReport,
};
use chrono::NaiveTime;
use fitanalysis_intelligence::MetricsStatus;
use std::collections::BTreeMap;
use std::path::Path;

fn fmt_opt(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "-".to_owned(), |v| format!("{v:.precision$}"))
}

/// Display an analysis report
pub fn display_report(file: &Path, report: &AnalysisReport) {
    let summary = &report.summary;

    println!("\nActivity: {}", file.display());
    println!("{}", "=".repeat(60));
    println!("   Records:         {}", summary.record_count);
    if let Some(start) = summary.start_time {
        println!("   Start:           {}", start.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    println!("   Duration:        {:.0} s", summary.duration_seconds);
    println!("   Distance:        {} m", fmt_opt(summary.distance_meters, 0));
    println!(
        "   Power avg/max:   {} / {} W",
        fmt_opt(summary.average_power, 1),
        fmt_opt(summary.max_power, 0)
    );
    println!(
        "   HR avg/max:      {} / {} bpm",
        fmt_opt(summary.average_heart_rate, 1),
        fmt_opt(summary.max_heart_rate, 0)
    );

    match &report.metrics {
        None => println!("\n   No threshold power given; power metrics skipped."),
        Some(metrics) => {
            println!("\nPower metrics (threshold {} W)", metrics.threshold_power);
            println!("{}", "-".repeat(60));
            match metrics.status {
                MetricsStatus::Ok => {
                    println!("   Normalized Power:   {} W", fmt_opt(metrics.normalized_power, 1));
                    println!("   Intensity Factor:   {}", fmt_opt(metrics.intensity_factor, 3));
                    println!("   TSS:                {}", fmt_opt(metrics.tss, 1));
                }
                MetricsStatus::NoData => println!("   No power samples in this file."),
                MetricsStatus::InvalidThreshold => {
                    println!("   Threshold power must be a positive number.");
                }
            }
        }
    }
}

/// Display the result of recording an activity
pub fn display_record_outcome(outcome: RecordOutcome) {
    match outcome {
        RecordOutcome::Stored => println!("\nRecorded in metadata store."),
        RecordOutcome::AlreadyExists => {
            println!("\nActivity already exists in metadata store. Skipping.");
        }
    }
}

/// Display recorded activities as a table
pub fn display_activities(rows: &[ActivityRow]) {
    if rows.is_empty() {
        println!("No activities recorded.");
        return;
    }

    println!(
        "{:<24} {:<24} {:<10} {:>9} {:>8} {:>6} {:>7}",
        "ID", "NAME", "TYPE", "DURATION", "NP", "IF", "TSS"
    );
    println!("{}", "-".repeat(94));
    for row in rows {
        println!(
            "{:<24} {:<24} {:<10} {:>9} {:>8} {:>6} {:>7}",
            row.activity_id,
            row.activity_name.as_deref().unwrap_or("-"),
            row.activity_type.as_deref().unwrap_or("-"),
            fmt_opt(row.duration, 0),
            fmt_opt(row.normalized_power, 1),
            fmt_opt(row.intensity_factor, 2),
            fmt_opt(row.tss, 1),
        );
    }
    println!("\n{} activities", rows.len());
}

/// Display the highest power at each time of day
pub fn display_max_power_by_time(maxima: &BTreeMap<NaiveTime, f64>) {
    if maxima.is_empty() {
        println!("No power samples recorded.");
        return;
    }

    println!("\n{:<10} {:>8}", "Time", "Max W");
    for (time, watts) in maxima {
        println!("{:<10} {watts:>8.0}", time.format("%H:%M:%S").to_string());
    }
}
