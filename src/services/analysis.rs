// ABOUTME: Analysis service turning FIT bytes into chart series, summary and power metrics
// ABOUTME: Optionally records the resulting summary through a MetadataRecorder
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::formats::CHART_TIMESTAMP;
use crate::database::{ActivityMetadata, MetadataRecorder, RecordOutcome};
use crate::errors::AppResult;
use crate::fit::{decode_fit_bytes, ActivityData};
use fitanalysis_core::models::RecordField;
use fitanalysis_intelligence::{ActivitySummary, PowerMetrics};
use serde::{Deserialize, Serialize};

/// Report returned by the upload endpoint and printed by the CLI
///
/// `power` and `heart_rate` are aligned with `timestamps`; a series the file
/// never carries is an empty array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Record times formatted for the chart
    pub timestamps: Vec<String>,
    /// Power per record, `null` where missing
    pub power: Vec<Option<f64>>,
    /// Heart rate per record, `null` where missing
    pub heart_rate: Vec<Option<f64>>,
    /// Power metrics, `null` without a threshold power
    pub metrics: Option<PowerMetrics>,
    /// Summary statistics
    pub summary: ActivitySummary,
    /// Outcome of recording, when an activity id was supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded: Option<RecordOutcome>,
}

impl AnalysisReport {
    /// Build the report for an already-decoded activity
    #[must_use]
    pub fn from_activity(activity: &ActivityData, threshold_power: Option<f64>) -> Self {
        let frame = activity.frame();
        let column = |field| {
            frame
                .column(field)
                .map(<[Option<f64>]>::to_vec)
                .unwrap_or_default()
        };
        let summary = activity.summary(threshold_power);

        Self {
            timestamps: frame
                .timestamps()
                .iter()
                .map(|ts| ts.format(CHART_TIMESTAMP).to_string())
                .collect(),
            power: column(RecordField::Power),
            heart_rate: column(RecordField::HeartRate),
            metrics: summary.metrics,
            summary,
            recorded: None,
        }
    }
}

/// Identity of an analysis to record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordRequest {
    /// Unique activity identifier
    pub activity_id: String,
    /// Display name
    pub activity_name: Option<String>,
    /// Activity type
    pub activity_type: Option<String>,
    /// Source file path
    pub file_path: Option<String>,
}

/// Decode FIT bytes and build the analysis report
///
/// A file without any record messages is valid and yields empty arrays.
///
/// # Errors
///
/// Returns `InvalidFormat` when the bytes are not a readable FIT file
pub fn analyze_fit_bytes(bytes: &[u8], threshold_power: Option<f64>) -> AppResult<AnalysisReport> {
    let records = decode_fit_bytes(bytes)?;
    let activity = ActivityData::from_records(&records);
    Ok(AnalysisReport::from_activity(&activity, threshold_power))
}

/// Record `report` through `recorder` and note the outcome on the report
///
/// # Errors
///
/// Returns the recorder's error when the write fails
pub async fn record_analysis(
    recorder: &dyn MetadataRecorder,
    report: &mut AnalysisReport,
    request: RecordRequest,
) -> AppResult<RecordOutcome> {
    let mut metadata = ActivityMetadata::from_summary(request.activity_id, &report.summary)
        .with_name(request.activity_name)
        .with_type(request.activity_type);
    if let Some(path) = request.file_path {
        metadata = metadata.with_file_path(path);
    }

    let outcome = recorder.record(&metadata).await?;
    report.recorded = Some(outcome);
    Ok(outcome)
}
