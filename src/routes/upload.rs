// ABOUTME: Upload route accepting a FIT file and returning chart series plus power metrics
// ABOUTME: Validates extension and size, analyzes off the async runtime, optionally records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Upload routes
//!
//! `POST /upload` takes a `multipart/form-data` body with a `file` part and
//! answers with an [`AnalysisReport`]. Query parameters select the threshold
//! power and, when `activity_id` is present, record the summary.

use crate::config::WebConfig;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::resources::ServerResources;
use crate::routes::with_request_id;
use crate::services::{analyze_fit_bytes, record_analysis, AnalysisReport, RecordRequest};
use axum::{
    body::Bytes,
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::QueryRejection,
        DefaultBodyLimit, Multipart, Query, State,
    },
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Room for multipart boundaries and part headers on top of the file itself
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

const FILE_PART: &str = "file";

/// Query parameters of an upload
#[derive(Debug, Default, Deserialize)]
pub struct UploadParams {
    /// Threshold power in watts; metrics are omitted without it
    pub threshold_power: Option<f64>,
    /// Record the summary under this identifier
    pub activity_id: Option<String>,
    /// Display name stored with the record
    pub activity_name: Option<String>,
    /// Activity type stored with the record
    pub activity_type: Option<String>,
}

struct UploadedFile {
    file_name: String,
    bytes: Bytes,
}

/// Upload routes
pub struct UploadRoutes;

impl UploadRoutes {
    /// Create the upload routes with the configured body limit
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        let body_limit = resources
            .config
            .web
            .max_file_size
            .saturating_add(MULTIPART_OVERHEAD_BYTES);

        Router::new()
            .route("/upload", post(Self::handle_upload))
            .route("/upload/", post(Self::handle_upload))
            .layer(DefaultBodyLimit::max(body_limit))
            .with_state(resources)
    }

    async fn handle_upload(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        params: Result<Query<UploadParams>, QueryRejection>,
        multipart: Result<Multipart, MultipartRejection>,
    ) -> Result<Json<AnalysisReport>, AppError> {
        Self::analyze_upload(&resources, params, multipart)
            .await
            .map(Json)
            .map_err(|e| with_request_id(e, &headers))
    }

    async fn analyze_upload(
        resources: &ServerResources,
        params: Result<Query<UploadParams>, QueryRejection>,
        multipart: Result<Multipart, MultipartRejection>,
    ) -> AppResult<AnalysisReport> {
        let Query(params) = params.map_err(|e| AppError::invalid_input(e.body_text()))?;
        let mut multipart = multipart.map_err(|e| AppError::invalid_input(e.body_text()))?;

        let upload = Self::read_file_part(&mut multipart, &resources.config.web)
            .await?
            .ok_or_else(|| AppError::missing_field(FILE_PART))?;

        let file_size = upload.bytes.len();
        let threshold_power = params.threshold_power;
        let bytes = upload.bytes;
        let mut report =
            tokio::task::spawn_blocking(move || analyze_fit_bytes(&bytes, threshold_power))
                .await
                .map_err(|e| AppError::internal(format!("Analysis task failed: {e}")))?
                .map_err(|e| {
                    warn!(file = %upload.file_name, error = %e, "Failed to process upload");
                    AppError::invalid_format(format!("Error processing file: {}", e.message))
                        .with_resource_id(upload.file_name.clone())
                })?;

        info!(
            file = %upload.file_name,
            bytes = file_size,
            records = report.timestamps.len(),
            metrics = ?report.metrics.map(|m| m.status),
            "Analyzed upload"
        );

        if let Some(activity_id) = params.activity_id.filter(|id| !id.trim().is_empty()) {
            let request = RecordRequest {
                activity_id,
                activity_name: params.activity_name,
                activity_type: params.activity_type,
                file_path: Some(upload.file_name),
            };
            record_analysis(resources.recorder.as_ref(), &mut report, request).await?;
        }

        Ok(report)
    }

    /// Find the `file` part, checking its name and size
    async fn read_file_part(
        multipart: &mut Multipart,
        web: &WebConfig,
    ) -> AppResult<Option<UploadedFile>> {
        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            if field.name() != Some(FILE_PART) {
                continue;
            }

            let file_name = field.file_name().unwrap_or_default().to_owned();
            if !web.accepts_file_name(&file_name) {
                return Err(AppError::invalid_input(
                    "Invalid file type. Please upload a .fit file.",
                )
                .with_resource_id(file_name));
            }

            let bytes = field.bytes().await.map_err(multipart_error)?;
            if bytes.len() > web.max_file_size {
                return Err(payload_too_large(web.max_file_size));
            }

            return Ok(Some(UploadedFile { file_name, bytes }));
        }
        Ok(None)
    }
}

fn payload_too_large(limit: usize) -> AppError {
    AppError::new(
        ErrorCode::PayloadTooLarge,
        format!("File exceeds the maximum upload size of {limit} bytes"),
    )
}

fn multipart_error(error: MultipartError) -> AppError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::new(ErrorCode::PayloadTooLarge, error.body_text())
    } else {
        AppError::invalid_input(format!("Malformed multipart body: {}", error.body_text()))
    }
}
