// ABOUTME: Route module organization for the FIT analysis HTTP endpoints
// ABOUTME: Each domain module holds route definitions and thin handlers over the service layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! HTTP routes
//!
//! Handlers stay thin: decoding and metrics live in [`crate::services`],
//! persistence behind [`crate::database::MetadataRecorder`].

/// Recorded activity listing
pub mod activities;
/// Liveness and readiness
pub mod health;
/// Static upload and chart page
pub mod index;
/// FIT upload and analysis
pub mod upload;

pub use activities::ActivityRoutes;
pub use health::HealthRoutes;
pub use index::IndexRoutes;
pub use upload::{UploadParams, UploadRoutes};

use crate::errors::AppError;
use axum::http::HeaderMap;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Tag `error` with the request id assigned by the request-id layer
pub(crate) fn with_request_id(error: AppError, headers: &HeaderMap) -> AppError {
    match headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
    {
        Some(request_id) => error.with_request_id(request_id),
        None => error,
    }
}
