// ABOUTME: Liveness and readiness routes for the FIT analysis server
// ABOUTME: Readiness pings the metadata recorder so a closed or broken store reports 503
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::service::SERVICE_NAME;
use crate::resources::ServerResources;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::warn;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create the liveness and readiness routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(Self::handle_health))
            .route("/ready", get(Self::handle_ready))
            .with_state(resources)
    }

    async fn handle_health() -> Json<Value> {
        Json(json!({
            "status": "healthy",
            "service": SERVICE_NAME,
            "version": env!("CARGO_PKG_VERSION"),
        }))
    }

    async fn handle_ready(
        State(resources): State<Arc<ServerResources>>,
    ) -> (StatusCode, Json<Value>) {
        match resources.recorder.ping().await {
            Ok(()) => (
                StatusCode::OK,
                Json(json!({ "status": "ready", "database": "ok" })),
            ),
            Err(e) => {
                warn!(error = %e, "Metadata store is not answering");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(json!({ "status": "not_ready", "database": e.message })),
                )
            }
        }
    }
}
