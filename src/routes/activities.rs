// ABOUTME: Route handlers listing activities recorded in the metadata store
// ABOUTME: Read-only views over the recorder shared with the upload endpoint
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::database::ActivityRow;
use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::routes::with_request_id;
use axum::{
    extract::{Path, State},
    http::HeaderMap,
    routing::get,
    Json, Router,
};
use std::sync::Arc;

/// Recorded activity routes
pub struct ActivityRoutes;

impl ActivityRoutes {
    /// Create all activity routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/activities", get(Self::handle_list_activities))
            .route("/activities/:activity_id", get(Self::handle_get_activity))
            .with_state(resources)
    }

    async fn handle_list_activities(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Json<Vec<ActivityRow>>, AppError> {
        let rows = resources
            .recorder
            .list_activities()
            .await
            .map_err(|e| with_request_id(e, &headers))?;
        Ok(Json(rows))
    }

    async fn handle_get_activity(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(activity_id): Path<String>,
    ) -> Result<Json<ActivityRow>, AppError> {
        resources
            .recorder
            .get_activity(&activity_id)
            .await
            .and_then(|row| {
                row.ok_or_else(|| {
                    AppError::not_found(format!("Activity {activity_id}"))
                        .with_resource_id(activity_id.clone())
                })
            })
            .map(Json)
            .map_err(|e| with_request_id(e, &headers))
    }
}
