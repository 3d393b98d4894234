// ABOUTME: HTTP server assembly for the upload endpoint, chart page and activity listing
// ABOUTME: Merges domain routes, applies tracing/request-id/timeout layers and serves with axum
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::resources::ServerResources;
use crate::routes::{ActivityRoutes, HealthRoutes, IndexRoutes, UploadRoutes};
use anyhow::{Context, Result};
use axum::{http::StatusCode, Router};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Upper bound on a single request, upload and analysis included
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Build the application router
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .merge(IndexRoutes::routes())
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(UploadRoutes::routes(Arc::clone(&resources)))
        .merge(ActivityRoutes::routes(resources))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            REQUEST_TIMEOUT,
        ))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// Bind the configured address and serve until Ctrl-C
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails
pub async fn run(resources: Arc<ServerResources>) -> Result<()> {
    let address = resources.config.web.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    info!("FIT analysis server listening on http://{address}");

    axum::serve(listener, build_router(resources))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
