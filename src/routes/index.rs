// ABOUTME: Serves the static upload and chart page
// ABOUTME: The page posts a FIT file to /upload and plots the returned series
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use axum::{response::Html, routing::get, Router};

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// Upload page route
pub struct IndexRoutes;

impl IndexRoutes {
    /// Create the `GET /` route
    pub fn routes() -> Router {
        Router::new().route("/", get(Self::handle_index))
    }

    async fn handle_index() -> Html<&'static str> {
        Html(INDEX_HTML)
    }
}
