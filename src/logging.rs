// ABOUTME: Structured logging setup on tracing-subscriber for the server and CLI
// ABOUTME: Applies the configured level, format and optional log file with noise reduction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Logging initialization
//!
//! `RUST_LOG`, when set, replaces the configured level. Chatty dependencies are
//! always capped so request and query logs stay readable.

use crate::config::{LogFormat, LoggingConfig};
use crate::constants::service::SERVICE_NAME;
use anyhow::{Context, Result};
use std::env;
use std::fs::OpenOptions;
use std::io;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{
    filter::Directive,
    fmt::{self, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Directives applied on top of any user-supplied filter
const NOISE_DIRECTIVES: [&str; 5] = [
    "hyper=warn",
    "hyper::proto=warn",
    "sqlx=warn",
    "sqlx::query=warn",
    "tower_http=info",
];

fn build_filter(config: &LoggingConfig) -> EnvFilter {
    let base = env::var("RUST_LOG").map_or_else(
        |_| EnvFilter::new(&config.level),
        |directive| EnvFilter::new(&directive),
    );

    NOISE_DIRECTIVES
        .iter()
        .filter_map(|directive| directive.parse::<Directive>().ok())
        .fold(base, EnvFilter::add_directive)
}

fn build_writer(config: &LoggingConfig) -> Result<BoxMakeWriter> {
    match &config.file_path {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Ok(BoxMakeWriter::new(Arc::new(file)))
        }
        None => Ok(BoxMakeWriter::new(io::stdout)),
    }
}

/// Initialize the global tracing subscriber
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a global subscriber
/// is already installed
pub fn init(config: &LoggingConfig) -> Result<()> {
    let registry = tracing_subscriber::registry().with(build_filter(config));
    let writer = build_writer(config)?;
    let ansi = config.file_path.is_none();

    match config.format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_file(config.include_location)
                    .with_line_number(config.include_location)
                    .with_target(true)
                    .with_writer(writer),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_file(config.include_location)
                    .with_line_number(config.include_location)
                    .with_target(true)
                    .with_ansi(ansi)
                    .with_writer(writer),
            )
            .try_init(),
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_ansi(ansi)
                    .with_writer(writer),
            )
            .try_init(),
    }
    .context("Failed to install tracing subscriber")?;

    info!(
        service.name = SERVICE_NAME,
        service.version = env!("CARGO_PKG_VERSION"),
        log.level = %config.level,
        log.format = ?config.format,
        log.file = ?config.file_path,
        "Logging initialized"
    );

    Ok(())
}
