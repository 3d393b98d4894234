// ABOUTME: Main library entry point for FIT activity analysis
// ABOUTME: FIT decoding, power metrics reports, metadata store and the upload HTTP API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # fitanalysis
//!
//! Loads Garmin FIT activity files, extracts heart-rate and power series, and
//! computes Normalized Power, Intensity Factor and Training Stress Score.
//! Results are served through an upload endpoint with a small chart page and
//! can be recorded in a local `SQLite` metadata store.
//!
//! ## Architecture
//!
//! - **fit**: `fitparser`-backed decoding into sparse records
//! - **services**: analysis reports shared by the server and the CLI
//! - **database**: metadata store behind the `MetadataRecorder` trait
//! - **routes** / **server**: axum handlers and router assembly
//! - **config** / **logging**: explicit configuration and `tracing` setup
//!
//! The numeric pipeline lives in the `fitanalysis-intelligence` crate; shared
//! errors and models in `fitanalysis-core`.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use fitanalysis::fit::FitDataLoader;
//! use fitanalysis::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let activity = FitDataLoader::new("ride.fit")?.load()?;
//!     let metrics = activity.metrics(250.0);
//!     println!("NP={:?} IF={:?} TSS={:?}", metrics.normalized_power,
//!              metrics.intensity_factor, metrics.tss);
//!     Ok(())
//! }
//! ```

/// Application constants
pub use fitanalysis_core::constants;

/// Unified error handling
pub use fitanalysis_core::errors;

/// Record models
pub use fitanalysis_core::models;

/// Configuration loading and typed sections
pub mod config;

/// `SQLite` metadata store
pub mod database;

/// FIT decoding and file loading
pub mod fit;

/// Structured logging setup
pub mod logging;

/// Shared resources for HTTP handlers
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// Router assembly and serving
pub mod server;

/// Analysis service layer
pub mod services;
