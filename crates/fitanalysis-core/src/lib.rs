// ABOUTME: Core types and constants for the fitanalysis workspace
// ABOUTME: Foundation crate with error handling, record models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # fitanalysis core
//!
//! Shared types for the FIT analysis workspace. This crate is designed to
//! change infrequently so the metrics engine and the server compile
//! independently.
//!
//! ## Modules
//!
//! - **errors**: `AppError`, `ErrorCode` and the JSON error body
//! - **constants**: defaults, environment variable names, formats
//! - **models**: `Record` and the closed `RecordField` enumeration

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Activity record models
pub mod models;
