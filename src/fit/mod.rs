// ABOUTME: FIT file decoding and loading
// ABOUTME: Turns FIT bytes or files into records for the metrics engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// fitparser-backed decoding of record messages
pub mod decoder;
/// File loader and decoded activity wrapper
pub mod loader;

pub use decoder::{decode_fit_bytes, records_from_messages};
pub use loader::{ActivityData, FitDataLoader};
