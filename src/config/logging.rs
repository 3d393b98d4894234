// ABOUTME: Logging configuration types for level, output format and log file
// ABOUTME: Consumed by crate::logging to build the tracing subscriber
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::{defaults, env_vars};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// `JSON` format for production logging
    Json,
    /// Pretty format for development
    #[default]
    Pretty,
    /// Compact format for space-constrained environments
    Compact,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            other => Err(format!(
                "Unknown log format '{other}'. Valid options: json, pretty, compact"
            )),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Append to this file instead of writing to stdout
    pub file_path: Option<PathBuf>,
    /// Include source file and line numbers
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_owned(),
            format: LogFormat::default(),
            file_path: None,
            include_location: false,
        }
    }
}

impl LoggingConfig {
    /// Load logging configuration from environment
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let format = match env::var(env_vars::LOG_FORMAT) {
            Ok(raw) => raw.parse().unwrap_or_else(|e: String| {
                tracing::warn!("{e}; using {:?}", defaults.format);
                defaults.format
            }),
            Err(_) => defaults.format,
        };

        Self {
            level: env::var(env_vars::LOG_LEVEL)
                .map_or(defaults.level, |level| level.to_ascii_lowercase()),
            format,
            file_path: env::var(env_vars::LOG_FILE).ok().map(PathBuf::from),
            include_location: env::var("LOG_INCLUDE_LOCATION").is_ok(),
        }
    }
}
