// ABOUTME: Web server configuration for the upload endpoint and chart page
// ABOUTME: Bind address, upload size limit and accepted file extensions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::env_var_parse;
use crate::constants::{defaults, env_vars};
use serde::{Deserialize, Serialize};
use std::env;

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Largest accepted upload body in bytes
    pub max_file_size: usize,
    /// Accepted upload extensions, with leading dot
    pub allowed_extensions: Vec<String>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: defaults::WEB_HOST.to_owned(),
            port: defaults::WEB_PORT,
            max_file_size: defaults::MAX_FILE_SIZE,
            allowed_extensions: vec![defaults::FIT_EXTENSION.to_owned()],
        }
    }
}

impl WebConfig {
    /// Load web configuration from environment
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env::var(env_vars::WEB_HOST).unwrap_or(defaults.host),
            port: env_var_parse(env_vars::WEB_PORT, defaults.port),
            max_file_size: env_var_parse(env_vars::MAX_FILE_SIZE, defaults.max_file_size),
            allowed_extensions: env::var(env_vars::ALLOWED_EXTENSIONS).map_or(
                defaults.allowed_extensions,
                |raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|ext| !ext.is_empty())
                        .map(str::to_owned)
                        .collect()
                },
            ),
        }
    }

    /// `host:port` bind address
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether `file_name` ends with one of the accepted extensions
    ///
    /// Comparison is case-insensitive; extensions may be configured with or
    /// without the leading dot.
    #[must_use]
    pub fn accepts_file_name(&self, file_name: &str) -> bool {
        let lower = file_name.to_ascii_lowercase();
        self.allowed_extensions.iter().any(|ext| {
            let ext = ext.trim_start_matches('.').to_ascii_lowercase();
            !ext.is_empty() && lower.ends_with(&format!(".{ext}"))
        })
    }
}
