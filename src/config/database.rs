// ABOUTME: Metadata database configuration for the SQLite activity store
// ABOUTME: Resolves the database path into a sqlx connection string
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::env_var_bool;
use crate::constants::{defaults, env_vars};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Metadata store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` file path, or `:memory:`
    pub path: PathBuf,
    /// Open the store without write access
    pub read_only: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(defaults::DATABASE_PATH),
            read_only: false,
        }
    }
}

impl DatabaseConfig {
    /// Load database configuration from environment
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            path: env::var(env_vars::DB_PATH).map_or(defaults.path, PathBuf::from),
            read_only: env_var_bool(env_vars::DB_READ_ONLY, defaults.read_only),
        }
    }

    /// Whether this configuration points at an in-memory database
    #[must_use]
    pub fn is_memory(&self) -> bool {
        self.path.as_os_str() == ":memory:"
    }

    /// sqlx connection string
    #[must_use]
    pub fn connection_string(&self) -> String {
        if self.is_memory() {
            "sqlite::memory:".to_owned()
        } else {
            format!("sqlite:{}", self.path.display())
        }
    }
}
