// ABOUTME: Configuration management for the database, web server and logging sections
// ABOUTME: Loads from YAML/JSON files or environment variables and passes values explicitly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! [`FitAnalysisConfig`] groups the three sections the binaries need. It is
//! loaded once at startup (see [`ConfigLoader`]) and handed to the components
//! that use it; nothing reads configuration from process-wide state later on.

/// Metadata store configuration
pub mod database;
/// Logging configuration
pub mod logging;
/// Web server configuration
pub mod network;

pub use database::DatabaseConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use network::WebConfig;

use crate::errors::{AppError, AppResult, ErrorCode};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{error, info, warn};

/// Read and parse an environment variable, falling back to `default`
///
/// Unparseable values are logged and ignored.
pub(crate) fn env_var_parse<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Invalid value '{raw}' for {key}; using default {default}");
            default
        }),
        Err(_) => default,
    }
}

/// Read a boolean environment variable, accepting `true`/`false` in any case
pub(crate) fn env_var_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "true" => true,
            "false" => false,
            _ => {
                warn!("Invalid value '{raw}' for {key}; using default {default}");
                default
            }
        },
        Err(_) => default,
    }
}

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Yaml,
    Json,
}

impl FileFormat {
    fn from_path(path: &Path) -> AppResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            other => Err(AppError::new(
                ErrorCode::ConfigInvalid,
                format!(
                    "Unsupported config file format: {}",
                    other.map_or_else(|| "<none>".to_owned(), |ext| format!(".{ext}"))
                ),
            )),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitAnalysisConfig {
    /// Metadata store
    pub database: DatabaseConfig,
    /// Upload endpoint and chart page
    pub web: WebConfig,
    /// Logging
    pub logging: LoggingConfig,
}

impl FitAnalysisConfig {
    /// Load configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            database: DatabaseConfig::from_env(),
            web: WebConfig::from_env(),
            logging: LoggingConfig::from_env(),
        }
    }

    /// Load configuration from a YAML or JSON file
    ///
    /// Sections and keys missing from the file take their defaults.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the extension is unsupported, the file
    /// cannot be read, or its contents do not parse
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let format = FileFormat::from_path(path)?;
        let contents = fs::read_to_string(path).map_err(|e| {
            AppError::config(format!("Failed to read config file {}: {e}", path.display()))
                .with_source(e)
        })?;

        let parse_error = |message: String| {
            AppError::new(
                ErrorCode::ConfigInvalid,
                format!("Failed to parse config file {}: {message}", path.display()),
            )
        };

        match format {
            FileFormat::Yaml => {
                serde_yaml::from_str(&contents).map_err(|e| parse_error(e.to_string()))
            }
            FileFormat::Json => {
                serde_json::from_str(&contents).map_err(|e| parse_error(e.to_string()))
            }
        }
    }

    /// Write the configuration to a YAML or JSON file
    ///
    /// # Errors
    ///
    /// Returns a configuration error for unsupported extensions or write failures
    pub fn save_to_file(&self, path: &Path) -> AppResult<()> {
        let contents = match FileFormat::from_path(path)? {
            FileFormat::Yaml => serde_yaml::to_string(self)
                .map_err(|e| AppError::config(format!("Failed to serialize config: {e}")))?,
            FileFormat::Json => serde_json::to_string_pretty(self)?,
        };

        fs::write(path, contents).map_err(|e| {
            AppError::config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
            .with_source(e)
        })?;

        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// One-line summary for startup logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "database={} read_only={} bind={} max_file_size={} extensions={:?} log_level={}",
            self.database.path.display(),
            self.database.read_only,
            self.web.bind_address(),
            self.web.max_file_size,
            self.web.allowed_extensions,
            self.logging.level,
        )
    }
}

/// Resolves which configuration source to use
///
/// An explicit path wins; otherwise the first existing file among the search
/// paths is used; otherwise the environment. A missing explicit file, or a
/// file that fails to load, yields defaults with a logged warning or error.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    explicit_path: Option<PathBuf>,
    search_paths: Vec<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ConfigLoader {
    /// Loader for an optional explicit path, with the default search paths
    #[must_use]
    pub fn new(explicit_path: Option<PathBuf>) -> Self {
        Self {
            explicit_path,
            search_paths: Self::default_search_paths(),
        }
    }

    /// Replace the search paths used when no explicit path is given
    #[must_use]
    pub fn with_search_paths(mut self, search_paths: Vec<PathBuf>) -> Self {
        self.search_paths = search_paths;
        self
    }

    /// Working-directory, `config/` and home-directory candidates
    #[must_use]
    pub fn default_search_paths() -> Vec<PathBuf> {
        let names = ["fitanalysis.yaml", "fitanalysis.yml", "fitanalysis.json"];

        let mut paths: Vec<PathBuf> = names.iter().map(PathBuf::from).collect();
        paths.extend(names.iter().map(|name| Path::new("config").join(name)));
        if let Some(home) = dirs::home_dir() {
            paths.extend(names.iter().map(|name| home.join(format!(".{name}"))));
        }
        paths
    }

    /// Resolve and load the configuration
    #[must_use]
    pub fn load(&self) -> FitAnalysisConfig {
        if let Some(path) = &self.explicit_path {
            if !path.exists() {
                warn!(
                    "Config file {} not found. Using default configuration.",
                    path.display()
                );
                return FitAnalysisConfig::default();
            }
            return Self::load_file_or_default(path);
        }

        if let Some(path) = self.search_paths.iter().find(|path| path.exists()) {
            info!("Found config file at {}, loading.", path.display());
            return Self::load_file_or_default(path);
        }

        info!("No config file found. Loading from environment variables.");
        FitAnalysisConfig::from_env()
    }

    fn load_file_or_default(path: &Path) -> FitAnalysisConfig {
        FitAnalysisConfig::from_file(path).unwrap_or_else(|e| {
            error!("Error loading config file {}: {e}", path.display());
            info!("Using default configuration.");
            FitAnalysisConfig::default()
        })
    }
}
