// ABOUTME: Application-wide constants for defaults, formats, and service identification
// ABOUTME: Shared by configuration, the FIT loader, the metadata store and the upload endpoint
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Service identification used in logs and health responses
pub mod service {
    /// Service name
    pub const SERVICE_NAME: &str = "fitanalysis";
}

/// Default configuration values
pub mod defaults {
    /// Default `SQLite` metadata database file
    pub const DATABASE_PATH: &str = "fit_metadata.db";

    /// Default bind address
    pub const WEB_HOST: &str = "127.0.0.1";

    /// Default HTTP port
    pub const WEB_PORT: u16 = 8000;

    /// Default upload size limit (100 MiB)
    pub const MAX_FILE_SIZE: usize = 100 * 1024 * 1024;

    /// Default accepted upload extension
    pub const FIT_EXTENSION: &str = ".fit";

    /// Default log level
    pub const LOG_LEVEL: &str = "info";
}

/// Environment variable names read by `FitAnalysisConfig::from_env`
pub mod env_vars {
    /// Metadata database path
    pub const DB_PATH: &str = "FITANALYSIS_DB_PATH";
    /// Open the metadata database read-only
    pub const DB_READ_ONLY: &str = "FITANALYSIS_DB_READ_ONLY";
    /// Bind address
    pub const WEB_HOST: &str = "FITANALYSIS_WEB_HOST";
    /// HTTP port
    pub const WEB_PORT: &str = "FITANALYSIS_WEB_PORT";
    /// Upload size limit in bytes
    pub const MAX_FILE_SIZE: &str = "FITANALYSIS_MAX_FILE_SIZE";
    /// Comma-separated accepted extensions
    pub const ALLOWED_EXTENSIONS: &str = "FITANALYSIS_ALLOWED_EXTENSIONS";
    /// Log level
    pub const LOG_LEVEL: &str = "FITANALYSIS_LOG_LEVEL";
    /// Log format (pretty, json, compact)
    pub const LOG_FORMAT: &str = "FITANALYSIS_LOG_FORMAT";
    /// Append logs to this file instead of stdout
    pub const LOG_FILE: &str = "FITANALYSIS_LOG_FILE";
}

/// Formats used when rendering series for the chart page
pub mod formats {
    /// Timestamp format of the `timestamps` array in upload responses
    pub const CHART_TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S";
}
