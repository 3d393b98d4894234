// ABOUTME: Configuration commands for fitanalysis-cli
// ABOUTME: Prints the effective configuration or writes defaults to a file
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use fitanalysis::{
    config::FitAnalysisConfig,
    errors::{AppError, AppResult},
};
use std::path::Path;

/// Print `config` as YAML
pub fn show(config: &FitAnalysisConfig) -> AppResult<()> {
    let yaml = serde_yaml::to_string(config)
        .map_err(|e| AppError::config(format!("Failed to render configuration: {e}")))?;
    print!("{yaml}");
    Ok(())
}

/// Write the default configuration to `path`
pub fn init(path: &Path, force: bool) -> AppResult<()> {
    if path.exists() && !force {
        return Err(AppError::new(
            fitanalysis::errors::ErrorCode::ResourceAlreadyExists,
            format!("{} already exists (use --force to overwrite)", path.display()),
        ));
    }

    FitAnalysisConfig::default().save_to_file(path)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}
