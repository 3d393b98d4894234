// ABOUTME: fitanalysis CLI - analyze FIT files, list recorded activities, manage configuration
// ABOUTME: Shares the analysis service and metadata store with the HTTP server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Analyze a ride against a 250 W threshold
//! fitanalysis-cli analyze ride.fit --threshold-power 250
//!
//! # Analyze and record it in the metadata store
//! fitanalysis-cli analyze ride.fit --threshold-power 250 --record --name "Morning ride"
//!
//! # List recorded activities as JSON
//! fitanalysis-cli activities list --json
//!
//! # Print the effective configuration, or write the defaults to a file
//! fitanalysis-cli config show
//! fitanalysis-cli config init fitanalysis.yaml
//! ```

mod commands;
mod helpers;

use anyhow::Result;
use clap::{Parser, Subcommand};
use fitanalysis::config::ConfigLoader;
use std::path::PathBuf;
use tracing::debug;

use commands::analyze::AnalyzeArgs;

#[derive(Parser)]
#[command(
    name = "fitanalysis-cli",
    about = "FIT activity analysis CLI",
    long_about = "Analyze Garmin FIT files (Normalized Power, Intensity Factor, TSS) and manage the local activity metadata store."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Configuration file (YAML or JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Metadata database path override
    #[arg(long, global = true)]
    database_path: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Analyze a FIT file
    Analyze(AnalyzeArgs),

    /// Recorded activity commands
    Activities {
        #[command(subcommand)]
        action: ActivitiesCommand,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum ActivitiesCommand {
    /// List recorded activities
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective configuration as YAML
    Show,

    /// Write the default configuration to a YAML or JSON file
    Init {
        /// Destination path (.yaml, .yml or .json)
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so --json output stays machine-readable
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    let mut config = ConfigLoader::new(cli.config).load();
    if let Some(path) = cli.database_path {
        config.database.path = path;
    }
    debug!("Effective configuration: {}", config.summary());

    match cli.command {
        Command::Analyze(args) => commands::analyze::run(&config.database, args).await?,
        Command::Activities { action } => match action {
            ActivitiesCommand::List { json } => {
                commands::activities::list(&config.database, json).await?;
            }
        },
        Command::Config { action } => match action {
            ConfigCommand::Show => commands::config::show(&config)?,
            ConfigCommand::Init { path, force } => commands::config::init(&path, force)?,
        },
    }

    Ok(())
}
