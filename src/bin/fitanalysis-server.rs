// ABOUTME: HTTP server binary for the FIT upload endpoint and chart page
// ABOUTME: Loads configuration once, opens the metadata store and serves until Ctrl-C
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # fitanalysis Server Binary
//!
//! Serves `GET /` (upload page), `POST /upload`, `GET /activities`,
//! `GET /health` and `GET /ready`.

use anyhow::Result;
use clap::Parser;
use fitanalysis::{
    config::ConfigLoader, database::MetadataStore, logging, resources::ServerResources, server,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "fitanalysis-server")]
#[command(about = "FIT activity analysis - upload endpoint and chart page")]
pub struct Args {
    /// Configuration file (YAML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override bind host
    #[arg(long)]
    host: Option<String>,

    /// Override HTTP port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ConfigLoader::new(args.config).load();
    if let Some(host) = args.host {
        config.web.host = host;
    }
    if let Some(port) = args.port {
        config.web.port = port;
    }

    logging::init(&config.logging)?;
    info!("Starting FIT analysis server");
    info!("{}", config.summary());

    let store = MetadataStore::new(&config.database).await?;
    let resources = Arc::new(ServerResources::new(config, Arc::new(store.clone())));

    let result = server::run(resources).await;
    store.close().await;

    if let Err(e) = &result {
        error!("Server error: {e:#}");
    }
    result
}
