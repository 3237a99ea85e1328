// ABOUTME: Server binary for the Daybook diary enrichment API
// ABOUTME: Loads configuration, warms up the models, opens the store, and serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Daybook Server Binary
//!
//! Starts the JSON HTTP API. Startup fails if the polisher warm-up or the
//! gazetteer load fails.

use anyhow::{Context, Result};
use clap::Parser;
use daybook::{config::environment::ServerConfig, logging, resources::ServerResources, routes};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

#[derive(Parser)]
#[command(name = "daybook-server")]
#[command(about = "Daybook - diary entries polished and enriched with nutrition and travel facts")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL (e.g. sqlite:diary.db)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration from environment
    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url {
        config.database.url = database_url;
    }

    logging::init_from_env()?;
    info!("{}", config.summary());

    let host = config.host.clone();
    let port = config.http_port;

    let resources = Arc::new(
        ServerResources::initialize(config)
            .await
            .context("Failed to initialize server resources")?,
    );
    let app = routes::router(resources);

    let listener = TcpListener::bind((host.as_str(), port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;

    display_available_endpoints(&host, port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Display all available API endpoints
#[allow(clippy::cognitive_complexity)]
fn display_available_endpoints(host: &str, port: u16) {
    info!("=== Available API Endpoints ===");
    info!("   Health:            GET    http://{host}:{port}/health");
    info!("   Readiness:         GET    http://{host}:{port}/ready");
    info!("   Submit Entry:      POST   http://{host}:{port}/api/entries");
    info!("   List Entries:      GET    http://{host}:{port}/api/entries");
    info!("   Entries By Day:    GET    http://{host}:{port}/api/entries/by-day?from=&to=");
    info!("   Entry:             GET    http://{host}:{port}/api/entries/{{id}}");
    info!("   Edit Entry:        PUT    http://{host}:{port}/api/entries/{{id}}");
    info!("   Delete Entry:      DELETE http://{host}:{port}/api/entries/{{id}}");
    info!("   Preview:           POST   http://{host}:{port}/api/preview");
    info!("=== End of Endpoint List ===");
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received terminate signal, shutting down"),
    }
}
