// ABOUTME: Main server binary for the FitTrackee API
// ABOUTME: Loads configuration, connects the database and serves the REST routes
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use fittrackee_server::config::environment::ServerConfig;
use fittrackee_server::database::Database;
use fittrackee_server::logging::LoggingConfig;
use fittrackee_server::routes::{self, ServerResources};

#[derive(Parser)]
#[command(
    name = "fittrackee-server",
    about = "FitTrackee API server",
    long_about = "Self-hosted fitness tracker API. Configuration comes from \
                  environment variables (JWT_SECRET, DATABASE_URL, HTTP_PORT, \
                  BASE_URL, FEDERATION_ENABLED)."
)]
struct Args {
    /// Override the HTTP listen port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    LoggingConfig::from_env().init()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(port) = args.port {
        config.http_port = port;
    }

    let database = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    info!(database_url = %config.database_url, "database ready");

    let port = config.http_port;
    let resources = Arc::new(ServerResources::new(database, config));
    let app = routes::router(resources);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("Failed to bind port {port}"))?;
    info!(port, "FitTrackee server listening");

    axum::serve(listener, app)
        .await
        .context("Server terminated unexpectedly")?;

    Ok(())
}
