// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables and runtime configuration parsing
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Environment-based configuration management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use tracing::warn;

const DEFAULT_HTTP_PORT: u16 = 5000;
const DEFAULT_DATABASE_URL: &str = "sqlite:fittrackee.db";
const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Server configuration loaded from environment variables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP listen port (`HTTP_PORT`)
    pub http_port: u16,
    /// SQLite database URL (`DATABASE_URL`)
    pub database_url: String,
    /// JWT signing secret (`JWT_SECRET`, required outside tests)
    pub jwt_secret: String,
    /// Public base URL of this instance (`BASE_URL`), used for
    /// federation actor and object ids
    pub base_url: String,
    /// Whether federation payloads are generated (`FEDERATION_ENABLED`)
    pub federation_enabled: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `JWT_SECRET` is missing or a variable fails
    /// to parse
    pub fn from_env() -> Result<Self> {
        let http_port = match env::var("HTTP_PORT") {
            Ok(value) => value
                .parse()
                .with_context(|| format!("Invalid HTTP_PORT: {value}"))?,
            Err(_) => DEFAULT_HTTP_PORT,
        };

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_owned());

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;

        let base_url = env::var("BASE_URL").unwrap_or_else(|_| {
            warn!("BASE_URL not set, defaulting to {DEFAULT_BASE_URL}");
            DEFAULT_BASE_URL.to_owned()
        });

        let federation_enabled = env::var("FEDERATION_ENABLED")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            http_port,
            database_url,
            jwt_secret,
            base_url,
            federation_enabled,
        })
    }

    /// Configuration suitable for tests: in-memory database, fixed
    /// secret, federation enabled
    #[must_use]
    pub fn for_tests() -> Self {
        Self {
            http_port: 0,
            database_url: "sqlite::memory:".to_owned(),
            jwt_secret: "test-jwt-secret".to_owned(),
            base_url: "https://example.com".to_owned(),
            federation_enabled: true,
        }
    }
}
