// ABOUTME: Main library entry point for the FitTrackee server
// ABOUTME: Workout comments with tiered visibility, federation payloads and localized emails
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

#![deny(unsafe_code)]

//! # FitTrackee Server
//!
//! A self-hosted fitness tracker service. Users record workouts,
//! comment on each other's workouts under a tiered visibility model,
//! and follow each other through approval-gated requests. Objects at a
//! federable visibility level are serialized as ActivityStreams
//! activities for delivery to remote instances.
//!
//! ## Architecture
//!
//! - **Models**: Users, workouts, comments, follow requests and the
//!   visibility predicate
//! - **Database**: SQLite storage via sqlx, one submodule per domain
//! - **Routes**: axum REST handlers organized by domain
//! - **Federation**: ActivityStreams serialization for comments
//! - **Emails**: Localized template resolution and rendering
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use fittrackee_server::config::environment::ServerConfig;
//! use fittrackee_server::errors::AppResult;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("FitTrackee server configured with port: {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// JWT issuance and validation
pub mod auth;

/// Environment-based configuration management
pub mod config;

/// SQLite storage via sqlx
pub mod database;

/// Localized email template resolution and rendering
pub mod emails;

/// Unified error handling
pub mod errors;

/// ActivityStreams serialization for federated objects
pub mod federation;

/// Structured logging setup
pub mod logging;

/// Domain models
pub mod models;

/// HTTP route handlers
pub mod routes;

/// Factories for tests
pub mod test_utils;
