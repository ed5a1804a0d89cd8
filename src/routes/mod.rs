// ABOUTME: Route module organization for the FitTrackee HTTP API
// ABOUTME: Shared server resources and the top-level router assembly
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Route modules
//!
//! Each domain module contains route definitions and thin handler
//! functions that delegate to the database layer. Handlers receive the
//! shared [`ServerResources`] through axum state.

/// Authentication routes (registration and login)
pub mod auth;
/// Workout comment routes
pub mod comments;
/// Follow request routes
pub mod follows;

pub use auth::AuthRoutes;
pub use comments::CommentRoutes;
pub use follows::FollowRoutes;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::database::Database;
use crate::emails::EmailTemplate;

/// Shared state handed to every route handler
pub struct ServerResources {
    /// Database connection pool
    pub database: Database,
    /// JWT issuance and validation
    pub auth: AuthManager,
    /// Server configuration
    pub config: ServerConfig,
    /// Localized email template resolver
    pub email_template: EmailTemplate,
}

impl ServerResources {
    /// Bundle the shared state for the router
    #[must_use]
    pub fn new(database: Database, config: ServerConfig) -> Self {
        Self {
            database,
            auth: AuthManager::new(&config.jwt_secret),
            config,
            email_template: EmailTemplate::new(),
        }
    }
}

/// Build the full application router
#[must_use]
pub fn router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .route("/api/ping", get(handle_ping))
        .merge(AuthRoutes::routes(resources.clone()))
        .merge(FollowRoutes::routes(resources.clone()))
        .merge(CommentRoutes::routes(resources))
        .layer(TraceLayer::new_for_http())
}

/// Handle GET /api/ping - liveness check
async fn handle_ping() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "success"})))
}
