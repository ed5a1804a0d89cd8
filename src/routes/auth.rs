// ABOUTME: Route handlers for registration and login
// ABOUTME: bcrypt password hashing and JWT issuance
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Authentication routes

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::ServerResources;
use crate::errors::AppError;
use crate::models::User;

/// Username length bounds enforced at registration
const USERNAME_MIN_LENGTH: usize = 3;
const USERNAME_MAX_LENGTH: usize = 30;

/// Minimum password length enforced at registration
const PASSWORD_MIN_LENGTH: usize = 8;

/// Registration request payload
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Unique handle
    pub username: String,
    /// Email address
    pub email: String,
    /// Plaintext password, hashed before storage
    pub password: String,
    /// Preferred language for emails, defaults to `en`
    pub language: Option<String>,
}

/// Login request payload
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email address
    pub email: String,
    /// Plaintext password
    pub password: String,
}

/// Password reset request payload
#[derive(Debug, Deserialize)]
pub struct PasswordResetRequest {
    /// Email address of the account
    pub email: String,
}

/// Response carrying a fresh JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthTokenResponse {
    /// Response status
    pub status: String,
    /// Bearer token for subsequent requests
    pub auth_token: String,
}

/// Authentication route handlers
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/auth/register", post(Self::handle_register))
            .route("/api/auth/login", post(Self::handle_login))
            .route(
                "/api/auth/password/reset-request",
                post(Self::handle_password_reset_request),
            )
            .with_state(resources)
    }

    /// Handle POST /api/auth/register - Create an account
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<RegisterRequest>,
    ) -> Result<Response, AppError> {
        let username = body.username.trim();
        if username.len() < USERNAME_MIN_LENGTH || username.len() > USERNAME_MAX_LENGTH {
            return Err(AppError::invalid_input(format!(
                "username: {USERNAME_MIN_LENGTH} to {USERNAME_MAX_LENGTH} characters required"
            )));
        }
        if !body.email.contains('@') {
            return Err(AppError::invalid_input("email: valid email must be provided"));
        }
        if body.password.len() < PASSWORD_MIN_LENGTH {
            return Err(AppError::invalid_input(format!(
                "password: {PASSWORD_MIN_LENGTH} characters required"
            )));
        }

        let password_hash = bcrypt::hash(&body.password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;

        let mut user = User::new(username, &body.email, &password_hash);
        if let Some(language) = body.language {
            user.language = language;
        }
        resources.database.create_user(&user).await?;

        let auth_token = resources.auth.generate_token(&user)?;
        let response = AuthTokenResponse {
            status: "created".to_owned(),
            auth_token,
        };
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle POST /api/auth/login - Exchange credentials for a JWT
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<LoginRequest>,
    ) -> Result<Response, AppError> {
        let invalid = || AppError::auth_invalid("invalid credentials");

        let user = resources
            .database
            .get_user_by_email(&body.email)
            .await?
            .filter(|u| u.is_active)
            .ok_or_else(invalid)?;

        let valid = bcrypt::verify(&body.password, &user.password_hash)
            .map_err(|e| AppError::internal(format!("Failed to verify password: {e}")))?;
        if !valid {
            return Err(invalid());
        }

        let auth_token = resources.auth.generate_token(&user)?;
        let response = AuthTokenResponse {
            status: "success".to_owned(),
            auth_token,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /api/auth/password/reset-request - Render the reset email
    ///
    /// Always answers 200, whether or not the account exists, so the
    /// endpoint cannot be used to probe for registered addresses. Mail
    /// delivery is left to the deployment; the rendered subject is
    /// logged here.
    async fn handle_password_reset_request(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<PasswordResetRequest>,
    ) -> Result<Response, AppError> {
        if let Some(user) = resources
            .database
            .get_user_by_email(&body.email)
            .await?
            .filter(|u| u.is_active)
        {
            let reset_token = resources.auth.generate_token(&user)?;
            let data = HashMap::from([
                ("username".to_owned(), user.username.clone()),
                (
                    "password_reset_url".to_owned(),
                    format!(
                        "{}/password-reset?token={reset_token}",
                        resources.config.base_url
                    ),
                ),
                (
                    "fittrackee_url".to_owned(),
                    resources.config.base_url.clone(),
                ),
            ]);
            let email = resources.email_template.render_email(
                "password_reset_request",
                &user.language,
                &data,
            )?;
            info!(
                email = %user.email,
                subject = %email.subject,
                "password reset email rendered"
            );
        }

        Ok((
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "success",
                "message": "password reset request processed",
            })),
        )
            .into_response())
    }
}
