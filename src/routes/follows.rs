// ABOUTME: Route handlers for follow requests
// ABOUTME: Sending, accepting and rejecting requests addressed by username
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Follow request routes
//!
//! Follows are directional and approval-gated: followers-level
//! visibility only unlocks once the followed user accepts.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;

use super::ServerResources;
use crate::errors::AppError;
use crate::models::{FollowRequest, FollowRequestStatus, User};

/// Follow request route handlers
pub struct FollowRoutes;

impl FollowRoutes {
    /// Create all follow routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/users/:username/follow", post(Self::handle_follow))
            .route(
                "/api/follow-requests/:username/accept",
                post(Self::handle_accept),
            )
            .route(
                "/api/follow-requests/:username/reject",
                post(Self::handle_reject),
            )
            .with_state(resources)
    }

    async fn user_by_username(
        resources: &Arc<ServerResources>,
        username: &str,
    ) -> Result<User, AppError> {
        resources
            .database
            .get_user_by_username(username)
            .await?
            .ok_or_else(|| AppError::not_found(format!("user not found (username: {username})")))
    }

    /// Handle POST /api/users/:username/follow - Send a follow request
    async fn handle_follow(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(username): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth.authenticate(&headers)?;
        let followed = Self::user_by_username(&resources, &username).await?;

        if followed.id == auth.user_id {
            return Err(AppError::invalid_input("users cannot follow themselves"));
        }

        let existing = resources
            .database
            .get_follow_request(auth.user_id, followed.id)
            .await?;
        if existing.is_some() {
            return Err(AppError::invalid_input(format!(
                "Follow request to user '{username}' already exists."
            )));
        }

        let request = FollowRequest::new(auth.user_id, followed.id);
        resources.database.create_follow_request(&request).await?;

        Ok((
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "message": format!("Follow request to user '{username}' is sent."),
            })),
        )
            .into_response())
    }

    /// Look up the pending request from `username` to the authenticated
    /// user and move it to `status`
    async fn decide(
        resources: &Arc<ServerResources>,
        headers: &HeaderMap,
        username: &str,
        status: FollowRequestStatus,
    ) -> Result<Response, AppError> {
        let auth = resources.auth.authenticate(headers)?;
        let follower = Self::user_by_username(resources, username).await?;

        let request = resources
            .database
            .get_follow_request(follower.id, auth.user_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!(
                    "Follow request from user '{username}' not found."
                ))
            })?;

        if request.status != FollowRequestStatus::Pending {
            return Err(AppError::invalid_input(format!(
                "Follow request from user '{username}' already {}.",
                request.status
            )));
        }

        resources
            .database
            .update_follow_request_status(request.id, status)
            .await?;

        let verb = match status {
            FollowRequestStatus::Approved => "accepted",
            _ => "rejected",
        };
        Ok((
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "message": format!("Follow request from user '{username}' is {verb}."),
            })),
        )
            .into_response())
    }

    /// Handle POST /api/follow-requests/:username/accept
    async fn handle_accept(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(username): Path<String>,
    ) -> Result<Response, AppError> {
        Self::decide(&resources, &headers, &username, FollowRequestStatus::Approved).await
    }

    /// Handle POST /api/follow-requests/:username/reject
    async fn handle_reject(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(username): Path<String>,
    ) -> Result<Response, AppError> {
        Self::decide(&resources, &headers, &username, FollowRequestStatus::Rejected).await
    }
}
