// ABOUTME: Route handlers for workout comments REST API
// ABOUTME: Posting, fetching, listing, editing and deleting comments with visibility checks
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Workout comment routes
//!
//! Posting requires authentication; reads accept anonymous viewers for
//! public objects. Every denied read surfaces as 404 so callers cannot
//! distinguish hidden objects from missing ones.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use super::ServerResources;
use crate::auth::AuthResult;
use crate::errors::AppError;
use crate::federation::{comment_ap_id, comment_remote_url};
use crate::models::{
    can_view, parse_short_id, short_id, Viewer, Visibility, Workout, WorkoutComment,
};

// ============================================================================
// Request/Response Types
// ============================================================================

/// Body for posting a new comment
#[derive(Debug, Deserialize)]
pub struct CreateCommentBody {
    /// Comment text
    pub text: Option<String>,
    /// Requested visibility level
    pub text_visibility: Option<String>,
}

/// Body for editing a comment
#[derive(Debug, Deserialize)]
pub struct UpdateCommentBody {
    /// New comment text
    pub text: Option<String>,
}

/// A comment as returned by the API
#[derive(Debug, Serialize, Deserialize)]
pub struct CommentResponse {
    /// Short id
    pub id: String,
    /// Author username
    pub user: String,
    /// Short id of the workout
    pub workout_id: String,
    /// Comment text
    pub text: String,
    /// Visibility level
    pub text_visibility: String,
    /// When the comment was posted
    pub created_at: String,
    /// When the text was last edited, if ever
    pub modification_date: Option<String>,
}

impl CommentResponse {
    fn new(comment: &WorkoutComment, author_username: &str) -> Self {
        Self {
            id: comment.short_id(),
            user: author_username.to_owned(),
            workout_id: short_id(comment.workout_id),
            text: comment.text.clone(),
            text_visibility: comment.text_visibility.as_str().to_owned(),
            created_at: comment.created_at.to_rfc3339(),
            modification_date: comment.modification_date.map(|dt| dt.to_rfc3339()),
        }
    }
}

// ============================================================================
// Routes
// ============================================================================

/// Workout comment route handlers
pub struct CommentRoutes;

impl CommentRoutes {
    /// Create all comment routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/workouts/:workout_short_id/comments",
                post(Self::handle_post_comment),
            )
            .route(
                "/api/workouts/:workout_short_id/comments",
                get(Self::handle_list_comments),
            )
            .route(
                "/api/workouts/:workout_short_id/comments/:comment_short_id",
                get(Self::handle_get_comment),
            )
            .route(
                "/api/workouts/:workout_short_id/comments/:comment_short_id",
                patch(Self::handle_update_comment),
            )
            .route(
                "/api/workouts/:workout_short_id/comments/:comment_short_id",
                delete(Self::handle_delete_comment),
            )
            .with_state(resources)
    }

    fn parse_body<T: serde::de::DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
        serde_json::from_slice(body)
            .map_err(|e| AppError::invalid_input(format!("Invalid payload: {e}")))
    }

    /// Build the viewer side of an access check against `owner_id`
    async fn viewer_for(
        resources: &Arc<ServerResources>,
        auth: Option<AuthResult>,
        owner_id: Uuid,
    ) -> Result<Viewer, AppError> {
        match auth {
            None => Ok(Viewer::anonymous()),
            Some(auth) => {
                let follows = resources
                    .database
                    .is_following(auth.user_id, owner_id)
                    .await?;
                Ok(Viewer {
                    user_id: Some(auth.user_id),
                    follows_owner: follows,
                })
            }
        }
    }

    /// Fetch a workout by short id, 404 when it does not exist
    async fn existing_workout(
        resources: &Arc<ServerResources>,
        workout_short_id: &str,
    ) -> Result<Workout, AppError> {
        let not_found =
            || AppError::not_found(format!("workout not found (id: {workout_short_id})"));

        let workout_id = parse_short_id(workout_short_id).ok_or_else(not_found)?;
        resources
            .database
            .get_workout(workout_id)
            .await?
            .ok_or_else(not_found)
    }

    /// Fetch a workout visible to the viewer, 404 otherwise
    async fn visible_workout(
        resources: &Arc<ServerResources>,
        auth: Option<AuthResult>,
        workout_short_id: &str,
    ) -> Result<Workout, AppError> {
        let workout = Self::existing_workout(resources, workout_short_id).await?;

        let viewer = Self::viewer_for(resources, auth, workout.user_id).await?;
        if !can_view(workout.user_id, workout.workout_visibility, &viewer) {
            return Err(AppError::not_found(format!(
                "workout not found (id: {workout_short_id})"
            )));
        }
        Ok(workout)
    }

    /// Fetch a comment on the given workout visible to the viewer, 404
    /// otherwise
    ///
    /// The workout only needs to exist; comment read access is decided
    /// against the comment author's follow graph.
    async fn visible_comment(
        resources: &Arc<ServerResources>,
        auth: Option<AuthResult>,
        workout_short_id: &str,
        comment_short_id: &str,
    ) -> Result<WorkoutComment, AppError> {
        let workout = Self::existing_workout(resources, workout_short_id).await?;

        let not_found =
            || AppError::not_found(format!("workout comment not found (id: {comment_short_id})"));

        let comment_id = parse_short_id(comment_short_id).ok_or_else(not_found)?;
        let comment = resources
            .database
            .get_comment(comment_id)
            .await?
            .filter(|c| c.workout_id == workout.id)
            .ok_or_else(not_found)?;

        let viewer = Self::viewer_for(resources, auth, comment.user_id).await?;
        if !can_view(comment.user_id, comment.text_visibility, &viewer) {
            return Err(not_found());
        }
        Ok(comment)
    }

    /// Resolve the author username for a comment response
    async fn author_username(
        resources: &Arc<ServerResources>,
        user_id: Uuid,
    ) -> Result<String, AppError> {
        let user = resources
            .database
            .get_user_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::internal("Comment author no longer exists"))?;
        Ok(user.username)
    }

    // ========================================================================
    // Handlers
    // ========================================================================

    /// Handle POST /api/workouts/:workout_short_id/comments - Post a comment
    async fn handle_post_comment(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(workout_short_id): Path<String>,
        body: Bytes,
    ) -> Result<Response, AppError> {
        let auth = resources.auth.authenticate(&headers)?;
        let body: CreateCommentBody = Self::parse_body(&body)?;

        let text = body
            .text
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| AppError::invalid_input("text is missing"))?;
        let visibility = body
            .text_visibility
            .ok_or_else(|| AppError::invalid_input("text_visibility is missing"))?;

        let workout =
            Self::visible_workout(&resources, Some(auth), &workout_short_id).await?;

        // An unknown visibility string only surfaces when the comment
        // hits storage, so it reads as a save failure, not a 400
        let text_visibility: Visibility = visibility.parse().map_err(|_| {
            tracing::error!(workout_id = %workout.id, %visibility, "unknown comment visibility");
            AppError::internal("Error during comment save.")
        })?;

        if !workout
            .workout_visibility
            .allows_comment_visibility(text_visibility)
        {
            return Err(AppError::invalid_visibility(format!(
                "invalid visibility: {text_visibility} (workout visibility: {})",
                workout.workout_visibility
            )));
        }

        let author = resources
            .database
            .get_user_by_id(auth.user_id)
            .await?
            .ok_or_else(|| AppError::auth_invalid("Unknown user"))?;

        let mut comment = WorkoutComment::new(auth.user_id, workout.id, &text, text_visibility);
        if resources.config.federation_enabled && text_visibility.is_federable() {
            comment.ap_id = Some(comment_ap_id(&resources.config.base_url, &author, &comment));
            comment.remote_url = Some(comment_remote_url(&resources.config.base_url, &comment));
        }

        resources
            .database
            .create_comment(&comment)
            .await
            .map_err(|e| {
                tracing::error!(workout_id = %workout.id, error = %e, "comment insert failed");
                AppError::internal("Error during comment save.")
            })?;

        let response = CommentResponse::new(&comment, &author.username);
        Ok((
            StatusCode::CREATED,
            Json(json!({"status": "created", "comment": response})),
        )
            .into_response())
    }

    /// Handle GET /api/workouts/:workout_short_id/comments/:comment_short_id
    async fn handle_get_comment(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path((workout_short_id, comment_short_id)): Path<(String, String)>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth.authenticate_optional(&headers)?;
        let comment =
            Self::visible_comment(&resources, auth, &workout_short_id, &comment_short_id).await?;
        let username = Self::author_username(&resources, comment.user_id).await?;

        let response = CommentResponse::new(&comment, &username);
        Ok((
            StatusCode::OK,
            Json(json!({"status": "success", "comment": response})),
        )
            .into_response())
    }

    /// Handle GET /api/workouts/:workout_short_id/comments - List visible comments
    async fn handle_list_comments(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(workout_short_id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth.authenticate_optional(&headers)?;
        let workout = Self::visible_workout(&resources, auth, &workout_short_id).await?;

        let mut visible = Vec::new();
        for comment in resources.database.get_workout_comments(workout.id).await? {
            let viewer = Self::viewer_for(&resources, auth, comment.user_id).await?;
            if can_view(comment.user_id, comment.text_visibility, &viewer) {
                let username = Self::author_username(&resources, comment.user_id).await?;
                visible.push(CommentResponse::new(&comment, &username));
            }
        }

        Ok((
            StatusCode::OK,
            Json(json!({"status": "success", "data": {"comments": visible}})),
        )
            .into_response())
    }

    /// Handle PATCH /api/workouts/:workout_short_id/comments/:comment_short_id
    async fn handle_update_comment(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path((workout_short_id, comment_short_id)): Path<(String, String)>,
        body: Bytes,
    ) -> Result<Response, AppError> {
        let auth = resources.auth.authenticate(&headers)?;
        let body: UpdateCommentBody = Self::parse_body(&body)?;
        let text = body
            .text
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| AppError::invalid_input("text is missing"))?;

        let mut comment = Self::visible_comment(
            &resources,
            Some(auth),
            &workout_short_id,
            &comment_short_id,
        )
        .await?;
        if comment.user_id != auth.user_id {
            return Err(AppError::permission_denied(
                "you do not have permissions, your user id and comment user id don't match",
            ));
        }

        comment.update_text(&text);
        let modification_date = comment
            .modification_date
            .ok_or_else(|| AppError::internal("Missing modification date after edit"))?;
        resources
            .database
            .update_comment_text(comment.id, &comment.text, modification_date)
            .await?;

        let username = Self::author_username(&resources, comment.user_id).await?;
        let response = CommentResponse::new(&comment, &username);
        Ok((
            StatusCode::OK,
            Json(json!({"status": "success", "comment": response})),
        )
            .into_response())
    }

    /// Handle DELETE /api/workouts/:workout_short_id/comments/:comment_short_id
    async fn handle_delete_comment(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path((workout_short_id, comment_short_id)): Path<(String, String)>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth.authenticate(&headers)?;

        let comment = Self::visible_comment(
            &resources,
            Some(auth),
            &workout_short_id,
            &comment_short_id,
        )
        .await?;
        if comment.user_id != auth.user_id {
            return Err(AppError::permission_denied(
                "you do not have permissions, your user id and comment user id don't match",
            ));
        }

        resources.database.delete_comment(comment.id).await?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
