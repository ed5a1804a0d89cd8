// ABOUTME: Follow request database operations
// ABOUTME: Directional requests; only approved rows grant followers-level access
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use super::{db_err, parse_datetime, parse_uuid, Database};
use crate::errors::AppResult;
use crate::models::{FollowRequest, FollowRequestStatus};

impl Database {
    /// Create the follow_requests table
    pub(super) async fn migrate_follows(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS follow_requests (
                id TEXT PRIMARY KEY,
                follower_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                followed_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                status TEXT NOT NULL DEFAULT 'pending'
                    CHECK (status IN ('pending', 'approved', 'rejected')),
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                UNIQUE (follower_id, followed_id)
            )
            ",
        )
        .execute(self.pool())
        .await
        .map_err(|e| db_err("Failed to create follow_requests table", e))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_follow_requests_followed
             ON follow_requests(followed_id, status)",
        )
        .execute(self.pool())
        .await
        .map_err(|e| db_err("Failed to create follow_requests index", e))?;

        Ok(())
    }

    /// Insert a new follow request
    ///
    /// # Errors
    ///
    /// Returns an error if a request already exists for this pair or
    /// the query fails
    pub async fn create_follow_request(&self, request: &FollowRequest) -> AppResult<Uuid> {
        sqlx::query(
            r"
            INSERT INTO follow_requests (id, follower_id, followed_id, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(request.id.to_string())
        .bind(request.follower_id.to_string())
        .bind(request.followed_id.to_string())
        .bind(request.status.as_str())
        .bind(request.created_at.to_rfc3339())
        .bind(request.updated_at.to_rfc3339())
        .execute(self.pool())
        .await
        .map_err(|e| db_err("Failed to create follow request", e))?;

        Ok(request.id)
    }

    /// Get the follow request from `follower_id` to `followed_id`
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_follow_request(
        &self,
        follower_id: Uuid,
        followed_id: Uuid,
    ) -> AppResult<Option<FollowRequest>> {
        let row = sqlx::query(
            r"
            SELECT id, follower_id, followed_id, status, created_at, updated_at
            FROM follow_requests
            WHERE follower_id = $1 AND followed_id = $2
            ",
        )
        .bind(follower_id.to_string())
        .bind(followed_id.to_string())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| db_err("Failed to get follow request", e))?;

        row.map(|r| Self::row_to_follow_request(&r)).transpose()
    }

    /// Update the status of a follow request
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn update_follow_request_status(
        &self,
        id: Uuid,
        status: FollowRequestStatus,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE follow_requests SET status = $1, updated_at = $2 WHERE id = $3",
        )
        .bind(status.as_str())
        .bind(chrono::Utc::now().to_rfc3339())
        .bind(id.to_string())
        .execute(self.pool())
        .await
        .map_err(|e| db_err("Failed to update follow request", e))?;

        Ok(result.rows_affected() > 0)
    }

    /// Whether `follower_id` has an approved follow to `followed_id`
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn is_following(&self, follower_id: Uuid, followed_id: Uuid) -> AppResult<bool> {
        let row = sqlx::query(
            r"
            SELECT 1 AS present FROM follow_requests
            WHERE follower_id = $1 AND followed_id = $2 AND status = 'approved'
            ",
        )
        .bind(follower_id.to_string())
        .bind(followed_id.to_string())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| db_err("Failed to check follow state", e))?;

        Ok(row.is_some())
    }

    fn row_to_follow_request(row: &SqliteRow) -> AppResult<FollowRequest> {
        let id: String = row.get("id");
        let follower_id: String = row.get("follower_id");
        let followed_id: String = row.get("followed_id");
        let status: String = row.get("status");
        let created_at: String = row.get("created_at");
        let updated_at: String = row.get("updated_at");

        Ok(FollowRequest {
            id: parse_uuid(&id)?,
            follower_id: parse_uuid(&follower_id)?,
            followed_id: parse_uuid(&followed_id)?,
            status: status.parse()?,
            created_at: parse_datetime(&created_at)?,
            updated_at: parse_datetime(&updated_at)?,
        })
    }
}
