// ABOUTME: Workout comment database operations
// ABOUTME: Creation, lookup, listing, text edits and deletion
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use super::{db_err, parse_datetime, parse_uuid, Database};
use crate::errors::AppResult;
use crate::models::WorkoutComment;

impl Database {
    /// Create the workout_comments table
    pub(super) async fn migrate_comments(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workout_comments (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                workout_id TEXT NOT NULL REFERENCES workouts(id) ON DELETE CASCADE,
                text TEXT NOT NULL,
                text_visibility TEXT NOT NULL DEFAULT 'private'
                    CHECK (text_visibility IN
                        ('private', 'followers_only', 'followers_and_remote_only', 'public')),
                ap_id TEXT,
                remote_url TEXT,
                created_at TEXT NOT NULL,
                modification_date TEXT
            )
            ",
        )
        .execute(self.pool())
        .await
        .map_err(|e| db_err("Failed to create workout_comments table", e))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_workout_comments_workout
             ON workout_comments(workout_id)",
        )
        .execute(self.pool())
        .await
        .map_err(|e| db_err("Failed to create workout_comments index", e))?;

        Ok(())
    }

    /// Insert a new comment
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn create_comment(&self, comment: &WorkoutComment) -> AppResult<Uuid> {
        sqlx::query(
            r"
            INSERT INTO workout_comments (id, user_id, workout_id, text, text_visibility,
                                          ap_id, remote_url, created_at, modification_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(comment.id.to_string())
        .bind(comment.user_id.to_string())
        .bind(comment.workout_id.to_string())
        .bind(&comment.text)
        .bind(comment.text_visibility.as_str())
        .bind(&comment.ap_id)
        .bind(&comment.remote_url)
        .bind(comment.created_at.to_rfc3339())
        .bind(comment.modification_date.map(|dt| dt.to_rfc3339()))
        .execute(self.pool())
        .await
        .map_err(|e| db_err("Failed to create comment", e))?;

        Ok(comment.id)
    }

    /// Get a comment by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_comment(&self, id: Uuid) -> AppResult<Option<WorkoutComment>> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, workout_id, text, text_visibility, ap_id, remote_url,
                   created_at, modification_date
            FROM workout_comments WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| db_err("Failed to get comment", e))?;

        row.map(|r| Self::row_to_comment(&r)).transpose()
    }

    /// Get all comments on a workout, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_workout_comments(&self, workout_id: Uuid) -> AppResult<Vec<WorkoutComment>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, workout_id, text, text_visibility, ap_id, remote_url,
                   created_at, modification_date
            FROM workout_comments
            WHERE workout_id = $1
            ORDER BY created_at ASC
            ",
        )
        .bind(workout_id.to_string())
        .fetch_all(self.pool())
        .await
        .map_err(|e| db_err("Failed to list comments", e))?;

        rows.iter().map(Self::row_to_comment).collect()
    }

    /// Update the text of a comment and record the edit time
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn update_comment_text(
        &self,
        id: Uuid,
        text: &str,
        modification_date: DateTime<Utc>,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE workout_comments SET text = $1, modification_date = $2 WHERE id = $3",
        )
        .bind(text)
        .bind(modification_date.to_rfc3339())
        .bind(id.to_string())
        .execute(self.pool())
        .await
        .map_err(|e| db_err("Failed to update comment", e))?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a comment
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn delete_comment(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM workout_comments WHERE id = $1")
            .bind(id.to_string())
            .execute(self.pool())
            .await
            .map_err(|e| db_err("Failed to delete comment", e))?;

        Ok(result.rows_affected() > 0)
    }

    fn row_to_comment(row: &SqliteRow) -> AppResult<WorkoutComment> {
        let id: String = row.get("id");
        let user_id: String = row.get("user_id");
        let workout_id: String = row.get("workout_id");
        let visibility: String = row.get("text_visibility");
        let created_at: String = row.get("created_at");
        let modification_date: Option<String> = row.get("modification_date");

        Ok(WorkoutComment {
            id: parse_uuid(&id)?,
            user_id: parse_uuid(&user_id)?,
            workout_id: parse_uuid(&workout_id)?,
            text: row.get("text"),
            text_visibility: visibility.parse()?,
            ap_id: row.get("ap_id"),
            remote_url: row.get("remote_url"),
            created_at: parse_datetime(&created_at)?,
            modification_date: modification_date.map(|s| parse_datetime(&s)).transpose()?,
        })
    }
}
