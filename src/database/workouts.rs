// ABOUTME: Workout database operations
// ABOUTME: Storage and lookup for the records comments attach to
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use super::{db_err, parse_datetime, parse_uuid, Database};
use crate::errors::AppResult;
use crate::models::{Visibility, Workout};

impl Database {
    /// Create the workouts table
    pub(super) async fn migrate_workouts(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workouts (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                sport TEXT NOT NULL,
                title TEXT,
                distance REAL NOT NULL DEFAULT 0,
                duration INTEGER NOT NULL DEFAULT 0,
                workout_date TEXT NOT NULL,
                workout_visibility TEXT NOT NULL DEFAULT 'private'
                    CHECK (workout_visibility IN
                        ('private', 'followers_only', 'followers_and_remote_only', 'public')),
                ap_id TEXT,
                remote_url TEXT,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await
        .map_err(|e| db_err("Failed to create workouts table", e))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_workouts_user ON workouts(user_id)")
            .execute(self.pool())
            .await
            .map_err(|e| db_err("Failed to create workouts index", e))?;

        Ok(())
    }

    /// Insert a new workout
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn create_workout(&self, workout: &Workout) -> AppResult<Uuid> {
        sqlx::query(
            r"
            INSERT INTO workouts (id, user_id, sport, title, distance, duration,
                                  workout_date, workout_visibility, ap_id, remote_url, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ",
        )
        .bind(workout.id.to_string())
        .bind(workout.user_id.to_string())
        .bind(&workout.sport)
        .bind(&workout.title)
        .bind(workout.distance)
        .bind(workout.duration)
        .bind(workout.workout_date.to_rfc3339())
        .bind(workout.workout_visibility.as_str())
        .bind(&workout.ap_id)
        .bind(&workout.remote_url)
        .bind(workout.created_at.to_rfc3339())
        .execute(self.pool())
        .await
        .map_err(|e| db_err("Failed to create workout", e))?;

        Ok(workout.id)
    }

    /// Get a workout by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_workout(&self, id: Uuid) -> AppResult<Option<Workout>> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, sport, title, distance, duration, workout_date,
                   workout_visibility, ap_id, remote_url, created_at
            FROM workouts WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| db_err("Failed to get workout", e))?;

        row.map(|r| Self::row_to_workout(&r)).transpose()
    }

    /// Update the visibility of a workout
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn update_workout_visibility(
        &self,
        id: Uuid,
        visibility: Visibility,
    ) -> AppResult<bool> {
        let result = sqlx::query("UPDATE workouts SET workout_visibility = $1 WHERE id = $2")
            .bind(visibility.as_str())
            .bind(id.to_string())
            .execute(self.pool())
            .await
            .map_err(|e| db_err("Failed to update workout visibility", e))?;

        Ok(result.rows_affected() > 0)
    }

    fn row_to_workout(row: &SqliteRow) -> AppResult<Workout> {
        let id: String = row.get("id");
        let user_id: String = row.get("user_id");
        let visibility: String = row.get("workout_visibility");
        let workout_date: String = row.get("workout_date");
        let created_at: String = row.get("created_at");

        Ok(Workout {
            id: parse_uuid(&id)?,
            user_id: parse_uuid(&user_id)?,
            sport: row.get("sport"),
            title: row.get("title"),
            distance: row.get("distance"),
            duration: row.get("duration"),
            workout_date: parse_datetime(&workout_date)?,
            workout_visibility: visibility.parse()?,
            ap_id: row.get("ap_id"),
            remote_url: row.get("remote_url"),
            created_at: parse_datetime(&created_at)?,
        })
    }
}
