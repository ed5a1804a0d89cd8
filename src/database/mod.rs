// ABOUTME: Database management on SQLite via sqlx
// ABOUTME: Connection setup and schema migrations for all domain tables
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! # Database Management
//!
//! This module provides database functionality for the server. Each
//! domain (users, follows, workouts, comments) contributes its own
//! migrations and query methods from a submodule.

mod comments;
mod follows;
mod users;
mod workouts;

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};

use crate::errors::{AppError, AppResult};

/// Database manager for user, workout and comment storage
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or schema migration fails
    pub async fn new(database_url: &str) -> AppResult<Self> {
        // Ensure SQLite creates the database file if it doesn't exist
        let in_memory = database_url.contains(":memory:");
        let connection_options = if database_url.starts_with("sqlite:") && !in_memory {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_owned()
        };

        // An in-memory SQLite database exists per connection; more than
        // one pooled connection would see different schemas
        let max_connections = if in_memory { 1 } else { 5 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(&connection_options)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect: {e}")))?;

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any table or index creation fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_users().await?;
        self.migrate_follows().await?;
        self.migrate_workouts().await?;
        self.migrate_comments().await?;
        Ok(())
    }
}

pub(crate) fn db_err(context: &str, e: sqlx::Error) -> AppError {
    AppError::database(format!("{context}: {e}"))
}

pub(crate) fn parse_uuid(value: &str) -> AppResult<uuid::Uuid> {
    uuid::Uuid::parse_str(value).map_err(|e| AppError::database(format!("Invalid UUID: {e}")))
}

pub(crate) fn parse_datetime(value: &str) -> AppResult<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .map_err(|e| AppError::database(format!("Invalid date: {e}")))
}
