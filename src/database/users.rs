// ABOUTME: User account database operations
// ABOUTME: Registration lookups by id, email and username
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use super::{db_err, parse_datetime, parse_uuid, Database};
use crate::errors::{AppError, AppResult};
use crate::models::User;

impl Database {
    /// Create the users table
    pub(super) async fn migrate_users(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                username TEXT UNIQUE NOT NULL,
                email TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                language TEXT NOT NULL DEFAULT 'en',
                is_active BOOLEAN NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await
        .map_err(|e| db_err("Failed to create users table", e))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_email ON users(email)")
            .execute(self.pool())
            .await
            .map_err(|e| db_err("Failed to create users index", e))?;

        Ok(())
    }

    /// Insert a new user
    ///
    /// # Errors
    ///
    /// Returns an error if the email or username is already taken, or
    /// the query fails
    pub async fn create_user(&self, user: &User) -> AppResult<Uuid> {
        if self.get_user_by_email(&user.email).await?.is_some() {
            return Err(AppError::new(
                crate::errors::ErrorCode::ResourceAlreadyExists,
                "Email already in use",
            ));
        }
        if self.get_user_by_username(&user.username).await?.is_some() {
            return Err(AppError::new(
                crate::errors::ErrorCode::ResourceAlreadyExists,
                "Username already in use",
            ));
        }

        sqlx::query(
            r"
            INSERT INTO users (id, username, email, password_hash, language, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(user.id.to_string())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.language)
        .bind(user.is_active)
        .bind(user.created_at.to_rfc3339())
        .execute(self.pool())
        .await
        .map_err(|e| db_err("Failed to create user", e))?;

        Ok(user.id)
    }

    /// Get a user by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_user_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let row = sqlx::query(
            "SELECT id, username, email, password_hash, language, is_active, created_at
             FROM users WHERE id = $1",
        )
        .bind(id.to_string())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| db_err("Failed to get user", e))?;

        row.map(|r| Self::row_to_user(&r)).transpose()
    }

    /// Get a user by email
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let row = sqlx::query(
            "SELECT id, username, email, password_hash, language, is_active, created_at
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| db_err("Failed to get user", e))?;

        row.map(|r| Self::row_to_user(&r)).transpose()
    }

    /// Get a user by username
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let row = sqlx::query(
            "SELECT id, username, email, password_hash, language, is_active, created_at
             FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| db_err("Failed to get user", e))?;

        row.map(|r| Self::row_to_user(&r)).transpose()
    }

    fn row_to_user(row: &SqliteRow) -> AppResult<User> {
        let id: String = row.get("id");
        let created_at: String = row.get("created_at");

        Ok(User {
            id: parse_uuid(&id)?,
            username: row.get("username"),
            email: row.get("email"),
            password_hash: row.get("password_hash"),
            language: row.get("language"),
            is_active: row.get("is_active"),
            created_at: parse_datetime(&created_at)?,
        })
    }
}
