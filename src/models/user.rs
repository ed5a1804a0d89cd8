// ABOUTME: User account model with federation actor URLs
// ABOUTME: Holds credentials, language preference and profile fields
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,
    /// Unique handle, used in actor URLs
    pub username: String,
    /// Email address
    pub email: String,
    /// bcrypt password hash
    pub password_hash: String,
    /// Preferred language for emails (`en`, `fr`, ...)
    pub language: String,
    /// Whether the account may log in
    pub is_active: bool,
    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new active user
    #[must_use]
    pub fn new(username: &str, email: &str, password_hash: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.to_owned(),
            email: email.to_owned(),
            password_hash: password_hash.to_owned(),
            language: "en".to_owned(),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// ActivityPub actor id for this user on the given instance
    #[must_use]
    pub fn actor_id(&self, base_url: &str) -> String {
        format!("{base_url}/federation/user/{}", self.username)
    }

    /// ActivityPub followers collection URL for this user
    #[must_use]
    pub fn followers_url(&self, base_url: &str) -> String {
        format!("{}/followers", self.actor_id(base_url))
    }
}
