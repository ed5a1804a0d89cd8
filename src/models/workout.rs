// ABOUTME: Workout record model with per-workout visibility
// ABOUTME: Minimal subject for comments; file upload and statistics live elsewhere
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{short_id, Visibility};

/// A recorded workout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workout {
    /// Unique identifier
    pub id: Uuid,
    /// Owner of the workout
    pub user_id: Uuid,
    /// Sport label (`cycling`, `running`, ...)
    pub sport: String,
    /// Optional title
    pub title: Option<String>,
    /// Distance in kilometers
    pub distance: f64,
    /// Duration in seconds
    pub duration: i64,
    /// When the workout took place
    pub workout_date: DateTime<Utc>,
    /// Who may see this workout
    pub workout_visibility: Visibility,
    /// ActivityPub object id, set when the workout is federated
    pub ap_id: Option<String>,
    /// Public HTML URL on the origin instance
    pub remote_url: Option<String>,
    /// When the record was created
    pub created_at: DateTime<Utc>,
}

impl Workout {
    /// Create a new private workout
    #[must_use]
    pub fn new(user_id: Uuid, sport: &str, distance: f64, duration: i64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            sport: sport.to_owned(),
            title: None,
            distance,
            duration,
            workout_date: now,
            workout_visibility: Visibility::Private,
            ap_id: None,
            remote_url: None,
            created_at: now,
        }
    }

    /// Short id used in API routes
    #[must_use]
    pub fn short_id(&self) -> String {
        short_id(self.id)
    }
}
