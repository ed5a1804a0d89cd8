// ABOUTME: Workout comment model with independent text visibility
// ABOUTME: Carries federation ids when the comment is eligible for delivery
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{short_id, Visibility};

/// A comment posted on a workout
///
/// The comment carries its own visibility level, independent from the
/// workout's. Read access is decided against the comment author's
/// follow graph, not the workout owner's.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutComment {
    /// Unique identifier
    pub id: Uuid,
    /// Comment author
    pub user_id: Uuid,
    /// Workout this comment belongs to
    pub workout_id: Uuid,
    /// Comment body
    pub text: String,
    /// Who may read this comment
    pub text_visibility: Visibility,
    /// ActivityPub object id, set when the comment is federated
    pub ap_id: Option<String>,
    /// Public HTML URL on the origin instance
    pub remote_url: Option<String>,
    /// When the comment was posted
    pub created_at: DateTime<Utc>,
    /// When the text was last edited, if ever
    pub modification_date: Option<DateTime<Utc>>,
}

impl WorkoutComment {
    /// Create a new comment
    #[must_use]
    pub fn new(user_id: Uuid, workout_id: Uuid, text: &str, text_visibility: Visibility) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            workout_id,
            text: text.to_owned(),
            text_visibility,
            ap_id: None,
            remote_url: None,
            created_at: Utc::now(),
            modification_date: None,
        }
    }

    /// Short id used in API routes
    #[must_use]
    pub fn short_id(&self) -> String {
        short_id(self.id)
    }

    /// Replace the text and record the edit time
    pub fn update_text(&mut self, text: &str) {
        self.text = text.to_owned();
        self.modification_date = Some(Utc::now());
    }
}
