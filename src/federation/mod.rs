// ABOUTME: ActivityPub federation support
// ABOUTME: Constants, activity types and object id derivation
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! # Federation
//!
//! Serializes local objects into ActivityStreams payloads. Only object
//! construction lives here; delivery and inbox handling are out of
//! scope.

mod objects;

pub use objects::WorkoutCommentObject;

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::errors::AppError;
use crate::models::{short_id, User, Workout, WorkoutComment};

/// ActivityStreams JSON-LD context
pub const AP_CTX: &str = "https://www.w3.org/ns/activitystreams";

/// Addressing target for public objects
pub const PUBLIC_STREAM: &str = "https://www.w3.org/ns/activitystreams#Public";

/// Timestamp format used in federation payloads
pub const DATE_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// The activity wrapping a federated object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityType {
    /// Object creation
    Create,
    /// Object edit
    Update,
}

impl Display for ActivityType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ActivityType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Create" => Ok(Self::Create),
            "Update" => Ok(Self::Update),
            _ => Err(AppError::invalid_input(format!(
                "'{s}' is not a valid ActivityType"
            ))),
        }
    }
}

impl ActivityType {
    /// ActivityStreams type string
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Update => "Update",
        }
    }

    /// Suffix appended to the object id to form the activity id
    #[must_use]
    pub const fn id_suffix(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
        }
    }
}

/// ActivityPub object id for a local workout
#[must_use]
pub fn workout_ap_id(base_url: &str, owner: &User, workout: &Workout) -> String {
    format!(
        "{}/workouts/{}",
        owner.actor_id(base_url),
        short_id(workout.id)
    )
}

/// ActivityPub object id for a local comment
#[must_use]
pub fn comment_ap_id(base_url: &str, author: &User, comment: &WorkoutComment) -> String {
    format!(
        "{}/comments/{}",
        author.actor_id(base_url),
        short_id(comment.id)
    )
}

/// Public HTML URL for a local comment
#[must_use]
pub fn comment_remote_url(base_url: &str, comment: &WorkoutComment) -> String {
    format!(
        "{base_url}/workouts/{}/comments/{}",
        short_id(comment.workout_id),
        short_id(comment.id)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_type_parsing() {
        assert_eq!("Create".parse::<ActivityType>().unwrap(), ActivityType::Create);
        assert_eq!("Update".parse::<ActivityType>().unwrap(), ActivityType::Update);
    }

    #[test]
    fn test_activity_type_rejects_unknown() {
        let error = "Delete".parse::<ActivityType>().unwrap_err();
        assert_eq!(error.message, "'Delete' is not a valid ActivityType");
    }

    #[test]
    fn test_activity_type_is_case_sensitive() {
        assert!("create".parse::<ActivityType>().is_err());
    }

    #[test]
    fn test_object_id_derivation() {
        let owner = User::new("sam", "sam@example.com", "hash");
        let workout = Workout::new(owner.id, "cycling", 10.0, 3600);
        let comment = WorkoutComment::new(
            owner.id,
            workout.id,
            "hi",
            crate::models::Visibility::Public,
        );

        assert_eq!(
            workout_ap_id("https://example.com", &owner, &workout),
            format!(
                "https://example.com/federation/user/sam/workouts/{}",
                workout.short_id()
            )
        );
        assert_eq!(
            comment_ap_id("https://example.com", &owner, &comment),
            format!(
                "https://example.com/federation/user/sam/comments/{}",
                comment.short_id()
            )
        );
        assert_eq!(
            comment_remote_url("https://example.com", &comment),
            format!(
                "https://example.com/workouts/{}/comments/{}",
                workout.short_id(),
                comment.short_id()
            )
        );
    }
}
