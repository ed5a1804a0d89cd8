// ABOUTME: Directional, approval-gated follow request model
// ABOUTME: Only approved follows unlock followers-level visibility
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

/// Status of a follow request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FollowRequestStatus {
    /// Request sent, awaiting a decision from the followed user
    #[default]
    Pending,
    /// Followed user approved the request
    Approved,
    /// Followed user rejected the request
    Rejected,
}

impl Display for FollowRequestStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FollowRequestStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(AppError::invalid_input(format!(
                "Invalid follow request status: {s}"
            ))),
        }
    }
}

impl FollowRequestStatus {
    /// Database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// A follow request from one user to another
///
/// Follows are directional: `follower_id` asked to follow
/// `followed_id`. Unlike friend systems there is no mutual edge; each
/// direction is its own request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowRequest {
    /// Unique identifier
    pub id: Uuid,
    /// User who wants to follow
    pub follower_id: Uuid,
    /// User being followed
    pub followed_id: Uuid,
    /// Current status
    pub status: FollowRequestStatus,
    /// When the request was created
    pub created_at: DateTime<Utc>,
    /// When the request was last updated
    pub updated_at: DateTime<Utc>,
}

impl FollowRequest {
    /// Create a new pending follow request
    #[must_use]
    pub fn new(follower_id: Uuid, followed_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            follower_id,
            followed_id,
            status: FollowRequestStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Approve the request
    pub fn approve(&mut self) {
        self.status = FollowRequestStatus::Approved;
        self.updated_at = Utc::now();
    }

    /// Reject the request
    pub fn reject(&mut self) {
        self.status = FollowRequestStatus::Rejected;
        self.updated_at = Utc::now();
    }

    /// Whether this request grants followers-level access
    #[must_use]
    pub const fn is_approved(&self) -> bool {
        matches!(self.status, FollowRequestStatus::Approved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_request_is_pending() {
        let request = FollowRequest::new(Uuid::new_v4(), Uuid::new_v4());
        assert_eq!(request.status, FollowRequestStatus::Pending);
        assert!(!request.is_approved());
    }

    #[test]
    fn test_approve_and_reject() {
        let mut request = FollowRequest::new(Uuid::new_v4(), Uuid::new_v4());
        request.approve();
        assert!(request.is_approved());

        let mut request = FollowRequest::new(Uuid::new_v4(), Uuid::new_v4());
        request.reject();
        assert_eq!(request.status, FollowRequestStatus::Rejected);
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            FollowRequestStatus::Pending,
            FollowRequestStatus::Approved,
            FollowRequestStatus::Rejected,
        ] {
            assert_eq!(
                status.as_str().parse::<FollowRequestStatus>().unwrap(),
                status
            );
        }
    }
}
