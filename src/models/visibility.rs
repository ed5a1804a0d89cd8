// ABOUTME: Tiered visibility levels for workouts and comments
// ABOUTME: Access-control predicate deciding who may read an object
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

/// Visibility level applied independently to a workout and to each
/// comment on it.
///
/// Levels form a total order from most to least restrictive:
/// `Private < FollowersOnly < FollowersAndRemote < Public`. A comment
/// may never be more visible than the workout it belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Only the owner
    #[default]
    Private,
    /// Approved local followers of the owner
    #[serde(rename = "followers_only")]
    FollowersOnly,
    /// Approved followers, including those on remote instances
    #[serde(rename = "followers_and_remote_only")]
    FollowersAndRemote,
    /// Everyone, authenticated or not
    Public,
}

impl Display for Visibility {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Visibility {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "private" => Ok(Self::Private),
            "followers_only" => Ok(Self::FollowersOnly),
            "followers_and_remote_only" => Ok(Self::FollowersAndRemote),
            "public" => Ok(Self::Public),
            _ => Err(AppError::invalid_input(format!(
                "Invalid visibility level: {s}"
            ))),
        }
    }
}

impl Visibility {
    /// Database and API string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::FollowersOnly => "followers_only",
            Self::FollowersAndRemote => "followers_and_remote_only",
            Self::Public => "public",
        }
    }

    /// Position in the restrictiveness order, 0 being most restrictive
    const fn rank(self) -> u8 {
        match self {
            Self::Private => 0,
            Self::FollowersOnly => 1,
            Self::FollowersAndRemote => 2,
            Self::Public => 3,
        }
    }

    /// Whether an object at this level can carry a comment at
    /// `comment_visibility` without widening the audience
    #[must_use]
    pub const fn allows_comment_visibility(self, comment_visibility: Self) -> bool {
        comment_visibility.rank() <= self.rank()
    }

    /// Whether objects at this level are eligible for federation
    /// (delivered to remote instances)
    #[must_use]
    pub const fn is_federable(self) -> bool {
        matches!(self, Self::FollowersAndRemote | Self::Public)
    }
}

/// The viewer side of an access check: who is asking, and whether they
/// have an approved follow relationship with the object owner.
#[derive(Debug, Clone, Copy, Default)]
pub struct Viewer {
    /// Authenticated user ID, `None` for anonymous requests
    pub user_id: Option<Uuid>,
    /// Whether the viewer's follow request to the owner was approved
    pub follows_owner: bool,
}

impl Viewer {
    /// Anonymous, unauthenticated viewer
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            user_id: None,
            follows_owner: false,
        }
    }

    /// Authenticated viewer without a follow relationship
    #[must_use]
    pub const fn authenticated(user_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
            follows_owner: false,
        }
    }

    /// Authenticated viewer with an approved follow to the owner
    #[must_use]
    pub const fn follower(user_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
            follows_owner: true,
        }
    }
}

/// Decide whether `viewer` may read an object owned by `owner_id` with
/// the given visibility level.
///
/// The owner always sees their own objects. Denials are surfaced to API
/// clients as 404, never 403, so callers cannot probe for existence.
#[must_use]
pub fn can_view(owner_id: Uuid, visibility: Visibility, viewer: &Viewer) -> bool {
    if viewer.user_id == Some(owner_id) {
        return true;
    }
    match visibility {
        Visibility::Public => true,
        Visibility::FollowersOnly | Visibility::FollowersAndRemote => {
            viewer.user_id.is_some() && viewer.follows_owner
        }
        Visibility::Private => false,
    }
}
