// ABOUTME: Domain models for users, workouts, comments and follow requests
// ABOUTME: Short-id encoding shared by all API-addressable records
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Domain models
//!
//! Records are stored with UUID primary keys but addressed over the API
//! by short ids, a 22-character URL-safe base64 encoding of the UUID
//! bytes.

mod comment;
mod follow_request;
mod user;
mod visibility;
mod workout;

pub use comment::WorkoutComment;
pub use follow_request::{FollowRequest, FollowRequestStatus};
pub use user::User;
pub use visibility::{can_view, Viewer, Visibility};
pub use workout::Workout;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use uuid::Uuid;

/// Encode a UUID as a 22-character URL-safe short id
#[must_use]
pub fn short_id(id: Uuid) -> String {
    URL_SAFE_NO_PAD.encode(id.as_bytes())
}

/// Decode a short id back into a UUID, `None` if malformed
#[must_use]
pub fn parse_short_id(s: &str) -> Option<Uuid> {
    let bytes = URL_SAFE_NO_PAD.decode(s).ok()?;
    Uuid::from_slice(&bytes).ok()
}
