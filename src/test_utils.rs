// ABOUTME: Factories for users, workouts and comments used in tests
// ABOUTME: Records are persisted with sensible defaults that callers override
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Test data factories
//!
//! Shared by integration tests to set up users, follow relationships,
//! workouts and comments without repeating insert boilerplate. Password
//! hashing uses a reduced bcrypt cost to keep test setup fast.

use uuid::Uuid;

use crate::database::Database;
use crate::errors::AppResult;
use crate::models::{FollowRequest, FollowRequestStatus, User, Visibility, Workout, WorkoutComment};

/// Password assigned to every factory-created user
pub const TEST_PASSWORD: &str = "correct horse battery staple";

const TEST_BCRYPT_COST: u32 = 4;

/// Create and persist a user
///
/// # Errors
///
/// Returns an error if hashing or the insert fails
pub async fn create_test_user(database: &Database, username: &str) -> AppResult<User> {
    let password_hash = bcrypt::hash(TEST_PASSWORD, TEST_BCRYPT_COST)
        .map_err(|e| crate::errors::AppError::internal(format!("bcrypt failed: {e}")))?;
    let user = User::new(username, &format!("{username}@example.com"), &password_hash);
    database.create_user(&user).await?;
    Ok(user)
}

/// Create and persist a workout at the given visibility
///
/// # Errors
///
/// Returns an error if the insert fails
pub async fn create_test_workout(
    database: &Database,
    user_id: Uuid,
    visibility: Visibility,
) -> AppResult<Workout> {
    let mut workout = Workout::new(user_id, "cycling", 10.0, 3600);
    workout.title = Some("Morning ride".to_owned());
    workout.workout_visibility = visibility;
    database.create_workout(&workout).await?;
    Ok(workout)
}

/// Create and persist a comment at the given visibility
///
/// # Errors
///
/// Returns an error if the insert fails
pub async fn create_test_comment(
    database: &Database,
    user_id: Uuid,
    workout_id: Uuid,
    visibility: Visibility,
) -> AppResult<WorkoutComment> {
    let comment = WorkoutComment::new(user_id, workout_id, "Nice ride!", visibility);
    database.create_comment(&comment).await?;
    Ok(comment)
}

/// Create an approved follow from `follower_id` to `followed_id`
///
/// # Errors
///
/// Returns an error if any insert or update fails
pub async fn create_approved_follow(
    database: &Database,
    follower_id: Uuid,
    followed_id: Uuid,
) -> AppResult<()> {
    let request = FollowRequest::new(follower_id, followed_id);
    database.create_follow_request(&request).await?;
    database
        .update_follow_request_status(request.id, FollowRequestStatus::Approved)
        .await?;
    Ok(())
}
