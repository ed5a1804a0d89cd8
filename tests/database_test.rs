// ABOUTME: Integration tests for the SQLite storage layer
// ABOUTME: Round trips for users, follows, workouts and comments, including file-backed databases

use fittrackee_server::database::Database;
use fittrackee_server::models::Visibility;
use fittrackee_server::test_utils::{
    create_approved_follow, create_test_comment, create_test_user, create_test_workout,
};

async fn memory_database() -> Database {
    Database::new("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database")
}

#[tokio::test]
async fn test_user_round_trip() {
    let database = memory_database().await;
    let user = create_test_user(&database, "sam").await.unwrap();

    let by_id = database.get_user_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(by_id.username, "sam");
    assert_eq!(by_id.email, "sam@example.com");
    assert!(by_id.is_active);

    let by_username = database.get_user_by_username("sam").await.unwrap().unwrap();
    assert_eq!(by_username.id, user.id);

    assert!(database
        .get_user_by_username("ghost")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_duplicate_username_rejected() {
    let database = memory_database().await;
    create_test_user(&database, "sam").await.unwrap();

    assert!(create_test_user(&database, "sam").await.is_err());
}

#[tokio::test]
async fn test_follow_state_requires_approval() {
    let database = memory_database().await;
    let follower = create_test_user(&database, "follower").await.unwrap();
    let followed = create_test_user(&database, "followed").await.unwrap();

    assert!(!database.is_following(follower.id, followed.id).await.unwrap());

    create_approved_follow(&database, follower.id, followed.id)
        .await
        .unwrap();

    assert!(database.is_following(follower.id, followed.id).await.unwrap());
    // follows are directional
    assert!(!database.is_following(followed.id, follower.id).await.unwrap());
}

#[tokio::test]
async fn test_workout_round_trip() {
    let database = memory_database().await;
    let user = create_test_user(&database, "sam").await.unwrap();
    let workout = create_test_workout(&database, user.id, Visibility::FollowersOnly)
        .await
        .unwrap();

    let stored = database.get_workout(workout.id).await.unwrap().unwrap();
    assert_eq!(stored.sport, "cycling");
    assert_eq!(stored.workout_visibility, Visibility::FollowersOnly);

    database
        .update_workout_visibility(workout.id, Visibility::Public)
        .await
        .unwrap();
    let stored = database.get_workout(workout.id).await.unwrap().unwrap();
    assert_eq!(stored.workout_visibility, Visibility::Public);
}

#[tokio::test]
async fn test_comment_round_trip_and_listing() {
    let database = memory_database().await;
    let user = create_test_user(&database, "sam").await.unwrap();
    let workout = create_test_workout(&database, user.id, Visibility::Public)
        .await
        .unwrap();

    let first = create_test_comment(&database, user.id, workout.id, Visibility::Public)
        .await
        .unwrap();
    let second = create_test_comment(&database, user.id, workout.id, Visibility::Private)
        .await
        .unwrap();

    let listed = database.get_workout_comments(workout.id).await.unwrap();
    assert_eq!(listed.len(), 2);

    let modification_date = chrono::Utc::now();
    database
        .update_comment_text(first.id, "edited", modification_date)
        .await
        .unwrap();
    let stored = database.get_comment(first.id).await.unwrap().unwrap();
    assert_eq!(stored.text, "edited");
    assert!(stored.modification_date.is_some());

    assert!(database.delete_comment(second.id).await.unwrap());
    assert!(database.get_comment(second.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_file_backed_database_is_created() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("fittrackee-test.db");
    let url = format!("sqlite:{}", path.display());

    let database = Database::new(&url).await.expect("Failed to create database");
    let user = create_test_user(&database, "sam").await.unwrap();

    assert!(path.exists());

    // a second handle over the same file sees the data
    let reopened = Database::new(&url).await.expect("Failed to reopen database");
    let stored = reopened.get_user_by_id(user.id).await.unwrap();
    assert!(stored.is_some());
}
