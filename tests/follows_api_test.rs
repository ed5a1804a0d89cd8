// ABOUTME: Integration tests for follow request routes
// ABOUTME: Sending, accepting and rejecting requests, and the visibility they unlock

mod common;
mod helpers;

use common::TestApp;
use fittrackee_server::models::Visibility;
use fittrackee_server::test_utils::{create_test_comment, create_test_user, create_test_workout};
use helpers::axum_test::AxumTestRequest;

#[tokio::test]
async fn test_send_follow_request() {
    let app = TestApp::new().await;
    let follower = create_test_user(&app.resources.database, "follower")
        .await
        .unwrap();
    create_test_user(&app.resources.database, "followed").await.unwrap();

    let response = AxumTestRequest::post("/api/users/followed/follow")
        .bearer(&app.token_for(&follower))
        .send(app.router)
        .await;

    assert_eq!(response.status(), 200);
    let body = response.json();
    assert_eq!(body["message"], "Follow request to user 'followed' is sent.");
}

#[tokio::test]
async fn test_follow_requires_authentication() {
    let app = TestApp::new().await;
    create_test_user(&app.resources.database, "followed").await.unwrap();

    let response = AxumTestRequest::post("/api/users/followed/follow")
        .send(app.router)
        .await;

    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_cannot_follow_self() {
    let app = TestApp::new().await;
    let user = create_test_user(&app.resources.database, "sam").await.unwrap();

    let response = AxumTestRequest::post("/api/users/sam/follow")
        .bearer(&app.token_for(&user))
        .send(app.router)
        .await;

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_duplicate_follow_request_rejected() {
    let app = TestApp::new().await;
    let follower = create_test_user(&app.resources.database, "follower")
        .await
        .unwrap();
    create_test_user(&app.resources.database, "followed").await.unwrap();

    let token = app.token_for(&follower);
    let response = AxumTestRequest::post("/api/users/followed/follow")
        .bearer(&token)
        .send(app.router.clone())
        .await;
    assert_eq!(response.status(), 200);

    let response = AxumTestRequest::post("/api/users/followed/follow")
        .bearer(&token)
        .send(app.router)
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_accept_unknown_request_returns_404() {
    let app = TestApp::new().await;
    let user = create_test_user(&app.resources.database, "sam").await.unwrap();
    create_test_user(&app.resources.database, "other").await.unwrap();

    let response = AxumTestRequest::post("/api/follow-requests/other/accept")
        .bearer(&app.token_for(&user))
        .send(app.router)
        .await;

    assert_eq!(response.status(), 404);
    let body = response.json();
    assert_eq!(
        body["message"],
        "Follow request from user 'other' not found."
    );
}

#[tokio::test]
async fn test_accepted_follow_unlocks_followers_only_content() {
    let app = TestApp::new().await;
    let owner = create_test_user(&app.resources.database, "owner").await.unwrap();
    let follower = create_test_user(&app.resources.database, "follower")
        .await
        .unwrap();
    let workout =
        create_test_workout(&app.resources.database, owner.id, Visibility::FollowersOnly)
            .await
            .unwrap();
    let comment = create_test_comment(
        &app.resources.database,
        owner.id,
        workout.id,
        Visibility::FollowersOnly,
    )
    .await
    .unwrap();

    let comment_uri = format!(
        "/api/workouts/{}/comments/{}",
        workout.short_id(),
        comment.short_id()
    );
    let follower_token = app.token_for(&follower);

    // hidden while the request is pending
    let response = AxumTestRequest::post("/api/users/owner/follow")
        .bearer(&follower_token)
        .send(app.router.clone())
        .await;
    assert_eq!(response.status(), 200);
    let response = AxumTestRequest::get(&comment_uri)
        .bearer(&follower_token)
        .send(app.router.clone())
        .await;
    assert_eq!(response.status(), 404);

    // owner accepts, content becomes visible
    let response = AxumTestRequest::post("/api/follow-requests/follower/accept")
        .bearer(&app.token_for(&owner))
        .send(app.router.clone())
        .await;
    assert_eq!(response.status(), 200);
    let body = response.json();
    assert_eq!(
        body["message"],
        "Follow request from user 'follower' is accepted."
    );

    let response = AxumTestRequest::get(&comment_uri)
        .bearer(&follower_token)
        .send(app.router)
        .await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_rejected_follow_keeps_content_hidden() {
    let app = TestApp::new().await;
    let owner = create_test_user(&app.resources.database, "owner").await.unwrap();
    let follower = create_test_user(&app.resources.database, "follower")
        .await
        .unwrap();
    let workout =
        create_test_workout(&app.resources.database, owner.id, Visibility::FollowersOnly)
            .await
            .unwrap();
    let comment = create_test_comment(
        &app.resources.database,
        owner.id,
        workout.id,
        Visibility::FollowersOnly,
    )
    .await
    .unwrap();

    let follower_token = app.token_for(&follower);
    AxumTestRequest::post("/api/users/owner/follow")
        .bearer(&follower_token)
        .send(app.router.clone())
        .await;

    let response = AxumTestRequest::post("/api/follow-requests/follower/reject")
        .bearer(&app.token_for(&owner))
        .send(app.router.clone())
        .await;
    assert_eq!(response.status(), 200);
    let body = response.json();
    assert_eq!(
        body["message"],
        "Follow request from user 'follower' is rejected."
    );

    let response = AxumTestRequest::get(&format!(
        "/api/workouts/{}/comments/{}",
        workout.short_id(),
        comment.short_id()
    ))
    .bearer(&follower_token)
    .send(app.router)
    .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_deciding_twice_is_an_error() {
    let app = TestApp::new().await;
    let owner = create_test_user(&app.resources.database, "owner").await.unwrap();
    let follower = create_test_user(&app.resources.database, "follower")
        .await
        .unwrap();

    AxumTestRequest::post("/api/users/owner/follow")
        .bearer(&app.token_for(&follower))
        .send(app.router.clone())
        .await;

    let owner_token = app.token_for(&owner);
    let response = AxumTestRequest::post("/api/follow-requests/follower/accept")
        .bearer(&owner_token)
        .send(app.router.clone())
        .await;
    assert_eq!(response.status(), 200);

    let response = AxumTestRequest::post("/api/follow-requests/follower/accept")
        .bearer(&owner_token)
        .send(app.router)
        .await;
    assert_eq!(response.status(), 400);
    let body = response.json();
    assert_eq!(
        body["message"],
        "Follow request from user 'follower' already approved."
    );
}
