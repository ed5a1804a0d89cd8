// ABOUTME: Tests for ActivityStreams serialization of workout comments
// ABOUTME: Exact payload assertions for Create and Update activities per visibility level

use chrono::{DateTime, Utc};
use serde_json::json;

use fittrackee_server::errors::ErrorCode;
use fittrackee_server::federation::{ActivityType, WorkoutCommentObject};
use fittrackee_server::models::{User, Visibility, WorkoutComment};

const BASE_URL: &str = "https://example.com";
const WORKOUT_AP_ID: &str = "https://example.com/federation/user/owner/workouts/abc";

fn author() -> User {
    User::new("sam", "sam@example.com", "hash")
}

fn comment_at(visibility: Visibility) -> WorkoutComment {
    let author = author();
    let mut comment = WorkoutComment::new(
        author.id,
        uuid::Uuid::new_v4(),
        "good job!",
        visibility,
    );
    comment.created_at = parse_date("2023-04-05T07:30:00Z");
    comment.ap_id = Some(format!(
        "https://example.com/federation/user/sam/comments/{}",
        comment.short_id()
    ));
    comment.remote_url = Some(format!(
        "https://example.com/workouts/abc/comments/{}",
        comment.short_id()
    ));
    comment
}

fn parse_date(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .unwrap()
        .with_timezone(&Utc)
}

#[test]
fn test_create_activity_for_public_comment() {
    let author = author();
    let comment = comment_at(Visibility::Public);
    let ap_id = comment.ap_id.clone().unwrap();
    let remote_url = comment.remote_url.clone().unwrap();

    let object = WorkoutCommentObject::new(
        &comment,
        &author,
        WORKOUT_AP_ID,
        BASE_URL,
        ActivityType::Create,
    )
    .unwrap();

    let expected = json!({
        "@context": "https://www.w3.org/ns/activitystreams",
        "id": format!("{ap_id}/create"),
        "type": "Create",
        "actor": "https://example.com/federation/user/sam",
        "published": "05/04/2023 07:30:00",
        "to": ["https://www.w3.org/ns/activitystreams#Public"],
        "cc": ["https://example.com/federation/user/sam/followers"],
        "object": {
            "id": ap_id,
            "type": "Note",
            "published": "05/04/2023 07:30:00",
            "url": remote_url,
            "attributedTo": "https://example.com/federation/user/sam",
            "inReplyTo": WORKOUT_AP_ID,
            "content": "good job!",
            "to": ["https://www.w3.org/ns/activitystreams#Public"],
            "cc": ["https://example.com/federation/user/sam/followers"],
        },
    });
    assert_eq!(object.get_activity(), expected);
}

#[test]
fn test_create_activity_for_followers_and_remote_comment() {
    let author = author();
    let comment = comment_at(Visibility::FollowersAndRemote);

    let activity = WorkoutCommentObject::new(
        &comment,
        &author,
        WORKOUT_AP_ID,
        BASE_URL,
        ActivityType::Create,
    )
    .unwrap()
    .get_activity();

    assert_eq!(
        activity["to"],
        json!(["https://example.com/federation/user/sam/followers"])
    );
    assert_eq!(
        activity["cc"],
        json!(["https://example.com/federation/user/sam"])
    );
    assert_eq!(activity["object"]["to"], activity["to"]);
    assert_eq!(activity["object"]["cc"], activity["cc"]);
}

#[test]
fn test_update_activity_carries_updated_date() {
    let author = author();
    let mut comment = comment_at(Visibility::Public);
    comment.modification_date = Some(parse_date("2023-04-06T08:00:00Z"));

    let activity = WorkoutCommentObject::new(
        &comment,
        &author,
        WORKOUT_AP_ID,
        BASE_URL,
        ActivityType::Update,
    )
    .unwrap()
    .get_activity();

    assert_eq!(activity["type"], "Update");
    assert_eq!(
        activity["id"],
        format!("{}/update", comment.ap_id.unwrap())
    );
    assert_eq!(activity["object"]["updated"], "06/04/2023 08:00:00");
}

#[test]
fn test_create_activity_omits_updated_date() {
    let author = author();
    let mut comment = comment_at(Visibility::Public);
    comment.modification_date = Some(parse_date("2023-04-06T08:00:00Z"));

    let activity = WorkoutCommentObject::new(
        &comment,
        &author,
        WORKOUT_AP_ID,
        BASE_URL,
        ActivityType::Create,
    )
    .unwrap()
    .get_activity();

    assert!(activity["object"].get("updated").is_none());
}

#[test]
fn test_non_federable_visibility_is_rejected() {
    let author = author();
    for visibility in [Visibility::Private, Visibility::FollowersOnly] {
        let comment = comment_at(visibility);
        let error = WorkoutCommentObject::new(
            &comment,
            &author,
            WORKOUT_AP_ID,
            BASE_URL,
            ActivityType::Create,
        )
        .unwrap_err();

        assert_eq!(error.code, ErrorCode::InvalidVisibility);
        assert_eq!(
            error.message,
            format!("object visibility is: '{}'", visibility.as_str())
        );
    }
}

#[test]
fn test_comment_without_federation_ids_is_rejected() {
    let author = author();
    let mut comment = comment_at(Visibility::Public);
    comment.ap_id = None;

    let error = WorkoutCommentObject::new(
        &comment,
        &author,
        WORKOUT_AP_ID,
        BASE_URL,
        ActivityType::Create,
    )
    .unwrap_err();

    assert_eq!(error.code, ErrorCode::InvalidInput);
}
