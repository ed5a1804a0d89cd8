// ABOUTME: ActivityStreams serialization for workout comments
// ABOUTME: Builds Create/Update activities wrapping a Note object
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use serde_json::{json, Value};

use super::{ActivityType, AP_CTX, DATE_FORMAT, PUBLIC_STREAM};
use crate::errors::{AppError, AppResult};
use crate::models::{User, Visibility, WorkoutComment};

/// Serializes a workout comment into an ActivityStreams activity
///
/// Only comments at a federable visibility level (`Public` or
/// `FollowersAndRemote`) can be turned into activities; construction
/// fails otherwise. The audience fields differ by level:
/// public comments address the public stream and cc the author's
/// followers, followers-and-remote comments address the followers
/// collection and cc the author.
#[derive(Debug)]
pub struct WorkoutCommentObject {
    activity_type: ActivityType,
    actor_id: String,
    followers_url: String,
    ap_id: String,
    remote_url: String,
    in_reply_to: String,
    content: String,
    visibility: Visibility,
    published: String,
    updated: Option<String>,
}

impl WorkoutCommentObject {
    /// Build an activity object for a comment
    ///
    /// `workout_ap_id` is the ActivityPub id of the workout the comment
    /// replies to.
    ///
    /// # Errors
    ///
    /// Returns an error if the comment visibility is not federable or
    /// the comment carries no ActivityPub ids
    pub fn new(
        comment: &WorkoutComment,
        author: &User,
        workout_ap_id: &str,
        base_url: &str,
        activity_type: ActivityType,
    ) -> AppResult<Self> {
        if !comment.text_visibility.is_federable() {
            return Err(AppError::invalid_visibility(format!(
                "object visibility is: '{}'",
                comment.text_visibility
            )));
        }

        let ap_id = comment
            .ap_id
            .clone()
            .ok_or_else(|| AppError::invalid_input("comment has no ActivityPub id"))?;
        let remote_url = comment
            .remote_url
            .clone()
            .ok_or_else(|| AppError::invalid_input("comment has no remote URL"))?;

        Ok(Self {
            activity_type,
            actor_id: author.actor_id(base_url),
            followers_url: author.followers_url(base_url),
            ap_id,
            remote_url,
            in_reply_to: workout_ap_id.to_owned(),
            content: comment.text.clone(),
            visibility: comment.text_visibility,
            published: comment.created_at.format(DATE_FORMAT).to_string(),
            updated: comment
                .modification_date
                .map(|dt| dt.format(DATE_FORMAT).to_string()),
        })
    }

    fn audience(&self) -> (Vec<String>, Vec<String>) {
        match self.visibility {
            Visibility::Public => (
                vec![PUBLIC_STREAM.to_owned()],
                vec![self.followers_url.clone()],
            ),
            // FollowersAndRemote: construction rejects the other levels
            _ => (
                vec![self.followers_url.clone()],
                vec![self.actor_id.clone()],
            ),
        }
    }

    /// Serialize the wrapped activity
    #[must_use]
    pub fn get_activity(&self) -> Value {
        let (to, cc) = self.audience();

        let mut object = json!({
            "id": &self.ap_id,
            "type": "Note",
            "published": &self.published,
            "url": &self.remote_url,
            "attributedTo": &self.actor_id,
            "inReplyTo": &self.in_reply_to,
            "content": &self.content,
            "to": &to,
            "cc": &cc,
        });
        if self.activity_type == ActivityType::Update {
            if let Some(updated) = &self.updated {
                object["updated"] = json!(updated);
            }
        }

        json!({
            "@context": AP_CTX,
            "id": format!("{}/{}", self.ap_id, self.activity_type.id_suffix()),
            "type": self.activity_type.as_str(),
            "actor": &self.actor_id,
            "published": &self.published,
            "to": to,
            "cc": cc,
            "object": object,
        })
    }
}
