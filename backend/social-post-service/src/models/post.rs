use super::{CommentResponse, UserSummary};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A post together with its comment list and liker set
///
/// `comment_ids` is in creation order. `liker_ids` holds each liker once, in
/// the order they liked, and never contains `author_id`.
#[derive(Debug, Clone, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub comment_ids: Vec<Uuid>,
    pub liker_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn like_count(&self) -> usize {
        self.liker_ids.len()
    }

    pub fn is_liked_by(&self, user_id: Uuid) -> bool {
        self.liker_ids.contains(&user_id)
    }

    pub fn is_authored_by(&self, user_id: Uuid) -> bool {
        self.author_id == user_id
    }
}

/// Post with author, comments and likers resolved
#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub author: UserSummary,
    pub title: String,
    pub content: String,
    pub comments: Vec<CommentResponse>,
    pub likes: Vec<UserSummary>,
    pub like_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
