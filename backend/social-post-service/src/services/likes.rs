/// Like service - membership of users in a post's liker set
use super::posts::{render_post, UserDirectory};
use super::require_user;
use crate::db::DynStore;
use crate::error::{AppError, Result};
use crate::middleware::check_can_like;
use crate::models::{Post, PostResponse, UserSummary};
use uuid::Uuid;

pub struct LikeService {
    store: DynStore,
}

impl LikeService {
    pub fn new(store: DynStore) -> Self {
        Self { store }
    }

    /// Users who liked a post, in the order they liked it
    pub async fn list_likers(&self, post_id: Uuid) -> Result<Vec<UserSummary>> {
        let post = self.load_post(post_id).await?;
        let users = UserDirectory::new(self.store.find_user_summaries(&post.liker_ids).await?);

        Ok(post.liker_ids.iter().map(|id| users.summary(*id)).collect())
    }

    /// Add the user to the liker set
    ///
    /// Rejects the author (401) and a second like (400). The second-like check
    /// is decided by the store's set insert, so two concurrent likes from the
    /// same user leave exactly one entry.
    pub async fn like_post(&self, user_id: Uuid, post_id: Uuid) -> Result<PostResponse> {
        let post = self.load_post(post_id).await?;
        let user = require_user(self.store.as_ref(), user_id).await?;
        check_can_like(user.id, &post)?;

        if !self.store.add_liker(post_id, user.id).await? {
            return Err(AppError::Duplicate("already liked".to_string()));
        }

        tracing::info!(%post_id, %user_id, "post liked");
        self.render(post_id).await
    }

    /// Remove the user from the liker set; removing a non-member is a no-op
    pub async fn unlike_post(&self, user_id: Uuid, post_id: Uuid) -> Result<PostResponse> {
        self.load_post(post_id).await?;

        if self.store.remove_liker(post_id, user_id).await? {
            tracing::info!(%post_id, %user_id, "post unliked");
        }

        self.render(post_id).await
    }

    async fn load_post(&self, post_id: Uuid) -> Result<Post> {
        self.store
            .find_post(post_id)
            .await?
            .ok_or_else(|| AppError::not_found("post not found"))
    }

    async fn render(&self, post_id: Uuid) -> Result<PostResponse> {
        let post = self.load_post(post_id).await?;
        render_post(&self.store, post).await
    }
}
