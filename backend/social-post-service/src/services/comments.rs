/// Comment service - comments on posts by users other than the post's author
use super::posts::UserDirectory;
use super::require_user;
use crate::db::DynStore;
use crate::error::{AppError, Result};
use crate::middleware::{check_can_comment, check_comment_ownership};
use crate::models::{Comment, CommentResponse, UserSummary};
use uuid::Uuid;

pub struct CommentService {
    store: DynStore,
}

impl CommentService {
    pub fn new(store: DynStore) -> Self {
        Self { store }
    }

    /// Comments on a post in creation order
    pub async fn list_comments(&self, post_id: Uuid) -> Result<Vec<CommentResponse>> {
        if self.store.find_post(post_id).await?.is_none() {
            return Err(AppError::not_found("post not found"));
        }

        let comments = self.store.list_comments(post_id).await?;
        self.render_comments(comments).await
    }

    pub async fn get_comment(&self, comment_id: Uuid) -> Result<CommentResponse> {
        let comment = self.load_comment(comment_id).await?;
        self.render_comment(comment).await
    }

    /// Comment on someone else's post
    pub async fn create_comment(
        &self,
        user_id: Uuid,
        post_id: Uuid,
        content: &str,
    ) -> Result<CommentResponse> {
        let post = self
            .store
            .find_post(post_id)
            .await?
            .ok_or_else(|| AppError::not_found("post not found"))?;
        let author = require_user(self.store.as_ref(), user_id).await?;
        check_can_comment(author.id, &post)?;

        // None here means the post was deleted after we loaded it
        let comment = self
            .store
            .create_comment(post_id, author.id, content)
            .await?
            .ok_or_else(|| AppError::not_found("post not found"))?;

        tracing::info!(comment_id = %comment.id, %post_id, %user_id, "comment created");
        Ok(CommentResponse::new(comment, UserSummary::from(&author)))
    }

    /// Edit a comment; its author only
    pub async fn update_comment(
        &self,
        user_id: Uuid,
        comment_id: Uuid,
        content: &str,
    ) -> Result<CommentResponse> {
        let comment = self.load_comment(comment_id).await?;
        check_comment_ownership(user_id, &comment)?;

        let updated = self
            .store
            .update_comment(comment_id, content)
            .await?
            .ok_or_else(|| AppError::not_found("comment not found"))?;

        tracing::info!(%comment_id, %user_id, "comment updated");
        self.render_comment(updated).await
    }

    /// Delete a comment and drop it from its post; its author only
    pub async fn delete_comment(&self, user_id: Uuid, comment_id: Uuid) -> Result<()> {
        let comment = self.load_comment(comment_id).await?;
        check_comment_ownership(user_id, &comment)?;

        if !self.store.delete_comment(comment_id).await? {
            return Err(AppError::not_found("comment not found"));
        }

        tracing::info!(%comment_id, post_id = %comment.post_id, %user_id, "comment deleted");
        Ok(())
    }

    async fn load_comment(&self, comment_id: Uuid) -> Result<Comment> {
        self.store
            .find_comment(comment_id)
            .await?
            .ok_or_else(|| AppError::not_found("comment not found"))
    }

    async fn render_comment(&self, comment: Comment) -> Result<CommentResponse> {
        let author = self
            .store
            .find_user_by_id(comment.author_id)
            .await?
            .map(|u| UserSummary::from(&u))
            .unwrap_or_else(|| UserSummary::unknown(comment.author_id));

        Ok(CommentResponse::new(comment, author))
    }

    async fn render_comments(&self, comments: Vec<Comment>) -> Result<Vec<CommentResponse>> {
        let mut author_ids: Vec<Uuid> = comments.iter().map(|c| c.author_id).collect();
        author_ids.sort();
        author_ids.dedup();

        let users = UserDirectory::new(self.store.find_user_summaries(&author_ids).await?);
        Ok(comments
            .into_iter()
            .map(|c| {
                let author = users.summary(c.author_id);
                CommentResponse::new(c, author)
            })
            .collect())
    }
}
