/// Post service - post lifecycle, the ranked feed, and response assembly
use super::feed_ranking::{rank_posts, FeedPage};
use super::require_user;
use crate::db::DynStore;
use crate::error::{AppError, Result};
use crate::middleware::check_post_ownership;
use crate::models::{Comment, CommentResponse, Post, PostResponse, UserSummary};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

pub struct PostService {
    store: DynStore,
}

impl PostService {
    pub fn new(store: DynStore) -> Self {
        Self { store }
    }

    /// Every post in feed order, optionally paged
    pub async fn list_feed(&self, page: FeedPage) -> Result<Vec<PostResponse>> {
        let posts = self.store.list_posts().await?;
        let ranked = rank_posts(posts, page);
        render_posts(&self.store, ranked).await
    }

    pub async fn get_post(&self, post_id: Uuid) -> Result<PostResponse> {
        let post = self.load_post(post_id).await?;
        render_post(&self.store, post).await
    }

    pub async fn create_post(
        &self,
        user_id: Uuid,
        title: &str,
        content: &str,
    ) -> Result<PostResponse> {
        let author = require_user(self.store.as_ref(), user_id).await?;
        let post = self.store.create_post(author.id, title, content).await?;

        tracing::info!(post_id = %post.id, user_id = %user_id, "post created");
        render_post(&self.store, post).await
    }

    /// Replace a post's content (and title when given); author only
    pub async fn update_post(
        &self,
        user_id: Uuid,
        post_id: Uuid,
        title: Option<&str>,
        content: &str,
    ) -> Result<PostResponse> {
        let post = self.load_post(post_id).await?;
        check_post_ownership(user_id, &post)?;

        let updated = self
            .store
            .update_post(post_id, title, content)
            .await?
            .ok_or_else(|| AppError::not_found("post not found"))?;

        tracing::info!(%post_id, %user_id, "post updated");
        render_post(&self.store, updated).await
    }

    /// Delete a post together with its comments and likes; author only
    pub async fn delete_post(&self, user_id: Uuid, post_id: Uuid) -> Result<()> {
        let post = self.load_post(post_id).await?;
        check_post_ownership(user_id, &post)?;

        if !self.store.delete_post(post_id).await? {
            return Err(AppError::not_found("post not found"));
        }

        tracing::info!(%post_id, %user_id, "post deleted");
        Ok(())
    }

    async fn load_post(&self, post_id: Uuid) -> Result<Post> {
        self.store
            .find_post(post_id)
            .await?
            .ok_or_else(|| AppError::not_found("post not found"))
    }
}

pub(crate) async fn render_post(store: &DynStore, post: Post) -> Result<PostResponse> {
    let mut rendered = render_posts(store, vec![post]).await?;
    rendered
        .pop()
        .ok_or_else(|| AppError::Internal("post rendering produced no output".to_string()))
}

/// Resolve authors, comments and likers for a batch of posts
///
/// Two store round trips regardless of batch size: one for every comment, one
/// for every user referenced by a post, a comment or a like.
pub(crate) async fn render_posts(store: &DynStore, posts: Vec<Post>) -> Result<Vec<PostResponse>> {
    let comment_ids: Vec<Uuid> = posts
        .iter()
        .flat_map(|p| p.comment_ids.iter().copied())
        .collect();
    let comments: HashMap<Uuid, Comment> = store
        .find_comments(&comment_ids)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    let user_ids: Vec<Uuid> = posts
        .iter()
        .flat_map(|p| std::iter::once(p.author_id).chain(p.liker_ids.iter().copied()))
        .chain(comments.values().map(|c| c.author_id))
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let users = UserDirectory::new(store.find_user_summaries(&user_ids).await?);

    Ok(posts
        .into_iter()
        .map(|post| {
            let post_comments = post
                .comment_ids
                .iter()
                .filter_map(|id| comments.get(id))
                .map(|c| CommentResponse::new(c.clone(), users.summary(c.author_id)))
                .collect();
            let likes: Vec<UserSummary> = post
                .liker_ids
                .iter()
                .map(|id| users.summary(*id))
                .collect();

            PostResponse {
                id: post.id,
                author: users.summary(post.author_id),
                title: post.title,
                content: post.content,
                comments: post_comments,
                like_count: likes.len(),
                likes,
                created_at: post.created_at,
                updated_at: post.updated_at,
            }
        })
        .collect())
}

/// Id-to-summary lookup with a placeholder for users that no longer exist
pub(crate) struct UserDirectory(HashMap<Uuid, UserSummary>);

impl UserDirectory {
    pub(crate) fn new(summaries: Vec<UserSummary>) -> Self {
        Self(summaries.into_iter().map(|u| (u.id, u)).collect())
    }

    pub(crate) fn summary(&self, user_id: Uuid) -> UserSummary {
        self.0
            .get(&user_id)
            .cloned()
            .unwrap_or_else(|| UserSummary::unknown(user_id))
    }
}
