use super::SocialStore;
use crate::error::{AppError, Result};
use crate::models::{Comment, NewUser, Post, User, UserSummary};
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-process store
///
/// Every mutation takes the single write lock, so appending to a comment list
/// or a liker set can never race with another request.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, User>,
    user_ids_by_email: HashMap<String, Uuid>,
    // insertion order is the feed's final tie-break
    posts: Vec<Post>,
    comments: HashMap<Uuid, Comment>,
}

impl Inner {
    fn post_mut(&mut self, post_id: Uuid) -> Option<&mut Post> {
        self.posts.iter_mut().find(|p| p.id == post_id)
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl SocialStore for MemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<User> {
        let mut inner = self.inner.write().await;
        if inner.user_ids_by_email.contains_key(&user.email) {
            return Err(AppError::Duplicate("email already registered".to_string()));
        }

        let created = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        inner
            .user_ids_by_email
            .insert(created.email.clone(), created.id);
        inner.users.insert(created.id, created.clone());

        Ok(created)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner
            .user_ids_by_email
            .get(email)
            .and_then(|id| inner.users.get(id))
            .cloned())
    }

    async fn find_user_by_id(&self, user_id: Uuid) -> Result<Option<User>> {
        Ok(self.inner.read().await.users.get(&user_id).cloned())
    }

    async fn find_user_summaries(&self, user_ids: &[Uuid]) -> Result<Vec<UserSummary>> {
        let inner = self.inner.read().await;
        Ok(user_ids
            .iter()
            .filter_map(|id| inner.users.get(id))
            .map(UserSummary::from)
            .collect())
    }

    async fn create_post(&self, author_id: Uuid, title: &str, content: &str) -> Result<Post> {
        let mut inner = self.inner.write().await;
        if !inner.users.contains_key(&author_id) {
            return Err(AppError::not_found("author not found"));
        }

        let now = Utc::now();
        let post = Post {
            id: Uuid::new_v4(),
            author_id,
            title: title.to_string(),
            content: content.to_string(),
            comment_ids: Vec::new(),
            liker_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        inner.posts.push(post.clone());

        Ok(post)
    }

    async fn find_post(&self, post_id: Uuid) -> Result<Option<Post>> {
        let inner = self.inner.read().await;
        Ok(inner.posts.iter().find(|p| p.id == post_id).cloned())
    }

    async fn list_posts(&self) -> Result<Vec<Post>> {
        Ok(self.inner.read().await.posts.clone())
    }

    async fn update_post(
        &self,
        post_id: Uuid,
        title: Option<&str>,
        content: &str,
    ) -> Result<Option<Post>> {
        let mut inner = self.inner.write().await;
        let Some(post) = inner.post_mut(post_id) else {
            return Ok(None);
        };

        post.content = content.to_string();
        if let Some(title) = title {
            post.title = title.to_string();
        }
        post.updated_at = Utc::now();

        Ok(Some(post.clone()))
    }

    async fn delete_post(&self, post_id: Uuid) -> Result<bool> {
        let mut inner = self.inner.write().await;
        let Some(index) = inner.posts.iter().position(|p| p.id == post_id) else {
            return Ok(false);
        };

        let post = inner.posts.remove(index);
        for comment_id in &post.comment_ids {
            inner.comments.remove(comment_id);
        }

        Ok(true)
    }

    async fn create_comment(
        &self,
        post_id: Uuid,
        author_id: Uuid,
        content: &str,
    ) -> Result<Option<Comment>> {
        let mut inner = self.inner.write().await;
        let now = Utc::now();
        let comment = Comment {
            id: Uuid::new_v4(),
            post_id,
            author_id,
            content: content.to_string(),
            created_at: now,
            updated_at: now,
        };

        let Some(post) = inner.post_mut(post_id) else {
            return Ok(None);
        };
        post.comment_ids.push(comment.id);
        inner.comments.insert(comment.id, comment.clone());

        Ok(Some(comment))
    }

    async fn find_comment(&self, comment_id: Uuid) -> Result<Option<Comment>> {
        Ok(self.inner.read().await.comments.get(&comment_id).cloned())
    }

    async fn find_comments(&self, comment_ids: &[Uuid]) -> Result<Vec<Comment>> {
        let inner = self.inner.read().await;
        Ok(comment_ids
            .iter()
            .filter_map(|id| inner.comments.get(id))
            .cloned()
            .collect())
    }

    async fn list_comments(&self, post_id: Uuid) -> Result<Vec<Comment>> {
        let inner = self.inner.read().await;
        let Some(post) = inner.posts.iter().find(|p| p.id == post_id) else {
            return Ok(Vec::new());
        };

        Ok(post
            .comment_ids
            .iter()
            .filter_map(|id| inner.comments.get(id))
            .cloned()
            .collect())
    }

    async fn update_comment(&self, comment_id: Uuid, content: &str) -> Result<Option<Comment>> {
        let mut inner = self.inner.write().await;
        let Some(comment) = inner.comments.get_mut(&comment_id) else {
            return Ok(None);
        };

        comment.content = content.to_string();
        comment.updated_at = Utc::now();

        Ok(Some(comment.clone()))
    }

    async fn delete_comment(&self, comment_id: Uuid) -> Result<bool> {
        let mut inner = self.inner.write().await;
        let Some(comment) = inner.comments.remove(&comment_id) else {
            return Ok(false);
        };

        if let Some(post) = inner.post_mut(comment.post_id) {
            post.comment_ids.retain(|id| *id != comment_id);
        }

        Ok(true)
    }

    async fn add_liker(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        let mut inner = self.inner.write().await;
        let post = inner
            .post_mut(post_id)
            .ok_or_else(|| AppError::not_found("post not found"))?;

        if post.liker_ids.contains(&user_id) {
            return Ok(false);
        }
        post.liker_ids.push(user_id);

        Ok(true)
    }

    async fn remove_liker(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        let mut inner = self.inner.write().await;
        let Some(post) = inner.post_mut(post_id) else {
            return Ok(false);
        };

        let before = post.liker_ids.len();
        post.liker_ids.retain(|id| *id != user_id);

        Ok(post.liker_ids.len() < before)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
