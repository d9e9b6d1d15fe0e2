/// Store boundary for users, posts, comments and liker sets
///
/// Services only talk to `SocialStore`. Mutations of a post's comment list and
/// liker set are single atomic operations here (no read-modify-write in the
/// services), so concurrent likes or comments cannot overwrite each other.
///
/// - `pg_store`: PostgreSQL implementation (production)
/// - `memory_store`: in-process implementation (local development, tests)
pub mod memory_store;
pub mod pg_store;

pub use memory_store::MemoryStore;
pub use pg_store::PgStore;

use crate::error::Result;
use crate::models::{Comment, NewUser, Post, User, UserSummary};
use std::sync::Arc;
use uuid::Uuid;

/// Shared handle to whichever store backs the service
pub type DynStore = Arc<dyn SocialStore>;

#[async_trait::async_trait]
pub trait SocialStore: Send + Sync {
    /// Insert a user. A taken email yields `AppError::Duplicate`.
    async fn create_user(&self, user: NewUser) -> Result<User>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn find_user_by_id(&self, user_id: Uuid) -> Result<Option<User>>;

    /// Batch lookup; unknown ids are skipped
    async fn find_user_summaries(&self, user_ids: &[Uuid]) -> Result<Vec<UserSummary>>;

    async fn create_post(&self, author_id: Uuid, title: &str, content: &str) -> Result<Post>;

    async fn find_post(&self, post_id: Uuid) -> Result<Option<Post>>;

    /// All posts in insertion order
    async fn list_posts(&self) -> Result<Vec<Post>>;

    /// Replace content (and title when given). `None` if the post is gone.
    async fn update_post(
        &self,
        post_id: Uuid,
        title: Option<&str>,
        content: &str,
    ) -> Result<Option<Post>>;

    /// Delete a post with its comments and likes. `false` if it did not exist.
    async fn delete_post(&self, post_id: Uuid) -> Result<bool>;

    /// Create a comment and append it to the post's comment list in one step.
    /// `None` if the post does not exist.
    async fn create_comment(
        &self,
        post_id: Uuid,
        author_id: Uuid,
        content: &str,
    ) -> Result<Option<Comment>>;

    async fn find_comment(&self, comment_id: Uuid) -> Result<Option<Comment>>;

    /// Batch lookup; unknown ids are skipped
    async fn find_comments(&self, comment_ids: &[Uuid]) -> Result<Vec<Comment>>;

    /// Comments of a post in creation order
    async fn list_comments(&self, post_id: Uuid) -> Result<Vec<Comment>>;

    async fn update_comment(&self, comment_id: Uuid, content: &str) -> Result<Option<Comment>>;

    /// Delete a comment and drop it from its post's list. `false` if it did not exist.
    async fn delete_comment(&self, comment_id: Uuid) -> Result<bool>;

    /// Atomic set insert. `Ok(false)` when the user was already in the set.
    async fn add_liker(&self, post_id: Uuid, user_id: Uuid) -> Result<bool>;

    /// Atomic set removal. `Ok(false)` when the user was not in the set.
    async fn remove_liker(&self, post_id: Uuid, user_id: Uuid) -> Result<bool>;

    /// Cheap connectivity probe for health checks
    async fn ping(&self) -> Result<()>;
}
