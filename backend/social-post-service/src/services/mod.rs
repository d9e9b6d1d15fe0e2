/// Business logic layer for social-post-service
///
/// - Auth service: registration, login, token issuance
/// - Post service: post lifecycle and the ranked feed
/// - Comment service: comments on other users' posts
/// - Like service: liker set membership
/// - Feed ranking: pure ordering and paging of posts
pub mod auth;
pub mod comments;
pub mod feed_ranking;
pub mod likes;
pub mod posts;

pub use auth::AuthService;
pub use comments::CommentService;
pub use feed_ranking::{rank_posts, FeedPage};
pub use likes::LikeService;
pub use posts::PostService;

use crate::db::SocialStore;
use crate::error::{AppError, Result};
use crate::models::User;
use uuid::Uuid;

/// Load the acting user, treating a token for a vanished account as unauthenticated
pub(crate) async fn require_user(store: &dyn SocialStore, user_id: Uuid) -> Result<User> {
    store.find_user_by_id(user_id).await?.ok_or_else(|| {
        tracing::warn!(%user_id, "token subject has no user record");
        AppError::unauthorized("unauthorized")
    })
}
