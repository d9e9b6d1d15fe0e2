/// Data models for social-post-service
///
/// - `user`: registered accounts and the summaries embedded in other responses
/// - `post`: posts with their ordered comment ids and liker set
/// - `comment`: comments on posts
pub mod comment;
pub mod post;
pub mod user;

pub use comment::{Comment, CommentResponse};
pub use post::{Post, PostResponse};
pub use user::{LoginResponse, NewUser, User, UserResponse, UserSummary};
