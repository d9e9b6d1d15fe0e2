/// Ownership and authorship checks
///
/// Pure functions over already-loaded entities. Callers resolve the target
/// first (missing targets are 404) and then ask whether the actor may act.
use crate::error::{AppError, Result};
use crate::models::{Comment, Post};
use uuid::Uuid;

/// Only the author may edit or delete a post
pub fn check_post_ownership(user_id: Uuid, post: &Post) -> Result<()> {
    if post.is_authored_by(user_id) {
        Ok(())
    } else {
        Err(AppError::unauthorized("unauthorized"))
    }
}

/// Anyone but the post's author may comment on it
pub fn check_can_comment(user_id: Uuid, post: &Post) -> Result<()> {
    if post.is_authored_by(user_id) {
        Err(AppError::unauthorized(
            "invalid request. You are not allowed to comment on your own post",
        ))
    } else {
        Ok(())
    }
}

/// Only the author may edit or delete a comment
pub fn check_comment_ownership(user_id: Uuid, comment: &Comment) -> Result<()> {
    if comment.author_id == user_id {
        Ok(())
    } else {
        Err(AppError::unauthorized("unauthorized"))
    }
}

/// Anyone but the author may like a post, once
///
/// The duplicate check here is a fast path for the common case; the store's
/// set insert remains the authority when two likes race.
pub fn check_can_like(user_id: Uuid, post: &Post) -> Result<()> {
    if post.is_authored_by(user_id) {
        return Err(AppError::unauthorized("you cannot like your own post"));
    }
    if post.is_liked_by(user_id) {
        return Err(AppError::Duplicate("already liked".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn post_by(author_id: Uuid) -> Post {
        let now = Utc::now();
        Post {
            id: Uuid::new_v4(),
            author_id,
            title: "title".to_string(),
            content: "content".to_string(),
            comment_ids: Vec::new(),
            liker_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn comment_by(author_id: Uuid, post_id: Uuid) -> Comment {
        let now = Utc::now();
        Comment {
            id: Uuid::new_v4(),
            post_id,
            author_id,
            content: "nice".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_post_ownership() {
        let author = Uuid::new_v4();
        let post = post_by(author);

        assert!(check_post_ownership(author, &post).is_ok());
        assert!(matches!(
            check_post_ownership(Uuid::new_v4(), &post),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_author_cannot_comment_on_own_post() {
        let author = Uuid::new_v4();
        let post = post_by(author);

        assert!(matches!(
            check_can_comment(author, &post),
            Err(AppError::Unauthorized(_))
        ));
        assert!(check_can_comment(Uuid::new_v4(), &post).is_ok());
    }

    #[test]
    fn test_comment_ownership() {
        let commenter = Uuid::new_v4();
        let comment = comment_by(commenter, Uuid::new_v4());

        assert!(check_comment_ownership(commenter, &comment).is_ok());
        assert!(check_comment_ownership(Uuid::new_v4(), &comment).is_err());
    }

    #[test]
    fn test_like_rules() {
        let author = Uuid::new_v4();
        let liker = Uuid::new_v4();
        let mut post = post_by(author);

        assert!(matches!(
            check_can_like(author, &post),
            Err(AppError::Unauthorized(_))
        ));
        assert!(check_can_like(liker, &post).is_ok());

        post.liker_ids.push(liker);
        assert!(matches!(
            check_can_like(liker, &post),
            Err(AppError::Duplicate(_))
        ));
    }
}
