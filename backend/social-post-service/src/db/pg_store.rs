use super::SocialStore;
use crate::error::{AppError, Result};
use crate::models::{Comment, NewUser, Post, User, UserSummary};
use sqlx::PgPool;
use uuid::Uuid;

/// Post columns plus the comment list and liker set folded into arrays
const POST_SELECT: &str = r#"
    SELECT p.id, p.author_id, p.title, p.content, p.created_at, p.updated_at,
           ARRAY(
               SELECT c.id FROM comments c
               WHERE c.post_id = p.id
               ORDER BY c.seq
           ) AS comment_ids,
           ARRAY(
               SELECT l.user_id FROM post_likes l
               WHERE l.post_id = p.id
               ORDER BY l.created_at, l.user_id
           ) AS liker_ids
    FROM posts p
"#;

const COMMENT_COLUMNS: &str = "id, post_id, author_id, content, created_at, updated_at";

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// SQLSTATE for a value longer than its VARCHAR column
const STRING_DATA_RIGHT_TRUNCATION: &str = "22001";

/// Map constraint violations on writes to client errors
fn map_write_error(err: sqlx::Error, unique_msg: &str, missing_msg: &str) -> AppError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.code().as_deref() == Some(STRING_DATA_RIGHT_TRUNCATION) {
            return AppError::Validation("value too long".to_string());
        }
        if db_err.is_unique_violation() {
            return AppError::Duplicate(unique_msg.to_string());
        }
        if db_err.is_foreign_key_violation() {
            return AppError::not_found(missing_msg);
        }
    }
    AppError::from(err)
}

#[async_trait::async_trait]
impl SocialStore for PgStore {
    async fn create_user(&self, user: NewUser) -> Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, password_hash, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "email already registered", "user not found"))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_user_by_id(&self, user_id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_user_summaries(&self, user_ids: &[Uuid]) -> Result<Vec<UserSummary>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let users = sqlx::query_as::<_, UserSummary>(
            "SELECT id, name FROM users WHERE id = ANY($1)",
        )
        .bind(user_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn create_post(&self, author_id: Uuid, title: &str, content: &str) -> Result<Post> {
        sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (id, author_id, title, content)
            VALUES ($1, $2, $3, $4)
            RETURNING id, author_id, title, content, created_at, updated_at,
                      '{}'::uuid[] AS comment_ids, '{}'::uuid[] AS liker_ids
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(author_id)
        .bind(title)
        .bind(content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "post already exists", "author not found"))
    }

    async fn find_post(&self, post_id: Uuid) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(&format!("{POST_SELECT} WHERE p.id = $1"))
            .bind(post_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(post)
    }

    async fn list_posts(&self) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(&format!(
            "{POST_SELECT} ORDER BY p.created_at ASC, p.seq ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn update_post(
        &self,
        post_id: Uuid,
        title: Option<&str>,
        content: &str,
    ) -> Result<Option<Post>> {
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET content = $2, title = COALESCE($3, title), updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(post_id)
        .bind(content)
        .bind(title)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_post(post_id).await
    }

    async fn delete_post(&self, post_id: Uuid) -> Result<bool> {
        // comments and post_likes go with it via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(post_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn create_comment(
        &self,
        post_id: Uuid,
        author_id: Uuid,
        content: &str,
    ) -> Result<Option<Comment>> {
        sqlx::query_as::<_, Comment>(&format!(
            r#"
            INSERT INTO comments (id, post_id, author_id, content)
            SELECT $1, $2, $3, $4
            WHERE EXISTS (SELECT 1 FROM posts WHERE id = $2)
            RETURNING {COMMENT_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(post_id)
        .bind(author_id)
        .bind(content)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "comment already exists", "post not found"))
    }

    async fn find_comment(&self, comment_id: Uuid) -> Result<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1"
        ))
        .bind(comment_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn find_comments(&self, comment_ids: &[Uuid]) -> Result<Vec<Comment>> {
        if comment_ids.is_empty() {
            return Ok(Vec::new());
        }

        let comments = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE id = ANY($1) ORDER BY seq"
        ))
        .bind(comment_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    async fn list_comments(&self, post_id: Uuid) -> Result<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE post_id = $1 ORDER BY seq"
        ))
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    async fn update_comment(&self, comment_id: Uuid, content: &str) -> Result<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>(&format!(
            r#"
            UPDATE comments
            SET content = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {COMMENT_COLUMNS}
            "#
        ))
        .bind(comment_id)
        .bind(content)
        .fetch_optional(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn delete_comment(&self, comment_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(comment_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn add_liker(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO post_likes (post_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (post_id, user_id) DO NOTHING
            "#,
        )
        .bind(post_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "already liked", "post not found"))?;

        Ok(result.rows_affected() == 1)
    }

    async fn remove_liker(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM post_likes WHERE post_id = $1 AND user_id = $2")
            .bind(post_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
