use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Registered account. Immutable after registration.
///
/// Deliberately not `Serialize`: the password hash must never reach a response.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Fields needed to insert a user; the store assigns id and timestamp
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Author/liker reference embedded in post and comment responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
}

impl UserSummary {
    /// Placeholder for an id whose user record is gone
    pub fn unknown(id: Uuid) -> Self {
        Self {
            id,
            name: String::from("[unknown]"),
        }
    }
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
        }
    }
}

/// Registration response
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// Login response carrying the bearer token
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub username: String,
}
