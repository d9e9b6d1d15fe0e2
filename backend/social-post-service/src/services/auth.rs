/// Auth service - registration and credential login
use crate::db::DynStore;
use crate::error::{AppError, Result};
use crate::models::{LoginResponse, NewUser, UserResponse};
use crate::security::{hash_password, verify_password};
use crypto_core::TokenSigner;
use std::sync::Arc;

const INVALID_CREDENTIALS: &str = "invalid username or password";

pub struct AuthService {
    store: DynStore,
    signer: Arc<TokenSigner>,
}

/// Emails are unique case-insensitively
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl AuthService {
    pub fn new(store: DynStore, signer: Arc<TokenSigner>) -> Self {
        Self { store, signer }
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<UserResponse> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("name must not be blank".to_string()));
        }

        let email = normalize_email(email);
        if self.store.find_user_by_email(&email).await?.is_some() {
            return Err(AppError::Duplicate("email already registered".to_string()));
        }

        // the store's unique constraint still decides a concurrent duplicate
        let user = self
            .store
            .create_user(NewUser {
                name: name.to_string(),
                email,
                password_hash: hash_password(password)?,
            })
            .await?;

        tracing::info!(user_id = %user.id, "user registered");
        Ok(UserResponse::from(user))
    }

    /// Unknown email and wrong password are indistinguishable to the caller
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let email = normalize_email(email);
        let user = self
            .store
            .find_user_by_email(&email)
            .await?
            .ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS))?;

        if !verify_password(password, &user.password_hash)? {
            tracing::info!(user_id = %user.id, "login rejected: wrong password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let token = self.signer.issue(user.id, &user.email)?;

        tracing::info!(user_id = %user.id, "user logged in");
        Ok(LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_in: self.signer.expiry_secs(),
            username: user.name,
        })
    }
}
