//! Shared JWT module for the social-post workspace
//!
//! Bearer tokens are HS256-signed with a shared secret and carry the user id
//! in `sub`. A `TokenSigner` owns both keys and is handed to whoever needs to
//! issue (login) or validate (auth middleware) tokens.
//!
//! ## Usage
//!
//! ```rust
//! use crypto_core::jwt::TokenSigner;
//! use uuid::Uuid;
//!
//! let signer = TokenSigner::new("0123456789abcdef0123456789abcdef", 3600).unwrap();
//! let token = signer.issue(Uuid::new_v4(), "olga@email.com").unwrap();
//! let claims = signer.validate(&token).unwrap();
//! assert_eq!(claims.email, "olga@email.com");
//! ```

use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// Constants
// ============================================================================

/// Secrets shorter than this are refused at construction (256 bits)
pub const MIN_SECRET_LENGTH: usize = 32;

const JWT_ALGORITHM: Algorithm = Algorithm::HS256;

// ============================================================================
// Data Structures
// ============================================================================

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user ID as UUID string)
    pub sub: String,
    /// Email the user logged in with
    pub email: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Parse the subject into a user id
    pub fn user_id(&self) -> Result<Uuid, JwtError> {
        Uuid::parse_str(&self.sub).map_err(|_| JwtError::MalformedSubject)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("JWT secret too short: need at least {MIN_SECRET_LENGTH} bytes, got {0}")]
    WeakSecret(usize),

    #[error("token expired")]
    Expired,

    #[error("invalid token: {0}")]
    Invalid(String),

    #[error("token subject is not a valid user id")]
    MalformedSubject,

    #[error("failed to sign token: {0}")]
    Signing(String),
}

// ============================================================================
// Signer
// ============================================================================

/// Issues and validates HS256 tokens with a single shared secret
#[derive(Clone)]
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_secs: i64,
}

impl fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSigner")
            .field("secret", &"[REDACTED]")
            .field("expiry_secs", &self.expiry_secs)
            .finish()
    }
}

impl TokenSigner {
    /// Build a signer from a shared secret
    ///
    /// ## Errors
    ///
    /// Returns `JwtError::WeakSecret` when the secret is shorter than
    /// `MIN_SECRET_LENGTH` bytes.
    pub fn new(secret: &str, expiry_secs: i64) -> Result<Self, JwtError> {
        let len = secret.as_bytes().len();
        if len < MIN_SECRET_LENGTH {
            return Err(JwtError::WeakSecret(len));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry_secs,
        })
    }

    /// Lifetime of issued tokens in seconds
    pub fn expiry_secs(&self) -> i64 {
        self.expiry_secs
    }

    /// Issue a token for `user_id`
    pub fn issue(&self, user_id: Uuid, email: &str) -> Result<String, JwtError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: now,
            exp: now + self.expiry_secs,
        };

        self.encode_claims(&claims)
    }

    /// Sign arbitrary claims. Exposed so tests can forge expired tokens.
    pub fn encode_claims(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::new(JWT_ALGORITHM), claims, &self.encoding_key)
            .map_err(|e| JwtError::Signing(e.to_string()))
    }

    /// Validate signature and expiry, returning the decoded claims
    pub fn validate(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.validate_exp = true;
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::Invalid(e.to_string()),
            })
    }

    /// Validate a token and return the user id it was issued for
    pub fn user_id_from_token(&self, token: &str) -> Result<Uuid, JwtError> {
        self.validate(token)?.user_id()
    }
}

// ============================================================================
// Tests
// ============================================================================
