//! # Crypto Core
//!
//! Token primitives shared by the social-post workspace.
//!
//! ## Modules
//! - `jwt`: HS256 bearer token issuing and validation

pub mod jwt;

pub use jwt::{Claims, JwtError, TokenSigner};
