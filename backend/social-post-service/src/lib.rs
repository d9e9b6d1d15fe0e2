/// Social Post Service Library
///
/// Users register and log in, publish posts, comment on other users' posts and
/// like them. The feed ranks posts by like count.
///
/// # Modules
///
/// - `config`: environment configuration
/// - `db`: the `SocialStore` boundary with PostgreSQL and in-memory stores
/// - `error`: the service error type and its HTTP rendering
/// - `handlers`: HTTP endpoints and route registration
/// - `middleware`: bearer-token authentication and ownership checks
/// - `models`: stored records and response views
/// - `security`: password hashing
/// - `services`: business logic
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod security;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
pub use handlers::register_routes;
