/// Configuration management for social-post-service
///
/// Everything comes from environment variables (a `.env` file is loaded first
/// by the binary). Database pool settings are read separately through
/// `db_pool::DbConfig` when the postgres backend is selected.
use db_pool::env_utils::parse_env_with_default;
use std::fmt;
use std::str::FromStr;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_JWT_EXPIRY_SECS: i64 = 86_400;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub cors: CorsConfig,
    pub store: StoreBackend,
    pub jwt: JwtConfig,
}

/// Application settings
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn is_production(&self) -> bool {
        self.env.eq_ignore_ascii_case("production")
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// CORS configuration
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

impl CorsConfig {
    pub fn origins(&self) -> impl Iterator<Item = &str> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
    }
}

/// Which store implementation backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!(
                "STORE_BACKEND must be 'postgres' or 'memory', got '{}'",
                other
            )),
        }
    }
}

/// Token signing settings
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry_secs: i64,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[REDACTED]")
            .field("expiry_secs", &self.expiry_secs)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let is_production = app_env.eq_ignore_ascii_case("production");

        let port = match std::env::var("SERVICE_PORT").or_else(|_| std::env::var("PORT")) {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| format!("invalid port '{}'", raw))?,
            Err(_) => DEFAULT_PORT,
        };

        let allowed_origins = match std::env::var("CORS_ALLOWED_ORIGINS") {
            Ok(value) => value,
            Err(_) if is_production => {
                return Err("CORS_ALLOWED_ORIGINS must be set in production".to_string())
            }
            Err(_) => "http://localhost:3000".to_string(),
        };
        if is_production && allowed_origins.trim() == "*" {
            return Err("CORS_ALLOWED_ORIGINS cannot be '*' in production".to_string());
        }

        let store = match std::env::var("STORE_BACKEND") {
            Ok(raw) => raw.parse()?,
            Err(_) => StoreBackend::Postgres,
        };
        if is_production && store == StoreBackend::Memory {
            return Err("STORE_BACKEND=memory is not allowed in production".to_string());
        }

        let secret = std::env::var("JWT_SECRET")
            .map_err(|_| "JWT_SECRET environment variable not set".to_string())?;
        if secret.len() < crypto_core::jwt::MIN_SECRET_LENGTH {
            return Err(format!(
                "JWT_SECRET must be at least {} bytes",
                crypto_core::jwt::MIN_SECRET_LENGTH
            ));
        }
        let expiry_secs = parse_env_with_default("JWT_EXPIRY_SECS", DEFAULT_JWT_EXPIRY_SECS);
        if expiry_secs <= 0 {
            return Err("JWT_EXPIRY_SECS must be positive".to_string());
        }

        Ok(Config {
            app: AppConfig {
                env: app_env,
                host: std::env::var("SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port,
            },
            cors: CorsConfig { allowed_origins },
            store,
            jwt: JwtConfig {
                secret,
                expiry_secs,
            },
        })
    }
}
