//! Environment variable parsing utilities
//!
//! Typed lookups with defaults so callers never `unwrap()` a parse.

use std::str::FromStr;

/// Parse an environment variable with a default fallback
///
/// Missing and unparseable values both yield `default`.
///
/// # Example
/// ```ignore
/// let max: u32 = parse_env_with_default("DB_MAX_CONNECTIONS", 10);
/// ```
pub fn parse_env_with_default<T: FromStr>(key: &str, default: T) -> T {
    parse_env_optional(key).unwrap_or(default)
}

/// Parse an environment variable, returning None if missing or invalid
pub fn parse_env_optional<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[serial_test::serial]
    fn test_parse_with_default_uses_value() {
        std::env::set_var("DB_POOL_TEST_VALUE", " 42 ");
        assert_eq!(parse_env_with_default::<u32>("DB_POOL_TEST_VALUE", 7), 42);
        std::env::remove_var("DB_POOL_TEST_VALUE");
    }

    #[test]
    #[serial_test::serial]
    fn test_parse_with_default_falls_back_on_garbage() {
        std::env::set_var("DB_POOL_TEST_VALUE", "not-a-number");
        assert_eq!(parse_env_with_default::<u32>("DB_POOL_TEST_VALUE", 7), 7);
        std::env::remove_var("DB_POOL_TEST_VALUE");
        assert_eq!(parse_env_optional::<u32>("DB_POOL_TEST_VALUE"), None);
    }
}
