//! Environment variable parsing utilities.
//!
//! Type-safe helpers for reading configuration from the environment with
//! defaults, replacing the usual boilerplate:
//!
//! ```ignore
//! std::env::var("VAR_NAME")
//!     .ok()
//!     .and_then(|v| v.parse::<u64>().ok())
//!     .unwrap_or(default_value)
//! ```
//!
//! # Example
//!
//! ```
//! use sui_wizard_types::env_utils::{env_var, env_var_or};
//!
//! let ttl: u64 = env_var_or("WIZARD_CACHE_TTL_SECS", 30);
//! let custom: Option<u64> = env_var("WIZARD_CUSTOM_VALUE");
//! ```

use std::str::FromStr;

/// Parse an environment variable into a type that implements `FromStr`.
///
/// Returns `None` if the variable is not set or cannot be parsed.
pub fn env_var<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Parse an environment variable with a default value.
///
/// Returns the default if the variable is not set or cannot be parsed.
///
/// ```
/// use sui_wizard_types::env_utils::env_var_or;
///
/// let retries: usize = env_var_or("WIZARD_RETRIES", 3);
/// ```
pub fn env_var_or<T: FromStr>(key: &str, default: T) -> T {
    env_var(key).unwrap_or(default)
}

/// Get a non-empty environment variable as a string.
///
/// Blank values are treated as unset so `SUI_RPC_URL=` does not override a default.
pub fn env_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_var_parsing() {
        std::env::set_var("WIZARD_TEST_U64", " 42 ");
        let val: Option<u64> = env_var("WIZARD_TEST_U64");
        assert_eq!(val, Some(42));

        let missing: Option<u64> = env_var("WIZARD_NONEXISTENT_VAR_12345");
        assert_eq!(missing, None);

        std::env::remove_var("WIZARD_TEST_U64");
    }

    #[test]
    fn test_env_var_or() {
        std::env::set_var("WIZARD_TEST_WITH_DEFAULT", "not-a-number");
        let val: u64 = env_var_or("WIZARD_TEST_WITH_DEFAULT", 50);
        assert_eq!(val, 50);

        std::env::remove_var("WIZARD_TEST_WITH_DEFAULT");
    }

    #[test]
    fn test_blank_string_is_unset() {
        std::env::set_var("WIZARD_TEST_BLANK", "   ");
        assert_eq!(env_string("WIZARD_TEST_BLANK"), None);
        std::env::remove_var("WIZARD_TEST_BLANK");
    }
}
