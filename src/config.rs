//! Configuration Module
//!
//! Handles loading client and mock backend configuration from environment variables.

use std::env;
use std::path::PathBuf;

/// Storefront configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the commerce backend the client talks to
    pub api_url: String,
    /// Port the mock backend listens on
    pub server_port: u16,
    /// Default TTL in seconds for cached GET requests
    pub default_cache_ttl: u64,
    /// Directory holding persisted auth tokens and UI preferences
    pub state_dir: PathBuf,
    /// Per-request timeout in seconds
    pub request_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `STOREFRONT_API_URL` - Backend base URL (default: http://localhost:5000)
    /// - `SERVER_PORT` - Mock backend port (default: 5000)
    /// - `DEFAULT_CACHE_TTL` - Default cache TTL in seconds (default: 300)
    /// - `STOREFRONT_STATE_DIR` - Persisted state directory (default: .storefront)
    /// - `REQUEST_TIMEOUT_SECS` - Request timeout in seconds (default: 30)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_url: env::var("STOREFRONT_API_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.api_url),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            default_cache_ttl: env::var("DEFAULT_CACHE_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.default_cache_ttl),
            state_dir: env::var("STOREFRONT_STATE_DIR")
                .ok()
                .map(PathBuf::from)
                .unwrap_or(defaults.state_dir),
            request_timeout: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:5000".to_string(),
            server_port: 5000,
            default_cache_ttl: 300,
            state_dir: PathBuf::from(".storefront"),
            request_timeout: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.api_url, "http://localhost:5000");
        assert_eq!(config.server_port, 5000);
        assert_eq!(config.default_cache_ttl, 300);
        assert_eq!(config.state_dir, PathBuf::from(".storefront"));
        assert_eq!(config.request_timeout, 30);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("STOREFRONT_API_URL");
        env::remove_var("SERVER_PORT");
        env::remove_var("DEFAULT_CACHE_TTL");
        env::remove_var("STOREFRONT_STATE_DIR");
        env::remove_var("REQUEST_TIMEOUT_SECS");

        let config = Config::from_env();
        assert_eq!(config.api_url, "http://localhost:5000");
        assert_eq!(config.server_port, 5000);
        assert_eq!(config.default_cache_ttl, 300);
        assert_eq!(config.request_timeout, 30);
    }
}
