// src/config/env.rs
// DOCUMENTATION: Environment variable management
// PURPOSE: Load and validate configuration from .env files

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

/// Hosts that never receive first-party credentials
pub const DEFAULT_EXTERNAL_HOSTS: &str = "places.googleapis.com,maps.googleapis.com";

/// Client configuration loaded from environment variables
/// DOCUMENTATION: Centralizes all configuration in one struct
/// Load with Config::from_env() at application startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend REST API root (e.g., "http://localhost:9091")
    pub api_base_url: String,

    /// Google Places API key used by the third-party search client
    pub google_places_api_key: String,

    /// Third-party hosts that bypass the authenticated pipeline
    pub external_hosts: Vec<String>,

    /// File holding the persisted credential pair
    pub token_store_path: PathBuf,

    /// Route the user is sent to when the session expires
    pub login_route: String,

    /// Per-request timeout in seconds
    pub http_timeout_secs: u64,

    /// TTL for cached third-party search responses
    pub search_cache_ttl_secs: u64,

    /// Log level: debug, info, warn, error
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:9091".to_string(),
            google_places_api_key: String::new(),
            external_hosts: parse_hosts(DEFAULT_EXTERNAL_HOSTS),
            token_store_path: PathBuf::from(".places-client/tokens.json"),
            login_route: "/auth/login".to_string(),
            http_timeout_secs: 30,
            search_cache_ttl_secs: 3600,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    /// DOCUMENTATION: Reads from .env or process environment
    /// Called once at application startup
    pub fn from_env() -> Self {
        dotenv().ok();
        let defaults = Config::default();

        Config {
            api_base_url: env::var("API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),

            google_places_api_key: env::var("GOOGLE_PLACES_API_KEY").unwrap_or_default(),

            external_hosts: env::var("EXTERNAL_HOSTS")
                .map(|hosts| parse_hosts(&hosts))
                .unwrap_or(defaults.external_hosts),

            token_store_path: env::var("TOKEN_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.token_store_path),

            login_route: env::var("LOGIN_ROUTE").unwrap_or(defaults.login_route),

            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.http_timeout_secs),

            search_cache_ttl_secs: env::var("SEARCH_CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.search_cache_ttl_secs),

            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
        }
    }

    /// Validate critical configuration
    /// DOCUMENTATION: Ensures the client can start safely
    pub fn validate(&self) -> Result<(), String> {
        if self.api_base_url.is_empty() {
            return Err("API_BASE_URL is required".to_string());
        }

        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://")
        {
            return Err(format!(
                "API_BASE_URL must be an http(s) URL, got {}",
                self.api_base_url
            ));
        }

        if self.google_places_api_key.is_empty() {
            log::warn!("GOOGLE_PLACES_API_KEY not configured - place search will not work");
        }

        Ok(())
    }

    /// Full URL of the credential refresh endpoint
    pub fn refresh_url(&self) -> String {
        format!("{}/auth/refresh", self.api_base_url)
    }
}

/// Split a comma-separated host list, dropping blanks
fn parse_hosts(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|h| h.trim().to_ascii_lowercase())
        .filter(|h| !h.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hosts() {
        assert_eq!(
            parse_hosts(" Places.googleapis.com, ,maps.googleapis.com "),
            vec!["places.googleapis.com", "maps.googleapis.com"]
        );
    }

    #[test]
    fn test_validate() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.refresh_url(), "http://localhost:9091/auth/refresh");

        let bad = Config {
            api_base_url: "localhost:9091".to_string(),
            ..Config::default()
        };
        assert!(bad.validate().is_err());

        let empty = Config {
            api_base_url: String::new(),
            ..Config::default()
        };
        assert!(empty.validate().is_err());
    }
}
