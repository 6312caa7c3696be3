// src/config/http.rs
// DOCUMENTATION: Shared HTTP client initialization
// PURPOSE: Build the reqwest client used by every transport

use crate::config::Config;
use std::time::Duration;

/// Initialize the shared HTTP client
/// DOCUMENTATION: Called once during application startup in main.rs
/// The client keeps its own connection pool, so clones are cheap
pub fn init_http_client(config: &Config) -> Result<reqwest::Client, reqwest::Error> {
    log::info!(
        "Initializing HTTP client (timeout: {}s)",
        config.http_timeout_secs
    );

    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_secs))
        // Idle sockets are recycled after 90 seconds
        .pool_idle_timeout(Duration::from_secs(90))
        .user_agent(concat!("places-client/", env!("CARGO_PKG_VERSION")))
        .build()
}
