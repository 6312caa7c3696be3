// src/http/auth_pipeline.rs
// DOCUMENTATION: Authenticated request pipeline
// PURPOSE: Attach bearer credentials to first-party calls and recover once
// from an expired access token by refreshing it

use crate::config::Config;
use crate::errors::{ClientError, ClientResult};
use crate::http::navigator::Navigator;
use crate::http::request::{ApiResponse, RequestDescriptor};
use crate::http::transport::Transport;
use crate::models::{LoginResponse, RefreshRequest};
use crate::storage::TokenStore;
use async_trait::async_trait;
use std::sync::Arc;

/// Pipeline settings
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Full URL of the credential refresh endpoint
    pub refresh_url: String,

    /// Hosts (and their subdomains) that never receive first-party credentials
    pub external_hosts: Vec<String>,
}

impl PipelineOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            refresh_url: config.refresh_url(),
            external_hosts: config.external_hosts.clone(),
        }
    }
}

/// Transport decorator adding bearer auth and one-shot refresh-and-retry
/// DOCUMENTATION: For a first-party request the flow is
/// attach token -> send -> on 401 with a stored refresh token: refresh once,
/// then retry the original request once with the new token.
/// A failed refresh clears credentials, redirects to login and yields
/// `ClientError::SessionExpired`. Concurrent 401s each refresh on their own.
pub struct AuthPipeline {
    inner: Arc<dyn Transport>,
    store: Arc<dyn TokenStore>,
    navigator: Arc<dyn Navigator>,
    options: PipelineOptions,
}

impl AuthPipeline {
    pub fn new(
        inner: Arc<dyn Transport>,
        store: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
        options: PipelineOptions,
    ) -> Self {
        let options = PipelineOptions {
            external_hosts: options
                .external_hosts
                .into_iter()
                .map(|h| h.to_ascii_lowercase())
                .collect(),
            ..options
        };

        Self {
            inner,
            store,
            navigator,
            options,
        }
    }

    /// Whether the request targets an allow-listed third-party host
    /// Unparsable URLs count as first-party
    pub fn is_external(&self, request: &RequestDescriptor) -> bool {
        let Some(host) = request.host() else {
            return false;
        };

        self.options.external_hosts.iter().any(|allowed| {
            host == *allowed
                || host
                    .strip_suffix(allowed.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }

    /// Exchange the refresh token for a new access token and persist it
    /// Sent on the inner transport so a rejected refresh cannot recurse
    async fn refresh(&self, refresh_token: &str) -> ClientResult<String> {
        let request = RequestDescriptor::post(&self.options.refresh_url).with_json(
            &RefreshRequest {
                refresh_token: refresh_token.to_string(),
            },
        )?;

        let response = self.inner.send(request).await?;
        let tokens: LoginResponse = response.json()?;
        if tokens.token.is_empty() {
            return Err(ClientError::Parse(
                "Refresh response carried no access token".to_string(),
            ));
        }

        self.store.set_access_token(&tokens.token)?;
        if let Some(rotated) = tokens.refresh_token.filter(|t| !t.is_empty()) {
            self.store.set_refresh_token(&rotated)?;
        }

        log::info!("Access token refreshed");
        Ok(tokens.token)
    }

    /// Terminal path: drop credentials and send the user to login
    fn expire_session(&self) -> ClientError {
        if let Err(e) = self.store.clear() {
            log::error!("Failed to clear stored credentials: {}", e);
        }
        self.navigator.redirect_to_login();
        ClientError::SessionExpired
    }
}

#[async_trait]
impl Transport for AuthPipeline {
    async fn send(&self, request: RequestDescriptor) -> ClientResult<ApiResponse> {
        if self.is_external(&request) {
            log::debug!("Forwarding external request unmodified: {}", request.url);
            return self.inner.send(request).await;
        }

        let attached = match self.store.access_token() {
            Some(token) => request.with_bearer(&token),
            None => request.clone(),
        };

        match self.inner.send(attached).await {
            Err(err) if err.is_unauthorized() => {
                let Some(refresh_token) = self.store.refresh_token() else {
                    return Err(err);
                };

                log::info!("Access token rejected for {}, refreshing", request.url);
                match self.refresh(&refresh_token).await {
                    Ok(token) => self.inner.send(request.with_bearer(&token)).await,
                    Err(refresh_err) => {
                        log::warn!("Credential refresh failed: {}", refresh_err);
                        Err(self.expire_session())
                    }
                }
            }
            other => other,
        }
    }
}

/// Wrap `inner` so every first-party request goes through the auth pipeline
pub fn with_auth(
    inner: Arc<dyn Transport>,
    store: Arc<dyn TokenStore>,
    navigator: Arc<dyn Navigator>,
    options: PipelineOptions,
) -> Arc<dyn Transport> {
    Arc::new(AuthPipeline::new(inner, store, navigator, options))
}
