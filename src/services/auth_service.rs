// src/services/auth_service.rs
// DOCUMENTATION: Authentication service
// PURPOSE: Register, log in and out, and manage the stored credential pair

use crate::errors::{ClientError, ClientResult};
use crate::http::RequestDescriptor;
use crate::models::{
    CredentialPair, LoginRequest, LoginResponse, RegisterRequest, UpdateUserRequest, User,
};
use crate::services::api_client::ApiClient;
use crate::storage::TokenStore;
use reqwest::Method;
use std::sync::Arc;
use validator::Validate;

/// Authentication operations against /auth
pub struct AuthService {
    api: ApiClient,
    store: Arc<dyn TokenStore>,
}

impl AuthService {
    pub fn new(api: ApiClient, store: Arc<dyn TokenStore>) -> Self {
        Self { api, store }
    }

    /// POST /auth/register
    /// The new account still has to log in
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<User> {
        request.validate()?;
        let user: User = self.api.post_json("/auth/register", request).await?;
        log::info!("Registered user {}", user.id);
        Ok(user)
    }

    /// POST /auth/login and store the returned pair
    /// DOCUMENTATION: Any previous pair is dropped first, so a rejected
    /// login surfaces as 401 instead of triggering a refresh
    pub async fn login(&self, request: &LoginRequest) -> ClientResult<CredentialPair> {
        request.validate()?;
        self.store.clear()?;

        let response: LoginResponse = self.api.post_json("/auth/login", request).await?;
        let pair = into_pair(response)?;
        self.store.save(&pair)?;

        log::info!("Logged in");
        Ok(pair)
    }

    /// GET /auth/me
    pub async fn me(&self) -> ClientResult<User> {
        self.api.get_json("/auth/me", &[]).await
    }

    /// PUT /auth/update; the backend re-issues credentials
    pub async fn update_profile(&self, request: &UpdateUserRequest) -> ClientResult<CredentialPair> {
        request.validate()?;
        let response: LoginResponse = self.api.put_json("/auth/update", request).await?;

        let refresh_fallback = self.store.refresh_token();
        let pair = match (response.refresh_token.filter(|t| !t.is_empty()), refresh_fallback) {
            (Some(refresh_token), _) | (None, Some(refresh_token)) => CredentialPair {
                access_token: response.token,
                refresh_token,
            },
            (None, None) => into_pair(LoginResponse {
                token: response.token,
                refresh_token: None,
            })?,
        };
        self.store.save(&pair)?;
        Ok(pair)
    }

    /// POST /auth/logout, then clear local credentials
    /// The backend call is best-effort; credentials are cleared regardless
    pub async fn logout(&self) -> ClientResult<()> {
        if self.is_authenticated() {
            let request = RequestDescriptor::post(self.api.url("/auth/logout"));
            if let Err(e) = self.api.send(request).await {
                log::warn!("Backend logout failed: {}", e);
            }
        }

        self.store.clear()?;
        log::info!("Logged out");
        Ok(())
    }

    /// DELETE /auth/delete, then clear local credentials
    pub async fn delete_account(&self) -> ClientResult<()> {
        self.api
            .send(RequestDescriptor::new(
                Method::DELETE,
                self.api.url("/auth/delete"),
            ))
            .await?;
        self.store.clear()?;
        log::info!("Account deleted");
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.access_token().is_some()
    }
}

fn into_pair(response: LoginResponse) -> ClientResult<CredentialPair> {
    match response.refresh_token {
        Some(refresh_token) if !response.token.is_empty() && !refresh_token.is_empty() => {
            Ok(CredentialPair {
                access_token: response.token,
                refresh_token,
            })
        }
        _ => Err(ClientError::Parse(
            "Login response is missing a token".to_string(),
        )),
    }
}
