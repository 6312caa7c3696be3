//! End-to-end session tests against a wiremock backend
//!
//! Covers login, transparent refresh after an expired access token, and
//! session expiry when the refresh token is rejected. Credentials live in a
//! file token store so persistence across clients is exercised too.

use places_client::config::Config;
use places_client::http::{with_auth, LoginRedirect, PipelineOptions, ReqwestTransport};
use places_client::models::LoginRequest;
use places_client::services::{ApiClient, AuthService, FavoritesService};
use places_client::storage::{FileTokenStore, TokenStore};
use places_client::ClientError;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Session {
    api: ApiClient,
    store: Arc<FileTokenStore>,
    navigator: Arc<LoginRedirect>,
}

fn session(server: &MockServer, token_path: &std::path::Path) -> Session {
    let config = Config {
        api_base_url: server.uri(),
        token_store_path: token_path.to_path_buf(),
        ..Config::default()
    };

    let store = Arc::new(FileTokenStore::open(&config.token_store_path).unwrap());
    let navigator = Arc::new(LoginRedirect::new(config.login_route.clone()));
    let transport = with_auth(
        Arc::new(ReqwestTransport::default()),
        store.clone(),
        navigator.clone(),
        PipelineOptions::from_config(&config),
    );

    Session {
        api: ApiClient::new(transport, config.api_base_url.clone()),
        store,
        navigator,
    }
}

#[tokio::test]
async fn test_expired_token_is_refreshed_and_request_retried() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let token_path = dir.path().join("tokens.json");

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"token": "T1", "refreshToken": "R1"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/favorites"))
        .and(header("authorization", "Bearer T1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .and(body_json(json!({"refreshToken": "R1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "T2"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/favorites"))
        .and(header("authorization", "Bearer T2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"placeId": "ChIJ1", "name": "Café Oz"}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let first = session(&server, &token_path);
    AuthService::new(first.api.clone(), first.store.clone())
        .login(&LoginRequest {
            email: "marie@example.com".to_string(),
            password: "Secret1!".to_string(),
        })
        .await
        .unwrap();

    // A second client picks up the stored pair from disk
    let second = session(&server, &token_path);
    let favorites = FavoritesService::new(second.api.clone()).list().await.unwrap();

    assert_eq!(favorites.len(), 1);
    assert_eq!(second.store.access_token().as_deref(), Some("T2"));
    assert_eq!(second.store.refresh_token().as_deref(), Some("R1"));
    assert_eq!(second.navigator.redirect_count(), 0);
}

#[tokio::test]
async fn test_rejected_refresh_ends_session() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let token_path = dir.path().join("tokens.json");

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    let client = session(&server, &token_path);
    client.store.set_access_token("stale").unwrap();
    client.store.set_refresh_token("revoked").unwrap();

    let auth = AuthService::new(client.api.clone(), client.store.clone());
    assert_eq!(auth.me().await.unwrap_err(), ClientError::SessionExpired);
    assert!(!auth.is_authenticated());
    assert_eq!(client.navigator.redirect_count(), 1);

    // The cleared state is what a fresh client sees
    let reopened = FileTokenStore::open(&token_path).unwrap();
    assert!(reopened.access_token().is_none());
    assert!(reopened.refresh_token().is_none());
}

#[tokio::test]
async fn test_unauthenticated_401_is_returned_as_is() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/api/places/user/mine"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Login required"))
        .expect(1)
        .mount(&server)
        .await;

    let client = session(&server, &dir.path().join("tokens.json"));
    let result = places_client::services::UserPlacesService::new(client.api.clone())
        .list_mine()
        .await;

    assert_eq!(
        result.unwrap_err(),
        ClientError::Unauthorized("Login required".to_string())
    );
    assert_eq!(client.navigator.redirect_count(), 0);
}
