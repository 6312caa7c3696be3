// src/services/test_support.rs
// Shared fixtures for service tests against a wiremock backend

use crate::http::{with_auth, LoginRedirect, PipelineOptions, ReqwestTransport};
use crate::services::api_client::ApiClient;
use crate::storage::MemoryTokenStore;
use std::sync::Arc;
use wiremock::MockServer;

pub(crate) struct TestClient {
    pub api: ApiClient,
    pub store: Arc<MemoryTokenStore>,
    pub navigator: Arc<LoginRedirect>,
}

/// ApiClient over the real pipeline and reqwest, pointed at `server`
pub(crate) fn client_for(server: &MockServer) -> TestClient {
    let store = Arc::new(MemoryTokenStore::new());
    let navigator = Arc::new(LoginRedirect::new("/auth/login"));
    let transport = with_auth(
        Arc::new(ReqwestTransport::default()),
        store.clone(),
        navigator.clone(),
        PipelineOptions {
            refresh_url: format!("{}/auth/refresh", server.uri()),
            external_hosts: vec!["places.googleapis.com".to_string()],
        },
    );

    TestClient {
        api: ApiClient::new(transport, server.uri()),
        store,
        navigator,
    }
}
