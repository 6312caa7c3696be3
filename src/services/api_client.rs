// src/services/api_client.rs
// DOCUMENTATION: Backend REST client
// PURPOSE: Build descriptors against the backend base URL, send them through
// the shared transport, decode the responses

use crate::errors::ClientResult;
use crate::http::{ApiResponse, FormPart, RequestDescriptor, Transport};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Thin JSON client over a Transport
/// DOCUMENTATION: Every service holds a clone; the transport is normally the
/// auth pipeline so credentials are attached transparently
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    base_url: String,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> Arc<dyn Transport> {
        self.transport.clone()
    }

    /// Absolute URL for a backend path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn send(&self, request: RequestDescriptor) -> ClientResult<ApiResponse> {
        self.transport.send(request).await
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<T> {
        let request = RequestDescriptor::get(self.url(path)).with_query(query)?;
        self.send(request).await?.json()
    }

    pub async fn get_bytes(&self, path: &str, query: &[(&str, String)]) -> ClientResult<Vec<u8>> {
        let request = RequestDescriptor::get(self.url(path)).with_query(query)?;
        Ok(self.send(request).await?.body)
    }

    /// Send a JSON body and return the raw response
    pub async fn send_json<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ClientResult<ApiResponse> {
        let request = RequestDescriptor::new(method, self.url(path)).with_json(body)?;
        self.send(request).await
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send_json(Method::POST, path, body).await?.json()
    }

    pub async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send_json(Method::PUT, path, body).await?.json()
    }

    pub async fn send_multipart<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        parts: Vec<FormPart>,
    ) -> ClientResult<T> {
        let request = RequestDescriptor::new(method, self.url(path)).with_multipart(parts);
        self.send(request).await?.json()
    }

    /// DELETE, returning the response text (often a confirmation message)
    pub async fn delete(&self, path: &str) -> ClientResult<String> {
        let request = RequestDescriptor::new(Method::DELETE, self.url(path));
        Ok(self.send(request).await?.text())
    }
}
