// src/http/request.rs
// DOCUMENTATION: Outgoing request descriptors and received responses
// PURPOSE: Plain-data values that can be cloned and re-sent after a refresh

use crate::errors::{ClientError, ClientResult};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

pub const AUTHORIZATION: &str = "Authorization";

/// One part of a multipart form body
#[derive(Debug, Clone, PartialEq)]
pub struct FormPart {
    pub name: String,
    pub bytes: Vec<u8>,
    pub filename: Option<String>,
    pub content_type: Option<String>,
}

impl FormPart {
    /// JSON part, sent with `application/json` so the backend can bind it
    pub fn json<T: Serialize>(name: &str, value: &T) -> ClientResult<Self> {
        Ok(Self {
            name: name.to_string(),
            bytes: serde_json::to_vec(value)?,
            filename: None,
            content_type: Some("application/json".to_string()),
        })
    }

    pub fn file(name: &str, filename: &str, content_type: &str, bytes: Vec<u8>) -> Self {
        Self {
            name: name.to_string(),
            bytes,
            filename: Some(filename.to_string()),
            content_type: Some(content_type.to_string()),
        }
    }
}

/// Request payload
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(Vec<FormPart>),
}

/// Outgoing request descriptor
/// DOCUMENTATION: Immutable value handed to a Transport; derived copies are
/// produced with `with_header` instead of mutating in place
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl RequestDescriptor {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    /// Append query parameters to the target URL
    pub fn with_query(mut self, params: &[(&str, String)]) -> ClientResult<Self> {
        if params.is_empty() {
            return Ok(self);
        }
        let url = Url::parse_with_params(&self.url, params)
            .map_err(|e| ClientError::InvalidInput(format!("Invalid URL {}: {}", self.url, e)))?;
        self.url = url.to_string();
        Ok(self)
    }

    /// Copy of this descriptor with `name` set to `value`
    /// Any existing header with the same name (case-insensitive) is replaced
    pub fn with_header(&self, name: &str, value: impl Into<String>) -> Self {
        let mut derived = self.clone();
        derived
            .headers
            .retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
        derived.headers.push((name.to_string(), value.into()));
        derived
    }

    /// Copy of this descriptor carrying `Authorization: Bearer <token>`
    pub fn with_bearer(&self, token: &str) -> Self {
        self.with_header(AUTHORIZATION, format!("Bearer {}", token))
    }

    pub fn with_json<T: Serialize>(mut self, body: &T) -> ClientResult<Self> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn with_multipart(mut self, parts: Vec<FormPart>) -> Self {
        self.body = RequestBody::Multipart(parts);
        self
    }

    /// First value of header `name`
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Number of headers named `name`
    pub fn header_count(&self, name: &str) -> usize {
        self.headers
            .iter()
            .filter(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .count()
    }

    /// Lowercased target host, None when the URL does not parse
    pub fn host(&self) -> Option<String> {
        Url::parse(&self.url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_ascii_lowercase))
    }
}

/// Response received from a Transport
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn json<T: DeserializeOwned>(&self) -> ClientResult<T> {
        serde_json::from_slice(&self.body)
            .map_err(|e| ClientError::Parse(format!("Invalid response body: {}", e)))
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}
