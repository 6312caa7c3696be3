// src/http/transport.rs
// DOCUMENTATION: Network send capability
// PURPOSE: Abstract "perform this request" so it can be decorated and faked

use crate::errors::{ClientError, ClientResult};
use crate::http::request::{ApiResponse, RequestBody, RequestDescriptor};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;

/// Something that can send a request and report the outcome
/// DOCUMENTATION: Non-2xx statuses are failures, mapped with
/// `ClientError::from_status`; a missing response is `NetworkFailure`
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: RequestDescriptor) -> ClientResult<ApiResponse>;
}

/// Transport backed by reqwest
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn build_form(parts: &[crate::http::request::FormPart]) -> ClientResult<Form> {
        let mut form = Form::new();
        for part in parts {
            let mut field = Part::bytes(part.bytes.clone());
            if let Some(filename) = &part.filename {
                field = field.file_name(filename.clone());
            }
            if let Some(content_type) = &part.content_type {
                field = field.mime_str(content_type).map_err(|e| {
                    ClientError::InvalidInput(format!("Invalid content type {}: {}", content_type, e))
                })?;
            }
            form = form.part(part.name.clone(), field);
        }
        Ok(form)
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new(Client::new())
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: RequestDescriptor) -> ClientResult<ApiResponse> {
        log::debug!("{} {}", request.method, request.url);

        let mut builder = self.client.request(request.method.clone(), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(parts) => builder.multipart(Self::build_form(parts)?),
        };

        let response = builder.send().await.map_err(|e| {
            log::error!("Request to {} failed: {}", request.url, e);
            ClientError::NetworkFailure(e.to_string())
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::NetworkFailure(format!("Failed to read body: {}", e)))?
            .to_vec();

        if (200..300).contains(&status) {
            return Ok(ApiResponse {
                status,
                headers,
                body,
            });
        }

        let text = String::from_utf8_lossy(&body).into_owned();
        if status == 401 {
            log::warn!("{} {} answered 401", request.method, request.url);
        } else {
            log::error!("{} {} answered {}: {}", request.method, request.url, status, text);
        }
        Err(ClientError::from_status(status, &text))
    }
}
