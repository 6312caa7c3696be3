// src/services/places_service.rs
// DOCUMENTATION: Backend-proxied maps search
// PURPOSE: City/type search, details and photos relayed by the backend

use crate::errors::ClientResult;
use crate::services::api_client::ApiClient;
use serde_json::Value;

/// Default width requested for proxied photos
pub const PROXY_PHOTO_WIDTH: u32 = 900;

/// Maps search relayed through /api/places
/// DOCUMENTATION: The backend forwards the provider's JSON untouched, so
/// results are returned as raw values
#[derive(Clone)]
pub struct PlacesService {
    api: ApiClient,
}

impl PlacesService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// GET /api/places?ville=&type=
    pub async fn search(&self, city: &str, place_type: &str) -> ClientResult<Value> {
        log::debug!("Proxied search: city={}, type={}", city, place_type);
        self.api
            .get_json(
                "/api/places",
                &[("ville", city.to_string()), ("type", place_type.to_string())],
            )
            .await
    }

    /// GET /api/places/details?placeId=&fields=
    pub async fn details(&self, place_id: &str, fields: Option<&str>) -> ClientResult<Value> {
        let mut params = vec![("placeId", place_id.to_string())];
        if let Some(fields) = fields.filter(|f| !f.trim().is_empty()) {
            params.push(("fields", fields.to_string()));
        }
        self.api.get_json("/api/places/details", &params).await
    }

    /// GET /api/places/photo, returning the image bytes
    pub async fn photo(&self, reference: &str, max_width: Option<u32>) -> ClientResult<Vec<u8>> {
        self.api
            .get_bytes(
                "/api/places/photo",
                &[
                    ("photoreference", reference.to_string()),
                    (
                        "maxwidth",
                        max_width.unwrap_or(PROXY_PHOTO_WIDTH).to_string(),
                    ),
                ],
            )
            .await
    }
}
