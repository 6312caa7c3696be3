// src/services/google_places_client.rs
// DOCUMENTATION: Google Places API client
// PURPOSE: Text search, result paging and photo URLs against the maps provider

use crate::errors::{ClientError, ClientResult};
use crate::http::{RequestDescriptor, Transport};
use crate::services::cache::PlacesCache;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Places API (v1) base URL
pub const PLACES_API_BASE: &str = "https://places.googleapis.com/v1";

/// Legacy Maps Places web service base URL
pub const MAPS_API_BASE: &str = "https://maps.googleapis.com/maps/api/place";

/// Fields returned by text search
pub const SEARCH_FIELD_MASK: &str = "places.displayName,places.location";

pub const SEARCH_LANGUAGE: &str = "fr";

/// Width used for photo URLs when none is requested
pub const DEFAULT_PHOTO_WIDTH: u32 = 400;

/// Google Places API client
/// DOCUMENTATION: Requests go through the shared transport; the provider's
/// hosts are on the pipeline allow-list so no first-party bearer is attached.
/// The provider key travels in its own header or query parameter.
pub struct GooglePlacesClient {
    transport: Arc<dyn Transport>,
    api_key: String,
    places_base: String,
    maps_base: String,
    cache: PlacesCache,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TextSearchRequest<'a> {
    text_query: &'a str,
    language_code: &'a str,
}

#[derive(Debug, Deserialize)]
struct TextSearchResponse {
    #[serde(default)]
    places: Vec<SearchPlace>,
}

/// Text search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPlace {
    #[serde(default)]
    pub display_name: Option<LocalizedText>,
    #[serde(default)]
    pub location: Option<LatLng>,
}

impl SearchPlace {
    pub fn name(&self) -> Option<&str> {
        self.display_name.as_ref().map(|n| n.text.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedText {
    pub text: String,
    #[serde(default)]
    pub language_code: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

/// Legacy text search page
/// DOCUMENTATION: Same envelope the backend proxy returns for city/type search
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GooglePlacesResponse {
    #[serde(default)]
    pub results: Vec<GooglePlace>,
    pub status: String,
    pub next_page_token: Option<String>,
    pub error_message: Option<String>,
}

/// Individual place from the legacy web service
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GooglePlace {
    pub place_id: String,
    pub name: String,
    pub formatted_address: Option<String>,
    pub vicinity: Option<String>,
    pub rating: Option<f64>,
    pub opening_hours: Option<GoogleOpeningHours>,
    pub photos: Option<Vec<GooglePhoto>>,
}

impl GooglePlace {
    pub fn photo_reference(&self) -> Option<&str> {
        self.photos
            .as_ref()
            .and_then(|photos| photos.first())
            .map(|p| p.photo_reference.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GoogleOpeningHours {
    pub open_now: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GooglePhoto {
    pub photo_reference: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

impl GooglePlacesClient {
    pub fn new(transport: Arc<dyn Transport>, api_key: impl Into<String>, cache: PlacesCache) -> Self {
        Self {
            transport,
            api_key: api_key.into(),
            places_base: PLACES_API_BASE.to_string(),
            maps_base: MAPS_API_BASE.to_string(),
            cache,
        }
    }

    /// Point the client at other hosts (tests, proxies)
    pub fn with_base_urls(mut self, places_base: &str, maps_base: &str) -> Self {
        self.places_base = places_base.trim_end_matches('/').to_string();
        self.maps_base = maps_base.trim_end_matches('/').to_string();
        self
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    fn require_key(&self) -> ClientResult<()> {
        if self.has_api_key() {
            Ok(())
        } else {
            Err(ClientError::InvalidInput(
                "GOOGLE_PLACES_API_KEY is not configured".to_string(),
            ))
        }
    }

    /// Free-text search
    /// A blank query returns no results without calling the provider
    pub async fn text_search(&self, query: &str) -> ClientResult<Vec<SearchPlace>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        self.require_key()?;

        let key = PlacesCache::search_key(query, SEARCH_LANGUAGE);
        let body = match self.cache.get(&key).await {
            Some(cached) => cached,
            None => {
                log::debug!("Google text search: query={}", query);
                let request = RequestDescriptor::post(format!("{}/places:searchText", self.places_base))
                    .with_json(&TextSearchRequest {
                        text_query: query,
                        language_code: SEARCH_LANGUAGE,
                    })?
                    .with_header("X-Goog-Api-Key", self.api_key.as_str())
                    .with_header("X-Goog-FieldMask", SEARCH_FIELD_MASK);

                let response = self.transport.send(request).await.map_err(provider_error)?;
                let text = response.text();
                self.cache.set(key, text.clone()).await;
                text
            }
        };

        let parsed: TextSearchResponse = serde_json::from_str(&body)
            .map_err(|e| ClientError::ExternalApiError(format!("Parse error: {}", e)))?;
        log::info!("Google text search returned {} places", parsed.places.len());
        Ok(parsed.places)
    }

    /// Best match for `query`, if any
    pub async fn first_result(&self, query: &str) -> ClientResult<Option<SearchPlace>> {
        Ok(self.text_search(query).await?.into_iter().next())
    }

    /// Follow a `next_page_token` from a city/type search
    pub async fn next_page(&self, page_token: &str) -> ClientResult<GooglePlacesResponse> {
        self.require_key()?;

        let key = PlacesCache::page_key(page_token);
        let (body, fresh) = match self.cache.get(&key).await {
            Some(cached) => (cached, false),
            None => {
                let request = RequestDescriptor::get(format!("{}/textsearch/json", self.maps_base))
                    .with_query(&[
                        ("pagetoken", page_token.to_string()),
                        ("key", self.api_key.clone()),
                    ])?;
                let text = self
                    .transport
                    .send(request)
                    .await
                    .map_err(provider_error)?
                    .text();
                (text, true)
            }
        };

        let page: GooglePlacesResponse = serde_json::from_str(&body)
            .map_err(|e| ClientError::ExternalApiError(format!("Parse error: {}", e)))?;

        match page.status.as_str() {
            "OK" | "ZERO_RESULTS" => {
                // Only successful pages are cached; a token used too early must stay retryable
                if fresh {
                    self.cache.set(key, body).await;
                }
                Ok(page)
            }
            "OVER_QUERY_LIMIT" => {
                log::error!("Google Places API quota exceeded");
                Err(ClientError::RateLimitExceeded)
            }
            other => {
                let msg = page
                    .error_message
                    .unwrap_or_else(|| format!("Unknown status: {}", other));
                log::error!("Google Places API error: {}", msg);
                Err(ClientError::ExternalApiError(msg))
            }
        }
    }

    /// Direct photo URL for a photo reference
    pub fn photo_url(&self, photo_reference: &str, max_width: Option<u32>) -> String {
        let width = max_width.unwrap_or(DEFAULT_PHOTO_WIDTH).to_string();
        let base = format!("{}/photo", self.maps_base);
        match Url::parse_with_params(
            &base,
            &[
                ("maxwidth", width.as_str()),
                ("photo_reference", photo_reference),
                ("key", self.api_key.as_str()),
            ],
        ) {
            Ok(url) => url.to_string(),
            Err(_) => format!(
                "{}?maxwidth={}&photo_reference={}&key={}",
                base, width, photo_reference, self.api_key
            ),
        }
    }
}

/// Provider failures are reported as external errors, except quota and network
fn provider_error(error: ClientError) -> ClientError {
    match error {
        ClientError::RateLimitExceeded | ClientError::NetworkFailure(_) => error,
        ClientError::Unauthorized(body) => {
            log::error!("Google Places API rejected the key");
            ClientError::ExternalApiError(format!("API error 401: {}", body))
        }
        ClientError::Http { status, message } => {
            log::error!("Google Places API error {}: {}", status, message);
            ClientError::ExternalApiError(format!("API error {}: {}", status, message))
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{with_auth, LoginRedirect, PipelineOptions, ReqwestTransport};
    use crate::storage::{MemoryTokenStore, TokenStore};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, headers, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Client whose provider hosts point at `server`, which is allow-listed
    fn client(server: &MockServer, api_key: &str) -> GooglePlacesClient {
        let store = Arc::new(MemoryTokenStore::new());
        store.set_access_token("T1").unwrap();
        store.set_refresh_token("R1").unwrap();

        let transport = with_auth(
            Arc::new(ReqwestTransport::default()),
            store,
            Arc::new(LoginRedirect::new("/auth/login")),
            PipelineOptions {
                refresh_url: format!("{}/auth/refresh", server.uri()),
                external_hosts: vec!["127.0.0.1".to_string()],
            },
        );

        GooglePlacesClient::new(transport, api_key, PlacesCache::new(60))
            .with_base_urls(&format!("{}/v1", server.uri()), &format!("{}/maps", server.uri()))
    }

    #[tokio::test]
    async fn test_text_search_sends_provider_headers_without_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/places:searchText"))
            .and(header("x-goog-api-key", "KEY"))
            .and(headers(
                "x-goog-fieldmask",
                vec!["places.displayName", "places.location"],
            ))
            .and(body_json(json!({"textQuery": "Place de la Bourse", "languageCode": "fr"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "places": [{
                    "displayName": {"text": "Place de la Bourse", "languageCode": "fr"},
                    "location": {"latitude": 44.8412, "longitude": -0.5695}
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let google = client(&server, "KEY");
        let first = google.first_result(" Place de la Bourse ").await.unwrap().unwrap();
        assert_eq!(first.name(), Some("Place de la Bourse"));
        assert_eq!(first.location.unwrap().latitude, 44.8412);

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn test_text_search_is_cached() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/places:searchText"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"places": []})))
            .expect(1)
            .mount(&server)
            .await;

        let google = client(&server, "KEY");
        assert!(google.text_search("Bordeaux").await.unwrap().is_empty());
        assert!(google.text_search("bordeaux").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_query_makes_no_call() {
        let server = MockServer::start().await;
        let google = client(&server, "");

        assert!(google.text_search("   ").await.unwrap().is_empty());
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_key_is_rejected() {
        let server = MockServer::start().await;
        let google = client(&server, "");
        assert!(matches!(
            google.text_search("Bordeaux").await,
            Err(ClientError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_provider_401_is_not_refreshed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/places:searchText"))
            .respond_with(ResponseTemplate::new(401).set_body_string("API key not valid"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/auth/refresh"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "T2"})))
            .expect(0)
            .mount(&server)
            .await;

        let google = client(&server, "BAD");
        assert!(matches!(
            google.text_search("Bordeaux").await,
            Err(ClientError::ExternalApiError(_))
        ));
    }

    #[tokio::test]
    async fn test_next_page_status_handling() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/maps/textsearch/json"))
            .and(query_param("pagetoken", "NEXT"))
            .and(query_param("key", "KEY"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "OK",
                "results": [{
                    "place_id": "ChIJ9",
                    "name": "Café Piha",
                    "rating": 4.6,
                    "photos": [{"photo_reference": "ref-9", "width": 800, "height": 600}]
                }]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/maps/textsearch/json"))
            .and(query_param("pagetoken", "SPENT"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "OVER_QUERY_LIMIT",
                "results": []
            })))
            .mount(&server)
            .await;

        let google = client(&server, "KEY");
        let page = google.next_page("NEXT").await.unwrap();
        assert_eq!(page.results[0].photo_reference(), Some("ref-9"));
        assert!(page.next_page_token.is_none());

        assert_eq!(
            google.next_page("SPENT").await.unwrap_err(),
            ClientError::RateLimitExceeded
        );
    }

    #[tokio::test]
    async fn test_next_page_error_is_not_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/maps/textsearch/json"))
            .and(query_param("pagetoken", "EARLY"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "INVALID_REQUEST",
                "results": []
            })))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/maps/textsearch/json"))
            .and(query_param("pagetoken", "EARLY"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "OK",
                "results": [{"place_id": "ChIJ5", "name": "Marché des Capucins"}]
            })))
            .mount(&server)
            .await;

        let google = client(&server, "KEY");
        assert_eq!(
            google.next_page("EARLY").await.unwrap_err(),
            ClientError::ExternalApiError("Unknown status: INVALID_REQUEST".to_string())
        );

        let page = google.next_page("EARLY").await.unwrap();
        assert_eq!(page.results[0].name, "Marché des Capucins");

        // The successful page is served from the cache from now on
        google.next_page("EARLY").await.unwrap();
        assert_eq!(server.received_requests().await.unwrap().len(), 2);
    }

    #[test]
    fn test_photo_url() {
        let google = GooglePlacesClient::new(
            Arc::new(ReqwestTransport::default()),
            "KEY",
            PlacesCache::new(60),
        );
        assert_eq!(
            google.photo_url("ref-1", None),
            "https://maps.googleapis.com/maps/api/place/photo?maxwidth=400&photo_reference=ref-1&key=KEY"
        );
        assert!(google.photo_url("ref-1", Some(1600)).contains("maxwidth=1600"));
    }
}
