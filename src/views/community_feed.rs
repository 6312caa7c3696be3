// src/views/community_feed.rs
// DOCUMENTATION: Community feed view-model
// PURPOSE: Accumulate public places page by page under the current filters

use crate::models::Place;
use crate::services::community_service::{CommunityQuery, CommunityService, DEFAULT_PAGE_SIZE};
use crate::services::filters;
use crate::services::opening_hours::OpeningStatus;
use chrono::NaiveDateTime;

pub const LOAD_ERROR: &str = "Failed to load places";

/// Paged community listing with "load more" semantics
/// DOCUMENTATION: `load` appends the next page; it does nothing while a
/// load is in flight or once the last page has been seen
pub struct CommunityFeed {
    service: CommunityService,
    backend_base: String,
    pub city: String,
    pub category: String,
    items: Vec<Place>,
    page: u32,
    size: u32,
    last: bool,
    loading: bool,
    error: Option<String>,
}

impl CommunityFeed {
    pub fn new(service: CommunityService, backend_base: impl Into<String>) -> Self {
        Self {
            service,
            backend_base: backend_base.into(),
            city: String::new(),
            category: String::new(),
            items: Vec::new(),
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            last: false,
            loading: false,
            error: None,
        }
    }

    pub fn items(&self) -> &[Place] {
        &self.items
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn is_last(&self) -> bool {
        self.last
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Fetch and append the next page
    pub async fn load(&mut self) {
        if self.loading || self.last {
            return;
        }
        self.loading = true;

        let query = CommunityQuery {
            page: self.page,
            size: Some(self.size),
            city: Some(self.city.clone()),
            category: Some(self.category.clone()),
        };

        match self.service.list(&query).await {
            Ok(page) => {
                self.items.extend(page.content);
                self.last = page.last;
                self.page += 1;
            }
            Err(e) => {
                log::warn!("Community page {} failed: {}", self.page, e);
                self.error = Some(e.server_message().unwrap_or_else(|| LOAD_ERROR.to_string()));
            }
        }
        self.loading = false;
    }

    /// Drop everything loaded so far and fetch the first page again
    pub async fn reset_and_load(&mut self) {
        self.items.clear();
        self.page = 0;
        self.last = false;
        self.error = None;
        self.load().await;
    }

    /// Change filters and reload from the first page
    pub async fn set_filters(&mut self, city: &str, category: &str) {
        self.city = city.to_string();
        self.category = category.to_string();
        self.reset_and_load().await;
    }

    pub fn image_for(&self, place: &Place) -> String {
        filters::image_url(place.image_url.as_deref(), &self.backend_base)
    }

    pub fn price_for(&self, place: &Place) -> Option<&'static str> {
        filters::price_badge(place)
    }

    pub fn status_for(&self, place: &Place, at: NaiveDateTime) -> OpeningStatus {
        place.opening_status(at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::client_for;
    use chrono::NaiveDate;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn page_body(ids: &[i64], number: u32, last: bool) -> serde_json::Value {
        json!({
            "content": ids.iter().map(|id| json!({"id": id, "name": format!("Place {}", id)})).collect::<Vec<_>>(),
            "number": number,
            "size": 12,
            "last": last
        })
    }

    #[tokio::test]
    async fn test_load_appends_until_last_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/places/public"))
            .and(query_param("page", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[1, 2], 0, false)))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/places/public"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[3], 1, true)))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let mut feed = CommunityFeed::new(CommunityService::new(client.api), server.uri());

        feed.load().await;
        assert_eq!(feed.items().len(), 2);
        assert_eq!(feed.page(), 1);
        assert!(!feed.is_last());

        feed.load().await;
        assert_eq!(feed.items().len(), 3);
        assert!(feed.is_last());

        // No request once the last page was reached
        feed.load().await;
        assert_eq!(feed.items().len(), 3);
        assert!(!feed.is_loading());
        assert!(feed.error().is_none());
    }

    #[tokio::test]
    async fn test_set_filters_restarts_from_first_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/places/public"))
            .and(query_param("category", "Park"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[7], 0, true)))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/places/public"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[1, 2, 3], 0, true)))
            .mount(&server)
            .await;

        let mut feed = CommunityFeed::new(CommunityService::new(client_for(&server).api), server.uri());
        feed.load().await;
        assert_eq!(feed.items().len(), 3);

        feed.set_filters("", "Park").await;
        assert_eq!(feed.items().len(), 1);
        assert_eq!(feed.items()[0].id, 7);
        assert_eq!(feed.page(), 1);
    }

    #[tokio::test]
    async fn test_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/places/public"))
            .and(query_param("city", "Lyon"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"message": "Unknown city"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/places/public"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut feed = CommunityFeed::new(CommunityService::new(client_for(&server).api), server.uri());
        feed.load().await;
        assert_eq!(feed.error(), Some(LOAD_ERROR));
        assert_eq!(feed.page(), 0);
        assert!(!feed.is_loading());

        feed.set_filters("Lyon", "").await;
        assert_eq!(feed.error(), Some("Unknown city"));
    }

    #[test]
    fn test_presentation_helpers() {
        let place: Place = serde_json::from_value(json!({
            "id": 1,
            "name": "Bar",
            "imageUrl": "/media/bar.png",
            "avgPrice": 30,
            "openingHoursJson": r#"{"fri":{"closed":false,"allDay":false,"open":"18:00","close":"02:00"}}"#
        }))
        .unwrap();

        let api = crate::services::ApiClient::new(
            std::sync::Arc::new(crate::http::ReqwestTransport::default()),
            "http://localhost:9091",
        );
        let feed = CommunityFeed::new(CommunityService::new(api), "http://localhost:9091");

        assert_eq!(feed.image_for(&place), "http://localhost:9091/media/bar.png");
        assert_eq!(feed.price_for(&place), Some("€€€"));

        // 2024-06-07 is a Friday
        let friday_night = NaiveDate::from_ymd_opt(2024, 6, 7)
            .unwrap()
            .and_hms_opt(23, 0, 0)
            .unwrap();
        assert_eq!(
            feed.status_for(&place, friday_night).to_string(),
            "Open now · until 02:00"
        );
    }
}
