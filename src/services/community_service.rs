// src/services/community_service.rs
// DOCUMENTATION: Public community catalog
// PURPOSE: Paged listing of user-contributed places

use crate::errors::ClientResult;
use crate::models::{PageResp, Place};
use crate::services::api_client::ApiClient;

/// Default page size of the community listing
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Listing parameters; blank filters are not sent
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommunityQuery {
    pub page: u32,
    pub size: Option<u32>,
    pub city: Option<String>,
    pub category: Option<String>,
}

impl CommunityQuery {
    fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("size", self.size.unwrap_or(DEFAULT_PAGE_SIZE).to_string()),
        ];

        if let Some(city) = trimmed(&self.city) {
            params.push(("city", city));
        }
        if let Some(category) = trimmed(&self.category) {
            params.push(("category", category));
        }
        params
    }
}

fn trimmed(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Access to /api/places/public
#[derive(Clone)]
pub struct CommunityService {
    api: ApiClient,
}

impl CommunityService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// GET /api/places/public
    pub async fn list(&self, query: &CommunityQuery) -> ClientResult<PageResp<Place>> {
        let page: PageResp<Place> = self
            .api
            .get_json("/api/places/public", &query.to_params())
            .await?;
        log::debug!(
            "Community page {} returned {} places (last: {})",
            query.page,
            page.content.len(),
            page.last
        );
        Ok(page)
    }

    /// GET /api/places/public/{id}
    pub async fn get_one(&self, id: i64) -> ClientResult<Place> {
        self.api
            .get_json(&format!("/api/places/public/{}", id), &[])
            .await
    }
}
