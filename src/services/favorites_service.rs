// src/services/favorites_service.rs
// DOCUMENTATION: Favorites service
// PURPOSE: List, add and remove the current user's favorite places

use crate::errors::ClientResult;
use crate::models::Favorite;
use crate::services::api_client::ApiClient;
use reqwest::Method;

/// Access to /favorites
#[derive(Clone)]
pub struct FavoritesService {
    api: ApiClient,
}

impl FavoritesService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> ClientResult<Vec<Favorite>> {
        self.api.get_json("/favorites", &[]).await
    }

    /// The backend answers with an empty body
    pub async fn add(&self, favorite: &Favorite) -> ClientResult<()> {
        self.api
            .send_json(Method::POST, "/favorites", favorite)
            .await?;
        log::info!("Added favorite {}", favorite.place_id);
        Ok(())
    }

    /// Returns the backend's confirmation text
    pub async fn delete(&self, place_id: &str) -> ClientResult<String> {
        let message = self.api.delete(&format!("/favorites/{}", place_id)).await?;
        log::info!("Removed favorite {}", place_id);
        Ok(message)
    }
}
