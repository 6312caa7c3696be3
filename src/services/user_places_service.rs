// src/services/user_places_service.rs
// DOCUMENTATION: User-owned place listings
// PURPOSE: Create, update, list and delete the current user's places

use crate::errors::ClientResult;
use crate::http::FormPart;
use crate::models::{CreateUserPlace, PhotoUpload, Place, UpdateUserPlace};
use crate::services::api_client::ApiClient;
use reqwest::Method;
use serde::Serialize;
use validator::Validate;

const BASE_PATH: &str = "/api/places/user";

/// Access to /api/places/user
#[derive(Clone)]
pub struct UserPlacesService {
    api: ApiClient,
}

impl UserPlacesService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// POST multipart: `data` JSON part plus optional `photo`
    pub async fn create(
        &self,
        place: &CreateUserPlace,
        photo: Option<&PhotoUpload>,
    ) -> ClientResult<Place> {
        place.validate()?;
        let parts = form_parts(place, photo)?;

        let created: Place = self.api.send_multipart(Method::POST, BASE_PATH, parts).await?;
        log::info!("Created place {} ({})", created.id, created.name);
        Ok(created)
    }

    /// PATCH multipart; only present fields change
    pub async fn update(
        &self,
        id: i64,
        changes: &UpdateUserPlace,
        photo: Option<&PhotoUpload>,
    ) -> ClientResult<Place> {
        changes.validate()?;
        let parts = form_parts(changes, photo)?;

        self.api
            .send_multipart(Method::PATCH, &format!("{}/{}", BASE_PATH, id), parts)
            .await
    }

    /// GET /mine
    pub async fn list_mine(&self) -> ClientResult<Vec<Place>> {
        self.api.get_json(&format!("{}/mine", BASE_PATH), &[]).await
    }

    pub async fn get_one(&self, id: i64) -> ClientResult<Place> {
        self.api
            .get_json(&format!("{}/{}", BASE_PATH, id), &[])
            .await
    }

    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        self.api.delete(&format!("{}/{}", BASE_PATH, id)).await?;
        log::info!("Deleted place {}", id);
        Ok(())
    }
}

fn form_parts<T: Serialize>(data: &T, photo: Option<&PhotoUpload>) -> ClientResult<Vec<FormPart>> {
    let mut parts = vec![FormPart::json("data", data)?];
    if let Some(photo) = photo {
        photo.validate()?;
        parts.push(FormPart::file(
            "photo",
            &photo.filename,
            &photo.content_type,
            photo.bytes.clone(),
        ));
    }
    Ok(parts)
}
