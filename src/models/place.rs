// src/models/place.rs
// DOCUMENTATION: Core data structures for places
// PURPOSE: Catalog records, paging envelope and user-place request DTOs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validators::{letters_only, not_blank, validate_postal_code, validate_price_range};
use crate::errors::{ClientError, ClientResult};
use crate::services::opening_hours::{self, OpeningStatus};

/// Largest accepted photo upload (5 MB)
pub const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

/// Accepted photo content types
pub const ALLOWED_PHOTO_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/webp"];

/// A place listing from the community catalog or the user's own places
/// DOCUMENTATION: Same shape for /api/places/public and /api/places/user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    /// Backend identifier
    pub id: i64,

    /// Place name
    pub name: String,

    /// Photo URL, relative to the backend (e.g., "/media/...") or absolute
    #[serde(default)]
    pub image_url: Option<String>,

    /// Owner's user id
    #[serde(default)]
    pub created_by_id: Option<i64>,

    /// Serialized WeeklySchedule, parsed on demand
    #[serde(default)]
    pub opening_hours_json: Option<String>,

    #[serde(default)]
    pub address_line: Option<String>,

    #[serde(default)]
    pub city: Option<String>,

    #[serde(default)]
    pub postal_code: Option<String>,

    #[serde(default)]
    pub country: Option<String>,

    /// Category label (e.g., "Cafe", "Park")
    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub short_description: Option<String>,

    /// Average spend in euros
    #[serde(default)]
    pub avg_price: Option<i32>,

    /// "€", "€€", "€€€" or empty for automatic
    #[serde(default)]
    pub price_range: Option<String>,
}

impl Place {
    /// Opening status at `at` (local wall-clock time)
    pub fn opening_status(&self, at: NaiveDateTime) -> OpeningStatus {
        opening_hours::evaluate(self.opening_hours_json.as_deref(), at)
    }
}

/// Spring-style page envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResp<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub first: bool,
    #[serde(default)]
    pub last: bool,
    #[serde(default)]
    pub empty: bool,
}

/// Price badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceRange {
    Low,
    Mid,
    High,
}

impl PriceRange {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol.trim() {
            "€" => Some(PriceRange::Low),
            "€€" => Some(PriceRange::Mid),
            "€€€" => Some(PriceRange::High),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            PriceRange::Low => "€",
            PriceRange::Mid => "€€",
            PriceRange::High => "€€€",
        }
    }
}

/// Request DTO for creating a user place
/// DOCUMENTATION: Sent as the `data` JSON part of a multipart POST
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserPlace {
    #[validate(length(min = 2, max = 120), custom = "not_blank")]
    pub name: String,

    #[validate(custom = "not_blank")]
    pub category: String,

    #[validate(custom = "not_blank")]
    pub address_line: String,

    #[validate(length(max = 80), custom = "letters_only")]
    pub city: String,

    #[validate(custom = "validate_postal_code")]
    pub postal_code: String,

    #[validate(custom = "not_blank")]
    pub country: String,

    #[validate(length(max = 200), custom = "not_blank")]
    pub short_description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom = "validate_price_range")]
    pub price_range: Option<String>,

    #[serde(default)]
    #[validate(range(min = 0))]
    pub avg_price: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 4000))]
    pub opening_hours_json: Option<String>,
}

/// Request DTO for updating a user place; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserPlace {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 2, max = 120))]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 80), custom = "letters_only")]
    pub city: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom = "validate_postal_code")]
    pub postal_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 200))]
    pub short_description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom = "validate_price_range")]
    pub price_range: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0))]
    pub avg_price: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 4000))]
    pub opening_hours_json: Option<String>,
}

/// Photo attached to a create/update request
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoUpload {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl PhotoUpload {
    /// PNG, JPEG or WEBP up to 5 MB
    pub fn validate(&self) -> ClientResult<()> {
        if !ALLOWED_PHOTO_TYPES.contains(&self.content_type.as_str()) {
            return Err(ClientError::InvalidInput(
                "Please choose a PNG, JPEG or WEBP image.".to_string(),
            ));
        }
        if self.bytes.len() > MAX_PHOTO_BYTES {
            return Err(ClientError::InvalidInput(
                "Image is too large (max 5 MB).".to_string(),
            ));
        }
        Ok(())
    }
}
