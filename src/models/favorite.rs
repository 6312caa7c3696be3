// src/models/favorite.rs
// DOCUMENTATION: Favorite place data structure
// PURPOSE: Snapshot of a third-party place saved by the user

use serde::{Deserialize, Serialize};

/// Favorite as stored by the backend
/// DOCUMENTATION: Keyed by the maps provider's place id; the other fields are
/// a snapshot taken when the favorite was added
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub place_id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub address: Option<String>,

    /// Maps provider photo reference
    #[serde(default)]
    pub photo_reference: Option<String>,

    #[serde(default)]
    pub rating: Option<f64>,

    #[serde(default)]
    pub open_now: Option<bool>,
}
