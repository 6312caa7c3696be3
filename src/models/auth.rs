// src/models/auth.rs
// DOCUMENTATION: Authentication data structures
// PURPOSE: Credential pair, login/register DTOs and the user profile

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validators::{letters_only, not_blank, strong_password};

/// Access/refresh token pair held in persisted storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Request DTO for POST /auth/login
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[serde(rename = "motDePasse")]
    #[validate(custom = "not_blank")]
    pub password: String,
}

/// Request DTO for POST /auth/register
/// DOCUMENTATION: Mirrors the registration form rules
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name
    #[serde(rename = "nom")]
    #[validate(length(min = 2, max = 50), custom = "letters_only")]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[serde(rename = "motDePasse")]
    #[validate(length(min = 8, max = 128), custom = "strong_password")]
    pub password: String,

    /// Home city
    #[serde(rename = "ville")]
    #[validate(length(min = 2, max = 100), custom = "letters_only")]
    pub city: String,

    #[serde(default = "default_role")]
    pub role: String,
}

fn default_role() -> String {
    "USER".to_string()
}

impl RegisterRequest {
    pub fn new(name: &str, email: &str, password: &str, city: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            city: city.to_string(),
            role: default_role(),
        }
    }
}

/// Response of login, refresh and profile update
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,

    /// Absent when the backend keeps the current refresh token
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Request DTO for POST /auth/refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Authenticated user profile from GET /auth/me
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,

    #[serde(rename = "nom")]
    pub name: String,

    pub email: String,

    #[serde(rename = "adresse", default)]
    pub address: Option<String>,

    #[serde(rename = "ville", default)]
    pub city: Option<String>,

    #[serde(rename = "profilPhoto", default)]
    pub profile_photo: Option<String>,

    #[serde(default)]
    pub role: Option<String>,
}

/// Request DTO for PUT /auth/update; only present fields change
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[serde(rename = "nom", skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 2, max = 50), custom = "letters_only")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email)]
    pub email: Option<String>,

    #[serde(rename = "adresse", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(rename = "ville", skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 2, max = 100), custom = "letters_only")]
    pub city: Option<String>,

    #[serde(rename = "motDePasse", skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 8, max = 128), custom = "strong_password")]
    pub password: Option<String>,
}
