// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod api_client;
pub mod auth_service;
pub mod cache;
pub mod community_service;
pub mod favorites_service;
pub mod filters;
pub mod google_places_client;
pub mod opening_hours;
pub mod places_service;
pub mod user_places_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use api_client::*;
pub use auth_service::*;
pub use cache::*;
pub use community_service::*;
pub use favorites_service::*;
pub use google_places_client::*;
pub use opening_hours::*;
pub use places_service::*;
pub use user_places_service::*;
