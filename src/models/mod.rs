// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod auth;
pub mod favorite;
pub mod place;
pub mod schedule;
pub mod validators;

pub use auth::*;
pub use favorite::*;
pub use place::*;
pub use schedule::*;
