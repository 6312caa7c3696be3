// src/views/mod.rs
// DOCUMENTATION: View-model module organization
// PURPOSE: Re-export screen state holders

pub mod community_feed;

pub use community_feed::*;
