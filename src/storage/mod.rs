// src/storage/mod.rs
// DOCUMENTATION: Storage module organization
// PURPOSE: Re-export credential storage components

pub mod token_store;

pub use token_store::*;
