// src/lib.rs
// DOCUMENTATION: Library root
// PURPOSE: Authenticated client for the places and favorites backend

pub mod config;
pub mod errors;
pub mod http;
pub mod models;
pub mod services;
pub mod storage;
pub mod views;

pub use errors::{ClientError, ClientResult};
