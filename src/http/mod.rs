// src/http/mod.rs
// DOCUMENTATION: HTTP module organization
// PURPOSE: Re-export request values, transports and the auth pipeline

pub mod auth_pipeline;
pub mod navigator;
pub mod request;
pub mod transport;

pub use auth_pipeline::*;
pub use navigator::*;
pub use request::*;
pub use transport::*;
