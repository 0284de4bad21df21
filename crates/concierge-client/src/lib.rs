//! HTTP client for the guest backend.
//!
//! [`ApiClient`] implements [`concierge_core::api::GuestApi`] over JSON/HTTP
//! with `reqwest`. Transport failures, non-success statuses and undecodable
//! bodies all surface as [`NetworkError`]; nothing is retried.

mod client;

pub mod error;

pub use client::{ApiClient, ApiConfig, DEFAULT_BASE_URL};
pub use error::{NetworkError, Result};

#[cfg(test)]
mod tests;
