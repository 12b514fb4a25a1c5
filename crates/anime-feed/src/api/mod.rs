//! Anime listing API client implementation.
//!
//! This module provides the endpoint resolver, the HTTP client with its
//! fail-soft accessors, and the tagged result those accessors return.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod fetched;

pub use client::AnimeApiClient;
pub use endpoints::Endpoint;
pub use error::FetchError;
pub use fetched::Fetched;
