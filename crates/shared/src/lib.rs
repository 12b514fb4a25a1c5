//! Shared library for the anime feed workspace.
//!
//! This crate provides the pieces every binary and library in the workspace
//! needs:
//! - Configuration management
//! - Logging infrastructure
//! - The record types handed to the rendering layer
//! - Lenient deserializers for inconsistent upstream scalars

pub mod config;
pub mod de;
pub mod logging;
pub mod models;

// Re-export commonly used types
pub use config::{ApiConfig, Config, LoggingConfig};
pub use logging::LogConfig;
pub use models::*;

/// Common result type using anyhow::Error
pub type Result<T> = anyhow::Result<T>;
