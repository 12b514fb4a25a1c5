//! Configuration management for the anime feed client.
//!
//! Settings are loaded from a TOML file with sensible defaults for every
//! value. The upstream base URL can additionally be overridden through the
//! `ANIME_API_BASE_URL` environment variable.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable selecting the upstream base URL
pub const BASE_URL_ENV: &str = "ANIME_API_BASE_URL";

/// Production host used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "https://www.sankavollerei.com";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Upstream API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Upstream API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the anime listing API (no trailing slash)
    pub base_url: String,

    /// Request timeout in seconds, applied to every call
    pub timeout_secs: u64,

    /// User agent sent with each request
    pub user_agent: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log directory path
    pub log_dir: String,

    /// Default log level (trace, debug, info, warn, error)
    pub default_level: String,

    /// Enable console output
    pub console: bool,

    /// Enable file output
    pub file: bool,

    /// Enable JSON formatting for file logs
    pub json_format: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
            user_agent: format!("anime-feed/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: "logs".to_string(),
            default_level: "info".to_string(),
            console: true,
            file: false,
            json_format: false,
        }
    }
}

impl ApiConfig {
    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// If the file doesn't exist, returns the default configuration.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::warn!(
                path = %path.display(),
                "Config file not found, using defaults"
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Load configuration from a TOML file or create default if not found
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::from_file(path).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to load config, using defaults");
            Self::default()
        })
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = toml::to_string_pretty(self)
            .context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            "Configuration saved successfully"
        );

        Ok(())
    }

    /// Apply overrides from the process environment
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(BASE_URL_ENV).filter(|url| !url.trim().is_empty()) {
            tracing::debug!(base_url = %url, "Base URL overridden from environment");
            self.api.base_url = url;
        }
        self.api.base_url = self.api.base_url.trim_end_matches('/').to_string();
        self
    }
}
