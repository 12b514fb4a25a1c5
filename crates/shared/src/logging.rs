//! Logging infrastructure for the anime feed client.
//!
//! This module provides structured logging with optional file rotation,
//! contextual fields, and module-specific log levels.

use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log directory path
    pub log_dir: String,
    /// Component name (used for log file naming)
    pub component: String,
    /// Default log level
    pub default_level: Level,
    /// Enable console output
    pub console: bool,
    /// Enable file output
    pub file: bool,
    /// Enable JSON formatting for file logs
    pub json_format: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: "logs".to_string(),
            component: "anime-feed".to_string(),
            default_level: Level::INFO,
            console: true,
            file: false,
            json_format: false,
        }
    }
}

impl LogConfig {
    /// Build from the `[logging]` config section
    ///
    /// Unknown level names fall back to `info`.
    pub fn from_settings(settings: &LoggingConfig, component: &str) -> Self {
        Self {
            log_dir: settings.log_dir.clone(),
            component: component.to_string(),
            default_level: settings.default_level.parse().unwrap_or(Level::INFO),
            console: settings.console,
            file: settings.file,
            json_format: settings.json_format,
        }
    }

    /// Filter directive used when `RUST_LOG` is not set
    pub fn filter_directive(&self) -> String {
        let level = self.default_level;
        format!(
            "{}={},shared={},anime_feed={},hyper=warn,reqwest=warn,h2=warn",
            self.component.replace('-', "_"),
            level,
            level,
            level
        )
    }
}

/// Initialize logging with the given configuration
///
/// Sets up tracing with:
/// - Console output on stderr, so command output on stdout stays clean
/// - Optional daily-rotated file output
/// - Module-specific log levels, overridable through `RUST_LOG`
/// - Optional JSON formatting for the file layer
pub fn init(config: LogConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.filter_directive()));

    let mut layers = Vec::new();

    if config.console {
        let console_layer = fmt::layer()
            .with_target(true)
            .with_level(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_span_events(FmtSpan::NONE)
            .with_writer(std::io::stderr)
            .boxed();
        layers.push(console_layer);
    }

    if config.file {
        let log_dir = Path::new(&config.log_dir);
        std::fs::create_dir_all(log_dir)
            .with_context(|| format!("Failed to create log directory: {}", config.log_dir))?;

        let file_appender = tracing_appender::rolling::daily(log_dir, &config.component);

        let file_layer = if config.json_format {
            fmt::layer()
                .json()
                .with_target(true)
                .with_level(true)
                .with_current_span(true)
                .with_span_list(false)
                .with_writer(file_appender)
                .boxed()
        } else {
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_ansi(false)
                .with_span_events(FmtSpan::CLOSE)
                .with_writer(file_appender)
                .boxed()
        };

        layers.push(file_layer);
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layers)
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    tracing::debug!(
        component = %config.component,
        log_dir = %config.log_dir,
        file = config.file,
        "Logging initialized"
    );

    Ok(())
}

/// Initialize logging with default configuration
pub fn init_default() -> Result<()> {
    init(LogConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_config() {
        let config = LogConfig::default();
        assert_eq!(config.component, "anime-feed");
        assert_eq!(config.default_level, Level::INFO);
        assert!(config.console);
        assert!(!config.file);
    }

    #[test]
    fn test_from_settings() {
        let settings = LoggingConfig {
            default_level: "debug".to_string(),
            file: true,
            ..Default::default()
        };
        let config = LogConfig::from_settings(&settings, "anime-feed");
        assert_eq!(config.default_level, Level::DEBUG);
        assert!(config.file);

        let settings = LoggingConfig {
            default_level: "loud".to_string(),
            ..Default::default()
        };
        let config = LogConfig::from_settings(&settings, "anime-feed");
        assert_eq!(config.default_level, Level::INFO);
    }

    #[test]
    fn test_filter_directive_uses_crate_targets() {
        let config = LogConfig {
            default_level: Level::WARN,
            ..Default::default()
        };
        let directive = config.filter_directive();
        assert!(directive.starts_with("anime_feed=WARN"));
        assert!(directive.contains("reqwest=warn"));
    }
}
