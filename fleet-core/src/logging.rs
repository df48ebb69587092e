//! src/logging.rs
//! ============================================================================
//! # Structured JSON-lines logging
//!
//! The terminal belongs to the UI, so every event goes to a rolling `.jsonl`
//! file through a non-blocking `tracing-appender` writer. The returned
//! [`WorkerGuard`] must stay alive until the process exits or buffered lines
//! are lost.

use std::{
    path::{Path, PathBuf},
    str::FromStr,
    sync::atomic::{AtomicBool, Ordering},
};

use anyhow::{Context, Result};
use compact_str::CompactString;
use tokio::fs as TokioFs;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    EnvFilter, Layer, filter::Directive, fmt::format::FmtSpan, layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::config::LoggingConfig;

static INITIALIZED: AtomicBool = AtomicBool::new(false);

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub log_dir: PathBuf,
    pub log_file_prefix: CompactString,
    pub log_level: CompactString,
    pub max_log_files: usize,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("./logs"),
            log_file_prefix: CompactString::const_new("fleet"),
            log_level: CompactString::const_new("info"),
            max_log_files: 10,
        }
    }
}

impl LoggerConfig {
    /// Builds the logger settings from the `[logging]` table, using
    /// `fallback_dir` when no directory is configured.
    #[must_use]
    pub fn from_settings(settings: &LoggingConfig, fallback_dir: Option<PathBuf>) -> Self {
        let defaults = Self::default();
        Self {
            log_dir: settings
                .directory
                .clone()
                .or(fallback_dir)
                .unwrap_or(defaults.log_dir),
            log_file_prefix: CompactString::new(&settings.file_prefix),
            log_level: CompactString::new(&settings.level),
            ..defaults
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Logger already initialized")]
    AlreadyInitialized,

    #[error("Invalid log directory: {0}")]
    InvalidLogDirectory(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub struct LoggerBuilder {
    config: LoggerConfig,
}

impl LoggerBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    /// Installs the global subscriber. A second call fails instead of
    /// panicking.
    pub async fn build(self) -> Result<WorkerGuard> {
        validate_config(&self.config)?;

        if INITIALIZED.swap(true, Ordering::SeqCst) {
            return Err(LoggingError::AlreadyInitialized.into());
        }

        match self.install().await {
            Ok(guard) => Ok(guard),
            Err(e) => {
                INITIALIZED.store(false, Ordering::SeqCst);
                Err(e)
            }
        }
    }

    async fn install(self) -> Result<WorkerGuard> {
        let config = self.config;
        setup_log_directory(&config.log_dir).await?;

        let file_appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix(config.log_file_prefix.as_str())
            .filename_suffix("jsonl")
            .max_log_files(config.max_log_files)
            .build(&config.log_dir)
            .context("Failed to create file appender")?;

        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_current_span(true)
            .with_span_list(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(make_filter(&config.log_level)?);

        tracing_subscriber::registry()
            .with(json_layer)
            .try_init()
            .context("Failed to install global tracing subscriber")?;

        tracing::info!(
            marker = "LOGGING_READY",
            operation_type = "startup",
            log_dir = %config.log_dir.display(),
            level = %config.log_level,
            "Logging initialised"
        );
        Ok(guard)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// `RUST_LOG` when set, otherwise the configured level.
fn make_filter(level: &str) -> Result<EnvFilter> {
    if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
        return Ok(EnvFilter::from_default_env());
    }
    let directive = Directive::from_str(level).context("Invalid log level in config")?;
    Ok(EnvFilter::default().add_directive(directive))
}

fn validate_config(config: &LoggerConfig) -> Result<()> {
    if config.log_file_prefix.trim().is_empty() {
        return Err(LoggingError::ConfigError("File prefix must not be empty".to_string()).into());
    }
    if config.max_log_files == 0 {
        return Err(
            LoggingError::ConfigError("Max log files must be greater than 0".to_string()).into(),
        );
    }
    validate_log_directory(&config.log_dir)?;
    Ok(())
}

fn validate_log_directory(path: &Path) -> Result<()> {
    if path.components().count() == 0 {
        return Err(LoggingError::InvalidLogDirectory("Empty path".to_string()).into());
    }

    for component in path.components() {
        if component == std::path::Component::ParentDir {
            return Err(LoggingError::InvalidLogDirectory(
                "Path contains parent directory references".to_string(),
            )
            .into());
        }
    }

    Ok(())
}

async fn setup_log_directory(log_dir: &Path) -> Result<()> {
    if !log_dir.exists() {
        TokioFs::create_dir_all(log_dir)
            .await
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_settings_prefers_configured_dir() {
        let settings = LoggingConfig {
            level: "debug".to_string(),
            directory: Some(PathBuf::from("/var/log/fleet")),
            file_prefix: "ops".to_string(),
        };
        let config = LoggerConfig::from_settings(&settings, Some(PathBuf::from("/tmp/x")));
        assert_eq!(config.log_dir, PathBuf::from("/var/log/fleet"));
        assert_eq!(config.log_file_prefix, "ops");
        assert_eq!(config.log_level, "debug");

        let fallback = LoggerConfig::from_settings(&LoggingConfig::default(), None);
        assert_eq!(fallback.log_dir, PathBuf::from("./logs"));
    }

    #[test]
    fn test_rejects_parent_dir_references() {
        let config = LoggerConfig {
            log_dir: PathBuf::from("../escape"),
            ..LoggerConfig::default()
        };
        assert!(validate_config(&config).is_err());
    }
}
