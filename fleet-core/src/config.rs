//! src/config.rs
//! ============================================================================
//! # Config: Application Configuration Loader
//!
//! User-editable settings for the fleet browser, read as TOML from the
//! platform config directory resolved with
//! [`directories`](https://docs.rs/directories). A missing file yields the
//! defaults; the file is never written back.
//!
//! ## Example
//! ```rust,ignore
//! let config = Config::load(None).await?;
//! config.validate()?;
//! ```

use crate::error::AppError;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use tokio::fs as TokioFs;

const QUALIFIER: &str = "io";
const ORGANIZATION: &str = "fleet";
const APPLICATION: &str = "fleet";

/// Periodic reload of the current data view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoRefreshConfig {
    /// Start with auto-refresh already on
    pub enabled: bool,

    #[serde(with = "humantime_serde")]
    pub interval: Duration,
}

impl Default for AutoRefreshConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before the filter is applied
    #[serde(with = "humantime_serde")]
    pub debounce: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(150),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Rows moved by PageUp/PageDown and Ctrl+U/Ctrl+D
    pub page_size: usize,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self { page_size: 10 }
    }
}

/// Describe fan-out bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub scaling_group_workers: usize,

    pub node_group_workers: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            scaling_group_workers: 6,
            node_group_workers: 8,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,

    /// Log directory; the project data dir when unset
    pub directory: Option<PathBuf>,

    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "fleet".to_string(),
        }
    }
}

/// Main configuration struct for the application.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Empty means the CLI/SDK default region
    pub region: String,

    pub profile: String,

    pub no_color: bool,

    /// Program used for every cloud call
    pub aws_cli: AwsCli,

    pub auto_refresh: AutoRefreshConfig,

    pub search: SearchConfig,

    pub navigation: NavigationConfig,

    pub loader: LoaderConfig,

    pub logging: LoggingConfig,
}

/// Name or path of the AWS CLI executable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AwsCli(pub String);

impl Default for AwsCli {
    fn default() -> Self {
        Self("aws".to_string())
    }
}

impl AwsCli {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Config {
    /// Loads config from `explicit` or the platform config dir, falling back
    /// to defaults when the default-location file does not exist.
    ///
    /// An explicit path that does not exist is an error.
    pub async fn load(explicit: Option<&Path>) -> Result<Self, AppError> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(AppError::ConfigIo {
                        path: path.to_path_buf(),
                        source: std::io::Error::new(
                            std::io::ErrorKind::NotFound,
                            "config file does not exist",
                        ),
                    });
                }
                path.to_path_buf()
            }
            None => match Self::config_path() {
                Some(path) if path.exists() => path,
                Some(path) => {
                    info!(
                        "No config file found at {}, using default configuration",
                        path.display()
                    );
                    return Ok(Self::default());
                }
                None => return Ok(Self::default()),
            },
        };

        info!("Loading config from {}", path.display());
        let text = TokioFs::read_to_string(&path)
            .await
            .map_err(|source| AppError::ConfigIo {
                path: path.clone(),
                source,
            })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, AppError> {
        Ok(toml::from_str(text)?)
    }

    /// Rejects settings the controller cannot run with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.navigation.page_size == 0 {
            return Err(AppError::invalid_input(
                "navigation.page_size",
                "must be at least 1",
            ));
        }
        if self.loader.scaling_group_workers == 0 {
            return Err(AppError::invalid_input(
                "loader.scaling_group_workers",
                "must be at least 1",
            ));
        }
        if self.loader.node_group_workers == 0 {
            return Err(AppError::invalid_input(
                "loader.node_group_workers",
                "must be at least 1",
            ));
        }
        if self.auto_refresh.interval.is_zero() {
            return Err(AppError::invalid_input(
                "auto_refresh.interval",
                "must be greater than zero",
            ));
        }
        if self.aws_cli.as_str().trim().is_empty() {
            return Err(AppError::invalid_input("aws_cli", "must not be empty"));
        }
        Ok(())
    }

    /// Returns the canonical config file path using `directories::ProjectDirs`.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Default directory for rolling log files.
    #[must_use]
    pub fn data_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_local_dir().join("logs"))
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
    }
}
