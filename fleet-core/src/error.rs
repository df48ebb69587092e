//! src/error.rs
//! ============================================================================
//! # `AppError`: Unified Error Type for the Fleet Browser
//!
//! Every fallible operation in the library returns `Result<T, AppError>`.
//! Errors travel inside controller messages, so the type is `Clone`; sources
//! that are not cloneable are flattened to strings on the way in.

use std::{io, path::PathBuf};
use thiserror::Error;

/// Unified error type for all fleet browser operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Standard IO error, auto-converted from `io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// TOML config parsing error.
    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// Config file I/O error with path.
    #[error("Failed to read config file {path:?}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Decoding a cloud response failed.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// The cloud CLI exited unsuccessfully.
    #[error("External command failed: {cmd} (exit code: {code:?}): {stderr}")]
    ExternalCmd {
        cmd: String,
        code: Option<i32>,
        stderr: String,
    },

    /// Provider-level failure reported for a single operation.
    #[error("{operation} failed: {message}")]
    Cloud { operation: String, message: String },

    /// Input validation errors
    #[error("Invalid input: {field} - {message}")]
    InvalidInput { field: String, message: String },

    /// An action was requested against a target that cannot satisfy it.
    #[error("{0}")]
    Precondition(String),

    /// Clipboard could not be opened or written.
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// Operation cancelled by user or system.
    #[error("Operation was cancelled")]
    Cancelled,

    /// Terminal I/O or rendering error.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Any other error, with description.
    #[error("Unexpected error: {0}")]
    Other(String),
}

impl AppError {
    /// Create a provider failure error
    pub fn cloud<S1: Into<String>, S2: Into<String>>(operation: S1, message: S2) -> Self {
        Self::Cloud {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create an input validation error
    pub fn invalid_input<S1: Into<String>, S2: Into<String>>(field: S1, message: S2) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a precondition failure error
    pub fn precondition<S: Into<String>>(message: S) -> Self {
        Self::Precondition(message.into())
    }

    /// True when the error only reports cancellation of the lifetime context.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

// Manual Clone implementation to handle non-Clone fields
impl Clone for AppError {
    fn clone(&self) -> Self {
        match self {
            Self::Io(e) => Self::Io(io::Error::new(e.kind(), e.to_string())),
            Self::Config(e) => Self::Other(format!("Config error: {e}")),
            Self::ConfigIo { path, source } => Self::ConfigIo {
                path: path.clone(),
                source: io::Error::new(source.kind(), source.to_string()),
            },
            Self::Serde(e) => Self::Other(format!("Serde error: {e}")),
            Self::ExternalCmd { cmd, code, stderr } => Self::ExternalCmd {
                cmd: cmd.clone(),
                code: *code,
                stderr: stderr.clone(),
            },
            Self::Cloud { operation, message } => Self::Cloud {
                operation: operation.clone(),
                message: message.clone(),
            },
            Self::InvalidInput { field, message } => Self::InvalidInput {
                field: field.clone(),
                message: message.clone(),
            },
            Self::Precondition(msg) => Self::Precondition(msg.clone()),
            Self::Clipboard(msg) => Self::Clipboard(msg.clone()),
            Self::Cancelled => Self::Cancelled,
            Self::Terminal(msg) => Self::Terminal(msg.clone()),
            Self::Other(msg) => Self::Other(msg.clone()),
        }
    }
}

// Allow conversion from `anyhow::Error` as fallback.
impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        Self::Other(e.to_string())
    }
}
