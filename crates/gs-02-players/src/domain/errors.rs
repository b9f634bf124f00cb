//! # Error Types
//!
//! Errors for player persistence, configuration and instance operations.

use std::path::PathBuf;

use gs_01_permissions::PermissionError;
use thiserror::Error;

/// Errors raised by a `PlayerStore` adapter.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying file operation failed.
    #[error("I/O error on {path}: {message}")]
    Io { path: PathBuf, message: String },

    /// A player record could not be encoded or decoded.
    #[error("Invalid player record {path}: {message}")]
    Record { path: PathBuf, message: String },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

/// Errors raised while loading or validating `SessionConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid config field `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Errors raised by player instance operations.
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Permission(#[from] PermissionError),
}

pub type StoreResult<T> = Result<T, StoreError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type PlayerResult<T> = Result<T, PlayerError>;
