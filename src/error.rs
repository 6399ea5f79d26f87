//! Error types for the bookmark manager.

use std::path::PathBuf;
use thiserror::Error;

/// Storage-related errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Bookmark not found: {0}")]
    NotFound(i64),

    #[error("Bookmark already exists: {0}")]
    DuplicateUrl(String),

    #[error("Invalid bookmark: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors raised by the Walker config reconciliation workflow.
///
/// Only the missing template is fatal for the merge itself; the other
/// variants cover filesystem failures around backup and write.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("Template TOML not found at: {}", .0.display())]
    TemplateMissing(PathBuf),

    #[error("Failed to create config directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to back up {}: {source}", path.display())]
    Backup {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize merged config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Top-level error surfaced by the CLI entry points
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("{0}")]
    Reconcile(#[from] ReconcileError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Output error: {0}")]
    Output(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
