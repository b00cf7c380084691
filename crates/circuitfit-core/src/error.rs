//! Core error types for circuitfit-core.
//!
//! Most store operations are fail-soft and never surface these; they are
//! returned by the operations that have something meaningful to report
//! (opening storage, configuration, routine editing).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for circuitfit-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Key-value storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A referenced entity does not exist
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },
}

impl CoreError {
    pub fn routine_not_found(id: impl Into<String>) -> Self {
        CoreError::NotFound {
            kind: "Routine",
            id: id.into(),
        }
    }
}

/// Key-value storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the backing database
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Storage is disabled or out of space
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not name a configuration field
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Built-in routines cannot be modified
    #[error("Routine '{id}' is a built-in routine; duplicate it to make changes")]
    ReadOnly { id: String },
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(inner, _msg) => {
                if inner.code == rusqlite::ErrorCode::DatabaseLocked
                    || inner.code == rusqlite::ErrorCode::DatabaseBusy
                {
                    StorageError::Locked
                } else if inner.code == rusqlite::ErrorCode::DiskFull
                    || inner.code == rusqlite::ErrorCode::ReadOnly
                {
                    StorageError::Unavailable(err.to_string())
                } else {
                    StorageError::QueryFailed(err.to_string())
                }
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
