mod config;
pub mod database;
pub mod memory;

pub use config::{Config, StatsConfig, WorkoutConfig};
pub use database::Database;
pub use memory::MemoryStore;

use std::path::PathBuf;

use crate::error::StorageError;

/// String-valued, fallible key-value storage.
///
/// Every persisted value in circuitfit (identity, routines, selection,
/// completed-workout log) goes through this trait as a JSON string.
/// Callers decide whether a fault is surfaced or swallowed.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Returns the data directory, creating it if needed.
///
/// `CIRCUITFIT_HOME` overrides the location entirely. Otherwise the
/// directory is `~/.config/circuitfit`, or `~/.config/circuitfit-dev`
/// when `CIRCUITFIT_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let dir = match std::env::var_os("CIRCUITFIT_HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("CIRCUITFIT_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("circuitfit-dev")
            } else {
                base_dir.join("circuitfit")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
