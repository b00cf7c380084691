//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Fallback workout parameters for routines missing their own
//! - Tick period of the real-time driver
//! - Weekly completion target
//! - Log verbosity
//!
//! Configuration is stored at `<data dir>/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::workout::PlanDefaults;

/// Workout-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutConfig {
    #[serde(default = "default_rounds")]
    pub default_rounds: u32,
    #[serde(default = "default_rest_seconds")]
    pub default_rest_seconds: u32,
    #[serde(default = "default_work_seconds")]
    pub default_work_seconds: u32,
    /// Milliseconds per countdown second when running in real time.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

/// Progress tracking configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Target used when the selected routine does not carry one.
    #[serde(default = "default_weekly_target")]
    pub weekly_target: u32,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data dir>/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub workout: WorkoutConfig,
    #[serde(default)]
    pub stats: StatsConfig,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_rounds() -> u32 {
    3
}
fn default_rest_seconds() -> u32 {
    20
}
fn default_work_seconds() -> u32 {
    40
}
fn default_tick_ms() -> u64 {
    1000
}
fn default_weekly_target() -> u32 {
    4
}
fn default_log_level() -> String {
    "warn".into()
}

impl Default for WorkoutConfig {
    fn default() -> Self {
        Self {
            default_rounds: default_rounds(),
            default_rest_seconds: default_rest_seconds(),
            default_work_seconds: default_work_seconds(),
            tick_ms: default_tick_ms(),
        }
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            weekly_target: default_weekly_target(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workout: WorkoutConfig::default(),
            stats: StatsConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        if key.is_empty() {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Object(_) => {
                        return Err(invalid("cannot assign to a section".into()));
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        Err(ConfigError::UnknownKey(key.to_string()))
    }

    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("config.toml"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from the data directory, writing defaults on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults there if it is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    /// Persist to the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without persisting it.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed
    /// as the field's type.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Set a config value by key and persist. Returns error if key is unknown.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.set_value(key, value)?;
        self.save()
    }

    /// Fallback workout parameters for routines that omit them.
    pub fn plan_defaults(&self) -> PlanDefaults {
        PlanDefaults {
            rounds: self.workout.default_rounds.max(1),
            rest_seconds: self.workout.default_rest_seconds,
            work_seconds: self.workout.default_work_seconds.max(1),
        }
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}
