//! Routine definitions and the per-user routine catalog.
//!
//! Routines are stored as JSON with camelCase keys. Everything but `id` is
//! optional when reading, since stored routines are never validated.

mod catalog;
mod draft;
mod store;

pub use catalog::default_routines;
pub use draft::RoutineDraft;
pub use store::{merge_routines, RoutineStore, SELECTED_ROUTINE_KEY};

use serde::{Deserialize, Serialize};

/// A single timed exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    #[serde(default)]
    pub name: String,
    /// Duration in seconds.
    #[serde(default)]
    pub duration: u32,
    #[serde(default, alias = "desc", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Exercise {
    pub fn new(name: impl Into<String>, duration: u32) -> Self {
        Self {
            name: name.into(),
            duration,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineConfig {
    #[serde(default = "default_rounds")]
    pub rounds: u32,
    #[serde(default = "default_rest_seconds")]
    pub rest_seconds: u32,
}

fn default_rounds() -> u32 {
    3
}

fn default_rest_seconds() -> u32 {
    20
}

impl Default for RoutineConfig {
    fn default() -> Self {
        Self {
            rounds: default_rounds(),
            rest_seconds: default_rest_seconds(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimatedMinutes {
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineMeta {
    #[serde(default = "default_weekly_target")]
    pub weekly_target: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_minutes: Option<EstimatedMinutes>,
}

fn default_weekly_target() -> u32 {
    4
}

/// A named workout definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Routine {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<RoutineConfig>,
    #[serde(default)]
    pub warmup: Vec<Exercise>,
    #[serde(default)]
    pub main_circuit: Vec<Exercise>,
    #[serde(default)]
    pub cooldown: Vec<Exercise>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<RoutineMeta>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub advice: Vec<String>,
    /// Derived when the catalog is merged; never persisted.
    #[serde(skip)]
    pub is_default: bool,
}

impl Routine {
    /// An empty routine with the standard configuration.
    pub fn blank(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            config: Some(RoutineConfig::default()),
            warmup: Vec::new(),
            main_circuit: Vec::new(),
            cooldown: Vec::new(),
            meta: None,
            advice: Vec::new(),
            is_default: false,
        }
    }

    pub fn rounds(&self) -> Option<u32> {
        self.config.map(|c| c.rounds)
    }

    pub fn rest_seconds(&self) -> Option<u32> {
        self.config.map(|c| c.rest_seconds)
    }

    pub fn weekly_target(&self) -> Option<u32> {
        self.meta.as_ref().map(|m| m.weekly_target)
    }
}
