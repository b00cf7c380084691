use serde::{Deserialize, Serialize};

use super::{EstimatedMinutes, Routine, RoutineConfig, RoutineMeta};

/// The editable subset of a user routine.
///
/// Zero values are coerced when applied: rounds and weekly target become 1,
/// a missing maximum falls back to the minimum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineDraft {
    pub name: String,
    pub rounds: u32,
    pub rest_seconds: u32,
    pub weekly_target: u32,
    pub estimated_min: u32,
    pub estimated_max: u32,
    /// Free text, one tip per line.
    pub advice: String,
}

impl Default for RoutineDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            rounds: 3,
            rest_seconds: 20,
            weekly_target: 4,
            estimated_min: 20,
            estimated_max: 25,
            advice: String::new(),
        }
    }
}

impl RoutineDraft {
    /// Pre-fill a draft from an existing routine.
    pub fn from_routine(routine: &Routine) -> Self {
        let defaults = Self::default();
        let estimated = routine.meta.as_ref().and_then(|m| m.estimated_minutes);
        Self {
            name: routine.name.clone(),
            rounds: routine.rounds().unwrap_or(defaults.rounds),
            rest_seconds: routine.rest_seconds().unwrap_or(defaults.rest_seconds),
            weekly_target: routine.weekly_target().unwrap_or(defaults.weekly_target),
            estimated_min: estimated.map(|e| e.min).unwrap_or(defaults.estimated_min),
            estimated_max: estimated.map(|e| e.max).unwrap_or(defaults.estimated_max),
            advice: routine.advice.join("\n"),
        }
    }

    /// Apply this draft to `routine`, leaving exercises untouched.
    pub fn apply_to(&self, routine: &Routine) -> Routine {
        let name = if self.name.trim().is_empty() {
            routine.name.clone()
        } else {
            self.name.clone()
        };
        let estimated_max = if self.estimated_max == 0 {
            self.estimated_min
        } else {
            self.estimated_max
        };

        Routine {
            name,
            config: Some(RoutineConfig {
                rounds: self.rounds.max(1),
                rest_seconds: self.rest_seconds,
            }),
            meta: Some(RoutineMeta {
                weekly_target: self.weekly_target.max(1),
                estimated_minutes: Some(EstimatedMinutes {
                    min: self.estimated_min,
                    max: estimated_max,
                }),
            }),
            advice: self
                .advice
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect(),
            ..routine.clone()
        }
    }
}
