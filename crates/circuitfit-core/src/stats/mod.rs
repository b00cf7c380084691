//! Completed-workout statistics.

mod log;

pub use log::{WorkoutLog, WorkoutLogStore};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::routine::Routine;

/// Used when no routine is selected or it carries no meta.
pub const DEFAULT_WEEKLY_TARGET: u32 = 4;

/// Counts shown on the start screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutStats {
    /// Sessions completed in the last seven days.
    pub weekly: u32,
    pub weekly_target: u32,
    pub total: u32,
}

impl WorkoutStats {
    pub fn from_log(log: &WorkoutLog, weekly_target: u32, now: DateTime<Utc>) -> Self {
        Self {
            weekly: log.weekly_count(now),
            weekly_target,
            total: log.total_count(),
        }
    }

    /// Target comes from the routine's meta, falling back to `fallback_target`.
    pub fn for_routine(
        log: &WorkoutLog,
        routine: Option<&Routine>,
        fallback_target: u32,
        now: DateTime<Utc>,
    ) -> Self {
        let target = routine
            .and_then(Routine::weekly_target)
            .unwrap_or(fallback_target);
        Self::from_log(log, target, now)
    }

    pub fn target_reached(&self) -> bool {
        self.weekly >= self.weekly_target
    }
}
