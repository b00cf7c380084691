//! Workout parameters resolved from a routine.
//!
//! A routine may be missing entirely (selection deleted) or be missing
//! any of its fields; the plan fills the gaps so the controller never has
//! to deal with absent data.

use serde::{Deserialize, Serialize};

use super::Phase;
use crate::routine::{EstimatedMinutes, Exercise, Routine};

/// Fallback parameters for routines that omit them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanDefaults {
    pub rounds: u32,
    pub rest_seconds: u32,
    /// Used for a circuit exercise whose own duration is 0.
    pub work_seconds: u32,
}

impl Default for PlanDefaults {
    fn default() -> Self {
        Self {
            rounds: 3,
            rest_seconds: 20,
            work_seconds: 40,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutPlan {
    pub routine_id: Option<String>,
    pub name: String,
    pub rounds: u32,
    pub rest_seconds: u32,
    pub work_seconds: u32,
    pub warmup: Vec<Exercise>,
    pub main_circuit: Vec<Exercise>,
    pub cooldown: Vec<Exercise>,
}

impl WorkoutPlan {
    pub fn from_routine(routine: Option<&Routine>, defaults: &PlanDefaults) -> Self {
        let Some(routine) = routine else {
            return Self {
                routine_id: None,
                name: String::new(),
                rounds: defaults.rounds.max(1),
                rest_seconds: defaults.rest_seconds,
                work_seconds: defaults.work_seconds,
                warmup: Vec::new(),
                main_circuit: Vec::new(),
                cooldown: Vec::new(),
            };
        };

        Self {
            routine_id: Some(routine.id.clone()),
            name: routine.name.clone(),
            rounds: routine.rounds().unwrap_or(defaults.rounds).max(1),
            rest_seconds: routine.rest_seconds().unwrap_or(defaults.rest_seconds),
            work_seconds: defaults.work_seconds,
            warmup: routine.warmup.clone(),
            main_circuit: routine.main_circuit.clone(),
            cooldown: routine.cooldown.clone(),
        }
    }

    /// Exercises of a timed phase; empty for `Start` and `Done`.
    pub fn segment(&self, phase: Phase) -> &[Exercise] {
        match phase {
            Phase::Warmup => &self.warmup,
            Phase::Circuit => &self.main_circuit,
            Phase::Cooldown => &self.cooldown,
            Phase::Start | Phase::Done => &[],
        }
    }

    /// Exercise slots counted toward progress. Rests are not units.
    pub fn total_units(&self) -> u32 {
        (self.warmup.len() + self.main_circuit.len() * self.rounds as usize + self.cooldown.len())
            as u32
    }

    /// Seconds for the work unit at `index` of `phase`.
    pub fn work_duration(&self, phase: Phase, index: usize) -> u32 {
        let exercise = self.segment(phase).get(index);
        match phase {
            Phase::Circuit => exercise
                .map(|e| e.duration)
                .filter(|d| *d > 0)
                .unwrap_or(self.work_seconds),
            _ => exercise.map(|e| e.duration).unwrap_or(0),
        }
    }

    pub fn summary(&self, estimated_minutes: Option<EstimatedMinutes>) -> PlanSummary {
        let minutes = |exercises: &[Exercise]| {
            let secs: u32 = exercises.iter().map(|e| e.duration).sum();
            (secs as f64 / 60.0).round() as u32
        };
        PlanSummary {
            warmup_minutes: minutes(&self.warmup),
            cooldown_minutes: minutes(&self.cooldown),
            rounds: self.rounds,
            work_seconds: self.work_duration(Phase::Circuit, 0),
            rest_seconds: self.rest_seconds,
            total_units: self.total_units(),
            estimated_minutes,
        }
    }
}

/// Overview shown before a workout starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub warmup_minutes: u32,
    pub cooldown_minutes: u32,
    pub rounds: u32,
    /// Work time of the first circuit exercise.
    pub work_seconds: u32,
    pub rest_seconds: u32,
    pub total_units: u32,
    pub estimated_minutes: Option<EstimatedMinutes>,
}
