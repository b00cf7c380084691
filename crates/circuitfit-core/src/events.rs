use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::workout::Phase;

/// Every state change of a workout produces an Event.
/// The CLI prints them; the session reacts to `WorkoutCompleted`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    WorkoutStarted {
        routine_id: Option<String>,
        total_units: u32,
        at: DateTime<Utc>,
    },
    PhaseChanged {
        from: Phase,
        to: Phase,
        at: DateTime<Utc>,
    },
    ExerciseStarted {
        phase: Phase,
        round: u32,
        exercise_index: usize,
        name: String,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    ExerciseCompleted {
        phase: Phase,
        round: u32,
        exercise_index: usize,
        at: DateTime<Utc>,
    },
    /// Work finished and the rest countdown started without user action.
    RestStarted {
        round: u32,
        exercise_index: usize,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    RestCompleted {
        round: u32,
        exercise_index: usize,
        at: DateTime<Utc>,
    },
    RoundAdvanced {
        round: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        time_left_secs: u32,
        at: DateTime<Utc>,
    },
    TimerResumed {
        time_left_secs: u32,
        at: DateTime<Utc>,
    },
    /// The last cool-down exercise finished; `date` goes to the log.
    WorkoutCompleted {
        date: NaiveDate,
        at: DateTime<Utc>,
    },
    WorkoutReset {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: Phase,
        round: u32,
        rounds: u32,
        exercise_index: usize,
        label: String,
        description: String,
        time_left_secs: u32,
        is_running: bool,
        is_resting: bool,
        progress_pct: u32,
        at: DateTime<Utc>,
    },
}
