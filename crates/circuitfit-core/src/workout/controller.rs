//! Workout phase controller.
//!
//! A countdown-driven state machine. It does not own a timer: the caller
//! invokes `tick()` once per elapsed second while `is_running()` is true.
//!
//! ## Phases
//!
//! ```text
//! Start -> Warmup -> Circuit (work -> rest) x exercises x rounds -> Cooldown -> Done
//! ```
//!
//! Reaching zero completes the current unit and stops the countdown until
//! `start_exercise()` is called again, except work -> rest inside the
//! circuit, which restarts on its own. Empty segments are skipped on entry.
//!
//! ## Usage
//!
//! ```ignore
//! let mut ctrl = WorkoutController::new(plan);
//! ctrl.start_workout();
//! ctrl.start_exercise();
//! // once per second:
//! ctrl.tick();
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::plan::WorkoutPlan;
use super::Phase;
use crate::events::Event;
use crate::routine::Exercise;

pub const REST_LABEL: &str = "Descanso";
pub const REST_HINT: &str = "Recupera el aliento, mantén el abdomen contraído";

/// Transient state of the live workout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub phase: Phase,
    /// 1-based round within the circuit.
    pub round: u32,
    pub exercise_index: usize,
    pub time_left_secs: u32,
    pub is_running: bool,
    pub is_resting: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            phase: Phase::Start,
            round: 1,
            exercise_index: 0,
            time_left_secs: 0,
            is_running: false,
            is_resting: false,
        }
    }
}

/// Drives one workout through its phases.
///
/// Invariant: `is_running()` implies `time_left_secs() > 0` after every
/// public call; a unit that reaches zero is completed immediately.
#[derive(Debug, Clone)]
pub struct WorkoutController {
    plan: WorkoutPlan,
    state: SessionState,
}

impl WorkoutController {
    pub fn new(plan: WorkoutPlan) -> Self {
        Self {
            plan,
            state: SessionState::default(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn plan(&self) -> &WorkoutPlan {
        &self.plan
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn round(&self) -> u32 {
        self.state.round
    }

    pub fn exercise_index(&self) -> usize {
        self.state.exercise_index
    }

    pub fn time_left_secs(&self) -> u32 {
        self.state.time_left_secs
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    pub fn is_resting(&self) -> bool {
        self.state.is_resting
    }

    /// The exercise being worked, `None` while resting or outside a timed phase.
    pub fn current_exercise(&self) -> Option<&Exercise> {
        if self.state.is_resting {
            return None;
        }
        self.plan
            .segment(self.state.phase)
            .get(self.state.exercise_index)
    }

    pub fn current_label(&self) -> String {
        if self.state.is_resting {
            return REST_LABEL.to_string();
        }
        self.current_exercise()
            .map(|e| e.name.clone())
            .unwrap_or_default()
    }

    pub fn current_description(&self) -> String {
        if self.state.is_resting {
            return REST_HINT.to_string();
        }
        self.current_exercise()
            .and_then(|e| e.description.clone())
            .unwrap_or_default()
    }

    /// Units fully finished given the current position.
    pub fn completed_units(&self) -> u32 {
        let w = self.plan.warmup.len() as u32;
        let m = self.plan.main_circuit.len() as u32;
        let idx = self.state.exercise_index as u32;
        match self.state.phase {
            Phase::Start => 0,
            Phase::Warmup => idx,
            Phase::Circuit => w + (self.state.round - 1) * m + idx,
            Phase::Cooldown => w + m * self.plan.rounds + idx,
            Phase::Done => self.plan.total_units(),
        }
    }

    /// 0 ..= 100, rounded to the nearest integer.
    pub fn progress_pct(&self) -> u32 {
        let total = self.plan.total_units();
        if total == 0 {
            return if self.state.phase == Phase::Done { 100 } else { 0 };
        }
        (self.completed_units() as f64 / total as f64 * 100.0).round() as u32
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            phase: self.state.phase,
            round: self.state.round,
            rounds: self.plan.rounds,
            exercise_index: self.state.exercise_index,
            label: self.current_label(),
            description: self.current_description(),
            time_left_secs: self.state.time_left_secs,
            is_running: self.state.is_running,
            is_resting: self.state.is_resting,
            progress_pct: self.progress_pct(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Leave the start screen and enter the warm-up.
    ///
    /// Empty segments are skipped, so a routine without exercises goes
    /// straight to `Done`.
    pub fn start_workout(&mut self) -> Vec<Event> {
        if self.state.phase != Phase::Start {
            return Vec::new();
        }
        let mut events = vec![Event::WorkoutStarted {
            routine_id: self.plan.routine_id.clone(),
            total_units: self.plan.total_units(),
            at: Utc::now(),
        }];
        self.enter_phase(Phase::Warmup, &mut events);
        events
    }

    /// Start the countdown for the current unit.
    ///
    /// A paused unit with time left resumes instead of restarting.
    pub fn start_exercise(&mut self) -> Vec<Event> {
        if !self.state.phase.is_active() || self.state.is_running {
            return Vec::new();
        }
        if self.state.time_left_secs > 0 {
            return self.resume().into_iter().collect();
        }

        let mut events = Vec::new();
        let duration = if self.state.is_resting {
            self.plan.rest_seconds
        } else {
            self.plan
                .work_duration(self.state.phase, self.state.exercise_index)
        };
        self.state.time_left_secs = duration;
        self.state.is_running = true;

        if self.state.is_resting {
            events.push(Event::RestStarted {
                round: self.state.round,
                exercise_index: self.state.exercise_index,
                duration_secs: duration,
                at: Utc::now(),
            });
        } else {
            events.push(Event::ExerciseStarted {
                phase: self.state.phase,
                round: self.state.round,
                exercise_index: self.state.exercise_index,
                name: self.current_label(),
                duration_secs: duration,
                at: Utc::now(),
            });
        }

        if duration == 0 {
            self.complete_unit(&mut events);
        }
        events
    }

    /// One elapsed second.
    pub fn tick(&mut self) -> Vec<Event> {
        if !self.state.is_running {
            return Vec::new();
        }
        let mut events = Vec::new();
        self.state.time_left_secs = self.state.time_left_secs.saturating_sub(1);
        if self.state.time_left_secs == 0 {
            self.complete_unit(&mut events);
        }
        events
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.state.is_running {
            return None;
        }
        self.state.is_running = false;
        Some(Event::TimerPaused {
            time_left_secs: self.state.time_left_secs,
            at: Utc::now(),
        })
    }

    pub fn resume(&mut self) -> Option<Event> {
        if self.state.is_running
            || !self.state.phase.is_active()
            || self.state.time_left_secs == 0
        {
            return None;
        }
        self.state.is_running = true;
        Some(Event::TimerResumed {
            time_left_secs: self.state.time_left_secs,
            at: Utc::now(),
        })
    }

    pub fn toggle_pause(&mut self) -> Option<Event> {
        if self.state.is_running {
            self.pause()
        } else {
            self.resume()
        }
    }

    /// Clear every transient field. Valid from any phase.
    pub fn reset(&mut self) -> Option<Event> {
        self.state = SessionState::default();
        Some(Event::WorkoutReset { at: Utc::now() })
    }

    /// Swap the routine being followed and reset.
    pub fn set_plan(&mut self, plan: WorkoutPlan) {
        self.plan = plan;
        self.reset();
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete_unit(&mut self, events: &mut Vec<Event>) {
        self.state.is_running = false;
        self.state.time_left_secs = 0;
        let phase = self.state.phase;
        let idx = self.state.exercise_index;
        let round = self.state.round;
        let segment_len = self.plan.segment(phase).len();

        match phase {
            Phase::Warmup | Phase::Cooldown => {
                events.push(Event::ExerciseCompleted {
                    phase,
                    round,
                    exercise_index: idx,
                    at: Utc::now(),
                });
                if idx + 1 < segment_len {
                    self.state.exercise_index += 1;
                } else {
                    self.enter_phase(phase.next(), events);
                }
            }
            Phase::Circuit if !self.state.is_resting => {
                events.push(Event::ExerciseCompleted {
                    phase,
                    round,
                    exercise_index: idx,
                    at: Utc::now(),
                });
                let rest = self.plan.rest_seconds;
                self.state.is_resting = true;
                self.state.time_left_secs = rest;
                self.state.is_running = true;
                events.push(Event::RestStarted {
                    round,
                    exercise_index: idx,
                    duration_secs: rest,
                    at: Utc::now(),
                });
                if rest == 0 {
                    self.complete_unit(events);
                }
            }
            Phase::Circuit => {
                events.push(Event::RestCompleted {
                    round,
                    exercise_index: idx,
                    at: Utc::now(),
                });
                self.state.is_resting = false;
                if idx + 1 < segment_len {
                    self.state.exercise_index += 1;
                } else if round < self.plan.rounds {
                    self.state.round += 1;
                    self.state.exercise_index = 0;
                    events.push(Event::RoundAdvanced {
                        round: self.state.round,
                        at: Utc::now(),
                    });
                } else {
                    self.enter_phase(Phase::Cooldown, events);
                }
            }
            Phase::Start | Phase::Done => {}
        }
    }

    /// Move to `phase`, skipping past any phase without exercises.
    fn enter_phase(&mut self, phase: Phase, events: &mut Vec<Event>) {
        let mut next = phase;
        loop {
            let from = self.state.phase;
            self.state.phase = next;
            self.state.exercise_index = 0;
            self.state.is_resting = false;
            self.state.is_running = false;
            self.state.time_left_secs = 0;
            if next == Phase::Circuit {
                self.state.round = 1;
            }
            events.push(Event::PhaseChanged {
                from,
                to: next,
                at: Utc::now(),
            });
            tracing::debug!(%from, to = %next, "workout phase changed");

            if next == Phase::Done {
                let now = Utc::now();
                events.push(Event::WorkoutCompleted {
                    date: now.date_naive(),
                    at: now,
                });
                return;
            }
            if !self.plan.segment(next).is_empty() {
                return;
            }
            tracing::debug!(phase = %next, "skipping empty segment");
            next = next.next();
        }
    }
}
