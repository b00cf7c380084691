//! # Circuitfit Core Library
//!
//! Core logic for circuitfit, a guided circuit-training timer. Every
//! operation is available through the `circuitfit` CLI; any other front-end
//! is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Routines**: bundled default catalog merged with per-user routines
//! - **Identity**: the single current user (guest until a real provider exists)
//! - **Workout**: a countdown-driven phase controller that requires the caller
//!   to invoke `tick()` once per second, plus schedulers to do so
//! - **Stats**: weekly and total counts from the completed-workout log
//! - **Storage**: key-value persistence (SQLite or in-memory) and TOML configuration
//!
//! ## Key Components
//!
//! - [`RoutineStore`]: Routine catalog CRUD
//! - [`IdentityProvider`]: Current user
//! - [`WorkoutController`]: Workout state machine
//! - [`WorkoutSession`]: Controller bound to a scheduler and the workout log
//! - [`WorkoutStats`]: Progress counts
//! - [`KeyValueStore`]: Storage abstraction

pub mod error;
pub mod events;
pub mod identity;
pub mod routine;
pub mod stats;
pub mod storage;
pub mod workout;

pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use identity::{IdentityProvider, User};
pub use routine::{Exercise, Routine, RoutineDraft, RoutineStore};
pub use stats::{WorkoutLog, WorkoutLogStore, WorkoutStats};
pub use storage::{Config, Database, KeyValueStore, MemoryStore};
pub use workout::{
    IntervalScheduler, ManualScheduler, Phase, Scheduler, WorkoutController, WorkoutPlan,
    WorkoutSession,
};
