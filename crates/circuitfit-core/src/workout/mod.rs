//! Live workout: plan resolution, the phase controller and its tick sources.

mod controller;
mod phase;
mod plan;
mod scheduler;
mod session;

pub use controller::{SessionState, WorkoutController, REST_HINT, REST_LABEL};
pub use phase::Phase;
pub use plan::{PlanDefaults, PlanSummary, WorkoutPlan};
pub use scheduler::{IntervalScheduler, ManualScheduler, Scheduler};
pub use session::WorkoutSession;
