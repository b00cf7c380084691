use std::time::Duration;

use clap::Subcommand;
use circuitfit_core::{
    Config, CoreError, Database, Event, IdentityProvider, IntervalScheduler, Routine,
    RoutineStore, WorkoutPlan, WorkoutSession,
};

#[derive(Subcommand)]
pub enum WorkoutAction {
    /// Run a routine end to end, printing events as JSON lines
    Run {
        /// Routine ID (defaults to the selected routine)
        #[arg(long)]
        routine: Option<String>,
        /// Milliseconds per countdown second (defaults to workout.tick_ms)
        #[arg(long)]
        tick_ms: Option<u64>,
    },
    /// Print the plan summary of a routine as JSON
    Plan {
        /// Routine ID (defaults to the selected routine)
        #[arg(long)]
        routine: Option<String>,
    },
}

fn pick_routine(
    store: &RoutineStore<'_, Database>,
    user: &str,
    id: Option<&str>,
) -> Result<Option<Routine>, CoreError> {
    match id {
        Some(id) => store
            .get_routine_by_id(user, id)
            .map(Some)
            .ok_or_else(|| CoreError::routine_not_found(id)),
        None => Ok(store.resolve_selection(user)),
    }
}

fn print_event(event: &Event) {
    match serde_json::to_string(event) {
        Ok(line) => println!("{line}"),
        Err(e) => tracing::warn!("could not serialize event: {e}"),
    }
}

pub fn run(action: WorkoutAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let db = Database::open()?;
    let identity = IdentityProvider::load(&db);
    let user = identity.user_id();
    let store = RoutineStore::new(&db);

    match action {
        WorkoutAction::Run { routine, tick_ms } => {
            let routine = pick_routine(&store, user, routine.as_deref())?;
            let plan = WorkoutPlan::from_routine(routine.as_ref(), &config.plan_defaults());
            let period = Duration::from_millis(tick_ms.unwrap_or(config.workout.tick_ms));
            tracing::info!(routine_id = ?plan.routine_id, ?period, "running workout");

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()?;
            let mut session = WorkoutSession::new(&db, user, plan, IntervalScheduler::new(period));
            runtime.block_on(session.run_to_completion(print_event));
            print_event(&session.controller().snapshot());
        }
        WorkoutAction::Plan { routine } => {
            let routine = pick_routine(&store, user, routine.as_deref())?;
            let plan = WorkoutPlan::from_routine(routine.as_ref(), &config.plan_defaults());
            let estimated = routine
                .as_ref()
                .and_then(|r| r.meta.as_ref())
                .and_then(|m| m.estimated_minutes);
            println!("{}", serde_json::to_string_pretty(&plan.summary(estimated))?);
        }
    }
    Ok(())
}
