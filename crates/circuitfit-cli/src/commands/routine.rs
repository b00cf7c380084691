use clap::Subcommand;
use circuitfit_core::workout::PlanSummary;
use circuitfit_core::{
    Config, CoreError, Database, IdentityProvider, Routine, RoutineDraft, RoutineStore,
    ValidationError, WorkoutPlan,
};
use serde::Serialize;

#[derive(Subcommand)]
pub enum RoutineAction {
    /// List default and custom routines
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print one routine with its plan summary as JSON
    Show {
        /// Routine ID
        id: String,
    },
    /// Create an empty custom routine
    Create,
    /// Copy any routine into a new custom routine
    Duplicate {
        /// Source routine ID
        id: String,
    },
    /// Edit a custom routine
    Edit {
        /// Routine ID
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        rounds: Option<u32>,
        /// Rest between exercises, in seconds
        #[arg(long)]
        rest: Option<u32>,
        #[arg(long)]
        weekly_target: Option<u32>,
        /// Estimated minimum duration in minutes
        #[arg(long)]
        min: Option<u32>,
        /// Estimated maximum duration in minutes
        #[arg(long)]
        max: Option<u32>,
        /// Tips, one per line
        #[arg(long)]
        advice: Option<String>,
    },
    /// Delete a custom routine
    Delete {
        /// Routine ID
        id: String,
    },
    /// Select the routine used by `workout run`
    Select {
        /// Routine ID
        id: String,
    },
    /// Print the currently selected routine ID
    Selected,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RoutineRow<'a> {
    #[serde(flatten)]
    routine: &'a Routine,
    is_default: bool,
    selected: bool,
}

#[derive(Serialize)]
struct ShowOutput<'a> {
    routine: RoutineRow<'a>,
    summary: PlanSummary,
}

pub fn run(action: RoutineAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let identity = IdentityProvider::load(&db);
    let user = identity.user_id();
    let store = RoutineStore::new(&db);

    match action {
        RoutineAction::List { json } => {
            let selected = store.resolve_selection(user).map(|r| r.id);
            let routines = store.list_all_routines(user);
            if json {
                let rows: Vec<RoutineRow> = routines
                    .iter()
                    .map(|r| RoutineRow {
                        routine: r,
                        is_default: r.is_default,
                        selected: selected.as_deref() == Some(r.id.as_str()),
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for r in &routines {
                    let marker = if selected.as_deref() == Some(r.id.as_str()) { "*" } else { " " };
                    let kind = if r.is_default { "default" } else { "custom" };
                    println!("{marker} {:<28} {:<8} {}", r.id, kind, r.name);
                }
            }
        }
        RoutineAction::Show { id } => {
            let routine = store
                .get_routine_by_id(user, &id)
                .ok_or_else(|| CoreError::routine_not_found(&id))?;
            let defaults = Config::load_or_default().plan_defaults();
            let summary = WorkoutPlan::from_routine(Some(&routine), &defaults)
                .summary(routine.meta.as_ref().and_then(|m| m.estimated_minutes));
            let out = ShowOutput {
                routine: RoutineRow {
                    routine: &routine,
                    is_default: routine.is_default,
                    selected: store
                        .resolve_selection(user)
                        .is_some_and(|selected| selected.id == id),
                },
                summary,
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        RoutineAction::Create => {
            let routine = store.create_user_routine(user);
            println!("Routine created: {}", routine.id);
        }
        RoutineAction::Duplicate { id } => {
            let routine = store.duplicate_routine(user, &id)?;
            println!("Routine created: {}", routine.id);
        }
        RoutineAction::Edit {
            id,
            name,
            rounds,
            rest,
            weekly_target,
            min,
            max,
            advice,
        } => {
            let mut draft = store
                .get_routine_by_id(user, &id)
                .map(|r| RoutineDraft::from_routine(&r))
                .unwrap_or_default();
            if let Some(name) = name {
                draft.name = name;
            }
            if let Some(rounds) = rounds {
                draft.rounds = rounds;
            }
            if let Some(rest) = rest {
                draft.rest_seconds = rest;
            }
            if let Some(target) = weekly_target {
                draft.weekly_target = target;
            }
            if let Some(min) = min {
                draft.estimated_min = min;
            }
            if let Some(max) = max {
                draft.estimated_max = max;
            }
            if let Some(advice) = advice {
                draft.advice = advice.replace("\\n", "\n");
            }
            let routine = store.edit_user_routine(user, &id, &draft)?;
            println!("Routine updated: {}", routine.id);
        }
        RoutineAction::Delete { id } => {
            if !store.list_user_routines(user).iter().any(|r| r.id == id) {
                if store.list_default_routines().iter().any(|r| r.id == id) {
                    return Err(CoreError::from(ValidationError::ReadOnly { id }).into());
                }
                return Err(CoreError::routine_not_found(&id).into());
            }
            store.delete_user_routine(user, &id);
            println!("Routine deleted: {id}");
        }
        RoutineAction::Select { id } => {
            if store.get_routine_by_id(user, &id).is_none() {
                return Err(CoreError::routine_not_found(&id).into());
            }
            store.select_routine(&id);
            println!("Selected: {id}");
        }
        RoutineAction::Selected => match store.resolve_selection(user) {
            Some(routine) => println!("{}", routine.id),
            None => println!("none"),
        },
    }
    Ok(())
}
