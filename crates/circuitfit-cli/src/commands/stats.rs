use chrono::Utc;
use clap::Subcommand;
use circuitfit_core::{
    Config, Database, IdentityProvider, RoutineStore, WorkoutLogStore, WorkoutStats,
};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Weekly count, weekly target and total for the current user
    Show,
    /// Every logged completion date
    Log,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let identity = IdentityProvider::load(&db);
    let user = identity.user_id();
    let log = WorkoutLogStore::new(&db).load(user);

    match action {
        StatsAction::Show => {
            let config = Config::load_or_default();
            let selected = RoutineStore::new(&db).resolve_selection(user);
            let stats = WorkoutStats::for_routine(
                &log,
                selected.as_ref(),
                config.stats.weekly_target,
                Utc::now(),
            );
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        StatsAction::Log => {
            println!("{}", serde_json::to_string_pretty(&log)?);
        }
    }
    Ok(())
}
