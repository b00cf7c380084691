//! Integration tests for the routine → workout → stats workflow.
//!
//! These run against the SQLite backend to cover the same path the CLI
//! takes: resolve identity, pick a routine, run it, read the stats.

use chrono::Utc;
use circuitfit_core::routine::RoutineDraft;
use circuitfit_core::stats::DEFAULT_WEEKLY_TARGET;
use circuitfit_core::workout::PlanDefaults;
use circuitfit_core::{
    CoreError, Database, Event, IdentityProvider, ManualScheduler, Phase, RoutineStore,
    ValidationError, WorkoutLogStore, WorkoutPlan, WorkoutSession, WorkoutStats,
};

fn drive<S: circuitfit_core::Scheduler>(session: &mut WorkoutSession<'_, Database, S>) -> Vec<Event> {
    let mut events = session.start_workout();
    for _ in 0..100_000 {
        if session.controller().phase() == Phase::Done {
            return events;
        }
        if session.controller().is_running() {
            events.extend(session.on_tick());
        } else {
            events.extend(session.start_exercise());
        }
    }
    panic!("workout never finished");
}

#[test]
fn test_guest_runs_selected_default_routine() {
    let db = Database::open_memory().unwrap();
    let identity = IdentityProvider::load(&db);
    let routines = RoutineStore::new(&db);

    routines.select_routine("core-express");
    let routine = routines.resolve_selection(identity.user_id()).unwrap();
    assert_eq!(routine.id, "core-express");

    let plan = WorkoutPlan::from_routine(Some(&routine), &PlanDefaults::default());
    let expected_units = plan.total_units();
    let mut session = WorkoutSession::new(&db, identity.user_id(), plan, ManualScheduler::new());
    let events = drive(&mut session);

    let started = events
        .iter()
        .filter(|e| matches!(e, Event::ExerciseStarted { .. }))
        .count() as u32;
    assert_eq!(started, expected_units);
    assert_eq!(session.controller().progress_pct(), 100);
    drop(session);

    let log = WorkoutLogStore::new(&db).load(identity.user_id());
    let stats = WorkoutStats::for_routine(&log, Some(&routine), DEFAULT_WEEKLY_TARGET, Utc::now());
    assert_eq!(stats.total, 1);
    assert_eq!(stats.weekly, 1);
    assert_eq!(stats.weekly_target, 3);
}

#[test]
fn test_custom_routine_lifecycle() {
    let db = Database::open_memory().unwrap();
    let identity = IdentityProvider::load(&db);
    let user = identity.user_id().to_string();
    let routines = RoutineStore::new(&db);

    let created = routines.create_user_routine(&user);
    assert!(created.id.starts_with("custom-"));

    let draft = RoutineDraft {
        name: "Mañanas".to_string(),
        rounds: 2,
        rest_seconds: 5,
        advice: "Respira\n\n  Hidrátate ".to_string(),
        ..RoutineDraft::default()
    };
    let edited = routines.edit_user_routine(&user, &created.id, &draft).unwrap();
    assert_eq!(edited.name, "Mañanas");
    assert_eq!(edited.advice, vec!["Respira", "Hidrátate"]);

    let all = routines.list_all_routines(&user);
    assert_eq!(all.len(), 4);
    assert!(all.iter().filter(|r| r.is_default).count() == 3);

    // An empty routine finishes as soon as it starts.
    routines.select_routine(&created.id);
    let selected = routines.resolve_selection(&user).unwrap();
    let plan = WorkoutPlan::from_routine(Some(&selected), &PlanDefaults::default());
    let mut session = WorkoutSession::new(&db, &user, plan, ManualScheduler::new());
    session.start_workout();
    assert_eq!(session.controller().phase(), Phase::Done);
    drop(session);
    assert_eq!(WorkoutLogStore::new(&db).load(&user).total_count(), 1);

    // Deleting the selection falls back to the first catalog routine.
    routines.delete_user_routine(&user, &created.id);
    let fallback = routines.resolve_selection(&user).unwrap();
    assert_eq!(fallback.id, "quema-grasa-abdominal");
}

#[test]
fn test_default_routines_are_read_only() {
    let db = Database::open_memory().unwrap();
    let routines = RoutineStore::new(&db);
    let err = routines
        .edit_user_routine("guest-000", "core-express", &RoutineDraft::default())
        .unwrap_err();
    assert!(matches!(
        err,
        CoreError::Validation(ValidationError::ReadOnly { .. })
    ));

    let copy = routines.duplicate_routine("guest-000", "core-express").unwrap();
    assert_eq!(copy.name, "Copia de Core Express");
    assert!(routines
        .edit_user_routine("guest-000", &copy.id, &RoutineDraft::default())
        .is_ok());
}

#[test]
fn test_user_routine_overrides_default_in_place() {
    let db = Database::open_memory().unwrap();
    let routines = RoutineStore::new(&db);
    let mut custom = routines
        .get_routine_by_id("guest-000", "core-express")
        .unwrap();
    custom.name = "Core a mi manera".to_string();
    routines.upsert_user_routine("guest-000", custom);

    let all = routines.list_all_routines("guest-000");
    assert_eq!(all.len(), 3);
    assert_eq!(all[1].id, "core-express");
    assert_eq!(all[1].name, "Core a mi manera");
    assert!(!all[1].is_default);
}

#[test]
fn test_logs_are_per_user() {
    let db = Database::open_memory().unwrap();
    let logs = WorkoutLogStore::new(&db);
    let today = Utc::now().date_naive();
    logs.append("guest-000", today);
    logs.append("u-2", today);
    logs.append("u-2", today);
    assert_eq!(logs.load("guest-000").total_count(), 1);
    assert_eq!(logs.load("u-2").total_count(), 2);
}
