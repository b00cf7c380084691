//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own data directory.

use std::path::Path;
use std::process::Command;

use circuitfit_core::storage::database::DB_FILE;
use circuitfit_core::{Database, KeyValueStore};
use tempfile::TempDir;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_circuitfit"))
        .args(args)
        .env("CIRCUITFIT_HOME", home)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_cli_success(home: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(home, args);
    assert_eq!(code, 0, "CLI command {args:?} failed: {stderr}");
    stdout
}

fn parse_json(json: &str) -> serde_json::Value {
    serde_json::from_str(json).expect("Failed to parse JSON output")
}

#[test]
fn test_routine_list_has_defaults() {
    let home = TempDir::new().unwrap();
    let out = run_cli_success(home.path(), &["routine", "list", "--json"]);
    let routines = parse_json(&out);
    let routines = routines.as_array().unwrap();
    assert_eq!(routines.len(), 3);
    assert!(routines.iter().all(|r| r["isDefault"] == true));
    assert_eq!(routines[0]["selected"], true);
}

#[test]
fn test_routine_create_and_select() {
    let home = TempDir::new().unwrap();
    let out = run_cli_success(home.path(), &["routine", "create"]);
    let id = out.trim().strip_prefix("Routine created: ").unwrap().to_string();
    assert!(id.starts_with("custom-"));

    run_cli_success(home.path(), &["routine", "select", &id]);
    let selected = run_cli_success(home.path(), &["routine", "selected"]);
    assert_eq!(selected.trim(), id);

    let list = parse_json(&run_cli_success(home.path(), &["routine", "list", "--json"]));
    assert_eq!(list.as_array().unwrap().len(), 4);
}

#[test]
fn test_editing_default_routine_fails() {
    let home = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(
        home.path(),
        &["routine", "edit", "core-express", "--name", "Otro"],
    );
    assert_ne!(code, 0);
    assert!(stderr.starts_with("error:"), "{stderr}");
}

#[test]
fn test_delete_user_routine_overriding_default() {
    let home = TempDir::new().unwrap();
    {
        let db = Database::open_at(home.path().join(DB_FILE)).unwrap();
        db.set(
            "routines:guest-000",
            r#"[{"id":"core-express","name":"Mi core","mainCircuit":[]}]"#,
        )
        .unwrap();
    }

    let list = parse_json(&run_cli_success(home.path(), &["routine", "list", "--json"]));
    let core = list
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["id"] == "core-express")
        .unwrap()
        .clone();
    assert_eq!(core["name"], "Mi core");
    assert_eq!(core["isDefault"], false);

    run_cli_success(home.path(), &["routine", "delete", "core-express"]);

    let list = parse_json(&run_cli_success(home.path(), &["routine", "list", "--json"]));
    let core = list
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["id"] == "core-express")
        .unwrap()
        .clone();
    assert_eq!(core["name"], "Core Express");
    assert_eq!(core["isDefault"], true);

    // With the override gone, the built-in is read-only again.
    let (_, stderr, code) = run_cli(home.path(), &["routine", "delete", "core-express"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("built-in"), "{stderr}");
}

#[test]
fn test_show_and_list_agree_on_selection() {
    let home = TempDir::new().unwrap();
    let list = parse_json(&run_cli_success(home.path(), &["routine", "list", "--json"]));
    let first = list[0]["id"].as_str().unwrap().to_string();
    assert_eq!(list[0]["selected"], true);

    let shown = parse_json(&run_cli_success(home.path(), &["routine", "show", &first]));
    assert_eq!(shown["routine"]["selected"], true);
    let other = parse_json(&run_cli_success(home.path(), &["routine", "show", "cardio-suave"]));
    assert_eq!(other["routine"]["selected"], false);
}

#[test]
fn test_select_unknown_routine_fails() {
    let home = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["routine", "select", "nope"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("not found"), "{stderr}");
}

#[test]
fn test_workout_run_logs_completion() {
    let home = TempDir::new().unwrap();
    let out = run_cli_success(home.path(), &["routine", "create"]);
    let id = out.trim().strip_prefix("Routine created: ").unwrap().to_string();

    let out = run_cli_success(
        home.path(),
        &["workout", "run", "--routine", &id, "--tick-ms", "1"],
    );
    let events: Vec<serde_json::Value> = out.lines().map(parse_json).collect();
    assert_eq!(events[0]["type"], "WorkoutStarted");
    assert!(events.iter().any(|e| e["type"] == "WorkoutCompleted"));
    let last = events.last().unwrap();
    assert_eq!(last["type"], "StateSnapshot");
    assert_eq!(last["progress_pct"], 100);

    let stats = parse_json(&run_cli_success(home.path(), &["stats", "show"]));
    assert_eq!(stats["total"], 1);
    assert_eq!(stats["weekly"], 1);
}

#[test]
fn test_workout_plan_summary() {
    let home = TempDir::new().unwrap();
    let out = run_cli_success(
        home.path(),
        &["workout", "plan", "--routine", "quema-grasa-abdominal"],
    );
    let summary = parse_json(&out);
    assert_eq!(summary["rounds"], 3);
    assert_eq!(summary["rest_seconds"], 20);
    assert_eq!(summary["warmup_minutes"], 5);
}

#[test]
fn test_auth_whoami_is_guest() {
    let home = TempDir::new().unwrap();
    run_cli_success(home.path(), &["auth", "login", "--token", "abc"]);
    let status = parse_json(&run_cli_success(home.path(), &["auth", "whoami"]));
    assert_eq!(status["user"]["id"], "guest-000");
    assert_eq!(status["isGuest"], true);
    assert_eq!(status["isAuthenticated"], true);
}

#[test]
fn test_config_set_and_get() {
    let home = TempDir::new().unwrap();
    run_cli_success(home.path(), &["config", "set", "workout.default_rounds", "5"]);
    let value = run_cli_success(home.path(), &["config", "get", "workout.default_rounds"]);
    assert_eq!(value.trim(), "5");

    let (_, _, code) = run_cli(home.path(), &["config", "set", "workout.nope", "1"]);
    assert_ne!(code, 0);
    let (_, _, code) = run_cli(home.path(), &["config", "get", "nope"]);
    assert_ne!(code, 0);
}
