//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with JSON on stdin and verify outputs.
//! HOME points at a temporary directory so config commands never touch
//! the real data directory.

use std::io::Write;
use std::process::{Command, Stdio};

/// Run a CLI command with `stdin` and return (code, stdout, stderr).
fn run_cli(home: &std::path::Path, args: &[&str], stdin: &str) -> (i32, String, String) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_lifeplanner"))
        .args(args)
        .env("HOME", home)
        .env_remove("LIFEPLANNER_ENV")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn CLI");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("Failed to write stdin");

    let output = child.wait_with_output().expect("Failed to wait for CLI");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (output.status.code().unwrap_or(-1), stdout, stderr)
}

fn parse(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout).expect("stdout is JSON")
}

#[test]
fn test_plan_expand_weekly() {
    let home = tempfile::tempdir().unwrap();
    let input = r#"{"date":"2024-01-01","rule":{"kind":"weekly"},"payload":{"title":"Piano"}}"#;
    let (code, stdout, _) = run_cli(
        home.path(),
        &["plan", "expand", "--parent-id", "plan-1"],
        input,
    );
    assert_eq!(code, 0);

    let json = parse(&stdout);
    let occurrences = json["occurrences"].as_array().unwrap();
    assert_eq!(occurrences[0]["date"], "2024-01-08");
    assert_eq!(occurrences[1]["date"], "2024-01-15");
    assert_eq!(occurrences[2]["date"], "2024-01-22");
    assert_eq!(occurrences[0]["parent_id"], "plan-1");
    assert_eq!(occurrences[0]["payload"]["title"], "Piano");
}

#[test]
fn test_plan_expand_dates_only_with_end_date() {
    let home = tempfile::tempdir().unwrap();
    let input =
        r#"{"date":"2024-01-01","rule":{"kind":"daily","end_date":"2024-01-04"},"payload":null}"#;
    let (code, stdout, _) = run_cli(
        home.path(),
        &["plan", "expand", "--parent-id", "p", "--dates-only"],
        input,
    );
    assert_eq!(code, 0);
    assert_eq!(
        parse(&stdout),
        serde_json::json!(["2024-01-02", "2024-01-03"])
    );
}

#[test]
fn test_plan_expand_rejects_invalid_rule() {
    let home = tempfile::tempdir().unwrap();
    let input = r#"{"date":"2024-01-01","rule":{"kind":"custom_days"},"payload":null}"#;
    let (code, _, stderr) = run_cli(home.path(), &["plan", "expand", "--parent-id", "p"], input);
    assert_ne!(code, 0);
    assert!(stderr.contains("Invalid recurrence rule"), "stderr: {stderr}");
}

#[test]
fn test_task_advance_monthly() {
    let home = tempfile::tempdir().unwrap();
    let input =
        r#"{"id":"task-1","title":"Pay rent","due_date":"2024-01-31","rule":{"kind":"monthly"}}"#;
    let (code, stdout, _) = run_cli(home.path(), &["task", "advance"], input);
    assert_eq!(code, 0);

    let json = parse(&stdout);
    assert!(json["completed"]["completed_at"].is_string());
    assert_eq!(json["successor"]["due_date"], "2024-02-29");
    assert_eq!(json["successor"]["original_task_id"], "task-1");
    assert!(json["successor"]["completed_at"].is_null());
}

#[test]
fn test_task_next_due_without_due_date_uses_today() {
    let home = tempfile::tempdir().unwrap();
    let input = r#"{"title":"Stretch","rule":{"kind":"custom_days","custom_interval_days":3}}"#;
    let (code, stdout, _) = run_cli(
        home.path(),
        &["task", "next-due", "--today", "2024-06-15"],
        input,
    );
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "\"2024-06-18\"");
}

#[test]
fn test_task_advance_non_repeating_prints_null_successor() {
    let home = tempfile::tempdir().unwrap();
    let input = r#"{"title":"One-off","due_date":"2024-01-01"}"#;
    let (code, stdout, _) = run_cli(home.path(), &["task", "advance"], input);
    assert_eq!(code, 0);
    assert!(parse(&stdout)["successor"].is_null());
}

#[test]
fn test_habit_streak() {
    let home = tempfile::tempdir().unwrap();
    let input = r#"{
        "habit": {"id": "h1", "name": "Flashcards", "target_days": [1, 2, 3, 4, 5]},
        "logs": [
            {"habit_id": "h1", "date": "2024-01-05"},
            {"habit_id": "h1", "date": "2024-01-08"},
            {"habit_id": "h1", "date": "2024-01-09"},
            {"habit_id": "h1", "date": "2024-01-10"}
        ]
    }"#;
    let (code, stdout, _) = run_cli(
        home.path(),
        &["habit", "streak", "--today", "2024-01-11"],
        input,
    );
    assert_eq!(code, 0);

    let json = parse(&stdout);
    assert_eq!(json["habit"], "Flashcards");
    assert_eq!(json["current"], 4);
    assert_eq!(json["longest"], 4);
}

#[test]
fn test_config_set_and_get() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(
        home.path(),
        &["config", "set", "recurrence.max_occurrences", "3"],
        "",
    );
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "ok");

    let (code, stdout, _) = run_cli(
        home.path(),
        &["config", "get", "recurrence.max_occurrences"],
        "",
    );
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "3");

    // The lowered cap applies to subsequent expansions.
    let input = r#"{"date":"2024-01-01","rule":{"kind":"daily"},"payload":null}"#;
    let (code, stdout, stderr) = run_cli(
        home.path(),
        &["plan", "expand", "--parent-id", "p", "--dates-only"],
        input,
    );
    assert_eq!(code, 0);
    assert_eq!(parse(&stdout).as_array().unwrap().len(), 3);
    assert!(stderr.contains("stopped early"));
}

#[test]
fn test_config_get_unknown_key_fails() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(home.path(), &["config", "get", "nope.nothing"], "");
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown key"));
}
