//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a throwaway data directory and
//! verify outputs.

use std::path::Path;
use std::process::Command;

use serde_json::Value;

/// Run a CLI command and return (exit code, stdout, stderr).
fn run_cli(data_dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_glareguard-cli"))
        .args(args)
        .env("GLAREGUARD_DATA_DIR", data_dir)
        .env("GLAREGUARD_LOG", "warn")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn json(stdout: &str) -> Value {
    serde_json::from_str(stdout).expect("stdout should be JSON")
}

#[test]
fn test_score_heavy_daytime_use() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["score", "--minutes", "500", "--hour", "14"]);
    assert_eq!(code, 0);

    let out = json(&stdout);
    assert_eq!(out["blueLightLevel"], "High");
    assert_eq!(out["protectionScore"], 30);
    assert_eq!(out["formattedTime"], "8.3h");
}

#[test]
fn test_score_evening_use() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["score", "--minutes", "100", "--hour", "21"]);
    assert_eq!(code, 0);

    let out = json(&stdout);
    assert_eq!(out["blueLightLevel"], "Medium");
    assert_eq!(out["protectionScore"], 80);
}

#[test]
fn test_score_rejects_bad_hour() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["score", "--minutes", "10", "--hour", "24"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_status_fresh_install() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["status"]);
    assert_eq!(code, 0);

    let out = json(&stdout);
    assert_eq!(out["todayTotal"], 0);
    assert_eq!(out["formattedTime"], "0m");
    assert_eq!(out["isActive"], false);
    assert_eq!(out["blueFilterEnabled"], false);
    assert_eq!(out["breakRemindersEnabled"], true);
    assert_eq!(out["screenTimeTier"], "healthy");
    // Zero minutes reads as Medium in the evening, Low otherwise.
    let expected = if out["blueLightLevel"] == "Low" {
        "Minimal exposure"
    } else {
        "Moderate exposure"
    };
    assert_eq!(out["blueLightDescription"], expected);
    assert!(out["recommendations"].is_array());
}

#[test]
fn test_filter_toggle_persists() {
    let dir = tempfile::tempdir().unwrap();

    let (code, stdout, _) = run_cli(dir.path(), &["filter", "on"]);
    assert_eq!(code, 0);
    let event = json(&stdout);
    assert_eq!(event["type"], "BlueFilterChanged");
    assert_eq!(event["enabled"], true);
    assert!(dir.path().join("filter.css").exists());

    let (_, stdout, _) = run_cli(dir.path(), &["status"]);
    assert_eq!(json(&stdout)["blueFilterEnabled"], true);

    let (code, _, _) = run_cli(dir.path(), &["filter", "off"]);
    assert_eq!(code, 0);
    assert!(!dir.path().join("filter.css").exists());

    let (_, stdout, _) = run_cli(dir.path(), &["status"]);
    assert_eq!(json(&stdout)["blueFilterEnabled"], false);
}

#[test]
fn test_reminders_toggle_persists() {
    let dir = tempfile::tempdir().unwrap();

    let (code, stdout, _) = run_cli(dir.path(), &["reminders", "off"]);
    assert_eq!(code, 0);
    let event = json(&stdout);
    assert_eq!(event["type"], "BreakRemindersChanged");
    assert_eq!(event["timer_running"], false);

    let (_, stdout, _) = run_cli(dir.path(), &["status"]);
    assert_eq!(json(&stdout)["breakRemindersEnabled"], false);
}

#[test]
fn test_reset() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["reset"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("reset"));

    let (_, stdout, _) = run_cli(dir.path(), &["status"]);
    assert_eq!(json(&stdout)["todayTotal"], 0);
}

#[test]
fn test_config_get_set() {
    let dir = tempfile::tempdir().unwrap();

    let (code, stdout, _) = run_cli(dir.path(), &["config", "get", "reminders.break_interval_min"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "20");

    let (code, _, _) = run_cli(dir.path(), &["config", "set", "reminders.break_interval_min", "45"]);
    assert_eq!(code, 0);

    let (_, stdout, _) = run_cli(dir.path(), &["config", "get", "reminders.break_interval_min"]);
    assert_eq!(stdout.trim(), "45");
    assert!(dir.path().join("config.toml").exists());
}

#[test]
fn test_config_unknown_key() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["config", "get", "nope.nothing"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_watch_stops_after_duration() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["watch", "--for-secs", "1"]);
    assert_eq!(code, 0);

    let first = stdout.lines().next().expect("at least one event");
    assert_eq!(json(first)["type"], "TrackerStarted");
    assert!(stdout.contains("TrackerStopped"));
}

#[test]
fn test_corrupt_database_falls_back_to_memory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("glareguard.db"), vec![0x42u8; 4096]).unwrap();

    let (code, stdout, _) = run_cli(dir.path(), &["status"]);
    assert_eq!(code, 0);
    assert_eq!(json(&stdout)["todayTotal"], 0);

    let (code, stdout, _) = run_cli(dir.path(), &["watch", "--for-secs", "1"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("TrackerStopped"));

    let (code, _, _) = run_cli(dir.path(), &["filter", "on"]);
    assert_eq!(code, 0);
}
