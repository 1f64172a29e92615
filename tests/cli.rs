//! Tests for the api-scenario binary
//!
//! These run the compiled CLI as a subprocess and check its exit status
//! and output.

use std::fs;
use std::process::{Command, Output};

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_api-scenario"))
        .args(args)
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to run api-scenario")
}

#[test]
fn test_steps_lists_standard_scenario_in_order() {
    let output = run_cli(&["steps"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let titles = [
        "1. Authenticate",
        "2. List users",
        "3. Create user",
        "4. Update user",
        "5. Validate rejection",
        "6. Performance check",
        "7. Delete user",
    ];
    let positions: Vec<usize> = titles
        .iter()
        .map(|t| stdout.find(t).unwrap_or_else(|| panic!("missing '{t}' in:\n{stdout}")))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_steps_reads_scenario_file() {
    let dir = tempfile::tempdir().unwrap();
    let scenario = dir.path().join("smoke.yaml");
    fs::write(
        &scenario,
        "name: Smoke\nsteps: [authenticate, list_users]\n",
    )
    .unwrap();

    let output = run_cli(&["steps", "--scenario", scenario.to_str().unwrap()]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Smoke"));
    assert!(stdout.contains("2. List users"));
    assert!(!stdout.contains("Delete user"));
}

#[test]
fn test_invalid_scenario_order_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();
    let scenario = dir.path().join("bad.yaml");
    fs::write(&scenario, "name: Bad\nsteps: [update_user, authenticate]\n").unwrap();

    let output = run_cli(&["steps", "--scenario", scenario.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no earlier step provides it"), "{stderr}");
}

#[test]
fn test_run_rejects_bad_base_url() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "").unwrap();

    let output = run_cli(&[
        "run",
        "--config",
        config.to_str().unwrap(),
        "--base-url",
        "not-a-url",
    ]);
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("base_url must start with"), "{stderr}");
}

#[test]
fn test_run_against_closed_port_exits_with_failure() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, format!("base_url = \"http://127.0.0.1:{port}\"\n")).unwrap();

    let output = run_cli(&["run", "--config", config.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Step 1: Authenticate"), "{stdout}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("7 of 7 steps did not pass"), "{stderr}");
}
