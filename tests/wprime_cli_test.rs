// ABOUTME: Integration tests for the wprime-cli binary
// ABOUTME: Runs the models and replay commands and checks their output and exit codes
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;
use wprime_balance::constants::env_keys;
use wprime_balance::models::{EngineSnapshot, WPrimeModelType};

const ENGINE_ENV_KEYS: [&str; 6] = [
    env_keys::CRITICAL_POWER,
    env_keys::ANAEROBIC_CAPACITY,
    env_keys::TAU_RECOVERY,
    env_keys::K_IN,
    env_keys::MODEL,
    env_keys::MAX_SAMPLE_GAP_MS,
];

/// Command for the built binary with the engine environment cleared
fn cli() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_wprime-cli"));
    for key in ENGINE_ENV_KEYS {
        command.env_remove(key);
    }
    command
}

/// Run the CLI and capture exit code, stdout and stderr
fn run_cli(command: &mut Command) -> (i32, String, String) {
    let output = command.output().unwrap();
    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

fn steady_recording(watts: u32, seconds: i64) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for second in 0..=seconds {
        writeln!(
            file,
            r#"{{"watts": {watts}, "timestamp_millis": {}}}"#,
            second * 1000
        )
        .unwrap();
    }
    file.flush().unwrap();
    file
}

#[test]
fn test_models_lists_every_model_with_its_parameters() {
    let (exit_code, stdout, _stderr) = run_cli(cli().arg("models"));
    assert_eq!(exit_code, 0);

    for model in WPrimeModelType::ALL {
        let line = stdout
            .lines()
            .find(|line| line.trim_start().starts_with(model.name()))
            .unwrap_or_else(|| panic!("{model} missing from:\n{stdout}"));
        assert!(line.contains(model.display_name()));
        assert_eq!(line.contains("tau"), model.uses_tau(), "{line}");
        assert_eq!(line.contains("kIn"), model.uses_k_in(), "{line}");
        assert_eq!(
            line.contains("(default)"),
            model == WPrimeModelType::default(),
            "{line}"
        );
    }
}

#[test]
fn test_replay_json_emits_one_snapshot_per_reading() {
    let recording = steady_recording(350, 60);
    let (exit_code, stdout, stderr) = run_cli(
        cli()
            .args(["replay", "--json", "--input"])
            .arg(recording.path()),
    );
    assert_eq!(exit_code, 0, "{stderr}");

    let snapshots: Vec<EngineSnapshot> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(snapshots.len(), 61);
    assert!((snapshots[0].w_prime_percentage - 100.0).abs() < f64::EPSILON);
    let last = snapshots.last().unwrap();
    assert!((last.w_prime_joules - 6_000.0).abs() < 1e-9);
    assert_eq!(last.model, WPrimeModelType::SkibaDifferential);
}

#[test]
fn test_replay_overrides_apply_on_top_of_environment() {
    let recording = steady_recording(350, 10);
    let (exit_code, stdout, stderr) = run_cli(
        cli()
            .env(env_keys::CRITICAL_POWER, "300")
            .args(["replay", "--json", "--model", "bartram", "--input"])
            .arg(recording.path()),
    );
    assert_eq!(exit_code, 0, "{stderr}");

    let last: EngineSnapshot = serde_json::from_str(stdout.lines().last().unwrap()).unwrap();
    assert_eq!(last.model, WPrimeModelType::Bartram);
    assert!((last.critical_power_watts - 300.0).abs() < f64::EPSILON);
    assert!((last.w_prime_joules - 11_500.0).abs() < 1e-9);
}

#[test]
fn test_unknown_model_in_environment_fails_fast() {
    let recording = steady_recording(200, 5);
    let (exit_code, stdout, stderr) = run_cli(
        cli()
            .env(env_keys::MODEL, "banister")
            .args(["replay", "--input"])
            .arg(recording.path()),
    );
    assert_ne!(exit_code, 0);
    assert!(stdout.is_empty(), "{stdout}");
    assert!(stderr.contains("Failed to load engine settings"), "{stderr}");
    assert!(stderr.contains("banister"), "{stderr}");
}

#[test]
fn test_missing_recording_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let (exit_code, _stdout, stderr) = run_cli(
        cli()
            .args(["replay", "--input"])
            .arg(dir.path().join("absent.jsonl")),
    );
    assert_ne!(exit_code, 0);
    assert!(stderr.contains("absent.jsonl"), "{stderr}");
}
