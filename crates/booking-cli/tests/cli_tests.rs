//! Integration tests for the `booking` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the schedule,
//! export and due subcommands through the actual binary, including stdin
//! input, file output, config overrides and error handling.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to the reservations.csv fixture.
fn sheet_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/reservations.csv")
}

fn malformed_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/malformed.csv")
}

fn config_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/config.toml")
}

/// A config path that never exists, so tests do not pick up the user's file.
fn no_config() -> String {
    std::env::temp_dir()
        .join("booking-cli-tests-no-config.toml")
        .display()
        .to_string()
}

fn booking() -> Command {
    let mut cmd = Command::cargo_bin("booking").unwrap();
    cmd.args(["--config", &no_config()]);
    cmd
}

// ─────────────────────────────────────────────────────────────────────────────
// schedule
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn schedule_prints_merged_reservations() {
    booking()
        .args(["schedule", "-i", sheet_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "9:00 AM - 11:00 AM, CWNG_C110 Lecture Hall, Clicker Set, Laptop Cart",
        ))
        .stdout(predicate::str::contains(
            "1:00 PM - 2:30 PM, MAIN_A210 Seminar Room, Document Camera",
        ))
        .stdout(predicate::str::contains("deliver: 8:50 AM    pick up: 11:00 AM - 11:30 AM"))
        .stdout(predicate::str::contains("BIO 101").not());
}

#[test]
fn schedule_reads_stdin() {
    let sheet = std::fs::read_to_string(sheet_path()).unwrap();
    booking()
        .arg("schedule")
        .write_stdin(sheet)
        .assert()
        .success()
        .stdout(predicate::str::contains("MAIN_A210 Seminar Room"));
}

#[test]
fn schedule_reads_legacy_encoded_sheet() {
    let mut sheet = b"Start,End,Event,Org,Count,Space,Resource\n9:00".to_vec();
    sheet.push(0xA0);
    sheet.extend_from_slice(b"AM,10:00 AM,CHEM,Chem,24,CWNG_C110 Hall,Laptop Cart\n");
    booking()
        .arg("schedule")
        .write_stdin(sheet)
        .assert()
        .success()
        .stdout(predicate::str::contains("9:00 AM - 10:00 AM, CWNG_C110 Hall, Laptop Cart"));
}

#[test]
fn config_override_changes_merging() {
    Command::cargo_bin("booking")
        .unwrap()
        .args(["--config", config_path(), "schedule", "-i", sheet_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("9:00 AM - 10:00 AM, CWNG_C110"))
        .stdout(predicate::str::contains("10:10 AM - 11:00 AM, CWNG_C110"));
}

#[test]
fn malformed_sheet_fails() {
    booking()
        .args(["schedule", "-i", malformed_path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Row 3"))
        .stderr(predicate::str::contains("half past ten"));
}

#[test]
fn missing_input_file_fails() {
    booking()
        .args(["schedule", "-i", "/nonexistent/sheet.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// export
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn export_writes_tomorrows_csv() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().to_str().unwrap();

    booking()
        .args(["export", "-i", sheet_path(), "-o", out, "--date", "2026-03-16"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mar-17.csv"));

    let content = std::fs::read_to_string(dir.path().join("Mar-17.csv")).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("Room"));
    assert_eq!(
        lines[1],
        ",C110,,X,,,X,,,8:50 AM,9:00 AM,,11:00 AM,11:00 AM - 11:30 AM,"
    );
    assert_eq!(lines[2], ",A210,,,X,,,,,Open,1:00 PM,,2:30 PM,2:40 PM,");
}

#[test]
fn export_json_keeps_highlight() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().to_str().unwrap();

    booking()
        .args([
            "export", "-i", sheet_path(), "-o", out, "--date", "2026-03-16", "--format", "json",
        ])
        .assert()
        .success();

    let content = std::fs::read_to_string(dir.path().join("Mar-17.json")).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&content).unwrap();
    let cells = doc["cells"].as_array().unwrap();
    assert!(cells
        .iter()
        .any(|c| c["row"] == 2 && c["column"] == "A" && c["style"] == "highlight"));
    assert!(cells
        .iter()
        .filter(|c| c["row"] == 3)
        .all(|c| c["style"] == "plain"));
}

#[test]
fn export_to_missing_directory_fails() {
    booking()
        .args(["export", "-i", sheet_path(), "-o", "/nonexistent/dir"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to create file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// due
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn due_before_first_class_lists_delivery() {
    booking()
        .args(["due", "-i", sheet_path(), "--at", "8:30 AM"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Due at 8:30 AM"))
        .stdout(predicate::str::contains("[ ] 8:50 AM | C110 | Clickers, Laptops"))
        .stdout(predicate::str::contains("PICKUPS\n  (none)"));
}

#[test]
fn due_mid_morning_lists_pickup() {
    booking()
        .args(["due", "-i", sheet_path(), "--at", "10:31 AM"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DELIVERIES\n  (none)"))
        .stdout(predicate::str::contains("11:00 AM - 11:30 AM | C110 | Clickers, Laptops"));
}

#[test]
fn due_lookahead_override() {
    booking()
        .args([
            "due", "-i", sheet_path(), "--at", "10:31 AM", "--lookahead-minutes", "180",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("By 1:00 PM | A210 | Doc Cam"));
}

#[test]
fn due_json_output() {
    let output = booking()
        .args(["due", "-i", sheet_path(), "--at", "2:00 PM", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["at"], "2:00 PM");
    assert_eq!(doc["deliveries"].as_array().unwrap().len(), 0);
    let pickups = doc["pickups"].as_array().unwrap();
    assert_eq!(pickups.len(), 1);
    assert_eq!(pickups[0]["id"], 1);
    assert_eq!(pickups[0]["priority"], "standard");
    assert_eq!(pickups[0]["event"]["pickup"]["kind"], "at");
}

#[test]
fn due_rejects_bad_clock() {
    booking()
        .args(["due", "-i", sheet_path(), "--at", "25 o'clock"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --at"));
}
