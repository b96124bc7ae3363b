//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn trainer(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("intuition-trainer").unwrap();
    cmd.arg("--data-dir").arg(dir.path());
    cmd
}

fn state_file(dir: &TempDir) -> std::path::PathBuf {
    dir.path().join("intuitionTrainerState.json")
}

#[test]
fn stats_on_fresh_install_is_empty() {
    let dir = TempDir::new().unwrap();
    trainer(&dir)
        .args(["stats", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"));
}

#[test]
fn stats_table_shows_no_data_message() {
    let dir = TempDir::new().unwrap();
    trainer(&dir)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Нет данных для отображения"));
}

#[test]
fn reset_persists_attempt_count() {
    let dir = TempDir::new().unwrap();
    trainer(&dir)
        .args(["reset", "--attempts", "120"])
        .assert()
        .success()
        .stdout(predicate::str::contains("New session: 120 attempts"));

    let raw = std::fs::read_to_string(state_file(&dir)).unwrap();
    assert!(raw.contains(r#""maxAttempts":120"#));
}

#[test]
fn reset_clamps_out_of_range_attempts() {
    let dir = TempDir::new().unwrap();
    trainer(&dir)
        .args(["reset", "--attempts", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("New session: 50 attempts"));
}

#[test]
fn full_session_is_archived() {
    let dir = TempDir::new().unwrap();
    let guesses = "b\n".repeat(50);

    trainer(&dir)
        .args(["play", "--attempts", "50", "--seed", "7"])
        .write_stdin(guesses)
        .assert()
        .success()
        .stdout(predicate::str::contains("Игра завершена!"));

    let out = trainer(&dir).args(["stats", "--json"]).assert().success();
    let series: serde_json::Value =
        serde_json::from_slice(&out.get_output().stdout).unwrap();
    let points = series.as_array().unwrap();
    assert_eq!(points.len(), 1);
    let p = &points[0];
    assert_eq!(
        p["correct"].as_u64().unwrap() + p["incorrect"].as_u64().unwrap(),
        50
    );
}

#[test]
fn show_emits_view_model() {
    let dir = TempDir::new().unwrap();
    trainer(&dir)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""color": "bg-gray-300""#))
        .stdout(predicate::str::contains(r#""label": "0/200""#));
}

#[test]
fn corrupt_state_fails_unless_discarded() {
    let dir = TempDir::new().unwrap();
    std::fs::write(state_file(&dir), "{ definitely not json").unwrap();

    trainer(&dir)
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed"));

    trainer(&dir)
        .args(["--discard-corrupt", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0/200"));
}

#[test]
fn invalid_bias_is_rejected() {
    let dir = TempDir::new().unwrap();
    trainer(&dir)
        .args(["play", "--bias", "2.0"])
        .write_stdin("q\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("blue bias"));
}
