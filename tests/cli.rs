//! Binary-level tests for the `pomodoro` command.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn pomodoro(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pomodoro").unwrap();
    cmd.env("HOME", home.path())
        .env_remove("POMODORO_CONFIG")
        .env_remove("POMODORO_LOG");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let home = TempDir::new().unwrap();
    pomodoro(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_config_defaults() {
    let home = TempDir::new().unwrap();
    pomodoro(&home)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("work_minutes: 50"))
        .stdout(predicate::str::contains("break_minutes: 10"));
}

#[test]
fn test_config_reads_home_file() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join(".pomodoro");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.yaml"), "timer:\n  work_minutes: 30\n").unwrap();

    pomodoro(&home)
        .args(["config", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"work_minutes\": 30"))
        .stdout(predicate::str::contains("\"break_minutes\": 10"));
}

#[test]
fn test_config_flag_overrides_path() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("custom.yaml");
    std::fs::write(&path, "ui:\n  title: Deep Work\n").unwrap();

    pomodoro(&home)
        .arg("--config")
        .arg(&path)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("title: Deep Work"));
}

#[test]
fn test_bad_config_fails() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("broken.yaml");
    std::fs::write(&path, "timer: [1, 2").unwrap();

    pomodoro(&home)
        .arg("--config")
        .arg(&path)
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}

#[test]
fn test_run_rejects_empty_work() {
    let home = TempDir::new().unwrap();
    pomodoro(&home)
        .args(["run", "--work", "", "--break", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Enter valid work and break time"));
}

#[test]
fn test_run_rejects_non_digit_break() {
    let home = TempDir::new().unwrap();
    pomodoro(&home)
        .args(["run", "-w", "25", "-b", "5m"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Enter valid work and break time"));
}

#[test]
fn test_run_rejects_zero() {
    let home = TempDir::new().unwrap();
    pomodoro(&home)
        .args(["run", "-w", "0", "-b", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Enter valid work and break time"));
}
