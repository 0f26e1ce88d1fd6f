//! Smoke tests for the bt binary.

mod common;

use common::{TestEnv, parse_json};
use predicates::prelude::*;

#[test]
fn test_version_flag() {
    let env = TestEnv::new();
    env.bt()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("bt"));
}

#[test]
fn test_help_lists_commands() {
    let env = TestEnv::new();
    env.bt()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("menu"))
        .stdout(predicate::str::contains("project"))
        .stdout(predicate::str::contains("category"));
}

#[test]
fn test_default_command_with_empty_store() {
    let env = TestEnv::new();
    // The picker menu bails out before any prompt when there is nothing to
    // pick, so this is safe to run without a terminal.
    env.bt()
        .assert()
        .success()
        .stdout(predicate::str::contains("No projects yet"));
}

#[test]
fn test_menu_empty_store_json() {
    let env = TestEnv::new();
    let output = env
        .bt()
        .args(["--json", "menu"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert_eq!(parse_json(&output)["status"], "empty");
}

#[test]
fn test_build_info() {
    let env = TestEnv::new();
    let output = env
        .bt()
        .args(["--json", "system", "build-info"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json = parse_json(&output);
    assert!(json["version"].as_str().is_some());
    assert!(json["commit"].as_str().is_some());
}

#[test]
fn test_data_dir_flag_overrides_env() {
    let env = TestEnv::new();
    let other = common::TempDir::new().unwrap();

    env.bt()
        .args(["--data-dir", other.path().to_str().unwrap()])
        .args(["category", "add", "Elsewhere"])
        .assert()
        .success();

    // The database landed in the flag's directory, not the env one
    assert!(other.path().join("berth.db").exists());
    assert!(!env.data_path().join("berth.db").exists());
}
