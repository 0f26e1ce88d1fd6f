//! Integration tests for `bt category` commands.

mod common;

use common::{TestEnv, parse_json};
use predicates::prelude::*;

#[test]
fn test_category_add_and_list() {
    let env = TestEnv::new();

    env.bt()
        .args(["category", "add", "Backend"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added category 'Backend'"));

    let output = env
        .bt()
        .args(["--json", "category", "list"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json = parse_json(&output);
    let names: Vec<&str> = json["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Backend", "Unnamed"]);
}

#[test]
fn test_category_add_trims_name() {
    let env = TestEnv::new();

    env.bt()
        .args(["category", "add", "  Tools  "])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added category 'Tools'"));

    let output = env
        .bt()
        .args(["--json", "category", "list"])
        .output()
        .unwrap()
        .stdout;
    let json = parse_json(&output);
    assert!(
        json["categories"]
            .as_array()
            .unwrap()
            .iter()
            .any(|c| c["name"] == "Tools")
    );
}

#[test]
fn test_category_add_duplicate_fails() {
    let env = TestEnv::new();

    env.bt().args(["category", "add", "Backend"]).assert().success();

    env.bt()
        .args(["category", "add", "Backend"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Already exists"));

    // Post-trim collision is also rejected
    env.bt()
        .args(["category", "add", " Backend "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Already exists"));
}

#[test]
fn test_category_edit_by_id() {
    let env = TestEnv::new();

    let output = env
        .bt()
        .args(["--json", "category", "add", "Old"])
        .output()
        .unwrap()
        .stdout;
    let id = parse_json(&output)["id"].as_i64().unwrap();

    env.bt()
        .args(["category", "edit", &id.to_string(), "--name", "New"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Renamed category 'Old' to 'New'"));
}

#[test]
fn test_category_edit_duplicate_name_fails() {
    let env = TestEnv::new();

    env.bt().args(["category", "add", "A"]).assert().success();
    let output = env
        .bt()
        .args(["--json", "category", "add", "B"])
        .output()
        .unwrap()
        .stdout;
    let id = parse_json(&output)["id"].as_i64().unwrap();

    env.bt()
        .args(["category", "edit", &id.to_string(), "--name", "A"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Already exists"));
}

#[test]
fn test_category_rm_with_yes() {
    let env = TestEnv::new();

    let output = env
        .bt()
        .args(["--json", "category", "add", "Doomed"])
        .output()
        .unwrap()
        .stdout;
    let id = parse_json(&output)["id"].as_i64().unwrap();

    env.bt()
        .args(["category", "rm", &id.to_string(), "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted category 'Doomed'"));

    env.bt()
        .args(["category", "rm", &id.to_string(), "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not found"));
}

#[test]
fn test_unnamed_category_exists_from_first_run() {
    let env = TestEnv::new();

    let output = env
        .bt()
        .args(["--json", "category", "list"])
        .output()
        .unwrap()
        .stdout;
    let json = parse_json(&output);
    assert!(
        json["categories"]
            .as_array()
            .unwrap()
            .iter()
            .any(|c| c["name"] == "Unnamed")
    );
}
