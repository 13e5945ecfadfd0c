//! Integration tests for the labup CLI
//!
//! These tests exercise the binary end to end in temporary project
//! directories. The provisioning path is only driven to its failure gates;
//! nothing here requires a working docker daemon.

use assert_cmd::cargo;
use predicates::prelude::*;
use serial_test::serial;
use std::fs;
use tempfile::TempDir;

/// Helper function to create a labup command
fn labup() -> assert_cmd::Command {
    assert_cmd::Command::new(cargo::cargo_bin!("labup"))
}

/// Write a minimal config with a small notebook and two expected files
fn write_project_config(dir: &std::path::Path) {
    fs::write(
        dir.join("labup.toml"),
        r#"[notebook]
path = "nb.ipynb"
expected_files = ["a.txt", "b.txt"]
"#,
    )
    .unwrap();
}

const VALID_NOTEBOOK: &str = r#"{"cells": [], "nbformat": 4, "nbformat_minor": 5}"#;

// =============================================================================
// VALIDATE COMMAND TESTS
// =============================================================================

#[test]
fn validate_passes_with_valid_notebook_and_files() {
    let temp = TempDir::new().unwrap();
    write_project_config(temp.path());
    fs::write(temp.path().join("nb.ipynb"), VALID_NOTEBOOK).unwrap();
    fs::write(temp.path().join("a.txt"), "a").unwrap();
    fs::write(temp.path().join("b.txt"), "b").unwrap();

    labup()
        .arg("validate")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("All checks passed"))
        .stdout(predicate::str::contains("found: a.txt"));
}

#[test]
fn validate_fails_and_lists_only_the_missing_files() {
    let temp = TempDir::new().unwrap();
    write_project_config(temp.path());
    fs::write(temp.path().join("nb.ipynb"), VALID_NOTEBOOK).unwrap();
    fs::write(temp.path().join("a.txt"), "a").unwrap();

    labup()
        .arg("validate")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("MISSING: b.txt"))
        .stdout(predicate::str::contains("MISSING: a.txt").not())
        .stdout(predicate::str::contains("Some checks failed"));
}

#[test]
fn validate_fails_on_malformed_notebook() {
    let temp = TempDir::new().unwrap();
    write_project_config(temp.path());
    fs::write(temp.path().join("nb.ipynb"), "{ not json").unwrap();
    fs::write(temp.path().join("a.txt"), "a").unwrap();
    fs::write(temp.path().join("b.txt"), "b").unwrap();

    labup()
        .arg("validate")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("FAIL: notebook 'nb.ipynb'"));
}

#[test]
fn validate_fails_on_absent_notebook() {
    let temp = TempDir::new().unwrap();
    write_project_config(temp.path());
    fs::write(temp.path().join("a.txt"), "a").unwrap();
    fs::write(temp.path().join("b.txt"), "b").unwrap();

    labup().arg("validate").current_dir(temp.path()).assert().failure();
}

#[test]
fn validate_honors_notebook_override() {
    let temp = TempDir::new().unwrap();
    write_project_config(temp.path());
    // Configured notebook is absent; the override points at a valid one
    fs::write(temp.path().join("other.ipynb"), VALID_NOTEBOOK).unwrap();
    fs::write(temp.path().join("a.txt"), "a").unwrap();
    fs::write(temp.path().join("b.txt"), "b").unwrap();

    labup()
        .args(["validate", "--notebook", "other.ipynb"])
        .current_dir(temp.path())
        .assert()
        .success();
}

#[test]
fn validate_json_output_is_machine_parseable() {
    let temp = TempDir::new().unwrap();
    write_project_config(temp.path());
    fs::write(temp.path().join("nb.ipynb"), VALID_NOTEBOOK).unwrap();
    fs::write(temp.path().join("a.txt"), "a").unwrap();

    let output = labup()
        .args(["--json", "validate"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["passed"], false);
    assert_eq!(json["notebook"]["valid"], true);
    let files = json["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[1]["path"], "b.txt");
    assert_eq!(files[1]["exists"], false);
}

// =============================================================================
// CONFIG TESTS
// =============================================================================

#[test]
fn malformed_config_is_reported() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("labup.toml"), "not { valid toml").unwrap();

    labup()
        .arg("validate")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse config"));
}

#[test]
fn config_flag_selects_an_alternate_file() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("alt.toml"),
        r#"[notebook]
path = "nb.ipynb"
expected_files = []
"#,
    )
    .unwrap();
    fs::write(temp.path().join("nb.ipynb"), VALID_NOTEBOOK).unwrap();

    labup()
        .args(["--config", "alt.toml", "validate"])
        .current_dir(temp.path())
        .assert()
        .success();
}

// =============================================================================
// UP COMMAND TESTS
// =============================================================================

/// The provisioning run must fail in an empty directory: either the runtime
/// is unavailable, or the input-data gate halts the sequence. All seven
/// steps are always reported.
#[test]
#[serial]
fn up_fails_fast_in_an_empty_project() {
    let temp = TempDir::new().unwrap();

    let output = labup()
        .args(["--json", "up"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["success"], false);
    assert!(json["error"].as_str().is_some());
    assert_eq!(json["steps"].as_array().unwrap().len(), 7);
}

// =============================================================================
// VERSION TESTS
// =============================================================================

#[test]
fn version_prints_version() {
    labup()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn version_json_output() {
    let output = labup()
        .args(["--json", "version"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}
