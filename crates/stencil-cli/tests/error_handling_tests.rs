//! Tests for error messages, suggestions and exit codes.

use std::fs;

use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

fn stencil(dir: &std::path::Path) -> assert_cmd::Command {
    let mut cmd = cargo::cargo_bin_cmd!("stencil");
    cmd.current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join(".xdg"))
        .env("HOME", dir)
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn missing_explicit_config_is_a_configuration_error() {
    let tmp = TempDir::new().unwrap();
    stencil(tmp.path())
        .args(["--config", "nope.toml", "schema:list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"))
        .stderr(predicate::str::contains("stencil config path"));
}

#[test]
fn malformed_project_config_is_reported() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".stencil.toml"), "[paths\ndto = ").unwrap();
    stencil(tmp.path())
        .arg("schema:list")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn invalid_entity_name_is_rejected() {
    let tmp = TempDir::new().unwrap();
    stencil(tmp.path())
        .args(["make:dto", "9lives"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn undeclared_entity_suggests_a_manifest() {
    let tmp = TempDir::new().unwrap();
    stencil(tmp.path())
        .args(["schema:show", "Ghost"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Ghost"))
        .stderr(predicate::str::contains("Suggestions:"));
}

#[test]
fn unknown_config_key_lists_the_fix() {
    let tmp = TempDir::new().unwrap();
    stencil(tmp.path())
        .args(["config", "get", "paths.nowhere"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("stencil config list"));
}

#[test]
fn verbose_errors_drop_the_hint() {
    let tmp = TempDir::new().unwrap();
    stencil(tmp.path())
        .args(["-v", "config", "get", "paths.nowhere"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--verbose").not());
}
