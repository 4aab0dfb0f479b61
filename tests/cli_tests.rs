//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn retext_bin() -> Command {
    Command::cargo_bin("retext").expect("binary builds")
}

#[test]
fn help_output() {
    retext_bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("hotkey"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn version_output() {
    retext_bin()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn config_help() {
    retext_bin()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("path"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn config_path_honors_override() {
    retext_bin()
        .args(["config", "path", "--config", "/tmp/retext-test.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/tmp/retext-test.json"));
}

#[test]
fn config_init_creates_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    retext_bin()
        .args(["config", "init", "--config"])
        .arg(&path)
        .assert()
        .success();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("fix-grammar"));
}

#[test]
fn config_init_refuses_overwrite() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{}").unwrap();

    retext_bin()
        .args(["config", "init", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn config_check_accepts_valid_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    retext_bin()
        .args(["config", "init", "--config"])
        .arg(&path)
        .assert()
        .success();

    retext_bin()
        .args(["config", "check", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stderr(predicate::str::contains("valid"));
}

#[test]
fn config_check_rejects_malformed_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    retext_bin()
        .args(["config", "check", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Invalid config"));
}

#[test]
fn config_check_rejects_bad_key_combination() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{
            "shortcuts": [
                { "id": "bad", "keys": "ctrl+shift", "backend": "openai",
                  "model": "gpt-4o", "prompt": "p" }
            ]
        }"#,
    )
    .unwrap();

    retext_bin()
        .args(["config", "check", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("no base key"));
}

#[test]
fn config_check_rejects_reserved_quit_binding() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{
            "shortcuts": [
                { "id": "clash", "keys": "ctrl+q", "backend": "openai",
                  "model": "gpt-4o", "prompt": "p" }
            ]
        }"#,
    )
    .unwrap();

    retext_bin()
        .args(["config", "check", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("reserved"));
}

#[test]
fn listener_with_empty_config_exits_with_usage_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "shortcuts": [] }"#).unwrap();

    retext_bin()
        .arg("--config")
        .arg(&path)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("No shortcuts configured"));
}
