//! Tests for error handling, configuration, and global flags.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_help() {
    let t = Test::new();

    let output = t.cmd().arg("--help").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "radkeep");
}

#[test]
fn test_unknown_command_fails() {
    let t = Test::new();

    let output = t.cmd().arg("unknown-command").output().unwrap();
    assert_failure(&output);
}

#[test]
fn test_missing_file_setting() {
    let t = Test::new();

    t.cmd()
        .env_remove("RADKEEP_FILE")
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no authorize file configured"))
        .stdout(predicate::str::contains("RADKEEP_FILE"));
}

#[test]
fn test_file_flag_overrides_env() {
    let t = Test::new();
    let other = t.dir.path().join("other");

    t.cmd()
        .arg("--file")
        .arg(&other)
        .args(["add", "alice"])
        .assert()
        .success();

    assert!(other.exists());
    assert!(!t.file().exists());
}

#[test]
fn test_config_file_supplies_settings() {
    let t = Test::new();
    let config = t.dir.path().join("radkeep.toml");
    std::fs::write(
        &config,
        format!(
            "[store]\nfile = {:?}\nreply_message = \"\"\n\n[credentials]\nlength = 20\n",
            t.file().display().to_string()
        ),
    )
    .unwrap();

    let output = t
        .cmd()
        .env_remove("RADKEEP_FILE")
        .arg("--config")
        .arg(&config)
        .args(["add", "alice"])
        .output()
        .unwrap();
    assert_success(&output);

    let content = t.read_file();
    assert!(content.contains("alice\tNT-Password"));
    assert!(!content.contains("Reply-Message"));
}

#[test]
fn test_invalid_config_rejected() {
    let t = Test::new();
    let config = t.dir.path().join("radkeep.toml");
    std::fs::write(&config, "[credentials]\nlength = 2\n").unwrap();

    t.cmd()
        .arg("--config")
        .arg(&config)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("credentials.length"));
}

#[test]
fn test_invalid_username_rejected() {
    let t = Test::new();

    t.cmd()
        .args(["add", "#alice"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid username"));
    assert!(!t.file().exists());
}

#[test]
fn test_verbose_logs_to_stderr() {
    let t = Test::new();

    let output = t.cmd().args(["--verbose", "list", "--json"]).output().unwrap();
    assert_success(&output);
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["count"], 0);
}
