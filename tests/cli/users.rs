//! Tests for the user commands.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_add_prints_generated_password() {
    let t = Test::new();

    let output = t.add("alice");
    assert_success(&output);
    assert_stdout_contains(&output, "added alice");
    assert_stdout_contains(&output, "password");

    let content = t.read_file();
    assert!(content.contains("alice\tNT-Password := \""));
    assert!(content.contains("\tReply-Message := \"Welcome alice\""));
}

#[test]
fn test_add_with_piped_password() {
    let t = Test::new();

    let output = t.add_piped("alice", "password");
    assert_success(&output);
    assert_stdout_excludes(&output, "will not be shown again");
    assert!(t.read_file().contains(PASSWORD_HASH));
}

#[test]
fn test_add_empty_piped_password_fails() {
    let t = Test::new();

    let output = t.add_piped("alice", "");
    assert_failure(&output);
    assert_stderr_contains(&output, "secret cannot be empty");
    assert!(!t.file().exists());
}

#[test]
fn test_add_imported_hash() {
    let t = Test::new();

    let output = t.add_hash("alice", PASSWORD_HASH);
    assert_success(&output);
    assert_stdout_contains(&output, "hash imported");
    assert!(t.read_file().contains(PASSWORD_HASH));
}

#[test]
fn test_add_existing_user_fails_with_hint() {
    let t = Test::with_file(SAMPLE_AUTHORIZE);

    t.cmd()
        .args(["add", "alice"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("user already exists: alice"))
        .stdout(predicate::str::contains("radkeep reset alice"));

    assert_eq!(t.read_file(), SAMPLE_AUTHORIZE);
}

#[test]
fn test_prefix_builds_username() {
    let t = Test::new();

    t.cmd()
        .args(["--prefix", "user", "add", "U123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("added user_U123"));

    assert_eq!(block_count(&t.read_file(), "user_U123"), 1);
}

#[test]
fn test_reset_replaces_block() {
    let t = Test::new();
    assert_success(&t.add("bob"));
    let before = t.read_file();

    let output = t.reset("bob");
    assert_success(&output);
    assert_stdout_contains(&output, "password updated for bob");

    let after = t.read_file();
    assert_ne!(before, after);
    assert_eq!(block_count(&after, "bob"), 1);
    assert!(after.contains("# Password updated: "));
}

#[test]
fn test_reset_missing_user_fails() {
    let t = Test::new();

    t.cmd()
        .args(["reset", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("user not found: ghost"));
}

#[test]
fn test_status_masks_hash() {
    let t = Test::with_file(SAMPLE_AUTHORIZE);

    let output = t.status("alice");
    assert_success(&output);
    assert_stdout_contains(&output, "NT-Password");
    assert_stdout_contains(&output, "**********B7586C");
    assert_stdout_excludes(&output, PASSWORD_HASH);
    assert_stdout_contains(&output, "Welcome alice");
}

#[test]
fn test_status_masks_cleartext() {
    let t = Test::with_file(SAMPLE_AUTHORIZE);

    let output = t.status("bob");
    assert_success(&output);
    assert_stdout_contains(&output, "*****r2");
    assert_stdout_excludes(&output, "hunter2");
}

#[test]
fn test_status_reveals_when_enabled() {
    let t = Test::with_file(SAMPLE_AUTHORIZE);

    t.cmd()
        .env("RADKEEP_DEBUG_LOG_SECRETS", "yes")
        .args(["status", "bob"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hunter2"));
}

#[test]
fn test_status_json() {
    let t = Test::with_file(SAMPLE_AUTHORIZE);

    let output = t.status_json("alice");
    assert_success(&output);

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["username"], "alice");
    assert_eq!(json["attributes"][0]["name"], "NT-Password");
    assert_eq!(
        json["attributes"][0]["value"],
        format!("{}B7586C", "*".repeat(26))
    );
    assert_eq!(json["attributes"][1]["value"], "Welcome alice");
}

#[test]
fn test_status_missing_user() {
    let t = Test::new();

    let output = t.status("ghost");
    assert_failure(&output);
    assert_stderr_contains(&output, "user not found: ghost");
    assert_stdout_contains(&output, "radkeep add ghost");
}

#[test]
fn test_list() {
    let t = Test::with_file(SAMPLE_AUTHORIZE);

    let output = t.list();
    assert_success(&output);
    assert_stdout_contains(&output, "2 users");
    assert_stdout_contains(&output, "alice");
    assert_stdout_contains(&output, "bob");
}

#[test]
fn test_list_empty() {
    let t = Test::new();

    let output = t.list();
    assert_success(&output);
    assert_stdout_contains(&output, "no users stored");
}

#[test]
fn test_list_json() {
    let t = Test::with_file(SAMPLE_AUTHORIZE);

    let output = t.list_json();
    assert_success(&output);

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["count"], 2);
    assert_eq!(json["users"], serde_json::json!(["alice", "bob"]));
}

#[test]
fn test_rm() {
    let t = Test::with_file(DRIFTED_AUTHORIZE);

    let output = t.rm("carol");
    assert_success(&output);
    assert_stdout_contains(&output, "removed carol");
    assert_eq!(block_count(&t.read_file(), "carol"), 0);
}

#[test]
fn test_rm_missing_user_fails() {
    let t = Test::with_file(SAMPLE_AUTHORIZE);

    let output = t.rm("ghost");
    assert_failure(&output);
    assert_stderr_contains(&output, "user not found: ghost");
    assert_eq!(t.read_file(), SAMPLE_AUTHORIZE);
}

#[test]
fn test_add_rejects_malformed_hash() {
    let t = Test::new();

    let output = t.add_hash("alice", "X\nmallory\tCleartext-Password := pw");
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid NT hash");
    assert!(!t.file().exists());
}
