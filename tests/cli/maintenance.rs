//! Tests for sanitize and completions.

use crate::support::*;

#[test]
fn test_sanitize_rewrites_junk() {
    let t = Test::with_file(JUNK_AUTHORIZE);

    let output = t.sanitize();
    assert_success(&output);
    assert_stdout_contains(&output, "sanitized");

    let content = t.read_file();
    assert_clean(&content);
    assert!(!content.contains("orphan"));
}

#[test]
fn test_sanitize_clean_file_is_noop() {
    let t = Test::with_file(SAMPLE_AUTHORIZE);

    let output = t.sanitize();
    assert_success(&output);
    assert_stdout_contains(&output, "already clean");
    assert_eq!(t.read_file(), SAMPLE_AUTHORIZE);
}

#[test]
fn test_completions_bash() {
    let t = Test::new();

    let output = t.cmd().args(["completions", "bash"]).output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "radkeep");
}

#[test]
fn test_completions_need_no_file() {
    let t = Test::new();

    let output = t
        .cmd()
        .env_remove("RADKEEP_FILE")
        .args(["completions", "zsh"])
        .output()
        .unwrap();
    assert_success(&output);
}
