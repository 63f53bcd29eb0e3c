//! Test assertion helpers.

use std::process::Output;

/// Assert that a command output was successful.
pub fn assert_success(output: &Output) {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("Command failed:\n{}", stderr);
    }
}

/// Assert that a command output failed.
pub fn assert_failure(output: &Output) {
    assert!(
        !output.status.success(),
        "Expected command to fail but it succeeded"
    );
}

/// Get stdout as String.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Get stderr as String.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Assert stdout contains a string.
pub fn assert_stdout_contains(output: &Output, expected: &str) {
    let out = stdout(output);
    assert!(
        out.contains(expected),
        "stdout missing '{}', got: {}",
        expected,
        out
    );
}

/// Assert stderr contains a string.
pub fn assert_stderr_contains(output: &Output, expected: &str) {
    let err = stderr(output);
    assert!(
        err.contains(expected),
        "stderr missing '{}', got: {}",
        expected,
        err
    );
}

/// Assert stdout does NOT contain a string.
pub fn assert_stdout_excludes(output: &Output, excluded: &str) {
    let out = stdout(output);
    assert!(
        !out.contains(excluded),
        "stdout should not contain '{}', got: {}",
        excluded,
        out
    );
}

/// Number of header lines for `user` in `content`.
pub fn block_count(content: &str, user: &str) -> usize {
    content
        .lines()
        .filter(|l| !l.starts_with([' ', '\t', '#']))
        .filter(|l| l.split_whitespace().next() == Some(user))
        .count()
}

/// Assert the structural invariants every rewritten file must hold:
/// no orphaned continuation lines and no consecutive blank lines.
///
/// Indented lines are continuations even when whitespace-only.
pub fn assert_clean(content: &str) {
    let mut inside_header = false;
    let mut prev_blank = false;

    for (i, line) in content.lines().enumerate() {
        if line.starts_with([' ', '\t']) {
            assert!(inside_header, "orphaned line {}: {:?}", i, line);
            prev_blank = false;
            continue;
        }

        let blank = line.trim().is_empty();
        assert!(
            !(blank && prev_blank),
            "consecutive blank lines at {}:\n{}",
            i,
            content
        );
        prev_blank = blank;
        inside_header = !blank && !line.starts_with('#');
    }
}
