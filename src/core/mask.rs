//! Masking of credential values in diagnostic output.
//!
//! Values are masked unless the operator explicitly opts in through
//! `RADKEEP_DEBUG_LOG_SECRETS` or `[logging] reveal_secrets`.

/// Mask all but the last `keep` characters of `value`.
///
/// Returns the value untouched when `reveal` is set.
pub fn mask_secret(value: &str, keep: usize, reveal: bool) -> String {
    if reveal {
        return value.to_string();
    }

    let len = value.chars().count();
    if len <= keep {
        return "*".repeat(len);
    }

    let tail: String = value.chars().skip(len - keep).collect();
    format!("{}{}", "*".repeat(len - keep), tail)
}

/// Interpret an environment-style boolean (`1`, `true`, `yes`, `on`).
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
