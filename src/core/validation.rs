//! Input validation for radkeep operations.
//!
//! Usernames become the first token of a header line in the authorize file,
//! so anything that would change how that line is classified or tokenized
//! is rejected up front.

use crate::core::constants::NT_HASH_LEN;
use crate::error::{Result, ValidationError};

/// Validate a username.
///
/// Usernames must:
/// - Be non-empty
/// - Contain no whitespace or control characters
/// - Not start with `#` (it would read back as a comment)
/// - Not contain `"` or `,` (attribute syntax)
///
/// # Errors
///
/// Returns `ValidationError` if the username is invalid.
pub fn validate_username(username: &str) -> Result<()> {
    if username.is_empty() {
        return Err(ValidationError::EmptyUsername.into());
    }

    if username.starts_with('#') {
        return Err(invalid(username, "cannot start with '#'".to_string()));
    }

    for (i, ch) in username.chars().enumerate() {
        if ch.is_whitespace() || ch.is_control() || ch == '"' || ch == ',' {
            return Err(invalid(
                username,
                format!("invalid character {:?} at position {}", ch, i + 1),
            ));
        }
    }

    Ok(())
}

/// Build a username of the form `<prefix>_<external_id>`.
///
/// # Errors
///
/// Returns `ValidationError` if either part is empty or the result is not
/// a valid username.
pub fn username_for(prefix: &str, external_id: &str) -> Result<String> {
    if prefix.is_empty() || external_id.is_empty() {
        return Err(invalid(
            &format!("{}_{}", prefix, external_id),
            "prefix and id must both be non-empty".to_string(),
        ));
    }

    let username = format!("{}_{}", prefix, external_id);
    validate_username(&username)?;
    Ok(username)
}

/// Validate a precomputed NT hash and return it in upper case.
///
/// # Errors
///
/// Returns `ValidationError::InvalidHash` unless `hash` is exactly 32
/// hex digits.
pub fn normalize_nt_hash(hash: &str) -> Result<String> {
    if hash.len() != NT_HASH_LEN {
        return Err(ValidationError::InvalidHash(format!(
            "expected {} hex digits, got {} characters",
            NT_HASH_LEN,
            hash.chars().count()
        ))
        .into());
    }
    if !hash.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ValidationError::InvalidHash("not hexadecimal".to_string()).into());
    }
    Ok(hash.to_ascii_uppercase())
}

/// Validate an attribute value before it is written to the file.
///
/// # Errors
///
/// Returns `ValidationError::InvalidValue` if `value` contains a control
/// character; a line break would start a new line in the file.
pub fn validate_attribute_value(name: &str, value: &str) -> Result<()> {
    match value.chars().position(char::is_control) {
        Some(i) => Err(ValidationError::InvalidValue {
            name: name.to_string(),
            reason: format!("control character at position {}", i + 1),
        }
        .into()),
        None => Ok(()),
    }
}

fn invalid(username: &str, reason: String) -> crate::error::Error {
    ValidationError::InvalidUsername {
        username: username.to_string(),
        reason,
    }
    .into()
}
