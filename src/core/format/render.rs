//! Canonical serialization.

use crate::core::domain::{Attribute, Record};
use crate::core::validation::validate_attribute_value;
use crate::error::Result;

/// Render a record as block lines.
///
/// The first attribute shares the header line with the username, separated
/// by a tab. Remaining attributes go on tab-indented continuation lines.
/// Values are always double-quoted.
///
/// # Errors
///
/// Returns `ValidationError::InvalidValue` if a value contains a control
/// character. Quoting cannot contain a line break, so such a value would
/// spill into lines of its own.
pub fn render_record(record: &Record) -> Result<Vec<String>> {
    let mut attributes = record.attributes().iter();

    let header = match attributes.next() {
        Some(first) => format!("{}\t{}", record.username(), render_attribute(first)?),
        None => record.username().to_string(),
    };

    let mut lines = vec![header];
    for attribute in attributes {
        lines.push(format!("\t{}", render_attribute(attribute)?));
    }
    Ok(lines)
}

/// Join lines into file content, one `\n` after each line.
pub fn render_lines<S: AsRef<str>>(lines: &[S]) -> String {
    let mut out = String::with_capacity(lines.iter().map(|l| l.as_ref().len() + 1).sum());
    for line in lines {
        out.push_str(line.as_ref());
        out.push('\n');
    }
    out
}

fn render_attribute(attribute: &Attribute) -> Result<String> {
    validate_attribute_value(attribute.name(), attribute.value())?;
    Ok(format!(
        "{} := \"{}\"",
        attribute.name(),
        escape(attribute.value())
    ))
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            _ => escaped.push(ch),
        }
    }
    escaped
}
