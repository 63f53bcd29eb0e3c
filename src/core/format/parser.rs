//! Record parsing.
//!
//! Turns raw lines into [`Record`]s and locates the blocks that belong to a
//! given username.

use std::ops::Range;

use tracing::debug;

use super::{classify, LineKind};
use crate::core::domain::{Attribute, Record};

/// Minimum whitespace-separated tokens on a usable header line:
/// username, attribute name, and at least one more token.
const MIN_HEADER_TOKENS: usize = 3;

/// Parse every record in `lines`, in file order.
///
/// Unparsable lines are skipped. Duplicate usernames are returned as
/// separate records.
pub fn parse_all<S: AsRef<str>>(lines: &[S]) -> Vec<Record> {
    let mut records = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let (record, next) = parse_one(lines, i);
        if let Some(record) = record {
            records.push(record);
        }
        i = next;
    }

    records
}

/// Parse the record whose header is at `start`.
///
/// Returns the record, if `start` holds a usable header, together with the
/// index at which scanning should resume. Anything that is not a usable
/// header (blank, comment, continuation, or a header with fewer than three
/// tokens) yields `None` and advances by one line.
pub fn parse_one<S: AsRef<str>>(lines: &[S], start: usize) -> (Option<Record>, usize) {
    let Some(line) = lines.get(start).map(|l| -> &str { l.as_ref() }) else {
        return (None, start);
    };

    if classify(line) != LineKind::Header {
        return (None, start + 1);
    }

    if line.split_whitespace().count() < MIN_HEADER_TOKENS {
        return (None, start + 1);
    }

    let trimmed = line.trim();
    let (username, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((username, rest)) => (username, rest),
        None => return (None, start + 1),
    };

    let mut record = Record::new(username, start..start + 1);
    for attribute in parse_items(rest) {
        record.push(attribute);
    }

    let end = block_end(lines, start + 1);
    for continuation in &lines[start + 1..end] {
        for attribute in parse_items(continuation.as_ref()) {
            record.push(attribute);
        }
    }
    record.set_end(end);

    debug!(
        user = %record.username(),
        attrs = ?record.attributes().iter().map(Attribute::name).collect::<Vec<_>>(),
        start,
        end,
        "parsed entry"
    );

    (Some(record), end)
}

/// Every block whose header's first token is `username`.
///
/// Ranges cover the header and its continuation lines, end exclusive.
/// Headers too short to parse still count, so malformed leftovers for a
/// user can be found and removed.
pub fn find_blocks<S: AsRef<str>>(lines: &[S], username: &str) -> Vec<Range<usize>> {
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i].as_ref();
        if classify(line) == LineKind::Header && line.split_whitespace().next() == Some(username) {
            let end = block_end(lines, i + 1);
            blocks.push(i..end);
            i = end;
        } else {
            i += 1;
        }
    }

    blocks
}

/// Walk back from `start` over the blank and comment lines directly above it.
pub fn history_start<S: AsRef<str>>(lines: &[S], start: usize) -> usize {
    let mut s = start.min(lines.len());
    while s > 0 && matches!(classify(lines[s - 1].as_ref()), LineKind::Blank | LineKind::Comment) {
        s -= 1;
    }
    s
}

/// Parse the comma-separated attribute items on one line.
///
/// Commas inside quoted values do not split. Items that do not parse are
/// dropped.
pub fn parse_items(text: &str) -> Vec<Attribute> {
    split_items(text).into_iter().filter_map(parse_item).collect()
}

/// Parse a single `Name <op> value` item.
///
/// The value may be double-quoted (with `\"` and `\\` escapes) or bare.
pub fn parse_item(text: &str) -> Option<Attribute> {
    let text = text.trim();

    let name_end = text.find(|c: char| !is_name_char(c)).unwrap_or(text.len());
    if name_end == 0 {
        return None;
    }
    let (name, rest) = text.split_at(name_end);

    let rest = rest.trim_start();
    let op_end = rest
        .find(|c: char| !is_operator_char(c))
        .unwrap_or(rest.len());
    if op_end == 0 {
        return None;
    }

    let value = parse_value(rest[op_end..].trim())?;
    Some(Attribute::new(name, value))
}

fn block_end<S: AsRef<str>>(lines: &[S], from: usize) -> usize {
    let mut end = from;
    while end < lines.len() && classify(lines[end].as_ref()) == LineKind::Continuation {
        end += 1;
    }
    end
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
}

fn is_operator_char(c: char) -> bool {
    matches!(c, ':' | '=' | '+' | '!' | '<' | '>' | '~' | '*')
}

fn parse_value(raw: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }

    let Some(quoted) = raw.strip_prefix('"') else {
        return Some(raw.to_string());
    };

    let mut out = String::with_capacity(quoted.len());
    let mut chars = quoted.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '"' => return Some(out),
            '\\' => match chars.next() {
                Some('"') => out.push('"'),
                Some('\\') => out.push('\\'),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => return None,
            },
            _ => out.push(ch),
        }
    }

    // unterminated quote
    None
}

fn split_items(text: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut in_quotes = false;
    let mut escaped = false;
    let mut start = 0;

    for (i, ch) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                items.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    items.push(&text[start..]);

    items.into_iter().filter(|s| !s.trim().is_empty()).collect()
}
