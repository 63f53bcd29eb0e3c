//! The authorize file format.
//!
//! The file is a sequence of lines. Structure is positional: a record is a
//! header line at column 0 followed by indented continuation lines, up to
//! the next non-indented line or end of file.
//!
//! ```text
//! # User added: 2024-05-01 09:30:00
//! alice	NT-Password := "8846F7EAEE8FB117AD06BDD830B7586C"
//! 	Reply-Message := "Welcome alice"
//!
//! ```
//!
//! Parsing is lenient. The file is edited by hand, so lines that do not
//! look like records are skipped instead of rejected.

mod parser;
mod render;
mod sanitize;

pub use parser::{find_blocks, history_start, parse_all, parse_item, parse_items, parse_one};
pub use render::{render_lines, render_record};
pub use sanitize::sanitize;

/// Structural role of a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Empty, or whitespace-only without leading tab or space
    Blank,
    /// Starts with `#` at column 0
    Comment,
    /// Non-blank, non-comment, column 0
    Header,
    /// Starts with a tab or space, even if nothing else follows
    Continuation,
}

/// Classify a line. Line terminators must already be stripped.
///
/// Indentation is checked first: a whitespace-only indented line inside a
/// block belongs to that block and does not end it.
pub fn classify(line: &str) -> LineKind {
    if line.starts_with('\t') || line.starts_with(' ') {
        LineKind::Continuation
    } else if line.trim().is_empty() {
        LineKind::Blank
    } else if line.starts_with('#') {
        LineKind::Comment
    } else {
        LineKind::Header
    }
}
