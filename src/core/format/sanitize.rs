//! Structural cleanup of a line sequence.

use super::{classify, LineKind};

/// Normalize `lines` in a single left-to-right pass.
///
/// - Continuation lines are kept only inside a header's block. Once a
///   blank line or comment intervenes, later indented lines are orphans
///   and are dropped.
/// - Indented whitespace-only lines follow the same rule as any other
///   continuation line.
/// - Runs of blank lines collapse to a single empty line.
/// - Every other line is kept as-is, in order.
///
/// The result is stable: sanitizing it again changes nothing.
pub fn sanitize<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len());
    let mut inside_header = false;
    let mut prev_blank = false;

    for line in lines {
        let line: &str = line.as_ref();
        match classify(line) {
            LineKind::Continuation => {
                if !inside_header {
                    continue;
                }
                out.push(line.to_string());
                prev_blank = false;
            }
            LineKind::Blank => {
                if prev_blank {
                    continue;
                }
                out.push(String::new());
                prev_blank = true;
                inside_header = false;
            }
            LineKind::Comment => {
                out.push(line.to_string());
                prev_blank = false;
                inside_header = false;
            }
            LineKind::Header => {
                out.push(line.to_string());
                prev_blank = false;
                inside_header = true;
            }
        }
    }

    out
}
