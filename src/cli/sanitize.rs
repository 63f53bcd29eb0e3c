//! Sanitize command - clean up the authorize file in place.

use tracing::info;

use crate::cli::{output, Context};
use crate::error::Result;

/// Rewrite the file if it contains orphaned attribute lines or blank runs.
pub fn execute(ctx: &Context) -> Result<()> {
    info!("Sanitizing {}", ctx.store.path().display());

    if ctx.store.sanitize_file()? {
        output::success(&format!("sanitized {}", ctx.store.path().display()));
    } else {
        output::dimmed("already clean");
    }
    Ok(())
}
