//! Filesystem access for the authorize file.
//!
//! Reads tolerate a missing file. Writes go through a sibling temporary
//! file and a rename so readers never see partial content.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, error, info, warn};

use crate::core::format::render_lines;
use crate::error::{Result, StoreError};

/// How a write reached the disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Temporary file renamed over the target. Crash-safe.
    Atomic,
    /// Target overwritten in place after the rename was refused as busy
    /// (bind-mounted files, some container volumes). Not crash-safe.
    Direct,
}

/// Read the file as lines without terminators.
///
/// A missing file reads as empty.
///
/// # Errors
///
/// Returns `StoreError::Read` for any other I/O failure.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    match fs::read_to_string(path) {
        Ok(contents) => {
            let lines: Vec<String> = contents.lines().map(str::to_string).collect();
            debug!(
                path = %path.display(),
                lines = lines.len(),
                bytes = contents.len(),
                "read authorize"
            );
            Ok(lines)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "authorize not found, treating as empty");
            Ok(Vec::new())
        }
        Err(source) => Err(StoreError::Read {
            path: path.to_path_buf(),
            source,
        }
        .into()),
    }
}

/// Replace the file's content with `lines`.
///
/// Runs [`stage_lines`] and then renames the staged file over `path`. If
/// the rename fails because the target is busy, the staged content is
/// copied over the target directly and the temporary file is discarded;
/// the returned [`WriteMode`] tells the two apart. On any other failure the
/// target is left untouched.
///
/// # Errors
///
/// Returns `StoreError::Persistence` if the content cannot be written.
pub fn write_lines<S: AsRef<str>>(path: &Path, lines: &[S]) -> Result<WriteMode> {
    let staged = stage_lines(path, lines)?;
    commit(path, staged)
}

/// Write `lines` to a synced temporary file beside `path`.
///
/// The target itself is not touched. Dropping the returned file removes
/// it; [`write_lines`] renames it into place.
///
/// # Errors
///
/// Returns `StoreError::Persistence` if the temporary file cannot be
/// created or written.
pub fn stage_lines<S: AsRef<str>>(path: &Path, lines: &[S]) -> Result<NamedTempFile> {
    let content = render_lines(lines);

    let mut tmp = temp_sibling(path).map_err(|source| persistence(path, source))?;
    write_temp(&mut tmp, path, content.as_bytes()).map_err(|source| persistence(path, source))?;
    debug!(
        temp = %tmp.path().display(),
        lines = lines.len(),
        size_bytes = content.len(),
        "staged authorize"
    );
    Ok(tmp)
}

fn commit(path: &Path, staged: NamedTempFile) -> Result<WriteMode> {
    match staged.persist(path) {
        Ok(_) => {
            info!(path = %path.display(), "authorize updated atomically");
            Ok(WriteMode::Atomic)
        }
        Err(e) if e.error.kind() == io::ErrorKind::ResourceBusy => {
            warn!(
                path = %path.display(),
                "atomic replace refused (busy), falling back to direct write"
            );
            // the temporary file is removed when `e.file` drops
            fs::copy(e.file.path(), path).map_err(|source| {
                error!(path = %path.display(), error = %source, "direct write failed");
                persistence(path, source)
            })?;
            warn!(path = %path.display(), "authorize updated by direct write");
            Ok(WriteMode::Direct)
        }
        Err(e) => {
            error!(path = %path.display(), error = %e.error, "failed to write authorize");
            Err(persistence(path, e.error).into())
        }
    }
}

fn persistence(path: &Path, source: io::Error) -> StoreError {
    StoreError::Persistence {
        path: path.to_path_buf(),
        source,
    }
}

fn temp_sibling(path: &Path) -> io::Result<NamedTempFile> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "authorize".to_string());

    tempfile::Builder::new()
        .prefix(&format!(".{}.", name))
        .suffix(".tmp")
        .tempfile_in(dir)
}

fn write_temp(tmp: &mut NamedTempFile, target: &Path, content: &[u8]) -> io::Result<()> {
    tmp.write_all(content)?;
    tmp.flush()?;

    // keep the target's mode so the RADIUS daemon can still read it
    if let Ok(meta) = fs::metadata(target) {
        fs::set_permissions(tmp.path(), meta.permissions())?;
    }

    tmp.as_file().sync_all()
}
