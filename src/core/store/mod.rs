//! The record store.
//!
//! [`RecordStore`] owns the path to one authorize file and is the only
//! sanctioned way to change it. Every public operation:
//!
//! 1. takes the store's lock (once, at the API boundary),
//! 2. re-reads the file from disk,
//! 3. for mutations, sanitizes, splices, sanitizes again, and writes the
//!    result back atomically,
//! 4. releases the lock.
//!
//! Nothing is cached between calls, so the file on disk is always the
//! source of truth. The lock serializes callers inside this process only;
//! a second process writing the same file is protected from torn reads by
//! the atomic rename but not from logical races.
//!
//! ## Example
//!
//! ```no_run
//! use radkeep::core::store::RecordStore;
//!
//! let store = RecordStore::open("/etc/freeradius/mods-config/files/authorize")?;
//! let creds = store.add("user_U123", None, None)?;
//! println!("password: {}", creds.secret().unwrap_or_default());
//! assert!(store.delete("user_U123")?);
//! # Ok::<(), radkeep::error::Error>(())
//! ```

mod fs;

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::core::constants::{
    DEFAULT_REPLY_MESSAGE, DEFAULT_SECRET_LENGTH, HASH_MASK_KEEP, NT_PASSWORD, REPLY_MESSAGE,
    TIMESTAMP_FORMAT,
};
use crate::core::credentials::{CredentialSource, NtCredentials};
use crate::core::domain::{Credentials, Record};
use crate::core::format::{find_blocks, history_start, parse_all, render_record, sanitize};
use crate::core::mask::mask_secret;
use crate::core::validation::{normalize_nt_hash, validate_username};
use crate::error::{Result, StoreError};

pub use fs::{read_lines, stage_lines, write_lines, WriteMode};

/// Tunables for a [`RecordStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    /// Length of generated secrets
    pub secret_length: usize,
    /// `Reply-Message` template for new blocks; `{username}` is substituted.
    /// `None` writes no reply message.
    pub reply_message: Option<String>,
    /// Log secret and hash values unmasked
    pub reveal_secrets: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            secret_length: DEFAULT_SECRET_LENGTH,
            reply_message: Some(DEFAULT_REPLY_MESSAGE.to_string()),
            reveal_secrets: false,
        }
    }
}

/// Flat-file user store.
///
/// Safe to share between threads (`&RecordStore` or `Arc<RecordStore>`).
pub struct RecordStore {
    path: PathBuf,
    options: StoreOptions,
    credentials: Box<dyn CredentialSource>,
    lock: Mutex<()>,
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("path", &self.path)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl RecordStore {
    // --- Construction ---

    /// Open a store over `path` with default options.
    ///
    /// The file does not need to exist yet.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::HashBackendUnavailable` if this build
    /// cannot compute NT hashes.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Self::with_options(path, StoreOptions::default())
    }

    /// Open a store with explicit options.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::HashBackendUnavailable` if this build
    /// cannot compute NT hashes.
    pub fn with_options(path: impl Into<PathBuf>, options: StoreOptions) -> Result<Self> {
        let source = NtCredentials::new(options.reveal_secrets);
        Self::with_source(path, options, Box::new(source))
    }

    /// Open a store that issues credentials from `source`.
    ///
    /// # Errors
    ///
    /// Returns whatever `source.ensure_available()` reports.
    pub fn with_source(
        path: impl Into<PathBuf>,
        options: StoreOptions,
        source: Box<dyn CredentialSource>,
    ) -> Result<Self> {
        source.ensure_available()?;

        let path = path.into();
        debug!(path = %path.display(), exists = path.exists(), "record store opened");

        Ok(Self {
            path,
            options,
            credentials: source,
            lock: Mutex::new(()),
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Options this store was opened with
    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    // --- Reads ---

    /// Look up a user.
    ///
    /// Returns the first parsable block for `username`, or `None`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Read` if the file exists but cannot be read.
    pub fn get(&self, username: &str) -> Result<Option<Record>> {
        let _guard = self.lock.lock();

        let lines = read_lines(&self.path)?;
        let found = find_record(&lines, username);

        if found.is_some() {
            debug!(user = %username, "user found");
        } else {
            debug!(user = %username, "user not found");
        }
        Ok(found)
    }

    /// All parsable records, in file order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Read` if the file exists but cannot be read.
    pub fn list(&self) -> Result<Vec<Record>> {
        let _guard = self.lock.lock();

        let lines = read_lines(&self.path)?;
        let records = parse_all(&lines);
        debug!(count = records.len(), "listed users");
        Ok(records)
    }

    // --- Mutations ---

    /// Add a user.
    ///
    /// - no secret, no hash: a secret is generated and hashed
    /// - secret only: the secret is hashed
    /// - hash only: the hash is stored as given and no secret is returned
    /// - both: stored as given
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DuplicateUser` if the user already exists,
    /// `ValidationError` for a bad username, a supplied hash that is not 32
    /// hex digits, or a reply message with control characters, and
    /// `StoreError::Persistence` if the file cannot be written.
    pub fn add(
        &self,
        username: &str,
        secret: Option<&str>,
        hash: Option<&str>,
    ) -> Result<Credentials> {
        validate_username(username)?;
        let _guard = self.lock.lock();

        let mut lines = sanitize(&read_lines(&self.path)?);
        if find_record(&lines, username).is_some() {
            return Err(StoreError::DuplicateUser(username.to_string()).into());
        }

        let credentials = match (secret, hash) {
            (None, None) => self.credentials.generate(self.options.secret_length)?,
            (Some(secret), None) => self.credentials.derive(secret)?,
            (Some(secret), Some(hash)) => {
                Credentials::new(secret.to_string(), normalize_nt_hash(hash)?)
            }
            (None, Some(hash)) => Credentials::hash_only(normalize_nt_hash(hash)?),
        };

        let comment = format!("# User added: {}", timestamp());
        append_block(&mut lines, comment, &self.block_for(username, credentials.hash()))?;
        let mode = write_lines(&self.path, &sanitize(&lines))?;

        info!(
            user = %username,
            hash = %mask_secret(credentials.hash(), HASH_MASK_KEEP, self.options.reveal_secrets),
            mode = ?mode,
            "user added"
        );
        Ok(credentials)
    }

    /// Replace a user's secret.
    ///
    /// Every existing block for the user, with the comment and blank lines
    /// directly above it, is removed and one fresh block is appended.
    /// A new secret is generated unless one is supplied.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the user does not exist and
    /// `StoreError::Persistence` if the file cannot be written.
    pub fn update_secret(&self, username: &str, secret: Option<&str>) -> Result<Credentials> {
        let _guard = self.lock.lock();
        info!(user = %username, "update_secret");

        let mut lines = sanitize(&read_lines(&self.path)?);
        if find_record(&lines, username).is_none() {
            debug!(user = %username, "user not found");
            return Err(StoreError::NotFound(username.to_string()).into());
        }

        let credentials = match secret {
            Some(secret) => self.credentials.derive(secret)?,
            None => self.credentials.generate(self.options.secret_length)?,
        };

        let removed = remove_blocks(&mut lines, username);
        debug!(user = %username, blocks = removed, "removed existing blocks");

        let comment = format!("# Password updated: {}", timestamp());
        append_block(&mut lines, comment, &self.block_for(username, credentials.hash()))?;
        let mode = write_lines(&self.path, &sanitize(&lines))?;

        info!(
            user = %username,
            mode = ?mode,
            "password updated"
        );
        Ok(credentials)
    }

    /// Remove every block for a user.
    ///
    /// Returns `false`, without touching the file, if there is none.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Persistence` if the file cannot be written.
    pub fn delete(&self, username: &str) -> Result<bool> {
        let _guard = self.lock.lock();
        info!(user = %username, "delete_user");

        let mut lines = sanitize(&read_lines(&self.path)?);
        let removed = remove_blocks(&mut lines, username);
        if removed == 0 {
            debug!(user = %username, "no blocks found");
            return Ok(false);
        }

        let mode = write_lines(&self.path, &sanitize(&lines))?;
        info!(
            user = %username,
            blocks = removed,
            mode = ?mode,
            "user deleted"
        );
        Ok(true)
    }

    /// Sanitize the file in place.
    ///
    /// Returns `true` if the file changed and was rewritten.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Persistence` if the file cannot be written.
    pub fn sanitize_file(&self) -> Result<bool> {
        let _guard = self.lock.lock();

        let lines = read_lines(&self.path)?;
        let sanitized = sanitize(&lines);
        if sanitized == lines {
            debug!(path = %self.path.display(), "authorize already clean");
            return Ok(false);
        }

        warn!(
            path = %self.path.display(),
            dropped = lines.len() - sanitized.len(),
            "sanitize detected junk, rewriting file"
        );
        write_lines(&self.path, &sanitized)?;
        Ok(true)
    }

    fn block_for(&self, username: &str, hash: &str) -> Record {
        let record = Record::new(username, 0..0).with_attribute(NT_PASSWORD, hash);
        match &self.options.reply_message {
            Some(template) => {
                record.with_attribute(REPLY_MESSAGE, &template.replace("{username}", username))
            }
            None => record,
        }
    }
}

fn find_record(lines: &[String], username: &str) -> Option<Record> {
    parse_all(lines)
        .into_iter()
        .find(|r| r.username() == username)
}

/// Drop every block for `username` together with its history lines.
fn remove_blocks(lines: &mut Vec<String>, username: &str) -> usize {
    let blocks = find_blocks(lines, username);
    for block in blocks.iter().rev() {
        let start = history_start(lines, block.start);
        lines.drain(start..block.end);
    }
    blocks.len()
}

/// Append `record` as a new block headed by `comment`.
///
/// `lines` is left untouched if the record cannot be rendered.
fn append_block(lines: &mut Vec<String>, comment: String, record: &Record) -> Result<()> {
    let block = render_record(record)?;
    if lines.last().is_some_and(|l| !l.trim().is_empty()) {
        lines.push(String::new());
    }
    lines.push(comment);
    lines.extend(block);
    lines.push(String::new());
    Ok(())
}

fn timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}
