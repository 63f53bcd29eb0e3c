//! Error types for radkeep.
//!
//! Errors are grouped by domain and folded into a single [`Error`] at the
//! crate boundary.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

impl Error {
    /// Whether this error is a lookup miss.
    ///
    /// Lookup misses are ordinary control flow for callers, not failures.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Store(StoreError::NotFound(_)))
    }
}

/// Errors raised by the record store and its file I/O.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("user not found: {0}")]
    NotFound(String),

    #[error("user already exists: {0}")]
    DuplicateUser(String),

    #[error("failed to write {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while issuing credentials.
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("no MD4 digest implementation available (build with the `nt-hash` feature)")]
    HashBackendUnavailable,

    #[error("secret length {length} is below the minimum of {minimum}")]
    SecretTooShort { length: usize, minimum: usize },
}

/// Input validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("username cannot be empty")]
    EmptyUsername,

    #[error("invalid username '{username}': {reason}")]
    InvalidUsername { username: String, reason: String },

    #[error("secret cannot be empty")]
    EmptySecret,

    #[error("invalid NT hash: {0}")]
    InvalidHash(String),

    #[error("invalid value for {name}: {reason}")]
    InvalidValue { name: String, reason: String },
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("no authorize file configured")]
    MissingFile,
}

pub type Result<T> = std::result::Result<T, Error>;
