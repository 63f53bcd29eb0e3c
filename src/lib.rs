//! radkeep - a flat-file RADIUS user store.
//!
//! Reads, edits, and atomically rewrites a FreeRADIUS `authorize` file
//! while tolerating concurrent callers and hand edits.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── users         # add / reset / status / list / rm
//! │   ├── sanitize      # Clean up the file in place
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── config        # config.toml + environment overrides
//!     ├── credentials   # Secret generation and NT hashing
//!     ├── domain/       # Record and Credentials types
//!     ├── format/       # Line classification, parser, sanitizer, renderer
//!     ├── mask          # Masking of secrets in diagnostics
//!     ├── store/        # RecordStore and the atomic file writer
//!     └── validation    # Username rules
//! ```
//!
//! # Features
//!
//! - Lenient parsing of hand-edited files
//! - Self-healing: orphaned attribute lines and blank-line runs are removed
//! - Crash-safe rewrites through a temporary file and rename
//! - One lock per store serializing all in-process callers

pub mod cli;
pub mod core;
pub mod error;

pub use crate::core::domain::{Credentials, Record};
pub use crate::core::store::{RecordStore, StoreOptions};
