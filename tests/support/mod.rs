//! Test support utilities for radkeep integration tests.
//!
//! Provides an isolated authorize file and home directory per test.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::path::{Path, PathBuf};

use radkeep::RecordStore;
use tempfile::TempDir;

/// Test environment with isolated temp directories.
///
/// Child processes get the authorize path through `RADKEEP_FILE` and a
/// private `HOME`, so tests can safely run in parallel.
pub struct Test {
    /// Directory holding the authorize file
    pub dir: TempDir,
    /// Temporary home directory
    pub home: TempDir,
}

impl Test {
    /// Create a new environment with no authorize file yet.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");

        Self { dir, home }
    }

    /// Create an environment whose authorize file holds `content`.
    pub fn with_file(content: &str) -> Self {
        let t = Self::new();
        t.write_file(content);
        t
    }

    /// Path of the authorize file.
    pub fn file(&self) -> PathBuf {
        self.dir.path().join("authorize")
    }

    /// Overwrite the authorize file.
    pub fn write_file(&self, content: &str) {
        std::fs::write(self.file(), content).expect("failed to write authorize file");
    }

    /// Current authorize file contents.
    pub fn read_file(&self) -> String {
        std::fs::read_to_string(self.file()).expect("failed to read authorize file")
    }

    /// Open the store in-process.
    pub fn store(&self) -> RecordStore {
        RecordStore::open(self.file()).expect("failed to open store")
    }

    /// Names of every file in the authorize directory.
    pub fn dir_entries(&self) -> Vec<String> {
        entries(self.dir.path())
    }
}

fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("failed to list dir")
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
