//! Test fixture helpers for creating temporary configuration files.
//!
//! Provides utilities for generating temporary directories holding record
//! stores that are automatically cleaned up.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use mcfg::config::{default_color_table, sample_records, Record, RecordStore};

/// A configuration file in a temporary directory with automatic cleanup.
pub struct TestConfig {
    /// The temporary directory holding the file.
    pub dir: TempDir,
    /// Full path to the written configuration file.
    pub path: PathBuf,
}

impl TestConfig {
    /// Write the given records to `machine.json` in a fresh temp directory.
    ///
    /// # Panics
    ///
    /// Panics if the store is invalid or the write fails.
    #[must_use]
    pub fn write(records: Vec<Record>) -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let path = dir.path().join("machine.json");

        let store = RecordStore::from_records(records).expect("Invalid fixture records");
        store.write_to(&path).expect("Failed to write fixture config");

        Self { dir, path }
    }

    /// The built-in sample store: machines, heads, materials, and selector.
    #[must_use]
    pub fn sample() -> Self {
        Self::write(sample_records())
    }

    /// The sample store plus the default color table.
    #[must_use]
    pub fn sample_with_color_table() -> Self {
        let mut records = sample_records();
        records.push(default_color_table());
        Self::write(records)
    }

    /// Path of the config file as a `&str` for CLI-style APIs.
    ///
    /// # Panics
    ///
    /// Panics if the temp path is not valid UTF-8.
    #[must_use]
    pub fn path_str(&self) -> &str {
        self.path.to_str().expect("temp path should be UTF-8")
    }

    /// The directory the config lives in.
    #[must_use]
    pub fn dir_path(&self) -> &Path {
        self.dir.path()
    }
}
