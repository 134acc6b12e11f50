//! Layered machine/head/material profile configuration.
//!
//! Owns the record store loaded from disk plus the cached working
//! configuration derived from it. The working configuration is an explicit
//! cache: mutating records does NOT refresh it, callers invalidate and
//! re-resolve when they need current values.

mod color_table;
mod path;
mod record;
mod resolver;
mod store;

pub use color_table::{default_color_table, synthesize_color};
pub use path::{home_dir, resolve_config_path, APP_DIR, DEFAULT_CONFIG_NAME};
pub use record::{sample_records, Record, COLOR_TABLE_LABEL, KIND_DEFAULT};
pub use resolver::{resolve, resolve_default, WorkingConfig};
pub use store::RecordStore;

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::Result;

/// A machine configuration: the record store, the file it came from, and
/// the cached working configuration.
#[derive(Debug, Clone)]
pub struct MachineConfig {
    path: PathBuf,
    store: RecordStore,
    working: Option<WorkingConfig>,
}

impl MachineConfig {
    /// Create an empty configuration that will persist to `path`.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            store: RecordStore::new(),
            working: None,
        }
    }

    /// Open the configuration file for `name` (resolved per
    /// [`resolve_config_path`]).
    pub fn open(name: &str) -> Result<Self> {
        let path = resolve_config_path(name)?;
        let store = RecordStore::read_from(&path)?;
        info!(path = %path.display(), records = store.len(), "Opened machine configuration");
        Ok(Self {
            path,
            store,
            working: None,
        })
    }

    /// Open the configuration for `name`, falling back to an empty store.
    ///
    /// A load failure is reported, not propagated: the caller gets a
    /// working instance pointed at the resolved path so a later `save`
    /// creates the file.
    #[must_use]
    pub fn open_or_default(name: &str) -> Self {
        match Self::open(name) {
            Ok(config) => config,
            Err(e) => {
                warn!(name = %name, error = %e, "Could not load configuration, starting empty");
                let path = resolve_config_path(name).unwrap_or_else(|_| PathBuf::from(name));
                Self::new(path)
            }
        }
    }

    /// The file this configuration persists to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Borrow the record store.
    #[must_use]
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Mutably borrow the record store.
    ///
    /// Mutations do not touch the cached working configuration; call
    /// [`invalidate_working`] before the next resolve if current values
    /// are needed.
    ///
    /// [`invalidate_working`]: Self::invalidate_working
    pub fn store_mut(&mut self) -> &mut RecordStore {
        &mut self.store
    }

    /// Replace the record collection wholesale.
    ///
    /// Duplicate labels are rejected. The working-configuration cache is
    /// left as-is, matching the explicit-invalidation model.
    pub fn replace_records(&mut self, records: Vec<Record>) -> Result<()> {
        self.store = RecordStore::from_records(records)?;
        Ok(())
    }

    /// The flattened working configuration for the "default" selector.
    ///
    /// Resolved once and cached; subsequent calls return the cached value
    /// even if records changed in between.
    pub fn working_config(&mut self) -> Result<&WorkingConfig> {
        if self.working.is_none() {
            self.working = Some(resolve_default(&self.store)?);
        }
        Ok(self.working.as_ref().expect("resolved just above"))
    }

    /// Resolve a non-standard selector type, bypassing the cache.
    pub fn resolve_selector(&self, selector_kind: &str) -> Result<WorkingConfig> {
        resolve(&self.store, selector_kind)
    }

    /// Drop the cached working configuration so the next access
    /// re-resolves against current records.
    pub fn invalidate_working(&mut self) {
        self.working = None;
    }

    /// Persist the record store back to its file.
    pub fn save(&self) -> Result<()> {
        self.store.write_to(&self.path)
    }
}
