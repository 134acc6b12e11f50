//! Flattening of the selector indirection chain into a working configuration.
//!
//! The selector record (type "default") holds `(key, label)` pairs naming a
//! machine, a head, and a material. Resolution walks the selector's property
//! keys in order, pulls each referenced record's property mapping, and merges
//! everything into one flat mapping.
//!
//! Known hazard: colliding keys shadow silently, later entries winning. A
//! machine and a material that both define `max_feed` resolve to whichever
//! the selector names last.

use serde_json::{Map, Value};
use tracing::trace;

use super::record::KIND_DEFAULT;
use super::store::RecordStore;
use crate::error::{McfgError, Result};

/// The flattened, merged mapping produced by resolving a selector record.
pub type WorkingConfig = Map<String, Value>;

/// Resolve the selector record of the given type into a flat mapping.
///
/// Fails atomically: a missing selector, a dangling label reference, or a
/// non-label selector value yields an error and no partial result.
pub fn resolve(store: &RecordStore, selector_kind: &str) -> Result<WorkingConfig> {
    let selector = store
        .find_by_kind(selector_kind)
        .ok_or_else(|| McfgError::KindNotFound {
            kind: selector_kind.to_string(),
        })?;

    let mut merged = WorkingConfig::new();
    for (key, value) in &selector.property {
        let label = value.as_str().ok_or_else(|| McfgError::SelectorNotALabel {
            key: key.clone(),
        })?;

        let mut found = false;
        for record in store.records().iter().filter(|r| r.label == label) {
            found = true;
            trace!(key = %key, label = %label, "Merging referenced record");
            for (k, v) in &record.property {
                merged.insert(k.clone(), v.clone());
            }
        }
        if !found {
            return Err(McfgError::LabelNotFound {
                label: label.to_string(),
            });
        }
    }

    Ok(merged)
}

/// Resolve using the standard "default" selector type.
pub fn resolve_default(store: &RecordStore) -> Result<WorkingConfig> {
    resolve(store, KIND_DEFAULT)
}
