//! Flat record store with label-index queries and copy-on-write mutation.
//!
//! Lookups treat the store as an ordered sequence: by-label and by-type
//! queries take the first match in store order. Duplicate labels are
//! rejected when the store is built, so in practice the first match is
//! the only match.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace};

use super::record::Record;
use crate::error::{McfgError, Result};

/// Ordered collection of configuration records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from records, rejecting duplicate labels.
    pub fn from_records(records: Vec<Record>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for record in &records {
            if !seen.insert(record.label.as_str()) {
                return Err(McfgError::DuplicateLabel {
                    label: record.label.clone(),
                });
            }
        }
        Ok(Self { records })
    }

    /// Borrow the raw record sequence.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Consume the store, yielding the raw record sequence.
    #[must_use]
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Check whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    // === Label index queries ===

    /// All distinct record types in the store.
    #[must_use]
    pub fn kinds(&self) -> BTreeSet<String> {
        self.records.iter().map(|r| r.kind.clone()).collect()
    }

    /// All labels whose record has the given type.
    #[must_use]
    pub fn labels_of_kind(&self, kind: &str) -> BTreeSet<String> {
        self.records
            .iter()
            .filter(|r| r.kind == kind)
            .map(|r| r.label.clone())
            .collect()
    }

    /// First record with the given label, in store order.
    #[must_use]
    pub fn find_by_label(&self, label: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.label == label)
    }

    /// First record with the given type, in store order.
    #[must_use]
    pub fn find_by_kind(&self, kind: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.kind == kind)
    }

    /// Property value of the record with the given label.
    pub fn property_value(&self, label: &str, key: &str) -> Result<&Value> {
        let record = self.find_by_label(label).ok_or_else(|| McfgError::LabelNotFound {
            label: label.to_string(),
        })?;
        record.property.get(key).ok_or_else(|| McfgError::MissingKey {
            label: label.to_string(),
            key: key.to_string(),
        })
    }

    /// Property value under `key` for every record of the given type, in
    /// store order. Fails if any matching record lacks `key`.
    pub fn properties_of_kind(&self, kind: &str, key: &str) -> Result<Vec<&Value>> {
        self.records
            .iter()
            .filter(|r| r.kind == kind)
            .map(|r| {
                r.property.get(key).ok_or_else(|| McfgError::MissingKey {
                    label: r.label.clone(),
                    key: key.to_string(),
                })
            })
            .collect()
    }

    /// Two-level lookup `property[key1][key2]` on the record with the given
    /// label. Fails if `key1` is absent, is not a mapping, or lacks `key2`.
    pub fn nested_property_value(&self, label: &str, key1: &str, key2: &str) -> Result<&Value> {
        let outer = self.property_value(label, key1)?;
        outer
            .as_object()
            .and_then(|map| map.get(key2))
            .ok_or_else(|| McfgError::MissingKey {
                label: label.to_string(),
                key: format!("{key1}.{key2}"),
            })
    }

    // === Mutation ===

    /// Overwrite `property[key]` on the record with the given label.
    ///
    /// The record collection is rebuilt wholesale (copy-on-write). A missing
    /// label or a missing key is a silent no-op: mutation never grows a
    /// record's schema. Returns whether a record was modified.
    pub fn set_property_value(&mut self, label: &str, key: &str, value: Value) -> bool {
        let target = self
            .records
            .iter()
            .position(|r| r.label == label && r.property.contains_key(key));

        let Some(index) = target else {
            debug!(label = %label, key = %key, "Property update skipped: no matching record/key");
            return false;
        };

        trace!(label = %label, key = %key, "Updating property");
        let rebuilt: Vec<Record> = self
            .records
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let mut record = record.clone();
                if i == index {
                    record.property.insert(key.to_string(), value.clone());
                }
                record
            })
            .collect();
        self.records = rebuilt;
        true
    }

    /// Overwrite `property[key1][key2]` on the record with the given label.
    ///
    /// Same silent no-op policy as [`set_property_value`]: nothing happens
    /// unless the label, `key1`, and `key2` all already exist.
    ///
    /// [`set_property_value`]: Self::set_property_value
    pub fn set_nested_property_value(
        &mut self,
        label: &str,
        key1: &str,
        key2: &str,
        value: Value,
    ) -> bool {
        let target = self.records.iter().position(|r| {
            r.label == label
                && r.property
                    .get(key1)
                    .and_then(Value::as_object)
                    .is_some_and(|inner| inner.contains_key(key2))
        });

        let Some(index) = target else {
            debug!(
                label = %label,
                key1 = %key1,
                key2 = %key2,
                "Nested property update skipped: no matching record/key"
            );
            return false;
        };

        trace!(label = %label, key1 = %key1, key2 = %key2, "Updating nested property");
        let rebuilt: Vec<Record> = self
            .records
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let mut record = record.clone();
                if i == index {
                    if let Some(inner) = record.property.get_mut(key1).and_then(Value::as_object_mut)
                    {
                        inner.insert(key2.to_string(), value.clone());
                    }
                }
                record
            })
            .collect();
        self.records = rebuilt;
        true
    }

    /// Replace the property mapping of the record with the given label.
    ///
    /// Silent no-op if no record carries the label (does not insert one).
    /// Returns whether a record was modified.
    pub fn replace_properties(&mut self, label: &str, properties: serde_json::Map<String, Value>) -> bool {
        let Some(index) = self.records.iter().position(|r| r.label == label) else {
            debug!(label = %label, "Property replacement skipped: label not found");
            return false;
        };

        let rebuilt: Vec<Record> = self
            .records
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let mut record = record.clone();
                if i == index {
                    record.property = properties.clone();
                }
                record
            })
            .collect();
        self.records = rebuilt;
        true
    }

    // === Persistence ===

    /// Read a store from a JSON file of records.
    pub fn read_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(McfgError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let contents = fs::read_to_string(path)?;
        let records: Vec<Record> = serde_json::from_str(&contents).map_err(|e| {
            McfgError::ConfigParse(format!("{}: {e}", path.display()))
        })?;

        debug!(path = %path.display(), records = records.len(), "Loaded record store");
        Self::from_records(records)
    }

    /// Write the store to a JSON file with 4-space indentation.
    ///
    /// The file is written to a temporary sibling and atomically renamed
    /// into place, so a failed write never truncates an existing config.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.records
            .serialize(&mut ser)
            .map_err(|e| McfgError::ConfigParse(e.to_string()))?;
        buf.push(b'\n');

        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = std::path::PathBuf::from(tmp);

        fs::write(&tmp, &buf)?;
        fs::rename(&tmp, path)?;
        debug!(path = %path.display(), records = self.records.len(), "Wrote record store");
        Ok(())
    }
}
