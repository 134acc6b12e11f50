//! The labeled, typed record that makes up the profile store.
//!
//! A store is a flat sequence of records. Each record has a `label` (unique
//! within the store), a `type` tag ("default", "machine", "head", "material",
//! "ColorTable", or anything else a future tool writes), and a free-form
//! `property` mapping. Records of unknown type survive a load/save cycle
//! untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Record type tag of the selector record.
pub const KIND_DEFAULT: &str = "default";

/// Label (and type tag) of the color table record.
pub const COLOR_TABLE_LABEL: &str = "ColorTable";

/// One entry in the profile store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Unique name of this record within the store.
    pub label: String,

    /// Category tag determining the expected shape of `property`.
    #[serde(rename = "type")]
    pub kind: String,

    /// Key/value payload. For "default" records the values are labels of
    /// other records; for "ColorTable" they are nested {power, feed, color}
    /// mappings; otherwise scalars.
    pub property: Map<String, Value>,
}

impl Record {
    /// Create a record from a label, a type tag, and `(key, value)` pairs.
    pub fn new<I, K>(label: &str, kind: &str, properties: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            label: label.to_string(),
            kind: kind.to_string(),
            property: properties.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// The built-in example store: one selector, two machines, two heads, and
/// three materials, using mm and minutes throughout.
///
/// Written by `mcfg init` as a starting point for a new installation and
/// used by tests as a realistic fixture.
pub fn sample_records() -> Vec<Record> {
    use serde_json::json;

    vec![
        Record::new(
            "default",
            KIND_DEFAULT,
            [
                ("machine", json!("Creality-Falcon2")),
                ("head", json!("LED-40")),
                ("material", json!("3mm_ply_LED-40")),
            ],
        ),
        Record::new(
            "Creality-Falcon2",
            "machine",
            [
                ("max_feed", json!(25000)), // mm/min
                ("max_width", json!(400)),  // mm
                ("max_len", json!(415)),    // mm
                ("has_camera", json!(false)),
            ],
        ),
        Record::new(
            "XTool-S1",
            "machine",
            [
                ("max_feed", json!(36000)),
                ("max_width", json!(319)),
                ("max_len", json!(498)),
                ("has_camera", json!(false)),
            ],
        ),
        // Heads are independent of any one machine
        Record::new(
            "LED-40",
            "head",
            [
                ("max_power", json!(40.0)), // W
                ("wavelength", json!(455)), // nm
                ("has_air", json!(true)),
                ("kerf", json!(0.075)),
            ],
        ),
        Record::new(
            "LED-20",
            "head",
            [
                ("max_power", json!(240.0)),
                ("wavelength", json!(455)),
                ("has_air", json!(true)),
                ("kerf", json!(0.075)),
            ],
        ),
        // Materials depend on the head characteristics
        Record::new(
            "3mm_ply_LED-40",
            "material",
            [
                ("thickness", json!(3.0)),      // mm
                ("cut_power", json!(40.0)),     // W
                ("cut_feed", json!(400)),       // mm/min
                ("engrave_power", json!(30.0)), // W
                ("engrave_feed", json!(6000)),  // mm/min
            ],
        ),
        Record::new(
            "0.25in_ply_LED-40",
            "material",
            [
                ("thickness", json!(6.35)),
                ("cut_power", json!(40.0)),
                ("cut_feed", json!(200)),
                ("engrave_power", json!(30.0)),
                ("engrave_feed", json!(6000)),
            ],
        ),
        Record::new(
            "0.75in_pine_LED-40",
            "material",
            [
                ("thickness", json!(19.05)),
                ("cut_power", json!(40.0)),
                ("cut_feed", json!(15)),
                ("engrave_power", json!(30.0)),
                ("engrave_feed", json!(6000)),
            ],
        ),
    ]
}
