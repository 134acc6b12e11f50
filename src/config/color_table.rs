//! The color table: per-tag power/feed/color entries for cut and engrave
//! layers.
//!
//! A single distinguished record (label "ColorTable") maps short tags
//! ("L00".."L29" for line layers, "T1"/"T2" for tool layers) to
//! `{power, feed, color}` entries, where `color` is a 24-bit 0xRRGGBB
//! integer. The default table mirrors the layer palette convention used by
//! common laser-control software, so files exchanged with those tools keep
//! their layer colors.

use serde_json::{json, Map, Value};
use tracing::{debug, info};

use super::record::{Record, COLOR_TABLE_LABEL};
use super::store::RecordStore;
use crate::error::{McfgError, Result};

/// Default colors for the numbered line tags "L00".."L29".
const DEFAULT_LINE_COLORS: [u32; 30] = [
    0x00_00_00, 0x00_00_FF, 0xFF_00_00, 0x00_E0_00, 0xD0_D0_00, 0xFF_80_00,
    0x00_E0_E0, 0xFF_00_FF, 0xB4_B4_B4, 0x00_00_A0, 0xA0_00_00, 0x00_A0_00,
    0xA0_A0_00, 0xC0_80_00, 0x00_A0_FF, 0xA0_00_A0, 0x80_80_80, 0x7D_87_B9,
    0xBB_77_84, 0x4A_6F_E3, 0xD3_3F_6A, 0x8C_D7_8C, 0xF0_B9_8D, 0xF6_C4_E1,
    0xFA_9E_D4, 0x50_0A_78, 0xB4_5A_00, 0x00_47_54, 0x86_FA_88, 0xFF_DB_66,
];

/// Default colors for the tool tags "T1" and "T2".
const DEFAULT_TOOL_COLORS: [(&str, u32); 2] = [("T1", 0x40_40_40), ("T2", 0x80_80_80)];

/// Build one `{power, feed, color}` entry value.
fn entry(power: f64, feed: f64, color: u32) -> Value {
    json!({ "power": power, "feed": feed, "color": color })
}

/// The canonical color table record: 30 line tags at power 1.0 / feed 1.0
/// and two tool tags at power 0.0 / feed 0.0, each with a fixed color.
#[must_use]
pub fn default_color_table() -> Record {
    let mut property = Map::new();
    for (i, &color) in DEFAULT_LINE_COLORS.iter().enumerate() {
        property.insert(format!("L{i:02}"), entry(1.0, 1.0, color));
    }
    for (tag, color) in DEFAULT_TOOL_COLORS {
        property.insert(tag.to_string(), entry(0.0, 0.0, color));
    }
    Record {
        label: COLOR_TABLE_LABEL.to_string(),
        kind: COLOR_TABLE_LABEL.to_string(),
        property,
    }
}

/// Synthesize a packed color value from either RGB components or a
/// power/feed pair. The two encodings are mutually exclusive.
///
/// RGB components occupy bits 24/16/8; power and feed occupy bits 24/16.
/// Each supplied component is scaled by 255 and rounded. With no arguments
/// the result is 0 (black/unset).
pub fn synthesize_color(
    red: Option<f64>,
    green: Option<f64>,
    blue: Option<f64>,
    power: Option<f64>,
    feed: Option<f64>,
) -> Result<u32> {
    let rgb_given = red.is_some() || green.is_some() || blue.is_some();
    let power_feed_given = power.is_some() || feed.is_some();
    if rgb_given && power_feed_given {
        return Err(McfgError::MixedColorModes);
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn lane(component: Option<f64>, shift: u32) -> u32 {
        component.map_or(0, |c| ((255.0 * c).round() as u32) << shift)
    }

    if rgb_given {
        Ok(lane(red, 24) | lane(green, 16) | lane(blue, 8))
    } else {
        Ok(lane(power, 24) | lane(feed, 16))
    }
}

/// Color table accessors and mutators, reading and writing the "ColorTable"
/// record in place.
impl RecordStore {
    /// The `{power, feed, color}` entry for a tag.
    fn color_entry(&self, tag: &str) -> Result<&Map<String, Value>> {
        let record = self
            .find_by_label(COLOR_TABLE_LABEL)
            .ok_or_else(|| McfgError::LabelNotFound {
                label: COLOR_TABLE_LABEL.to_string(),
            })?;
        record
            .property
            .get(tag)
            .and_then(Value::as_object)
            .ok_or_else(|| McfgError::TagNotFound { tag: tag.to_string() })
    }

    fn color_field(&self, tag: &str, field: &str) -> Result<&Value> {
        self.color_entry(tag)?
            .get(field)
            .ok_or_else(|| McfgError::MissingKey {
                label: COLOR_TABLE_LABEL.to_string(),
                key: format!("{tag}.{field}"),
            })
    }

    /// Packed 0xRRGGBB color for a tag.
    pub fn color(&self, tag: &str) -> Result<u32> {
        let value = self.color_field(tag, "color")?;
        value
            .as_u64()
            .and_then(|c| u32::try_from(c).ok())
            .ok_or_else(|| McfgError::MissingKey {
                label: COLOR_TABLE_LABEL.to_string(),
                key: format!("{tag}.color"),
            })
    }

    /// Power fraction for a tag.
    pub fn power(&self, tag: &str) -> Result<f64> {
        let value = self.color_field(tag, "power")?;
        value.as_f64().ok_or_else(|| McfgError::MissingKey {
            label: COLOR_TABLE_LABEL.to_string(),
            key: format!("{tag}.power"),
        })
    }

    /// Feed fraction for a tag.
    pub fn feed(&self, tag: &str) -> Result<f64> {
        let value = self.color_field(tag, "feed")?;
        value.as_f64().ok_or_else(|| McfgError::MissingKey {
            label: COLOR_TABLE_LABEL.to_string(),
            key: format!("{tag}.feed"),
        })
    }

    /// Color for a tag as `"#"` followed by uppercase hex digits.
    ///
    /// No zero padding: callers needing fixed six-digit output must pad.
    pub fn color_hex(&self, tag: &str) -> Result<String> {
        Ok(format!("#{:X}", self.color(tag)?))
    }

    /// Overwrite the power fraction for a tag. Fails if the tag is absent;
    /// tags are never created here.
    pub fn set_power(&mut self, tag: &str, value: f64) -> Result<()> {
        self.color_entry(tag)?;
        debug!(tag = %tag, value = value, "Setting color table power");
        self.set_nested_property_value(COLOR_TABLE_LABEL, tag, "power", json!(value));
        Ok(())
    }

    /// Overwrite the feed fraction for a tag. Fails if the tag is absent.
    pub fn set_feed(&mut self, tag: &str, value: f64) -> Result<()> {
        self.color_entry(tag)?;
        debug!(tag = %tag, value = value, "Setting color table feed");
        self.set_nested_property_value(COLOR_TABLE_LABEL, tag, "feed", json!(value));
        Ok(())
    }

    /// Overwrite the packed color for a tag. Fails if the tag is absent.
    pub fn set_color(&mut self, tag: &str, value: u32) -> Result<()> {
        self.color_entry(tag)?;
        debug!(tag = %tag, value = %format!("#{value:X}"), "Setting color table color");
        self.set_nested_property_value(COLOR_TABLE_LABEL, tag, "color", json!(value));
        Ok(())
    }

    /// Replace the existing color table's entries with the default table.
    ///
    /// Records with other labels are untouched. If no "ColorTable" record
    /// exists this is a no-op: it does not insert one.
    pub fn reset_color_table(&mut self) {
        if self.replace_properties(COLOR_TABLE_LABEL, default_color_table().property) {
            info!("Color table reset to defaults");
        }
    }
}
