//! Integration tests for color table operations against a persisted store.

use mcfg::config::{default_color_table, MachineConfig, COLOR_TABLE_LABEL};
use mcfg::error::McfgError;

use crate::common::fixtures::TestConfig;

#[test]
fn default_table_round_trips_through_file() {
    let fixture = TestConfig::sample_with_color_table();

    let config = MachineConfig::open(fixture.path_str()).unwrap();
    let table = config.store().find_by_label(COLOR_TABLE_LABEL).unwrap();
    assert_eq!(table.property.len(), 32);
    assert_eq!(table.property, default_color_table().property);
}

#[test]
fn edits_persist_and_reload() {
    let fixture = TestConfig::sample_with_color_table();

    let mut config = MachineConfig::open(fixture.path_str()).unwrap();
    config.store_mut().set_power("L05", 0.35).unwrap();
    config.store_mut().set_feed("L05", 0.2).unwrap();
    config.store_mut().set_color("L05", 0x11_22_33).unwrap();
    config.save().unwrap();

    let reloaded = MachineConfig::open(fixture.path_str()).unwrap();
    assert_eq!(reloaded.store().power("L05").unwrap(), 0.35);
    assert_eq!(reloaded.store().feed("L05").unwrap(), 0.2);
    assert_eq!(reloaded.store().color_hex("L05").unwrap(), "#112233");
}

#[test]
fn hex_accessor_matches_packed_color() {
    let fixture = TestConfig::sample_with_color_table();
    let config = MachineConfig::open(fixture.path_str()).unwrap();

    let table = config.store().find_by_label(COLOR_TABLE_LABEL).unwrap();
    let tags: Vec<String> = table.property.keys().cloned().collect();
    for tag in tags {
        let packed = config.store().color(&tag).unwrap();
        assert_eq!(
            config.store().color_hex(&tag).unwrap(),
            format!("#{packed:X}")
        );
    }
}

#[test]
fn reset_restores_modified_table() {
    let fixture = TestConfig::sample_with_color_table();

    let mut config = MachineConfig::open(fixture.path_str()).unwrap();
    config.store_mut().set_power("L00", 0.01).unwrap();
    config.store_mut().set_color("L29", 0xDE_AD_00).unwrap();

    config.store_mut().reset_color_table();
    config.save().unwrap();

    let reloaded = MachineConfig::open(fixture.path_str()).unwrap();
    let table = reloaded.store().find_by_label(COLOR_TABLE_LABEL).unwrap();
    assert_eq!(table.property, default_color_table().property);
}

#[test]
fn reset_without_table_changes_nothing() {
    let fixture = TestConfig::sample();

    let mut config = MachineConfig::open(fixture.path_str()).unwrap();
    let before = config.store().clone();
    config.store_mut().reset_color_table();
    assert_eq!(config.store(), &before);
}

#[test]
fn accessors_fail_without_table() {
    let fixture = TestConfig::sample();
    let config = MachineConfig::open(fixture.path_str()).unwrap();

    assert!(matches!(
        config.store().power("L00"),
        Err(McfgError::LabelNotFound { .. })
    ));
}

#[test]
fn setters_do_not_create_tags() {
    let fixture = TestConfig::sample_with_color_table();

    let mut config = MachineConfig::open(fixture.path_str()).unwrap();
    assert!(matches!(
        config.store_mut().set_power("L99", 0.5),
        Err(McfgError::TagNotFound { tag }) if tag == "L99"
    ));

    let table = config.store().find_by_label(COLOR_TABLE_LABEL).unwrap();
    assert!(!table.property.contains_key("L99"));
}
