//! Integration tests for working-configuration resolution.

use serde_json::json;

use mcfg::config::{MachineConfig, Record};
use mcfg::error::McfgError;

use crate::common::fixtures::TestConfig;

#[test]
fn sample_store_resolves_to_flat_mapping() {
    let fixture = TestConfig::sample();
    let mut config = MachineConfig::open(fixture.path_str()).unwrap();

    let working = config.working_config().unwrap();
    // One flat mapping spanning machine, head, and material properties
    assert_eq!(working["max_feed"], json!(25000));
    assert_eq!(working["max_width"], json!(400));
    assert_eq!(working["max_power"], json!(40.0));
    assert_eq!(working["kerf"], json!(0.075));
    assert_eq!(working["thickness"], json!(3.0));
    assert_eq!(working["engrave_feed"], json!(6000));
}

#[test]
fn resolution_is_deterministic_across_calls() {
    let fixture = TestConfig::sample();
    let mut config = MachineConfig::open(fixture.path_str()).unwrap();

    let first = config.working_config().unwrap().clone();
    let second = config.working_config().unwrap().clone();
    let fresh = MachineConfig::open(fixture.path_str())
        .unwrap()
        .resolve_selector("default")
        .unwrap();
    assert_eq!(first, second);
    assert_eq!(first, fresh);
}

#[test]
fn colliding_keys_shadow_in_selector_order() {
    let records = vec![
        Record::new("sel", "default", [("a", json!("M1")), ("b", json!("M2"))]),
        Record::new("M1", "machine", [("x", json!(1))]),
        Record::new("M2", "machine", [("x", json!(2)), ("y", json!(3))]),
    ];
    let fixture = TestConfig::write(records);

    let mut config = MachineConfig::open(fixture.path_str()).unwrap();
    let working = config.working_config().unwrap();
    assert_eq!(working.len(), 2);
    assert_eq!(working["x"], json!(2));
    assert_eq!(working["y"], json!(3));
}

#[test]
fn cache_is_explicit_not_automatic() {
    let fixture = TestConfig::sample();
    let mut config = MachineConfig::open(fixture.path_str()).unwrap();

    assert_eq!(config.working_config().unwrap()["cut_feed"], json!(400));

    config
        .store_mut()
        .set_property_value("3mm_ply_LED-40", "cut_feed", json!(500));
    // Stale until invalidated
    assert_eq!(config.working_config().unwrap()["cut_feed"], json!(400));

    config.invalidate_working();
    assert_eq!(config.working_config().unwrap()["cut_feed"], json!(500));
}

#[test]
fn missing_selector_fails_with_no_partial_result() {
    let records = vec![Record::new("m", "machine", [("max_feed", json!(100))])];
    let fixture = TestConfig::write(records);

    let mut config = MachineConfig::open(fixture.path_str()).unwrap();
    let result = config.working_config();
    assert!(matches!(result, Err(McfgError::KindNotFound { .. })));
}

#[test]
fn dangling_reference_fails_resolution() {
    let records = vec![
        Record::new("sel", "default", [("machine", json!("gone"))]),
        Record::new("m", "machine", [("max_feed", json!(100))]),
    ];
    let fixture = TestConfig::write(records);

    let mut config = MachineConfig::open(fixture.path_str()).unwrap();
    let result = config.working_config();
    assert!(matches!(result, Err(McfgError::LabelNotFound { label }) if label == "gone"));
}

#[test]
fn mutation_of_missing_label_is_noop_on_disk_too() {
    let fixture = TestConfig::sample();
    let mut config = MachineConfig::open(fixture.path_str()).unwrap();

    let changed = config
        .store_mut()
        .set_property_value("nonexistent-label", "x", json!(5));
    assert!(!changed);

    let untouched = MachineConfig::open(fixture.path_str()).unwrap();
    assert_eq!(untouched.store(), config.store());
}
