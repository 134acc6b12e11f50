//! Integration tests for record store persistence.

use std::fs;

use serde_json::json;

use mcfg::config::{sample_records, Record, RecordStore};
use mcfg::error::McfgError;

use crate::common::fixtures::TestConfig;

#[test]
fn round_trip_preserves_records_and_order() {
    let fixture = TestConfig::sample();

    let store = RecordStore::read_from(&fixture.path).unwrap();
    let labels: Vec<&str> = store.records().iter().map(|r| r.label.as_str()).collect();
    let expected: Vec<String> = sample_records().into_iter().map(|r| r.label).collect();
    assert_eq!(labels, expected);

    // Write again and compare bytes: a stable store serializes identically
    let second = fixture.dir_path().join("copy.json");
    store.write_to(&second).unwrap();
    assert_eq!(
        fs::read_to_string(&fixture.path).unwrap(),
        fs::read_to_string(&second).unwrap()
    );
}

#[test]
fn property_key_order_survives_round_trip() {
    let records = vec![Record::new(
        "m",
        "machine",
        [("zeta", json!(1)), ("alpha", json!(2)), ("mid", json!(3))],
    )];
    let fixture = TestConfig::write(records);

    let store = RecordStore::read_from(&fixture.path).unwrap();
    let keys: Vec<&str> = store.records()[0].property.keys().map(String::as_str).collect();
    assert_eq!(keys, ["zeta", "alpha", "mid"]);
}

#[test]
fn unknown_record_types_pass_through_rewrite() {
    let mut records = sample_records();
    records.push(Record::new(
        "camera-1",
        "camera",
        [("resolution", json!("1080p"))],
    ));
    let fixture = TestConfig::write(records);

    let store = RecordStore::read_from(&fixture.path).unwrap();
    store.write_to(&fixture.path).unwrap();

    let reread = RecordStore::read_from(&fixture.path).unwrap();
    let camera = reread.find_by_label("camera-1").unwrap();
    assert_eq!(camera.kind, "camera");
    assert_eq!(camera.property["resolution"], json!("1080p"));
}

#[test]
fn write_leaves_no_temp_file_behind() {
    let fixture = TestConfig::sample();

    let entries: Vec<String> = fs::read_dir(fixture.dir_path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(entries, ["machine.json"]);
}

#[test]
fn malformed_file_is_parse_error() {
    let fixture = TestConfig::sample();
    fs::write(&fixture.path, "[{\"label\": }").unwrap();

    let result = RecordStore::read_from(&fixture.path);
    assert!(matches!(result, Err(McfgError::ConfigParse(_))));
}

#[test]
fn duplicate_labels_rejected_on_read() {
    let fixture = TestConfig::sample();
    let text = r#"[
        {"label": "m", "type": "machine", "property": {"max_feed": 100}},
        {"label": "m", "type": "head", "property": {"max_power": 40.0}}
    ]"#;
    fs::write(&fixture.path, text).unwrap();

    let result = RecordStore::read_from(&fixture.path);
    assert!(matches!(result, Err(McfgError::DuplicateLabel { label }) if label == "m"));
}
