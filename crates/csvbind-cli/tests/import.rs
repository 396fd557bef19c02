//! Integration tests for the import pipeline.

use std::fs;

use csvbind_cli::config::ModelConfig;
use csvbind_cli::pipeline::run_import;
use csvbind_cli::sample::write_sample;
use csvbind_model::{MappingErrorKind, Value};

#[test]
fn test_sample_files_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let files = write_sample(dir.path(), false).unwrap();

    let model = ModelConfig::load(&files.model).unwrap();
    let report = run_import(&files.csv, &model);

    assert_eq!(report.records.len(), 6);
    assert_eq!(report.valid_count, 3);
    assert_eq!(report.invalid_count, 3);
    assert!(report.has_errors());

    assert_eq!(report.mapping_errors.len(), 1);
    let mapping = &report.mapping_errors[0];
    assert_eq!(mapping.kind, MappingErrorKind::Conversion);
    assert_eq!(mapping.line, Some(5));
    assert_eq!(mapping.raw_value.as_deref(), Some("notanumber"));

    let eva = &report.records[4];
    assert!(eva.is_valid());
    assert_eq!(eva.values[0].field, "Username");
    assert_eq!(
        eva.values[0].value,
        Some(Value::Text("eva,smith".to_string()))
    );
    assert_eq!(eva.values[2].value, Some(Value::Int(22)));

    let invalid: Vec<usize> = report
        .records
        .iter()
        .filter(|record| !record.is_valid())
        .map(|record| record.number)
        .collect();
    assert_eq!(invalid, vec![3, 4, 6]);
}

#[test]
fn test_clean_source_has_no_errors() {
    let dir = tempfile::tempdir().unwrap();
    let files = write_sample(dir.path(), false).unwrap();
    let csv = dir.path().join("clean.csv");
    fs::write(&csv, "Username,Email,Age\nalice,alice@example.com,30\n").unwrap();

    let model = ModelConfig::load(&files.model).unwrap();
    let report = run_import(&csv, &model);

    assert!(!report.has_errors());
    assert_eq!(report.valid_count, 1);
}

#[test]
fn test_unreadable_source_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let files = write_sample(dir.path(), false).unwrap();
    let model = ModelConfig::load(&files.model).unwrap();

    let report = run_import(&dir.path().join("absent.csv"), &model);

    assert!(report.records.is_empty());
    assert_eq!(report.mapping_errors.len(), 1);
    assert_eq!(
        report.mapping_errors[0].kind,
        MappingErrorKind::UnreadableSource
    );
    assert!(report.has_errors());
}

#[test]
fn test_report_json_shape() {
    let dir = tempfile::tempdir().unwrap();
    let files = write_sample(dir.path(), false).unwrap();
    let model = ModelConfig::load(&files.model).unwrap();
    let report = run_import(&files.csv, &model);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["valid_count"], 3);
    assert_eq!(json["invalid_count"], 3);
    assert_eq!(json["mapping_errors"][0]["kind"], "conversion");
    assert_eq!(json["records"][0]["number"], 1);
    assert_eq!(json["records"][0]["values"][0]["value"], "alice");
    assert_eq!(json["records"][3]["values"][2]["value"], serde_json::Value::Null);
    assert_eq!(
        json["records"][3]["errors"][0]["message"],
        "Age is required."
    );
}
