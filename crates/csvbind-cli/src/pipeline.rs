//! Import pipeline: map a source onto a model, then validate every record.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, info_span, trace};

use csvbind_map::{MappingOutcome, map_from_file, map_from_str};
use csvbind_model::{DynamicRecord, MappingError, Value};
use csvbind_validate::{ValidationError, validate};

use crate::config::Model;
use crate::logging::redact_value;

/// One field of a mapped record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldValue {
    pub field: String,
    pub value: Option<Value>,
}

/// A mapped record and the rules it failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordOutcome {
    /// 1-based position among the mapped records.
    pub number: usize,
    pub values: Vec<FieldValue>,
    pub errors: Vec<ValidationError>,
}

impl RecordOutcome {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Everything found while importing one source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportReport {
    pub records: Vec<RecordOutcome>,
    pub mapping_errors: Vec<MappingError>,
    pub valid_count: usize,
    pub invalid_count: usize,
}

impl ImportReport {
    /// True when any mapping or validation error was found.
    pub fn has_errors(&self) -> bool {
        !self.mapping_errors.is_empty() || self.invalid_count > 0
    }
}

/// Imports a CSV file.
pub fn run_import(source: &Path, model: &Model) -> ImportReport {
    let span = info_span!("import", source = %source.display());
    let _guard = span.enter();

    let outcome = map_from_file(source, &model.schema.bindings(), || {
        DynamicRecord::new(Arc::clone(&model.schema))
    });
    let report = build_report(outcome, model);
    info!(
        records = report.records.len(),
        valid = report.valid_count,
        invalid = report.invalid_count,
        mapping_errors = report.mapping_errors.len(),
        "import finished"
    );
    report
}

/// Imports in-memory CSV text.
pub fn run_import_str(text: &str, model: &Model) -> ImportReport {
    let outcome = map_from_str(text, &model.schema.bindings(), || {
        DynamicRecord::new(Arc::clone(&model.schema))
    });
    build_report(outcome, model)
}

fn build_report(outcome: MappingOutcome<DynamicRecord>, model: &Model) -> ImportReport {
    debug!(
        records = outcome.records.len(),
        errors = outcome.errors.len(),
        "mapping stage done"
    );

    let records: Vec<RecordOutcome> = outcome
        .records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let number = index + 1;
            let values = record
                .entries()
                .map(|(field, value)| {
                    if let Some(value) = value {
                        let text = value.to_string();
                        trace!(
                            record = number,
                            field,
                            value = redact_value(&text),
                            "mapped value"
                        );
                    }
                    FieldValue {
                        field: field.to_string(),
                        value: value.cloned(),
                    }
                })
                .collect();
            RecordOutcome {
                number,
                values,
                errors: validate(record, &model.rules),
            }
        })
        .collect();

    let valid_count = records.iter().filter(|record| record.is_valid()).count();
    let invalid_count = records.len() - valid_count;
    ImportReport {
        records,
        mapping_errors: outcome.errors,
        valid_count,
        invalid_count,
    }
}
