//! Error types shared by the mapping stages.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Category of a [`MappingError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingErrorKind {
    /// The source has no lines at all.
    EmptySource,
    /// The source could not be found or read.
    UnreadableSource,
    /// A bound column is not present in the header row.
    MissingColumn,
    /// A binding names a field the model does not declare.
    UnknownField,
    /// A cell could not be converted to the field's declared kind.
    Conversion,
}

/// A structural or per-value failure found while building records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingError {
    pub kind: MappingErrorKind,
    /// 1-based source line, when the error belongs to a line.
    pub line: Option<usize>,
    pub field: Option<String>,
    pub raw_value: Option<String>,
    pub message: String,
}

impl MappingError {
    pub fn empty_source() -> Self {
        Self {
            kind: MappingErrorKind::EmptySource,
            line: None,
            field: None,
            raw_value: None,
            message: "source is empty".to_string(),
        }
    }

    pub fn unreadable_source(reason: impl fmt::Display) -> Self {
        Self {
            kind: MappingErrorKind::UnreadableSource,
            line: None,
            field: None,
            raw_value: None,
            message: reason.to_string(),
        }
    }

    pub fn missing_column(column: &str, field: &str) -> Self {
        Self {
            kind: MappingErrorKind::MissingColumn,
            line: None,
            field: Some(field.to_string()),
            raw_value: None,
            message: format!("header missing column '{column}' required for field '{field}'"),
        }
    }

    pub fn unknown_field(field: &str, column: &str) -> Self {
        Self {
            kind: MappingErrorKind::UnknownField,
            line: None,
            field: Some(field.to_string()),
            raw_value: None,
            message: format!("model has no field '{field}' for column '{column}'"),
        }
    }

    /// A conversion failure; `message` already names the value, kind and field.
    pub fn conversion(line: usize, field: &str, raw_value: &str, message: String) -> Self {
        Self {
            kind: MappingErrorKind::Conversion,
            line: Some(line),
            field: Some(field.to_string()),
            raw_value: Some(raw_value.to_string()),
            message,
        }
    }
}

impl fmt::Display for MappingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {line}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for MappingError {}

/// Errors raised while building a [`crate::ModelSchema`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("field names must not be empty")]
    EmptyFieldName,

    #[error("field '{name}' is declared more than once")]
    DuplicateField { name: String },

    #[error("field '{field}' has unknown type '{type_name}'")]
    UnknownType { field: String, type_name: String },

    #[error("enum field '{field}' must declare at least one member")]
    MissingMembers { field: String },
}
