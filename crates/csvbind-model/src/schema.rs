//! Runtime model declarations and the schema-driven record type.

use std::collections::HashSet;
use std::sync::Arc;

use crate::binding::FieldBinding;
use crate::error::SchemaError;
use crate::record::Record;
use crate::value::{FieldKind, Value};

/// One declared model field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub name: String,
    pub kind: FieldKind,
    /// Source column; `None` leaves the field unbound.
    pub column: Option<String>,
}

impl FieldDecl {
    pub fn bound(name: impl Into<String>, column: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            column: Some(column.into()),
        }
    }

    pub fn unbound(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            column: None,
        }
    }
}

/// Ordered set of field declarations for one model type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSchema {
    fields: Vec<FieldDecl>,
}

impl ModelSchema {
    /// Builds a schema, rejecting empty or duplicate field names.
    pub fn new(fields: Vec<FieldDecl>) -> Result<Self, SchemaError> {
        let mut seen = HashSet::new();
        for field in &fields {
            if field.name.trim().is_empty() {
                return Err(SchemaError::EmptyFieldName);
            }
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField {
                    name: field.name.clone(),
                });
            }
        }
        Ok(Self { fields })
    }

    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDecl> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Column bindings in declaration order; unbound fields are skipped.
    pub fn bindings(&self) -> Vec<FieldBinding> {
        self.fields
            .iter()
            .filter_map(|field| {
                field
                    .column
                    .as_ref()
                    .map(|column| FieldBinding::new(&field.name, column))
            })
            .collect()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }
}

/// A record whose shape comes from a [`ModelSchema`] at runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicRecord {
    schema: Arc<ModelSchema>,
    values: Vec<Option<Value>>,
}

impl DynamicRecord {
    /// Creates a record with every field at its initial value.
    pub fn new(schema: Arc<ModelSchema>) -> Self {
        let values = schema
            .fields
            .iter()
            .map(|field| field.kind.initial_value())
            .collect();
        Self { schema, values }
    }

    /// Field names paired with their current values, in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.schema
            .fields
            .iter()
            .zip(&self.values)
            .map(|(field, value)| (field.name.as_str(), value.as_ref()))
    }
}

impl Record for DynamicRecord {
    fn field_kind(&self, field: &str) -> Option<FieldKind> {
        self.schema.field(field).map(|decl| decl.kind.clone())
    }

    fn set_field(&mut self, field: &str, value: Option<Value>) {
        let Some(idx) = self.schema.position(field) else {
            return;
        };
        let accepted = match &value {
            Some(value) => self.schema.fields[idx].kind.scalar.accepts(value),
            None => true,
        };
        if accepted {
            self.values[idx] = value;
        }
    }

    fn field_value(&self, field: &str) -> Option<Value> {
        let idx = self.schema.position(field)?;
        self.values[idx].clone()
    }
}
