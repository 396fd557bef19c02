//! Rule evaluation against mapped records.

use std::fmt;

use serde::Serialize;

use csvbind_model::Record;

use crate::rule::Rule;

/// A failed rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Ordered rule declarations, keyed by field name.
///
/// Fields are evaluated in declaration order and each field's rules in the
/// order they were attached.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    fields: Vec<(String, Vec<Rule>)>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches rules to `field`, after any rules it already has.
    #[must_use]
    pub fn field(mut self, field: &str, rules: impl IntoIterator<Item = Rule>) -> Self {
        for rule in rules {
            self.push(field, rule);
        }
        self
    }

    /// Attaches one rule to `field`.
    pub fn push(&mut self, field: &str, rule: Rule) {
        match self.fields.iter_mut().find(|(name, _)| name == field) {
            Some((_, rules)) => rules.push(rule),
            None => self.fields.push((field.to_string(), vec![rule])),
        }
    }

    /// Rules attached to `field`.
    pub fn rules_for(&self, field: &str) -> &[Rule] {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, rules)| rules.as_slice())
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Rule])> {
        self.fields
            .iter()
            .map(|(name, rules)| (name.as_str(), rules.as_slice()))
    }

    /// Total number of attached rules.
    pub fn rule_count(&self) -> usize {
        self.fields.iter().map(|(_, rules)| rules.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Runs every declared rule against `record` and collects the failures.
pub fn validate<R: Record + ?Sized>(record: &R, rules: &RuleSet) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (field, field_rules) in rules.iter() {
        let value = record.field_value(field);
        for rule in field_rules {
            if let Some(message) = rule.validate(value.as_ref(), field) {
                errors.push(ValidationError {
                    field: field.to_string(),
                    message,
                });
            }
        }
    }

    tracing::trace!(
        rules = rules.rule_count(),
        failures = errors.len(),
        "validated record"
    );
    errors
}
