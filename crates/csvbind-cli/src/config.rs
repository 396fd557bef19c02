//! Model declarations loaded from TOML.
//!
//! ```toml
//! [[field]]
//! name = "Age"
//! column = "Age"
//! type = "int"
//! optional = true
//! rules = [{ kind = "range", min = 0.0, max = 150.0 }]
//! ```
//!
//! A field without `column`, or with `ignore = true`, is never bound to the
//! source but still carries its rules.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use csvbind_model::{FieldDecl, FieldKind, ModelSchema, ScalarKind, SchemaError};
use csvbind_validate::{Rule, RuleSet};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read model file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse model file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<toml::de::Error>,
    },

    #[error("model declares no fields")]
    NoFields,

    #[error("field '{field}' declares {rule} with min greater than max")]
    InvalidBounds { field: String, rule: &'static str },

    #[error("field '{field}' lists members but is not an enum")]
    UnexpectedMembers { field: String },

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Raw contents of a model declaration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    #[serde(rename = "field", default)]
    pub fields: Vec<FieldConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldConfig {
    pub name: String,
    #[serde(default)]
    pub column: Option<String>,
    #[serde(default)]
    pub ignore: bool,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub members: Option<Vec<String>>,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

/// A checked model: the schema records are built from, and its rules.
#[derive(Debug, Clone)]
pub struct Model {
    pub schema: Arc<ModelSchema>,
    pub rules: RuleSet,
}

impl ModelConfig {
    /// Reads and checks a declaration file.
    pub fn load(path: &Path) -> Result<Model, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source: Box::new(source),
        })?;
        tracing::debug!(path = %path.display(), fields = config.fields.len(), "loaded model file");
        config.into_model()
    }

    /// Checks the declarations and builds the schema and rule set.
    pub fn into_model(self) -> Result<Model, ConfigError> {
        if self.fields.is_empty() {
            return Err(ConfigError::NoFields);
        }

        let mut decls = Vec::with_capacity(self.fields.len());
        let mut rules = RuleSet::new();
        for field in self.fields {
            let kind = field.kind()?;
            for rule in &field.rules {
                check_bounds(&field.name, rule)?;
            }
            rules = rules.field(&field.name, field.rules);
            let column = if field.ignore { None } else { field.column };
            decls.push(FieldDecl {
                name: field.name,
                kind,
                column,
            });
        }

        let schema = ModelSchema::new(decls)?;
        Ok(Model {
            schema: Arc::new(schema),
            rules,
        })
    }
}

impl FieldConfig {
    fn kind(&self) -> Result<FieldKind, ConfigError> {
        let is_enum = matches!(
            self.type_name.trim().to_ascii_lowercase().as_str(),
            "enum" | "enumeration"
        );
        if is_enum {
            match &self.members {
                Some(members) if !members.is_empty() => {}
                _ => {
                    return Err(SchemaError::MissingMembers {
                        field: self.name.clone(),
                    }
                    .into());
                }
            }
        } else if self.members.is_some() {
            return Err(ConfigError::UnexpectedMembers {
                field: self.name.clone(),
            });
        }

        let scalar = ScalarKind::from_keyword(&self.type_name, self.members.clone()).ok_or_else(
            || SchemaError::UnknownType {
                field: self.name.clone(),
                type_name: self.type_name.clone(),
            },
        )?;
        Ok(FieldKind {
            scalar,
            optional: self.optional,
        })
    }
}

fn check_bounds(field: &str, rule: &Rule) -> Result<(), ConfigError> {
    let inverted = match rule {
        Rule::Required => false,
        Rule::Range { min, max } => min > max,
        Rule::StringLength { min, max } => min > max,
    };
    if inverted {
        return Err(ConfigError::InvalidBounds {
            field: field.to_string(),
            rule: rule.name(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(text: &str) -> Result<Model, ConfigError> {
        toml::from_str::<ModelConfig>(text).unwrap().into_model()
    }

    #[test]
    fn test_full_declaration() {
        let model = model(
            r#"
            [[field]]
            name = "Username"
            column = "Username"
            type = "string"
            rules = [{ kind = "required" }, { kind = "string_length", min = 3, max = 50 }]

            [[field]]
            name = "Role"
            column = "Role"
            type = "enum"
            members = ["Guest", "Admin"]
            optional = true

            [[field]]
            name = "Notes"
            column = "Notes"
            type = "string"
            ignore = true
            "#,
        )
        .unwrap();

        let schema = &model.schema;
        assert_eq!(schema.fields().len(), 3);
        assert_eq!(schema.bindings().len(), 2);
        assert_eq!(schema.field("Notes").unwrap().column, None);
        assert_eq!(
            schema.field("Role").unwrap().kind,
            FieldKind::optional(ScalarKind::Enumeration(vec![
                "Guest".to_string(),
                "Admin".to_string(),
            ]))
        );
        assert_eq!(model.rules.rules_for("Username").len(), 2);
        assert!(model.rules.rules_for("Role").is_empty());
    }

    #[test]
    fn test_field_without_column_is_unbound() {
        let model = model(
            r#"
            [[field]]
            name = "Computed"
            type = "float"
            rules = [{ kind = "required" }]
            "#,
        )
        .unwrap();
        assert!(model.schema.bindings().is_empty());
        assert_eq!(model.rules.rule_count(), 1);
    }

    #[test]
    fn test_unknown_type() {
        let err = model(
            r#"
            [[field]]
            name = "Price"
            column = "Price"
            type = "decimal"
            "#,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "field 'Price' has unknown type 'decimal'");
    }

    #[test]
    fn test_enum_needs_members() {
        let err = model(
            r#"
            [[field]]
            name = "Role"
            column = "Role"
            type = "enum"
            members = []
            "#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Schema(SchemaError::MissingMembers { .. })
        ));
    }

    #[test]
    fn test_members_only_for_enums() {
        let err = model(
            r#"
            [[field]]
            name = "Age"
            column = "Age"
            type = "int"
            members = ["a"]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::UnexpectedMembers { .. }));
    }

    #[test]
    fn test_duplicate_field() {
        let err = model(
            r#"
            [[field]]
            name = "Age"
            type = "int"

            [[field]]
            name = "Age"
            type = "long"
            "#,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "field 'Age' is declared more than once");
    }

    #[test]
    fn test_inverted_bounds() {
        let err = model(
            r#"
            [[field]]
            name = "Age"
            column = "Age"
            type = "int"
            rules = [{ kind = "range", min = 10.0, max = 1.0 }]
            "#,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "field 'Age' declares range with min greater than max"
        );
    }

    #[test]
    fn test_no_fields() {
        assert!(matches!(model(""), Err(ConfigError::NoFields)));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let parsed = toml::from_str::<ModelConfig>(
            r#"
            [[field]]
            name = "Age"
            type = "int"
            colum = "Age"
            "#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ModelConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
