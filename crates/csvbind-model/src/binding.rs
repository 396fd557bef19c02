use serde::{Deserialize, Serialize};

/// Declares that a model field is populated from a named source column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldBinding {
    pub field: String,
    pub column: String,
}

impl FieldBinding {
    pub fn new(field: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            column: column.into(),
        }
    }
}
