//! The model-side contract used by the mapper and the validator.

use crate::value::{FieldKind, Value};

/// A model type whose fields can be populated from source columns.
///
/// Implementations declare field kinds explicitly; nothing is discovered at
/// runtime. Field names are matched exactly.
pub trait Record {
    /// Declared kind of `field`, or `None` if the model has no such field.
    fn field_kind(&self, field: &str) -> Option<FieldKind>;

    /// Assigns a coerced value. `None` marks the field absent.
    ///
    /// Values of a variant other than the declared kind are ignored.
    fn set_field(&mut self, field: &str, value: Option<Value>);

    /// Current value of `field`; `None` when absent or unknown.
    fn field_value(&self, field: &str) -> Option<Value>;
}
