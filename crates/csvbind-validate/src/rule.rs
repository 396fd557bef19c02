//! Validation rule variants.

use serde::{Deserialize, Serialize};

use csvbind_model::Value;

/// A constraint attached to one model field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rule {
    /// The value must be present; text must not be blank.
    Required,
    /// A present value must be numeric and lie in `[min, max]`.
    Range { min: f64, max: f64 },
    /// Present text must be between `min` and `max` characters long.
    StringLength { min: usize, max: usize },
}

impl Rule {
    /// Checks `value`, returning a message naming `field` on failure.
    pub fn validate(&self, value: Option<&Value>, field: &str) -> Option<String> {
        match self {
            Rule::Required => match value {
                None => Some(format!("{field} is required.")),
                Some(Value::Text(text)) if text.trim().is_empty() => {
                    Some(format!("{field} is required."))
                }
                Some(_) => None,
            },
            Rule::Range { min, max } => {
                let value = value?;
                match value.as_f64() {
                    Some(n) if !(*min..=*max).contains(&n) => {
                        Some(format!("{field} must be in range [{min}..{max}]."))
                    }
                    Some(_) => None,
                    None => Some(format!(
                        "{field} has incompatible type for Range validation."
                    )),
                }
            }
            Rule::StringLength { min, max } => {
                let text = value?.as_text()?;
                let length = text.chars().count();
                if length < *min {
                    Some(format!("{field} length must be at least {min}."))
                } else if length > *max {
                    Some(format!("{field} length must be at most {max}."))
                } else {
                    None
                }
            }
        }
    }

    /// Short rule name for reports.
    pub fn name(&self) -> &'static str {
        match self {
            Rule::Required => "required",
            Rule::Range { .. } => "range",
            Rule::StringLength { .. } => "string_length",
        }
    }
}
