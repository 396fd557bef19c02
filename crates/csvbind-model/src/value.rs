//! Typed scalar values and the field kinds they are coerced into.
//!
//! Every bound model field declares a [`FieldKind`]: a scalar kind plus an
//! `optional` flag. Absent values are represented as `Option::None` by the
//! caller, never by a sentinel inside [`Value`].

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Serialize, Serializer};

/// Scalar kind of a bound model field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScalarKind {
    /// Free text, always accepted as-is.
    String,
    /// 32-bit signed integer.
    Integer,
    /// 64-bit signed integer.
    Long,
    /// 64-bit unsigned integer.
    Unsigned,
    /// 64-bit floating-point number.
    Float,
    /// Boolean flag.
    Boolean,
    /// Single character.
    Char,
    /// Calendar date with optional time of day.
    DateTime,
    /// Closed set of named members, matched case-insensitively.
    Enumeration(Vec<String>),
}

impl ScalarKind {
    /// Human-readable kind name used in conversion messages.
    pub fn name(&self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Integer => "integer",
            ScalarKind::Long => "long integer",
            ScalarKind::Unsigned => "unsigned integer",
            ScalarKind::Float => "floating-point number",
            ScalarKind::Boolean => "boolean",
            ScalarKind::Char => "char",
            ScalarKind::DateTime => "date/time",
            ScalarKind::Enumeration(_) => "enum",
        }
    }

    /// Whether `value` is a value of this kind.
    ///
    /// Enumeration values must name a declared member at its declared position.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (ScalarKind::Enumeration(members), Value::Enum { member, ordinal }) => {
                usize::try_from(*ordinal)
                    .ok()
                    .and_then(|index| members.get(index))
                    .is_some_and(|declared| declared == member)
            }
            (ScalarKind::String, Value::Text(_))
            | (ScalarKind::Integer, Value::Int(_))
            | (ScalarKind::Long, Value::Long(_))
            | (ScalarKind::Unsigned, Value::UInt(_))
            | (ScalarKind::Float, Value::Float(_))
            | (ScalarKind::Boolean, Value::Bool(_))
            | (ScalarKind::Char, Value::Char(_))
            | (ScalarKind::DateTime, Value::DateTime(_)) => true,
            _ => false,
        }
    }

    /// Parses a declaration keyword (case-insensitive).
    ///
    /// `members` is only consulted for `enum`; it must be present there.
    pub fn from_keyword(keyword: &str, members: Option<Vec<String>>) -> Option<Self> {
        let normalized = keyword.trim().to_ascii_lowercase();
        let kind = match normalized.as_str() {
            "string" | "str" | "text" => ScalarKind::String,
            "int" | "integer" | "i32" => ScalarKind::Integer,
            "long" | "i64" => ScalarKind::Long,
            "uint" | "unsigned" | "u64" => ScalarKind::Unsigned,
            "float" | "double" | "f64" => ScalarKind::Float,
            "bool" | "boolean" => ScalarKind::Boolean,
            "char" => ScalarKind::Char,
            "datetime" | "date" => ScalarKind::DateTime,
            "enum" | "enumeration" => ScalarKind::Enumeration(members?),
            _ => return None,
        };
        Some(kind)
    }

    /// The value a freshly constructed required field of this kind holds.
    pub fn default_value(&self) -> Option<Value> {
        match self {
            ScalarKind::String => Some(Value::Text(String::new())),
            ScalarKind::Integer => Some(Value::Int(0)),
            ScalarKind::Long => Some(Value::Long(0)),
            ScalarKind::Unsigned => Some(Value::UInt(0)),
            ScalarKind::Float => Some(Value::Float(0.0)),
            ScalarKind::Boolean => Some(Value::Bool(false)),
            ScalarKind::Char => Some(Value::Char('\0')),
            ScalarKind::DateTime => NaiveDate::from_ymd_opt(1, 1, 1)
                .map(|date| Value::DateTime(date.and_time(NaiveTime::MIN))),
            ScalarKind::Enumeration(members) => members.first().map(|member| Value::Enum {
                member: member.clone(),
                ordinal: 0,
            }),
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Declared type of a bound model field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldKind {
    pub scalar: ScalarKind,
    pub optional: bool,
}

impl FieldKind {
    /// A field that always holds a value.
    pub fn required(scalar: ScalarKind) -> Self {
        Self {
            scalar,
            optional: false,
        }
    }

    /// A field that may be absent.
    pub fn optional(scalar: ScalarKind) -> Self {
        Self {
            scalar,
            optional: true,
        }
    }

    /// Initial value of a freshly constructed field of this kind.
    pub fn initial_value(&self) -> Option<Value> {
        if self.optional {
            None
        } else {
            self.scalar.default_value()
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.optional {
            write!(f, "optional {}", self.scalar)
        } else {
            write!(f, "{}", self.scalar)
        }
    }
}

/// A coerced scalar value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Int(i32),
    Long(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Char(char),
    /// Enumeration member in its declared spelling, with its declaration position.
    Enum {
        member: String,
        ordinal: u32,
    },
    DateTime(NaiveDateTime),
}

impl Value {
    /// Returns the text if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Numeric view used by range checks.
    ///
    /// Booleans map to 1/0, enumeration members to their ordinal, and text to
    /// its invariant float parse. Characters and date/times have no numeric view.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(f64::from(*v)),
            Value::Long(v) => Some(*v as f64),
            Value::UInt(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Bool(v) => Some(if *v { 1.0 } else { 0.0 }),
            Value::Enum { ordinal, .. } => Some(f64::from(*ordinal)),
            Value::Text(text) => text.trim().parse::<f64>().ok(),
            Value::Char(_) | Value::DateTime(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(text) => f.write_str(text),
            Value::Int(v) => write!(f, "{v}"),
            Value::Long(v) => write!(f, "{v}"),
            Value::UInt(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Char(c) => write!(f, "{c}"),
            Value::Enum { member, .. } => f.write_str(member),
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S")),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Text(text) => serializer.serialize_str(text),
            Value::Int(v) => serializer.serialize_i32(*v),
            Value::Long(v) => serializer.serialize_i64(*v),
            Value::UInt(v) => serializer.serialize_u64(*v),
            Value::Float(v) => serializer.serialize_f64(*v),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Char(c) => serializer.serialize_char(*c),
            Value::Enum { member, .. } => serializer.serialize_str(member),
            Value::DateTime(_) => serializer.collect_str(self),
        }
    }
}
