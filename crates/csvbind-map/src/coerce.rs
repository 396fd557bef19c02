//! Text-to-value coercion.
//!
//! All parsing is locale-invariant. The policy per kind:
//!
//! | Kind            | Accepted text                                   | Blank text        |
//! |-----------------|-------------------------------------------------|-------------------|
//! | string          | anything, unchanged                             | empty string      |
//! | integer, float  | invariant number (sign, `,` groups, exponent)   | zero              |
//! | boolean         | `true`/`false` (any case) or an integer         | `false`           |
//! | enum            | a declared member name (any case)               | failure           |
//! | date/time       | ISO 8601, RFC 3339, invariant US and named-month forms | failure    |
//! | long, uint, char| plain invariant conversion                      | failure           |
//!
//! Optional fields turn blank text into an absent value for every kind but
//! string.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

use csvbind_model::{FieldKind, ScalarKind, Value};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d %B %Y",
    "%B %d, %Y",
    "%B %d %Y",
];

/// Why a cell could not be converted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoercionError {
    #[error("invalid integer")]
    InvalidInteger,

    #[error("invalid floating-point number")]
    InvalidFloat,

    #[error("invalid boolean")]
    InvalidBoolean,

    #[error("invalid date/time")]
    InvalidDateTime,

    #[error("'{value}' is not one of: {members}")]
    UnknownMember { value: String, members: String },

    #[error("cannot convert to {kind}")]
    Unsupported { kind: &'static str },
}

/// What the mapper assigns when coercion fails.
#[derive(Debug, Clone, PartialEq)]
pub enum Fallback {
    /// Mark the field absent.
    Absent,
    /// Assign this value.
    Value(Value),
    /// Leave the field at its initial value.
    Untouched,
}

impl Fallback {
    pub fn for_kind(kind: &FieldKind) -> Self {
        if kind.optional {
            Fallback::Absent
        } else if kind.scalar == ScalarKind::String {
            Fallback::Value(Value::Text(String::new()))
        } else {
            Fallback::Untouched
        }
    }
}

/// Converts one cell to a value of `kind`.
///
/// `Ok(None)` means the field is absent; this only happens for optional
/// fields given blank text.
pub fn coerce(text: &str, kind: &FieldKind) -> Result<Option<Value>, CoercionError> {
    let trimmed = text.trim();
    let blank = trimmed.is_empty();

    if kind.scalar == ScalarKind::String {
        return Ok(Some(Value::Text(text.to_string())));
    }
    if blank && kind.optional {
        return Ok(None);
    }

    let value = match &kind.scalar {
        ScalarKind::String => Value::Text(text.to_string()),
        ScalarKind::Integer => match parse_integer(trimmed) {
            Some(v) => Value::Int(v),
            None if blank => Value::Int(0),
            None => return Err(CoercionError::InvalidInteger),
        },
        ScalarKind::Float => match parse_float(trimmed) {
            Some(v) => Value::Float(v),
            None if blank => Value::Float(0.0),
            None => return Err(CoercionError::InvalidFloat),
        },
        ScalarKind::Boolean => match parse_bool(trimmed) {
            Some(v) => Value::Bool(v),
            None if blank => Value::Bool(false),
            None => return Err(CoercionError::InvalidBoolean),
        },
        ScalarKind::Enumeration(members) => parse_member(trimmed, members)?,
        ScalarKind::DateTime => {
            Value::DateTime(parse_datetime(trimmed).ok_or(CoercionError::InvalidDateTime)?)
        }
        ScalarKind::Long => Value::Long(trimmed.parse().map_err(|_| unsupported(kind))?),
        ScalarKind::Unsigned => Value::UInt(trimmed.parse().map_err(|_| unsupported(kind))?),
        ScalarKind::Char => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Value::Char(c),
                _ => return Err(unsupported(kind)),
            }
        }
    };
    Ok(Some(value))
}

fn unsupported(kind: &FieldKind) -> CoercionError {
    CoercionError::Unsupported {
        kind: kind.scalar.name(),
    }
}

fn parse_integer(text: &str) -> Option<i32> {
    let cleaned = strip_group_separators(text);
    if let Ok(v) = cleaned.parse::<i32>() {
        return Some(v);
    }
    // Integral decimal and exponent forms, e.g. "42.0" or "1e3"
    let v = cleaned.parse::<f64>().ok()?;
    let in_range = v >= f64::from(i32::MIN) && v <= f64::from(i32::MAX);
    if v.fract() == 0.0 && in_range {
        Some(v as i32)
    } else {
        None
    }
}

fn parse_float(text: &str) -> Option<f64> {
    strip_group_separators(text).parse::<f64>().ok()
}

fn parse_bool(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        text.parse::<i32>().ok().map(|v| v != 0)
    }
}

fn parse_member(text: &str, members: &[String]) -> Result<Value, CoercionError> {
    let wanted = text.to_lowercase();
    members
        .iter()
        .position(|member| member.to_lowercase() == wanted)
        .map(|idx| Value::Enum {
            member: members[idx].clone(),
            ordinal: idx as u32,
        })
        .ok_or_else(|| CoercionError::UnknownMember {
            value: text.to_string(),
            members: members.join(", "),
        })
}

fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date.and_time(NaiveTime::MIN));
        }
    }
    None
}

/// Removes `,` group separators when every one sits between two digits.
fn strip_group_separators(text: &str) -> Cow<'_, str> {
    if !text.contains(',') {
        return Cow::Borrowed(text);
    }
    let chars: Vec<char> = text.chars().collect();
    let well_placed = chars.iter().enumerate().all(|(idx, c)| {
        *c != ','
            || (idx > 0
                && chars[idx - 1].is_ascii_digit()
                && chars.get(idx + 1).is_some_and(char::is_ascii_digit))
    });
    if well_placed {
        Cow::Owned(text.replace(',', ""))
    } else {
        Cow::Borrowed(text)
    }
}
