//! Record mapping for csvbind.
//!
//! Maps the rows of a delimited text source onto model records:
//!
//! 1. The header row is tokenized and every declared [`FieldBinding`] is
//!    resolved against it, case-insensitively ([`resolve_bindings`]).
//! 2. Each non-blank data row is tokenized, a fresh record is created, and
//!    every resolved cell is coerced to the field's declared kind
//!    ([`coerce`]) and assigned.
//!
//! Problems never stop the pass. They are collected as [`MappingError`]s
//! next to the records that could still be built.
//!
//! [`FieldBinding`]: csvbind_model::FieldBinding
//! [`MappingError`]: csvbind_model::MappingError

mod coerce;
mod mapper;
mod resolve;

pub use coerce::{CoercionError, Fallback, coerce};
pub use mapper::{MappingOutcome, map_from_file, map_from_lines, map_from_str};
pub use resolve::resolve_bindings;
