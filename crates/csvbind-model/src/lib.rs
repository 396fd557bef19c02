//! Shared model types for csvbind.
//!
//! This crate holds the declarative side of the pipeline: column bindings,
//! field kinds, typed values, the [`Record`] contract implemented by model
//! types, and the error records produced while mapping.

mod binding;
mod error;
mod lookup;
mod record;
mod schema;
mod value;

pub use binding::FieldBinding;
pub use error::{MappingError, MappingErrorKind, SchemaError};
pub use lookup::HeaderIndex;
pub use record::Record;
pub use schema::{DynamicRecord, FieldDecl, ModelSchema};
pub use value::{FieldKind, ScalarKind, Value};
