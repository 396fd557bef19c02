//! Source ingestion for csvbind.
//!
//! This crate turns a delimited text source into lines and lines into fields.
//!
//! # Features
//!
//! - **Source Reading**: Read a whole file into memory as lines, with BOM and
//!   encoding checks
//! - **Line Tokenizing**: Split one physical line into fields, honoring
//!   double-quoted fields and doubled-quote escapes
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use csvbind_ingest::{parse_line, read_source_lines};
//!
//! let lines = read_source_lines(Path::new("users.csv"))?;
//! let header = parse_line(&lines[0]);
//! ```

mod csv;
mod error;
mod source;

// === Error Types ===
pub use error::{IngestError, Result};

// === Line Tokenizing ===
pub use csv::{ParsedRow, QUOTE, SEPARATOR, parse_line};

// === Source Reading ===
pub use source::{read_source_lines, split_lines};
