//! CSV line tokenizing.

mod line;

pub use line::{ParsedRow, QUOTE, SEPARATOR, parse_line};
