//! Row-to-record mapping.

use std::collections::HashSet;
use std::path::Path;

use csvbind_ingest::{parse_line, read_source_lines, split_lines};
use csvbind_model::{FieldBinding, MappingError, Record};

use crate::coerce::{Fallback, coerce};
use crate::resolve::resolve_bindings;

/// Records built from a source together with every problem found on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingOutcome<T> {
    pub records: Vec<T>,
    pub errors: Vec<MappingError>,
}

impl<T> MappingOutcome<T> {
    fn failed(error: MappingError) -> Self {
        Self {
            records: Vec::new(),
            errors: vec![error],
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Maps source lines onto records; the first line is the header.
///
/// Blank lines are skipped without an error. Every other data line yields
/// exactly one record, whatever conversion errors its cells produce. Line
/// numbers in errors are 1-based and count the header.
pub fn map_from_lines<T, L, F>(
    lines: &[L],
    bindings: &[FieldBinding],
    mut new_instance: F,
) -> MappingOutcome<T>
where
    T: Record,
    L: AsRef<str>,
    F: FnMut() -> T,
{
    let Some((header_line, rows)) = lines.split_first() else {
        return MappingOutcome::failed(MappingError::empty_source());
    };

    let header = parse_line(header_line.as_ref());
    let (index, mut errors) = resolve_bindings(bindings, &header);

    // Bindings with a missing column were reported above and are skipped here
    let resolved: Vec<(&FieldBinding, usize)> = bindings
        .iter()
        .filter_map(|binding| {
            index
                .position(&binding.column)
                .map(|position| (binding, position))
        })
        .collect();

    let mut unknown_fields: HashSet<&str> = HashSet::new();
    let mut records = Vec::new();

    for (offset, raw_line) in rows.iter().enumerate() {
        let raw_line = raw_line.as_ref();
        let line_number = offset + 2;
        if raw_line.trim().is_empty() {
            tracing::trace!(line = line_number, "skipping blank line");
            continue;
        }

        let fields = parse_line(raw_line);
        let mut instance = new_instance();

        for &(binding, position) in &resolved {
            let Some(kind) = instance.field_kind(&binding.field) else {
                if unknown_fields.insert(binding.field.as_str()) {
                    tracing::warn!(
                        field = %binding.field,
                        column = %binding.column,
                        "binding names a field the model does not declare"
                    );
                    errors.push(MappingError::unknown_field(&binding.field, &binding.column));
                }
                continue;
            };

            let raw = fields.get(position).map_or("", String::as_str);
            match coerce(raw, &kind) {
                Ok(value) => instance.set_field(&binding.field, value),
                Err(err) => {
                    match Fallback::for_kind(&kind) {
                        Fallback::Absent => instance.set_field(&binding.field, None),
                        Fallback::Value(value) => instance.set_field(&binding.field, Some(value)),
                        Fallback::Untouched => {}
                    }
                    errors.push(MappingError::conversion(
                        line_number,
                        &binding.field,
                        raw,
                        format!(
                            "cannot convert value '{raw}' to {} for field '{}': {err}",
                            kind.scalar, binding.field
                        ),
                    ));
                }
            }
        }

        records.push(instance);
    }

    tracing::debug!(
        lines = lines.len(),
        records = records.len(),
        errors = errors.len(),
        "mapped source"
    );
    MappingOutcome { records, errors }
}

/// Maps in-memory text; lines end at `\n`, `\r\n` or `\r`.
pub fn map_from_str<T, F>(
    text: &str,
    bindings: &[FieldBinding],
    new_instance: F,
) -> MappingOutcome<T>
where
    T: Record,
    F: FnMut() -> T,
{
    map_from_lines(&split_lines(text), bindings, new_instance)
}

/// Reads and maps a source file.
///
/// A file that cannot be found or read yields no records and a single
/// error describing why.
pub fn map_from_file<T, F>(
    path: &Path,
    bindings: &[FieldBinding],
    new_instance: F,
) -> MappingOutcome<T>
where
    T: Record,
    F: FnMut() -> T,
{
    match read_source_lines(path) {
        Ok(lines) => map_from_lines(&lines, bindings, new_instance),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "source is unreadable");
            MappingOutcome::failed(MappingError::unreadable_source(&err))
        }
    }
}
