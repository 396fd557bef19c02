//! Binding resolution against a header row.

use csvbind_model::{FieldBinding, HeaderIndex, MappingError};

/// Builds the header index and reports every binding whose column is missing.
///
/// Resolution is best-effort: a missing column produces one error and the
/// remaining bindings are still checked.
pub fn resolve_bindings(
    bindings: &[FieldBinding],
    header: &[String],
) -> (HeaderIndex, Vec<MappingError>) {
    let index = HeaderIndex::new(header);
    let errors: Vec<MappingError> = bindings
        .iter()
        .filter(|binding| !index.contains(&binding.column))
        .map(|binding| MappingError::missing_column(&binding.column, &binding.field))
        .collect();

    tracing::debug!(
        columns = header.len(),
        bindings = bindings.len(),
        missing = errors.len(),
        "resolved header bindings"
    );
    (index, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use csvbind_model::MappingErrorKind;

    fn header(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_string()).collect()
    }

    #[test]
    fn test_all_columns_present() {
        let bindings = vec![
            FieldBinding::new("name", "Name"),
            FieldBinding::new("age", "Age"),
        ];
        let (index, errors) = resolve_bindings(&bindings, &header(&["name", "AGE"]));
        assert!(errors.is_empty());
        assert_eq!(index.position("Age"), Some(1));
    }

    #[test]
    fn test_missing_column_reported_once() {
        let bindings = vec![
            FieldBinding::new("name", "Name"),
            FieldBinding::new("age", "Age"),
            FieldBinding::new("email", "Email"),
        ];
        let (index, errors) = resolve_bindings(&bindings, &header(&["Name", "Email"]));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, MappingErrorKind::MissingColumn);
        assert_eq!(errors[0].field.as_deref(), Some("age"));
        assert!(errors[0].message.contains("'Age'"));
        assert_eq!(index.position("email"), Some(1));
    }

    #[test]
    fn test_empty_header_reports_every_binding() {
        let bindings = vec![
            FieldBinding::new("name", "Name"),
            FieldBinding::new("age", "Age"),
        ];
        let (index, errors) = resolve_bindings(&bindings, &[]);
        assert!(index.is_empty());
        assert_eq!(errors.len(), 2);
    }
}
