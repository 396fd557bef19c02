//! Whole-source reading.
//!
//! Sources are read fully into memory and split into physical lines before
//! any tokenizing happens.

use std::path::Path;

use crate::error::{IngestError, Result};

const UTF8_BOM: char = '\u{feff}';

/// Reads a UTF-8 source file and returns its lines.
///
/// A leading UTF-8 byte-order mark is dropped. Files that start with a UTF-16
/// byte-order mark or contain invalid UTF-8 are rejected.
pub fn read_source_lines(path: &Path) -> Result<Vec<String>> {
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    // Check for UTF-16 BOM (not supported)
    if bytes.len() >= 2 {
        let encoding = match bytes[0..2] {
            [0xFF, 0xFE] => Some("UTF-16 LE"),
            [0xFE, 0xFF] => Some("UTF-16 BE"),
            _ => None,
        };
        if let Some(encoding) = encoding {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding,
            });
        }
    }

    let text = String::from_utf8(bytes).map_err(|e| IngestError::InvalidUtf8 {
        path: path.to_path_buf(),
        offset: e.utf8_error().valid_up_to(),
    })?;

    let lines = split_lines(&text);
    tracing::debug!(path = %path.display(), lines = lines.len(), "read source");
    Ok(lines)
}

/// Splits text into physical lines.
///
/// `\n`, `\r\n` and a lone `\r` all end a line. A final line terminator does
/// not produce an extra empty line, and a leading UTF-8 byte-order mark is
/// dropped.
pub fn split_lines(text: &str) -> Vec<String> {
    let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\n' => lines.push(std::mem::take(&mut current)),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                lines.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_file(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn test_split_lines_terminators() {
        assert_eq!(split_lines("a\nb\r\nc\rd"), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_split_lines_final_newline() {
        assert_eq!(split_lines("a\nb\n"), vec!["a", "b"]);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_split_lines_keeps_blank_lines() {
        assert_eq!(split_lines("a\n\n   \nb"), vec!["a", "", "   ", "b"]);
    }

    #[test]
    fn test_split_lines_strips_bom() {
        assert_eq!(split_lines("\u{feff}Name,Age\n"), vec!["Name,Age"]);
    }

    #[test]
    fn test_read_source_lines() {
        let file = create_temp_file(b"Name,Age\r\nAlice,30\r\n");
        let lines = read_source_lines(file.path()).unwrap();
        assert_eq!(lines, vec!["Name,Age", "Alice,30"]);
    }

    #[test]
    fn test_read_source_lines_utf8_bom() {
        let file = create_temp_file(b"\xEF\xBB\xBFName\nAlice\n");
        let lines = read_source_lines(file.path()).unwrap();
        assert_eq!(lines, vec!["Name", "Alice"]);
    }

    #[test]
    fn test_read_source_lines_rejects_utf16() {
        let file = create_temp_file(b"\xFF\xFEN\x00");
        let err = read_source_lines(file.path()).unwrap_err();
        assert!(matches!(
            err,
            IngestError::UnsupportedEncoding {
                encoding: "UTF-16 LE",
                ..
            }
        ));
    }

    #[test]
    fn test_read_source_lines_invalid_utf8() {
        let file = create_temp_file(b"Name\n\xC3\x28\n");
        let err = read_source_lines(file.path()).unwrap_err();
        assert!(matches!(err, IngestError::InvalidUtf8 { offset: 5, .. }));
    }

    #[test]
    fn test_read_source_lines_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_source_lines(&dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, IngestError::FileNotFound { .. }));
    }
}
