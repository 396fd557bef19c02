//! Single-line CSV tokenizer.
//!
//! Fields are comma separated. A field that starts with `"` is quoted: `""`
//! inside it stands for one literal quote, and anything between the closing
//! quote and the next separator is dropped. Unquoted fields are trimmed.
//! Quoted fields never span lines; an unterminated quote simply runs to the
//! end of the line.

use std::iter::Peekable;
use std::str::Chars;

/// Field separator.
pub const SEPARATOR: char = ',';

/// Quote character for quoted fields.
pub const QUOTE: char = '"';

/// Fields of one data line, in column order.
pub type ParsedRow = Vec<String>;

/// Splits one line into its fields.
///
/// An empty line yields no fields. A separator at the end of the line yields
/// a trailing empty field.
pub fn parse_line(line: &str) -> ParsedRow {
    let mut fields = Vec::new();
    if line.is_empty() {
        return fields;
    }

    let mut chars = line.chars().peekable();
    while let Some(&first) = chars.peek() {
        if first == QUOTE {
            chars.next();
            fields.push(read_quoted(&mut chars));
        } else {
            fields.push(read_unquoted(&mut chars));
        }
    }

    if line.ends_with(SEPARATOR) {
        fields.push(String::new());
    }
    fields
}

/// Reads a quoted field; the opening quote is already consumed.
fn read_quoted(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut value = String::new();
    while let Some(c) = chars.next() {
        if c != QUOTE {
            value.push(c);
            continue;
        }
        // Check for escaped quote ("")
        if chars.peek() == Some(&QUOTE) {
            value.push(QUOTE);
            chars.next();
        } else {
            break;
        }
    }

    // Drop trailing characters up to and including the separator
    for c in chars.by_ref() {
        if c == SEPARATOR {
            break;
        }
    }
    value
}

fn read_unquoted(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut value = String::new();
    for c in chars.by_ref() {
        if c == SEPARATOR {
            break;
        }
        value.push(c);
    }
    value.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_simple() {
        assert_eq!(parse_line("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_parse_line_quoted_separator() {
        assert_eq!(parse_line("a,\"b,c\",d"), vec!["a", "b,c", "d"]);
    }

    #[test]
    fn test_parse_line_escaped_quote() {
        assert_eq!(parse_line("a,\"b\"\"c\",d"), vec!["a", "b\"c", "d"]);
    }

    #[test]
    fn test_parse_line_trailing_separator() {
        assert_eq!(parse_line("a,b,"), vec!["a", "b", ""]);
    }

    #[test]
    fn test_parse_line_empty() {
        assert!(parse_line("").is_empty());
    }

    #[test]
    fn test_parse_line_only_separator() {
        assert_eq!(parse_line(","), vec!["", ""]);
    }

    #[test]
    fn test_parse_line_consecutive_separators() {
        assert_eq!(parse_line("a,,c"), vec!["a", "", "c"]);
        assert_eq!(parse_line("a,,"), vec!["a", "", ""]);
    }

    #[test]
    fn test_parse_line_trims_unquoted() {
        assert_eq!(parse_line("  a  ,\tb "), vec!["a", "b"]);
    }

    #[test]
    fn test_parse_line_quoted_keeps_whitespace() {
        assert_eq!(parse_line("\"  a  \",b"), vec!["  a  ", "b"]);
    }

    #[test]
    fn test_parse_line_garbage_after_closing_quote() {
        assert_eq!(parse_line("\"ab\"cd,e"), vec!["ab", "e"]);
    }

    #[test]
    fn test_parse_line_unterminated_quote() {
        assert_eq!(parse_line("a,\"bc,d"), vec!["a", "bc,d"]);
    }

    #[test]
    fn test_parse_line_quoted_trailing_separator() {
        assert_eq!(parse_line("\"a\","), vec!["a", ""]);
    }

    #[test]
    fn test_parse_line_space_before_quote_is_unquoted() {
        assert_eq!(parse_line("a, \"b\""), vec!["a", "\"b\""]);
    }

    #[test]
    fn test_parse_line_non_ascii() {
        assert_eq!(
            parse_line("Ім'я Користувача,Єл.Пошта,Вік"),
            vec!["Ім'я Користувача", "Єл.Пошта", "Вік"]
        );
    }
}
