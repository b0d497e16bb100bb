//! SQL utility functions
//!
//! Every string literal and identifier that ends up in generated SQL goes
//! through this module. Dialects pick a [`QuoteStyle`]; they never escape
//! values themselves.

/// How a dialect escapes characters inside a single-quoted string literal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    /// Backslash escapes (`\'`, `\\`), as used by ClickHouse and MySQL
    Backslash,
    /// Standard SQL doubling (`''`), as used by DuckDB, PostgreSQL and SQLite
    Doubled,
}

/// Escape the contents of a string literal without adding the surrounding quotes
///
/// # Example
///
/// ```
/// use labelsql_server::utils::sql::{QuoteStyle, escape_string_literal};
///
/// assert_eq!(escape_string_literal("it's", QuoteStyle::Backslash), "it\\'s");
/// assert_eq!(escape_string_literal("it's", QuoteStyle::Doubled), "it''s");
/// ```
pub fn escape_string_literal(s: &str, style: QuoteStyle) -> String {
    match style {
        QuoteStyle::Backslash => {
            let mut out = String::with_capacity(s.len());
            for c in s.chars() {
                match c {
                    '\\' => out.push_str("\\\\"),
                    '\'' => out.push_str("\\'"),
                    '\0' => out.push_str("\\0"),
                    _ => out.push(c),
                }
            }
            out
        }
        QuoteStyle::Doubled => s.replace('\'', "''"),
    }
}

/// Render a value as a single-quoted SQL string literal
pub fn quote_literal(s: &str, style: QuoteStyle) -> String {
    format!("'{}'", escape_string_literal(s, style))
}

/// Render values as quoted literals joined by `separator`, preserving input order
pub fn quote_literal_list<S: AsRef<str>>(values: &[S], style: QuoteStyle, separator: &str) -> String {
    values
        .iter()
        .map(|v| quote_literal(v.as_ref(), style))
        .collect::<Vec<_>>()
        .join(separator)
}

/// Check whether a name can be used as a bare SQL identifier
pub fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Quote an identifier with `quote` when it is not a plain identifier
///
/// Embedded quote characters are doubled. Backslash-style dialects also
/// treat `\` as an escape inside quoted identifiers, so it is doubled too.
pub fn quote_identifier(name: &str, quote: char, style: QuoteStyle) -> String {
    if is_plain_identifier(name) {
        return name.to_string();
    }
    let mut out = String::with_capacity(name.len() + 2);
    out.push(quote);
    for c in name.chars() {
        if c == quote || (c == '\\' && style == QuoteStyle::Backslash) {
            out.push(c);
        }
        out.push(c);
    }
    out.push(quote);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_no_special_chars() {
        assert_eq!(escape_string_literal("host-1", QuoteStyle::Backslash), "host-1");
        assert_eq!(escape_string_literal("host-1", QuoteStyle::Doubled), "host-1");
    }

    #[test]
    fn test_escape_single_quote_backslash_style() {
        assert_eq!(escape_string_literal("o'brien", QuoteStyle::Backslash), "o\\'brien");
    }

    #[test]
    fn test_escape_backslash_before_quote() {
        // A trailing backslash must not swallow the closing quote
        assert_eq!(escape_string_literal("a\\", QuoteStyle::Backslash), "a\\\\");
        assert_eq!(quote_literal("a\\", QuoteStyle::Backslash), "'a\\\\'");
        assert_eq!(
            escape_string_literal("\\'", QuoteStyle::Backslash),
            "\\\\\\'"
        );
    }

    #[test]
    fn test_escape_nul_byte() {
        assert_eq!(escape_string_literal("a\0b", QuoteStyle::Backslash), "a\\0b");
    }

    #[test]
    fn test_escape_doubled_style_keeps_backslash() {
        assert_eq!(escape_string_literal("a\\b", QuoteStyle::Doubled), "a\\b");
        assert_eq!(escape_string_literal("''", QuoteStyle::Doubled), "''''");
    }

    #[test]
    fn test_quote_literal_injection_attempt() {
        let sql = quote_literal("a' OR '1'='1", QuoteStyle::Backslash);
        assert_eq!(sql, "'a\\' OR \\'1\\'=\\'1'");

        let sql = quote_literal("a' OR '1'='1", QuoteStyle::Doubled);
        assert_eq!(sql, "'a'' OR ''1''=''1'");
    }

    #[test]
    fn test_quote_literal_empty() {
        assert_eq!(quote_literal("", QuoteStyle::Backslash), "''");
    }

    #[test]
    fn test_quote_literal_list_preserves_order() {
        let values = vec!["host-2".to_string(), "host-1".to_string()];
        assert_eq!(
            quote_literal_list(&values, QuoteStyle::Backslash, ","),
            "'host-2','host-1'"
        );
        assert_eq!(
            quote_literal_list(&["x", "y'z"], QuoteStyle::Doubled, ", "),
            "'x', 'y''z'"
        );
    }

    #[test]
    fn test_is_plain_identifier() {
        assert!(is_plain_identifier("namespace"));
        assert!(is_plain_identifier("_le"));
        assert!(is_plain_identifier("k8s_pod"));
        assert!(!is_plain_identifier("8ball"));
        assert!(!is_plain_identifier("service.name"));
        assert!(!is_plain_identifier(""));
    }

    #[test]
    fn test_quote_identifier() {
        let bs = QuoteStyle::Backslash;
        assert_eq!(quote_identifier("host", '`', bs), "host");
        assert_eq!(quote_identifier("service.name", '`', bs), "`service.name`");
        assert_eq!(quote_identifier("we`ird", '`', bs), "`we``ird`");
        assert_eq!(
            quote_identifier("service.name", '"', QuoteStyle::Doubled),
            "\"service.name\""
        );
    }

    #[test]
    fn test_quote_identifier_backslash() {
        assert_eq!(quote_identifier("x\\y", '`', QuoteStyle::Backslash), "`x\\\\y`");
        assert_eq!(quote_identifier("x\\`", '`', QuoteStyle::Backslash), "`x\\\\```");
        assert_eq!(quote_identifier("x\\y", '"', QuoteStyle::Doubled), "\"x\\y\"");
    }
}
