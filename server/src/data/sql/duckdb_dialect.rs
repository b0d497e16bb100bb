//! DuckDB SQL dialect implementation

use super::SqlDialect;
use crate::utils::sql::{QuoteStyle, quote_literal_list};

/// DuckDB SQL dialect
pub struct DuckdbDialect;

impl DuckdbDialect {
    /// JSONPath selecting a top-level member, e.g. `$."service.name"`
    fn json_path(key: &str) -> String {
        let escaped = key.replace('\\', "\\\\").replace('"', "\\\"");
        format!("$.\"{}\"", escaped)
    }
}

impl SqlDialect for DuckdbDialect {
    fn name(&self) -> &'static str {
        "duckdb"
    }

    fn quote_style(&self) -> QuoteStyle {
        QuoteStyle::Doubled
    }

    fn identifier_quote(&self) -> char {
        '"'
    }

    /// Missing keys read as `''`, matching ClickHouse `JSONExtractString`
    fn json_extract_string(&self, column: &str, key: &str) -> String {
        format!(
            "coalesce(json_extract_string({}, {}), '')",
            column,
            self.literal(&Self::json_path(key))
        )
    }

    fn json_has(&self, column: &str, key: &str) -> String {
        format!(
            "json_exists({}, {})",
            column,
            self.literal(&Self::json_path(key))
        )
    }

    fn in_list(&self, values: &[String]) -> String {
        format!("({})", quote_literal_list(values, self.quote_style(), ", "))
    }

    fn like(&self, expr: &str, pattern: &str, negated: bool) -> String {
        let op = if negated { "NOT LIKE" } else { "LIKE" };
        format!("{} {} {}", expr, op, self.literal(pattern))
    }

    fn regex_match(&self, expr: &str, pattern: &str, negated: bool) -> String {
        let call = format!("regexp_matches({}, {})", expr, self.literal(pattern));
        if negated {
            format!("NOT {}", call)
        } else {
            call
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_extract_string() {
        let dialect = DuckdbDialect;
        assert_eq!(
            dialect.json_extract_string("labels", "namespace"),
            "coalesce(json_extract_string(labels, '$.\"namespace\"'), '')"
        );
    }

    #[test]
    fn test_json_path_escapes_quotes() {
        let dialect = DuckdbDialect;
        assert_eq!(
            dialect.json_extract_string("labels", "a\"b'c"),
            "coalesce(json_extract_string(labels, '$.\"a\\\"b''c\"'), '')"
        );
    }

    #[test]
    fn test_json_has() {
        let dialect = DuckdbDialect;
        assert_eq!(
            dialect.json_has("labels", "le"),
            "json_exists(labels, '$.\"le\"')"
        );
    }

    #[test]
    fn test_in_list() {
        let dialect = DuckdbDialect;
        let values = vec!["a".to_string(), "o'b".to_string()];
        assert_eq!(dialect.in_list(&values), "('a', 'o''b')");
    }

    #[test]
    fn test_like_and_regex() {
        let dialect = DuckdbDialect;
        assert_eq!(dialect.like("x", "a%", true), "x NOT LIKE 'a%'");
        assert_eq!(
            dialect.regex_match("x", "^a", false),
            "regexp_matches(x, '^a')"
        );
    }
}
