//! SQL dialect trait for multi-database support
//!
//! This trait defines the interface for generating database-specific SQL
//! over a JSON-encoded label column.

use crate::utils::sql::{QuoteStyle, quote_identifier, quote_literal};

/// SQL dialect trait for generating database-specific predicate syntax
///
/// Different databases have different syntax for:
/// - String literal escaping
/// - JSON field extraction and presence checks
/// - IN list literals
/// - Pattern and regular expression matching
pub trait SqlDialect: Send + Sync {
    /// Get the dialect name
    fn name(&self) -> &'static str;

    /// Escaping rule for single-quoted string literals
    ///
    /// - ClickHouse: backslash escapes
    /// - DuckDB: doubled quotes
    fn quote_style(&self) -> QuoteStyle;

    /// Character used to quote identifiers that are not plain names
    ///
    /// - ClickHouse: `` ` ``
    /// - DuckDB: `"`
    fn identifier_quote(&self) -> char;

    /// Render a string literal using this dialect's escaping
    fn literal(&self, value: &str) -> String {
        quote_literal(value, self.quote_style())
    }

    /// Render an identifier, quoting it only when needed
    fn identifier(&self, name: &str) -> String {
        quote_identifier(name, self.identifier_quote(), self.quote_style())
    }

    /// Extract a string field from a JSON text column
    ///
    /// - ClickHouse: `JSONExtractString(labels, 'key')`
    /// - DuckDB: `coalesce(json_extract_string(labels, '$."key"'), '')`
    ///
    /// A missing key must read as the empty string on every dialect.
    fn json_extract_string(&self, column: &str, key: &str) -> String;

    /// Check that a JSON text column contains a top-level key
    ///
    /// - ClickHouse: `JSONHas(labels, 'key')`
    /// - DuckDB: `json_exists(labels, '$."key"')`
    fn json_has(&self, column: &str, key: &str) -> String;

    /// Render the right-hand side of an `IN` comparison
    ///
    /// - ClickHouse: `['a','b']`
    /// - DuckDB: `('a', 'b')`
    fn in_list(&self, values: &[String]) -> String;

    /// Generate a LIKE pattern match
    ///
    /// - ClickHouse: `like(expr, 'p')` / `notLike(expr, 'p')`
    /// - DuckDB: `expr LIKE 'p'` / `expr NOT LIKE 'p'`
    fn like(&self, expr: &str, pattern: &str, negated: bool) -> String;

    /// Generate a regular expression match
    ///
    /// - ClickHouse: `match(expr, 're')`
    /// - DuckDB: `regexp_matches(expr, 're')`
    fn regex_match(&self, expr: &str, pattern: &str, negated: bool) -> String;
}
