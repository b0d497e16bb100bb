//! ClickHouse SQL dialect implementation

use super::SqlDialect;
use crate::utils::sql::{QuoteStyle, quote_literal_list};

/// ClickHouse SQL dialect
pub struct ClickhouseDialect;

impl SqlDialect for ClickhouseDialect {
    fn name(&self) -> &'static str {
        "clickhouse"
    }

    fn quote_style(&self) -> QuoteStyle {
        QuoteStyle::Backslash
    }

    fn identifier_quote(&self) -> char {
        '`'
    }

    fn json_extract_string(&self, column: &str, key: &str) -> String {
        format!("JSONExtractString({}, {})", column, self.literal(key))
    }

    fn json_has(&self, column: &str, key: &str) -> String {
        format!("JSONHas({}, {})", column, self.literal(key))
    }

    fn in_list(&self, values: &[String]) -> String {
        // ClickHouse array literal, no space after the comma
        format!("[{}]", quote_literal_list(values, self.quote_style(), ","))
    }

    fn like(&self, expr: &str, pattern: &str, negated: bool) -> String {
        let func = if negated { "notLike" } else { "like" };
        format!("{}({}, {})", func, expr, self.literal(pattern))
    }

    fn regex_match(&self, expr: &str, pattern: &str, negated: bool) -> String {
        let call = format!("match({}, {})", expr, self.literal(pattern));
        if negated {
            format!("NOT {}", call)
        } else {
            call
        }
    }
}
