//! SQL predicate builder
//!
//! Renders a validated [`Condition`] as SQL text against the JSON label column.
//! All literals are quoted by the dialect, which delegates to `utils::sql`.

use crate::data::sql::SqlDialect;

use super::validate::{Condition, Predicate};

/// Column holding the JSON-encoded label set of a series
pub const LABELS_COLUMN: &str = "labels";

/// Build the SQL fragment for one condition
pub fn build_predicate(dialect: &dyn SqlDialect, column: &str, condition: &Condition<'_>) -> String {
    let key = condition.key;
    let field = || dialect.json_extract_string(column, key);

    match condition.predicate {
        Predicate::Eq(v) => format!("{} = {}", field(), dialect.literal(v)),
        Predicate::Neq(v) => format!("{} != {}", field(), dialect.literal(v)),
        Predicate::In(values) => format!("{} IN {}", field(), dialect.in_list(values)),
        Predicate::NotIn(values) => format!("{} NOT IN {}", field(), dialect.in_list(values)),
        Predicate::Like(p) => dialect.like(&field(), p, false),
        Predicate::NotLike(p) => dialect.like(&field(), p, true),
        Predicate::Match(re) => dialect.regex_match(&field(), re, false),
        Predicate::NotMatch(re) => dialect.regex_match(&field(), re, true),
        Predicate::Exists => dialect.json_has(column, key),
        Predicate::NotExists => format!("NOT {}", dialect.json_has(column, key)),
    }
}
