//! Label filter compiler
//!
//! Compiles user-supplied boolean filters over series labels into SQL
//! predicates for the time-series store. Labels live as JSON text in the
//! `labels` column; each filter item becomes one predicate on that column.
//!
//! ## Usage
//!
//! ```
//! use labelsql_server::data::filters::{AggregateOperator, compile, parse_filter_set};
//!
//! let body = br#"{"op": "AND", "items": [{"key": "namespace", "value": "a", "op": "EQ"}]}"#;
//! let filter_set = parse_filter_set(body, 50).unwrap();
//! let sql = compile(&filter_set, &[], "table", AggregateOperator::Noop).unwrap();
//! assert_eq!(
//!     sql,
//!     "metric_name = 'table' AND JSONExtractString(labels, 'namespace') = 'a'"
//! );
//! ```

mod aggregation;
mod builder;
mod compile;
mod error;
mod ops;
mod parser;
mod query;
mod types;
mod validate;

pub use aggregation::{AggregateOperator, ImplicitPredicates, ImplicitRule};
pub use builder::{LABELS_COLUMN, build_predicate};
pub use compile::{CompileContext, FilterCompiler, compile};
pub use error::{FilterDecodeError, FilterError};
pub use ops::{Arity, FilterOp, OPERATOR_TOKENS};
pub use parser::{
    DEFAULT_MAX_FILTER_ITEMS, MAX_FILTER_JSON_SIZE, check_item_limit, parse_filter_set,
    parse_json_body,
};
pub use query::{TimeSeriesQuery, TimeSeriesTable};
pub use types::{Combinator, FilterItem, FilterSet, FilterValue, ValueShape};
pub use validate::{Condition, Predicate, validate_item};
