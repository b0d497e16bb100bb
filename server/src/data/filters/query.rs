//! Time-series sub-query builder
//!
//! Wraps a compiled predicate in the fingerprint lookup that metric queries
//! join against. Pass-through aggregations read the raw label set; grouped
//! aggregations project one column per group-by tag instead.

use super::aggregation::AggregateOperator;
use super::builder::LABELS_COLUMN;
use super::compile::{CompileContext, FilterCompiler};
use super::error::FilterError;
use super::types::FilterSet;

/// Fully qualified location of the time-series table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSeriesTable {
    pub database: String,
    pub table: String,
}

impl TimeSeriesTable {
    pub fn new(database: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            table: table.into(),
        }
    }
}

/// Builds `SELECT ... fingerprint FROM <db>.<table> WHERE <predicate>`
pub struct TimeSeriesQuery<'a> {
    compiler: &'a FilterCompiler,
    table: &'a TimeSeriesTable,
}

impl<'a> TimeSeriesQuery<'a> {
    pub fn new(compiler: &'a FilterCompiler, table: &'a TimeSeriesTable) -> Self {
        Self { compiler, table }
    }

    /// Compile `filter_set` and wrap the predicate in the sub-query
    pub fn build(
        &self,
        filter_set: &FilterSet,
        ctx: &CompileContext<'_>,
        group_tags: &[String],
    ) -> Result<String, FilterError> {
        let predicate = self.compiler.compile(filter_set, ctx)?;
        Ok(self.render(&predicate, ctx.aggregation, group_tags))
    }

    /// Wrap an already compiled predicate
    pub fn render(
        &self,
        predicate: &str,
        aggregation: AggregateOperator,
        group_tags: &[String],
    ) -> String {
        let dialect = self.compiler.dialect();

        let mut columns: Vec<String> = if aggregation.is_passthrough() {
            vec![LABELS_COLUMN.to_string()]
        } else {
            group_tags
                .iter()
                .map(|tag| {
                    format!(
                        "{} as {}",
                        dialect.json_extract_string(LABELS_COLUMN, tag),
                        dialect.identifier(tag)
                    )
                })
                .collect()
        };
        columns.push("fingerprint".to_string());

        tracing::debug!(
            aggregation = %aggregation,
            group_tags = group_tags.len(),
            "Built time series filter query"
        );
        format!(
            "SELECT {} FROM {}.{} WHERE {}",
            columns.join(", "),
            dialect.identifier(&self.table.database),
            dialect.identifier(&self.table.table),
            predicate
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filters::aggregation::ImplicitPredicates;
    use crate::data::filters::types::{Combinator, FilterItem};
    use crate::data::sql::Backend;

    fn table() -> TimeSeriesTable {
        TimeSeriesTable::new("signoz_metrics", "distributed_time_series_v2")
    }

    #[test]
    fn passthrough_selects_labels() {
        let compiler = FilterCompiler::default();
        let table = table();
        let set = FilterSet::new(
            Combinator::And,
            vec![FilterItem::scalar("namespace", "EQ", "a")],
        );
        let ctx = CompileContext::new("table");
        let sql = TimeSeriesQuery::new(&compiler, &table)
            .build(&set, &ctx, &[])
            .unwrap();

        assert_eq!(
            sql,
            "SELECT labels, fingerprint FROM signoz_metrics.distributed_time_series_v2 \
             WHERE metric_name = 'table' AND JSONExtractString(labels, 'namespace') = 'a'"
        );
    }

    #[test]
    fn grouped_aggregation_projects_tags() {
        let compiler = FilterCompiler::default();
        let table = table();
        let tags = vec!["host".to_string(), "k8s.pod".to_string()];
        let ctx = CompileContext::new("cpu")
            .with_aggregation(AggregateOperator::SumRate)
            .with_exclude_keys(&tags);
        let set = FilterSet::new(
            Combinator::And,
            vec![
                FilterItem::scalar("host", "EQ", "h1"),
                FilterItem::scalar("env", "EQ", "prod"),
            ],
        );
        let sql = TimeSeriesQuery::new(&compiler, &table)
            .build(&set, &ctx, &tags)
            .unwrap();

        assert_eq!(
            sql,
            "SELECT JSONExtractString(labels, 'host') as host, \
             JSONExtractString(labels, 'k8s.pod') as `k8s.pod`, fingerprint \
             FROM signoz_metrics.distributed_time_series_v2 \
             WHERE metric_name = 'cpu' AND JSONExtractString(labels, 'env') = 'prod'"
        );
    }

    #[test]
    fn rate_is_passthrough() {
        let compiler = FilterCompiler::default();
        let table = table();
        let tags = vec!["host".to_string()];
        let ctx = CompileContext::new("cpu").with_aggregation(AggregateOperator::Rate);
        let sql = TimeSeriesQuery::new(&compiler, &table)
            .build(&FilterSet::default(), &ctx, &tags)
            .unwrap();
        assert!(sql.starts_with("SELECT labels, fingerprint FROM"));
    }

    #[test]
    fn compile_error_propagates() {
        let compiler = FilterCompiler::default();
        let table = table();
        let set = FilterSet::new(
            Combinator::And,
            vec![FilterItem::scalar("namespace", "PO", "a")],
        );
        let result =
            TimeSeriesQuery::new(&compiler, &table).build(&set, &CompileContext::new("t"), &[]);
        assert_eq!(result, Err(FilterError::unsupported("PO")));
    }

    #[test]
    fn tag_alias_escapes_backslash() {
        let compiler = FilterCompiler::default();
        let table = table();
        let tags = vec!["x\\y".to_string()];
        let sql = TimeSeriesQuery::new(&compiler, &table).render(
            "metric_name = 'cpu'",
            AggregateOperator::Sum,
            &tags,
        );
        assert!(
            sql.starts_with("SELECT JSONExtractString(labels, 'x\\\\y') as `x\\\\y`, fingerprint"),
            "{}",
            sql
        );
    }

    #[test]
    fn duckdb_quotes_identifiers() {
        let compiler = FilterCompiler::new(Backend::Duckdb, ImplicitPredicates::none());
        let table = TimeSeriesTable::new("main", "time-series");
        let sql = TimeSeriesQuery::new(&compiler, &table)
            .build(&FilterSet::default(), &CompileContext::new("m"), &[])
            .unwrap();
        assert_eq!(
            sql,
            "SELECT labels, fingerprint FROM main.\"time-series\" WHERE metric_name = 'm'"
        );
    }
}
