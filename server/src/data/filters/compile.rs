//! Filter compiler
//!
//! Folds a [`FilterSet`] into one SQL predicate:
//!
//! ```text
//! metric_name = '<metric>' [AND <user predicates>] [AND <implicit predicates>]
//! ```
//!
//! User predicates are joined by the set's combinator; an OR group with more
//! than one member is parenthesised so it binds correctly against the
//! surrounding ANDs. Every item is validated before any SQL is produced, so an
//! error never comes with partial output.

use std::sync::LazyLock;

use crate::data::sql::{Backend, SqlDialect};

use super::aggregation::{AggregateOperator, ImplicitPredicates};
use super::builder::{LABELS_COLUMN, build_predicate};
use super::error::FilterError;
use super::types::{Combinator, FilterSet};
use super::validate::validate_item;

/// Per-call inputs that are not part of the filter expression itself
#[derive(Debug, Clone, Copy)]
pub struct CompileContext<'a> {
    /// Label keys whose items are skipped (their predicates are injected elsewhere)
    pub exclude_keys: &'a [String],
    pub metric_name: &'a str,
    pub aggregation: AggregateOperator,
}

impl<'a> CompileContext<'a> {
    pub fn new(metric_name: &'a str) -> Self {
        Self {
            exclude_keys: &[],
            metric_name,
            aggregation: AggregateOperator::Noop,
        }
    }

    pub fn with_exclude_keys(mut self, keys: &'a [String]) -> Self {
        self.exclude_keys = keys;
        self
    }

    pub fn with_aggregation(mut self, aggregation: AggregateOperator) -> Self {
        self.aggregation = aggregation;
        self
    }

    fn is_excluded(&self, key: &str) -> bool {
        self.exclude_keys.iter().any(|k| k == key)
    }
}

/// Compiles filter sets for one dialect and one implicit predicate table
#[derive(Clone)]
pub struct FilterCompiler {
    dialect: &'static dyn SqlDialect,
    implicit: ImplicitPredicates,
}

impl FilterCompiler {
    pub fn new(backend: Backend, implicit: ImplicitPredicates) -> Self {
        Self {
            dialect: backend.dialect(),
            implicit,
        }
    }

    pub fn dialect(&self) -> &'static dyn SqlDialect {
        self.dialect
    }

    pub fn implicit_predicates(&self) -> &ImplicitPredicates {
        &self.implicit
    }

    /// Compile a filter set into a predicate fragment (no leading `WHERE`)
    pub fn compile(
        &self,
        filter_set: &FilterSet,
        ctx: &CompileContext<'_>,
    ) -> Result<String, FilterError> {
        tracing::trace!(
            metric = ctx.metric_name,
            items = filter_set.items.len(),
            combinator = ?filter_set.op,
            aggregation = %ctx.aggregation,
            dialect = self.dialect.name(),
            "Compiling filter set"
        );

        let conditions = filter_set
            .items
            .iter()
            .map(validate_item)
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|e| tracing::debug!(error = %e, "Rejected filter item"))?;

        let implied = self
            .implicit
            .for_aggregation(ctx.aggregation)
            .map(validate_item)
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|e| tracing::warn!(error = %e, "Invalid implicit predicate rule"))?;

        let fragments: Vec<String> = conditions
            .iter()
            .filter(|c| {
                let excluded = ctx.is_excluded(c.key);
                if excluded {
                    tracing::trace!(key = c.key, "Skipping excluded filter key");
                }
                !excluded
            })
            .map(|c| build_predicate(self.dialect, LABELS_COLUMN, c))
            .collect();

        let mut parts = Vec::with_capacity(fragments.len() + implied.len() + 1);
        parts.push(format!("metric_name = {}", self.dialect.literal(ctx.metric_name)));

        match (filter_set.op, fragments.len()) {
            (_, 0) => {}
            (Combinator::And, _) | (Combinator::Or, 1) => parts.extend(fragments),
            (Combinator::Or, _) => {
                parts.push(format!("({})", fragments.join(Combinator::Or.joiner())))
            }
        }

        parts.extend(
            implied
                .iter()
                .map(|c| build_predicate(self.dialect, LABELS_COLUMN, c)),
        );

        Ok(parts.join(Combinator::And.joiner()))
    }
}

impl Default for FilterCompiler {
    fn default() -> Self {
        Self::new(Backend::default(), ImplicitPredicates::default())
    }
}

static DEFAULT_COMPILER: LazyLock<FilterCompiler> = LazyLock::new(FilterCompiler::default);

/// Compile with the default dialect (ClickHouse) and no implicit predicates
pub fn compile(
    filter_set: &FilterSet,
    exclude_keys: &[String],
    metric_name: &str,
    aggregation: AggregateOperator,
) -> Result<String, FilterError> {
    let ctx = CompileContext::new(metric_name)
        .with_exclude_keys(exclude_keys)
        .with_aggregation(aggregation);
    DEFAULT_COMPILER.compile(filter_set, &ctx)
}

#[cfg(test)]
#[path = "compile_tests.rs"]
mod tests;
