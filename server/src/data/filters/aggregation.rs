//! Aggregation kinds and the predicates they imply
//!
//! Some downstream aggregations only make sense over a subset of series.
//! [`ImplicitPredicates`] is the declarative table mapping aggregation kinds to
//! extra filter items; it is loaded from configuration and consulted by the
//! compiler on every call.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::FilterError;
use super::types::FilterItem;
use super::validate::validate_item;

/// Aggregation applied to the series selected by a filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AggregateOperator {
    #[default]
    Noop,
    Count,
    CountDistinct,
    Sum,
    Avg,
    Max,
    Min,
    P05,
    P10,
    P20,
    P25,
    P50,
    P75,
    P90,
    P95,
    P99,
    Rate,
    SumRate,
    AvgRate,
    MaxRate,
    MinRate,
    #[serde(rename = "HIST_QUANTILE_50")]
    HistQuantile50,
    #[serde(rename = "HIST_QUANTILE_75")]
    HistQuantile75,
    #[serde(rename = "HIST_QUANTILE_90")]
    HistQuantile90,
    #[serde(rename = "HIST_QUANTILE_95")]
    HistQuantile95,
    #[serde(rename = "HIST_QUANTILE_99")]
    HistQuantile99,
}

impl AggregateOperator {
    /// Kinds that consume raw label sets instead of group-by columns
    pub fn is_passthrough(&self) -> bool {
        matches!(self, Self::Noop | Self::Rate)
    }
}

impl fmt::Display for AggregateOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Reuse the serde token so logs and JSON agree
        match serde_json::to_value(self) {
            Ok(serde_json::Value::String(s)) => f.write_str(&s),
            _ => write!(f, "{:?}", self),
        }
    }
}

/// One entry of the implicit predicate table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ImplicitRule {
    pub aggregations: Vec<AggregateOperator>,
    #[serde(flatten)]
    pub item: FilterItem,
}

/// Declarative table of predicates implied by aggregation kinds
///
/// Empty unless configured. Histogram bucket series, for example, can be
/// narrowed to those carrying the `le` bound label:
///
/// ```json
/// [{"aggregations": ["HIST_QUANTILE_50", "HIST_QUANTILE_99"], "key": "le", "op": "EXISTS"}]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ImplicitPredicates {
    rules: Vec<ImplicitRule>,
}

impl ImplicitPredicates {
    pub fn new(rules: Vec<ImplicitRule>) -> Self {
        Self { rules }
    }

    /// Table with no implicit predicates
    pub fn none() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn rules(&self) -> &[ImplicitRule] {
        &self.rules
    }

    /// Items implied by `aggregation`, in table order
    pub fn for_aggregation(
        &self,
        aggregation: AggregateOperator,
    ) -> impl Iterator<Item = &FilterItem> + '_ {
        self.rules
            .iter()
            .filter(move |rule| rule.aggregations.contains(&aggregation))
            .map(|rule| &rule.item)
    }

    /// Check every rule against the operator vocabulary
    pub fn validate(&self) -> Result<(), FilterError> {
        for rule in &self.rules {
            validate_item(&rule.item)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_operator_serde_tokens() {
        let op: AggregateOperator = serde_json::from_str(r#""SUM_RATE""#).unwrap();
        assert_eq!(op, AggregateOperator::SumRate);
        let op: AggregateOperator = serde_json::from_str(r#""HIST_QUANTILE_90""#).unwrap();
        assert_eq!(op, AggregateOperator::HistQuantile90);
        let op: AggregateOperator = serde_json::from_str(r#""P05""#).unwrap();
        assert_eq!(op, AggregateOperator::P05);
        assert!(serde_json::from_str::<AggregateOperator>(r#""MEDIAN""#).is_err());
    }

    #[test]
    fn aggregate_operator_display() {
        assert_eq!(AggregateOperator::Noop.to_string(), "NOOP");
        assert_eq!(AggregateOperator::CountDistinct.to_string(), "COUNT_DISTINCT");
        assert_eq!(
            AggregateOperator::HistQuantile99.to_string(),
            "HIST_QUANTILE_99"
        );
    }

    #[test]
    fn passthrough_kinds() {
        assert!(AggregateOperator::Noop.is_passthrough());
        assert!(AggregateOperator::Rate.is_passthrough());
        assert!(!AggregateOperator::SumRate.is_passthrough());
        assert!(!AggregateOperator::P99.is_passthrough());
    }

    #[test]
    fn default_table_is_empty() {
        let table = ImplicitPredicates::default();
        assert_eq!(table, ImplicitPredicates::none());
        assert_eq!(
            table.for_aggregation(AggregateOperator::HistQuantile95).count(),
            0
        );
    }

    #[test]
    fn histogram_bucket_rule_from_json() {
        let json = r#"[{"aggregations": ["HIST_QUANTILE_50", "HIST_QUANTILE_99"], "key": "le", "op": "EXISTS"}]"#;
        let table: ImplicitPredicates = serde_json::from_str(json).unwrap();
        let items: Vec<_> = table
            .for_aggregation(AggregateOperator::HistQuantile99)
            .collect();
        assert_eq!(items, vec![&FilterItem::presence("le", "EXISTS")]);
        assert_eq!(table.for_aggregation(AggregateOperator::HistQuantile90).count(), 0);
        assert_eq!(table.for_aggregation(AggregateOperator::Noop).count(), 0);
        assert!(table.validate().is_ok());
    }

    #[test]
    fn table_from_json() {
        let json = r#"[
            {"aggregations": ["SUM", "AVG"], "key": "__internal", "op": "NOT_EXISTS"},
            {"aggregations": ["SUM"], "key": "env", "value": "prod", "op": "EQ"}
        ]"#;
        let table: ImplicitPredicates = serde_json::from_str(json).unwrap();
        assert_eq!(table.rules().len(), 2);

        let sum: Vec<_> = table.for_aggregation(AggregateOperator::Sum).collect();
        assert_eq!(sum.len(), 2);
        assert_eq!(sum[1], &FilterItem::scalar("env", "EQ", "prod"));

        let avg: Vec<_> = table.for_aggregation(AggregateOperator::Avg).collect();
        assert_eq!(avg, vec![&FilterItem::presence("__internal", "NOT_EXISTS")]);
    }

    #[test]
    fn validate_rejects_bad_rule() {
        let table = ImplicitPredicates::new(vec![ImplicitRule {
            aggregations: vec![AggregateOperator::Sum],
            item: FilterItem::scalar("env", "PO", "prod"),
        }]);
        assert_eq!(table.validate(), Err(FilterError::unsupported("PO")));
        assert!(ImplicitPredicates::none().validate().is_ok());
    }
}
