//! Filter type definitions
//!
//! Shapes decoded from client JSON. Operators stay raw strings here; they are
//! checked against the vocabulary at compile time, not at decode time.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Boolean joiner for sibling filter items
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum Combinator {
    #[default]
    #[serde(rename = "AND", alias = "and")]
    And,
    #[serde(rename = "OR", alias = "or")]
    Or,
}

impl Combinator {
    /// Separator placed between predicates
    pub fn joiner(&self) -> &'static str {
        match self {
            Combinator::And => " AND ",
            Combinator::Or => " OR ",
        }
    }
}

/// Root of a filter expression
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct FilterSet {
    #[serde(default)]
    pub op: Combinator,
    #[serde(default)]
    pub items: Vec<FilterItem>,
}

impl FilterSet {
    pub fn new(op: Combinator, items: Vec<FilterItem>) -> Self {
        Self { op, items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// One leaf comparison
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FilterItem {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<FilterValue>,
    pub op: String,
}

impl FilterItem {
    pub fn new(key: impl Into<String>, op: impl Into<String>, value: Option<FilterValue>) -> Self {
        Self {
            key: key.into(),
            value,
            op: op.into(),
        }
    }

    pub fn scalar(key: impl Into<String>, op: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, op, Some(FilterValue::Single(value.into())))
    }

    pub fn list<I, S>(key: impl Into<String>, op: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        Self::new(key, op, Some(FilterValue::List(values)))
    }

    pub fn presence(key: impl Into<String>, op: impl Into<String>) -> Self {
        Self::new(key, op, None)
    }
}

/// Operand of a filter item
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    Single(String),
    List(Vec<String>),
}

/// Shape of the value a client actually sent, for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    Single,
    List,
    EmptyList,
    Absent,
}

impl ValueShape {
    pub fn of(value: Option<&FilterValue>) -> Self {
        match value {
            Some(FilterValue::Single(_)) => ValueShape::Single,
            Some(FilterValue::List(v)) if v.is_empty() => ValueShape::EmptyList,
            Some(FilterValue::List(_)) => ValueShape::List,
            None => ValueShape::Absent,
        }
    }
}

impl fmt::Display for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueShape::Single => write!(f, "a single value"),
            ValueShape::List => write!(f, "a list"),
            ValueShape::EmptyList => write!(f, "an empty list"),
            ValueShape::Absent => write!(f, "no value"),
        }
    }
}
