//! Filter item validation
//!
//! Turns a decoded [`FilterItem`] into a typed [`Condition`]: the operator is
//! resolved against the vocabulary and the value is checked against the
//! operator's arity. Unknown operators fail closed.

use super::error::FilterError;
use super::ops::FilterOp;
use super::types::{FilterItem, FilterValue, ValueShape};

/// Operator together with an operand of the right shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate<'a> {
    Eq(&'a str),
    Neq(&'a str),
    In(&'a [String]),
    NotIn(&'a [String]),
    Like(&'a str),
    NotLike(&'a str),
    Match(&'a str),
    NotMatch(&'a str),
    Exists,
    NotExists,
}

/// A validated filter item, borrowed from the request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition<'a> {
    pub key: &'a str,
    pub predicate: Predicate<'a>,
}

/// Validate one filter item
pub fn validate_item(item: &FilterItem) -> Result<Condition<'_>, FilterError> {
    let op = FilterOp::parse(&item.op).ok_or_else(|| FilterError::unsupported(&item.op))?;

    let predicate = match op {
        FilterOp::Eq => Predicate::Eq(scalar(item, op)?),
        FilterOp::Neq => Predicate::Neq(scalar(item, op)?),
        FilterOp::In => Predicate::In(list(item, op)?),
        FilterOp::NotIn => Predicate::NotIn(list(item, op)?),
        FilterOp::Like => Predicate::Like(scalar(item, op)?),
        FilterOp::NotLike => Predicate::NotLike(scalar(item, op)?),
        FilterOp::Match => Predicate::Match(scalar(item, op)?),
        FilterOp::NotMatch => Predicate::NotMatch(scalar(item, op)?),
        FilterOp::Exists => {
            absent(item, op)?;
            Predicate::Exists
        }
        FilterOp::NotExists => {
            absent(item, op)?;
            Predicate::NotExists
        }
    };

    Ok(Condition {
        key: &item.key,
        predicate,
    })
}

fn scalar(item: &FilterItem, op: FilterOp) -> Result<&str, FilterError> {
    match &item.value {
        Some(FilterValue::Single(v)) => Ok(v.as_str()),
        _ => Err(arity_mismatch(item, op)),
    }
}

fn list(item: &FilterItem, op: FilterOp) -> Result<&[String], FilterError> {
    match &item.value {
        Some(FilterValue::List(values)) if !values.is_empty() => Ok(values.as_slice()),
        _ => Err(arity_mismatch(item, op)),
    }
}

fn absent(item: &FilterItem, op: FilterOp) -> Result<(), FilterError> {
    match &item.value {
        None => Ok(()),
        Some(_) => Err(arity_mismatch(item, op)),
    }
}

fn arity_mismatch(item: &FilterItem, op: FilterOp) -> FilterError {
    FilterError::ArityMismatch {
        key: item.key.clone(),
        op,
        expected: op.arity(),
        found: ValueShape::of(item.value.as_ref()),
    }
}
