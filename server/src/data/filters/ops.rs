//! Operator vocabulary
//!
//! The closed set of comparison operators a filter item may use, and the
//! value shape each one expects. Tokens arriving from clients are matched
//! against [`OPERATOR_TOKENS`]; anything else is rejected.

use std::fmt;

/// Comparison operator applied to a single label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOp {
    Eq,
    Neq,
    In,
    NotIn,
    Like,
    NotLike,
    Match,
    NotMatch,
    Exists,
    NotExists,
}

/// Value shape an operator expects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly one string
    Scalar,
    /// A non-empty ordered list of strings
    List,
    /// No value at all
    Nullary,
}

/// Accepted client tokens (matched case-insensitively), including legacy aliases
pub const OPERATOR_TOKENS: &[(&str, FilterOp)] = &[
    ("EQ", FilterOp::Eq),
    ("NEQ", FilterOp::Neq),
    ("IN", FilterOp::In),
    ("NOT_IN", FilterOp::NotIn),
    ("NIN", FilterOp::NotIn),
    ("LIKE", FilterOp::Like),
    ("NOT_LIKE", FilterOp::NotLike),
    ("NLIKE", FilterOp::NotLike),
    ("MATCH", FilterOp::Match),
    ("NOT_MATCH", FilterOp::NotMatch),
    ("NMATCH", FilterOp::NotMatch),
    ("EXISTS", FilterOp::Exists),
    ("NOT_EXISTS", FilterOp::NotExists),
    ("NEXISTS", FilterOp::NotExists),
];

impl FilterOp {
    pub const ALL: [FilterOp; 10] = [
        FilterOp::Eq,
        FilterOp::Neq,
        FilterOp::In,
        FilterOp::NotIn,
        FilterOp::Like,
        FilterOp::NotLike,
        FilterOp::Match,
        FilterOp::NotMatch,
        FilterOp::Exists,
        FilterOp::NotExists,
    ];

    /// Look up a client token. Returns `None` for anything outside the vocabulary.
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        OPERATOR_TOKENS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(token))
            .map(|(_, op)| *op)
    }

    /// Canonical token
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOp::Eq => "EQ",
            FilterOp::Neq => "NEQ",
            FilterOp::In => "IN",
            FilterOp::NotIn => "NOT_IN",
            FilterOp::Like => "LIKE",
            FilterOp::NotLike => "NOT_LIKE",
            FilterOp::Match => "MATCH",
            FilterOp::NotMatch => "NOT_MATCH",
            FilterOp::Exists => "EXISTS",
            FilterOp::NotExists => "NOT_EXISTS",
        }
    }

    pub fn arity(&self) -> Arity {
        match self {
            FilterOp::Eq
            | FilterOp::Neq
            | FilterOp::Like
            | FilterOp::NotLike
            | FilterOp::Match
            | FilterOp::NotMatch => Arity::Scalar,
            FilterOp::In | FilterOp::NotIn => Arity::List,
            FilterOp::Exists | FilterOp::NotExists => Arity::Nullary,
        }
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Scalar => write!(f, "a single value"),
            Arity::List => write!(f, "a non-empty list"),
            Arity::Nullary => write!(f, "no value"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_canonical_tokens() {
        for op in FilterOp::ALL {
            assert_eq!(FilterOp::parse(op.as_str()), Some(op));
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(FilterOp::parse("eq"), Some(FilterOp::Eq));
        assert_eq!(FilterOp::parse("Not_In"), Some(FilterOp::NotIn));
        assert_eq!(FilterOp::parse(" in "), Some(FilterOp::In));
    }

    #[test]
    fn parse_legacy_aliases() {
        assert_eq!(FilterOp::parse("nin"), Some(FilterOp::NotIn));
        assert_eq!(FilterOp::parse("nlike"), Some(FilterOp::NotLike));
        assert_eq!(FilterOp::parse("nmatch"), Some(FilterOp::NotMatch));
        assert_eq!(FilterOp::parse("NEXISTS"), Some(FilterOp::NotExists));
    }

    #[test]
    fn parse_unknown_token() {
        assert_eq!(FilterOp::parse("PO"), None);
        assert_eq!(FilterOp::parse(""), None);
        assert_eq!(FilterOp::parse("GT"), None);
        assert_eq!(FilterOp::parse("EQ EQ"), None);
    }

    #[test]
    fn every_operator_has_a_token() {
        for op in FilterOp::ALL {
            assert!(
                OPERATOR_TOKENS.iter().any(|(_, o)| *o == op),
                "{} missing from OPERATOR_TOKENS",
                op
            );
        }
    }

    #[test]
    fn arity_classes() {
        assert_eq!(FilterOp::Eq.arity(), Arity::Scalar);
        assert_eq!(FilterOp::NotLike.arity(), Arity::Scalar);
        assert_eq!(FilterOp::In.arity(), Arity::List);
        assert_eq!(FilterOp::NotIn.arity(), Arity::List);
        assert_eq!(FilterOp::Exists.arity(), Arity::Nullary);
    }
}
