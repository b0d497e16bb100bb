//! SQL abstraction layer for multi-database support
//!
//! This module provides abstractions for generating label predicates that work
//! across the supported time-series stores (ClickHouse, DuckDB).

mod clickhouse_dialect;
mod dialect;
mod duckdb_dialect;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use clickhouse_dialect::ClickhouseDialect;
pub use dialect::SqlDialect;
pub use duckdb_dialect::DuckdbDialect;

/// Database backend identifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Clickhouse,
    Duckdb,
}

impl Backend {
    /// Get the SQL dialect for this backend
    pub fn dialect(&self) -> &'static dyn SqlDialect {
        match self {
            Backend::Clickhouse => &ClickhouseDialect,
            Backend::Duckdb => &DuckdbDialect,
        }
    }

    /// Get the backend name
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Clickhouse => "clickhouse",
            Backend::Duckdb => "duckdb",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
