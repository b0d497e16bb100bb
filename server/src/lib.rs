//! Label filter compiler and HTTP service
//!
//! Compiles boolean filters over series labels into SQL predicates for
//! ClickHouse or DuckDB time-series tables.

pub mod api;
mod app;
pub mod core;
pub mod data;
pub mod utils;
