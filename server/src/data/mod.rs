//! Data layer
//!
//! - `filters` - Label filter compilation into SQL predicates
//! - `sql` - SQL dialects for the supported time-series stores

pub mod filters;
pub mod sql;
