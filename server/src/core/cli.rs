use clap::{Parser, Subcommand};

use std::path::PathBuf;

use crate::data::filters::AggregateOperator;
use crate::data::sql::Backend;

use super::constants::{
    ENV_CONFIG, ENV_DATABASE, ENV_DIALECT, ENV_HOST, ENV_MAX_FILTER_ITEMS, ENV_PORT, ENV_TABLE,
};

#[derive(Parser)]
#[command(name = "labelsql")]
#[command(version, about = "Label filter to SQL predicate compiler", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Server host address
    #[arg(long, short = 'H', global = true, env = ENV_HOST)]
    pub host: Option<String>,

    /// Server port
    #[arg(long, short = 'p', global = true, env = ENV_PORT)]
    pub port: Option<u16>,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// SQL dialect (clickhouse or duckdb)
    #[arg(long, global = true, env = ENV_DIALECT, value_parser = parse_backend)]
    pub dialect: Option<Backend>,

    /// Database holding the time-series table
    #[arg(long, global = true, env = ENV_DATABASE)]
    pub database: Option<String>,

    /// Time-series table name
    #[arg(long, global = true, env = ENV_TABLE)]
    pub table: Option<String>,

    /// Maximum number of items per filter set
    #[arg(long, global = true, env = ENV_MAX_FILTER_ITEMS)]
    pub max_filter_items: Option<usize>,
}

/// Parse SQL dialect from CLI/env string
fn parse_backend(s: &str) -> Result<Backend, String> {
    match s.to_lowercase().as_str() {
        "clickhouse" => Ok(Backend::Clickhouse),
        "duckdb" => Ok(Backend::Duckdb),
        _ => Err(format!(
            "Invalid dialect '{}'. Valid options: clickhouse, duckdb",
            s
        )),
    }
}

/// Parse aggregation kind (e.g. `SUM_RATE`, `hist_quantile_90`)
fn parse_aggregation(s: &str) -> Result<AggregateOperator, String> {
    let token = s.trim().to_ascii_uppercase();
    serde_json::from_value(serde_json::Value::String(token))
        .map_err(|_| format!("Invalid aggregation '{}'", s))
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Start the server (default command)
    Start,
    /// Compile a filter set and print the predicate
    Compile {
        /// Filter JSON file (reads stdin when omitted or `-`)
        file: Option<PathBuf>,

        /// Metric the predicate is scoped to
        #[arg(long, short = 'm')]
        metric: String,

        /// Aggregation kind of the enclosing query
        #[arg(long, short = 'a', value_parser = parse_aggregation, default_value = "NOOP")]
        aggregation: AggregateOperator,

        /// Label key to skip (repeatable)
        #[arg(long = "exclude", short = 'x')]
        exclude: Vec<String>,

        /// Group-by tag projected by the sub-query (repeatable)
        #[arg(long = "group-by", short = 'g')]
        group_by: Vec<String>,

        /// Print the time-series sub-query instead of the bare predicate
        #[arg(long)]
        query: bool,
    },
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub config: Option<PathBuf>,
    pub dialect: Option<Backend>,
    pub database: Option<String>,
    pub table: Option<String>,
    pub max_filter_items: Option<usize>,
}

/// Parse CLI arguments and return config with command
pub fn parse() -> (CliConfig, Option<Commands>) {
    let cli = Cli::parse();
    let config = CliConfig {
        host: cli.host,
        port: cli.port,
        config: cli.config,
        dialect: cli.dialect,
        database: cli.database,
        table: cli.table,
        max_filter_items: cli.max_filter_items,
    };
    (config, cli.command)
}
