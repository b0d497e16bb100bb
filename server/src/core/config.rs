use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::data::filters::{DEFAULT_MAX_FILTER_ITEMS, ImplicitPredicates, TimeSeriesTable};
use crate::data::sql::Backend;
use crate::utils::file::expand_path;

use super::cli::CliConfig;
use super::constants::{
    APP_DOT_FOLDER, CONFIG_FILE_NAME, DEFAULT_DATABASE, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_TABLE,
};

// =============================================================================
// File Config Structs (JSON file sections, every field optional)
// =============================================================================

/// Server section of the config file
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ServerFileConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Query section of the config file
#[derive(Debug, Default, Clone, Deserialize)]
pub struct QueryFileConfig {
    pub dialect: Option<Backend>,
    pub database: Option<String>,
    pub table: Option<String>,
    pub max_filter_items: Option<usize>,
    /// Replaces the built-in implicit predicate table when present
    pub implicit_predicates: Option<ImplicitPredicates>,
}

/// File-based configuration (JSON)
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub server: Option<ServerFileConfig>,
    pub query: Option<QueryFileConfig>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl FileConfig {
    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::trace!(config = ?config, "Parsed config file");
        Ok(config)
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        if let serde_json::Value::Object(map) = &self.extra
            && !map.is_empty()
        {
            let keys_str: String = map
                .keys()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!(
                fields = %keys_str,
                "Unknown fields in config file (possible typos)"
            );
        }
    }

    /// Merge another FileConfig into this one (other takes precedence)
    fn merge(&mut self, other: FileConfig) {
        if let Some(server) = other.server {
            let current = self.server.get_or_insert_with(ServerFileConfig::default);
            if server.host.is_some() {
                tracing::trace!(host = ?server.host, "Merging server.host");
                current.host = server.host;
            }
            if server.port.is_some() {
                tracing::trace!(port = ?server.port, "Merging server.port");
                current.port = server.port;
            }
        }

        if let Some(query) = other.query {
            let current = self.query.get_or_insert_with(QueryFileConfig::default);
            if query.dialect.is_some() {
                tracing::trace!(dialect = ?query.dialect, "Merging query.dialect");
                current.dialect = query.dialect;
            }
            if query.database.is_some() {
                tracing::trace!(database = ?query.database, "Merging query.database");
                current.database = query.database;
            }
            if query.table.is_some() {
                tracing::trace!(table = ?query.table, "Merging query.table");
                current.table = query.table;
            }
            if query.max_filter_items.is_some() {
                tracing::trace!(
                    max_filter_items = ?query.max_filter_items,
                    "Merging query.max_filter_items"
                );
                current.max_filter_items = query.max_filter_items;
            }
            if query.implicit_predicates.is_some() {
                tracing::trace!("Merging query.implicit_predicates");
                current.implicit_predicates = query.implicit_predicates;
            }
        }
    }
}

// =============================================================================
// Runtime Config Structs (final merged configuration)
// =============================================================================

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Filter compilation configuration
#[derive(Debug, Clone)]
pub struct QueryConfig {
    pub backend: Backend,
    pub table: TimeSeriesTable,
    pub max_filter_items: usize,
    pub implicit_predicates: ImplicitPredicates,
}

/// Final merged application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub query: QueryConfig,
}

impl AppConfig {
    /// Load configuration from all sources
    ///
    /// Priority (lowest to highest):
    /// 1. Defaults
    /// 2. Profile directory config (~/.labelsql/labelsql.json)
    /// 3. Local directory config OR CLI-specified config path
    /// 4. CLI arguments (which include env var fallbacks via clap)
    pub fn load(cli: &CliConfig) -> Result<Self> {
        tracing::debug!("Loading application configuration");
        tracing::trace!(cli = ?cli, "CLI config");

        let mut file_config = FileConfig::default();
        let mut found_configs: Vec<String> = Vec::new();

        // Overlay path: CLI-specified OR local directory (checked before any file is read)
        let overlay_path = if let Some(ref path) = cli.config {
            let expanded = expand_path(&path.to_string_lossy());
            if !expanded.exists() {
                anyhow::bail!("Config file not found: {}", expanded.display());
            }
            Some(expanded)
        } else {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() { Some(local) } else { None }
        };

        // 1. Load from profile dir (~/.labelsql/labelsql.json) - skip if not exists
        if let Some(profile_path) = get_profile_config_path()
            && profile_path.exists()
        {
            let profile_config = FileConfig::load_from_file(&profile_path)?;
            profile_config.warn_unknown_fields();
            file_config.merge(profile_config);
            found_configs.push(profile_path.display().to_string());
        }

        // 2. Overlay CLI-specified or local config
        if let Some(path) = overlay_path {
            let overlay_config = FileConfig::load_from_file(&path)?;
            overlay_config.warn_unknown_fields();
            file_config.merge(overlay_config);
            found_configs.push(path.display().to_string());
        }

        tracing::debug!(configs = ?found_configs, "Config files loaded");

        let config = Self::resolve(cli, file_config)?;
        tracing::debug!(
            host = %config.server.host,
            port = config.server.port,
            dialect = %config.query.backend,
            database = %config.query.table.database,
            table = %config.query.table.table,
            max_filter_items = config.query.max_filter_items,
            implicit_rules = config.query.implicit_predicates.rules().len(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Layer configs: defaults -> file config -> CLI/env overrides
    pub(crate) fn resolve(cli: &CliConfig, file_config: FileConfig) -> Result<Self> {
        let file_server = file_config.server.unwrap_or_default();
        let file_query = file_config.query.unwrap_or_default();

        let host = cli
            .host
            .clone()
            .or(file_server.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = cli.port.or(file_server.port).unwrap_or(DEFAULT_PORT);

        let backend = cli.dialect.or(file_query.dialect).unwrap_or_default();
        let database = cli
            .database
            .clone()
            .or(file_query.database)
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());
        let table = cli
            .table
            .clone()
            .or(file_query.table)
            .unwrap_or_else(|| DEFAULT_TABLE.to_string());

        let max_filter_items = cli
            .max_filter_items
            .or(file_query.max_filter_items)
            .unwrap_or(DEFAULT_MAX_FILTER_ITEMS);
        if max_filter_items == 0 {
            anyhow::bail!("query.max_filter_items must be greater than zero");
        }

        let implicit_predicates = file_query.implicit_predicates.unwrap_or_default();
        implicit_predicates
            .validate()
            .context("Invalid query.implicit_predicates")?;

        Ok(Self {
            server: ServerConfig { host, port },
            query: QueryConfig {
                backend,
                table: TimeSeriesTable::new(database, table),
                max_filter_items,
                implicit_predicates,
            },
        })
    }
}

/// Get the profile config path (~/.labelsql/labelsql.json)
fn get_profile_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(APP_DOT_FOLDER).join(CONFIG_FILE_NAME))
}
