// =============================================================================
// Application Identity
// =============================================================================

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "labelsql";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".labelsql";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "labelsql.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "LABELSQL_CONFIG";

// =============================================================================
// Environment Variables - Server
// =============================================================================

/// Environment variable for server host
pub const ENV_HOST: &str = "LABELSQL_HOST";

/// Environment variable for server port
pub const ENV_PORT: &str = "LABELSQL_PORT";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "LABELSQL_LOG";

// =============================================================================
// Environment Variables - Query
// =============================================================================

/// Environment variable for the SQL dialect (`clickhouse` or `duckdb`)
pub const ENV_DIALECT: &str = "LABELSQL_DIALECT";

/// Environment variable for the time-series database name
pub const ENV_DATABASE: &str = "LABELSQL_DATABASE";

/// Environment variable for the time-series table name
pub const ENV_TABLE: &str = "LABELSQL_TABLE";

/// Environment variable for the per-request filter item limit
pub const ENV_MAX_FILTER_ITEMS: &str = "LABELSQL_MAX_FILTER_ITEMS";

// =============================================================================
// Server Defaults
// =============================================================================

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 5390;

/// Request body limit for the HTTP API (filter bodies are capped separately)
pub const DEFAULT_BODY_LIMIT: usize = 256 * 1024;

// =============================================================================
// Query Defaults
// =============================================================================

/// Default database holding the time-series table
pub const DEFAULT_DATABASE: &str = "signoz_metrics";

/// Default time-series table
pub const DEFAULT_TABLE: &str = "distributed_time_series_v2";
