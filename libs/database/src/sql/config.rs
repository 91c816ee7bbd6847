use sea_orm::ConnectOptions;
use std::fmt;
use std::time::Duration;

use crate::common::DatabaseError;

#[cfg(feature = "config")]
use core_config::{env_or_default, env_parse, env_required, ConfigError, FromEnv};

/// Storage engine selected by the connection URL scheme
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Engine {
    /// Embedded file-backed (or in-memory) store
    Sqlite,
    /// Networked PostgreSQL server
    Postgres,
}

impl Engine {
    /// Detects the engine from a connection URL.
    pub fn from_url(url: &str) -> Result<Self, DatabaseError> {
        let scheme = url.split(':').next().unwrap_or_default();
        match scheme {
            "sqlite" => Ok(Engine::Sqlite),
            "postgres" | "postgresql" => Ok(Engine::Postgres),
            other => Err(DatabaseError::ConfigError(format!(
                "unsupported database scheme '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Engine::Sqlite => f.write_str("sqlite"),
            Engine::Postgres => f.write_str("postgres"),
        }
    }
}

/// Connection pool configuration
///
/// # Example
///
/// ```ignore
/// use database::sql::SqlConfig;
///
/// let config = SqlConfig::new("sqlite://ecommerce.db?mode=rwc")?;
/// let options = config.into_connect_options();
/// ```
#[derive(Clone, Debug)]
pub struct SqlConfig {
    /// Database connection URL (required)
    pub url: String,

    /// Engine derived from `url`
    pub engine: Engine,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Connection acquire timeout in seconds
    pub acquire_timeout_secs: u64,

    /// Connection idle timeout in seconds
    pub idle_timeout_secs: u64,

    /// Connection max lifetime in seconds
    pub max_lifetime_secs: u64,

    /// Log every statement through sqlx
    pub sqlx_logging: bool,
}

impl SqlConfig {
    /// Builds a config with pool defaults suited to the URL's engine.
    ///
    /// SQLite gets a single connection: in-memory databases are per
    /// connection, and file databases serialize writers anyway.
    pub fn new(url: impl Into<String>) -> Result<Self, DatabaseError> {
        let url = url.into();
        let engine = Engine::from_url(&url)?;
        let (max_connections, min_connections) = match engine {
            Engine::Sqlite => (1, 1),
            Engine::Postgres => (20, 2),
        };

        Ok(Self {
            url,
            engine,
            max_connections,
            min_connections,
            connect_timeout_secs: 8,
            acquire_timeout_secs: 8,
            idle_timeout_secs: 300,
            max_lifetime_secs: 1800,
            sqlx_logging: false,
        })
    }

    /// Whether the URL names an in-memory SQLite database
    pub fn is_in_memory(&self) -> bool {
        self.engine == Engine::Sqlite
            && (self.url.contains(":memory:") || self.url.contains("mode=memory"))
    }

    /// Pins an in-memory SQLite pool to one connection. Each extra
    /// connection would open its own empty database.
    fn pin_in_memory_pool(mut self) -> Self {
        if self.is_in_memory() && (self.max_connections != 1 || self.min_connections != 1) {
            tracing::warn!(
                max_connections = self.max_connections,
                min_connections = self.min_connections,
                "In-memory SQLite supports a single connection, ignoring pool size"
            );
            self.max_connections = 1;
            self.min_connections = 1;
        }
        self
    }

    /// Convert this config into SeaORM ConnectOptions
    pub fn into_connect_options(self) -> ConnectOptions {
        let config = self.pin_in_memory_pool();
        let mut opt = ConnectOptions::new(config.url);
        opt.max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .sqlx_logging(config.sqlx_logging);

        // An in-memory SQLite database lives only as long as its connection.
        if config.engine == Engine::Postgres {
            opt.idle_timeout(Duration::from_secs(config.idle_timeout_secs))
                .max_lifetime(Duration::from_secs(config.max_lifetime_secs));
        }
        opt
    }

    /// Get a reference to the database URL
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Load SqlConfig from environment variables
///
/// - `DATABASE_URL` (required) - `sqlite://...` or `postgres://...`
/// - `DB_MAX_CONNECTIONS`, `DB_MIN_CONNECTIONS` (optional, engine defaults)
/// - `DB_CONNECT_TIMEOUT_SECS`, `DB_ACQUIRE_TIMEOUT_SECS` (optional, default: 8)
/// - `DB_IDLE_TIMEOUT_SECS` (optional, default: 300)
/// - `DB_MAX_LIFETIME_SECS` (optional, default: 1800)
/// - `DB_SQLX_LOGGING` (optional, default: false)
#[cfg(feature = "config")]
impl FromEnv for SqlConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = env_required("DATABASE_URL")?;
        let defaults = SqlConfig::new(url).map_err(|e| ConfigError::InvalidValue {
            key: "DATABASE_URL".to_string(),
            details: e.to_string(),
        })?;

        let config = Self {
            max_connections: env_parse(
                "DB_MAX_CONNECTIONS",
                &defaults.max_connections.to_string(),
            )?,
            min_connections: env_parse(
                "DB_MIN_CONNECTIONS",
                &defaults.min_connections.to_string(),
            )?,
            connect_timeout_secs: env_parse("DB_CONNECT_TIMEOUT_SECS", "8")?,
            acquire_timeout_secs: env_parse("DB_ACQUIRE_TIMEOUT_SECS", "8")?,
            idle_timeout_secs: env_parse("DB_IDLE_TIMEOUT_SECS", "300")?,
            max_lifetime_secs: env_parse("DB_MAX_LIFETIME_SECS", "1800")?,
            sqlx_logging: env_or_default("DB_SQLX_LOGGING", "false")
                .parse()
                .map_err(|e: std::str::ParseBoolError| ConfigError::ParseError {
                    key: "DB_SQLX_LOGGING".to_string(),
                    details: e.to_string(),
                })?,
            ..defaults
        };
        Ok(config.pin_in_memory_pool())
    }
}
