//! Application configuration loaded from environment variables.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::error::AppError;

/// Application configuration loaded from environment variables.
///
/// Loaded once at startup and handed to the pool builder and the router.
/// Nothing downstream reads the environment directly.
#[derive(Clone, Deserialize)]
pub struct Config {
    // === Database Credentials ===
    /// Database user.
    #[serde(default)]
    pub postgres_user: Option<String>,

    /// Database password.
    #[serde(default)]
    pub postgres_password: Option<String>,

    /// Database name.
    #[serde(default)]
    pub postgres_db: Option<String>,

    // === Database Location ===
    /// Database host.
    #[serde(default)]
    pub db_host: Option<String>,

    /// Libpq-style host, used when `DB_HOST` is unset.
    #[serde(default)]
    pub pghost: Option<String>,

    /// Database port.
    #[serde(default)]
    pub db_port: Option<u16>,

    /// Libpq-style port, used when `DB_PORT` is unset.
    #[serde(default)]
    pub pgport: Option<u16>,

    // === Pool Tuning ===
    /// Upper bound on pooled connections.
    #[serde(default = "default_max_connections")]
    pub db_max_connections: u32,

    /// Connections kept open while idle.
    #[serde(default = "default_min_connections")]
    pub db_min_connections: u32,

    /// Bound on a single health probe, in milliseconds.
    #[serde(default = "default_probe_timeout_ms")]
    pub db_probe_timeout_ms: u64,

    // === Server Configuration ===
    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Prometheus exporter port. The exporter is off when unset.
    #[serde(default)]
    pub metrics_port: Option<u16>,

    /// Log level announced at startup.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Host used when neither `DB_HOST` nor `PGHOST` is set.
pub const DEFAULT_DB_HOST: &str = "localhost";

/// Port used when neither `DB_PORT` nor `PGPORT` is set.
pub const DEFAULT_DB_PORT: u16 = 5432;

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_probe_timeout_ms() -> u64 {
    5000
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load from the environment and validate in one step.
    pub fn load_validated() -> crate::Result<Self> {
        let config = Self::load()?;
        config.validate().map_err(AppError::InvalidConfig)?;
        Ok(config)
    }

    /// Build configuration from an explicit set of variables.
    ///
    /// Empty values count as unset, so `DB_PORT=` falls back to the default.
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars.into_iter().filter(|(_, value)| !value.is_empty()))
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("PORT must be non-zero".to_string());
        }

        if self.db_max_connections == 0 {
            return Err("DB_MAX_CONNECTIONS must be at least 1".to_string());
        }

        if self.db_min_connections > self.db_max_connections {
            return Err(format!(
                "DB_MIN_CONNECTIONS ({}) exceeds DB_MAX_CONNECTIONS ({})",
                self.db_min_connections, self.db_max_connections
            ));
        }

        if self.db_probe_timeout_ms == 0 {
            return Err("DB_PROBE_TIMEOUT_MS must be non-zero".to_string());
        }

        if self.metrics_port == Some(self.port) {
            return Err("METRICS_PORT must differ from PORT".to_string());
        }

        Ok(())
    }

    /// Effective database host.
    pub fn database_host(&self) -> &str {
        self.db_host
            .as_deref()
            .or(self.pghost.as_deref())
            .unwrap_or(DEFAULT_DB_HOST)
    }

    /// Effective database port.
    pub fn database_port(&self) -> u16 {
        self.db_port.or(self.pgport).unwrap_or(DEFAULT_DB_PORT)
    }

    /// Probe timeout as a [`Duration`].
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.db_probe_timeout_ms)
    }

    /// Connection target without credentials, for logs.
    pub fn database_target(&self) -> String {
        format!(
            "{}:{}/{}",
            self.database_host(),
            self.database_port(),
            self.postgres_db.as_deref().unwrap_or("")
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            postgres_user: None,
            postgres_password: None,
            postgres_db: None,
            db_host: None,
            pghost: None,
            db_port: None,
            pgport: None,
            db_max_connections: default_max_connections(),
            db_min_connections: default_min_connections(),
            db_probe_timeout_ms: default_probe_timeout_ms(),
            port: default_port(),
            metrics_port: None,
            log_level: default_log_level(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("postgres_user", &self.postgres_user)
            .field(
                "postgres_password",
                &self.postgres_password.as_ref().map(|_| "<redacted>"),
            )
            .field("postgres_db", &self.postgres_db)
            .field("db_host", &self.database_host())
            .field("db_port", &self.database_port())
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_probe_timeout_ms", &self.db_probe_timeout_ms)
            .field("port", &self.port)
            .field("metrics_port", &self.metrics_port)
            .field("log_level", &self.log_level)
            .finish()
    }
}
