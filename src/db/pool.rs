//! Postgres connection pool construction.

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use sqlx::ConnectOptions;

use crate::config::Config;

/// Connection options built from the config alone.
///
/// Credentials left unset in the config fall back to the driver defaults.
pub fn connect_options(config: &Config) -> PgConnectOptions {
    let mut options = PgConnectOptions::new()
        .host(config.database_host())
        .port(config.database_port());

    if let Some(user) = &config.postgres_user {
        options = options.username(user);
    }
    if let Some(password) = &config.postgres_password {
        options = options.password(password);
    }
    if let Some(database) = &config.postgres_db {
        options = options.database(database);
    }

    options.disable_statement_logging()
}

/// Create a lazily connecting pool.
///
/// No connection is attempted here, so an unreachable database never stops
/// the service from starting. Must be called inside a Tokio runtime.
pub fn build_pool(config: &Config) -> PgPool {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .min_connections(config.db_min_connections)
        .acquire_timeout(config.probe_timeout())
        .connect_lazy_with(connect_options(config))
}
