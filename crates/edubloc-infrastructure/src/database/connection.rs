//! Database connection construction
//!
//! All tenant databases share one PostgreSQL host and credentials;
//! only the database name differs. The central registry pool is the
//! one eagerly-connected, process-lifetime resource.

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

use edubloc_shared::config::DatabaseSettings;

/// Connect options for one named database on the shared host.
pub fn connect_options(settings: &DatabaseSettings, database: &str) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&settings.host)
        .port(settings.port)
        .username(&settings.username)
        .password(&settings.password)
        .database(database)
}

/// Eagerly connect the central registry pool.
pub async fn create_central_pool(settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(Duration::from_secs(3))
        .connect_with(connect_options(settings, &settings.central_database))
        .await
}

/// Build a tenant pool without touching the network. Connections are
/// opened on first use; validation happens in the connection manager.
pub fn lazy_tenant_pool(settings: &DatabaseSettings, database: &str) -> PgPool {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .connect_lazy_with(connect_options(settings, database))
}
