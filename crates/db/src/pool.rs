//! Postgres connection pool.
//!
//! The repository only ever receives an open pool; this module is the glue
//! that builds one for binaries and tests.

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use tracing::info;

use crate::DbError;

/// Type alias for the shared Postgres pool handed to the repository.
pub type DbPool = PgPool;

/// Open a pool with the given connect options and check that a connection
/// can actually be made.
///
/// `max_connections` controls the pool ceiling.
pub async fn create_pool(options: PgConnectOptions, max_connections: u32) -> Result<DbPool, DbError> {
    info!(
        host = options.get_host(),
        port = options.get_port(),
        database = options.get_database().unwrap_or_default(),
        "Connecting to database (max_connections={})",
        max_connections
    );
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .map_err(DbError::Connect)?;
    Ok(pool)
}
