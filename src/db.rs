use std::time::Duration;

use anyhow::Context;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Maximum number of pooled connections to the database
const MAX_CONNECTIONS: u32 = 20;
/// How long a request waits for a free pooled connection before giving up
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(2);

/// Opens a connection pool to the PostgreSQL database at [db_url]
pub async fn connect_sqlx(db_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(db_url)
        .await
}

/// Applies the SQL migrations under `migrations/` which haven't been run against the database yet
pub async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    sqlx::migrate!()
        .run(pool)
        .await
        .context("applying database migrations")?;

    Ok(())
}
