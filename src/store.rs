//! SQLite connection setup and table DDL.

use crate::model::{Book, Pet};
use crate::record::Record;
use crate::sql;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// URL used by tests and ephemeral runs.
pub const MEMORY_DATABASE_URL: &str = "sqlite::memory:";

fn is_memory_url(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Open a pool for `database_url`, creating the database file if it does not exist.
/// In-memory databases live only as long as their connection, so they get exactly one that never expires.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = if is_memory_url(database_url) {
        SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await?
    };
    tracing::info!(database_url = %database_url, "database connected");
    Ok(pool)
}

pub async fn connect_memory() -> Result<SqlitePool, sqlx::Error> {
    connect(MEMORY_DATABASE_URL, 1).await
}

async fn ensure_table<R: Record>(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let ddl = sql::create_table::<R>();
    tracing::debug!(table = R::TABLE, sql = %ddl, "ensure table");
    sqlx::query(&ddl).execute(pool).await?;
    Ok(())
}

/// Create the `pets` and `books` tables if they do not exist.
pub async fn ensure_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    ensure_table::<Pet>(pool).await?;
    ensure_table::<Book>(pool).await?;
    Ok(())
}

/// Cheap liveness probe for the readiness route.
pub async fn ping(pool: &SqlitePool) -> bool {
    sqlx::query("SELECT 1").fetch_optional(pool).await.is_ok()
}
