use std::time::Duration;

use migration::migrate_up;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::error::AppError;

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Open the pool for `database_url`. Does NOT run migrations.
///
/// In-memory SQLite databases live and die with a single connection, so the
/// pool is pinned to one connection that is never reaped.
pub async fn connect_db(database_url: &str) -> Result<DatabaseConnection, AppError> {
    let mut opt = ConnectOptions::new(database_url.to_owned());
    opt.acquire_timeout(Duration::from_secs(5)).sqlx_logging(false);

    if is_in_memory(database_url) {
        opt.min_connections(1)
            .max_connections(1)
            .idle_timeout(Duration::from_secs(u32::MAX as u64))
            .max_lifetime(Duration::from_secs(u32::MAX as u64));
    } else {
        opt.max_connections(5);
    }

    Database::connect(opt)
        .await
        .map_err(|e| AppError::config(format!("failed to connect to database: {e}")))
}

/// Connect and bring the schema up to date (idempotent).
pub async fn bootstrap_db(database_url: &str) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(database_url).await?;
    migrate_up(&conn)
        .await
        .map_err(|e| AppError::config(format!("failed to apply migrations: {e}")))?;
    info!(in_memory = is_in_memory(database_url), "database ready");
    Ok(conn)
}
