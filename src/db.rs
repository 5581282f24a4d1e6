//! SQLite connection setup.

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

use crate::config::Config;
use crate::sqlite_store::SqliteStore;

/// Concurrent migration inserts queue on SQLite's single writer lock.
const BUSY_TIMEOUT: Duration = Duration::from_secs(30);

pub async fn connect(config: &Config) -> Result<SqlitePool> {
    let db_path = &config.db.path;

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create database directory: {}", parent.display())
        })?;
    }

    let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", db_path.display()))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .with_context(|| format!("Failed to open database: {}", db_path.display()))?;

    tracing::debug!(path = %db_path.display(), "connected to catalog database");
    Ok(pool)
}

/// Connects and wraps the pool in a [`SqliteStore`] for the configured table.
pub async fn open_store(config: &Config) -> Result<SqliteStore> {
    let pool = connect(config).await?;
    Ok(SqliteStore::new(pool, config.db.table.clone()))
}
