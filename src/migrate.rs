//! Catalog rebuild from the document source.
//!
//! Scans `[source].root`, then hands the documents to
//! [`beer_catalog_core::migrate::rebuild`], which drops and recreates the
//! catalog table and loads every row. Used by `beers migrate` and at the
//! start of `beers serve`.

use anyhow::Result;

use beer_catalog_core::migrate::{rebuild, MigrationReport};

use crate::config::Config;
use crate::connector_fs;
use crate::db;
use crate::sqlite_store::SqliteStore;

/// Rebuilds the catalog table behind `store` from the configured source.
pub async fn migrate_catalog(config: &Config, store: &SqliteStore) -> Result<MigrationReport> {
    let docs = connector_fs::scan_documents(config)?;
    tracing::info!(
        table = %config.db.table,
        documents = docs.len(),
        concurrency = config.migration.concurrency,
        "rebuilding catalog"
    );
    rebuild(store, docs, config.migration.concurrency).await
}

/// CLI entry point for `beers migrate`.
pub async fn run_migrate(config: &Config) -> Result<()> {
    let store = db::open_store(config).await?;
    let report = migrate_catalog(config, &store).await;
    store.close().await;
    let report = report?;

    println!("migrate {}", config.db.table);
    println!("  attempted: {}", report.attempted);
    println!("  succeeded: {}", report.succeeded);
    println!("  failed: {}", report.failed_count());
    for failure in &report.failed {
        match failure.id {
            Some(id) => println!("    {} (id {}): {}", failure.origin, id, failure.cause),
            None => println!("    {}: {}", failure.origin, failure.cause),
        }
    }
    println!("ok");

    Ok(())
}
