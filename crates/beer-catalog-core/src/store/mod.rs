//! Storage abstraction for the catalog table.
//!
//! The [`CatalogStore`] trait is the seam between the store-agnostic
//! migrator/repository and a concrete backend (SQLite in the application
//! crate, [`memory::InMemoryStore`] for tests).
//!
//! Implementations must be `Send + Sync` to work with async runtimes.

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;

use crate::filter::FilterSet;
use crate::models::FlatRow;

/// Abstract storage backend for the flat catalog relation.
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`reset`](CatalogStore::reset) | Drop the relation if present and recreate it empty |
/// | [`insert`](CatalogStore::insert) | Insert one row; fails on duplicate id |
/// | [`list`](CatalogStore::list) | All rows matching the filters, storage order |
/// | [`get`](CatalogStore::get) | One row by primary key |
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn reset(&self) -> Result<()>;

    async fn insert(&self, row: &FlatRow) -> Result<()>;

    /// Fails if the relation does not exist.
    async fn list(&self, filters: &FilterSet) -> Result<Vec<FlatRow>>;

    /// `Ok(None)` when the relation exists but has no such id.
    async fn get(&self, id: i64) -> Result<Option<FlatRow>>;
}
