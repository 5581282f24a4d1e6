//! In-memory [`CatalogStore`] implementation for testing.
//!
//! Rows live in a `Vec` behind `std::sync::RwLock`, kept in insertion order.
//! Before the first [`reset`](CatalogStore::reset) the relation does not
//! exist and reads fail, like a fresh SQLite database.

use std::sync::RwLock;

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;

use crate::filter::FilterSet;
use crate::models::FlatRow;

use super::CatalogStore;

#[derive(Default)]
pub struct InMemoryStore {
    rows: RwLock<Option<Vec<FlatRow>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> anyhow::Error {
    anyhow!("in-memory store lock poisoned")
}

#[async_trait]
impl CatalogStore for InMemoryStore {
    async fn reset(&self) -> Result<()> {
        *self.rows.write().map_err(poisoned)? = Some(Vec::new());
        Ok(())
    }

    async fn insert(&self, row: &FlatRow) -> Result<()> {
        let mut guard = self.rows.write().map_err(poisoned)?;
        let rows = guard.as_mut().ok_or_else(|| anyhow!("no such table"))?;
        if rows.iter().any(|r| r.id == row.id) {
            bail!("UNIQUE constraint failed: id {}", row.id);
        }
        rows.push(row.clone());
        Ok(())
    }

    async fn list(&self, filters: &FilterSet) -> Result<Vec<FlatRow>> {
        let guard = self.rows.read().map_err(poisoned)?;
        let rows = guard.as_ref().ok_or_else(|| anyhow!("no such table"))?;
        Ok(rows.iter().filter(|r| filters.matches(r)).cloned().collect())
    }

    async fn get(&self, id: i64) -> Result<Option<FlatRow>> {
        let guard = self.rows.read().map_err(poisoned)?;
        let rows = guard.as_ref().ok_or_else(|| anyhow!("no such table"))?;
        Ok(rows.iter().find(|r| r.id == id).cloned())
    }
}
