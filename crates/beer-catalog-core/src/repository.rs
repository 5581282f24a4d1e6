//! Read-side access to the catalog.
//!
//! [`CatalogRepository`] wraps a [`CatalogStore`] and gives callers a typed
//! split between "no such beer" ([`CatalogError::NotFound`]) and "the query
//! failed" ([`CatalogError::Storage`]). Rows from [`list`](CatalogRepository::list)
//! come back in storage order; no ordering is guaranteed.

use std::sync::Arc;

use crate::error::CatalogError;
use crate::filter::FilterSet;
use crate::models::FlatRow;
use crate::store::CatalogStore;

pub struct CatalogRepository<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> Clone for CatalogRepository<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: CatalogStore + ?Sized> CatalogRepository<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn list(&self, filters: &FilterSet) -> Result<Vec<FlatRow>, CatalogError> {
        let rows = self.store.list(filters).await?;
        tracing::debug!(filters = ?filters, rows = rows.len(), "catalog list");
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<FlatRow, CatalogError> {
        self.store
            .get(id)
            .await?
            .ok_or(CatalogError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrate::rebuild;
    use crate::models::RawDocument;
    use crate::store::memory::InMemoryStore;
    use serde_json::json;

    async fn seeded() -> CatalogRepository<InMemoryStore> {
        let store = Arc::new(InMemoryStore::new());
        let docs = vec![
            RawDocument::inline(json!({ "id": 1, "name": "Punk", "food_pairing": ["Pizza"] })),
            RawDocument::inline(json!({ "id": 2, "name": "Nitro", "food_pairing": [] })),
        ];
        let report = rebuild(store.as_ref(), docs, 2).await.unwrap();
        assert!(report.is_clean());
        CatalogRepository::new(store)
    }

    #[tokio::test]
    async fn test_food_filter_and_null_pairing() {
        let repo = seeded().await;

        let filters = FilterSet {
            food: Some("Pizza".to_string()),
            ..Default::default()
        };
        let rows = repo.list(&filters).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, 1);

        let nitro = repo.get_by_id(2).await.unwrap();
        assert_eq!(nitro.name.as_deref(), Some("Nitro"));
        assert_eq!(nitro.food_pairing, None);
    }

    #[tokio::test]
    async fn test_unfiltered_list_returns_all_rows() {
        let repo = seeded().await;
        assert_eq!(repo.list(&FilterSet::default()).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_id_is_not_found() {
        let repo = seeded().await;
        let err = repo.get_by_id(99).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "beer not found: 99");
    }

    #[tokio::test]
    async fn test_missing_table_is_storage_error() {
        let repo = CatalogRepository::new(Arc::new(InMemoryStore::new()));
        let err = repo.list(&FilterSet::default()).await.unwrap_err();
        assert!(matches!(err, CatalogError::Storage(_)));
        let err = repo.get_by_id(1).await.unwrap_err();
        assert!(matches!(err, CatalogError::Storage(_)));
    }
}
