//! Error types for the catalog core.

use thiserror::Error;

/// A document that cannot be flattened into a row at all.
///
/// Missing or mistyped optional fields are not errors; they flatten to
/// `None`. Only a document without a usable primary key is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("document is not a JSON object")]
    NotAnObject,

    #[error("document has no integer `id` field")]
    MissingId,
}

/// Errors surfaced by [`crate::repository::CatalogRepository`].
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The query ran, but no row has this id. A client error.
    #[error("beer not found: {0}")]
    NotFound(i64),

    /// The query itself failed (e.g. the table does not exist yet).
    #[error("storage error: {0:#}")]
    Storage(anyhow::Error),
}

impl From<anyhow::Error> for CatalogError {
    fn from(err: anyhow::Error) -> Self {
        CatalogError::Storage(err)
    }
}

impl CatalogError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound(_))
    }
}
