//! Destructive full rebuild of the catalog table.
//!
//! [`rebuild`] drops and recreates the relation, then flattens and inserts
//! every document with a bounded number of inserts in flight. A document
//! that cannot be flattened or inserted is recorded in the
//! [`MigrationReport`] and the run continues. Outcomes are folded into the
//! report as they complete, so every document is counted exactly once.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::Serialize;

use crate::flatten::flatten;
use crate::models::RawDocument;
use crate::store::CatalogStore;

/// One document that did not make it into the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MigrationFailure {
    /// `None` when the document had no usable id.
    pub id: Option<i64>,
    pub origin: String,
    pub cause: String,
}

/// Outcome of one [`rebuild`] run.
#[derive(Debug, Clone, Serialize)]
pub struct MigrationReport {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: Vec<MigrationFailure>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl MigrationReport {
    fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            attempted: 0,
            succeeded: 0,
            failed: Vec::new(),
            started_at,
            finished_at: started_at,
        }
    }

    fn record(&mut self, outcome: Result<i64, MigrationFailure>) {
        self.attempted += 1;
        match outcome {
            Ok(_) => self.succeeded += 1,
            Err(failure) => {
                tracing::warn!(
                    id = ?failure.id,
                    origin = %failure.origin,
                    cause = %failure.cause,
                    "row not loaded"
                );
                self.failed.push(failure);
            }
        }
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Rebuilds the catalog table from `docs`.
///
/// Fails only if the table cannot be recreated. Per-document failures are
/// reported, not returned. `concurrency` bounds the inserts in flight and is
/// clamped to at least 1.
pub async fn rebuild<S, I>(store: &S, docs: I, concurrency: usize) -> Result<MigrationReport>
where
    S: CatalogStore + ?Sized,
    I: IntoIterator<Item = RawDocument>,
{
    let started_at = Utc::now();
    store
        .reset()
        .await
        .context("failed to recreate catalog table")?;

    let mut report = stream::iter(docs)
        .map(|doc| load_one(store, doc))
        .buffer_unordered(concurrency.max(1))
        .fold(
            MigrationReport::new(started_at),
            |mut report, outcome| async move {
                report.record(outcome);
                report
            },
        )
        .await;
    report.finished_at = Utc::now();

    tracing::info!(
        attempted = report.attempted,
        succeeded = report.succeeded,
        failed = report.failed_count(),
        "catalog rebuild finished"
    );

    Ok(report)
}

async fn load_one<S>(store: &S, doc: RawDocument) -> Result<i64, MigrationFailure>
where
    S: CatalogStore + ?Sized,
{
    let row = flatten(&doc).map_err(|e| MigrationFailure {
        id: None,
        origin: doc.origin.clone(),
        cause: e.to_string(),
    })?;

    store
        .insert(&row)
        .await
        .map_err(|e| MigrationFailure {
            id: Some(row.id),
            origin: doc.origin.clone(),
            cause: format!("{:#}", e),
        })?;

    Ok(row.id)
}
