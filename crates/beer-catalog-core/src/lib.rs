//! # Beer Catalog Core
//!
//! Store-agnostic logic for the beer catalog: data models, the flat schema
//! definition, the nested-to-flat flattener, the filter/query builder, the
//! store abstraction, the migrator, and the repository.
//!
//! This crate contains no sqlx or filesystem I/O. The SQLite backend and the
//! HTTP surface live in the `beer-catalog` application crate.

pub mod error;
pub mod filter;
pub mod flatten;
pub mod migrate;
pub mod models;
pub mod repository;
pub mod schema;
pub mod store;
