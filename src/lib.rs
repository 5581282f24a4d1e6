//! # Beer Catalog
//!
//! Serves a catalog of beers over HTTP from a flat SQLite table that is
//! rebuilt, on every start, from a directory of nested per-beer JSON
//! documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌─────────────┐   ┌──────────┐
//! │  JSON docs  │──▶│  Flatten +  │──▶│  SQLite   │
//! │ (data dir)  │   │   Rebuild   │   │  beers    │
//! └─────────────┘   └─────────────┘   └────┬─────┘
//!                                          │
//!                      ┌───────────────────┤
//!                      ▼                   ▼
//!                 ┌──────────┐       ┌──────────┐
//!                 │   CLI    │       │   HTTP   │
//!                 │ (beers)  │       │ /v2/beers│
//!                 └──────────┘       └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! beers migrate                 # rebuild the table from the data dir
//! beers list --malt "Pale"      # filtered listing
//! beers get 192                 # one beer
//! beers serve                   # rebuild, then start the HTTP server
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`db`] | Database connection |
//! | [`sqlite_store`] | SQLite catalog store |
//! | [`connector_fs`] | Filesystem document source |
//! | [`migrate`] | Catalog rebuild |
//! | [`list`] / [`get`] | CLI queries |
//! | [`server`] | HTTP server |
//!
//! Store-agnostic logic (flattener, query builder, migrator, repository)
//! lives in [`beer_catalog_core`], re-exported as [`catalog`].

pub use beer_catalog_core as catalog;

pub mod config;
pub mod connector_fs;
pub mod db;
pub mod get;
pub mod list;
pub mod migrate;
pub mod server;
pub mod sqlite_store;
