//! HTTP server for the beer catalog.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/v2/beers` | List beers; optional `name`, `malt`, `food`, `ibu` filters |
//! | `GET`  | `/v2/beers/{id}` | One beer by id |
//! | `GET`  | `/health` | Health check with version and startup rebuild summary |
//!
//! # Error Contract
//!
//! ```json
//! { "error": "beer not found: 42", "code": "not_found" }
//! ```
//!
//! Error codes: `bad_request` (400), `not_found` (404), `internal` (500).
//! An id that is not an integer matches no beer and is a `not_found`.
//!
//! # Startup
//!
//! The catalog table is rebuilt before the listener is bound when
//! `[server].wait_for_migration` is true (the default). When false, the
//! rebuild runs in a background task and requests served in the meantime
//! may see a missing or partially loaded table.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tower_http::cors::{Any, CorsLayer};

use beer_catalog_core::error::CatalogError;
use beer_catalog_core::filter::FilterSet;
use beer_catalog_core::migrate::MigrationReport;
use beer_catalog_core::models::FlatRow;
use beer_catalog_core::repository::CatalogRepository;

use crate::config::Config;
use crate::db;
use crate::migrate::migrate_catalog;
use crate::sqlite_store::SqliteStore;

/// Shared application state passed to all route handlers via Axum's `State` extractor.
#[derive(Clone)]
struct AppState {
    repo: CatalogRepository<SqliteStore>,
    /// Set once the startup rebuild has finished.
    migration: Arc<OnceCell<MigrationSummary>>,
}

/// Counts from the startup rebuild, reported by `GET /health`.
#[derive(Debug, Clone, Serialize)]
struct MigrationSummary {
    attempted: usize,
    succeeded: usize,
    failed: usize,
    finished_at: String,
}

impl From<&MigrationReport> for MigrationSummary {
    fn from(report: &MigrationReport) -> Self {
        Self {
            attempted: report.attempted,
            succeeded: report.succeeded,
            failed: report.failed_count(),
            finished_at: report.finished_at.to_rfc3339(),
        }
    }
}

/// Rebuilds the catalog and starts the HTTP server.
///
/// Binds to `[server].bind` and runs until the process is terminated.
/// Fails if the rebuild cannot recreate the table (when gated) or if
/// binding fails.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let store = Arc::new(db::open_store(config).await?);
    let migration = Arc::new(OnceCell::new());

    if config.server.wait_for_migration {
        let report = migrate_catalog(config, &store).await?;
        log_report(&report);
        let _ = migration.set(MigrationSummary::from(&report));
    } else {
        let config = config.clone();
        let store = Arc::clone(&store);
        let migration = Arc::clone(&migration);
        tokio::spawn(async move {
            match migrate_catalog(&config, &store).await {
                Ok(report) => {
                    log_report(&report);
                    let _ = migration.set(MigrationSummary::from(&report));
                }
                Err(e) => tracing::error!(error = %format!("{:#}", e), "catalog rebuild failed"),
            }
        });
    }

    let state = AppState {
        repo: CatalogRepository::new(store),
        migration,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/v2/beers", get(handle_list_beers))
        .route("/v2/beers/{id}", get(handle_get_beer))
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "beer catalog listening");
    println!("Server is running on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn log_report(report: &MigrationReport) {
    if report.is_clean() {
        tracing::info!(rows = report.succeeded, "catalog ready");
    } else {
        tracing::warn!(
            rows = report.succeeded,
            failed = report.failed_count(),
            "catalog ready with failed rows"
        );
    }
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

/// Internal error type that converts into an Axum HTTP response.
struct AppError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            code: self.code,
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request",
        message: message.into(),
    }
}

fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found",
        message: message.into(),
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(_) => not_found(err.to_string()),
            CatalogError::Storage(_) => {
                tracing::error!(error = %err, "catalog query failed");
                AppError {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    code: "internal",
                    message: "failed to load beers".to_string(),
                }
            }
        }
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    /// `null` until the startup rebuild has finished.
    migration: Option<MigrationSummary>,
}

async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        migration: state.migration.get().cloned(),
    })
}

// ============ GET /v2/beers ============

async fn handle_list_beers(
    State(state): State<AppState>,
    filters: Result<Query<FilterSet>, QueryRejection>,
) -> Result<Json<Vec<FlatRow>>, AppError> {
    let Query(filters) = filters.map_err(|e| bad_request(e.body_text()))?;
    let beers = state.repo.list(&filters).await?;
    Ok(Json(beers))
}

// ============ GET /v2/beers/{id} ============

async fn handle_get_beer(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<FlatRow>, AppError> {
    let id: i64 = raw
        .parse()
        .map_err(|_| not_found(format!("beer not found: {}", raw)))?;
    let beer = state.repo.get_by_id(id).await?;
    Ok(Json(beer))
}
