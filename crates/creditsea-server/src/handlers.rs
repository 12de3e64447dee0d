//! HTTP request handlers for the report service.
//!
//! Implements upload, list, detail and health endpoints using axum.

use crate::error::AppError;
use crate::upload::{extract_upload, validate_upload, MULTIPART_OVERHEAD_BYTES};
use axum::{
    extract::{
        multipart::MultipartRejection, rejection::QueryRejection,
        DefaultBodyLimit, Multipart, Path, Query, State,
    },
    response::Json,
    routing::{get, post},
    Router as AxumRouter,
};
use creditsea_domain::traits::{ReportQuery, ReportStore};
use creditsea_domain::{ReportId, StoredReport};
use creditsea_extractor::{extract, DocumentParser};
use creditsea_store::SqliteStore;
use serde::{Deserialize, Serialize};
use std::path::Path as FsPath;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

/// Message returned with every successful upload
pub const UPLOAD_SUCCESS_MESSAGE: &str = "XML file processed successfully";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Report store, shared by all requests
    pub store: Arc<Mutex<SqliteStore>>,
    /// Document parser with its configured limits
    pub parser: Arc<DocumentParser>,
    /// Largest accepted upload in bytes
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Build state around an opened store
    pub fn new(store: SqliteStore, parser: DocumentParser, max_upload_bytes: usize) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            parser: Arc::new(parser),
            max_upload_bytes,
        }
    }
}

/// Successful upload response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Fixed success message
    pub message: String,
    /// Identifier of the stored report
    pub report_id: ReportId,
    /// The stored report
    pub data: StoredReport,
    /// Time spent handling the upload, in milliseconds
    pub processing_time: u64,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// "healthy", or "degraded" when the store cannot be read
    pub status: String,
    /// Number of stored reports, when known
    pub reports: Option<u64>,
}

/// Query string for the list endpoint
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Maximum number of reports to return
    pub limit: Option<usize>,
}

fn lock_store(store: &Mutex<SqliteStore>) -> Result<MutexGuard<'_, SqliteStore>, AppError> {
    store
        .lock()
        .map_err(|_| AppError::InternalError("report store lock poisoned".to_string()))
}

/// Run blocking store or parsing work off the async runtime
async fn run_blocking<T, F>(work: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::InternalError(format!("worker task failed: {}", e)))?
}

/// POST /api/upload - Parse, extract and store an uploaded report
async fn upload_report(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let started = Instant::now();

    let file = extract_upload(multipart?, state.max_upload_bytes).await?;
    info!(
        file_name = %file.file_name,
        size = file.data.len(),
        content_type = %file.content_type,
        "File upload received"
    );

    if let Err(e) = validate_upload(&file, state.max_upload_bytes) {
        warn!(file_name = %file.file_name, code = e.code(), "Upload rejected");
        return Err(e);
    }

    let file_name = file.file_name.clone();
    let parser = Arc::clone(&state.parser);
    let store = Arc::clone(&state.store);

    let stored = run_blocking(move || {
        let document = parser.parse(file.text()?)?;
        let report = extract(&document)?;
        let mut store = lock_store(&store)?;
        Ok(store.insert_report(report)?)
    })
    .await?;

    let processing_time = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    info!(
        report_id = %stored.id,
        file_name = %file_name,
        processing_time_ms = processing_time,
        accounts = stored.report.credit_accounts.len(),
        "XML file processed successfully"
    );

    Ok(Json(UploadResponse {
        message: UPLOAD_SUCCESS_MESSAGE.to_string(),
        report_id: stored.id,
        data: stored,
        processing_time,
    }))
}

/// GET /api/reports - All reports, newest first
async fn list_reports(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<StoredReport>>, AppError> {
    let Query(params) = params?;
    let query = ReportQuery {
        limit: params.limit,
    };

    let reports = run_blocking(move || {
        let store = lock_store(&state.store)?;
        Ok(store.list_reports(&query)?)
    })
    .await?;

    debug!(count = reports.len(), "Reports fetched");
    Ok(Json(reports))
}

/// GET /api/reports/:id - One report
async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StoredReport>, AppError> {
    let report_id: ReportId = id.parse().map_err(AppError::InvalidReportId)?;

    let report = run_blocking(move || {
        let store = lock_store(&state.store)?;
        Ok(store.get_report(report_id)?)
    })
    .await?;

    report
        .map(Json)
        .ok_or_else(|| AppError::ReportNotFound(report_id.to_string()))
}

/// GET /api/health - Service and store health
async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    let count = run_blocking(move || {
        let store = lock_store(&state.store)?;
        Ok(store.count_reports()?)
    })
    .await;

    let response = match count {
        Ok(reports) => HealthCheckResponse {
            status: "healthy".to_string(),
            reports: Some(reports),
        },
        Err(e) => {
            warn!(code = e.code(), "Health check could not read the report store");
            HealthCheckResponse {
                status: "degraded".to_string(),
                reports: None,
            }
        }
    };

    Json(response)
}

/// Create the axum router with all API routes and middleware
pub fn create_router(state: AppState) -> AxumRouter {
    let body_limit = state
        .max_upload_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    AxumRouter::new()
        .route("/api/upload", post(upload_report))
        .route("/api/reports", get(list_reports))
        .route("/api/reports/:id", get(get_report))
        .route("/api/health", get(health_check))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve a built UI from `dir` for every path the API does not handle
///
/// Unknown paths fall back to `index.html` so client-side routes load.
pub fn with_static_files(router: AxumRouter, dir: &FsPath) -> AxumRouter {
    let index = ServeFile::new(dir.join("index.html"));
    router.fallback_service(ServeDir::new(dir).fallback(index))
}
