//! CreditSea Server
//!
//! HTTP surface for bureau report ingestion: accepts XML uploads, runs them
//! through the parser, extractor and store, and serves stored reports back
//! as JSON.
//!
//! # Routes
//!
//! - `POST /api/upload`: multipart upload, file field `xmlFile`
//! - `GET /api/reports`: stored reports, newest first
//! - `GET /api/reports/:id`: one stored report
//! - `GET /api/health`: service and store health

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod upload;

use config::ServerConfig;
use creditsea_extractor::DocumentParser;
use creditsea_store::SqliteStore;
use handlers::{create_router, with_static_files, AppState};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// The report store could not be opened
    #[error("Failed to open report store: {0}")]
    Store(#[from] creditsea_store::StoreError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Install the global tracing subscriber
///
/// Honours `RUST_LOG`, defaulting to `info`. Safe to call more than once;
/// later calls leave the first subscriber in place.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Build the application from configuration: open the store and assemble
/// routes, middleware and the optional static UI
pub fn build_app(config: &ServerConfig) -> Result<axum::Router, ServerError> {
    let store = SqliteStore::new(&config.database_path)?;
    let parser = DocumentParser::new(config.parser.clone());
    let state = AppState::new(store, parser, config.max_upload_bytes);

    let router = create_router(state);
    Ok(match &config.static_dir {
        Some(dir) => with_static_files(router, dir),
        None => router,
    })
}

/// Start the HTTP server
///
/// Opens the report store, builds the router and serves until the process
/// is stopped.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    init_logging();

    info!("Starting CreditSea server");
    info!("Bind address: {}", config.bind_addr());
    info!("Database: {}", config.database_path);
    info!("Upload limit: {} bytes", config.max_upload_bytes);
    if let Some(dir) = &config.static_dir {
        info!("Serving UI from {}", dir.display());
    }

    let app = build_app(&config)?;

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}
