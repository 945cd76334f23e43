//! Web form and JSON API over the batch orchestrator

pub mod error;
pub mod handlers;

use crate::config::Config;
use crate::processing::orchestrator::BatchOrchestrator;
use axum::{
    extract::{DefaultBodyLimit, Extension},
    routing::{get, post},
    Router,
};
use log::info;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Shared, read-only state for every request
pub struct AppState {
    pub orchestrator: Arc<BatchOrchestrator>,
    pub default_output_dir: PathBuf,
    pub csv_filename: String,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(orchestrator: BatchOrchestrator, config: &Config) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            default_output_dir: config.output.default_output_dir.clone(),
            csv_filename: config.output.csv_filename.clone(),
            max_upload_bytes: config.max_upload_bytes(),
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let body_limit = state.max_upload_bytes;

    Router::new()
        .route("/", get(handlers::index))
        .route("/categorize", post(handlers::categorize_form))
        .route("/api/categorize", post(handlers::categorize_api))
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(Extension(state))
}

pub async fn serve(state: AppState, bind_address: &str) -> anyhow::Result<()> {
    let app = router(Arc::new(state));

    let listener = TcpListener::bind(bind_address).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
