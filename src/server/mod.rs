//! HTTP service exposing text extraction and resume analysis
//!
//! Uploaded documents are written to a scoped temporary file for the duration of
//! extraction. The file is removed when the request finishes, whether it succeeded or not.

use crate::config::ServerConfig;
use crate::processing::AnalysisEngine;
use axum::extract::DefaultBodyLimit;
use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use log::info;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

pub mod handlers;

/// Shared state for all handlers. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<AnalysisEngine>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(engine: Arc<AnalysisEngine>, config: ServerConfig) -> Self {
        Self {
            engine,
            config: Arc::new(config),
        }
    }
}

/// Start the server and block until it exits.
pub async fn run_server(state: AppState) -> anyhow::Result<()> {
    let addr = format!("{}:{}", state.config.bind, state.config.port);
    let app = build_router(state);

    info!("Resume matcher listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(handlers::root))
        .route("/extract-text", post(handlers::extract_text))
        .route("/analyze", post(handlers::analyze))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .with_state(state)
}
