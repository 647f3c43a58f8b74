use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::error::ServerError;

pub mod config;
pub mod handlers;
pub mod state;
pub mod util;

pub use config::{ServerConfig, UrlStyle};
pub use state::{AppState, ErrorResponse, UploadResponse};

pub fn router(state: AppState) -> Router {
    let body_limit = match state.config.max_upload_bytes {
        Some(max) => DefaultBodyLimit::max(max),
        None => DefaultBodyLimit::disable(),
    };

    Router::new()
        .route("/upload", post(handlers::upload))
        .route("/uploads/:file_name", get(handlers::serve_upload))
        .with_state(state)
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
}

/// Runs the upload service until Ctrl-C.
pub fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(ServerError::Runtime)?;

    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState::new(config);
    info!(
        upload_dir = %state.store.root().display(),
        url_style = ?state.config.url_style,
        "Upload store configured"
    );

    rt.block_on(async move {
        let listener = tokio::net::TcpListener::bind((state.config.host.as_str(), state.config.port))
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        if let Ok(l) = listener.local_addr() {
            info!(address = %format!("http://{l}"), "Listening");
        }
        axum::serve(listener, router(state))
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(ServerError::Serve)
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed listening for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
