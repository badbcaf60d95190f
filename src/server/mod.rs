//! HTTP API over `ChartService`.
//!
//! Routes:
//!   POST /api/session         { userId? }              -> { userId, medicalChart }
//!   POST /api/update-chart    { userId, userInput }    -> { medicalChart }
//!   POST /api/advice          { userId, question }     -> { advice }
//!   GET  /api/chart/{userId}                           -> { medicalChart }
//!   PUT  /api/chart/{userId}  ChartEdit                -> { medicalChart }
//!   GET  /api/health                                   -> { status, version }
//!
//! Errors are `{ "error": message }` with 400/404/500.

mod handlers;

use std::net::SocketAddr;
use std::path::Path;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::service::ChartService;

/// Errors starting or running the HTTP server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Build the API router.
///
/// When `public_dir` exists it is served as the fallback for non-API paths.
pub fn router(service: ChartService, public_dir: Option<&Path>) -> Router {
    let api = Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/session", post(handlers::open_session))
        .route("/api/update-chart", post(handlers::update_chart))
        .route("/api/advice", post(handlers::advice))
        .route(
            "/api/chart/{user_id}",
            get(handlers::get_chart).put(handlers::edit_chart),
        )
        .with_state(service);

    let app = match public_dir {
        Some(dir) if dir.is_dir() => api.fallback_service(ServeDir::new(dir)),
        Some(dir) => {
            tracing::warn!(dir = %dir.display(), "public directory not found, static files disabled");
            api
        }
        None => api,
    };

    app.layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Bind `addr` and serve until ctrl-c.
pub async fn serve(
    addr: SocketAddr,
    service: ChartService,
    public_dir: Option<&Path>,
) -> Result<(), ServerError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    let bound = listener.local_addr().map_err(ServerError::Serve)?;

    if !service.advice_available().await {
        tracing::warn!("PERPLEXITY_API_URL not set, advice requests will fail");
    }
    tracing::info!("skinchart listening on http://{}", bound);

    axum::serve(listener, router(service, public_dir))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutting down");
        })
        .await
        .map_err(ServerError::Serve)
}
