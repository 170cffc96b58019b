//! HTTP server for the lead scout demo.
//!
//! - `/health`: liveness plus cache size
//! - `/search`: demo directory search
//! - `/scrape`: company profiling by name or by filters
//! - anything else: the static search page

pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppState, ServerSettings};

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::scraping::ScrapingError;

/// Default server port.
pub const DEFAULT_PORT: u16 = 3000;

/// Routes wrapped in permissive CORS and HTTP tracing.
pub fn build_app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Bind `0.0.0.0:<port>` and serve until `shutdown_signal` completes.
///
/// # Errors
/// Returns an error if the port cannot be bound or serving fails.
pub async fn run_server_with_shutdown<F>(
    state: Arc<AppState>,
    port: u16,
    shutdown_signal: F,
) -> Result<(), ScrapingError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    serve(listener, state, shutdown_signal).await
}

/// Serve on an already bound listener; in-flight requests finish on shutdown.
///
/// # Errors
/// Returns an error if serving fails.
pub async fn serve<F>(listener: TcpListener, state: Arc<AppState>, shutdown_signal: F) -> Result<(), ScrapingError>
where
    F: Future<Output = ()> + Send + 'static,
{
    tracing::info!("Lead scout server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, build_app(state))
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    Ok(())
}
