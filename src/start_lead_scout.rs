//! Startup helpers for the lead scout server.

use std::process::ExitCode;
use std::sync::Arc;

use crate::scraping::{ScrapingConfig, ScrapingError};
use crate::server::{self, AppState, ServerSettings};

/// Install the `RUST_LOG`-driven subscriber with an `INFO` floor.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();
}

/// Run the server until Ctrl+C (used by `lead-scout-server`).
///
/// # Returns
/// `ExitCode::SUCCESS` on graceful shutdown, `1` on failure.
#[must_use]
pub fn run() -> ExitCode {
    init_tracing();

    tracing::info!("Starting Lead Scout v{}", env!("CARGO_PKG_VERSION"));

    let state = match initialize() {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to create state: {e}");
            return ExitCode::from(1);
        }
    };

    let port = get_port();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to create runtime: {e}");
            return ExitCode::from(1);
        }
    };

    if let Err(e) = rt.block_on(server::run_server_with_shutdown(state, port, shutdown_signal())) {
        tracing::error!("Server error: {e}");
        return ExitCode::from(1);
    }

    tracing::info!("Server stopped");
    ExitCode::SUCCESS
}

/// Build the application state from defaults and `LEAD_SCOUT_STATIC_DIR`.
///
/// # Errors
/// Returns an error if the profiler cannot be created.
pub fn initialize() -> Result<Arc<AppState>, ScrapingError> {
    let settings = ServerSettings::from_env();
    tracing::info!("Static files: {}", settings.static_dir.display());

    AppState::new(ScrapingConfig::default(), settings)
}

/// Resolves on Ctrl+C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// Get configured server port.
#[must_use]
pub fn get_port() -> u16 {
    parse_port(std::env::var("LEAD_SCOUT_PORT").ok().as_deref())
}

fn parse_port(value: Option<&str>) -> u16 {
    value
        .and_then(|p| p.trim().parse().ok())
        .unwrap_or(server::DEFAULT_PORT)
}
