//! Local fixtures for tests that need a live HTTP endpoint.

use std::time::Duration;

use axum::Router;

use crate::scraping::{Endpoints, ScrapingConfig};

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn_site(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap_or_else(|e| panic!("bind test listener: {e}"));
    let addr = listener.local_addr().unwrap_or_else(|e| panic!("test listener address: {e}"));
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap_or_else(|e| panic!("serve test site: {e}"));
    });
    format!("http://{addr}")
}

/// A config pointed at `base` with no pauses and no retries.
pub fn quiet_config(base: &str) -> ScrapingConfig {
    ScrapingConfig::new()
        .with_endpoints(Endpoints::rooted_at(base))
        .with_page_delay(0, 0)
        .with_max_retries(0)
        .with_timeout(Duration::from_secs(5))
}
