//! HTTP route handlers for the lead scout API.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use rand::Rng;
use serde::Deserialize;
use tower_http::services::ServeDir;

use crate::directory::CompanyRecord;
use crate::profile::SearchFilters;
use crate::scraping::ScrapingError;

use super::state::AppState;

/// Create the API router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    let static_files = ServeDir::new(&state.settings.static_dir);

    Router::new()
        .route("/health", get(health_check))
        .route("/search", get(search_directory))
        .route("/scrape", post(scrape))
        .fallback_service(static_files)
        .with_state(state)
}

/// Health check endpoint.
async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "lead-scout",
        "version": env!("CARGO_PKG_VERSION"),
        "cached_pages": state.profiler.service().cache_stats().pages,
    }))
}

/// Directory search parameters.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Free-text query.
    pub query: Option<String>,
}

/// Search the demo directory.
async fn search_directory(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<CompanyRecord>> {
    let query = params.query.unwrap_or_default();
    if query.trim().is_empty() {
        return Json(Vec::new());
    }

    if let Some((min_ms, max_ms)) = state.settings.simulated_latency {
        let pause = rand::thread_rng().gen_range(min_ms..=max_ms.max(min_ms));
        tokio::time::sleep(Duration::from_millis(pause)).await;
    }

    Json(state.directory.search(&query))
}

/// Profile request: a company name, or filters to discover companies with.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ScrapeRequest {
    /// Company to profile.
    pub company_name: Option<String>,
    /// Discovery filters used when no name is given.
    pub filters: Option<SearchFilters>,
}

/// `{"error": ...}` answer of `/scrape`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({ "error": self.message }))).into_response()
    }
}

impl From<ScrapingError> for ApiError {
    fn from(e: ScrapingError) -> Self {
        let status = match e {
            ScrapingError::NoCriteria => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: e.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: rejection.body_text(),
        }
    }
}

/// Profile one company, or every company the filters discover.
async fn scrape(
    State(state): State<Arc<AppState>>,
    request: Result<Json<ScrapeRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = request.map_err(|rejection| {
        tracing::warn!("Rejected /scrape body: {rejection}");
        ApiError::from(rejection)
    })?;

    let name = request.company_name.as_deref().map(str::trim).unwrap_or_default();
    if !name.is_empty() {
        let profile = state.profiler.search_company(name).await;
        return Ok(Json(profile).into_response());
    }

    let filters = request.filters.unwrap_or_default();
    let profiles = state.profiler.discover(&filters).await.map_err(|e| {
        tracing::error!("Discovery failed: {e}");
        ApiError::from(e)
    })?;
    Ok(Json(profiles).into_response())
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header};
    use tower::ServiceExt;

    use super::*;
    use crate::server::state::ServerSettings;
    use crate::test_support::{quiet_config, spawn_site};

    fn app(base: &str) -> Router {
        let settings = ServerSettings::default()
            .with_simulated_latency(None)
            .with_static_dir(std::env::temp_dir().join("lead_scout_no_static"));
        let state = AppState::new(quiet_config(base), settings).unwrap_or_else(|e| panic!("state: {e}"));
        create_router(state)
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap_or_default();
        serde_json::from_slice(&bytes).unwrap_or_default()
    }

    fn scrape_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/scrape")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app("http://127.0.0.1:9")
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap_or_default())
            .await
            .unwrap_or_else(|e| match e {});

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "lead-scout");
        assert_eq!(body["cached_pages"], 0);
    }

    #[tokio::test]
    async fn test_search_directory() {
        let response = app("http://127.0.0.1:9")
            .oneshot(
                Request::builder()
                    .uri("/search?query=automotive")
                    .body(Body::empty())
                    .unwrap_or_default(),
            )
            .await
            .unwrap_or_else(|e| match e {});

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body[0]["name"], "Tesla");
        assert_eq!(body[1]["website"], "ford.com");
    }

    #[tokio::test]
    async fn test_search_without_query() {
        let response = app("http://127.0.0.1:9")
            .oneshot(Request::builder().uri("/search").body(Body::empty()).unwrap_or_default())
            .await
            .unwrap_or_else(|e| match e {});

        assert_eq!(json_body(response).await, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_blank_search_skips_latency() {
        let settings = ServerSettings::default().with_simulated_latency(Some((5_000, 5_000)));
        let state = AppState::new(quiet_config("http://127.0.0.1:9"), settings)
            .unwrap_or_else(|e| panic!("state: {e}"));
        let request = Request::builder()
            .uri("/search?query=%20%20")
            .body(Body::empty())
            .unwrap_or_default();

        let response = tokio::time::timeout(Duration::from_secs(1), create_router(state).oneshot(request))
            .await
            .unwrap_or_else(|_| panic!("blank query waited for the simulated latency"))
            .unwrap_or_else(|e| match e {});

        assert_eq!(json_body(response).await, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_scrape_without_criteria() {
        let response = app("http://127.0.0.1:9")
            .oneshot(scrape_request(r#"{"company_name":"  ","filters":{"size":"huge"}}"#))
            .await
            .unwrap_or_else(|e| match e {});

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({"error": "Please enter a company name or set search filters"})
        );
    }

    #[tokio::test]
    async fn test_scrape_malformed_body_is_json_error() {
        let response = app("http://127.0.0.1:9")
            .oneshot(scrape_request("{not json"))
            .await
            .unwrap_or_else(|e| match e {});

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert!(body["error"].as_str().is_some_and(|e| e.contains("JSON")));
    }

    #[tokio::test]
    async fn test_scrape_without_content_type_is_json_error() {
        let request = Request::builder()
            .method("POST")
            .uri("/scrape")
            .body(Body::from(r#"{"company_name":"Acme"}"#))
            .unwrap_or_default();
        let response = app("http://127.0.0.1:9")
            .oneshot(request)
            .await
            .unwrap_or_else(|e| match e {});

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert!(body["error"].as_str().is_some_and(|e| e.contains("Content-Type")));
    }

    #[tokio::test]
    async fn test_scrape_discovery_failure_is_500() {
        let site = Router::new().route(
            "/search",
            get(|| async { (StatusCode::FORBIDDEN, "blocked") }),
        );
        let base = spawn_site(site).await;

        let response = app(&base)
            .oneshot(scrape_request(r#"{"filters":{"industry":"fintech"}}"#))
            .await
            .unwrap_or_else(|e| match e {});

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert!(body["error"].as_str().is_some_and(|e| e.starts_with("Access denied")));
    }

    #[tokio::test]
    async fn test_scrape_company_name() {
        let site = Router::new().route("/search", get(|| async { "<html></html>" }));
        let base = spawn_site(site).await;

        let response = app(&base)
            .oneshot(scrape_request(r#"{"company_name":"Acme"}"#))
            .await
            .unwrap_or_else(|e| match e {});

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["name"], "Acme");
        assert!(body["website"].is_null());
        assert_eq!(body["technologies"], serde_json::json!({}));
        assert_eq!(body["social_data"]["instagram"], serde_json::json!({}));
    }

    #[tokio::test]
    async fn test_unknown_path_falls_back_to_static_files() {
        let dir = std::env::temp_dir().join(format!("lead_scout_static_{}", std::process::id()));
        let _ = std::fs::create_dir_all(&dir);
        let _ = std::fs::write(dir.join("index.html"), "<h1>Lead Scout</h1>");

        let settings = ServerSettings::default()
            .with_simulated_latency(None)
            .with_static_dir(&dir);
        let state = AppState::new(quiet_config("http://127.0.0.1:9"), settings)
            .unwrap_or_else(|e| panic!("state: {e}"));

        let response = create_router(state)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap_or_default())
            .await
            .unwrap_or_else(|e| match e {});

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap_or_default();
        assert_eq!(&bytes[..], b"<h1>Lead Scout</h1>");

        let _ = std::fs::remove_dir_all(&dir);
    }
}
