//! Fetch layer shared by the lead harvester and the company profiler.
//!
//! This module provides:
//! - One configured HTTP client with browser-like headers
//! - Status-aware page fetching with retries
//! - A TTL page cache
//! - Result page and knowledge panel parsing

pub mod cache;
pub mod config;
pub mod content;
pub mod engines;
pub mod error;
pub mod types;

pub use cache::{CacheStats, PageCache};
pub use config::{CacheConfig, Endpoints, PageDelay, ScrapingConfig};
pub use error::ScrapingError;
pub use types::{FetchedPage, KnowledgePanel, SerpResult};

use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;

/// Main scraping service that performs every outbound request.
pub struct ScrapingService {
    config: ScrapingConfig,
    cache: Arc<PageCache>,
    client: reqwest::Client,
}

impl ScrapingService {
    /// Create a new scraping service with the given configuration.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be created.
    pub fn new(config: ScrapingConfig) -> Result<Self, ScrapingError> {
        config.validate()?;
        let client = Self::build_client(&config)?;
        let cache = Arc::new(PageCache::new(config.cache_config.clone()));

        Ok(Self {
            config,
            cache,
            client,
        })
    }

    /// Create a new scraping service with default configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, ScrapingError> {
        Self::new(ScrapingConfig::default())
    }

    /// Build an HTTP client with appropriate headers and settings.
    fn build_client(config: &ScrapingConfig) -> Result<reqwest::Client, ScrapingError> {
        use reqwest::header::{
            HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, DNT,
            UPGRADE_INSECURE_REQUESTS, USER_AGENT,
        };

        let mut headers = HeaderMap::new();

        let ua = config.random_user_agent();
        if let Ok(ua_value) = HeaderValue::from_str(&ua) {
            headers.insert(USER_AGENT, ua_value);
        }

        let fixed: [(HeaderName, &'static str); 4] = [
            (
                ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
            (ACCEPT_LANGUAGE, "en-US,en;q=0.5"),
            (DNT, "1"),
            (UPGRADE_INSECURE_REQUESTS, "1"),
        ];
        for (name, value) in fixed {
            headers.insert(name, HeaderValue::from_static(value));
        }

        reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| ScrapingError::HttpClient(e.to_string()))
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &ScrapingConfig {
        &self.config
    }

    /// Build a result page URL from an already encoded `q` value.
    #[must_use]
    pub fn search_url(&self, q: &str) -> String {
        format!("{}?q={q}", self.config.endpoints.search)
    }

    /// Fetch a page once, whatever its status.
    ///
    /// # Errors
    /// Returns an error if the request fails or the body is too large.
    pub async fn fetch_page(&self, url: &str) -> Result<FetchedPage, ScrapingError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                ScrapingError::Timeout
            } else {
                ScrapingError::HttpRequest(e)
            }
        })?;

        if let Some(len) = response.content_length() {
            if len as usize > self.config.max_content_length {
                return Err(ScrapingError::ExtractionFailed(format!(
                    "Content too large: {len} bytes"
                )));
            }
        }

        let status = response.status().as_u16();
        let body = response.text().await?;

        if body.len() > self.config.max_content_length {
            return Err(ScrapingError::ExtractionFailed(format!(
                "Content too large: {} bytes",
                body.len()
            )));
        }

        Ok(FetchedPage { status, body })
    }

    /// Fetch a page that must answer with a success status.
    ///
    /// Successful bodies are cached by URL; retryable failures are retried
    /// up to `max_retries` times.
    ///
    /// # Errors
    /// Returns an error if every attempt fails or the status is not a success.
    pub async fn fetch_html(&self, url: &str) -> Result<String, ScrapingError> {
        if let Some(cached) = self.cache.get(url) {
            tracing::debug!("Cache hit for URL: {url}");
            return Ok(cached);
        }

        let mut attempt = 0;
        loop {
            match self.fetch_success(url).await {
                Ok(body) => {
                    self.cache.set(url, &body);
                    return Ok(body);
                }
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    attempt += 1;
                    let wait = Duration::from_secs(e.retry_delay().unwrap_or(1))
                        .min(self.config.max_retry_wait());
                    tracing::debug!("Retrying {url} in {wait:?} after: {e}");
                    tokio::time::sleep(wait).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn fetch_success(&self, url: &str) -> Result<String, ScrapingError> {
        let page = self.fetch_page(url).await?;
        match StatusCode::from_u16(page.status) {
            Ok(StatusCode::TOO_MANY_REQUESTS) => Err(ScrapingError::RateLimited(60)),
            Ok(StatusCode::FORBIDDEN) => Err(ScrapingError::AccessDenied(format!(
                "{url} answered 403"
            ))),
            Ok(status) if status.is_success() => Ok(page.body),
            _ => Err(ScrapingError::HttpClient(format!(
                "{url} returned status: {}",
                page.status
            ))),
        }
    }

    /// Sleep for a random pause between consecutive result pages.
    pub async fn pause_between_pages(&self) {
        let pause = self.config.page_delay.sample();
        if !pause.is_zero() {
            tokio::time::sleep(pause).await;
        }
    }

    /// Page cache statistics.
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Clear the page cache.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}
