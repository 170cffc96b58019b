//! Configuration for the scraping module.

use std::ops::RangeInclusive;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::ScrapingError;

/// Configuration for the scraping service.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScrapingConfig {
    /// Request timeout.
    #[serde(with = "duration_serde")]
    pub request_timeout: Duration,
    /// Connection timeout.
    #[serde(with = "duration_serde")]
    pub connect_timeout: Duration,
    /// Maximum retries for failed requests.
    pub max_retries: u32,
    /// Upper bound on a single retry wait, in milliseconds.
    pub max_retry_wait_ms: u64,
    /// Pause between consecutive result pages, in milliseconds.
    pub page_delay: PageDelay,
    /// Size of the worker pool used to query profile sources.
    pub max_workers: usize,
    /// User agents to rotate.
    pub user_agents: Vec<String>,
    /// Cache configuration.
    pub cache_config: CacheConfig,
    /// Maximum content length to download (bytes).
    pub max_content_length: usize,
    /// Base URLs of the sites that get scraped.
    pub endpoints: Endpoints,
}

impl Default for ScrapingConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            max_retries: 2,
            max_retry_wait_ms: 10_000,
            page_delay: PageDelay::default(),
            max_workers: 5,
            user_agents: default_user_agents(),
            cache_config: CacheConfig::default(),
            max_content_length: 10 * 1024 * 1024, // 10 MB
            endpoints: Endpoints::default(),
        }
    }
}

impl ScrapingConfig {
    /// Create a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the pause between result pages.
    #[must_use]
    pub const fn with_page_delay(mut self, min_ms: u64, max_ms: u64) -> Self {
        self.page_delay = PageDelay { min_ms, max_ms };
        self
    }

    /// Set the profile worker pool size.
    #[must_use]
    pub const fn with_max_workers(mut self, workers: usize) -> Self {
        self.max_workers = workers;
        self
    }

    /// Set the retry budget.
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Replace the scraped endpoints.
    #[must_use]
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Validate configuration invariants.
    ///
    /// # Errors
    /// Returns an error if any values are out of range.
    pub fn validate(&self) -> Result<(), ScrapingError> {
        if self.max_workers == 0 {
            return Err(ScrapingError::Config("max_workers must be > 0".to_string()));
        }
        if self.page_delay.min_ms > self.page_delay.max_ms {
            return Err(ScrapingError::Config(
                "page_delay.min_ms must not exceed page_delay.max_ms".to_string(),
            ));
        }
        if self.max_content_length == 0 {
            return Err(ScrapingError::Config(
                "max_content_length must be > 0".to_string(),
            ));
        }
        url::Url::parse(&self.endpoints.search)?;
        url::Url::parse(&self.endpoints.crunchbase)?;
        url::Url::parse(&self.endpoints.bloomberg)?;
        Ok(())
    }

    /// Get a random user agent from the rotation list.
    #[must_use]
    pub fn random_user_agent(&self) -> String {
        if self.user_agents.is_empty() {
            return default_user_agents()[0].clone();
        }
        let mut rng = rand::thread_rng();
        let idx = rng.gen_range(0..self.user_agents.len());
        self.user_agents[idx].clone()
    }

    /// Upper bound on a single retry wait.
    #[must_use]
    pub const fn max_retry_wait(&self) -> Duration {
        Duration::from_millis(self.max_retry_wait_ms)
    }
}

/// Random pause range between consecutive result pages.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PageDelay {
    /// Lower bound in milliseconds.
    pub min_ms: u64,
    /// Upper bound in milliseconds.
    pub max_ms: u64,
}

impl Default for PageDelay {
    fn default() -> Self {
        Self {
            min_ms: 2000,
            max_ms: 4000,
        }
    }
}

impl PageDelay {
    /// No pause at all.
    pub const NONE: Self = Self { min_ms: 0, max_ms: 0 };

    /// Pick a pause inside the range.
    #[must_use]
    pub fn sample(&self) -> Duration {
        if self.max_ms <= self.min_ms {
            return Duration::from_millis(self.min_ms);
        }
        let range: RangeInclusive<u64> = self.min_ms..=self.max_ms;
        Duration::from_millis(rand::thread_rng().gen_range(range))
    }
}

/// Base URLs of the scraped sites.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Endpoints {
    /// Search engine result page endpoint.
    pub search: String,
    /// Crunchbase organization pages.
    pub crunchbase: String,
    /// Bloomberg company profile pages.
    pub bloomberg: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            search: "https://www.google.com/search".to_string(),
            crunchbase: "https://www.crunchbase.com/organization".to_string(),
            bloomberg: "https://www.bloomberg.com/profile".to_string(),
        }
    }
}

impl Endpoints {
    /// Point every endpoint at one host, as `<base>/search`, `<base>/crunchbase`
    /// and `<base>/bloomberg`.
    #[must_use]
    pub fn rooted_at(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            search: format!("{base}/search"),
            crunchbase: format!("{base}/crunchbase"),
            bloomberg: format!("{base}/bloomberg"),
        }
    }
}

/// Cache configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether caching is enabled.
    pub enabled: bool,
    /// TTL for fetched pages (seconds).
    pub page_ttl_seconds: u64,
    /// Maximum cache size (number of entries).
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            page_ttl_seconds: 3600, // 1 hour
            max_entries: 1000,
        }
    }
}

/// Default user agents for rotation.
fn default_user_agents() -> Vec<String> {
    vec![
        // Chrome on Windows
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36".to_string(),
        // Chrome on macOS
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36".to_string(),
        // Firefox on Windows
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0".to_string(),
        // Safari on macOS
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15".to_string(),
        // Edge on Windows
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36 Edg/124.0.0.0".to_string(),
        // Chrome on Linux
        "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36".to_string(),
    ]
}

/// Serde module for Duration serialization.
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
