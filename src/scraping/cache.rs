//! TTL cache for fetched pages.

use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::scraping::config::CacheConfig;

/// Cache entry with TTL.
#[derive(Clone)]
struct CacheEntry {
    body: String,
    expires_at: Instant,
}

impl CacheEntry {
    fn new(body: String, ttl: Duration) -> Self {
        Self {
            body,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() > self.expires_at
    }
}

/// Thread-safe cache of page bodies keyed by URL.
pub struct PageCache {
    config: CacheConfig,
    pages: DashMap<String, CacheEntry>,
}

impl PageCache {
    /// Create a new cache with the given configuration.
    #[must_use]
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            pages: DashMap::new(),
        }
    }

    /// Get a cached page body.
    #[must_use]
    pub fn get(&self, url: &str) -> Option<String> {
        if !self.config.enabled {
            return None;
        }

        self.pages.get(url).and_then(|entry| {
            if entry.is_expired() {
                drop(entry);
                self.pages.remove(url);
                None
            } else {
                Some(entry.body.clone())
            }
        })
    }

    /// Cache a page body.
    pub fn set(&self, url: &str, body: &str) {
        if !self.config.enabled {
            return;
        }

        self.enforce_max_entries();

        let ttl = Duration::from_secs(self.config.page_ttl_seconds);
        self.pages
            .insert(url.to_string(), CacheEntry::new(body.to_string(), ttl));
    }

    /// Clear the cache.
    pub fn clear(&self) {
        self.pages.clear();
    }

    /// Get cache statistics.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            pages: self.pages.len(),
            enabled: self.config.enabled,
        }
    }

    /// Remove expired entries.
    pub fn cleanup_expired(&self) {
        self.pages.retain(|_, entry| !entry.is_expired());
    }

    /// Enforce the entry limit, dropping expired entries first.
    fn enforce_max_entries(&self) {
        let max = self.config.max_entries.max(1);
        if self.pages.len() < max {
            return;
        }

        self.cleanup_expired();

        if self.pages.len() >= max {
            let to_remove = self.pages.len() - max + 1;
            let keys: Vec<String> = self
                .pages
                .iter()
                .take(to_remove)
                .map(|entry| entry.key().clone())
                .collect();
            for key in keys {
                self.pages.remove(&key);
            }
        }
    }
}

/// Cache statistics.
#[derive(Clone, Copy, Debug, Default, serde::Serialize)]
pub struct CacheStats {
    /// Number of cached pages.
    pub pages: usize,
    /// Whether the cache is active.
    pub enabled: bool,
}
