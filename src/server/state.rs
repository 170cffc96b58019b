//! Application state shared across all request handlers.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::directory::CompanyDirectory;
use crate::profile::CompanyProfiler;
use crate::scraping::{ScrapingConfig, ScrapingError};

/// Default directory served for unmatched paths.
const DEFAULT_STATIC_DIR: &str = "static";

/// Server settings that do not belong to the fetch layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Directory with the static search page.
    pub static_dir: PathBuf,
    /// Random `/search` latency range in milliseconds, if any.
    pub simulated_latency: Option<(u64, u64)>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            simulated_latency: Some((100, 500)),
        }
    }
}

impl ServerSettings {
    /// Defaults overridden by `LEAD_SCOUT_STATIC_DIR`.
    #[must_use]
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        if let Ok(dir) = std::env::var("LEAD_SCOUT_STATIC_DIR") {
            settings.static_dir = PathBuf::from(dir);
        }
        settings
    }

    /// Set the static directory.
    #[must_use]
    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = dir.into();
        self
    }

    /// Set or disable the simulated `/search` latency.
    #[must_use]
    pub const fn with_simulated_latency(mut self, latency: Option<(u64, u64)>) -> Self {
        self.simulated_latency = latency;
        self
    }
}

/// Shared application state.
pub struct AppState {
    /// Company profiler behind `/scrape`.
    pub profiler: CompanyProfiler,
    /// Demo directory behind `/search`.
    pub directory: CompanyDirectory,
    /// Server settings.
    pub settings: ServerSettings,
}

impl AppState {
    /// Create a new application state with the demo directory.
    ///
    /// # Errors
    /// Returns an error if the profiler cannot be created.
    pub fn new(config: ScrapingConfig, settings: ServerSettings) -> Result<Arc<Self>, ScrapingError> {
        Ok(Arc::new(Self {
            profiler: CompanyProfiler::new(config)?,
            directory: CompanyDirectory::demo(),
            settings,
        }))
    }
}
