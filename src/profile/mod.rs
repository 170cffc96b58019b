//! Company profiler.
//!
//! A profile is assembled from five independent sources run in a bounded
//! pool, then enriched from the company's own website:
//! - search result pages (knowledge panel, official website, free-text facts)
//! - Crunchbase and Bloomberg profile pages
//! - `site:` searches for social accounts and the LinkedIn company page
//!
//! Every value is a best guess; a source failing only loses its own fields.

pub mod contacts;
pub mod discovery;
pub mod heuristics;
pub mod sources;
pub mod technologies;
pub mod types;
pub mod website;

pub use contacts::extract_contacts;
pub use discovery::SearchFilters;
pub use heuristics::Heuristics;
pub use sources::{ProfileSource, default_sources};
pub use technologies::detect_technologies;
pub use types::{
    CompanyProfile, Contact, LinkedInInsights, PlatformPresence, SocialData, SocialPlatform,
    SourceFindings, TechnologyMap,
};

use std::sync::Arc;

use futures::stream::{self, StreamExt};

use crate::scraping::{ScrapingConfig, ScrapingError, ScrapingService};

/// Builds company profiles from public pages.
#[derive(Clone)]
pub struct CompanyProfiler {
    service: Arc<ScrapingService>,
    heuristics: Arc<Heuristics>,
    sources: Arc<Vec<Box<dyn ProfileSource>>>,
}

impl CompanyProfiler {
    /// Create a profiler with every default source.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid or a pattern fails
    /// to compile.
    pub fn new(config: ScrapingConfig) -> Result<Self, ScrapingError> {
        Self::with_sources(Arc::new(ScrapingService::new(config)?), default_sources())
    }

    /// Create a profiler over an existing service with custom sources.
    ///
    /// # Errors
    /// Returns an error if a pattern fails to compile.
    pub fn with_sources(
        service: Arc<ScrapingService>,
        sources: Vec<Box<dyn ProfileSource>>,
    ) -> Result<Self, ScrapingError> {
        Ok(Self {
            service,
            heuristics: Arc::new(Heuristics::new()?),
            sources: Arc::new(sources),
        })
    }

    /// The underlying fetch service.
    #[must_use]
    pub fn service(&self) -> &ScrapingService {
        &self.service
    }

    /// Build the profile of `name`.
    ///
    /// Sources run concurrently, at most `max_workers` at a time. Their
    /// findings are merged in source order whatever order they finish in.
    pub async fn search_company(&self, name: &str) -> CompanyProfile {
        tracing::info!("Starting search for company: {name}");

        let service = self.service.as_ref();
        let heuristics = self.heuristics.as_ref();

        let gathering: Vec<_> = self
            .sources
            .iter()
            .enumerate()
            .map(|(idx, source)| {
                let findings = source.gather(service, heuristics, name);
                async move { (idx, source.name(), findings.await) }
            })
            .collect();

        let mut outcomes: Vec<_> = stream::iter(gathering)
            .buffer_unordered(service.config().max_workers)
            .collect()
            .await;
        outcomes.sort_by_key(|(idx, _, _)| *idx);

        let mut profile = CompanyProfile::new(name);
        for (_, source, outcome) in outcomes {
            match outcome {
                Ok(findings) => profile.absorb(findings),
                Err(e) => tracing::error!("Error in {source} data collection for {name}: {e}"),
            }
        }

        website::enrich_from_website(service, heuristics, &mut profile).await;
        profile.clean();

        tracing::debug!("Extracted profile: {profile:?}");
        profile
    }

    /// Discover companies matching `filters` and profile each one in turn.
    ///
    /// # Errors
    /// Returns [`ScrapingError::NoCriteria`] when the filters yield no search
    /// term, or an error if the discovery page cannot be fetched or parsed.
    pub async fn discover(&self, filters: &SearchFilters) -> Result<Vec<CompanyProfile>, ScrapingError> {
        let q = filters.query()?;
        let html = self.service.fetch_html(&self.service.search_url(&q)).await?;
        let names = discovery::company_names(&html, &self.heuristics)?;
        tracing::info!("Discovered {} companies", names.len());

        let mut profiles = Vec::with_capacity(names.len());
        for name in names {
            profiles.push(self.search_company(&name).await);
        }
        Ok(profiles)
    }
}
