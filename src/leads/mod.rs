//! Lead harvesting from search result pages.
//!
//! A harvest walks a few result pages for `<term> companies`, turns every
//! titled result block into a [`Lead`] and writes one CSV snapshot per run.

pub mod export;

pub use export::{snapshot_file_name, write_leads, write_snapshot};

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::scraping::engines::google;
use crate::scraping::{ScrapingError, ScrapingService};

/// Placeholder used for fields a result block did not carry.
pub const NOT_AVAILABLE: &str = "N/A";

/// Source label written into every harvested lead.
pub const LEAD_SOURCE: &str = "Google Search";

/// Results shown per result page.
const RESULTS_PER_PAGE: usize = 10;

/// One harvested lead, in CSV column order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    /// Result heading, taken as the company name.
    pub company_name: String,
    /// Result snippet or `N/A`.
    pub description: String,
    /// Display URL or `N/A`.
    pub website: String,
    /// Where the lead came from.
    pub source: String,
    /// Harvest date, `YYYY-MM-DD`.
    pub date_found: String,
}

impl Lead {
    /// Description cut to `max_chars` characters and suffixed with `...`.
    #[must_use]
    pub fn preview(&self, max_chars: usize) -> String {
        let mut preview: String = self.description.chars().take(max_chars).collect();
        preview.push_str("...");
        preview
    }
}

/// Parameters of one harvest run.
#[derive(Clone, Debug)]
pub struct HarvestOptions {
    /// Industry or company type to look for.
    pub search_term: String,
    /// Number of result pages to walk.
    pub num_pages: usize,
    /// Directory receiving the CSV snapshot.
    pub output_dir: PathBuf,
}

impl HarvestOptions {
    /// Options for `search_term` with two pages written to the working directory.
    #[must_use]
    pub fn new(search_term: impl Into<String>) -> Self {
        Self {
            search_term: search_term.into(),
            num_pages: 2,
            output_dir: PathBuf::from("."),
        }
    }

    /// Set the number of pages.
    #[must_use]
    pub const fn with_pages(mut self, num_pages: usize) -> Self {
        self.num_pages = num_pages;
        self
    }

    /// Set the snapshot directory.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}

/// Outcome of a harvest run.
#[derive(Clone, Debug, Default)]
pub struct HarvestReport {
    /// Every lead found, in page order.
    pub leads: Vec<Lead>,
    /// Pages fetched and parsed.
    pub pages_processed: usize,
    /// Pages that failed and were skipped.
    pub pages_failed: usize,
    /// CSV snapshot path, when any lead was found.
    pub snapshot: Option<PathBuf>,
}

/// Walk the result pages for `options.search_term` and snapshot the leads.
///
/// Failing pages are logged and skipped; only the snapshot write can fail
/// the run.
///
/// # Errors
/// Returns an error if the CSV snapshot cannot be written.
pub async fn harvest(
    service: &ScrapingService,
    options: &HarvestOptions,
) -> Result<HarvestReport, ScrapingError> {
    let mut report = HarvestReport::default();
    let term = urlencoding::encode(options.search_term.trim()).into_owned();

    for page in 0..options.num_pages {
        service.pause_between_pages().await;

        let url = service.search_url(&format!(
            "{term}+companies&start={}",
            page * RESULTS_PER_PAGE
        ));

        let today = Local::now().date_naive();
        let outcome = match service.fetch_html(&url).await {
            Ok(html) => leads_from_serp(&html, today),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(leads) => {
                report.leads.extend(leads);
                report.pages_processed += 1;
                tracing::info!("Processed page {}", page + 1);
            }
            Err(e) => {
                report.pages_failed += 1;
                tracing::warn!("Error on page {}: {e}", page + 1);
            }
        }
    }

    if !report.leads.is_empty() {
        let path = write_snapshot(&options.output_dir, &report.leads, Local::now().naive_local())?;
        tracing::info!(
            "Successfully scraped {} leads and saved to {}",
            report.leads.len(),
            path.display()
        );
        report.snapshot = Some(path);
    }

    Ok(report)
}

/// Convert one result page into leads; blocks without a heading are skipped.
///
/// # Errors
/// Returns an error if the page cannot be parsed.
pub fn leads_from_serp(html: &str, date_found: NaiveDate) -> Result<Vec<Lead>, ScrapingError> {
    let date = date_found.format("%Y-%m-%d").to_string();

    let leads = google::parse_results(html, usize::MAX)?
        .into_iter()
        .filter_map(|result| {
            let company_name = result.title?;
            Some(Lead {
                company_name,
                description: result.snippet.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                website: result.cite.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                source: LEAD_SOURCE.to_string(),
                date_found: date.clone(),
            })
        })
        .collect();

    Ok(leads)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::Router;
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::get;

    use super::*;
    use crate::test_support::{quiet_config, spawn_site};

    const PAGE: &str = r#"
        <div class="g"><h3>Acme Software</h3><cite>acme.example</cite>
          <div class="VwiC3b">Custom software in Karachi.</div></div>
        <div class="g"><h3>Beta Labs</h3></div>
        <div class="g"><a href="https://nowhere.example">untitled</a></div>"#;

    #[test]
    fn test_leads_from_serp() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap_or_default();
        let leads = leads_from_serp(PAGE, date).unwrap_or_default();

        assert_eq!(leads.len(), 2);
        assert_eq!(
            leads[0],
            Lead {
                company_name: "Acme Software".to_string(),
                description: "Custom software in Karachi.".to_string(),
                website: "acme.example".to_string(),
                source: "Google Search".to_string(),
                date_found: "2024-03-09".to_string(),
            }
        );
        assert_eq!(leads[1].description, NOT_AVAILABLE);
        assert_eq!(leads[1].website, NOT_AVAILABLE);
    }

    #[test]
    fn test_lead_preview() {
        let lead = Lead {
            company_name: "Acme".to_string(),
            description: "abcdef".to_string(),
            website: NOT_AVAILABLE.to_string(),
            source: LEAD_SOURCE.to_string(),
            date_found: "2024-01-01".to_string(),
        };
        assert_eq!(lead.preview(3), "abc...");
        assert_eq!(lead.preview(100), "abcdef...");
    }

    #[tokio::test]
    async fn test_harvest_skips_failed_pages_and_writes_snapshot() {
        let router = Router::new().route(
            "/search",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let start = params.get("start").cloned().unwrap_or_default();
                let query = params.get("q").cloned().unwrap_or_default();
                if query != "software houses companies" {
                    return (StatusCode::BAD_REQUEST, String::new());
                }
                if start == "0" {
                    (StatusCode::OK, PAGE.to_string())
                } else {
                    (StatusCode::SERVICE_UNAVAILABLE, String::new())
                }
            }),
        );
        let base = spawn_site(router).await;
        let service = ScrapingService::new(quiet_config(&base)).ok();
        let Some(service) = service else { unreachable!() };

        let dir = std::env::temp_dir().join(format!("lead_scout_harvest_{}", std::process::id()));
        let options = HarvestOptions::new("software houses").with_output_dir(&dir);
        let report = harvest(&service, &options).await.ok().unwrap_or_default();

        assert_eq!(report.leads.len(), 2);
        assert_eq!(report.pages_processed, 1);
        assert_eq!(report.pages_failed, 1);

        let snapshot = report.snapshot.unwrap_or_default();
        let written = std::fs::read_to_string(&snapshot).unwrap_or_default();
        assert!(written.starts_with("company_name,description,website,source,date_found"));
        assert!(written.contains("Acme Software"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_harvest_without_leads_writes_nothing() {
        let router = Router::new().route("/search", get(|| async { "<html><body></body></html>" }));
        let base = spawn_site(router).await;
        let service = ScrapingService::new(quiet_config(&base)).ok();
        let Some(service) = service else { unreachable!() };

        let dir = std::env::temp_dir().join(format!("lead_scout_empty_{}", std::process::id()));
        let options = HarvestOptions::new("nothing").with_pages(1).with_output_dir(&dir);
        let report = harvest(&service, &options).await.ok().unwrap_or_default();

        assert!(report.leads.is_empty());
        assert_eq!(report.pages_processed, 1);
        assert!(report.snapshot.is_none());
        assert!(!dir.exists());
    }
}
