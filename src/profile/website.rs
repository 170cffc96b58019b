//! Enrichment from the company's own website.

use super::contacts::extract_contacts;
use super::heuristics::Heuristics;
use super::technologies::detect_technologies;
use super::types::CompanyProfile;
use crate::scraping::content::page_text;
use crate::scraping::{ScrapingError, ScrapingService};

/// Pages that usually list people and contact channels.
pub const CONTACT_PAGES: [&str; 4] = ["contact", "about", "team", "leadership"];

/// Detect technologies and collect contacts from `profile.website`.
///
/// Does nothing without a website. A failing main page is logged and leaves
/// the profile untouched; failing contact pages are skipped.
pub async fn enrich_from_website(
    service: &ScrapingService,
    heuristics: &Heuristics,
    profile: &mut CompanyProfile,
) {
    let Some(website) = profile.website.clone() else {
        return;
    };

    if let Err(e) = enrich(service, heuristics, &website, profile).await {
        tracing::warn!("Error getting website info for {website}: {e}");
    }
}

async fn enrich(
    service: &ScrapingService,
    heuristics: &Heuristics,
    website: &str,
    profile: &mut CompanyProfile,
) -> Result<(), ScrapingError> {
    let main_page = service.fetch_page(website).await?;
    profile.technologies = detect_technologies(&main_page.body);

    let base = website.trim_end_matches('/');
    for page in CONTACT_PAGES {
        let url = format!("{base}/{page}");
        match service.fetch_page(&url).await {
            Ok(contact_page) if contact_page.is_ok() => {
                extract_contacts(heuristics, &page_text(&contact_page.body), &mut profile.contacts);
            }
            Ok(contact_page) => tracing::debug!("{url} answered {}", contact_page.status),
            Err(e) => tracing::debug!("{url} failed: {e}"),
        }
    }

    extract_contacts(heuristics, &page_text(&main_page.body), &mut profile.contacts);
    Ok(())
}
