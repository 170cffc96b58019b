//! Data sources that each produce a partial company profile.

use async_trait::async_trait;

use super::heuristics::Heuristics;
use super::types::{PlatformPresence, SOCIAL_DOMAINS, SocialPlatform, SourceFindings};
use crate::scraping::content::{extract_domain, page_text, value_after_label};
use crate::scraping::engines::google;
use crate::scraping::{ScrapingError, ScrapingService, SerpResult};

/// One place company facts are read from.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Look `company` up and report whatever was found.
    async fn gather(
        &self,
        service: &ScrapingService,
        heuristics: &Heuristics,
        company: &str,
    ) -> Result<SourceFindings, ScrapingError>;
}

/// Every source, in merge order.
#[must_use]
pub fn default_sources() -> Vec<Box<dyn ProfileSource>> {
    vec![
        Box::new(SearchSource),
        Box::new(CrunchbaseSource),
        Box::new(BloombergSource),
        Box::new(SocialMediaSource),
        Box::new(LinkedInSource),
    ]
}

/// Result page for an already encoded query.
async fn search(service: &ScrapingService, q: &str) -> Result<String, ScrapingError> {
    service.fetch_html(&service.search_url(q)).await
}

/// Knowledge panel, official website and free-text facts from result pages.
pub struct SearchSource;

#[async_trait]
impl ProfileSource for SearchSource {
    fn name(&self) -> &'static str {
        "search"
    }

    async fn gather(
        &self,
        service: &ScrapingService,
        heuristics: &Heuristics,
        company: &str,
    ) -> Result<SourceFindings, ScrapingError> {
        let name = urlencoding::encode(company).into_owned();
        let mut findings = SourceFindings::default();

        match search(service, &format!("{name}+company+wikipedia"))
            .await
            .and_then(|html| google::parse_knowledge_panel(&html))
        {
            Ok(Some(panel)) => {
                findings.description = panel.description;
                findings.founded = panel.founded;
                findings.headquarters = panel.headquarters;
                findings.revenue = panel.revenue;
                findings.industry = panel.industry;
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("Knowledge panel lookup failed for {company}: {e}"),
        }

        match search(service, &format!("{name}+company+official+website"))
            .await
            .and_then(|html| google::parse_results(&html, 3))
        {
            Ok(results) => collect_links(&results, &mut findings),
            Err(e) => tracing::warn!("Website lookup failed for {company}: {e}"),
        }

        match search(service, &format!("{name}+company+employees+revenue+industry")).await {
            Ok(html) => {
                let text = page_text(&html).to_lowercase();
                if let Some(size) = heuristics.company_size(&text) {
                    findings.company_size = Some(size);
                }
                if let Some(industry) = heuristics.industry(&text) {
                    findings.industry = Some(industry);
                }
                if let Some(revenue) = heuristics.revenue(&text) {
                    findings.revenue = Some(revenue);
                }
            }
            Err(e) => tracing::warn!("Company facts lookup failed for {company}: {e}"),
        }

        Ok(findings)
    }
}

/// Social links are keyed by domain; the first other link is the website.
fn collect_links(results: &[SerpResult], findings: &mut SourceFindings) {
    for link in results.iter().filter_map(|r| r.link.as_deref()) {
        let domain = extract_domain(link).unwrap_or_default();
        if SOCIAL_DOMAINS.iter().any(|social| domain.contains(social)) {
            findings.social_profiles.push((domain, link.to_string()));
        } else if findings.website.is_none() {
            findings.website = Some(link.to_string());
        }
    }
}

/// URL slugs tried for directory style profile pages.
fn slugs(company: &str) -> Vec<String> {
    let lower = company.to_lowercase();
    let mut slugs: Vec<String> = Vec::with_capacity(3);
    for separator in ["-", "", "_"] {
        let slug = lower.replace(' ', separator);
        if !slugs.contains(&slug) {
            slugs.push(slug);
        }
    }
    slugs
}

/// First slug page under `base` answering `200`.
async fn first_profile_page(service: &ScrapingService, base: &str, company: &str) -> Option<String> {
    for slug in slugs(company) {
        let url = format!("{}/{slug}", base.trim_end_matches('/'));
        match service.fetch_page(&url).await {
            Ok(page) if page.is_ok() => return Some(page.body),
            Ok(page) => tracing::debug!("{url} answered {}", page.status),
            Err(e) => tracing::debug!("{url} failed: {e}"),
        }
    }
    None
}

/// Industry and headcount from a Crunchbase organization page.
pub struct CrunchbaseSource;

#[async_trait]
impl ProfileSource for CrunchbaseSource {
    fn name(&self) -> &'static str {
        "crunchbase"
    }

    async fn gather(
        &self,
        service: &ScrapingService,
        _heuristics: &Heuristics,
        company: &str,
    ) -> Result<SourceFindings, ScrapingError> {
        let base = &service.config().endpoints.crunchbase;
        let Some(html) = first_profile_page(service, base, company).await else {
            return Ok(SourceFindings::default());
        };

        Ok(SourceFindings {
            industry: value_after_label(&html, "span", "Industries")?,
            company_size: value_after_label(&html, "span", "Employee Count")?,
            ..SourceFindings::default()
        })
    }
}

/// Revenue and industry from a Bloomberg company profile.
pub struct BloombergSource;

#[async_trait]
impl ProfileSource for BloombergSource {
    fn name(&self) -> &'static str {
        "bloomberg"
    }

    async fn gather(
        &self,
        service: &ScrapingService,
        _heuristics: &Heuristics,
        company: &str,
    ) -> Result<SourceFindings, ScrapingError> {
        let base = &service.config().endpoints.bloomberg;
        let Some(html) = first_profile_page(service, base, company).await else {
            return Ok(SourceFindings::default());
        };

        Ok(SourceFindings {
            revenue: value_after_label(&html, "div", "Revenue")?,
            industry: value_after_label(&html, "div", "Industry")?,
            ..SourceFindings::default()
        })
    }
}

/// Official Facebook, Twitter and Instagram accounts.
pub struct SocialMediaSource;

#[async_trait]
impl ProfileSource for SocialMediaSource {
    fn name(&self) -> &'static str {
        "social media"
    }

    async fn gather(
        &self,
        service: &ScrapingService,
        heuristics: &Heuristics,
        company: &str,
    ) -> Result<SourceFindings, ScrapingError> {
        let name = urlencoding::encode(company).into_owned();
        let mut findings = SourceFindings::default();

        for platform in SocialPlatform::SEARCHED {
            let q = format!("site:{}+{name}+official", platform.domain());
            let results = match search(service, &q)
                .await
                .and_then(|html| google::parse_results(&html, 2))
            {
                Ok(results) => results,
                Err(e) => {
                    tracing::warn!("Error searching {}: {e}", platform.key());
                    continue;
                }
            };

            let Some(result) = results.iter().find(|r| r.link.is_some()) else {
                continue;
            };
            let (Some(url), Some(snippet)) = (&result.link, &result.snippet) else {
                continue;
            };

            let text = snippet.to_lowercase();
            findings.presence.push((
                platform,
                PlatformPresence {
                    url: Some(url.clone()),
                    followers: heuristics.followers(&text),
                    description: Some(text),
                },
            ));
            findings.social_profiles.push((platform.key().to_string(), url.clone()));
        }

        Ok(findings)
    }
}

/// Company page facts from a LinkedIn result snippet.
pub struct LinkedInSource;

#[async_trait]
impl ProfileSource for LinkedInSource {
    fn name(&self) -> &'static str {
        "linkedin"
    }

    async fn gather(
        &self,
        service: &ScrapingService,
        heuristics: &Heuristics,
        company: &str,
    ) -> Result<SourceFindings, ScrapingError> {
        let name = urlencoding::encode(company).into_owned();
        let html = search(service, &format!("site:linkedin.com/company/+{name}+about")).await?;
        let results = google::parse_results(&html, 2)?;

        let mut findings = SourceFindings::default();
        let company_page = results.iter().find_map(|r| {
            let url = r.link.as_deref()?;
            let snippet = r.snippet.as_deref()?;
            url.contains("linkedin.com/company/").then_some((url, snippet))
        });

        if let Some((url, snippet)) = company_page {
            findings.linkedin = Some(heuristics.linkedin_insights(&snippet.to_lowercase()));
            findings
                .social_profiles
                .push((SocialPlatform::LinkedIn.key().to_string(), url.to_string()));
        }

        Ok(findings)
    }
}
