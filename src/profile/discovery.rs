//! Company discovery from search filters.

use serde::{Deserialize, Serialize};

use super::heuristics::Heuristics;
use crate::scraping::ScrapingError;
use crate::scraping::engines::google;

/// Number of result titles considered per discovery.
pub const DISCOVERY_LIMIT: usize = 5;

/// Title fragments marking a listicle rather than a company.
const LISTICLE_MARKERS: [&str; 3] = ["list of", "top 10", "best"];

/// Company size bucket → search phrase.
const SIZE_PHRASES: [(&str, &str); 6] = [
    ("1-10", "small"),
    ("11-50", "small to medium"),
    ("51-200", "medium"),
    ("201-500", "medium to large"),
    ("501-1000", "large"),
    ("1001+", "enterprise"),
];

/// Filters used when no company name is given.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchFilters {
    /// Industry, e.g. `fintech`.
    pub industry: Option<String>,
    /// Location, e.g. `Berlin`.
    pub location: Option<String>,
    /// Size bucket such as `51-200`.
    pub size: Option<String>,
    /// Comma-separated keywords.
    pub keywords: Option<String>,
}

impl SearchFilters {
    /// Search terms built from the filters; blank filters and unknown sizes
    /// contribute nothing.
    #[must_use]
    pub fn search_terms(&self) -> Vec<String> {
        let mut terms = Vec::new();

        if let Some(industry) = non_blank(self.industry.as_deref()) {
            terms.push(format!("{industry} companies"));
        }
        if let Some(location) = non_blank(self.location.as_deref()) {
            terms.push(format!("in {location}"));
        }
        if let Some(size) = non_blank(self.size.as_deref()) {
            if let Some((_, phrase)) = SIZE_PHRASES.iter().find(|(bucket, _)| *bucket == size) {
                terms.push(format!("{phrase} companies"));
            }
        }
        if let Some(keywords) = non_blank(self.keywords.as_deref()) {
            terms.extend(
                keywords
                    .split(',')
                    .map(str::trim)
                    .filter(|k| !k.is_empty())
                    .map(str::to_string),
            );
        }

        terms
    }

    /// Encoded `q` value for the discovery query.
    ///
    /// # Errors
    /// Returns [`ScrapingError::NoCriteria`] when the filters yield no term.
    pub fn query(&self) -> Result<String, ScrapingError> {
        let terms = self.search_terms();
        if terms.is_empty() {
            return Err(ScrapingError::NoCriteria);
        }
        Ok(format!("{}+companies", urlencoding::encode(&terms.join(" "))))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Company names among the top result titles of a discovery page.
///
/// # Errors
/// Returns an error if the page cannot be parsed.
pub fn company_names(html: &str, heuristics: &Heuristics) -> Result<Vec<String>, ScrapingError> {
    let names = google::parse_results(html, DISCOVERY_LIMIT)?
        .into_iter()
        .filter_map(|result| result.title)
        .filter(|title| {
            let lower = title.to_lowercase();
            !LISTICLE_MARKERS.iter().any(|marker| lower.contains(marker))
        })
        .map(|title| heuristics.clean_company_name(&title))
        .filter(|name| !name.is_empty())
        .collect();

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filters(industry: &str, location: &str, size: &str, keywords: &str) -> SearchFilters {
        let opt = |s: &str| (!s.is_empty()).then(|| s.to_string());
        SearchFilters {
            industry: opt(industry),
            location: opt(location),
            size: opt(size),
            keywords: opt(keywords),
        }
    }

    #[test]
    fn test_search_terms() {
        let f = filters("fintech", "Berlin", "51-200", "payments, lending");
        assert_eq!(
            f.search_terms(),
            vec!["fintech companies", "in Berlin", "medium companies", "payments", "lending"]
        );
    }

    #[test]
    fn test_unknown_size_is_ignored() {
        let f = filters("", "", "huge", "");
        assert!(f.search_terms().is_empty());
        assert!(matches!(f.query(), Err(ScrapingError::NoCriteria)));
    }

    #[test]
    fn test_query_encoding() {
        let f = filters("", "", "1001+", "");
        assert_eq!(f.query().ok().as_deref(), Some("enterprise%20companies+companies"));
    }

    #[test]
    fn test_filters_deserialize_partially() {
        let f: SearchFilters = serde_json::from_str(r#"{"industry":"retail"}"#).unwrap_or_default();
        assert_eq!(f.industry.as_deref(), Some("retail"));
        assert!(f.keywords.is_none());
    }

    #[test]
    fn test_company_names_skip_listicles() {
        let heuristics = Heuristics::new().unwrap_or_else(|e| panic!("patterns compile: {e}"));
        let html = r#"
            <div class="g"><h3>Top 10 Fintech Startups</h3></div>
            <div class="g"><h3>Solaris | Banking as a Service</h3></div>
            <div class="g"><h3>List of banks in Germany</h3></div>
            <div class="g"><a href="https://n26.com">no title</a></div>
            <div class="g"><h3>Penta Inc.</h3></div>
            <div class="g"><h3>Sixth Result LLC</h3></div>"#;

        assert_eq!(
            company_names(html, &heuristics).unwrap_or_default(),
            vec!["Solaris", "Penta"]
        );
    }
}
