//! Demo company directory backing the `/search` endpoint.

use std::collections::HashSet;

use serde::Serialize;

/// Maximum number of records a directory search returns.
pub const MAX_RESULTS: usize = 10;

/// A company entry of the demo directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CompanyRecord {
    /// Company name.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Industry label.
    pub industry: &'static str,
    /// Bare website domain.
    pub website: &'static str,
    /// Headquarters location.
    pub location: &'static str,
}

const fn record(
    name: &'static str,
    description: &'static str,
    industry: &'static str,
    website: &'static str,
    location: &'static str,
) -> CompanyRecord {
    CompanyRecord {
        name,
        description,
        industry,
        website,
        location,
    }
}

const TECHNOLOGY: &[CompanyRecord] = &[
    record("Google", "Search engine and technology company", "Technology", "google.com", "Mountain View, California"),
    record("Microsoft", "Software and cloud computing company", "Technology", "microsoft.com", "Redmond, Washington"),
    record("Apple", "Consumer electronics and software company", "Technology", "apple.com", "Cupertino, California"),
];

const AUTOMOTIVE: &[CompanyRecord] = &[
    record("Tesla", "Electric vehicle and clean energy company", "Automotive", "tesla.com", "Austin, Texas"),
    record("Ford", "Automobile manufacturer", "Automotive", "ford.com", "Dearborn, Michigan"),
];

const RETAIL: &[CompanyRecord] = &[
    record("Amazon", "E-commerce and technology company", "Retail", "amazon.com", "Seattle, Washington"),
    record("Walmart", "Retail corporation", "Retail", "walmart.com", "Bentonville, Arkansas"),
];

const FINANCE: &[CompanyRecord] = &[
    record("JPMorgan Chase", "Banking and financial services", "Finance", "jpmorganchase.com", "New York City, New York"),
    record("Goldman Sachs", "Investment banking and securities", "Finance", "goldmansachs.com", "New York City, New York"),
];

const HEALTHCARE: &[CompanyRecord] = &[
    record("Johnson & Johnson", "Healthcare and pharmaceutical company", "Healthcare", "jnj.com", "New Brunswick, New Jersey"),
    record("UnitedHealth Group", "Healthcare and insurance company", "Healthcare", "unitedhealthgroup.com", "Minnetonka, Minnesota"),
];

/// Hardcoded industry → companies mapping, in category order.
#[derive(Clone, Debug)]
pub struct CompanyDirectory {
    categories: Vec<(&'static str, &'static [CompanyRecord])>,
}

impl Default for CompanyDirectory {
    fn default() -> Self {
        Self::demo()
    }
}

impl CompanyDirectory {
    /// The built-in demo dataset.
    #[must_use]
    pub fn demo() -> Self {
        Self {
            categories: vec![
                ("technology", TECHNOLOGY),
                ("automotive", AUTOMOTIVE),
                ("retail", RETAIL),
                ("finance", FINANCE),
                ("healthcare", HEALTHCARE),
            ],
        }
    }

    /// Category names in directory order.
    pub fn categories(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.categories.iter().map(|(name, _)| *name)
    }

    /// Case-insensitive text search.
    ///
    /// A query matching a category name selects the whole category; otherwise
    /// companies match on name, description, industry or location. Results are
    /// unique by name and capped at [`MAX_RESULTS`].
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<CompanyRecord> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let query = query.as_str();
        let matches = self.categories.iter().flat_map(|(category, companies)| {
            let whole_category = category.contains(query);
            companies
                .iter()
                .filter(move |company| whole_category || company.matches(query))
        });

        let mut seen = HashSet::new();
        matches
            .filter(|company| seen.insert(company.name))
            .take(MAX_RESULTS)
            .copied()
            .collect()
    }
}

impl CompanyRecord {
    fn matches(&self, query: &str) -> bool {
        [self.name, self.description, self.industry, self.location]
            .iter()
            .any(|field| field.to_lowercase().contains(query))
    }
}
