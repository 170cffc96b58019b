//! Core types for scraped pages.

use serde::{Deserialize, Serialize};

/// A fetched HTTP response body.
#[derive(Clone, Debug)]
pub struct FetchedPage {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: String,
}

impl FetchedPage {
    /// Whether the page answered `200 OK`.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// One organic result block of a search result page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerpResult {
    /// Result heading.
    pub title: Option<String>,
    /// Absolute target URL.
    pub link: Option<String>,
    /// Snippet text below the heading.
    pub snippet: Option<String>,
    /// Display URL.
    pub cite: Option<String>,
}

/// Fields read from a search engine knowledge panel.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgePanel {
    /// Short description.
    pub description: Option<String>,
    /// Founding date.
    pub founded: Option<String>,
    /// Headquarters location.
    pub headquarters: Option<String>,
    /// Revenue figure.
    pub revenue: Option<String>,
    /// Industry.
    pub industry: Option<String>,
}
