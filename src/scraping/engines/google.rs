//! Google result page parsing.
//!
//! Works on the plain HTML result page: organic results are `div.g` blocks,
//! the knowledge panel lives under `.kp-header`.

use scraper::{ElementRef, Html};

use crate::scraping::content::{element_text, selector};
use crate::scraping::error::ScrapingError;
use crate::scraping::types::{KnowledgePanel, SerpResult};

/// Parse the organic result blocks of a result page, keeping at most `limit`.
///
/// # Errors
/// Returns an error if a selector fails to compile.
pub fn parse_results(html: &str, limit: usize) -> Result<Vec<SerpResult>, ScrapingError> {
    let document = Html::parse_document(html);

    let result_selector = selector("div.g")?;
    let title_selector = selector("h3")?;
    let link_selector = selector("a[href]")?;
    let snippet_selector = selector(".VwiC3b")?;
    let cite_selector = selector("cite")?;

    let results: Vec<SerpResult> = document
        .select(&result_selector)
        .take(limit)
        .map(|block| SerpResult {
            title: first_text(&block, &title_selector),
            link: block
                .select(&link_selector)
                .next()
                .and_then(|a| a.value().attr("href"))
                .and_then(extract_result_url),
            snippet: first_text(&block, &snippet_selector),
            cite: first_text(&block, &cite_selector),
        })
        .collect();

    if results.is_empty() {
        tracing::warn!("No result blocks found in result page");
    }

    Ok(results)
}

/// Parse the knowledge panel, if the page has one.
///
/// # Errors
/// Returns an error if a selector fails to compile.
pub fn parse_knowledge_panel(html: &str) -> Result<Option<KnowledgePanel>, ScrapingError> {
    let document = Html::parse_document(html);

    let panel_selector = selector(".kp-header")?;
    let description_selector = selector(".kno-rdesc span")?;
    let row_selector = selector(".rVusze")?;

    let Some(panel) = document.select(&panel_selector).next() else {
        return Ok(None);
    };

    let mut knowledge = KnowledgePanel {
        description: first_text(&panel, &description_selector),
        ..KnowledgePanel::default()
    };

    for row in panel.select(&row_selector) {
        let text = row.text().collect::<String>().to_lowercase();
        if let Some(value) = after_marker(&text, "founded:") {
            knowledge.founded = Some(value);
        } else if let Some(value) = after_marker(&text, "headquarters:") {
            knowledge.headquarters = Some(value);
        } else if let Some(value) = after_marker(&text, "revenue:") {
            knowledge.revenue = Some(value);
        } else if let Some(value) = after_marker(&text, "industry:") {
            knowledge.industry = Some(value);
        }
    }

    Ok(Some(knowledge))
}

/// Text after `marker`, up to the next occurrence of it.
fn after_marker(text: &str, marker: &str) -> Option<String> {
    text.split(marker).nth(1).map(|value| value.trim().to_string())
}

/// Trimmed text of the first match, `None` when absent or empty.
fn first_text(element: &ElementRef<'_>, css: &scraper::Selector) -> Option<String> {
    element
        .select(css)
        .next()
        .map(|e| element_text(&e))
        .filter(|text| !text.is_empty())
}

/// Turn a result anchor into an absolute target URL.
///
/// Google wraps targets as `/url?q=<target>&sa=...`; only `http(s)` targets
/// are kept.
fn extract_result_url(href: &str) -> Option<String> {
    let target = if let Some(rest) = href.strip_prefix("/url?") {
        rest.split('&')
            .find_map(|pair| pair.strip_prefix("q=").or_else(|| pair.strip_prefix("url=")))
            .map(|encoded| {
                urlencoding::decode(encoded)
                    .map(|s| s.into_owned())
                    .unwrap_or_else(|_| encoded.to_string())
            })?
    } else {
        href.to_string()
    };

    target.starts_with("http").then_some(target)
}
