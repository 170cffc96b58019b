//! Text extraction helpers shared by every scraper.

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::scraping::error::ScrapingError;

/// Parse a CSS selector, mapping failures to [`ScrapingError::HtmlParse`].
///
/// # Errors
/// Returns an error if the selector is invalid.
pub fn selector(css: &str) -> Result<Selector, ScrapingError> {
    Selector::parse(css).map_err(|e| ScrapingError::HtmlParse(format!("Invalid selector {css}: {e:?}")))
}

/// Collapsed text of an element.
#[must_use]
pub fn element_text(element: &ElementRef<'_>) -> String {
    clean_text(&element.text().collect::<Vec<_>>().join(" "))
}

/// All text of a document, one space between text nodes.
#[must_use]
pub fn page_text(html: &str) -> String {
    let document = Html::parse_document(html);
    clean_text(&document.root_element().text().collect::<Vec<_>>().join(" "))
}

/// Text of the element following the first `tag` whose own text contains `label`.
///
/// Only direct text children count, so a wrapper holding the whole
/// label/value row never matches. "Following" means the next `tag` in
/// document order, which is how label/value pairs are laid out on company
/// profile pages.
///
/// # Errors
/// Returns an error if `tag` is not a valid selector.
pub fn value_after_label(html: &str, tag: &str, label: &str) -> Result<Option<String>, ScrapingError> {
    let document = Html::parse_document(html);
    let tag_selector = selector(tag)?;
    let elements: Vec<ElementRef<'_>> = document.select(&tag_selector).collect();

    let value = elements
        .iter()
        .position(|element| own_text(element).contains(label))
        .and_then(|idx| elements.get(idx + 1))
        .map(element_text);

    Ok(value)
}

/// Concatenated direct text children of an element.
fn own_text(element: &ElementRef<'_>) -> String {
    element
        .children()
        .filter_map(|child| child.value().as_text().map(|text| &**text))
        .collect()
}

/// Clean extracted text.
#[must_use]
pub fn clean_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut last_was_space = false;

    for c in text.chars() {
        if c.is_whitespace() {
            if !last_was_space {
                result.push(' ');
                last_was_space = true;
            }
        } else {
            result.push(c);
            last_was_space = false;
        }
    }

    result.trim().to_string()
}

/// Extract the host of a URL, lowercased.
#[must_use]
pub fn extract_domain(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_lowercase))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text() {
        let text = "  Hello   world  \n\t  test  ";
        assert_eq!(clean_text(text), "Hello world test");
    }

    #[test]
    fn test_page_text_joins_nodes() {
        let html = "<html><body><p>Jane Doe</p><p>- CEO</p><div>Call <b>555-123-4567</b></div></body></html>";
        assert_eq!(page_text(html), "Jane Doe - CEO Call 555-123-4567");
    }

    #[test]
    fn test_value_after_label() {
        let html = r#"
            <div>
              <span>Founded</span><span>1998</span>
              <span>Industries</span><span>Software, Cloud</span>
            </div>"#;
        let value = value_after_label(html, "span", "Industries").ok().flatten();
        assert_eq!(value.as_deref(), Some("Software, Cloud"));

        let missing = value_after_label(html, "span", "Employee Count").ok().flatten();
        assert!(missing.is_none());
    }

    #[test]
    fn test_value_after_label_nested_rows() {
        let html = r#"<div class="profile">
            <div class="row"><div>Revenue</div><div>$4.2B</div></div>
            <div class="row"><div>Industry</div><div>Aerospace</div></div>
        </div>"#;
        assert_eq!(
            value_after_label(html, "div", "Revenue").ok().flatten().as_deref(),
            Some("$4.2B")
        );
        assert_eq!(
            value_after_label(html, "div", "Industry").ok().flatten().as_deref(),
            Some("Aerospace")
        );
    }

    #[test]
    fn test_value_after_label_wrapped_span() {
        let html = "<span class=\"field\"><span>Employee Count</span><span>51-100</span></span>";
        assert_eq!(
            value_after_label(html, "span", "Employee Count").ok().flatten().as_deref(),
            Some("51-100")
        );
    }

    #[test]
    fn test_value_after_label_last_element() {
        let html = "<div>Revenue</div>";
        let value = value_after_label(html, "div", "Revenue").ok().flatten();
        assert!(value.is_none());
    }

    #[test]
    fn test_extract_domain() {
        assert_eq!(
            extract_domain("https://WWW.LinkedIn.com/company/acme"),
            Some("www.linkedin.com".to_string())
        );
        assert_eq!(extract_domain("invalid"), None);
    }

    #[test]
    fn test_invalid_selector() {
        assert!(matches!(selector("<<"), Err(ScrapingError::HtmlParse(_))));
    }
}
