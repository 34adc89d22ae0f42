//! HTML parser for extracting anchor links
//!
//! Parsing is permissive (html5ever error recovery); malformed markup never
//! produces an error.

use scraper::{Html, Selector};
use url::Url;

/// Extracts every anchor reference from an HTML document as an absolute URL
///
/// # Link Extraction Rules
///
/// - Every `<a>` element with an `href` attribute yields exactly one URL,
///   in document order
/// - The href is resolved against `base_url` with standard URL resolution
/// - Anchors without `href` are skipped
/// - An href the resolver rejects is skipped and logged at debug level
///
/// No scheme filtering happens here: `mailto:` and `javascript:` links come
/// back as they resolve.
///
/// # Example
///
/// ```
/// use link_tally::crawler::extract_links;
/// use url::Url;
///
/// let html = r#"<html><body><a href="/path/to/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://blog.boot.dev/").unwrap();
/// let links = extract_links(html, &base_url);
/// assert_eq!(links, vec!["https://blog.boot.dev/path/to/page".to_string()]);
/// ```
pub fn extract_links(html: &str, base_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);

    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, base_url))
        .collect()
}

fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    match base_url.join(href) {
        Ok(absolute_url) => Some(absolute_url.to_string()),
        Err(e) => {
            tracing::debug!("Ignoring unresolvable href {:?}: {}", href, e);
            None
        }
    }
}
