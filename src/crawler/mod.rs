//! Crawler module for page fetching and link tallying
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching and response classification
//! - HTML parsing and link extraction
//! - Depth-first traversal with per-page link counts
//! - Error reporting for skipped pages

mod engine;
mod fetcher;
mod link_count;
mod parser;
mod reporter;

pub use engine::{CrawlState, CrawlStats, Crawler};
pub use fetcher::{
    build_http_client, classify_response, fetch_page, is_html, Fetcher, HttpFetcher, PageError,
    PageResponse, TransportError,
};
pub use link_count::LinkCount;
pub use parser::extract_links;
pub use reporter::{ErrorReporter, NullReporter, StderrReporter};

use crate::config::Config;

/// Runs a complete crawl of the site at `seed` over HTTP
///
/// Builds an [`HttpFetcher`] from `config` and reports skipped pages to
/// `reporter`.
///
/// # Returns
///
/// * `Ok(LinkCount)` - Crawl finished (individual pages may have failed)
/// * `Err(TallyError)` - The client could not be built or `seed` is invalid
pub async fn crawl(
    seed: &str,
    config: &Config,
    reporter: &dyn ErrorReporter,
) -> crate::Result<LinkCount> {
    let crawler = Crawler::new(HttpFetcher::new(config)?);
    crawler.crawl_site(seed, reporter).await
}
