//! Crawl engine - depth-first traversal and link tallying
//!
//! The engine visits the seed, then walks same-domain links depth-first.
//! A link is followed only the first time its normalized key is seen; every
//! sighting, first or not, bumps the key's count.
//!
//! Traversal keeps an explicit stack of per-page link iterators instead of
//! recursing, which visits pages in exactly the order the recursive
//! formulation would.

use crate::crawler::fetcher::{fetch_page, Fetcher};
use crate::crawler::link_count::LinkCount;
use crate::crawler::parser::extract_links;
use crate::crawler::reporter::ErrorReporter;
use crate::url::{is_same_domain, normalize};
use crate::UrlError;
use url::Url;

/// Page counters kept alongside the link counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Pages fetched and parsed as HTML
    pub pages_fetched: usize,
    /// Pages reported and skipped
    pub pages_skipped: usize,
}

/// Mutable state threaded through a crawl
pub struct CrawlState<'r> {
    /// Counts per page key; doubles as the visited set
    pub link_counts: LinkCount,
    reporter: &'r dyn ErrorReporter,
    stats: CrawlStats,
}

impl<'r> CrawlState<'r> {
    /// Creates an empty state reporting page errors to `reporter`
    pub fn new(reporter: &'r dyn ErrorReporter) -> Self {
        Self::with_link_counts(LinkCount::new(), reporter)
    }

    /// Creates a state that continues from existing counts
    pub fn with_link_counts(link_counts: LinkCount, reporter: &'r dyn ErrorReporter) -> Self {
        Self {
            link_counts,
            reporter,
            stats: CrawlStats::default(),
        }
    }

    pub fn stats(&self) -> CrawlStats {
        self.stats
    }

    pub fn into_link_counts(self) -> LinkCount {
        self.link_counts
    }
}

/// Crawls one site through a [`Fetcher`]
pub struct Crawler<F> {
    fetcher: F,
}

impl<F: Fetcher> Crawler<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Crawls the whole site reachable from `seed`
    ///
    /// # Returns
    ///
    /// * `Ok(LinkCount)` - Counts for every same-domain page linked to
    /// * `Err(TallyError)` - `seed` is not an absolute URL with a host
    ///
    /// # Example
    ///
    /// ```no_run
    /// use link_tally::config::Config;
    /// use link_tally::crawler::{Crawler, HttpFetcher, StderrReporter};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let crawler = Crawler::new(HttpFetcher::new(&Config::default())?);
    /// let links = crawler.crawl_site("https://blog.boot.dev", &StderrReporter).await?;
    /// println!("{} pages linked", links.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn crawl_site(
        &self,
        seed: &str,
        reporter: &dyn ErrorReporter,
    ) -> crate::Result<LinkCount> {
        tracing::info!("Starting crawl at {}", seed);

        let mut state = CrawlState::new(reporter);
        self.crawl(seed, seed, &mut state).await?;

        let stats = state.stats();
        tracing::info!(
            "Crawl completed: {} pages fetched, {} skipped, {} links to {} distinct pages",
            stats.pages_fetched,
            stats.pages_skipped,
            state.link_counts.total(),
            state.link_counts.len()
        );

        Ok(state.into_link_counts())
    }

    /// Visits `current_url` and everything reachable from it on `base_url`'s host
    ///
    /// # Steps
    ///
    /// 1. Fetch the page; on any failure report `"<url>: <reason>"` and stop
    /// 2. Extract links, resolving against `base_url` (not the current page)
    /// 3. For each link in document order:
    ///    a. skip it if its host differs from `base_url`'s
    ///    b. note whether its key is new, then increment the key's count
    ///    c. if the key was new, explore that link fully before moving on
    ///
    /// Page failures are never returned as errors.
    pub async fn crawl<'s>(
        &self,
        base_url: &str,
        current_url: &str,
        state: &'s mut CrawlState<'_>,
    ) -> crate::Result<&'s LinkCount> {
        let base = parse_base(base_url)?;

        let mut stack = Vec::new();
        if let Some(links) = self.visit(&base, current_url, state).await {
            stack.push(links.into_iter());
        }

        while let Some(frame) = stack.last_mut() {
            let link = match frame.next() {
                Some(link) => link,
                None => {
                    stack.pop();
                    continue;
                }
            };

            let link_url = match Url::parse(&link) {
                Ok(u) => u,
                Err(e) => {
                    tracing::debug!("Failed to parse link {}: {}", link, e);
                    continue;
                }
            };

            if !is_same_domain(&base, &link_url) {
                tracing::trace!("Ignoring cross-domain link {}", link);
                continue;
            }

            let key = normalize(&link_url);
            let first_sighting = !state.link_counts.contains(key.as_str());
            state.link_counts.increment(key);

            if first_sighting {
                if let Some(links) = self.visit(&base, &link, state).await {
                    stack.push(links.into_iter());
                }
            }
        }

        Ok(&state.link_counts)
    }

    /// Fetches one page and returns its links, or reports why it was skipped
    async fn visit(
        &self,
        base: &Url,
        url: &str,
        state: &mut CrawlState<'_>,
    ) -> Option<Vec<String>> {
        match fetch_page(&self.fetcher, url).await {
            Ok(html) => {
                state.stats.pages_fetched += 1;
                let links = extract_links(&html, base);
                tracing::debug!("Fetched {} ({} links)", url, links.len());
                Some(links)
            }
            Err(e) => {
                state.stats.pages_skipped += 1;
                let message = format!("{}: {}", url, e);
                tracing::warn!("Skipping page {}", message);
                state.reporter.report(&message);
                None
            }
        }
    }
}

fn parse_base(base_url: &str) -> crate::UrlResult<Url> {
    let base = Url::parse(base_url).map_err(|source| UrlError::Parse {
        url: base_url.to_string(),
        source,
    })?;

    if base.host_str().is_none() {
        return Err(UrlError::MissingHost(base_url.to_string()));
    }

    Ok(base)
}
