//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings
//! - GET requests to fetch page content
//! - Classifying responses into HTML bodies or page errors

use crate::config::Config;
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, redirect::Policy, Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

/// Raw response handed back by a [`Fetcher`]
#[derive(Debug, Clone)]
pub struct PageResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Reason phrase sent by the server, when it differs from the canonical one
    pub reason: Option<String>,
    /// Content-Type header value, if any
    pub content_type: Option<String>,
    /// Page body; may be left empty when the page will be rejected anyway
    pub body: String,
}

impl PageResponse {
    /// Builds a 200 response with the given content type and body
    pub fn ok(content_type: &str, body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            reason: None,
            content_type: Some(content_type.to_string()),
            body: body.into(),
        }
    }

    /// Builds a bodiless response with the given status
    pub fn status(status: StatusCode) -> Self {
        Self {
            status,
            reason: None,
            content_type: None,
            body: String::new(),
        }
    }

    /// Sets the server's own reason phrase
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// The request could not complete (DNS, connection, timeout, body read)
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Why a page contributed no links
///
/// Every variant is recoverable: the page is reported and skipped.
#[derive(Debug, Clone, Error)]
pub enum PageError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("{code} {reason}")]
    HttpStatus { code: u16, reason: String },

    #[error("{0}")]
    UnsupportedContentType(String),
}

impl PageError {
    /// Prefers the server's reason phrase over the canonical one
    fn http_status(status: StatusCode, reason: Option<String>) -> Self {
        let reason = reason
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown").to_string());
        PageError::HttpStatus {
            code: status.as_u16(),
            reason,
        }
    }
}

/// Source of pages for the crawl engine
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Requests `url` and returns the response, or the transport failure
    async fn fetch(&self, url: &str) -> Result<PageResponse, TransportError>;
}

/// Returns true if a Content-Type value denotes HTML
pub fn is_html(content_type: &str) -> bool {
    content_type.contains("text/html")
}

/// Classifies a response: the HTML body on success, otherwise the reason
/// the page is skipped
///
/// | Condition | Result |
/// |-----------|--------|
/// | status != 200 | `HttpStatus` |
/// | no `text/html` in Content-Type | `UnsupportedContentType` |
/// | otherwise | `Ok(body)` |
pub fn classify_response(response: PageResponse) -> Result<String, PageError> {
    if response.status != StatusCode::OK {
        return Err(PageError::http_status(response.status, response.reason));
    }

    match response.content_type {
        Some(content_type) if is_html(&content_type) => Ok(response.body),
        Some(content_type) => Err(PageError::UnsupportedContentType(content_type)),
        None => Err(PageError::UnsupportedContentType(
            "missing content type".to_string(),
        )),
    }
}

/// Fetches `url` and classifies the outcome
pub async fn fetch_page<F>(fetcher: &F, url: &str) -> Result<String, PageError>
where
    F: Fetcher + ?Sized,
{
    let response = fetcher.fetch(url).await?;
    classify_response(response)
}

/// Builds an HTTP client from the configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use link_tally::config::Config;
/// use link_tally::crawler::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    let redirect = match config.http.max_redirects {
        0 => Policy::none(),
        max => Policy::limited(max),
    };

    Client::builder()
        .user_agent(config.user_agent.user_agent_string())
        .timeout(Duration::from_secs(config.http.timeout_secs))
        .connect_timeout(Duration::from_secs(config.http.connect_timeout_secs))
        .redirect(redirect)
        .gzip(true)
        .brotli(true)
        .build()
}

/// [`Fetcher`] backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a client built from `config`
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(build_http_client(config)?))
    }

    /// Wraps an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<PageResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let reason = server_reason(&response);
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        // Skip downloading bodies that classification will reject
        let wanted = status == StatusCode::OK && content_type.as_deref().is_some_and(is_html);
        let body = if wanted {
            response.text().await.map_err(transport_error)?
        } else {
            String::new()
        };

        Ok(PageResponse {
            status,
            reason,
            content_type,
            body,
        })
    }
}

/// hyper only records the phrase when it is not the canonical one
fn server_reason(response: &reqwest::Response) -> Option<String> {
    response
        .extensions()
        .get::<hyper::ext::ReasonPhrase>()
        .and_then(|phrase| std::str::from_utf8(phrase.as_bytes()).ok())
        .map(str::to_string)
}

/// The caller already prefixes messages with the URL, so strip it here
fn transport_error(e: reqwest::Error) -> TransportError {
    TransportError(e.without_url().to_string())
}
