use url::Url;

/// Extracts the host component of a URL, including a non-default port
///
/// The `url` crate already lower-cases hosts of special schemes; this
/// lower-cases again so opaque hosts compare the same way.
///
/// # Returns
///
/// * `Some(String)` - `host` or `host:port`
/// * `None` - If the URL has no host (`mailto:`, `javascript:`, ...)
///
/// # Examples
///
/// ```
/// use url::Url;
/// use link_tally::url::extract_host;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_host(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://localhost:8080/").unwrap();
/// assert_eq!(extract_host(&url), Some("localhost:8080".to_string()));
/// ```
pub fn extract_host(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host),
    }
}

/// Returns true when `link` points at the same host as `base`
///
/// Host-less links never match.
pub fn is_same_domain(base: &Url, link: &Url) -> bool {
    match (extract_host(base), extract_host(link)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
