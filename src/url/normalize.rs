use crate::url::domain::extract_host;
use crate::{UrlError, UrlResult};
use std::borrow::Borrow;
use std::fmt;
use url::Url;

/// Canonical identity of a page: lower-cased `host[:port]` plus path,
/// with the scheme and a single trailing slash removed
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedKey(String);

impl NormalizedKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NormalizedKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Normalizes an already-parsed URL into its comparison key
///
/// # Normalization Steps
///
/// 1. Take the host, keeping a non-default port (`example.com:8080`)
/// 2. Take the path and strip one trailing slash (`/` becomes empty)
/// 3. Concatenate and lower-case the whole string
///
/// Scheme, query and fragment never take part in the key.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use link_tally::url::normalize;
///
/// let url = Url::parse("HTTPS://Blog.Boot.dev/Path/").unwrap();
/// assert_eq!(normalize(&url).as_str(), "blog.boot.dev/path");
/// ```
pub fn normalize(url: &Url) -> NormalizedKey {
    let host = extract_host(url).unwrap_or_default();
    let path = url.path();
    let path = path.strip_suffix('/').unwrap_or(path);

    NormalizedKey(format!("{}{}", host, path).to_lowercase())
}

/// Parses and normalizes a URL string
///
/// # Returns
///
/// * `Ok(NormalizedKey)` - The page key
/// * `Err(UrlError)` - The string is not an absolute URL, or has no host
///
/// # Examples
///
/// ```
/// use link_tally::url::normalize_url;
///
/// let key = normalize_url("http://wagslane.dev/path/").unwrap();
/// assert_eq!(key.as_str(), "wagslane.dev/path");
/// ```
pub fn normalize_url(url_str: &str) -> UrlResult<NormalizedKey> {
    let url = Url::parse(url_str).map_err(|source| UrlError::Parse {
        url: url_str.to_string(),
        source,
    })?;

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost(url_str.to_string()));
    }

    Ok(normalize(&url))
}
