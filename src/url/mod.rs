//! URL helpers shared by the robots gate and the article enricher

use crate::{HarvestError, Result};
use url::Url;

/// Parses a seed URL, accepting only HTTP(S)
pub fn parse_seed_url(url_str: &str) -> Result<Url> {
    let url = Url::parse(url_str.trim())?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(HarvestError::UnsupportedUrl(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(HarvestError::UnsupportedUrl(format!(
            "URL has no host: {}",
            url_str
        )));
    }

    Ok(url)
}

/// Builds the robots.txt location for a page URL
///
/// Keeps scheme, host and port; drops path, query and fragment.
///
/// # Example
///
/// ```
/// use headline_harvester::url::robots_url;
/// use url::Url;
///
/// let page = Url::parse("https://example.com:8443/news/today?x=1#top").unwrap();
/// assert_eq!(robots_url(&page).as_str(), "https://example.com:8443/robots.txt");
/// ```
pub fn robots_url(page: &Url) -> Url {
    let mut robots = page.clone();
    robots.set_path("/robots.txt");
    robots.set_query(None);
    robots.set_fragment(None);
    robots
}

/// Resolves a heading link against the page it was found on
///
/// Returns None if the link cannot be fetched:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - fragment-only anchors
/// - Non-HTTP(S) URLs after resolution
pub fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) if matches!(absolute_url.scheme(), "http" | "https") => Some(absolute_url),
        _ => None,
    }
}
