//! HTTP fetcher implementation
//!
//! This module handles all outbound page requests, including:
//! - Building the shared HTTP client with the service user agent and timeout
//! - GET requests with status and Content-Type checks
//! - Error classification
//! - Parsing a body into a document tree and reading its title

use crate::config::Config;
use crate::HarvestError;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use url::Url;

/// A successfully fetched HTML page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub url: Url,
    /// HTTP status code
    pub status_code: u16,
    /// Content-Type header value, if sent
    pub content_type: Option<String>,
    /// Page body content
    pub body: String,
}

/// Builds the HTTP client shared by every fetch of the service
///
/// The per-request timeout applies to robots.txt, seed pages and article
/// pages alike.
///
/// # Example
///
/// ```no_run
/// use headline_harvester::config::load_config;
/// use headline_harvester::crawler::build_http_client;
/// use std::path::Path;
///
/// let config = load_config(Path::new("config.toml")).unwrap();
/// let client = build_http_client(&config).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    let timeout = Duration::from_secs(config.fetch.timeout_secs);

    Client::builder()
        .user_agent(config.user_agent.header_value())
        .timeout(timeout)
        .connect_timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and returns its HTML body
///
/// | Condition | Error |
/// |-----------|-------|
/// | Timeout | `Timeout` |
/// | Connection/transport failure | `Http` |
/// | Non-2xx status | `Status` |
/// | Content-Type present and not HTML | `HtmlParse` |
///
/// No retries are attempted.
pub async fn fetch_page(client: &Client, url: &Url) -> Result<FetchedPage, HarvestError> {
    let response = client
        .get(url.as_str())
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status();
    let final_url = response.url().clone();

    if !status.is_success() {
        return Err(HarvestError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    if let Some(content_type) = &content_type {
        if !is_html_content_type(content_type) {
            return Err(HarvestError::HtmlParse {
                url: url.to_string(),
                message: format!("Expected HTML, got {}", content_type),
            });
        }
    }

    let body = response
        .text()
        .await
        .map_err(|e| classify_error(url, e))?;

    Ok(FetchedPage {
        url: final_url,
        status_code: status.as_u16(),
        content_type,
        body,
    })
}

/// Parses an HTML body into a traversable document tree
///
/// The tree is not `Send`; callers must drop it before the next await point.
pub fn parse_document(body: &str) -> Html {
    Html::parse_document(body)
}

/// Extracts the page title (first `<title>`, trimmed), empty if absent
pub fn extract_title(document: &Html) -> String {
    let Ok(title_selector) = Selector::parse("title") else {
        return String::new();
    };

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

fn is_html_content_type(content_type: &str) -> bool {
    let content_type = content_type.to_ascii_lowercase();
    content_type.contains("html") || content_type.contains("xml")
}

fn classify_error(url: &Url, error: reqwest::Error) -> HarvestError {
    if error.is_timeout() {
        HarvestError::Timeout {
            url: url.to_string(),
        }
    } else {
        HarvestError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}
