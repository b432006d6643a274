//! Robots.txt handling module
//!
//! Every seed pays for its own robots.txt fetch; nothing is cached between
//! seeds or requests.

mod parser;

pub use parser::ParsedRobots;

use crate::url::{parse_seed_url, robots_url};
use crate::HarvestError;
use reqwest::Client;
use url::Url;

/// Fetches robots.txt for the site hosting `page`
///
/// # Returns
///
/// * `Ok(ParsedRobots)` - Policy derived from the response status and body
/// * `Err(HarvestError::Robots)` - Network failure, timeout or unusable status
pub async fn fetch_robots(client: &Client, page: &Url) -> Result<ParsedRobots, HarvestError> {
    let robots = robots_url(page);
    tracing::debug!("Fetching robots.txt: {}", robots);

    let response = client
        .get(robots.as_str())
        .send()
        .await
        .map_err(|e| HarvestError::Robots {
            url: robots.to_string(),
            message: if e.is_timeout() {
                "request timeout".to_string()
            } else {
                e.to_string()
            },
        })?;

    let status = response.status().as_u16();
    let body = response.text().await.map_err(|e| HarvestError::Robots {
        url: robots.to_string(),
        message: format!("failed to read body: {}", e),
    })?;

    ParsedRobots::from_status_and_body(status, &body).ok_or_else(|| HarvestError::Robots {
        url: robots.to_string(),
        message: format!("unexpected status {}", status),
    })
}

/// Checks whether `url` may be crawled by `user_agent`
///
/// Fetches and evaluates the site's robots.txt. Errors are returned to the
/// caller, which skips the seed.
pub async fn is_allowed(client: &Client, url: &str, user_agent: &str) -> Result<bool, HarvestError> {
    let page = parse_seed_url(url)?;
    let robots = fetch_robots(client, &page).await?;
    Ok(robots.is_allowed(page.as_str(), user_agent))
}

/// Gate used by the pipeline: `Ok(())` when crawling is permitted
///
/// A disallowed path becomes `HarvestError::RobotsDenied`.
pub async fn check_allowed(client: &Client, url: &str, user_agent: &str) -> Result<(), HarvestError> {
    if is_allowed(client, url, user_agent).await? {
        Ok(())
    } else {
        Err(HarvestError::RobotsDenied {
            url: url.to_string(),
        })
    }
}
