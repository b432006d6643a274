//! Article enrichment
//!
//! Follows each heading's link one hop and stores a bounded excerpt of the
//! linked article. Fetches run on a `JoinSet` gated by a semaphore so that at
//! most `workers` requests are in flight; the whole set is joined before
//! control returns to the pipeline.

use crate::crawler::fetcher::{fetch_page, parse_document};
use crate::crawler::headlines::HeadingSet;
use crate::url::resolve_link;
use crate::HarvestError;
use reqwest::Client;
use scraper::{Html, Selector};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use url::Url;

/// Paragraphs inside these containers are preferred over the page-wide fallback
const CONTENT_SELECTOR: &str = "article p, .article-content p, main p, .content p";

/// Fallback paragraphs must be longer than this (in characters)
const MIN_FALLBACK_PARAGRAPH_CHARS: usize = 20;

/// Outcome counters of one enrichment pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichStats {
    /// Headings whose link was dispatched to a worker
    pub dispatched: usize,
    /// Headings that received article text
    pub enriched: usize,
    /// Headings whose link could not be resolved, fetched or parsed
    pub failed: usize,
}

/// Extracts up to `max_words` words of article body text
///
/// Paragraphs under `article`, `.article-content`, `main` or `.content` are
/// used when any of them has text; otherwise every paragraph longer than 20
/// characters is used.
pub fn extract_article_text(document: &Html, max_words: usize) -> String {
    let mut paragraphs = collect_paragraphs(document, CONTENT_SELECTOR, 0);

    if paragraphs.is_empty() {
        paragraphs = collect_paragraphs(document, "p", MIN_FALLBACK_PARAGRAPH_CHARS);
    }

    paragraphs
        .iter()
        .flat_map(|p| p.split_whitespace())
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ")
}

fn collect_paragraphs(document: &Html, selector: &str, min_chars: usize) -> Vec<String> {
    let Ok(selector) = Selector::parse(selector) else {
        return Vec::new();
    };

    document
        .select(&selector)
        .map(|p| p.text().collect::<String>())
        .filter(|text| {
            let trimmed = text.trim();
            !trimmed.is_empty() && trimmed.chars().count() > min_chars
        })
        .collect()
}

/// Parses an article body and returns its excerpt
pub fn article_excerpt(body: &str, max_words: usize) -> String {
    let document = parse_document(body);
    extract_article_text(&document, max_words)
}

/// Fetches one article page and returns its excerpt
pub async fn fetch_article(
    client: &Client,
    url: &Url,
    max_words: usize,
) -> Result<String, HarvestError> {
    let page = fetch_page(client, url).await?;
    Ok(article_excerpt(&page.body, max_words))
}

/// Populates `article_text` on every heading that has a link
///
/// Links are resolved against `base_url` (the seed page). A failure for one
/// link leaves that heading's text empty and is only logged.
pub async fn enrich(
    headings: &mut HeadingSet,
    client: &Client,
    base_url: &Url,
    workers: usize,
    max_words: usize,
) -> EnrichStats {
    let semaphore = Arc::new(Semaphore::new(workers.max(1)));
    let mut tasks = JoinSet::new();
    let mut stats = EnrichStats::default();

    for record in headings.iter().filter(|r| r.has_link()) {
        let Some(target) = resolve_link(&record.link, base_url) else {
            tracing::debug!(
                "Cannot follow link '{}' of heading '{}'",
                record.link,
                record.headline
            );
            stats.failed += 1;
            continue;
        };

        let key = record.headline.clone();
        let client = client.clone();
        let semaphore = Arc::clone(&semaphore);
        stats.dispatched += 1;

        tasks.spawn(async move {
            // Held until the fetch completes; the semaphore is never closed
            let _permit = semaphore.acquire_owned().await.ok();
            let result = fetch_article(&client, &target, max_words).await;
            (key, target, result)
        });
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((key, _, Ok(text))) => {
                headings.set_article_text(&key, text);
                stats.enriched += 1;
            }
            Ok((_, target, Err(e))) => {
                let error = HarvestError::Enrich {
                    url: target.to_string(),
                    source: Box::new(e),
                };
                tracing::warn!("{}", error);
                stats.failed += 1;
            }
            Err(e) => {
                tracing::error!("Enrichment worker failed: {}", e);
                stats.failed += 1;
            }
        }
    }

    stats
}
