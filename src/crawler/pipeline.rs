//! Per-seed pipeline and batch driver
//!
//! For every seed, in order:
//! 1. Check robots.txt
//! 2. Fetch and parse the page, re-checking robots.txt after a redirect
//! 3. Extract headings
//! 4. Follow heading links when the task asks for depth
//! 5. Classify against the task's keywords
//!
//! A failing seed is logged and left out of the batch result; it never
//! aborts the remaining seeds.

use crate::config::Config;
use crate::crawler::classifier::{classify, KeywordSet};
use crate::crawler::enricher::enrich;
use crate::crawler::fetcher::{build_http_client, extract_title, fetch_page, parse_document};
use crate::crawler::headlines::extract_headlines;
use crate::crawler::task::CrawlTask;
use crate::output::{assemble_seed, BatchResult, SeedResult};
use crate::robots;
use crate::url::parse_seed_url;
use crate::HarvestError;
use reqwest::Client;
use std::time::Instant;

/// Runs crawl tasks against the shared HTTP client
#[derive(Debug, Clone)]
pub struct Harvester {
    client: Client,
    robots_agent: String,
    enrichment_workers: usize,
    excerpt_words: usize,
}

impl Harvester {
    /// Creates a harvester with a client built from `config`
    pub fn new(config: &Config) -> Result<Self, HarvestError> {
        let client = build_http_client(config)?;
        Ok(Self::with_client(client, config))
    }

    /// Creates a harvester around an existing client
    pub fn with_client(client: Client, config: &Config) -> Self {
        Self {
            client,
            robots_agent: config.user_agent.crawler_name.clone(),
            enrichment_workers: config.fetch.enrichment_workers,
            excerpt_words: config.fetch.excerpt_words,
        }
    }

    /// Processes one seed end to end
    ///
    /// # Returns
    ///
    /// * `Ok(SeedResult)` - Title and classified headings of the seed page
    /// * `Err(HarvestError)` - Robots, fetch or parse failure; the seed is skipped
    pub async fn process_seed(&self, task: &CrawlTask) -> Result<SeedResult, HarvestError> {
        let seed = parse_seed_url(&task.url)?;

        robots::check_allowed(&self.client, seed.as_str(), &self.robots_agent).await?;

        let page = fetch_page(&self.client, &seed).await?;
        tracing::debug!(
            "Fetched {} (status {}, {})",
            page.url,
            page.status_code,
            page.content_type.as_deref().unwrap_or("no content type")
        );

        // Redirect targets are held to their own robots.txt
        if page.url != seed {
            robots::check_allowed(&self.client, page.url.as_str(), &self.robots_agent).await?;
        }

        // The document tree must be dropped before enrichment awaits
        let (title, mut headings) = {
            let document = parse_document(&page.body);
            (extract_title(&document), extract_headlines(&document))
        };

        tracing::debug!("Found {} headings on {}", headings.len(), page.url);

        if task.follows_links() {
            let stats = enrich(
                &mut headings,
                &self.client,
                &page.url,
                self.enrichment_workers,
                self.excerpt_words,
            )
            .await;
            tracing::debug!(
                "Enrichment for {}: {} dispatched, {} enriched, {} failed",
                task.url,
                stats.dispatched,
                stats.enriched,
                stats.failed
            );
        }

        let keywords = KeywordSet::new(&task.keywords);
        let classified = classify(&headings, &keywords);

        Ok(assemble_seed(title, classified))
    }

    /// Processes every task sequentially and collects the successes
    ///
    /// Results are keyed by the URL string exactly as submitted. A later
    /// duplicate URL overwrites an earlier one.
    pub async fn run_batch(&self, tasks: &[CrawlTask]) -> BatchResult {
        let start_time = Instant::now();
        let mut batch = BatchResult::new();

        for task in tasks {
            match self.process_seed(task).await {
                Ok(result) => {
                    tracing::info!("Successfully processed URL: {}", task.url);
                    batch.insert(task.url.clone(), result);
                }
                Err(e) if e.is_policy() => {
                    tracing::warn!("Skipping {}: {}", task.url, e);
                }
                Err(e) => {
                    tracing::error!("Error processing {}: {}", task.url, e);
                }
            }
        }

        tracing::info!(
            "Batch completed: {} of {} seeds succeeded in {:?}",
            batch.len(),
            tasks.len(),
            start_time.elapsed()
        );

        batch
    }
}
