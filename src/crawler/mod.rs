//! Crawler module for seed processing
//!
//! This module contains the headline pipeline, including:
//! - Batch payload validation
//! - HTTP fetching and HTML parsing
//! - Heading extraction and article enrichment
//! - Keyword classification
//! - Sequential batch coordination

mod classifier;
mod enricher;
mod fetcher;
mod headlines;
mod pipeline;
mod task;

pub use classifier::{classify, KeywordSet};
pub use enricher::{article_excerpt, enrich, extract_article_text, fetch_article, EnrichStats};
pub use fetcher::{build_http_client, extract_title, fetch_page, parse_document, FetchedPage};
pub use headlines::{
    clean_headline, extract_headlines, is_heading_tag, normalize_whitespace, HeadingRecord,
    HeadingSet,
};
pub use pipeline::Harvester;
pub use task::{CrawlPayload, CrawlRequest, CrawlTask};
