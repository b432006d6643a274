//! Output module: per-seed results and the batch response map
//!
//! This module handles:
//! - The classified article records returned to callers
//! - Assembling per-seed results and the batch mapping
//! - Converting a batch into documents for persistence
//! - Summarising stored documents for the `--stats` mode

mod document;
pub mod stats;

pub use document::{documents_from_batch, NewsDocument};
pub use stats::{load_statistics, print_statistics, HarvestStatistics};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A heading that survived keyword classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedArticle {
    /// Normalized heading text
    pub headline: String,

    /// Article excerpt; empty unless the heading was enriched
    pub text: String,

    /// Raw link found inside the heading
    pub text_link: String,

    /// Matched keyword (lowercased), or empty when no keywords were given
    pub category: String,
}

/// Extraction result for a single seed URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedResult {
    /// First `<title>` of the seed page, trimmed
    pub title: String,

    /// Classified headings in document order
    pub headlines: Vec<ClassifiedArticle>,
}

/// Seed URL → result for every seed that completed classification
///
/// Seeds that failed are never inserted; serializes as a plain JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchResult(BTreeMap<String, SeedResult>);

impl BatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a seed's result; a repeated seed URL keeps the latest result
    pub fn insert(&mut self, url: impl Into<String>, result: SeedResult) {
        self.0.insert(url.into(), result);
    }

    pub fn get(&self, url: &str) -> Option<&SeedResult> {
        self.0.get(url)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.0.contains_key(url)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SeedResult)> {
        self.0.iter()
    }

    /// Serializes the batch as tab-indented JSON
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;
        // serde_json only emits valid UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

/// Composes the result for one seed
pub fn assemble_seed(title: impl Into<String>, classified: Vec<ClassifiedArticle>) -> SeedResult {
    SeedResult {
        title: title.into(),
        headlines: classified,
    }
}
