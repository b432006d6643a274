//! Batch request payload and validated crawl tasks

use crate::HarvestError;
use serde::{Deserialize, Serialize};

/// Incoming batch body: `{"requests": [...]}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrawlRequest {
    #[serde(default)]
    pub requests: Vec<CrawlPayload>,
}

/// One unvalidated entry of a batch
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrawlPayload {
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub keywords: Option<Vec<String>>,

    /// Signed so that negative values can be rejected explicitly
    #[serde(default)]
    pub depth: i64,
}

/// A validated unit of work; immutable once accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTask {
    pub url: String,
    pub depth: u32,
    pub keywords: Vec<String>,
}

impl CrawlTask {
    pub fn new(url: impl Into<String>, depth: u32, keywords: Vec<String>) -> Self {
        Self {
            url: url.into(),
            depth,
            keywords,
        }
    }

    /// Whether heading links are followed for article text
    ///
    /// Any positive depth enables exactly one extra hop.
    pub fn follows_links(&self) -> bool {
        self.depth > 0
    }
}

impl CrawlRequest {
    /// Decodes a batch body; malformed JSON is a validation failure
    pub fn from_json(body: &[u8]) -> Result<Self, HarvestError> {
        serde_json::from_slice(body)
            .map_err(|e| HarvestError::Validation(format!("Invalid JSON format: {}", e)))
    }

    /// Validates every entry and converts the batch into tasks
    ///
    /// A single invalid entry rejects the whole batch.
    pub fn into_tasks(self) -> Result<Vec<CrawlTask>, HarvestError> {
        self.requests
            .into_iter()
            .enumerate()
            .map(|(index, payload)| payload.into_task(index))
            .collect()
    }
}

impl CrawlPayload {
    fn into_task(self, index: usize) -> Result<CrawlTask, HarvestError> {
        if self.url.trim().is_empty() {
            return Err(HarvestError::Validation(format!(
                "requests[{}]: url cannot be empty",
                index
            )));
        }

        if self.depth < 0 {
            return Err(HarvestError::Validation(format!(
                "requests[{}]: depth cannot be negative, got {}",
                index, self.depth
            )));
        }

        let depth = u32::try_from(self.depth).map_err(|_| {
            HarvestError::Validation(format!(
                "requests[{}]: depth out of range, got {}",
                index, self.depth
            ))
        })?;

        Ok(CrawlTask::new(
            self.url,
            depth,
            self.keywords.unwrap_or_default(),
        ))
    }
}
