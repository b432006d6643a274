//! Persistence shape of a seed result

use crate::output::{BatchResult, ClassifiedArticle};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One stored document per seed per batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsDocument {
    pub url: String,
    pub title: String,
    pub headlines: Vec<ClassifiedArticle>,
    pub created_at: DateTime<Utc>,
}

/// Converts every seed of a batch into a document stamped with `created_at`
pub fn documents_from_batch(batch: &BatchResult, created_at: DateTime<Utc>) -> Vec<NewsDocument> {
    batch
        .iter()
        .map(|(url, result)| NewsDocument {
            url: url.clone(),
            title: result.title.clone(),
            headlines: result.headlines.clone(),
            created_at,
        })
        .collect()
}
