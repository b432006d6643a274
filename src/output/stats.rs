//! Statistics over stored documents
//!
//! Backs the `--stats` CLI mode.

use crate::storage::Storage;
use crate::HarvestError;

/// Summary of the documents stored so far
#[derive(Debug, Clone, Default)]
pub struct HarvestStatistics {
    /// Total number of stored documents
    pub total_documents: u64,

    /// Total number of stored headlines across all documents
    pub total_headlines: u64,

    /// Number of documents per seed URL, sorted by URL
    pub documents_by_url: Vec<(String, u64)>,
}

/// Loads statistics from storage
pub fn load_statistics(storage: &dyn Storage) -> Result<HarvestStatistics, HarvestError> {
    Ok(HarvestStatistics {
        total_documents: storage.count_documents()?,
        total_headlines: storage.count_headlines()?,
        documents_by_url: storage.document_counts_by_url()?,
    })
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &HarvestStatistics) {
    println!("=== Harvest Statistics ===\n");

    println!("Overview:");
    println!("  Stored documents: {}", stats.total_documents);
    println!("  Stored headlines: {}", stats.total_headlines);
    println!("  Distinct seed URLs: {}", stats.documents_by_url.len());
    println!();

    if !stats.documents_by_url.is_empty() {
        println!("Documents by URL:");
        for (url, count) in &stats.documents_by_url {
            println!("  {}: {}", url, count);
        }
        println!();
    }

    let average = if stats.total_documents > 0 {
        stats.total_headlines as f64 / stats.total_documents as f64
    } else {
        0.0
    };
    println!("Average headlines per document: {:.1}", average);
}
