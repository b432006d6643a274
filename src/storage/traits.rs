//! Storage traits and error types
//!
//! This module defines the trait interface for storage backends and
//! associated error types.

use crate::output::NewsDocument;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid timestamp '{0}'")]
    Timestamp(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for storage backend implementations
pub trait Storage {
    /// Inserts documents in a single transaction
    ///
    /// # Returns
    ///
    /// The number of documents written
    fn insert_documents(&mut self, documents: &[NewsDocument]) -> StorageResult<usize>;

    /// Gets the most recently stored document for a seed URL
    fn latest_document(&self, url: &str) -> StorageResult<Option<NewsDocument>>;

    /// Counts all stored documents
    fn count_documents(&self) -> StorageResult<u64>;

    /// Counts headlines across all stored documents
    fn count_headlines(&self) -> StorageResult<u64>;

    /// Number of stored documents per seed URL, sorted by URL
    fn document_counts_by_url(&self) -> StorageResult<Vec<(String, u64)>>;
}
