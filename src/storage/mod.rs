//! Storage module for persisting harvested documents
//!
//! The pipeline never touches storage directly: the API layer and the CLI
//! hand each assembled batch to a `Storage` implementation after the
//! response has been built.

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStorage;
pub use traits::{Storage, StorageError, StorageResult};

use crate::output::{documents_from_batch, BatchResult};
use chrono::Utc;
use std::path::Path;

/// Initializes or opens a storage database
pub fn open_storage(path: &Path) -> StorageResult<SqliteStorage> {
    SqliteStorage::new(path)
}

/// Stores every seed of `batch` as a document stamped with the current time
///
/// # Returns
///
/// The number of documents written
pub fn persist_batch(storage: &mut dyn Storage, batch: &BatchResult) -> StorageResult<usize> {
    if batch.is_empty() {
        return Ok(0);
    }
    let documents = documents_from_batch(batch, Utc::now());
    storage.insert_documents(&documents)
}
