//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the Storage trait.

use crate::output::{ClassifiedArticle, NewsDocument};
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{Storage, StorageError, StorageResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Opens (or creates) the database at `path` and bootstraps the schema
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }
}

impl Storage for SqliteStorage {
    fn insert_documents(&mut self, documents: &[NewsDocument]) -> StorageResult<usize> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO documents (url, title, headlines, headline_count, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;

            for doc in documents {
                let headlines = serde_json::to_string(&doc.headlines)?;
                stmt.execute(params![
                    doc.url,
                    doc.title,
                    headlines,
                    doc.headlines.len() as i64,
                    doc.created_at.to_rfc3339(),
                ])?;
            }
        }
        tx.commit()?;

        Ok(documents.len())
    }

    fn latest_document(&self, url: &str) -> StorageResult<Option<NewsDocument>> {
        let row = self
            .conn
            .query_row(
                "SELECT url, title, headlines, created_at FROM documents
                 WHERE url = ?1 ORDER BY id DESC LIMIT 1",
                params![url],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                    ))
                },
            )
            .optional()?;

        let Some((url, title, headlines, created_at)) = row else {
            return Ok(None);
        };

        let headlines: Vec<ClassifiedArticle> = serde_json::from_str(&headlines)?;
        let created_at = DateTime::parse_from_rfc3339(&created_at)
            .map_err(|_| StorageError::Timestamp(created_at.clone()))?
            .with_timezone(&Utc);

        Ok(Some(NewsDocument {
            url,
            title,
            headlines,
            created_at,
        }))
    }

    fn count_documents(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn count_headlines(&self) -> StorageResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COALESCE(SUM(headline_count), 0) FROM documents",
            [],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    fn document_counts_by_url(&self) -> StorageResult<Vec<(String, u64)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT url, COUNT(*) FROM documents GROUP BY url ORDER BY url")?;

        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as u64))
        })?;

        let mut counts = Vec::new();
        for row in rows {
            counts.push(row?);
        }
        Ok(counts)
    }
}
