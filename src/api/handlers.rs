//! Request handlers

use crate::api::errors::ApiError;
use crate::crawler::{CrawlRequest, Harvester};
use crate::output::BatchResult;
use crate::storage::{persist_batch, SqliteStorage};
use axum::{
    body::Bytes,
    extract::Extension,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::{Arc, Mutex};

/// State shared by every request
pub struct AppState {
    pub harvester: Harvester,
    /// Persistence backend; `None` disables storage
    pub storage: Option<Arc<Mutex<SqliteStorage>>>,
}

impl AppState {
    pub fn new(harvester: Harvester, storage: Option<Arc<Mutex<SqliteStorage>>>) -> Self {
        Self { harvester, storage }
    }
}

/// `POST /api/start-crawler`
///
/// The whole batch is validated before any network activity. The response
/// body maps each successfully processed seed URL to its result.
pub async fn start_crawler(
    Extension(state): Extension<Arc<AppState>>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let tasks = CrawlRequest::from_json(&body)?.into_tasks()?;
    tracing::info!("Received batch of {} seeds", tasks.len());

    let batch = state.harvester.run_batch(&tasks).await;
    let payload = serde_json::to_vec(&batch)?;

    if let Some(storage) = &state.storage {
        store_batch(storage, &batch);
    }

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        payload,
    ))
}

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Hands the batch to storage; failures never reach the client
pub fn store_batch(storage: &Mutex<SqliteStorage>, batch: &BatchResult) {
    let mut storage = match storage.lock() {
        Ok(guard) => guard,
        Err(_) => {
            tracing::error!("Storage lock poisoned, batch not persisted");
            return;
        }
    };

    match persist_batch(&mut *storage, batch) {
        Ok(count) => tracing::debug!("Persisted {} documents", count),
        Err(e) => tracing::error!("Failed to persist batch: {}", e),
    }
}
