//! HTTP API
//!
//! - `POST /api/start-crawler` runs a batch and returns its results
//! - `GET /health` reports liveness

mod errors;
mod handlers;

pub use errors::ApiError;
pub use handlers::{health, start_crawler, store_batch, AppState};

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Builds the application router
pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/start-crawler", post(start_crawler))
        .route("/health", get(health))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
}
