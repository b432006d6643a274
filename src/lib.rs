//! Headline Harvester: on-demand headline extraction service
//!
//! This crate fetches a batch of seed pages, extracts their headings,
//! optionally follows each heading's link one hop to pull an article excerpt,
//! and classifies the results against caller-supplied keywords.

pub mod api;
pub mod config;
pub mod crawler;
pub mod output;
pub mod robots;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Headline Harvester operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("HTML parse error for {url}: {message}")]
    HtmlParse { url: String, message: String },

    #[error("URL disallowed by robots.txt: {url}")]
    RobotsDenied { url: String },

    #[error("Robots.txt error for {url}: {message}")]
    Robots { url: String, message: String },

    #[error("Failed to enrich {url}: {source}")]
    Enrich {
        url: String,
        source: Box<HarvestError>,
    },

    #[error("Unsupported URL: {0}")]
    UnsupportedUrl(String),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),
}

impl HarvestError {
    /// Returns true for errors raised by the robots.txt gate
    pub fn is_policy(&self) -> bool {
        matches!(self, Self::RobotsDenied { .. } | Self::Robots { .. })
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Headline Harvester operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlRequest, CrawlTask, Harvester};
pub use output::{BatchResult, ClassifiedArticle, SeedResult};
