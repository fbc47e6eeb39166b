//! Error types for frequency-backfill

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackfillError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),

    #[error("Lexical service unavailable at {url}: {reason}")]
    LookupUnavailable { url: String, reason: String },

    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("Word selection failed {attempts} times in a row (last error: {last_error})")]
    RetryExhausted { attempts: u32, last_error: String },
}

pub type Result<T> = std::result::Result<T, BackfillError>;
