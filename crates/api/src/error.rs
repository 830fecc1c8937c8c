//! Shared error types for the gateway crate.

use thiserror::Error;

/// Errors surfaced by Remote Course Service gateways.
///
/// Any non-2xx HTTP status is a failure regardless of envelope contents.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("request failed with status {0}")]
    Status(reqwest::StatusCode),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("service rejected the request: {0}")]
    Envelope(String),
}

/// Errors surfaced by the persisted session store.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionStoreError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}
