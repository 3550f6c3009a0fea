//! Store error types.

use thiserror::Error;

/// Errors that can occur when talking to a remote file store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the store.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The requested file or folder does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The store is throttling requests.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// File content could not be decoded (transport encoding or UTF-8).
    #[error("decode error: {0}")]
    Decode(String),

    /// Failed to parse a store response.
    #[error("parse error: {0}")]
    Parse(String),
}
