//! Error types for the mission core.
//!
//! Only genuinely fatal conditions are modeled here. Failures that the
//! reader recovers from locally (a bad file, a malformed question) are not
//! errors at the API level; they surface as warnings or `None`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// JSON encoding or decoding of a structured file failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A repository reference was not of the form `owner/name`.
    #[error("Invalid repository '{0}': expected 'owner/name'")]
    InvalidRepository(String),

    /// Data failed validation (schema, format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}
