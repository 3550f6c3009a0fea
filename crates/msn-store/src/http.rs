//! Shared HTTP response helpers for the GitHub store.
//!
//! Centralizes status-code checks (rate limiting with `Retry-After`
//! parsing, 404 → [`StoreError::NotFound`], other non-success →
//! [`StoreError::Api`]) so the store methods stay focused on request
//! construction and response mapping.

use crate::error::StoreError;

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. Handles:
/// - **429**, or **403** with `x-ratelimit-remaining: 0` →
///   [`StoreError::RateLimited`] (`Retry-After`, falling back to 60 s).
/// - **404** → [`StoreError::NotFound`] carrying `path`.
/// - **Non-success status** → [`StoreError::Api`] with status code and
///   response body.
pub async fn check_response(
    resp: reqwest::Response,
    path: &str,
) -> Result<reqwest::Response, StoreError> {
    let status = resp.status();
    if status == 429 || (status == 403 && rate_limit_exhausted(&resp)) {
        return Err(StoreError::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    if status == 404 {
        return Err(StoreError::NotFound(path.to_string()));
    }
    if !status.is_success() {
        return Err(StoreError::Api {
            status: status.as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

fn rate_limit_exhausted(resp: &reqwest::Response) -> bool {
    resp.headers()
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim() == "0")
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}
