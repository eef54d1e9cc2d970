//! Mapping of HTTP responses onto tracker outcomes.
//!
//! | Response | Listing | Relationship check |
//! |----------|---------|--------------------|
//! | 2xx | decode body | 204 → following |
//! | 404 | `NotFound` | not following |
//! | 429, or 403 with `x-ratelimit-remaining: 0` | `RateLimited` | error, left unknown |
//! | 5xx | `Transport` | error, left unknown |
//! | any other | `Transport` | not following |

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use tracker::{CheckError, FetchError};

/// Header GitHub uses to report the remaining request quota.
pub const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";

/// Returns `true` when the response says the request quota is exhausted.
pub fn is_rate_limited(status: StatusCode, headers: &HeaderMap) -> bool {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return true;
    }
    status == StatusCode::FORBIDDEN
        && headers
            .get(RATE_LIMIT_REMAINING)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|remaining| remaining.trim() == "0")
}

/// Classifies a non-success listing response.
///
/// Returns `Ok(())` for success statuses, meaning the body should be decoded.
pub fn classify_listing(status: StatusCode, headers: &HeaderMap) -> Result<(), FetchError> {
    if status.is_success() {
        Ok(())
    } else if status == StatusCode::NOT_FOUND {
        Err(FetchError::NotFound)
    } else if is_rate_limited(status, headers) {
        Err(FetchError::RateLimited)
    } else {
        Err(FetchError::Transport(format!("unexpected status {status}")))
    }
}

/// Classifies a relationship-check response.
pub fn classify_check(status: StatusCode, headers: &HeaderMap) -> Result<bool, CheckError> {
    if status == StatusCode::NO_CONTENT {
        Ok(true)
    } else if is_rate_limited(status, headers) {
        Err(CheckError::RateLimited)
    } else if status.is_server_error() {
        Err(CheckError::Transport(format!("server error {status}")))
    } else {
        Ok(false)
    }
}
