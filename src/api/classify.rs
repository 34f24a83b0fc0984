//! Maps a received response onto the client's outcome taxonomy.
//!
//! Order matters: an unparsable body wins over every status code, then 2xx,
//! then the specific statuses, then the generic fallback.

use serde_json::Value;

use crate::error::{ApiError, ApiResult};

pub const NON_JSON_MESSAGE: &str = "Server returned non-JSON response";
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";
pub const FORBIDDEN_MESSAGE: &str = "Access denied";
pub const NOT_FOUND_MESSAGE: &str = "Resource not found";
pub const RATE_LIMITED_MESSAGE: &str = "Too many requests. Please try again later.";
pub const SERVER_ERROR_MESSAGE: &str = "Server error. Please try again later.";
pub const NETWORK_MESSAGE: &str = "Network error. Please check your internet connection.";

pub fn classify(status: u16, body: &[u8]) -> ApiResult<Value> {
    let parsed: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(_) => return Err(ApiError::domain(Some(status), NON_JSON_MESSAGE)),
    };

    if (200..300).contains(&status) {
        return Ok(parsed);
    }

    let body_message = body_message(&parsed);
    let or_body = |fallback: &str| body_message.clone().unwrap_or_else(|| fallback.to_string());

    Err(match status {
        401 => ApiError::auth(Some(status), or_body(UNAUTHORIZED_MESSAGE)),
        403 => ApiError::domain(Some(status), or_body(FORBIDDEN_MESSAGE)),
        404 => ApiError::domain(Some(status), or_body(NOT_FOUND_MESSAGE)),
        429 => ApiError::domain(Some(status), RATE_LIMITED_MESSAGE),
        s if s >= 500 => ApiError::domain(Some(status), SERVER_ERROR_MESSAGE),
        _ => ApiError::domain(
            Some(status),
            or_body(&format!("Request failed with status {}", status)),
        ),
    })
}

/// Non-empty `message` string from the envelope, if any.
fn body_message(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
