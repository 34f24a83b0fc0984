use serde::Deserialize;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};

/// The backend's response wrapper. The dispatcher never looks at it; feature
/// services use it where a `success: false` body has to become an error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Envelope {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<Value>,
    pub token: Option<String>,
    pub stats: Option<Value>,
}

impl Envelope {
    pub fn from_value(value: &Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_default()
    }
}

/// Turns a 2xx body carrying `success: false` into a domain error.
pub fn ensure_success(body: Value, fallback: &str) -> ApiResult<Value> {
    let envelope = Envelope::from_value(&body);
    if envelope.success {
        return Ok(body);
    }
    let message = envelope
        .message
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| fallback.to_string());
    Err(ApiError::domain(None, message))
}

/// `data` array from a list response; missing or non-array data reads as empty.
pub fn data_list(body: &Value) -> Vec<Value> {
    match body.get("data") {
        Some(Value::Array(items)) => items.clone(),
        _ => Vec::new(),
    }
}
