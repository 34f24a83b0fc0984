// API Client Error Types
use serde::Serialize;
use serde_json::{json, Value};

/// The three failure categories every request pipeline can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Auth,
    Domain,
    Network,
}

/// Classified failure of a single API call.
///
/// `Auth` means missing, expired or rejected credentials and always goes
/// through session recovery. `Domain` is a well-formed rejection from the
/// backend (or a local format check) shown to the user as-is. `Network`
/// means no response was received at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("{message}")]
    Auth { status: Option<u16>, message: String },

    #[error("{message}")]
    Domain { status: Option<u16>, message: String },

    #[error("{message}")]
    Network { message: String },
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Auth { .. } => ErrorKind::Auth,
            ApiError::Domain { .. } => ErrorKind::Domain,
            ApiError::Network { .. } => ErrorKind::Network,
        }
    }

    /// HTTP status that produced the error, if one was received.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Auth { status, .. } | ApiError::Domain { status, .. } => *status,
            ApiError::Network { .. } => None,
        }
    }

    /// User-facing message
    pub fn message(&self) -> &str {
        match self {
            ApiError::Auth { message, .. } => message,
            ApiError::Domain { message, .. } => message,
            ApiError::Network { message } => message,
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Auth { .. })
    }

    /// Stable code for machine-readable output
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Auth { .. } => "AUTH_ERROR",
            ApiError::Domain { status: Some(403), .. } => "FORBIDDEN",
            ApiError::Domain { status: Some(404), .. } => "NOT_FOUND",
            ApiError::Domain { status: Some(429), .. } => "TOO_MANY_REQUESTS",
            ApiError::Domain { status: Some(code), .. } if *code >= 500 => "SERVER_ERROR",
            ApiError::Domain { status: None, .. } => "INVALID_INPUT",
            ApiError::Domain { .. } => "REQUEST_FAILED",
            ApiError::Network { .. } => "NETWORK_ERROR",
        }
    }

    pub fn to_json(&self) -> Value {
        let mut body = json!({
            "success": false,
            "kind": self.kind(),
            "message": self.message(),
            "code": self.error_code(),
        });
        if let Some(status) = self.status_code() {
            body["status"] = json!(status);
        }
        body
    }
}

impl ApiError {
    pub fn auth(status: Option<u16>, message: impl Into<String>) -> Self {
        ApiError::Auth {
            status,
            message: message.into(),
        }
    }

    pub fn domain(status: Option<u16>, message: impl Into<String>) -> Self {
        ApiError::Domain {
            status,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        ApiError::Network {
            message: message.into(),
        }
    }
}

impl From<crate::validation::ValidationError> for ApiError {
    fn from(err: crate::validation::ValidationError) -> Self {
        ApiError::domain(None, err.to_string())
    }
}

impl From<crate::session::SessionError> for ApiError {
    fn from(err: crate::session::SessionError) -> Self {
        tracing::error!("Session storage error: {}", err);
        ApiError::domain(None, format!("Could not update the stored session: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_follow_status() {
        assert_eq!(ApiError::domain(Some(404), "x").error_code(), "NOT_FOUND");
        assert_eq!(ApiError::domain(Some(502), "x").error_code(), "SERVER_ERROR");
        assert_eq!(ApiError::domain(Some(409), "x").error_code(), "REQUEST_FAILED");
        assert_eq!(ApiError::auth(Some(401), "x").error_code(), "AUTH_ERROR");
        assert_eq!(ApiError::network("x").error_code(), "NETWORK_ERROR");
    }

    #[test]
    fn test_to_json_includes_status_only_when_known() {
        let with_status = ApiError::domain(Some(403), "Access denied").to_json();
        assert_eq!(with_status["status"], 403);
        assert_eq!(with_status["kind"], "domain");
        assert_eq!(with_status["message"], "Access denied");

        let without = ApiError::network("offline").to_json();
        assert!(without.get("status").is_none());
        assert_eq!(without["success"], false);
    }
}
