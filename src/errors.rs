// src/errors.rs
// DOCUMENTATION: Custom error types for client operations
// PURPOSE: Centralized error handling for the pipeline, services and views

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Client-side error types
/// DOCUMENTATION: Comprehensive error enum for all possible failures
/// Each non-2xx backend response maps to exactly one variant via `from_status`
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// Transport-level failure: no response was received
    #[error("Network failure: {0}")]
    NetworkFailure(String),

    /// Backend answered 401
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Credential refresh failed; stored credentials were cleared
    #[error("Session expired")]
    SessionExpired,

    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("External API error: {0}")]
    ExternalApiError(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

impl ClientError {
    /// Build an error from a non-success HTTP status and its body
    /// DOCUMENTATION: Inverse of the backend's status mapping
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 => ClientError::Unauthorized(body.to_string()),
            429 => ClientError::RateLimitExceeded,
            _ => ClientError::Http {
                status,
                message: body.to_string(),
            },
        }
    }

    /// HTTP status carried by this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Unauthorized(_) => Some(StatusCode::UNAUTHORIZED.as_u16()),
            ClientError::RateLimitExceeded => Some(StatusCode::TOO_MANY_REQUESTS.as_u16()),
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized(_))
    }

    /// `message` field of a JSON error body sent by the backend
    pub fn server_message(&self) -> Option<String> {
        match self {
            ClientError::Http { message, .. } | ClientError::Unauthorized(message) => {
                backend_message(message)
            }
            _ => None,
        }
    }

    /// Message suitable for showing to the user
    /// DOCUMENTATION: A backend-provided `{"message": ...}` body wins,
    /// otherwise the text is chosen from the status code
    pub fn user_message(&self) -> String {
        match self {
            ClientError::SessionExpired => {
                "Your session has expired. Please log in again.".to_string()
            }
            ClientError::NetworkFailure(_) => {
                "Unable to reach the server. Please check your connection.".to_string()
            }
            ClientError::Unauthorized(body) => backend_message(body)
                .unwrap_or_else(|| "You are not signed in. Please log in.".to_string()),
            ClientError::ValidationError(msg) | ClientError::InvalidInput(msg) => msg.clone(),
            ClientError::Http { status, message } => {
                if let Some(server_message) = backend_message(message) {
                    return server_message;
                }
                match status {
                    400 => "The submitted data is not valid. Please check all fields.",
                    409 => "This email address is already in use.",
                    422 => "The submitted data does not meet the required criteria.",
                    500 => "Server error. Please try again later.",
                    _ => "An unexpected error occurred. Please try again.",
                }
                .to_string()
            }
            other => other.to_string(),
        }
    }

    /// Display text for a failed login, where a 401 means bad credentials
    pub fn login_message(&self) -> String {
        match self {
            ClientError::Unauthorized(_) => "Invalid email or password.".to_string(),
            other => other.user_message(),
        }
    }
}

/// Extract `message` from a JSON error body
fn backend_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.trim().is_empty())
        .map(str::to_string)
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ClientError::ValidationError(errors.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(error: serde_json::Error) -> Self {
        ClientError::Parse(error.to_string())
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_mapping() {
        assert_eq!(
            ClientError::from_status(401, "expired"),
            ClientError::Unauthorized("expired".to_string())
        );
        assert_eq!(
            ClientError::from_status(429, ""),
            ClientError::RateLimitExceeded
        );
        assert_eq!(
            ClientError::from_status(404, "missing"),
            ClientError::Http {
                status: 404,
                message: "missing".to_string()
            }
        );
    }

    #[test]
    fn test_status_roundtrip() {
        assert_eq!(ClientError::from_status(401, "").status(), Some(401));
        assert_eq!(ClientError::from_status(503, "").status(), Some(503));
        assert_eq!(ClientError::SessionExpired.status(), None);
        assert!(ClientError::from_status(401, "").is_unauthorized());
        assert!(!ClientError::from_status(403, "").is_unauthorized());
    }

    #[test]
    fn test_user_message_prefers_backend_message() {
        let err = ClientError::from_status(400, r#"{"message":"Name is too short"}"#);
        assert_eq!(err.user_message(), "Name is too short");
        assert_eq!(err.server_message().as_deref(), Some("Name is too short"));
        assert_eq!(ClientError::from_status(500, "boom").server_message(), None);
    }

    #[test]
    fn test_unauthorized_wording_depends_on_context() {
        let rejected = ClientError::from_status(401, "");
        assert_eq!(rejected.login_message(), "Invalid email or password.");
        assert_eq!(rejected.user_message(), "You are not signed in. Please log in.");

        let with_body = ClientError::from_status(401, r#"{"message":"Token revoked"}"#);
        assert_eq!(with_body.user_message(), "Token revoked");
        assert_eq!(
            ClientError::SessionExpired.login_message(),
            ClientError::SessionExpired.user_message()
        );
    }

    #[test]
    fn test_user_message_by_status() {
        assert_eq!(
            ClientError::from_status(409, "Email déjà utilisé.").user_message(),
            "This email address is already in use."
        );
        assert_eq!(
            ClientError::from_status(500, "").user_message(),
            "Server error. Please try again later."
        );
        assert_eq!(
            ClientError::from_status(418, "").user_message(),
            "An unexpected error occurred. Please try again."
        );
    }
}
