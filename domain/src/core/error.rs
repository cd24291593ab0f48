//! Normalized API error
//!
//! Every failure path of a request (timeout, non-2xx response, transport
//! failure, undecodable body) ends up as exactly one [`ApiError`].

use thiserror::Error;

/// Fixed user-facing message for a client-side timeout.
pub const TIMEOUT_MESSAGE: &str = "Request timeout - please try again";

const NETWORK_FALLBACK: &str = "Network error";
const DECODE_FALLBACK: &str = "Invalid response body";
const INVALID_REQUEST_FALLBACK: &str = "Invalid request";

/// Uniform error shape returned by the API client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The call did not settle within the configured duration.
    #[error("{}", TIMEOUT_MESSAGE)]
    Timeout,

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Http {
        status: u16,
        message: String,
        detail: Option<String>,
    },

    /// The transport failed before any response arrived.
    #[error("{0}")]
    Network(String),

    /// A 2xx body could not be decoded into the expected shape.
    #[error("{0}")]
    Decode(String),

    /// The request could not be built (bad body, bad header).
    #[error("{0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Build an HTTP error, guarding against an empty message.
    pub fn http(status: u16, message: impl Into<String>, detail: Option<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            format!("HTTP {}", status)
        } else {
            message
        };
        ApiError::Http {
            status,
            message,
            detail,
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        ApiError::Network(non_empty(message.into(), NETWORK_FALLBACK))
    }

    pub fn decode(message: impl Into<String>) -> Self {
        ApiError::Decode(non_empty(message.into(), DECODE_FALLBACK))
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        ApiError::InvalidRequest(non_empty(message.into(), INVALID_REQUEST_FALLBACK))
    }

    /// Human-readable message. Never empty.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// HTTP status, present only for [`ApiError::Http`].
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server-supplied detail, when the error body carried one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Http { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Timeout)
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// Short label used in logs and request audit records.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Timeout => "timeout",
            ApiError::Http { .. } => "http",
            ApiError::Network(_) => "network",
            ApiError::Decode(_) => "decode",
            ApiError::InvalidRequest(_) => "invalid_request",
        }
    }
}

fn non_empty(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message_is_fixed() {
        let error = ApiError::Timeout;
        assert_eq!(error.message(), "Request timeout - please try again");
        assert_eq!(error.status(), None);
        assert!(error.is_timeout());
    }

    #[test]
    fn test_http_error_carries_status_and_detail() {
        let error = ApiError::http(404, "Not found", Some("Not found".to_string()));
        assert_eq!(error.message(), "Not found");
        assert_eq!(error.status(), Some(404));
        assert_eq!(error.detail(), Some("Not found"));
        assert!(!error.is_timeout());
    }

    #[test]
    fn test_empty_messages_get_fallbacks() {
        assert_eq!(ApiError::http(500, "  ", None).message(), "HTTP 500");
        assert_eq!(ApiError::network("").message(), "Network error");
        assert_eq!(ApiError::decode("").message(), "Invalid response body");
        assert_eq!(ApiError::invalid_request("").message(), "Invalid request");
    }

    #[test]
    fn test_is_unauthorized() {
        assert!(ApiError::http(401, "nope", None).is_unauthorized());
        assert!(ApiError::http(403, "nope", None).is_unauthorized());
        assert!(!ApiError::http(404, "nope", None).is_unauthorized());
        assert!(!ApiError::Timeout.is_unauthorized());
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(ApiError::Timeout.kind(), "timeout");
        assert_eq!(ApiError::network("refused").kind(), "network");
        assert_eq!(ApiError::http(400, "bad", None).kind(), "http");
    }
}
