//! Error model
//!
//! Every failure the client can produce resolves to exactly one
//! `ErrorKind`. Data-path operations return `Result<T, GeoError>`;
//! no panic crosses the public API for a data-related failure.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Closed taxonomy of client failures.
///
/// Each variant represents a distinct, caller-actionable condition:
/// permanent input errors, auth/quota problems, retry-worthy network
/// failures, and server-side faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// The supplied string is not a syntactically valid IPv4/IPv6 address.
    InvalidIpAddress,
    /// The service refused a private/loopback/link-local address.
    ReservedIpAddress,
    /// The service has no geolocation data for the address.
    GeolocationNotFound,
    /// The service reported an internal fault, or broke its response contract.
    InternalServerError,
    /// A request argument other than the address itself was unusable.
    InvalidInput,
    /// The API key was rejected (HTTP 401).
    Unauthorized,
    /// The account quota is exhausted (HTTP 429).
    QuotaExceeded,
    /// The service reported that no API key reached it.
    NoApiKeyProvided,
    /// Connection, timeout, or other transport-level failure.
    NetworkError,
    /// Client construction was attempted with an unusable configuration.
    ValidationError,
    /// A failure that fits no other variant.
    UnknownError,
}

impl ErrorKind {
    /// Stable string form, matching the wire taxonomy.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidIpAddress => "INVALID_IP_ADDRESS",
            Self::ReservedIpAddress => "RESERVED_IP_ADDRESS",
            Self::GeolocationNotFound => "GEOLOCATION_NOT_FOUND",
            Self::InternalServerError => "INTERNAL_SERVER_ERROR",
            Self::InvalidInput => "INVALID_INPUT",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::QuotaExceeded => "QUOTA_EXCEEDED",
            Self::NoApiKeyProvided => "NO_API_KEY_PROVIDED",
            Self::NetworkError => "NETWORK_ERROR",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::UnknownError => "UNKNOWN_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Structured client error.
///
/// `message` is human-readable; when the failure originated server-side
/// the message is the server's own error text, verbatim. `details`
/// carries the raw response body or transport metadata when available.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct GeoError {
    pub kind: ErrorKind,
    pub message: String,
    pub details: Option<Value>,
}

impl GeoError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(kind: ErrorKind, message: impl Into<String>, details: Value) -> Self {
        Self {
            kind,
            message: message.into(),
            details: Some(details),
        }
    }
}
