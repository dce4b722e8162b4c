//! Client configuration
//!
//! Owned by exactly one `GeoClient`, validated once at construction,
//! immutable afterwards.

use std::time::Duration;

use crate::error::{ErrorKind, GeoError};

/// Default service endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.ipflare.io";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Configuration for a [`GeoClient`](crate::GeoClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key sent as `X-API-Key` on every request.
    pub api_key: String,
    /// Service base URL.
    pub base_url: String,
    /// Per-request timeout. Expiry surfaces as a `NETWORK_ERROR`.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Config with the given key and default endpoint/timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load the config from `IPFLARE_API_KEY`, `IPFLARE_BASE_URL` and
    /// `IPFLARE_TIMEOUT_MS`, falling back to the defaults.
    pub fn from_env() -> Self {
        let api_key = std::env::var("IPFLARE_API_KEY").unwrap_or_default();

        let base_url = std::env::var("IPFLARE_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout_ms = std::env::var("IPFLARE_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT.as_millis() as u64);

        Self {
            api_key,
            base_url,
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    /// First failure wins: missing key, then whitespace-only key.
    pub(crate) fn validate(&self) -> Result<(), GeoError> {
        if self.api_key.is_empty() {
            return Err(GeoError::new(
                ErrorKind::ValidationError,
                "API key is required",
            ));
        }
        if self.api_key.trim().is_empty() {
            return Err(GeoError::new(
                ErrorKind::ValidationError,
                "API key cannot be empty or whitespace",
            ));
        }
        Ok(())
    }
}
