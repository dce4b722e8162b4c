//! HTTP transport port
//!
//! Defines the interface the client uses to reach the wire, plus the
//! production reqwest-backed implementation. Keeping the transport
//! behind a trait lets tests substitute a scripted transport and
//! assert that invalid input never produces a network call.

use async_trait::async_trait;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{ErrorKind, GeoError};

/// Raw outcome of an HTTP exchange that reached the server.
///
/// Carried for every status code; the client decides what a non-2xx
/// status means. `body` is the parsed JSON payload, or None when the
/// body was empty or not JSON.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: Option<String>,
    pub body: Option<Value>,
}

impl HttpResponse {
    /// True for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failure below the HTTP layer.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    /// Connection, DNS or timeout failure; no HTTP response exists.
    #[error("network error: {message}")]
    Network { message: String },
    /// A fault that is not a classified transport condition.
    #[error("unexpected transport fault: {message}")]
    Unexpected { message: String },
}

/// Outbound port for the geolocation service's REST interface.
///
/// Implementations must be safe for concurrent use: one pre-configured
/// transport handle is shared by every in-flight request of a client.
/// Base URL, timeout, and the fixed header set (`X-API-Key`,
/// `Content-Type: application/json`) are the implementation's concern.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// GET `path` with the given query parameters.
    async fn get(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<HttpResponse, TransportError>;

    /// POST a JSON `body` to `path` with the given query parameters.
    async fn post(
        &self,
        path: &str,
        query: &[(String, String)],
        body: Value,
    ) -> Result<HttpResponse, TransportError>;
}

/// Production transport backed by a shared `reqwest::Client`.
///
/// Built once per `GeoClient`: base URL, timeout and default headers
/// are fixed at construction. `reqwest::Client` is internally
/// reference-counted, so concurrent requests share one pool.
#[derive(Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    /// Build the transport from a validated config.
    ///
    /// Fails only on configuration problems (a key that cannot be
    /// encoded as a header value, an unusable TLS backend), so the
    /// error is a `VALIDATION_ERROR` like other construction faults.
    pub fn new(config: &ClientConfig) -> Result<Self, GeoError> {
        let mut headers = reqwest::header::HeaderMap::new();
        let key_value = reqwest::header::HeaderValue::from_str(&config.api_key).map_err(|_| {
            GeoError::new(
                ErrorKind::ValidationError,
                "API key contains characters that cannot be sent in a header",
            )
        })?;
        headers.insert("X-API-Key", key_value);
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                GeoError::new(
                    ErrorKind::ValidationError,
                    format!("failed to initialize HTTP transport: {e}"),
                )
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn execute(&self, builder: reqwest::RequestBuilder) -> Result<HttpResponse, TransportError> {
        let response = builder.send().await.map_err(|e| TransportError::Network {
            message: e.to_string(),
        })?;

        let status = response.status();
        // Body parse failures are not transport errors; the client
        // classifies a missing body per status code.
        let body = response.json::<Value>().await.ok();

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().map(str::to_string),
            body,
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<HttpResponse, TransportError> {
        let url = self.url_for(path);
        tracing::debug!("GET {} query={:?}", url, query);
        self.execute(self.client.get(&url).query(query)).await
    }

    async fn post(
        &self,
        path: &str,
        query: &[(String, String)],
        body: Value,
    ) -> Result<HttpResponse, TransportError> {
        let url = self.url_for(path);
        tracing::debug!("POST {} query={:?}", url, query);
        self.execute(self.client.post(&url).query(query).json(&body))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_url_joining() {
        let transport = ReqwestTransport::new(
            &ClientConfig::new("k").with_base_url("http://localhost:8080/"),
        )
        .unwrap();
        assert_eq!(transport.url_for("/bulk-lookup"), "http://localhost:8080/bulk-lookup");
        assert_eq!(transport.url_for("1.1.1.1"), "http://localhost:8080/1.1.1.1");
    }

    #[test]
    fn test_rejects_unencodable_api_key() {
        let err = ReqwestTransport::new(&ClientConfig::new("bad\nkey")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ValidationError);
    }

    #[test]
    fn test_http_response_success_range() {
        let mk = |status| HttpResponse {
            status,
            status_text: None,
            body: None,
        };
        assert!(mk(200).is_success());
        assert!(mk(204).is_success());
        assert!(!mk(301).is_success());
        assert!(!mk(404).is_success());
        assert!(!mk(500).is_success());
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Port 9 on localhost is assumed closed.
        let transport = ReqwestTransport::new(
            &ClientConfig::new("k")
                .with_base_url("http://127.0.0.1:9")
                .with_timeout(Duration::from_millis(500)),
        )
        .unwrap();
        let err = transport.get("1.1.1.1", &[]).await.unwrap_err();
        assert!(matches!(err, TransportError::Network { .. }));
    }
}
