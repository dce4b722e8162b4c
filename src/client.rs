//! Geolocation client
//!
//! The single point of contact for callers: owns the configuration,
//! validates input locally, builds requests, delegates to the HTTP
//! transport, and normalizes every outcome into a typed result. No
//! network call is ever made for input that fails local validation.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::config::ClientConfig;
use crate::error::{ErrorKind, GeoError};
use crate::model::{BulkItem, FieldSelection, GeolocationRecord};
use crate::transport::{HttpResponse, HttpTransport, ReqwestTransport, TransportError};
use crate::validator;

/// Maximum number of IPs the service accepts in one bulk request.
pub const MAX_BULK_IPS: usize = 500;

/// Async client for the IPFlare geolocation service.
///
/// Cheap to clone; clones share the same pre-configured transport
/// handle, and any number of lookups may be in flight concurrently.
/// Each call produces an independent result with no ordering guarantee
/// relative to other calls.
#[derive(Clone)]
pub struct GeoClient {
    transport: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for GeoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeoClient").finish_non_exhaustive()
    }
}

impl GeoClient {
    /// Build a client from a config.
    ///
    /// Fails fast with `VALIDATION_ERROR` on an unusable config; a
    /// half-initialized client is never produced. Configuration errors
    /// are the one failure class surfaced at construction rather than
    /// per call.
    pub fn new(config: ClientConfig) -> Result<Self, GeoError> {
        config.validate()?;
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self {
            transport: Arc::new(transport),
        })
    }

    /// Build a client over an arbitrary transport.
    ///
    /// Intended for tests and for callers that bring their own HTTP
    /// stack; `new` is the production path.
    pub fn with_transport(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// Look up geolocation data for one IP address.
    pub async fn lookup(&self, address: &str) -> Result<GeolocationRecord, GeoError> {
        self.lookup_with(address, FieldSelection::default()).await
    }

    /// Look up one IP address, requesting extra fields.
    pub async fn lookup_with(
        &self,
        address: &str,
        fields: FieldSelection,
    ) -> Result<GeolocationRecord, GeoError> {
        if address.is_empty() {
            return Err(GeoError::new(ErrorKind::InvalidInput, "IP address is required"));
        }
        // Checked on the original input, before trimming, so
        // whitespace-wrapped control characters are still caught.
        if validator::contains_control_chars(address) {
            return Err(invalid_format(address));
        }
        let trimmed = address.trim();
        if !validator::is_valid_address(trimmed) {
            // The message echoes the input exactly as supplied.
            return Err(invalid_format(address));
        }

        let query = field_query(fields);
        tracing::debug!("lookup ip={}", trimmed);

        match self.transport.get(trimmed, &query).await {
            Ok(response) if response.is_success() => parse_record(response),
            Ok(response) => Err(map_http_error(response)),
            Err(err) => Err(map_transport_error(err)),
        }
    }

    /// Look up geolocation data for up to 500 IP addresses at once.
    ///
    /// All-or-nothing on the client side: if any entry fails local
    /// validation the whole call fails before any network request, so
    /// the service never sees a mixed valid/invalid batch. Duplicates
    /// are forwarded as-is; the service answers one item per entry.
    pub async fn bulk_lookup(&self, ips: &[String]) -> Result<Vec<BulkItem>, GeoError> {
        self.bulk_lookup_with(ips, FieldSelection::default()).await
    }

    /// Bulk lookup, requesting extra fields on every record.
    pub async fn bulk_lookup_with(
        &self,
        ips: &[String],
        fields: FieldSelection,
    ) -> Result<Vec<BulkItem>, GeoError> {
        if ips.is_empty() {
            return Err(GeoError::new(
                ErrorKind::InvalidInput,
                "At least one IP address is required",
            ));
        }
        if ips.len() > MAX_BULK_IPS {
            return Err(GeoError::new(
                ErrorKind::InvalidInput,
                "Maximum of 500 IPs per request allowed",
            ));
        }

        // Input order preserved, duplicates kept.
        let invalid_ips: Vec<&String> = ips
            .iter()
            .filter(|ip| {
                validator::contains_control_chars(ip) || !validator::is_valid_address(ip.trim())
            })
            .collect();
        if !invalid_ips.is_empty() {
            let listed = invalid_ips
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(GeoError::with_details(
                ErrorKind::InvalidIpAddress,
                format!("Invalid IP addresses found: {listed}"),
                json!({ "invalidIPs": invalid_ips }),
            ));
        }

        let trimmed: Vec<&str> = ips.iter().map(|ip| ip.trim()).collect();
        let query = field_query(fields);
        tracing::debug!("bulk lookup count={}", trimmed.len());

        match self
            .transport
            .post("bulk-lookup", &query, json!({ "ips": trimmed }))
            .await
        {
            Ok(response) if response.is_success() => parse_bulk(response),
            Ok(response) => Err(map_http_error(response)),
            Err(err) => Err(map_transport_error(err)),
        }
    }
}

fn field_query(fields: FieldSelection) -> Vec<(String, String)> {
    match fields.to_query_value() {
        Some(value) => vec![("fields".to_string(), value)],
        None => Vec::new(),
    }
}

fn invalid_format(original: &str) -> GeoError {
    GeoError::new(
        ErrorKind::InvalidIpAddress,
        format!("Invalid IP address format: {original}"),
    )
}

fn parse_record(response: HttpResponse) -> Result<GeolocationRecord, GeoError> {
    let raw = response.body.unwrap_or(Value::Null);
    serde_json::from_value(raw.clone()).map_err(|e| {
        tracing::warn!("undeserializable success body: {}", e);
        GeoError::with_details(ErrorKind::UnknownError, "An unexpected error occurred", raw)
    })
}

fn parse_bulk(response: HttpResponse) -> Result<Vec<BulkItem>, GeoError> {
    let raw = response.body.unwrap_or(Value::Null);
    // The bulk contract requires a `results` array; anything else is a
    // server-side contract violation, not a network failure.
    let shape_violation = || {
        GeoError::with_details(
            ErrorKind::InternalServerError,
            "Invalid response format from API",
            raw.clone(),
        )
    };
    let results = match raw.get("results") {
        Some(Value::Array(items)) => items.clone(),
        _ => return Err(shape_violation()),
    };
    serde_json::from_value(Value::Array(results)).map_err(|_| shape_violation())
}

/// Classify a failed HTTP exchange, in strict priority order: specific
/// status codes first, then free-text sniffing on the body's `error`
/// field, then a generic network error. Status codes outrank prose.
fn map_http_error(response: HttpResponse) -> GeoError {
    match response.status {
        401 => GeoError::new(ErrorKind::Unauthorized, "Invalid API key"),
        429 => GeoError::new(ErrorKind::QuotaExceeded, "Quota exceeded"),
        500 => GeoError::new(ErrorKind::InternalServerError, "Internal server error"),
        status => {
            let error_text = response
                .body
                .as_ref()
                .and_then(|b| b.get("error"))
                .and_then(Value::as_str);
            match error_text {
                Some(text) => {
                    // Server wording relayed verbatim; the body rides
                    // along in details.
                    let kind = classify_error_text(text);
                    tracing::warn!("service error status={} kind={}", status, kind);
                    GeoError::with_details(kind, text, response.body.clone().unwrap_or(Value::Null))
                }
                None => {
                    tracing::warn!("http error without usable body, status={}", status);
                    GeoError::with_details(
                        ErrorKind::NetworkError,
                        "Network error occurred",
                        json!({ "status": status, "statusText": response.status_text }),
                    )
                }
            }
        }
    }
}

fn map_transport_error(err: TransportError) -> GeoError {
    match err {
        TransportError::Network { message } => {
            tracing::warn!("transport failure: {}", message);
            // No HTTP response exists here; the transport's own message
            // is all the diagnostic context there is.
            GeoError::with_details(
                ErrorKind::NetworkError,
                "Network error occurred",
                json!({ "message": message }),
            )
        }
        TransportError::Unexpected { message } => GeoError::with_details(
            ErrorKind::UnknownError,
            "An unexpected error occurred",
            Value::String(message),
        ),
    }
}

/// Case-insensitive substring classification of a server error text.
/// First match wins, fixed order.
fn classify_error_text(text: &str) -> ErrorKind {
    let lower = text.to_lowercase();
    if lower.contains("invalid") && lower.contains("ip") {
        ErrorKind::InvalidIpAddress
    } else if lower.contains("reserved") {
        ErrorKind::ReservedIpAddress
    } else if lower.contains("geolocation") || lower.contains("not found") {
        ErrorKind::GeolocationNotFound
    } else if lower.contains("api key") {
        ErrorKind::NoApiKeyProvided
    } else if lower.contains("input") {
        ErrorKind::InvalidInput
    } else {
        ErrorKind::UnknownError
    }
}
