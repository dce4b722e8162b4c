//! Wire data model
//!
//! Serde shapes for the geolocation service responses. The client
//! treats geographic data as a pass-through payload: nothing here is
//! semantically validated beyond required-field presence.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Geolocation data for one IP address.
///
/// `ip`, `in_eu` and `land_locked` are always present. Everything else
/// appears only when the service has data for it or when it was
/// explicitly requested via [`FieldSelection`]. Fields this struct does
/// not model are preserved in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeolocationRecord {
    pub ip: String,
    pub in_eu: bool,
    pub land_locked: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continent_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capital: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utc_offset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calling_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag_emoji: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tld: Option<String>,

    /// ASN, only when requested via `fields=asn`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asn: Option<String>,
    /// ISP name, only when requested via `fields=isp`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isp: Option<String>,

    /// Any fields the service returns that this struct does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entry of a bulk lookup response.
///
/// The service returns one item per requested IP, duplicates included,
/// with no ordering guarantee relative to the request. Per-item status
/// is passed through unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BulkItem {
    Success {
        ip: String,
        data: GeolocationRecord,
    },
    Error {
        ip: String,
        error_message: String,
    },
}

impl BulkItem {
    /// The IP this item answers for.
    pub fn ip(&self) -> &str {
        match self {
            Self::Success { ip, .. } | Self::Error { ip, .. } => ip,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Geolocation data, if this item succeeded.
    pub fn data(&self) -> Option<&GeolocationRecord> {
        match self {
            Self::Success { data, .. } => Some(data),
            Self::Error { .. } => None,
        }
    }

    /// Service error text, if this item failed.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error { error_message, .. } => Some(error_message),
            Self::Success { .. } => None,
        }
    }
}

/// Optional fields to request on top of the default payload.
///
/// Renders to the `fields` query parameter, comma-joined; when nothing
/// is selected the parameter is omitted entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldSelection {
    pub asn: bool,
    pub isp: bool,
}

impl FieldSelection {
    /// Select every optional field.
    pub fn all() -> Self {
        Self { asn: true, isp: true }
    }

    /// The `fields=` value, or None when nothing is selected.
    pub(crate) fn to_query_value(self) -> Option<String> {
        let mut fields = Vec::new();
        if self.asn {
            fields.push("asn");
        }
        if self.isp {
            fields.push("isp");
        }
        if fields.is_empty() {
            None
        } else {
            Some(fields.join(","))
        }
    }
}
