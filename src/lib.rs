//! ipflare
//!
//! Async client for the IPFlare IP-geolocation REST API. Input is
//! validated locally before any network call, and every failure path
//! resolves to one variant of a closed [`ErrorKind`] taxonomy, so
//! callers branch on typed results instead of catching panics.
//!
//! ```no_run
//! use ipflare::{ClientConfig, GeoClient};
//!
//! # async fn run() -> Result<(), ipflare::GeoError> {
//! let client = GeoClient::new(ClientConfig::new("your-api-key"))?;
//! match client.lookup("178.238.11.6").await {
//!     Ok(record) => println!("{} is in {:?}", record.ip, record.country_name),
//!     Err(err) => eprintln!("{}: {}", err.kind, err.message),
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod transport;
pub mod validator;

// Re-export commonly used types
pub use client::{GeoClient, MAX_BULK_IPS};
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{ErrorKind, GeoError};
pub use model::{BulkItem, FieldSelection, GeolocationRecord};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport, TransportError};
pub use validator::is_valid_address;
