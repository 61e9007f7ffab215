//! Transport abstraction layer.
//!
//! The client core never talks HTTP directly: every operation builds an
//! immutable [`ApiRequest`] descriptor and hands it to a [`Transport`],
//! which performs exactly one round trip and returns the decoded JSON
//! body. Retry, timeout, and connection policy belong to the transport
//! implementation, not the core.
//!
//! The trait is open so callers can inject their own implementation; the
//! crate ships [`HttpTransport`] over reqwest.
//!
//! # Examples
//!
//! ```rust,no_run
//! use rajaongkir::{
//!     config::ApiConfig,
//!     transport::{ApiRequest, HttpTransport, Method, Transport},
//! };
//!
//! # async fn example() -> rajaongkir::error::Result<()> {
//! let config = ApiConfig::with_defaults("api-key")?;
//! let defaults = config.request_defaults();
//! let transport = HttpTransport::new()?;
//!
//! let params = [("id", "6".to_owned())];
//! let request = ApiRequest {
//!     method: Method::Get,
//!     base_url: defaults.base_url,
//!     path: "province",
//!     params: &params,
//!     headers: &defaults.headers,
//! };
//!
//! let payload = transport.execute(request).await?;
//! println!("{payload}");
//! # Ok(())
//! # }
//! ```

use std::future::Future;

use serde_json::Value;

use crate::error::Result;

pub mod config;
pub mod http;

pub use config::TransportOptions;
pub use http::HttpTransport;

/// HTTP method for an API request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET request; parameters travel in the query string.
    Get,
    /// POST request; parameters travel form-encoded in the body.
    Post,
}

impl Method {
    /// Returns the method name for logging and dispatch.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// Per-call request descriptor.
///
/// Built fresh for every operation from the configuration's request
/// defaults and passed to the transport atomically, so concurrent calls
/// never share mutable request state.
#[derive(Debug, Clone)]
pub struct ApiRequest<'a> {
    /// HTTP method.
    pub method: Method,
    /// Base endpoint URL (e.g. <https://rajaongkir.komerce.id/api/v1>).
    pub base_url: &'a str,
    /// Endpoint path relative to the base URL (e.g. "province").
    pub path: &'a str,
    /// Request parameters as key/value pairs.
    pub params: &'a [(&'a str, String)],
    /// Headers attached to the request (the `key` API-key header).
    pub headers: &'a [(&'static str, &'a str)],
}

/// One-round-trip transport the client core depends on.
///
/// Implementations execute the described request and return the decoded
/// JSON body, or fail with a transport-level error. The core treats the
/// returned value as opaque until normalization.
pub trait Transport: Send + Sync {
    /// Executes a single request and decodes the response body as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error when the request cannot be sent or the response
    /// body cannot be decoded as JSON.
    fn execute<'a>(
        &'a self,
        request: ApiRequest<'a>,
    ) -> impl Future<Output = Result<Value>> + Send + 'a;
}
