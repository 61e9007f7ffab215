//! Error types for the RajaOngkir client.
//!
//! This module defines all error types that can occur during API operations.
//! All errors implement the standard [`std::error::Error`] trait via
//! [`thiserror::Error`].
//!
//! # Error Categories
//!
//! - **Configuration errors** ([`OngkirError::InvalidConfiguration`]):
//!   rejected account tier or request setup
//! - **Validation errors** ([`OngkirError::MissingParameters`]): required
//!   request fields absent or empty, reported before any network call
//! - **API errors** ([`OngkirError::Api`]): the vendor answered with a
//!   non-success status, or its payload could not be interpreted
//! - **Transport errors** ([`OngkirError::Http`]): HTTP communication
//!   failures from the underlying client
//!
//! # Examples
//!
//! ```
//! use rajaongkir::error::{OngkirError, Result};
//!
//! fn tier_must_be_known(tier: &str) -> Result<()> {
//!     if tier != "starter" {
//!         return Err(OngkirError::InvalidConfiguration(format!("unknown tier: {tier}")));
//!     }
//!     Ok(())
//! }
//! ```

use serde_json::Value;
use thiserror::Error;

/// Result type alias for client operations.
///
/// This is a convenience type that uses [`OngkirError`] as the error type.
/// All fallible functions in this crate return this type.
pub type Result<T> = std::result::Result<T, OngkirError>;

/// Fallback message for API payloads that carry no status description.
pub(crate) const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

/// Fallback status code when the vendor payload carries none.
pub(crate) const DEFAULT_ERROR_CODE: u16 = 500;

/// Errors that can occur while talking to the RajaOngkir API.
///
/// The three caller-facing kinds (configuration, missing parameter, API)
/// are distinct variants, so calling code can tell them apart with
/// `matches!`. Transport failures surface as [`Http`](Self::Http) unless an
/// operation wraps them into an [`Api`](Self::Api) error with context.
///
/// # Error Recovery
///
/// - [`InvalidConfiguration`](Self::InvalidConfiguration): fix the input;
///   not retryable
/// - [`MissingParameters`](Self::MissingParameters): supply the listed
///   fields; not retryable as-is
/// - [`Api`](Self::Api): carries the vendor's own status code and, where
///   available, the raw payload; retryability is the caller's decision
/// - [`Http`](Self::Http): network-level failure; retry policy is the
///   caller's decision, the client never retries internally
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum OngkirError {
    /// Client configuration was rejected.
    ///
    /// Raised when constructing or mutating an [`ApiConfig`](crate::config::ApiConfig)
    /// with an unrecognized account tier, or when a request URL cannot be
    /// assembled from the configured base.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Required request parameters were absent or empty.
    ///
    /// Raised by facade operations before any network call. Every missing
    /// field is collected, so the message always names the full set.
    #[error("Missing required parameters: {}", .0.join(", "))]
    MissingParameters(Vec<String>),

    /// The vendor reported a non-success status, or its response could not
    /// be interpreted as the expected envelope.
    ///
    /// `message` and `code` are always populated; extraction falls back to
    /// generic defaults rather than leaving either empty. `payload` keeps
    /// the raw decoded body for diagnostics when one was available.
    #[error("API error (code {code}): {message}")]
    Api {
        /// Human-readable description from the vendor status metadata.
        message: String,
        /// Vendor status code, HTTP-like but carried in the JSON body.
        code: u16,
        /// Raw decoded vendor payload, when one was available.
        payload: Option<Value>,
        /// Underlying failure this error was derived from, if any.
        #[source]
        source: Option<Box<OngkirError>>,
    },

    /// HTTP request failed.
    ///
    /// Wraps [`reqwest::Error`]: timeouts, connection refusals, DNS and TLS
    /// failures, and bodies that could not be decoded as JSON.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl OngkirError {
    /// Builds an [`Api`](Self::Api) error with an explicit message and code.
    pub fn api(message: impl Into<String>, code: u16, payload: Option<Value>) -> Self {
        Self::Api {
            message: message.into(),
            code,
            payload: payload.filter(|p| !p.is_null()),
            source: None,
        }
    }

    /// Derives an [`Api`](Self::Api) error from a raw legacy-envelope payload.
    ///
    /// The extraction rule matches the vendor's `rajaongkir.status` block:
    /// `description` becomes the message (defaulting to a generic string)
    /// and `code` becomes the status code (defaulting to 500). The payload
    /// is retained verbatim for diagnostics.
    ///
    /// # Examples
    ///
    /// ```
    /// use rajaongkir::OngkirError;
    /// use serde_json::json;
    ///
    /// let payload = json!({
    ///     "rajaongkir": {"status": {"code": 400, "description": "Invalid API key"}}
    /// });
    ///
    /// let err = OngkirError::from_legacy_response(payload);
    /// assert_eq!(err.code(), Some(400));
    /// assert!(err.to_string().contains("Invalid API key"));
    /// ```
    pub fn from_legacy_response(payload: Value) -> Self {
        let legacy = crate::response::LegacyResponse::from_value(payload);
        let message = legacy
            .status()
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_ERROR_MESSAGE)
            .to_owned();
        let code = legacy.status_code();
        Self::Api { message, code, payload: Some(legacy.into_raw()), source: None }
    }

    /// Returns the vendor status code for [`Api`](Self::Api) errors.
    #[must_use]
    pub fn code(&self) -> Option<u16> {
        match self {
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Returns the raw vendor payload attached to [`Api`](Self::Api) errors.
    #[must_use]
    pub fn payload(&self) -> Option<&Value> {
        match self {
            Self::Api { payload, .. } => payload.as_ref(),
            _ => None,
        }
    }

    /// Wraps a failure in an [`Api`](Self::Api) error with operation context.
    ///
    /// The inner error's vendor code is carried over when it had one;
    /// otherwise the default code applies. The original error is preserved
    /// as the source.
    pub(crate) fn with_context(self, context: &str) -> Self {
        let code = self.code().unwrap_or(DEFAULT_ERROR_CODE);
        Self::Api {
            message: format!("{context}: {self}"),
            code,
            payload: None,
            source: Some(Box::new(self)),
        }
    }
}
