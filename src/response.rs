//! Response normalization.
//!
//! The vendor API answers with two incompatible JSON envelopes depending on
//! endpoint generation:
//!
//! - the current `meta`/`data` envelope (`{"meta": {"code", "message",
//!   "status"}, "data": ...}`), spoken by every facade operation, and
//! - the legacy `rajaongkir` envelope (`{"rajaongkir": {"status": {"code",
//!   "description"}, "results" | "result": ...}}`), which only survives in
//!   error payloads.
//!
//! [`normalize`] reduces the current envelope to a uniform
//! [`ApiEnvelope`]; [`LegacyResponse`] resolves the legacy shape once, at
//! this boundary, instead of being re-detected at call sites.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::error::{DEFAULT_ERROR_CODE, OngkirError, Result};

/// Fallback message when the vendor meta block carries none.
const REQUEST_FAILED_MESSAGE: &str = "API request failed";

/// Vendor status metadata from a normalized success response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMeta {
    /// Vendor status code; always 200 on this type.
    pub code: u16,
    /// Vendor status message.
    pub message: String,
    /// Vendor status label, `"success"` when the vendor omits one.
    pub status: String,
}

/// Uniform success envelope returned by every facade operation.
///
/// Only ever constructed for success responses; non-success statuses become
/// an [`OngkirError::Api`] before any caller sees this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope {
    /// Vendor status metadata.
    pub meta: ResponseMeta,
    /// Response payload; `null` when the vendor sent none.
    pub data: Value,
}

/// Reduces a raw `meta`/`data` payload to a uniform envelope.
///
/// Extraction rules:
///
/// 1. A payload that is not a JSON object fails with an
///    `"Invalid API response format"` API error.
/// 2. `meta.code` defaults to 500 when absent; `meta.message` defaults to
///    `"API request failed"`; `data` defaults to `null`.
/// 3. Any code other than 200 becomes an [`OngkirError::Api`] carrying the
///    vendor's message, code, and the raw payload.
///
/// # Errors
///
/// Returns [`OngkirError::Api`] for malformed payloads and for any
/// non-success vendor status.
///
/// # Examples
///
/// ```
/// use rajaongkir::response::normalize;
/// use serde_json::json;
///
/// let envelope =
///     normalize(json!({"meta": {"code": 200, "message": "OK"}, "data": [1, 2]})).unwrap();
/// assert_eq!(envelope.data, json!([1, 2]));
///
/// let err = normalize(json!({"meta": {"code": 404, "message": "Not Found"}})).unwrap_err();
/// assert_eq!(err.code(), Some(404));
/// ```
pub fn normalize(payload: Value) -> Result<ApiEnvelope> {
    if !payload.is_object() {
        return Err(OngkirError::api("Invalid API response format", DEFAULT_ERROR_CODE, Some(payload)));
    }

    let meta = payload.get("meta");
    let code = meta
        .and_then(|m| m.get("code"))
        .and_then(Value::as_u64)
        .and_then(|c| u16::try_from(c).ok())
        .unwrap_or(DEFAULT_ERROR_CODE);
    let message = meta
        .and_then(|m| m.get("message"))
        .and_then(Value::as_str)
        .unwrap_or(REQUEST_FAILED_MESSAGE)
        .to_owned();
    let status = meta
        .and_then(|m| m.get("status"))
        .and_then(Value::as_str)
        .unwrap_or("success")
        .to_owned();

    if code != 200 {
        debug!(code, "vendor reported non-success status");
        return Err(OngkirError::api(message, code, Some(payload)));
    }

    let data = payload.get("data").cloned().unwrap_or(Value::Null);

    Ok(ApiEnvelope { meta: ResponseMeta { code, message, status }, data })
}

/// A response in the legacy `rajaongkir` envelope.
///
/// Resolved once from a raw payload; used when deriving errors from legacy
/// payloads and by callers that still receive them directly.
#[derive(Debug, Clone, PartialEq)]
pub struct LegacyResponse {
    status_code: u16,
    data: Option<Value>,
    status: Map<String, Value>,
    raw: Value,
}

impl LegacyResponse {
    /// Resolves a raw payload against the legacy envelope shape.
    ///
    /// The status block comes from `rajaongkir.status` (empty when absent),
    /// the code from `status.code` (500 when absent), and the data from
    /// `rajaongkir.results`, falling back to `rajaongkir.result`.
    #[must_use]
    pub fn from_value(payload: Value) -> Self {
        let status = payload
            .pointer("/rajaongkir/status")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();
        let status_code = status
            .get("code")
            .and_then(Value::as_u64)
            .and_then(|c| u16::try_from(c).ok())
            .unwrap_or(DEFAULT_ERROR_CODE);
        let data = non_null(payload.pointer("/rajaongkir/results"))
            .or_else(|| non_null(payload.pointer("/rajaongkir/result")))
            .cloned();

        Self { status_code, data, status, raw: payload }
    }

    /// Returns the vendor status code.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Returns the extracted result data, if any.
    #[must_use]
    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// Returns the vendor status metadata block.
    #[must_use]
    pub fn status(&self) -> &Map<String, Value> {
        &self.status
    }

    /// Returns the original decoded payload.
    #[must_use]
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Consumes the response, yielding the original decoded payload.
    #[must_use]
    pub fn into_raw(self) -> Value {
        self.raw
    }

    /// Returns whether the vendor reported success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }

    /// Renders the response as a JSON value with status, data, and the
    /// original payload.
    #[must_use]
    pub fn to_value(&self) -> Value {
        json!({
            "status": self.status,
            "data": self.data,
            "original": self.raw,
        })
    }
}

impl fmt::Display for LegacyResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = serde_json::to_string_pretty(&self.to_value()).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}

fn non_null(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}
