//! Canonical destination records.
//!
//! Destination-search endpoints name their fields inconsistently across
//! account tiers and endpoint generations (`city_name` vs `city`, string
//! versus numeric identifiers). This module coerces every record into one
//! canonical shape so callers never see the variance.

use serde::Serialize;
use serde_json::Value;

/// A destination record in canonical shape.
///
/// Every field is optional: a record missing a key keeps `None` rather
/// than failing. Identifier and postal-code fields keep the vendor scalar
/// verbatim, since the vendor switches between strings and numbers across
/// endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Destination {
    /// City identifier.
    pub id: Option<Value>,
    /// Province identifier.
    pub province_id: Option<Value>,
    /// Province name.
    pub province: Option<String>,
    /// Administrative type (e.g. "Kota", "Kabupaten").
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Destination name, reconciled from `city_name` or `city`.
    pub name: Option<String>,
    /// Postal code.
    pub postal_code: Option<Value>,
}

impl Destination {
    /// Builds a canonical record from a raw vendor record.
    ///
    /// Tolerates any subset of the known keys; `city_name` wins over `city`
    /// when both are present.
    ///
    /// # Examples
    ///
    /// ```
    /// use rajaongkir::Destination;
    /// use serde_json::json;
    ///
    /// let record = Destination::from_record(&json!({
    ///     "city_id": "152",
    ///     "city": "Jakarta Pusat",
    ///     "postal_code": "10540"
    /// }));
    ///
    /// assert_eq!(record.name.as_deref(), Some("Jakarta Pusat"));
    /// assert_eq!(record.id, Some(json!("152")));
    /// assert!(record.province.is_none());
    /// ```
    #[must_use]
    pub fn from_record(record: &Value) -> Self {
        Self {
            id: field(record, "city_id").cloned(),
            province_id: field(record, "province_id").cloned(),
            province: text_field(record, "province"),
            kind: text_field(record, "type"),
            name: text_field(record, "city_name").or_else(|| text_field(record, "city")),
            postal_code: field(record, "postal_code").cloned(),
        }
    }
}

/// Canonicalizes every element of a response data value.
///
/// Anything other than an array (including `null`) yields an empty list,
/// which is a successful empty result, not an error.
#[must_use]
pub fn canonicalize_all(data: &Value) -> Vec<Destination> {
    data.as_array()
        .map(|records| records.iter().map(Destination::from_record).collect())
        .unwrap_or_default()
}

fn field<'a>(record: &'a Value, key: &str) -> Option<&'a Value> {
    record.get(key).filter(|v| !v.is_null())
}

fn text_field(record: &Value, key: &str) -> Option<String> {
    field(record, key).and_then(Value::as_str).map(str::to_owned)
}
