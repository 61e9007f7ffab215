//! Facade operations over the RajaOngkir API.
//!
//! One method per vendor capability: province/city lookup, destination
//! search, shipping-cost calculation, and waybill tracking. Every operation
//! builds its request parameters, makes one round trip through the
//! [`Transport`], and reduces the response through the normalizer. No state
//! outlives a call except the configuration.

use serde_json::Value;
use tracing::instrument;

use crate::{
    config::ApiConfig,
    destination::{Destination, canonicalize_all},
    error::{OngkirError, Result},
    response::{ApiEnvelope, normalize},
    transport::{ApiRequest, HttpTransport, Method, Transport, TransportOptions},
};

/// Required fields for the cost-calculation operations.
const COST_REQUIRED_PARAMS: [&str; 4] = ["origin", "destination", "weight", "courier"];

/// Heterogeneous parameter map for the cost-calculation operations.
///
/// Values may be strings or numbers; a required field counts as missing
/// when it is absent, `null`, or an empty string.
pub type CostParams = serde_json::Map<String, Value>;

/// Query for the destination-search operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Search term; may be empty for an unfiltered international listing.
    pub search: String,
    /// Maximum number of results.
    pub limit: u32,
    /// Starting offset for pagination.
    pub offset: u32,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self { search: String::new(), limit: 10, offset: 0 }
    }
}

impl SearchQuery {
    /// Creates a query for a search term with the default limit and offset.
    #[must_use]
    pub fn new(search: impl Into<String>) -> Self {
        Self { search: search.into(), ..Self::default() }
    }
}

/// RajaOngkir API client.
///
/// Thin, stateless facade: operations share only the immutable
/// configuration, so concurrent calls on one client never interfere.
/// The transport is generic for injection; production code uses the
/// default [`HttpTransport`].
///
/// # Examples
///
/// ```rust,no_run
/// use rajaongkir::{RajaOngkir, SearchQuery};
///
/// # async fn example() -> rajaongkir::error::Result<()> {
/// let client = RajaOngkir::with_defaults("api-key")?;
///
/// let provinces = client.provinces().await?;
/// println!("{provinces}");
///
/// let hits = client.search_domestic_destinations(&SearchQuery::new("solo")).await?;
/// for destination in hits {
///     println!("{:?} {:?}", destination.name, destination.postal_code);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RajaOngkir<T: Transport = HttpTransport> {
    config: ApiConfig,
    transport: T,
}

impl RajaOngkir<HttpTransport> {
    /// Creates a client over the default HTTP transport.
    ///
    /// The transport honors the configuration's TLS-verification flag.
    ///
    /// # Errors
    ///
    /// Returns [`OngkirError::InvalidConfiguration`] for an unrecognized
    /// account tier, or [`OngkirError::Http`] if the HTTP client cannot be
    /// built.
    pub fn new(api_key: impl Into<String>, account_tier: &str, verify_ssl: bool) -> Result<Self> {
        let config = ApiConfig::new(api_key, account_tier, verify_ssl)?;
        let options = TransportOptions { verify_ssl, ..TransportOptions::default() };
        let transport = HttpTransport::with_options(&options)?;
        Ok(Self { config, transport })
    }

    /// Creates a starter-tier client with TLS verification enabled.
    ///
    /// # Errors
    ///
    /// Returns [`OngkirError::Http`] if the HTTP client cannot be built.
    pub fn with_defaults(api_key: impl Into<String>) -> Result<Self> {
        Self::new(api_key, "starter", true)
    }
}

impl<T: Transport> RajaOngkir<T> {
    /// Creates a client over an injected transport.
    #[must_use]
    pub fn with_transport(config: ApiConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Returns the client configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Returns the client configuration for mutation (tier, TLS flag).
    pub fn config_mut(&mut self) -> &mut ApiConfig {
        &mut self.config
    }

    /// Lists all provinces.
    ///
    /// # Errors
    ///
    /// Returns [`OngkirError::Api`] on a non-success vendor status and
    /// [`OngkirError::Http`] on transport failure.
    pub async fn provinces(&self) -> Result<Value> {
        Ok(self.request(Method::Get, "province", &[]).await?.data)
    }

    /// Fetches a single province by ID.
    ///
    /// # Errors
    ///
    /// Returns [`OngkirError::Api`] when the vendor reports the province
    /// does not exist, and [`OngkirError::Http`] on transport failure.
    pub async fn province(&self, id: u32) -> Result<Value> {
        let params = [("id", id.to_string())];
        Ok(self.request(Method::Get, "province", &params).await?.data)
    }

    /// Lists cities, optionally filtered by province.
    ///
    /// # Errors
    ///
    /// Returns [`OngkirError::Api`] on a non-success vendor status and
    /// [`OngkirError::Http`] on transport failure.
    pub async fn cities(&self, province_id: Option<u32>) -> Result<Value> {
        let mut params = Vec::with_capacity(1);
        if let Some(id) = province_id {
            params.push(("province", id.to_string()));
        }
        Ok(self.request(Method::Get, "city", &params).await?.data)
    }

    /// Fetches a single city by ID.
    ///
    /// # Errors
    ///
    /// Returns [`OngkirError::Api`] when the vendor reports the city does
    /// not exist, and [`OngkirError::Http`] on transport failure.
    pub async fn city(&self, id: u32) -> Result<Value> {
        let params = [("id", id.to_string())];
        Ok(self.request(Method::Get, "city", &params).await?.data)
    }

    /// Searches domestic destinations, canonicalizing every record.
    ///
    /// The endpoint path is selected per account tier. An empty result set
    /// is a successful empty list.
    ///
    /// # Errors
    ///
    /// Any underlying failure is wrapped as [`OngkirError::Api`] with a
    /// `Failed to search domestic destinations` prefix, preserving the
    /// original error as the source.
    #[instrument(skip(self, query), fields(search = %query.search))]
    pub async fn search_domestic_destinations(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<Destination>> {
        self.domestic_search(query)
            .await
            .map_err(|e| e.with_context("Failed to search domestic destinations"))
    }

    async fn domestic_search(&self, query: &SearchQuery) -> Result<Vec<Destination>> {
        let path = self.config.account_tier().domestic_search_path();
        let params = [
            ("search", query.search.clone()),
            ("limit", query.limit.to_string()),
            ("offset", query.offset.to_string()),
        ];

        let envelope = self.request(Method::Get, path, &params).await?;
        Ok(canonicalize_all(&envelope.data))
    }

    /// Searches international destinations.
    ///
    /// An empty search term returns the unfiltered, paged country list;
    /// `limit` and `offset` are attached only when greater than zero. The
    /// vendor already serves these records in a uniform shape, so the data
    /// is returned as-is.
    ///
    /// # Errors
    ///
    /// Any underlying failure is wrapped as [`OngkirError::Api`] with a
    /// `Failed to search international destinations` prefix, preserving the
    /// original error as the source.
    #[instrument(skip(self, query), fields(search = %query.search))]
    pub async fn search_international_destinations(&self, query: &SearchQuery) -> Result<Value> {
        self.international_search(query)
            .await
            .map_err(|e| e.with_context("Failed to search international destinations"))
    }

    async fn international_search(&self, query: &SearchQuery) -> Result<Value> {
        let mut params = Vec::with_capacity(3);
        if !query.search.is_empty() {
            params.push(("search", query.search.clone()));
        }
        if query.limit > 0 {
            params.push(("limit", query.limit.to_string()));
        }
        if query.offset > 0 {
            params.push(("offset", query.offset.to_string()));
        }

        let envelope =
            self.request(Method::Get, "destination/international-destination", &params).await?;
        Ok(envelope.data)
    }

    /// Calculates domestic shipping cost.
    ///
    /// Required fields: `origin`, `destination`, `weight`, `courier`.
    /// Optional `price` selects the vendor's price ordering
    /// ("lowest"/"highest").
    ///
    /// # Errors
    ///
    /// Returns [`OngkirError::MissingParameters`] naming every absent or
    /// empty required field before any network call, [`OngkirError::Api`]
    /// on a non-success vendor status, and [`OngkirError::Http`] on
    /// transport failure.
    #[instrument(skip(self, params))]
    pub async fn calculate_domestic_cost(&self, params: &CostParams) -> Result<Value> {
        require_params(params, &COST_REQUIRED_PARAMS)?;

        let mut form = collect_params(params, &COST_REQUIRED_PARAMS);
        if let Some(price) = params.get("price").filter(|v| !v.is_null()) {
            form.push(("price", scalar_param(price)));
        }

        let envelope = self.request(Method::Post, "calculate/domestic-cost", &form).await?;
        Ok(envelope.data)
    }

    /// Calculates international shipping cost.
    ///
    /// Required fields: `origin`, `destination`, `weight`, `courier`.
    ///
    /// # Errors
    ///
    /// Returns [`OngkirError::MissingParameters`] naming every absent or
    /// empty required field before any network call, [`OngkirError::Api`]
    /// on a non-success vendor status, and [`OngkirError::Http`] on
    /// transport failure.
    #[instrument(skip(self, params))]
    pub async fn calculate_international_cost(&self, params: &CostParams) -> Result<Value> {
        require_params(params, &COST_REQUIRED_PARAMS)?;

        let form = collect_params(params, &COST_REQUIRED_PARAMS);
        let envelope = self.request(Method::Post, "calculate/international-cost", &form).await?;
        Ok(envelope.data)
    }

    /// Tracks a shipment by waybill number.
    ///
    /// # Errors
    ///
    /// Returns [`OngkirError::MissingParameters`] naming whichever of
    /// `waybill` and `courier` is empty, [`OngkirError::Api`] on a
    /// non-success vendor status, and [`OngkirError::Http`] on transport
    /// failure.
    #[instrument(skip(self))]
    pub async fn track_waybill(&self, waybill: &str, courier: &str) -> Result<Value> {
        let mut missing = Vec::new();
        if waybill.is_empty() {
            missing.push("waybill".to_owned());
        }
        if courier.is_empty() {
            missing.push("courier".to_owned());
        }
        if !missing.is_empty() {
            return Err(OngkirError::MissingParameters(missing));
        }

        let params = [("awb", waybill.to_owned()), ("courier", courier.to_owned())];
        let envelope = self.request(Method::Post, "track/waybill", &params).await?;
        Ok(envelope.data)
    }

    /// Builds a fresh request descriptor, executes it, and normalizes the
    /// response.
    async fn request(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<ApiEnvelope> {
        let defaults = self.config.request_defaults();
        let request = ApiRequest {
            method,
            base_url: defaults.base_url,
            path,
            params,
            headers: &defaults.headers,
        };

        let payload = self.transport.execute(request).await?;
        normalize(payload)
    }
}

/// Checks a parameter map for required fields, collecting every miss.
///
/// A field is missing when it is absent, `null`, or an empty string; other
/// values (including numeric zero) count as present.
fn require_params(params: &CostParams, required: &[&str]) -> Result<()> {
    let missing: Vec<String> = required
        .iter()
        .filter(|key| is_missing(params.get(**key)))
        .map(|key| (*key).to_owned())
        .collect();

    if missing.is_empty() { Ok(()) } else { Err(OngkirError::MissingParameters(missing)) }
}

fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Renders a parameter value as a wire scalar, without JSON string quoting.
fn scalar_param(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn collect_params(
    params: &CostParams,
    keys: &'static [&'static str],
) -> Vec<(&'static str, String)> {
    keys.iter().filter_map(|key| params.get(*key).map(|value| (*key, scalar_param(value)))).collect()
}
