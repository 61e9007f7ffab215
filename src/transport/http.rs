//! HTTP transport implementation over reqwest.

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use super::config::TransportOptions;
use crate::{
    error::{OngkirError, Result},
    transport::{ApiRequest, Method, Transport},
};

/// HTTP transport backed by a pooled [`reqwest::Client`].
///
/// Performs one request per [`execute`](Transport::execute) call: GET
/// parameters travel in the query string, POST parameters form-encoded in
/// the body (`application/x-www-form-urlencoded`), and the response body is
/// decoded as JSON. Vendor status codes live in the JSON body, so non-2xx
/// HTTP statuses do not short-circuit here; the normalizer surfaces the
/// vendor's own error.
///
/// No retries and no caching; timeout and pooling policy come from
/// [`TransportOptions`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport with default options.
    ///
    /// # Errors
    ///
    /// Returns [`OngkirError::Http`] if the underlying client cannot be
    /// built.
    pub fn new() -> Result<Self> {
        Self::with_options(&TransportOptions::default())
    }

    /// Creates a transport with custom options.
    ///
    /// Disabling `verify_ssl` turns off TLS certificate verification for
    /// every request made through this transport.
    ///
    /// # Errors
    ///
    /// Returns [`OngkirError::Http`] if the underlying client cannot be
    /// built.
    ///
    /// # Examples
    ///
    /// ```
    /// use rajaongkir::transport::{HttpTransport, TransportOptions};
    ///
    /// let options = TransportOptions { timeout_secs: 60, ..Default::default() };
    /// let transport = HttpTransport::with_options(&options).unwrap();
    /// # let _ = transport;
    /// ```
    pub fn with_options(options: &TransportOptions) -> Result<Self> {
        let mut builder = Client::builder()
            .pool_max_idle_per_host(options.pool_max_idle_per_host)
            .timeout(options.timeout())
            .connect_timeout(options.connect_timeout());

        if !options.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build().map_err(OngkirError::Http)?;

        Ok(Self { client })
    }

    #[instrument(
        skip(self, request),
        fields(method = request.method.as_str(), path = request.path)
    )]
    async fn execute_request(&self, request: ApiRequest<'_>) -> Result<Value> {
        let url = build_url(&request)?;

        let mut builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url).form(&request.params),
        };

        for (key, value) in request.headers {
            builder = builder.header(*key, *value);
        }

        let response = builder.send().await?;

        let http_status = response.status();
        if !http_status.is_success() {
            // The vendor carries its status in the body; decode anyway.
            debug!(status = http_status.as_u16(), "non-success HTTP status");
        }

        let payload = response.json::<Value>().await?;

        Ok(payload)
    }
}

impl Transport for HttpTransport {
    async fn execute<'a>(&'a self, request: ApiRequest<'a>) -> Result<Value> {
        self.execute_request(request).await
    }
}

/// Joins the base URL and path, attaching GET parameters as a query string.
fn build_url(request: &ApiRequest<'_>) -> Result<Url> {
    let joined = format!(
        "{}/{}",
        request.base_url.trim_end_matches('/'),
        request.path.trim_start_matches('/')
    );
    let mut url = Url::parse(&joined)
        .map_err(|e| OngkirError::InvalidConfiguration(format!("invalid request URL '{joined}': {e}")))?;

    if request.method == Method::Get && !request.params.is_empty() {
        let mut query_pairs = url.query_pairs_mut();
        for (key, value) in request.params {
            query_pairs.append_pair(key, value);
        }
    }

    Ok(url)
}
