//! Client configuration types.
//!
//! This module holds the API key, account tier, and TLS-verification flag,
//! and derives the base endpoint URL from the tier.

use std::fmt;
use std::str::FromStr;

use crate::error::{OngkirError, Result};

/// Base endpoint for accounts without tier-specific routing.
pub const BASE_URL: &str = "https://rajaongkir.komerce.id/api/v1";
/// Base endpoint for starter accounts.
pub const BASE_URL_STARTER: &str = "https://rajaongkir.komerce.id/api/v1";
/// Base endpoint for pro accounts.
pub const BASE_URL_PRO: &str = "https://rajaongkir.komerce.id/api/v1";

/// RajaOngkir account tier.
///
/// The tier governs which vendor endpoints and pricing apply. The vendor
/// currently serves every tier from the same base URL; the per-tier lookup
/// is a configuration table, not an invariant, and may diverge again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountTier {
    /// Free tier with the basic endpoint set.
    Starter,
    /// Paid tier between starter and pro.
    Basic,
    /// Full-featured paid tier.
    Pro,
}

impl AccountTier {
    /// Parses a tier name, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`OngkirError::InvalidConfiguration`] for any value outside
    /// starter/basic/pro.
    ///
    /// # Examples
    ///
    /// ```
    /// use rajaongkir::AccountTier;
    ///
    /// assert_eq!(AccountTier::parse("PRO").unwrap(), AccountTier::Pro);
    /// assert!(AccountTier::parse("enterprise").is_err());
    /// ```
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "starter" => Ok(Self::Starter),
            "basic" => Ok(Self::Basic),
            "pro" => Ok(Self::Pro),
            _ => Err(OngkirError::InvalidConfiguration(
                "Invalid account type. Must be one of: starter, basic, pro".to_owned(),
            )),
        }
    }

    /// Returns the lowercase tier name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Starter => "starter",
            Self::Basic => "basic",
            Self::Pro => "pro",
        }
    }

    /// Returns the base endpoint URL for this tier.
    #[must_use]
    pub fn base_url(self) -> &'static str {
        match self {
            Self::Starter => BASE_URL_STARTER,
            Self::Pro => BASE_URL_PRO,
            Self::Basic => BASE_URL,
        }
    }

    /// Returns the domestic destination-search path for this tier.
    ///
    /// The vendor has historically routed starter and pro/basic accounts
    /// separately, so the lookup stays tier-keyed even while both arms
    /// resolve to the same path.
    pub(crate) fn domestic_search_path(self) -> &'static str {
        match self {
            Self::Starter => "destination/domestic-destination",
            Self::Basic | Self::Pro => "destination/domestic-destination",
        }
    }
}

impl fmt::Display for AccountTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountTier {
    type Err = OngkirError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Client configuration.
///
/// Constructed once per client instance. Immutable apart from the explicit
/// tier and TLS setters; changing the tier re-derives the base URL.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    api_key: String,
    tier: AccountTier,
    verify_ssl: bool,
    base_url: &'static str,
}

impl ApiConfig {
    /// Creates a configuration from an API key and tier name.
    ///
    /// # Errors
    ///
    /// Returns [`OngkirError::InvalidConfiguration`] when the tier name is
    /// not one of starter/basic/pro (case-insensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use rajaongkir::ApiConfig;
    ///
    /// let config = ApiConfig::new("test_api_key", "Basic", true).unwrap();
    /// assert_eq!(config.account_tier().as_str(), "basic");
    /// assert!(!config.base_url().is_empty());
    /// ```
    pub fn new(api_key: impl Into<String>, account_tier: &str, verify_ssl: bool) -> Result<Self> {
        let tier = AccountTier::parse(account_tier)?;
        Ok(Self { api_key: api_key.into(), tier, verify_ssl, base_url: tier.base_url() })
    }

    /// Creates a starter-tier configuration with TLS verification enabled.
    ///
    /// # Errors
    ///
    /// This method is infallible for the defaults but returns `Result` for
    /// API consistency with [`new`](Self::new).
    pub fn with_defaults(api_key: impl Into<String>) -> Result<Self> {
        Self::new(api_key, "starter", true)
    }

    /// Returns the API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the account tier.
    #[must_use]
    pub fn account_tier(&self) -> AccountTier {
        self.tier
    }

    /// Returns the base endpoint URL derived from the tier.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url
    }

    /// Returns whether TLS certificates are verified.
    #[must_use]
    pub fn verify_ssl(&self) -> bool {
        self.verify_ssl
    }

    /// Switches the account tier and re-derives the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`OngkirError::InvalidConfiguration`] for an unrecognized
    /// tier name; the configuration is left unchanged in that case.
    pub fn set_account_tier(&mut self, account_tier: &str) -> Result<()> {
        let tier = AccountTier::parse(account_tier)?;
        self.tier = tier;
        self.base_url = tier.base_url();
        Ok(())
    }

    /// Enables or disables TLS certificate verification.
    pub fn set_verify_ssl(&mut self, verify_ssl: bool) {
        self.verify_ssl = verify_ssl;
    }

    /// Returns the defaults consumed when building transport calls.
    #[must_use]
    pub fn request_defaults(&self) -> RequestDefaults<'_> {
        RequestDefaults {
            base_url: self.base_url,
            headers: vec![("key", self.api_key.as_str())],
            verify: self.verify_ssl,
        }
    }
}

/// Per-request defaults derived from an [`ApiConfig`].
///
/// Borrowed snapshot of the base URL, authentication headers, and TLS flag;
/// every operation takes a fresh copy so concurrent calls never share
/// mutable request state.
#[derive(Debug, Clone)]
pub struct RequestDefaults<'a> {
    /// Base endpoint URL.
    pub base_url: &'a str,
    /// Headers attached to every request (the `key` API-key header).
    pub headers: Vec<(&'static str, &'a str)>,
    /// Whether TLS certificates are verified.
    pub verify: bool,
}
