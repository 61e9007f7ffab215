//! RajaOngkir: client SDK for the Komerce shipping-cost API.
//!
//! A Rust client for the RajaOngkir (Komerce) REST API: province and city
//! lookup, domestic and international destination search, shipping-cost
//! calculation, and waybill tracking. Application code gets one consistent
//! result/error contract instead of hand-building HTTP requests, headers,
//! and response parsing against the vendor's inconsistent payloads.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │  Application     │
//! └────────┬─────────┘
//!          │ facade operations (provinces, search, cost, tracking)
//! ┌────────▼─────────────────────────────────────┐
//! │           RajaOngkir client (this crate)     │
//! │  ┌─────────────┐      ┌───────────────────┐  │
//! │  │ Facade +    │──────│ Response          │  │
//! │  │ validation  │      │ normalizer        │  │
//! │  └──────┬──────┘      └───────────────────┘  │
//! └─────────┼────────────────────────────────────┘
//!           │ one HTTPS round trip per call (key header, form params)
//! ┌─────────▼────────┐
//! │  RajaOngkir API  │  rajaongkir.komerce.id
//! └──────────────────┘
//! ```
//!
//! The vendor answers with two incompatible JSON envelopes across endpoint
//! generations and varies field names across account tiers. The normalizer
//! ([`response`]) reduces every response to a uniform envelope or a typed
//! error, and destination records are coerced into one canonical shape
//! ([`destination`]) regardless of which keys the vendor used.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rajaongkir::{RajaOngkir, SearchQuery};
//!
//! # async fn example() -> rajaongkir::error::Result<()> {
//! let client = RajaOngkir::new("your-api-key", "starter", true)?;
//!
//! // Look up provinces and cities
//! let provinces = client.provinces().await?;
//! let jakarta = client.city(152).await?;
//!
//! // Search destinations (canonicalized records)
//! let hits = client.search_domestic_destinations(&SearchQuery::new("solo")).await?;
//! println!("{} matches", hits.len());
//!
//! // Calculate shipping cost
//! let mut params = rajaongkir::CostParams::new();
//! params.insert("origin".into(), "501".into());
//! params.insert("destination".into(), "114".into());
//! params.insert("weight".into(), 1700.into());
//! params.insert("courier".into(), "jne".into());
//! let cost = client.calculate_domestic_cost(&params).await?;
//!
//! // Track a shipment
//! let tracking = client.track_waybill("JX1234567890", "jne").await?;
//! # let _ = (provinces, jakarta, cost, tracking);
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`client`]: facade operations, one per vendor capability
//! - [`config`]: API key, account tier, and tier-derived base URL
//! - [`response`]: envelope normalization, the core of the crate
//! - [`destination`]: canonical destination records
//! - [`transport`]: one-round-trip transport abstraction and the reqwest
//!   implementation
//! - [`error`]: typed errors with the vendor's own status codes
//!
//! # Error Handling
//!
//! All operations return [`Result<T, OngkirError>`](error::Result). The
//! three caller-facing kinds stay distinguishable:
//!
//! ```rust,no_run
//! use rajaongkir::{OngkirError, RajaOngkir, SearchQuery};
//!
//! # async fn example() {
//! let client = RajaOngkir::with_defaults("your-api-key").unwrap();
//!
//! match client.search_domestic_destinations(&SearchQuery::new("solo")).await {
//!     Ok(hits) => println!("{} matches", hits.len()),
//!     Err(OngkirError::Api { code, message, .. }) => {
//!         eprintln!("vendor rejected the request ({code}): {message}");
//!     }
//!     Err(OngkirError::Http(e)) => eprintln!("network failure: {e}"),
//!     Err(e) => eprintln!("{e}"),
//! }
//! # }
//! ```
//!
//! An empty result list is a successful empty result, never an error, so
//! callers can tell "zero matches" from "request failed". Nothing is
//! retried internally.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod client;
pub mod config;
pub mod destination;
pub mod error;
pub mod response;
pub mod transport;

pub use client::{CostParams, RajaOngkir, SearchQuery};
pub use config::{AccountTier, ApiConfig, RequestDefaults};
pub use destination::Destination;
pub use error::{OngkirError, Result};
pub use response::{ApiEnvelope, LegacyResponse, ResponseMeta, normalize};
pub use transport::{ApiRequest, HttpTransport, Method, Transport, TransportOptions};
