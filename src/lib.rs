//! geo-gate Library
//!
//! Country-based request admission for reverse proxies and HTTP servers.
//! Resolve a peer address to a country with a GeoIP database, then admit
//! or reject it against allow/deny lists. Anything that cannot be parsed or
//! resolved is rejected.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types
pub use adapters::inbound::{geo_guard, protect};
pub use adapters::outbound::MaxMindGeoResolver;
pub use application::{provision, AccessMatcher, ProvisionError};
pub use config::{load_config, Config, ConfigError, FilterConfig};
pub use domain::ports::GeoResolver;
pub use domain::services::PolicyEvaluator;
pub use domain::{AddressFormatError, CountryCode, Policy, ResolutionError};
pub use infrastructure::MatchLog;
