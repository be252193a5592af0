//! GeoIP Resolver Port
//!
//! Defines the interface for resolving IP addresses to countries.

use crate::domain::errors::ResolutionError;
use crate::domain::value_objects::CountryCode;
use std::net::IpAddr;

/// Resolver for IP address to country code.
///
/// This is an outbound port that abstracts the GeoIP database.
/// Implementations may use MaxMind GeoLite2, IP2Location, or other databases.
/// Lookups are called concurrently from many request tasks, so any
/// synchronization the dataset needs lives inside the implementation.
pub trait GeoResolver: Send + Sync {
    /// Resolve an IP address to the raw country token stored in the dataset.
    ///
    /// An address the dataset has no record for is `Ok` with an empty (or
    /// `"0"`) code. `Err` is reserved for the dataset itself failing.
    fn lookup(&self, ip: IpAddr) -> Result<CountryCode, ResolutionError>;

    /// Release the underlying dataset handle.
    ///
    /// Called once at shutdown after in-flight requests have drained.
    fn close(&self) {}
}
