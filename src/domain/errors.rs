//! Per-request error conditions.
//!
//! Neither error ever reaches the host: the matcher turns both into a deny
//! decision and reports the detail through its log sink.

/// The peer address string could not be split or parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressFormatError {
    #[error("address {0}: missing port in address")]
    MissingPort(String),
    #[error("address {0}: too many colons in address")]
    TooManyColons(String),
    #[error("address {0}: missing ']' in address")]
    MissingBracket(String),
    #[error("address {0}: unexpected '[' or ']' in address")]
    UnexpectedBracket(String),
    #[error("invalid IP address: {0:?}")]
    InvalidIp(String),
}

/// The geolocation dataset failed to answer.
///
/// "Address not found" is not an error: resolvers report it as an empty
/// country code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionError {
    #[error("geolocation lookup failed: {0}")]
    Lookup(String),
    #[error("geolocation database is closed")]
    Closed,
}
