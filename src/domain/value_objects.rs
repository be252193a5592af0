//! Value Objects - Immutable domain primitives
//!
//! Value objects are identified by their value rather than identity.
//! They are immutable and can be freely shared.

use serde::{Deserialize, Serialize};

/// Country token reported by a geolocation dataset.
///
/// Usually an ISO 3166-1 alpha-2 code (`US`, `BR`, `FR`), but the type
/// does not enforce that: datasets are free to return whatever they store,
/// and policies compare by exact string equality. The sentinel
/// [`CountryCode::UNKNOWN`] stands for addresses the dataset knows nothing
/// about.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryCode(String);

impl CountryCode {
    /// Sentinel for unrecognized countries.
    pub const UNKNOWN: &'static str = "UNK";

    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The `UNK` sentinel.
    pub fn unknown() -> Self {
        Self(Self::UNKNOWN.to_string())
    }

    /// Fold the "no result" tokens (`""` and `"0"`) into `UNK`.
    ///
    /// Every other value, including lowercase or padded ones, is kept
    /// byte-for-byte.
    ///
    /// # Examples
    /// ```
    /// use geo_gate::domain::CountryCode;
    ///
    /// assert_eq!(CountryCode::new("").normalize().as_str(), "UNK");
    /// assert_eq!(CountryCode::new("0").normalize().as_str(), "UNK");
    /// assert_eq!(CountryCode::new("us").normalize().as_str(), "us");
    /// ```
    pub fn normalize(self) -> Self {
        if self.0.is_empty() || self.0 == "0" {
            Self::unknown()
        } else {
            self
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == Self::UNKNOWN
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CountryCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CountryCode {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for CountryCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
