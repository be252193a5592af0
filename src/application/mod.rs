//! Application Layer
//!
//! Use cases wiring the domain to its ports.

pub mod access_matcher;
pub mod provision;

pub use access_matcher::AccessMatcher;
pub use provision::{provision, ProvisionError};
