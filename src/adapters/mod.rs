//! Adapters
//!
//! Inbound adapters connect a host server to the matcher; outbound adapters
//! implement the domain ports on top of concrete datasets.

pub mod inbound;
pub mod outbound;
