//! Domain Layer
//!
//! Country codes, policies and the pure decision logic. Nothing in here
//! touches the dataset or the network.

pub mod address;
pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::Policy;
pub use errors::{AddressFormatError, ResolutionError};
pub use value_objects::CountryCode;
