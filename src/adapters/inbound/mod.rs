mod http_guard;

pub use http_guard::{geo_guard, protect};
