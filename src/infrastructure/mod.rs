//! Infrastructure Layer
//!
//! Cross-cutting concerns: logging sinks and process signals.

pub mod match_log;
pub mod shutdown;

pub use match_log::MatchLog;
pub use shutdown::{shutdown_signal, ShutdownSignal};
