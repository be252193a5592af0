//! Match Log
//!
//! Per-matcher structured log sink. Each matcher routes its request-level
//! events (parse failures, lookup failures, detected countries) into its
//! own `tracing` dispatcher instead of the process-wide subscriber, so a
//! filter can write to a dedicated file or stay silent.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing::Dispatch;

/// Optional log sink owned by one matcher.
#[derive(Clone)]
pub struct MatchLog {
    dispatch: Dispatch,
    enabled: bool,
}

impl MatchLog {
    /// A sink that drops every event, including ones a global subscriber
    /// would otherwise have picked up.
    pub fn disabled() -> Self {
        Self {
            dispatch: Dispatch::none(),
            enabled: false,
        }
    }

    /// Route events to a dispatcher supplied by the host.
    pub fn from_dispatch(dispatch: Dispatch) -> Self {
        Self {
            dispatch,
            enabled: true,
        }
    }

    /// Append JSON lines to `path` at DEBUG level.
    ///
    /// The file is created if missing and never truncated.
    pub fn to_file(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        let subscriber = tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_target(false)
            .with_writer(Mutex::new(file))
            .finish();

        Ok(Self::from_dispatch(Dispatch::new(subscriber)))
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Run `f` with this sink as the current thread's default dispatcher.
    pub fn scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }
}

impl Default for MatchLog {
    fn default() -> Self {
        Self::disabled()
    }
}

impl std::fmt::Debug for MatchLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchLog")
            .field("enabled", &self.enabled)
            .finish()
    }
}
