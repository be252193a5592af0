//! Provisioning
//!
//! Builds a ready-to-use [`AccessMatcher`] from configuration: opens the
//! optional log file, then the geolocation database. Failures here are
//! startup-fatal, unlike per-request failures which only ever deny.

use crate::adapters::outbound::MaxMindGeoResolver;
use crate::application::access_matcher::AccessMatcher;
use crate::config::FilterConfig;
use crate::domain::entities::Policy;
use crate::infrastructure::match_log::MatchLog;
use std::sync::Arc;

/// Startup errors.
#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    #[error("db_path is required")]
    MissingDbPath,
    #[error("cannot open log file {path}: {source}")]
    LogFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot open database file {path}: {message}")]
    Database { path: String, message: String },
}

/// Provision a matcher backed by the MaxMind database at `cfg.db_path`.
///
/// Resources acquired before a failure are dropped before the error is
/// returned.
pub fn provision(cfg: &FilterConfig) -> Result<AccessMatcher, ProvisionError> {
    if cfg.db_path.is_empty() {
        return Err(ProvisionError::MissingDbPath);
    }

    let log = match cfg.log_path.as_deref().filter(|p| !p.is_empty()) {
        Some(path) => MatchLog::to_file(path).map_err(|source| ProvisionError::LogFile {
            path: path.to_string(),
            source,
        })?,
        None => MatchLog::disabled(),
    };

    let resolver =
        MaxMindGeoResolver::from_file(&cfg.db_path).map_err(|e| ProvisionError::Database {
            path: cfg.db_path.clone(),
            message: e.to_string(),
        })?;

    tracing::info!(
        db_path = %cfg.db_path,
        allow = cfg.allow_countries.len(),
        deny = cfg.deny_countries.len(),
        match_log = log.is_enabled(),
        "GeoIP database loaded"
    );

    if !cfg.allow_countries.is_empty() && !cfg.deny_countries.is_empty() {
        tracing::warn!("both allow_countries and deny_countries set; deny_countries takes precedence");
    }

    Ok(AccessMatcher::new(
        Policy::from_lists(
            cfg.allow_countries.iter().map(String::as_str),
            cfg.deny_countries.iter().map(String::as_str),
        ),
        Arc::new(resolver),
        log,
    ))
}
