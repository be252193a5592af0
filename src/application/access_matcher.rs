//! Access Matcher - Main application use case
//!
//! Turns a request's source address into an admit/reject decision:
//! parse the address, resolve its country, evaluate the policy. Every
//! failure along the way rejects the request.

use crate::domain::address::{parse_ip, split_host_port};
use crate::domain::entities::Policy;
use crate::domain::ports::GeoResolver;
use crate::domain::services::PolicyEvaluator;
use crate::infrastructure::match_log::MatchLog;
use std::sync::Arc;

/// Country-based request matcher.
///
/// Shared between request tasks behind an `Arc`; `evaluate` takes `&self`
/// and is safe to call concurrently.
pub struct AccessMatcher {
    policy: Policy,
    resolver: Arc<dyn GeoResolver>,
    log: MatchLog,
}

impl AccessMatcher {
    /// Create a new access matcher.
    pub fn new(policy: Policy, resolver: Arc<dyn GeoResolver>, log: MatchLog) -> Self {
        Self {
            policy,
            resolver,
            log,
        }
    }

    /// Decide whether a request from `raw_address` (`host:port`) may pass.
    ///
    /// This is the main entry point for admission decisions. It:
    /// 1. Admits everything when no policy is configured (no lookup)
    /// 2. Parses the address, rejecting anything that is not an IP literal
    /// 3. Resolves the country, rejecting on dataset failure
    /// 4. Evaluates the policy
    ///
    /// Errors never escape; they are logged to the matcher's sink and
    /// become `false`.
    pub fn evaluate(&self, raw_address: &str) -> bool {
        if self.policy.is_open() {
            return true;
        }

        self.log.scope(|| self.evaluate_closed(raw_address))
    }

    fn evaluate_closed(&self, raw_address: &str) -> bool {
        let host = match split_host_port(raw_address) {
            Ok((host, _port)) => host,
            Err(e) => {
                tracing::warn!(address = raw_address, error = %e, "cannot split IP address");
                ""
            }
        };

        let ip = match parse_ip(host) {
            Ok(ip) => ip,
            Err(_) => {
                tracing::warn!(address = raw_address, "cannot parse IP address");
                return false;
            }
        };

        let code = match self.resolver.lookup(ip) {
            Ok(code) => code,
            Err(e) => {
                tracing::warn!(address = raw_address, error = %e, "cannot lookup IP address");
                return false;
            }
        };

        tracing::debug!(ip = raw_address, country = %code, "detected country");

        let allowed = PolicyEvaluator::decide(&code, &self.policy);
        if !allowed {
            tracing::debug!(country = %code, "country not allowed");
        }

        allowed
    }

    /// Get the policy this matcher enforces.
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Release the geolocation dataset.
    ///
    /// Call once, after in-flight requests have drained. Any later
    /// evaluation that needs a lookup is rejected.
    pub fn cleanup(&self) {
        self.resolver.close();
    }
}
