//! Domain Entities - Core business objects
//!
//! These entities have no external dependencies and contain only
//! business logic.

use crate::domain::value_objects::CountryCode;

/// Allow/deny country lists governing a matcher's decisions.
///
/// Built once from configuration and never mutated afterwards, so it can
/// be shared across concurrent evaluations without synchronization.
/// Membership is all that matters: order and duplicates have no effect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Policy {
    allow: Vec<CountryCode>,
    deny: Vec<CountryCode>,
}

impl Policy {
    /// Build a policy from raw country tokens, as found in configuration.
    pub fn from_lists<A, D>(allow: A, deny: D) -> Self
    where
        A: IntoIterator,
        A::Item: Into<CountryCode>,
        D: IntoIterator,
        D::Item: Into<CountryCode>,
    {
        Self {
            allow: allow.into_iter().map(Into::into).collect(),
            deny: deny.into_iter().map(Into::into).collect(),
        }
    }

    pub fn allow(&self) -> &[CountryCode] {
        &self.allow
    }

    pub fn deny(&self) -> &[CountryCode] {
        &self.deny
    }

    /// True when neither list is configured. Such a policy lets everything
    /// through.
    pub fn is_open(&self) -> bool {
        self.allow.is_empty() && self.deny.is_empty()
    }

    pub fn is_allowed(&self, code: &CountryCode) -> bool {
        self.allow.contains(code)
    }

    pub fn is_denied(&self, code: &CountryCode) -> bool {
        self.deny.contains(code)
    }
}
