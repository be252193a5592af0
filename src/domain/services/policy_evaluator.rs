//! Policy Evaluator Service
//!
//! Pure domain logic deciding whether a country may pass a policy.
//! This service has NO external dependencies - it's pure Rust.

use crate::domain::entities::Policy;
use crate::domain::value_objects::CountryCode;

/// Evaluates a resolved country against allow/deny lists.
///
/// Precedence:
/// 1. A non-empty deny-list is authoritative; the allow-list is ignored.
/// 2. Otherwise a non-empty allow-list admits only its members.
/// 3. With neither list configured everything passes.
///
/// Empty and `"0"` codes are treated as `UNK` before matching, so `UNK`
/// may be listed to allow or deny unrecognized addresses.
pub struct PolicyEvaluator;

impl PolicyEvaluator {
    /// Decide whether `code` passes `policy`.
    ///
    /// # Example
    /// ```
    /// use geo_gate::domain::services::PolicyEvaluator;
    /// use geo_gate::domain::{CountryCode, Policy};
    ///
    /// let policy = Policy::from_lists(["US"], ["CN"]);
    /// assert!(PolicyEvaluator::decide(&CountryCode::new("BR"), &policy));
    /// assert!(!PolicyEvaluator::decide(&CountryCode::new("CN"), &policy));
    /// ```
    pub fn decide(code: &CountryCode, policy: &Policy) -> bool {
        let code = code.clone().normalize();

        if !policy.deny().is_empty() {
            return !policy.is_denied(&code);
        }

        if !policy.allow().is_empty() {
            return policy.is_allowed(&code);
        }

        true
    }
}
