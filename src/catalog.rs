//! Scope → release-policy catalog.
//!
//! Built once at startup from a static registration table of standard
//! policies plus the configured user-defined policies, then shared
//! read-only (`Arc<PolicyCatalog>`) across every request-handling task.
//! Registration is last-write-wins: a custom policy under a standard
//! scope name overrides the built-in entry.

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::config::ClaimsConfig;
use crate::policy::{CustomScopePolicy, ReleasePolicy};
use crate::scope::StandardScope;

/// Static registration table of the claim-bearing standard scopes.
///
/// `openid` and `offline_access` are deliberately absent — they never
/// release claims.
fn standard_policies() -> [(&'static str, ReleasePolicy); 4] {
    [
        (StandardScope::Profile.name(), ReleasePolicy::Profile),
        (StandardScope::Email.name(), ReleasePolicy::Email),
        (StandardScope::Address.name(), ReleasePolicy::Address),
        (StandardScope::Phone.name(), ReleasePolicy::Phone),
    ]
}

/// Immutable mapping from scope name to release policy.
#[derive(Debug, Clone)]
pub struct PolicyCatalog {
    policies: IndexMap<String, ReleasePolicy>,
}

impl PolicyCatalog {
    /// Build the catalog from the enabled standard scopes and the ordered
    /// custom-policy list.
    ///
    /// A standard policy registers only when its exact name appears in
    /// `enabled_scopes`; disabled scopes are absent from the catalog, not
    /// merely inert. Custom policies register afterwards in given order,
    /// overwriting same-name entries.
    #[must_use]
    pub fn build(enabled_scopes: &[String], custom: &[CustomScopePolicy]) -> Self {
        let mut policies = IndexMap::new();

        for (scope, policy) in standard_policies() {
            if enabled_scopes.iter().any(|s| s == scope) {
                trace!(scope, "registering standard claim release policy");
                policies.insert(scope.to_string(), policy);
            } else {
                debug!(scope, "standard scope not enabled and will be ignored");
            }
        }

        for policy in custom {
            debug!(scope = policy.scope(), "registering user-defined claim release policy");
            policies.insert(
                policy.scope().to_string(),
                ReleasePolicy::Custom(policy.clone()),
            );
        }

        Self { policies }
    }

    /// Build the catalog straight from configuration.
    ///
    /// Invalid custom scope definitions are skipped (logged at warn);
    /// construction always completes with whatever entries succeeded.
    #[must_use]
    pub fn from_config(config: &ClaimsConfig) -> Self {
        let custom = CustomScopePolicy::from_definitions(&config.custom_scopes);
        Self::build(&config.scopes, &custom)
    }

    /// Look up the policy registered for a scope.
    #[must_use]
    pub fn policy(&self, scope: &str) -> Option<&ReleasePolicy> {
        self.policies.get(scope)
    }

    /// Whether a scope has a registered policy.
    #[must_use]
    pub fn contains(&self, scope: &str) -> bool {
        self.policies.contains_key(scope)
    }

    /// Registered scope names, in registration order.
    pub fn scopes(&self) -> impl Iterator<Item = &str> {
        self.policies.keys().map(String::as_str)
    }

    /// Number of registered policies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.policies.len()
    }

    /// Whether the catalog has no registered policies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CustomScopeConfig;

    // ── helpers ──────────────────────────────────────────────────────────

    fn enabled(scopes: &[&str]) -> Vec<String> {
        scopes.iter().map(|s| (*s).to_string()).collect()
    }

    fn custom(scope: &str, claims: &[&str]) -> CustomScopePolicy {
        CustomScopePolicy::new(scope, claims.iter().map(|c| (*c).to_string()).collect())
            .unwrap()
    }

    // ── standard registration ────────────────────────────────────────────

    #[test]
    fn enabled_standard_scopes_are_registered() {
        // GIVEN: profile and email enabled
        let catalog = PolicyCatalog::build(&enabled(&["profile", "email"]), &[]);

        // THEN: exactly those two scopes resolve
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.policy("profile"), Some(&ReleasePolicy::Profile));
        assert_eq!(catalog.policy("email"), Some(&ReleasePolicy::Email));
    }

    #[test]
    fn disabled_standard_scope_is_absent_not_inert() {
        let catalog = PolicyCatalog::build(&enabled(&["profile"]), &[]);
        assert!(catalog.policy("phone").is_none());
        assert!(!catalog.contains("address"));
    }

    #[test]
    fn enabled_matching_is_exact_not_normalised() {
        // "PROFILE" in the enabled list does not enable the profile policy
        let catalog = PolicyCatalog::build(&enabled(&["PROFILE"]), &[]);
        assert!(catalog.is_empty());
    }

    #[test]
    fn openid_and_offline_access_never_register() {
        let catalog = PolicyCatalog::build(
            &enabled(&["openid", "offline_access", "profile"]),
            &[],
        );
        assert_eq!(catalog.len(), 1);
        assert!(!catalog.contains("openid"));
        assert!(!catalog.contains("offline_access"));
    }

    // ── custom registration ──────────────────────────────────────────────

    #[test]
    fn custom_policies_register_after_standard() {
        let catalog = PolicyCatalog::build(
            &enabled(&["email"]),
            &[custom("eduperson", &["eduperson_affiliation"])],
        );

        let scopes: Vec<&str> = catalog.scopes().collect();
        assert_eq!(scopes, vec!["email", "eduperson"]);
    }

    #[test]
    fn custom_policy_overrides_standard_entry_with_same_name() {
        // GIVEN: a custom policy registered under "email"
        let override_policy = custom("email", &["work_email"]);
        let catalog =
            PolicyCatalog::build(&enabled(&["email"]), &[override_policy.clone()]);

        // THEN: lookup yields the custom policy, not the standard one
        assert_eq!(catalog.len(), 1);
        assert_eq!(
            catalog.policy("email"),
            Some(&ReleasePolicy::Custom(override_policy))
        );
    }

    #[test]
    fn later_custom_entry_overwrites_earlier_same_name() {
        let catalog = PolicyCatalog::build(
            &enabled(&[]),
            &[custom("dup", &["first"]), custom("dup", &["second"])],
        );

        assert_eq!(catalog.len(), 1);
        match catalog.policy("dup") {
            Some(ReleasePolicy::Custom(p)) => assert_eq!(p.claims().to_vec(), vec!["second"]),
            other => panic!("unexpected policy: {other:?}"),
        }
    }

    // ── from_config ──────────────────────────────────────────────────────

    #[test]
    fn from_config_skips_invalid_definitions_non_fatally() {
        // GIVEN: one valid and one invalid custom definition
        let config = ClaimsConfig {
            scopes: enabled(&["profile"]),
            custom_scopes: vec![
                CustomScopeConfig {
                    scope: String::new(),
                    claims: vec!["x".to_string()],
                },
                CustomScopeConfig {
                    scope: "good".to_string(),
                    claims: vec!["claim_a".to_string()],
                },
            ],
        };

        // WHEN: building
        let catalog = PolicyCatalog::from_config(&config);

        // THEN: construction completed with the valid entries
        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains("profile"));
        assert!(catalog.contains("good"));
    }

    #[test]
    fn default_config_registers_all_four_standard_policies() {
        let catalog = PolicyCatalog::from_config(&ClaimsConfig::default());
        let scopes: Vec<&str> = catalog.scopes().collect();
        assert_eq!(scopes, vec!["profile", "email", "address", "phone"]);
    }
}
