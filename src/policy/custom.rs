//! User-defined scope policies.
//!
//! A custom scope releases an explicit claim allow-list. Definitions come
//! from configuration at startup and are fixed afterwards; a definition
//! that fails validation is skipped wherever lists of them are assembled,
//! never aborting the caller.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::CustomScopeConfig;
use crate::policy::standard::release_allowed;
use crate::principal::{AttributeMap, Principal};
use crate::{Error, Result};

/// A user-defined scope mapped to an explicit claim allow-list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomScopePolicy {
    scope: String,
    claims: Vec<String>,
}

impl CustomScopePolicy {
    /// Validate and construct a custom scope policy.
    ///
    /// The scope name must be non-blank and every listed claim name must be
    /// non-blank. Claims may legitimately be empty as a whole — such a
    /// scope releases nothing.
    pub fn new(scope: impl Into<String>, claims: Vec<String>) -> Result<Self> {
        let scope = scope.into();
        if scope.trim().is_empty() {
            return Err(Error::InvalidScope("scope name is blank".to_string()));
        }
        if claims.iter().any(|claim| claim.trim().is_empty()) {
            return Err(Error::InvalidScope(format!(
                "scope '{scope}' lists a blank claim name"
            )));
        }
        Ok(Self { scope, claims })
    }

    /// The scope name this policy is registered under.
    #[must_use]
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// The claim allow-list.
    #[must_use]
    pub fn claims(&self) -> &[String] {
        &self.claims
    }

    /// Release the allowed claims the principal carries.
    pub(crate) fn release(&self, principal: &Principal) -> AttributeMap {
        release_allowed(&self.claims, principal)
    }

    /// Build the ordered custom-policy list from configuration.
    ///
    /// Invalid definitions are logged and skipped; assembly always
    /// completes with whatever entries validated.
    #[must_use]
    pub fn from_definitions(definitions: &[CustomScopeConfig]) -> Vec<Self> {
        definitions
            .iter()
            .filter_map(|def| match Self::new(def.scope.clone(), def.claims.clone()) {
                Ok(policy) => Some(policy),
                Err(e) => {
                    warn!(scope = %def.scope, error = %e, "skipping invalid custom scope definition");
                    None
                }
            })
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn definition(scope: &str, claims: &[&str]) -> CustomScopeConfig {
        CustomScopeConfig {
            scope: scope.to_string(),
            claims: claims.iter().map(|c| (*c).to_string()).collect(),
        }
    }

    #[test]
    fn new_rejects_blank_scope_name() {
        let err = CustomScopePolicy::new("   ", vec!["a".to_string()]).unwrap_err();
        assert!(err.to_string().contains("blank"));
    }

    #[test]
    fn new_rejects_blank_claim_name() {
        let err =
            CustomScopePolicy::new("eduperson", vec!["ok".to_string(), " ".to_string()])
                .unwrap_err();
        assert!(err.to_string().contains("eduperson"));
    }

    #[test]
    fn empty_claim_list_is_allowed() {
        let policy = CustomScopePolicy::new("marker", vec![]).unwrap();
        assert!(policy.claims().is_empty());
    }

    #[test]
    fn release_returns_only_listed_claims() {
        // GIVEN: a policy listing two claims, one of which the principal has
        let policy = CustomScopePolicy::new(
            "eduperson",
            vec!["eduperson_affiliation".to_string(), "eduperson_entitlement".to_string()],
        )
        .unwrap();
        let mut attributes = AttributeMap::new();
        attributes.insert("eduperson_affiliation".to_string(), vec![json!("staff")]);
        attributes.insert("email".to_string(), vec![json!("x@y.z")]);
        let principal = Principal::new("ada", attributes);

        // WHEN: releasing
        let released = policy.release(&principal);

        // THEN: exactly the listed-and-present claim
        assert_eq!(released.len(), 1);
        assert_eq!(released["eduperson_affiliation"], vec![json!("staff")]);
    }

    #[test]
    fn from_definitions_skips_invalid_entries() {
        let definitions = vec![
            definition("good", &["claim_a"]),
            definition("", &["claim_b"]),
            definition("also_good", &[]),
        ];

        let policies = CustomScopePolicy::from_definitions(&definitions);

        let scopes: Vec<&str> = policies.iter().map(CustomScopePolicy::scope).collect();
        assert_eq!(scopes, vec!["good", "also_good"]);
    }
}
