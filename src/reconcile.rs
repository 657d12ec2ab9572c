//! Scope → release-policy reconciliation.
//!
//! Whenever a service's scope configuration changes, the reconciler
//! derives the concrete [`ReleasePolicy`] its declared scopes imply and
//! persists the service record if anything actually changed. Standard
//! keywords are matched leniently (trim + uppercase); user-defined scopes
//! are matched against the configured custom policies by exact,
//! case-sensitive name (after trimming the declared string).
//!
//! Outcomes for one service, as a tiny state machine:
//!
//! | declared scopes | accumulated chain | assigned policy        |
//! |-----------------|-------------------|------------------------|
//! | none            | —                 | left untouched         |
//! | some            | empty             | [`ReleasePolicy::DenyAll`] |
//! | some            | non-empty         | [`ReleasePolicy::Chain`]   |
//!
//! `offline_access` never contributes to the chain; it flips the
//! service's refresh-token flag instead.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::Result;
use crate::policy::{CustomScopePolicy, ReleasePolicy};
use crate::registry::ServiceRegistry;
use crate::scope::StandardScope;
use crate::service::RegisteredService;

/// Converts a service's declared scope list into its release policy.
///
/// Reconciliation of different services is independent and may run fully
/// in parallel; concurrent reconciliation of the *same* service relies on
/// the registry's write discipline, never on locks taken here.
pub struct ScopeReconciler {
    registry: Arc<dyn ServiceRegistry>,
    custom_policies: Vec<CustomScopePolicy>,
}

impl ScopeReconciler {
    /// Create a reconciler over a registry and the fixed, ordered
    /// custom-policy list assembled at startup.
    pub fn new(registry: Arc<dyn ServiceRegistry>, custom_policies: Vec<CustomScopePolicy>) -> Self {
        Self {
            registry,
            custom_policies,
        }
    }

    /// Reconcile the service's declared scopes into an assigned policy,
    /// persisting the record when it changed.
    ///
    /// Idempotent: re-running on an unchanged configuration assigns an
    /// equal policy and performs no registry write. Registry errors
    /// propagate to the caller.
    pub async fn reconcile(&self, service: &mut RegisteredService) -> Result<()> {
        if !service.is_oidc() {
            // Non-OIDC registrations reconcile through the generic
            // machinery outside this engine.
            trace!(service = %service.id, "service is not OIDC-capable, nothing to reconcile");
            return Ok(());
        }

        trace!(service = %service.id, "reconciling scopes and claims");
        let snapshot = service.clone();

        let mut chain: Vec<ReleasePolicy> = Vec::new();
        for declared in &snapshot.scopes {
            match StandardScope::parse(declared) {
                Some(StandardScope::Email) => {
                    debug!(scope = %declared, "mapped to the email release policy");
                    chain.push(ReleasePolicy::Email);
                }
                Some(StandardScope::Address) => {
                    debug!(scope = %declared, "mapped to the address release policy");
                    chain.push(ReleasePolicy::Address);
                }
                Some(StandardScope::Profile) => {
                    debug!(scope = %declared, "mapped to the profile release policy");
                    chain.push(ReleasePolicy::Profile);
                }
                Some(StandardScope::Phone) => {
                    debug!(scope = %declared, "mapped to the phone release policy");
                    chain.push(ReleasePolicy::Phone);
                }
                Some(StandardScope::OfflineAccess) => {
                    debug!(service = %service.id, "marked to generate refresh tokens");
                    service.generate_refresh_token = true;
                }
                Some(other) => {
                    debug!(scope = %other, service = %service.id, "scope is unsupported");
                }
                None => match self.find_custom_policy(declared) {
                    Some(policy) => {
                        debug!(scope = %declared, "mapped to a user-defined release policy");
                        chain.push(ReleasePolicy::Custom(policy.clone()));
                    }
                    None => {
                        trace!(scope = %declared, "scope matches no known policy and is ignored");
                    }
                },
            }
        }

        if snapshot.scopes.is_empty() {
            trace!(
                service = %service.id,
                "no scopes declared; existing release policy left in place"
            );
        } else if chain.is_empty() {
            debug!(
                service = %service.id,
                "no release policy could be determined from the declared scopes; \
                 no claims will be released"
            );
            service.release_policy = Some(ReleasePolicy::DenyAll);
        } else {
            service.release_policy = Some(ReleasePolicy::chain(chain));
        }

        let written = self.registry.save_if_changed(&snapshot, service).await?;
        if written {
            debug!(service = %service.id, "reconciliation result saved");
        }
        Ok(())
    }

    /// First custom policy whose scope name equals the trimmed declared
    /// string, compared case-sensitively.
    fn find_custom_policy(&self, declared: &str) -> Option<&CustomScopePolicy> {
        let trimmed = declared.trim();
        self.custom_policies
            .iter()
            .find(|policy| policy.scope() == trimmed)
    }
}

// ============================================================================
// Tests
// ============================================================================
