//! Per-request scope-driven attribute filtering.
//!
//! [`ScopeClaimsFilter`] decides which of an authenticated principal's
//! attributes may be released for one authorization request: it intersects
//! the granted scopes with the target service's declared scopes and merges
//! the catalog policies of the surviving scopes.
//!
//! # Escape hatches
//!
//! Two documented pass-through paths release the baseline principal
//! *unfiltered*:
//!
//! 1. The granted scope set lacks the literal `"openid"` value (the check
//!    is case-sensitive, unlike reconciliation's keyword matching).
//! 2. The granted/declared scope intersection is empty.
//!
//! Both are deliberate lenient defaults carried over from the original
//! behaviour, not error recovery. They are unusual for a
//! claims-minimisation design and worth a hard look in any security
//! review; they are preserved here exactly, tests and all.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, trace, warn};

use crate::catalog::PolicyCatalog;
use crate::principal::{AttributeMap, Principal};
use crate::scope::OPENID_SCOPE;
use crate::service::{AccessGrant, RegisteredService, RequestContext, ServiceRef};

/// Generic, scope-unaware attribute scrubbing applied before scope
/// filtering. External collaborator; implementations must not block.
#[async_trait]
pub trait BaselineFilter: Send + Sync {
    /// Produce the baseline principal the scope filter starts from.
    async fn filter(
        &self,
        service: &ServiceRef,
        principal: &Principal,
        registration: &RegisteredService,
        context: &RequestContext,
        grant: &AccessGrant,
    ) -> Principal;
}

/// Baseline filter that releases the principal untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughBaseline;

#[async_trait]
impl BaselineFilter for PassthroughBaseline {
    async fn filter(
        &self,
        _service: &ServiceRef,
        principal: &Principal,
        _registration: &RegisteredService,
        _context: &RequestContext,
        _grant: &AccessGrant,
    ) -> Principal {
        principal.clone()
    }
}

/// The per-request attribute release engine.
///
/// Stateless apart from its two shared, read-only collaborators; safe to
/// call concurrently from any number of tasks.
pub struct ScopeClaimsFilter {
    baseline: Arc<dyn BaselineFilter>,
    catalog: Arc<PolicyCatalog>,
}

impl ScopeClaimsFilter {
    /// Create a filter over a baseline scrubber and a policy catalog.
    pub fn new(baseline: Arc<dyn BaselineFilter>, catalog: Arc<PolicyCatalog>) -> Self {
        Self { baseline, catalog }
    }

    /// Decide which attributes may be released for this request.
    ///
    /// Never fails: every anomalous input degrades to either "release the
    /// baseline principal as-is" or "release whatever the matched policies
    /// produced". The input principal is never mutated.
    pub async fn filter(
        &self,
        service: &ServiceRef,
        principal: &Principal,
        registration: &RegisteredService,
        context: &RequestContext,
        grant: &AccessGrant,
    ) -> Principal {
        let base = self
            .baseline
            .filter(service, principal, registration, context, grant)
            .await;

        // Scope-based filtering only applies to OIDC registrations.
        if !registration.is_oidc() {
            return base;
        }

        let granted = grant.granted_scopes();
        if !granted.contains(OPENID_SCOPE) {
            warn!(
                request = %context.request_id,
                scopes = ?granted,
                "granted scopes do not include the required 'openid' scope; \
                 releasing the authenticated principal as-is"
            );
            return base;
        }

        // Intersection in granted order, duplicates already removed.
        let effective: Vec<&String> = granted
            .iter()
            .filter(|scope| registration.declares_scope(scope))
            .collect();

        let attributes = self.release_by_scope(&effective, &base, service, registration);
        debug!(
            request = %context.request_id,
            service = %registration.id,
            scopes = ?effective,
            released = attributes.len(),
            "scope filtering complete"
        );
        Principal::new(base.id(), attributes)
    }

    /// Merge the catalog policies of the effective scopes, last write wins
    /// per attribute name.
    fn release_by_scope(
        &self,
        effective: &[&String],
        base: &Principal,
        service: &ServiceRef,
        registration: &RegisteredService,
    ) -> AttributeMap {
        if effective.is_empty() {
            trace!(
                service = %registration.id,
                "no effective scopes; authorizing the full resolved attribute collection"
            );
            return base.attributes().clone();
        }

        let mut released = AttributeMap::new();
        for scope in effective {
            let Some(policy) = self.catalog.policy(scope) else {
                trace!(scope = %scope, "no release policy registered for scope");
                continue;
            };
            released.extend(policy.compute_attributes(base, service, registration));
        }
        released
    }
}

// ============================================================================
// Tests
// ============================================================================
