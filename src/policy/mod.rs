//! Attribute release policies.
//!
//! A [`ReleasePolicy`] is a pure function from (principal, requesting
//! service, registration) to the subset of attributes that may leave the
//! system. The variants form a closed union: the four standard claim
//! policies, user-defined custom policies, an ordered chaining composite,
//! and a deny-all terminal. Being plain data, policies compare with `==`
//! and serialise onto the service record for persistence.
//!
//! # Merge model
//!
//! [`ReleasePolicy::Chain`] evaluates its sub-policies **in order** and
//! merges their outputs with last-write-wins per attribute name — the same
//! rule the per-request filter applies across scopes.

mod custom;
pub mod standard;

pub use custom::CustomScopePolicy;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::principal::{AttributeMap, Principal};
use crate::service::{RegisteredService, ServiceRef};
use standard::{
    release_allowed, ADDRESS_CLAIMS, EMAIL_CLAIMS, PHONE_CLAIMS, PROFILE_CLAIMS,
};

/// A policy deciding which attributes are disclosed for a principal and
/// service pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReleasePolicy {
    /// Standard `profile` scope claim set.
    Profile,
    /// Standard `email` scope claim set.
    Email,
    /// Standard `address` scope claim set.
    Address,
    /// Standard `phone` scope claim set.
    Phone,
    /// User-defined scope with an explicit claim allow-list.
    Custom(CustomScopePolicy),
    /// Ordered composite; sub-policy outputs merge last-write-wins.
    Chain {
        /// Sub-policies, evaluated in order.
        policies: Vec<ReleasePolicy>,
    },
    /// Terminal policy releasing no attributes at all.
    DenyAll,
}

impl ReleasePolicy {
    /// Convenience constructor for a [`ReleasePolicy::Chain`].
    #[must_use]
    pub fn chain(policies: Vec<ReleasePolicy>) -> Self {
        Self::Chain { policies }
    }

    /// Compute the attributes this policy releases for `principal`.
    ///
    /// Pure and side-effect free; safe to call concurrently.
    #[must_use]
    pub fn compute_attributes(
        &self,
        principal: &Principal,
        service: &ServiceRef,
        registration: &RegisteredService,
    ) -> AttributeMap {
        match self {
            Self::Profile => release_allowed(PROFILE_CLAIMS, principal),
            Self::Email => release_allowed(EMAIL_CLAIMS, principal),
            Self::Address => release_allowed(ADDRESS_CLAIMS, principal),
            Self::Phone => release_allowed(PHONE_CLAIMS, principal),
            Self::Custom(custom) => custom.release(principal),
            Self::Chain { policies } => {
                let mut merged = AttributeMap::new();
                for policy in policies {
                    let released = policy.compute_attributes(principal, service, registration);
                    trace!(
                        service = %registration.id,
                        requested_by = %service.id,
                        released = released.len(),
                        "merging chained policy output"
                    );
                    merged.extend(released);
                }
                merged
            }
            Self::DenyAll => AttributeMap::new(),
        }
    }

    /// Whether this policy can never release anything.
    #[must_use]
    pub fn is_deny_all(&self) -> bool {
        matches!(self, Self::DenyAll)
    }
}

// ============================================================================
// Tests
// ============================================================================
