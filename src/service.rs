//! Registered service records and per-request value types.
//!
//! A [`RegisteredService`] is the persisted registration of a relying
//! party: its declared scopes, its refresh-token flag, and the release
//! policy reconciliation has assigned to it. Service kind is an explicit
//! tag — callers ask [`RegisteredService::is_oidc`] instead of downcasting.

use serde::{Deserialize, Serialize};
use indexmap::IndexSet;
use uuid::Uuid;

use crate::policy::ReleasePolicy;

/// Kind of a registered service. Scope-driven claim release only applies
/// to [`ServiceKind::Oidc`] registrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    /// OpenID Connect relying party.
    Oidc,
    /// Plain OAuth 2.0 client, no claim release semantics.
    Oauth,
}

/// A registered relying party.
///
/// Mutated only by the reconciler; persisted through a
/// [`ServiceRegistry`](crate::registry::ServiceRegistry). The `PartialEq`
/// derive is the identity contract the registry uses to decide whether a
/// reconciled record actually changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredService {
    /// Registry identifier.
    pub id: String,
    /// Human-readable service name.
    pub name: String,
    /// Service kind tag.
    pub kind: ServiceKind,
    /// Declared scopes, iterated in declaration order.
    #[serde(default)]
    pub scopes: Vec<String>,
    /// Whether access-token grants for this service also issue refresh
    /// tokens. Set by reconciliation when `offline_access` is declared.
    #[serde(default)]
    pub generate_refresh_token: bool,
    /// The release policy assigned by the last reconciliation, if any.
    #[serde(default)]
    pub release_policy: Option<ReleasePolicy>,
}

impl RegisteredService {
    /// Create an OIDC registration with no declared scopes.
    pub fn oidc(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, ServiceKind::Oidc)
    }

    /// Create a plain OAuth registration.
    pub fn oauth(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, ServiceKind::Oauth)
    }

    fn new(id: impl Into<String>, name: impl Into<String>, kind: ServiceKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            scopes: Vec::new(),
            generate_refresh_token: false,
            release_policy: None,
        }
    }

    /// Replace the declared scope list, preserving the given order.
    #[must_use]
    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    /// Whether scope-driven claim release applies to this service.
    #[must_use]
    pub fn is_oidc(&self) -> bool {
        self.kind == ServiceKind::Oidc
    }

    /// Whether the service declares the given scope, compared literally.
    #[must_use]
    pub fn declares_scope(&self, scope: &str) -> bool {
        self.scopes.iter().any(|s| s == scope)
    }
}

/// The scopes actually granted to one access token for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessGrant {
    /// Opaque token identifier.
    pub token_id: String,
    /// Granted scopes in presentation order; duplicates are tolerated.
    pub scopes: Vec<String>,
}

impl AccessGrant {
    /// Create a grant from a token id and its scope list.
    pub fn new<I, S>(token_id: impl Into<String>, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            token_id: token_id.into(),
            scopes: scopes.into_iter().map(Into::into).collect(),
        }
    }

    /// Deduplicated granted scopes, preserving first-presentation order.
    #[must_use]
    pub fn granted_scopes(&self) -> IndexSet<String> {
        self.scopes.iter().cloned().collect()
    }
}

/// Opaque per-request context handed through to the baseline filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Correlates log lines for a single authorization request.
    pub request_id: Uuid,
}

impl RequestContext {
    /// Create a context with a fresh request id.
    #[must_use]
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4(),
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// The requesting party of a filter invocation (the callback service the
/// authorization request named), reduced to its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRef {
    /// Requesting service identifier, typically its redirect URL.
    pub id: String,
}

impl ServiceRef {
    /// Create a reference from a service identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

// ============================================================================
// Tests
// ============================================================================
