//! OIDC Claim Release Engine
//!
//! The claim/attribute disclosure core of an OpenID Connect identity
//! provider: given an authenticated principal's full attribute set, a
//! requesting client's granted scopes, and a service's permitted scope
//! list, decide exactly which identity attributes may be released — and
//! keep each service's declared scopes reconciled into a persisted,
//! executable release policy.
//!
//! # Components
//!
//! - **Release policies** ([`policy`]): pure functions from (principal,
//!   service, requesting party) to a released attribute subset — the
//!   standard OIDC claim sets, user-defined custom scopes, an ordered
//!   chaining composite, and a deny-all terminal.
//! - **Policy catalog** ([`catalog`]): the immutable scope → policy map,
//!   built once at startup and read concurrently ever after.
//! - **Scope reconciler** ([`reconcile`]): turns a service's declared
//!   scopes into its assigned policy (or refresh-token flag) and persists
//!   the record only when it changed.
//! - **Attribute filter** ([`filter`]): the per-request engine that
//!   intersects granted and declared scopes and merges the matching
//!   policies' outputs.
//!
//! Token issuance, the OAuth/OIDC grant flows, transport, and account
//! stores are external collaborators, reduced here to the
//! [`filter::BaselineFilter`] and [`registry::ServiceRegistry`] seams.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod policy;
pub mod principal;
pub mod reconcile;
pub mod registry;
pub mod scope;
pub mod service;

pub use catalog::PolicyCatalog;
pub use config::{ClaimsConfig, CustomScopeConfig};
pub use error::{Error, Result};
pub use filter::{BaselineFilter, PassthroughBaseline, ScopeClaimsFilter};
pub use policy::{CustomScopePolicy, ReleasePolicy};
pub use principal::{AttributeMap, Principal};
pub use reconcile::ScopeReconciler;
pub use registry::{InMemoryServiceRegistry, ServiceRegistry};
pub use scope::{OPENID_SCOPE, StandardScope};
pub use service::{AccessGrant, RegisteredService, RequestContext, ServiceKind, ServiceRef};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Setup tracing/logging
pub fn setup_tracing(level: &str, format: Option<&str>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::registry().with(filter);

    match format {
        Some("json") => {
            subscriber.with(fmt::layer().json()).init();
        }
        _ => {
            subscriber.with(fmt::layer()).init();
        }
    }

    Ok(())
}
