//! Service registry contract and in-memory reference implementation.
//!
//! Persistence mechanics are out of scope for the release engine; the
//! reconciler only needs a save/compare contract. The "did anything
//! change" decision lives here, in the storage layer: callers hand over a
//! before/after snapshot pair and the registry decides whether to write.
//! Concurrency discipline for same-service writers (optimistic versioning,
//! single-writer) is likewise the implementation's responsibility.

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::Result;
use crate::service::RegisteredService;

/// Persists registered services.
#[async_trait]
pub trait ServiceRegistry: Send + Sync {
    /// Look up a service by id.
    async fn find(&self, id: &str) -> Option<RegisteredService>;

    /// Persist `after` only when it differs from the `before` snapshot.
    ///
    /// Returns `true` when a write happened. Errors are fatal to the
    /// caller's reconciliation attempt.
    async fn save_if_changed(
        &self,
        before: &RegisteredService,
        after: &RegisteredService,
    ) -> Result<bool>;
}

/// In-memory registry backed by a concurrent map.
///
/// Keeps a journal of saved service ids so tests can observe exactly
/// which reconciliations resulted in a write.
#[derive(Debug, Default)]
pub struct InMemoryServiceRegistry {
    services: DashMap<String, RegisteredService>,
    journal: Mutex<Vec<String>>,
}

impl InMemoryServiceRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the registry with a service, bypassing the journal.
    pub fn insert(&self, service: RegisteredService) {
        self.services.insert(service.id.clone(), service);
    }

    /// Ids of services persisted through [`ServiceRegistry::save_if_changed`],
    /// in write order.
    #[must_use]
    pub fn save_log(&self) -> Vec<String> {
        self.journal.lock().clone()
    }
}

#[async_trait]
impl ServiceRegistry for InMemoryServiceRegistry {
    async fn find(&self, id: &str) -> Option<RegisteredService> {
        self.services.get(id).map(|entry| entry.clone())
    }

    async fn save_if_changed(
        &self,
        before: &RegisteredService,
        after: &RegisteredService,
    ) -> Result<bool> {
        if before == after {
            trace!(service = %after.id, "no changes detected, skipping write");
            return Ok(false);
        }

        self.services.insert(after.id.clone(), after.clone());
        self.journal.lock().push(after.id.clone());
        debug!(service = %after.id, "saved service into registry");
        Ok(true)
    }
}

// ============================================================================
// Tests
// ============================================================================
