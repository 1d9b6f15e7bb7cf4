//! Owned catalog snapshot cache.
//!
//! Holds at most one [`CatalogSnapshot`]. Callers share the cache by cloning
//! the handle; a fetch commits its snapshot only after it fully succeeded.

use super::model::CatalogSnapshot;
use chrono::{DateTime, Duration, Utc};
use std::sync::{Arc, RwLock};

/// Thread-safe, cloneable handle to the most recent catalog snapshot.
#[derive(Clone, Default)]
pub struct CatalogCache {
    slot: Arc<RwLock<Option<Arc<CatalogSnapshot>>>>,
    /// Snapshots older than this are reported as stale. `None` never expires.
    max_age: Option<Duration>,
}

impl CatalogCache {
    /// Creates an empty cache whose snapshots never go stale.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty cache with a freshness window.
    pub fn with_max_age(max_age: Duration) -> Self {
        Self {
            slot: Arc::default(),
            max_age: Some(max_age),
        }
    }

    /// Replaces the current snapshot. Last write wins.
    pub fn commit(&self, snapshot: CatalogSnapshot) -> Arc<CatalogSnapshot> {
        let snapshot = Arc::new(snapshot);
        // A poisoned lock only means a writer panicked mid-assignment; the
        // slot itself is always a complete value.
        let mut slot = self.slot.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(Arc::clone(&snapshot));
        tracing::debug!(goods = snapshot.len(), "Committed catalog snapshot");
        snapshot
    }

    /// Returns the current snapshot, if any fetch has succeeded yet.
    pub fn current(&self) -> Option<Arc<CatalogSnapshot>> {
        self.slot
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .map(Arc::clone)
    }

    /// Drops the current snapshot.
    pub fn invalidate(&self) {
        let mut slot = self.slot.write().unwrap_or_else(|e| e.into_inner());
        *slot = None;
    }

    /// Whether a snapshot is present and younger than `max_age` at `now`.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        match (self.current(), self.max_age) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(snapshot), Some(max_age)) => now - snapshot.fetched_at <= max_age,
        }
    }
}

impl std::fmt::Debug for CatalogCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogCache")
            .field("goods", &self.current().map(|s| s.len()))
            .field("max_age", &self.max_age)
            .finish()
    }
}
