//! In-flight request sharing.
//!
//! Identical concurrent GETs share one underlying call. This is
//! deduplication of concurrency, not a result cache: an entry only lives
//! while its call is in flight, and a call made after it settles always
//! goes back to the network.

use futures::future::{BoxFuture, FutureExt, Shared, WeakShared};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use strata_domain::{ApiError, DedupKey};

type CallFuture = BoxFuture<'static, Result<Value, ApiError>>;

/// A pending result every sharer of a key awaits.
pub type SharedCall = Shared<CallFuture>;

/// The registry only holds a weak handle: waiters keep a call alive, and
/// once the last one is dropped the call is dropped with it.
struct PendingEntry {
    id: u64,
    call: WeakShared<CallFuture>,
}

type PendingMap = Arc<Mutex<HashMap<DedupKey, PendingEntry>>>;

/// Registry of in-flight calls keyed by [`DedupKey`].
///
/// Cloning shares the registry. The lock is only held while looking up or
/// mutating the map, never across an await.
#[derive(Clone, Default)]
pub struct RequestDeduplicator {
    pending: PendingMap,
    next_id: Arc<AtomicU64>,
}

/// Whether a call was started or joined.
pub enum Registration {
    /// No call was in flight; `make` ran and its call was registered.
    Started(SharedCall),
    /// An identical call was already in flight.
    Joined(SharedCall),
}

impl Registration {
    pub fn is_joined(&self) -> bool {
        matches!(self, Registration::Joined(_))
    }

    pub fn into_call(self) -> SharedCall {
        match self {
            Registration::Started(call) | Registration::Joined(call) => call,
        }
    }
}

impl RequestDeduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Join the call in flight for `key`, or register the one `make` builds.
    ///
    /// `make` receives the entry's [`PendingGuard`] and must move it into the
    /// future so the entry is released when the future settles or is
    /// dropped.
    pub fn join_or_register<F>(&self, key: DedupKey, make: F) -> Registration
    where
        F: FnOnce(PendingGuard) -> BoxFuture<'static, Result<Value, ApiError>>,
    {
        let mut pending = lock(&self.pending);
        // An entry that no longer upgrades is being torn down by its guard,
        // which will see a different id and leave our replacement alone.
        if let Some(call) = pending.get(&key).and_then(|entry| entry.call.upgrade()) {
            return Registration::Joined(call);
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let guard = PendingGuard {
            pending: Arc::clone(&self.pending),
            key: key.clone(),
            id,
        };
        let call = make(guard).shared();
        if let Some(weak) = call.downgrade() {
            pending.insert(key, PendingEntry { id, call: weak });
        }
        Registration::Started(call)
    }

    /// Number of calls currently in flight.
    pub fn in_flight(&self) -> usize {
        lock(&self.pending).len()
    }

    pub fn is_pending(&self, key: &DedupKey) -> bool {
        lock(&self.pending).contains_key(key)
    }
}

/// Releases a pending entry when dropped.
///
/// Only removes the entry it registered, so a stale guard can never evict a
/// newer call for the same key.
pub struct PendingGuard {
    pending: PendingMap,
    key: DedupKey,
    id: u64,
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        let mut pending = lock(&self.pending);
        if pending.get(&self.key).is_some_and(|entry| entry.id == self.id) {
            pending.remove(&self.key);
        }
    }
}

fn lock(pending: &PendingMap) -> MutexGuard<'_, HashMap<DedupKey, PendingEntry>> {
    // The map holds no invariants a panicking holder could break.
    pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
