//! Single-entry synchronization cache for the item collection.
//!
//! # Design
//! There is exactly one list view in scope, so the cache holds one snapshot
//! under one implicit key. It is an explicit object passed by reference to
//! whoever needs it, never ambient global state, which keeps it testable in
//! isolation.
//!
//! Fetches are generation-tagged: `begin_fetch` captures the generation a
//! fetch was started under, and `store` installs the result only if the
//! generation is unchanged. The generation advances exactly when a fresh
//! entry turns stale, so a snapshot from a fetch that saw fresh data since
//! invalidated is discarded, while a fetch begun against an already-stale
//! cache is installed even if further (no-op) invalidates arrive mid-flight.

use crate::types::ItemsSnapshot;

/// Cached item collection with explicit invalidation.
#[derive(Debug, Default)]
pub struct ItemCache {
    entry: Option<ItemsSnapshot>,
    stale: bool,
    generation: u64,
}

impl ItemCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached snapshot, or `None` when nothing is cached or the entry
    /// has been invalidated. A stale entry is never served, even transiently.
    pub fn get(&self) -> Option<&ItemsSnapshot> {
        if self.stale {
            return None;
        }
        self.entry.as_ref()
    }

    /// Mark the cached value stale. Idempotent: invalidating twice before
    /// any read is indistinguishable from invalidating once, because the
    /// generation only advances on the stale transition.
    pub fn invalidate(&mut self) {
        if !self.stale {
            self.stale = true;
            self.generation += 1;
        }
    }

    /// Capture the generation a fetch starts under. Pass the returned token
    /// to `store` once the fetch completes.
    pub fn begin_fetch(&self) -> u64 {
        self.generation
    }

    /// Install a fetched snapshot. Returns `false` (and drops the snapshot)
    /// when the generation advanced since the matching `begin_fetch`, which
    /// happens exactly when a fresh entry was invalidated in between. A fetch
    /// begun while the cache was already stale cannot be orphaned this way.
    pub fn store(&mut self, generation: u64, snapshot: ItemsSnapshot) -> bool {
        if generation != self.generation {
            return false;
        }
        self.entry = Some(snapshot);
        self.stale = false;
        true
    }
}
