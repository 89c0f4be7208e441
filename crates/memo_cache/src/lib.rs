use dashmap::DashMap;
use std::sync::{Arc, OnceLock};
use toc_path::FilePath;

/// A `FilePath`-keyed cache that computes each entry at most once, even under
/// concurrent contention (§4.6).
///
/// Implementation note: a naive `DashMap::entry(..).or_insert_with(factory)`
/// would hold the map's shard lock for the duration of `factory`, which
/// deadlocks if `factory` recursively touches another key hashing to the
/// same shard. Instead we only hold the shard lock long enough to fetch or
/// install an `Arc<OnceLock<V>>` cell, then release it before running
/// `factory` via `OnceLock::get_or_init` — recursive cache calls from inside
/// `factory` are then safe.
pub struct MemoCache<V: Clone> {
    entries: DashMap<FilePath, Arc<OnceLock<V>>>,
}

impl<V: Clone> MemoCache<V> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Returns the cached value for `key`, computing it via `factory` if this
    /// is the first request for `key`. Concurrent first-requesters for the
    /// same key block on the same computation rather than each running
    /// `factory` themselves.
    pub fn get_or_compute(&self, key: FilePath, factory: impl FnOnce() -> V) -> V {
        let cell = self
            .entries
            .entry(key)
            .or_insert_with(|| Arc::new(OnceLock::new()))
            .clone();
        cell.get_or_init(factory).clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Clone> Default for MemoCache<V> {
    fn default() -> Self {
        Self::new()
    }
}
