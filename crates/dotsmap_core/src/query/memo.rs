//! Keyed get-or-compute cache for derived queries.
//!
//! # Invariants
//! - Entries are never evicted or invalidated; the source data is immutable.
//! - Concurrent misses on one key may compute twice, but only the first
//!   stored value is ever returned.

use log::debug;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// Unbounded memo cache keyed by normalized string.
#[derive(Debug)]
pub struct MemoCache<V> {
    name: &'static str,
    entries: RwLock<HashMap<String, Arc<V>>>,
    computations: AtomicUsize,
}

impl<V> MemoCache<V> {
    /// Creates an empty cache. `name` is used only in diagnostics.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: RwLock::new(HashMap::new()),
            computations: AtomicUsize::new(0),
        }
    }

    /// Returns the cached value for `key`, computing it on first access.
    ///
    /// The key must already be normalized by the caller.
    pub fn get_or_compute<F>(&self, key: &str, compute: F) -> Arc<V>
    where
        F: FnOnce() -> V,
    {
        {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(value) = entries.get(key) {
                return Arc::clone(value);
            }
        }

        let computed = Arc::new(compute());
        self.computations.fetch_add(1, Ordering::Relaxed);
        debug!(
            "event=memo_miss module=query cache={} key_len={}",
            self.name,
            key.len()
        );

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(entries.entry(key.to_string()).or_insert(computed))
    }

    /// Number of times a value was computed since construction.
    pub fn computations(&self) -> usize {
        self.computations.load(Ordering::Relaxed)
    }

    /// Number of distinct cached keys.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
