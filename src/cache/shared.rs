//! Shared Cache Handle
//!
//! Thread-safe handle that lets concurrent compilation requests use one cache.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::cache::{CacheStats, RecencyCache};
use crate::error::Result;

// == Shared Cache ==
/// Cloneable handle to a single [`RecencyCache`].
///
/// Every operation holds the lock only for the store/order mutation itself.
/// Values are handed out as clones, so `V` is normally an `Arc` to the real
/// pipeline state and a hit shares it rather than copying it.
#[derive(Debug)]
pub struct SharedCache<V> {
    inner: Arc<Mutex<RecencyCache<V>>>,
}

impl<V> Clone for SharedCache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V: Clone> SharedCache<V> {
    // == Constructor ==
    /// Creates a handle to a new, empty cache.
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self::from_cache(RecencyCache::new(capacity)?))
    }

    /// Wraps an existing cache.
    pub fn from_cache(cache: RecencyCache<V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    // == Lookup ==
    /// Returns a clone of the cached value and marks it most recently used.
    pub fn lookup(&self, key: &str) -> Option<V> {
        self.lock().lookup(key).cloned()
    }

    // == Insert ==
    /// Stores `value` under `key`, evicting the least recently used entry if full.
    pub fn insert(&self, key: impl Into<String>, value: V) {
        self.lock().insert(key, value);
    }

    // == Lookup Or Insert ==
    /// Returns the cached value for `key`, building and inserting one on a miss.
    ///
    /// `build` runs with the lock released. Two callers racing on the same
    /// missing key may both build; the later insert wins and both get their
    /// own value back. The bool is true on a hit.
    pub fn lookup_or_insert_with<F>(&self, key: &str, build: F) -> (V, bool)
    where
        F: FnOnce() -> V,
    {
        if let Some(value) = self.lookup(key) {
            return (value, true);
        }

        let value = build();
        self.insert(key, value.clone());
        (value, false)
    }

    // == Inspection ==
    pub fn stats(&self) -> CacheStats {
        self.lock().stats()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.lock().capacity()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lock().contains(key)
    }

    /// Keys ordered from most to least recently used.
    pub fn recency_order(&self) -> Vec<String> {
        self.lock()
            .recency_order()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    // Panics under the lock come from caller code (a value's Clone or Drop),
    // which only runs while the store and order are consistent.
    fn lock(&self) -> MutexGuard<'_, RecencyCache<V>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
