//! Cache Store Module
//!
//! Bounded recency cache: a key index into a fixed-capacity slot arena, with
//! an index-linked LRU list deciding which slot is reused when the arena is full.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::cache::{CacheEntry, CacheStats, LruTracker};
use crate::error::{DriverError, Result};

// == Recency Cache ==
/// Bounded key/value cache with least-recently-used eviction.
///
/// Both a successful lookup and an insert count as a touch. A lookup that
/// misses changes nothing except the miss counter. Values are opaque; callers
/// that need shared ownership store `Arc<T>`.
#[derive(Debug)]
pub struct RecencyCache<V> {
    /// Key to arena slot
    index: HashMap<String, usize>,
    /// Entry arena, never longer than `capacity`
    slots: Vec<CacheEntry<V>>,
    /// LRU order over arena slots
    lru: LruTracker,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
    /// Last touch sequence number handed out
    clock: u64,
}

impl<V> RecencyCache<V> {
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// A capacity of zero could never hold an entry and is rejected.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(DriverError::InvalidCapacity(capacity));
        }

        Ok(Self {
            index: HashMap::with_capacity(capacity),
            slots: Vec::with_capacity(capacity),
            lru: LruTracker::with_capacity(capacity),
            stats: CacheStats::new(capacity),
            capacity,
            clock: 0,
        })
    }

    // == Lookup ==
    /// Returns the value cached under `key` and marks it most recently used.
    ///
    /// A miss leaves entries and recency order untouched.
    pub fn lookup(&mut self, key: &str) -> Option<&V> {
        let Some(&slot) = self.index.get(key) else {
            self.stats.record_miss();
            trace!(key, "cache miss");
            return None;
        };

        let tick = self.tick();
        self.lru.touch(slot);
        self.stats.record_hit();
        trace!(key, slot, "cache hit");

        let entry = &mut self.slots[slot];
        entry.touch(tick);
        Some(&entry.value)
    }

    // == Insert ==
    /// Stores `value` under `key` as the most recently used entry.
    ///
    /// An existing key has its value replaced in place. A new key at full
    /// capacity first discards the least recently used entry and takes over
    /// its slot.
    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        let tick = self.tick();

        if let Some(&slot) = self.index.get(&key) {
            let _previous = self.slots[slot].replace_value(value, tick);
            self.lru.touch(slot);
            self.stats.record_replacement();
            return;
        }

        let entry = CacheEntry::new(key.clone(), value, tick);
        let (slot, evicted) = match self.reclaim_slot() {
            Some(slot) => {
                let evicted = std::mem::replace(&mut self.slots[slot], entry);
                self.index.remove(&evicted.key);
                self.stats.record_eviction();
                (slot, Some(evicted))
            }
            None => {
                self.slots.push(entry);
                (self.slots.len() - 1, None)
            }
        };

        self.index.insert(key, slot);
        self.lru.touch(slot);
        self.stats.record_insert();
        self.stats.set_total_entries(self.slots.len());

        debug_assert!(self.slots.len() <= self.capacity);
        debug_assert_eq!(self.index.len(), self.lru.len());

        // Displaced values are dropped only once index and order agree again.
        if let Some(evicted) = evicted {
            debug!(
                evicted = %evicted.key,
                inserted = %self.slots[slot].key,
                "evicted least recently used entry"
            );
        }
    }

    // == Inspection ==
    /// Returns the value under `key` without touching it or counting a lookup.
    pub fn peek(&self, key: &str) -> Option<&V> {
        self.index.get(key).map(|&slot| &self.slots[slot].value)
    }

    /// Checks presence without touching the entry.
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Keys ordered from most to least recently used.
    pub fn recency_order(&self) -> Vec<&str> {
        self.entries().map(|entry| entry.key.as_str()).collect()
    }

    /// Entries ordered from most to least recently used.
    pub fn entries(&self) -> impl Iterator<Item = &CacheEntry<V>> + '_ {
        self.lru.iter().map(move |slot| &self.slots[slot])
    }

    /// The key that the next overflowing insert would evict.
    pub fn least_recent(&self) -> Option<&str> {
        self.lru
            .peek_oldest()
            .map(|slot| self.slots[slot].key.as_str())
    }

    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.slots.len());
        stats
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The slot to overwrite, or None while the arena still has room.
    fn reclaim_slot(&mut self) -> Option<usize> {
        if self.slots.len() < self.capacity {
            return None;
        }
        self.lru.evict_oldest()
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }
}
