//! Cache Entry Module
//!
//! Defines the slot stored in the cache arena for each key.

// == Cache Entry ==
/// A single cached pipeline state together with its key.
///
/// Entries live in a fixed-capacity arena and are addressed by slot index.
/// The value is opaque to the cache: it is never inspected or mutated, only
/// replaced wholesale by a later insert on the same key.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// Caller-provided fingerprint
    pub key: String,
    /// The stored value
    pub value: V,
    /// Touch sequence number of the most recent insert or hit
    pub last_touch: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry touched at `tick`.
    pub fn new(key: String, value: V, tick: u64) -> Self {
        Self {
            key,
            value,
            last_touch: tick,
        }
    }

    // == Touch ==
    /// Records a touch at `tick`.
    ///
    /// Ticks come from a strictly increasing counter owned by the store, so a
    /// later touch always carries a larger number.
    pub fn touch(&mut self, tick: u64) {
        debug_assert!(tick > self.last_touch, "touch sequence must advance");
        self.last_touch = tick;
    }

    // == Replace Value ==
    /// Swaps in a new value and returns the old one.
    pub fn replace_value(&mut self, value: V, tick: u64) -> V {
        self.touch(tick);
        std::mem::replace(&mut self.value, value)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new("fingerprint".to_string(), 42, 1);

        assert_eq!(entry.key, "fingerprint");
        assert_eq!(entry.value, 42);
        assert_eq!(entry.last_touch, 1);
    }

    #[test]
    fn test_entry_touch_advances() {
        let mut entry = CacheEntry::new("k".to_string(), (), 1);
        entry.touch(5);
        assert_eq!(entry.last_touch, 5);
    }

    #[test]
    fn test_entry_replace_value() {
        let mut entry = CacheEntry::new("k".to_string(), "old", 1);

        let previous = entry.replace_value("new", 2);

        assert_eq!(previous, "old");
        assert_eq!(entry.value, "new");
        assert_eq!(entry.last_touch, 2);
        // key is untouched by a value swap
        assert_eq!(entry.key, "k");
    }
}
