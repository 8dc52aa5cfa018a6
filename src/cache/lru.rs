//! LRU Tracker Module
//!
//! Implements Least Recently Used tracking for cache eviction.

// == Slot Links ==
/// Sentinel for "no neighbour".
const NIL: usize = usize::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Link {
    prev: usize,
    next: usize,
    linked: bool,
}

impl Link {
    const DETACHED: Link = Link {
        prev: NIL,
        next: NIL,
        linked: false,
    };
}

// == LRU Tracker ==
/// Tracks access order for LRU eviction strategy.
///
/// Slots are arena indices owned by the store. They are kept in a doubly
/// linked list threaded through `links` by index, so every operation is O(1)
/// and no slot is ever referenced by pointer:
/// - Head = Most recently used
/// - Tail = Least recently used
#[derive(Debug, Clone)]
pub struct LruTracker {
    /// Neighbour indices, one per slot
    links: Vec<Link>,
    head: usize,
    tail: usize,
    len: usize,
}

impl Default for LruTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl LruTracker {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty tracker with room for `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            links: Vec::with_capacity(capacity),
            head: NIL,
            tail: NIL,
            len: 0,
        }
    }

    // == Touch ==
    /// Marks a slot as recently used (moves to head).
    ///
    /// If the slot is tracked, it is unlinked first then pushed to the head.
    /// If the slot is new, it is just pushed to the head.
    pub fn touch(&mut self, slot: usize) {
        if slot >= self.links.len() {
            self.links.resize(slot + 1, Link::DETACHED);
        }
        if self.head == slot {
            return;
        }
        self.unlink(slot);
        self.push_front(slot);
    }

    // == Remove ==
    /// Stops tracking a slot. Unknown slots are ignored.
    pub fn remove(&mut self, slot: usize) {
        if slot < self.links.len() {
            self.unlink(slot);
        }
    }

    // == Evict Oldest ==
    /// Returns and untracks the least recently used slot.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<usize> {
        let slot = self.peek_oldest()?;
        self.unlink(slot);
        Some(slot)
    }

    // == Peek ==
    /// Returns the least recently used slot without removing it.
    pub fn peek_oldest(&self) -> Option<usize> {
        (self.tail != NIL).then_some(self.tail)
    }

    /// Returns the most recently used slot.
    pub fn peek_newest(&self) -> Option<usize> {
        (self.head != NIL).then_some(self.head)
    }

    // == Length ==
    /// Returns the number of tracked slots.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Contains ==
    /// Checks if a slot is being tracked.
    pub fn contains(&self, slot: usize) -> bool {
        self.links.get(slot).is_some_and(|link| link.linked)
    }

    // == Iteration ==
    /// Iterates tracked slots from most to least recently used.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            links: &self.links,
            cursor: self.head,
        }
    }

    fn push_front(&mut self, slot: usize) {
        self.links[slot] = Link {
            prev: NIL,
            next: self.head,
            linked: true,
        };
        if self.head == NIL {
            self.tail = slot;
        } else {
            self.links[self.head].prev = slot;
        }
        self.head = slot;
        self.len += 1;
    }

    fn unlink(&mut self, slot: usize) {
        let link = self.links[slot];
        if !link.linked {
            return;
        }

        if link.prev == NIL {
            self.head = link.next;
        } else {
            self.links[link.prev].next = link.next;
        }

        if link.next == NIL {
            self.tail = link.prev;
        } else {
            self.links[link.next].prev = link.prev;
        }

        self.links[slot] = Link::DETACHED;
        self.len -= 1;
    }
}

// == Iterator ==
/// Head-to-tail iterator over tracked slots.
pub struct Iter<'a> {
    links: &'a [Link],
    cursor: usize,
}

impl Iterator for Iter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.cursor == NIL {
            return None;
        }
        let slot = self.cursor;
        self.cursor = self.links[slot].next;
        Some(slot)
    }
}
