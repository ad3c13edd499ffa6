//! FIFO (First In, First Out) cache replacement policy.
//!
//! Evicts the entry that has been resident longest, regardless of how often
//! it has been read. Reads never reorder entries.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                        FifoCache<K, V> Layout                               │
//! │                                                                             │
//! │   map: FxHashMap<K, V>            order: VecDeque<K>                        │
//! │        key → value                       insertion queue                    │
//! │                                                                             │
//! │   ┌──────────┬──────┐             ┌─────────────────────────┐               │
//! │   │  k1      │  v1  │             │ Front           Back    │               │
//! │   │  k2      │  v2  │             │ [k1] [k2] [k3] [k4]     │               │
//! │   │  k3      │  v3  │             │  ↑               ↑      │               │
//! │   │  k4      │  v4  │             │ EVICT          newest   │               │
//! │   └──────────┴──────┘             └─────────────────────────┘               │
//! └─────────────────────────────────────────────────────────────────────────────┘
//!
//! Insert Flow (new key)
//! ──────────────────────
//!
//!   insert_evicting(key, value):
//!     1. Check map - not found
//!     2. Push key to back of queue, insert into map
//!     3. If len > capacity: pop exactly one key from front, remove from map
//!
//! Insert Flow (existing key)
//! ──────────────────────────
//!
//!   Replace the value in place. Queue position is unchanged.
//! ```
//!
//! Eviction happens after insertion, so an insert that overflows the cache
//! removes exactly one entry and the cache is never more than one entry
//! over capacity, even transiently.
//!
//! ## Operations
//!
//! | Operation     | Time   | Notes                                  |
//! |---------------|--------|----------------------------------------|
//! | `get`         | O(1)   | HashMap lookup, no reordering          |
//! | `insert`      | O(1)   | May evict the oldest entry             |
//! | `pop_oldest`  | O(1)   | Front of queue                         |
//! | `clear`       | O(n)   | Clears both structures                 |
//!
//! ## Thread Safety
//!
//! Not thread-safe. Wrap in external synchronization for shared use.
//!
//! ## Example
//!
//! ```
//! use memokit::policy::fifo::FifoCache;
//! use memokit::traits::{CoreCache, ReadOnlyCache};
//!
//! let mut cache = FifoCache::new(2);
//! cache.insert(1, "one");
//! cache.insert(2, "two");
//!
//! // Reading key 1 does not protect it from eviction
//! assert_eq!(cache.get(&1), Some(&"one"));
//! cache.insert(3, "three");
//!
//! assert!(!cache.contains(&1));
//! assert!(cache.contains(&2));
//! assert!(cache.contains(&3));
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::error::InvariantError;
use crate::traits::{CoreCache, FifoCacheTrait, ReadOnlyCache};

/// Bounded map that evicts in insertion order.
///
/// # Type Parameters
///
/// - `K`: Key type, must be `Clone + Eq + Hash`
/// - `V`: Value type
///
/// A capacity of `0` rejects every insertion.
pub struct FifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Maps key to value
    map: FxHashMap<K, V>,
    /// Keys in insertion order (front = oldest)
    order: VecDeque<K>,
    /// Maximum cache capacity
    capacity: usize,
}

impl<K, V> FifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates a new FIFO cache with the specified capacity.
    ///
    /// ```
    /// use memokit::policy::fifo::FifoCache;
    /// use memokit::traits::ReadOnlyCache;
    ///
    /// let cache: FifoCache<String, i32> = FifoCache::new(100);
    /// assert_eq!(cache.capacity(), 100);
    /// assert!(cache.is_empty());
    /// ```
    #[inline]
    pub fn new(capacity: usize) -> Self {
        Self::with_prealloc(capacity, true)
    }

    /// Creates a cache, optionally reserving room for `capacity` entries
    /// up front.
    pub fn with_prealloc(capacity: usize, prealloc: bool) -> Self {
        // One extra slot: the queue holds capacity + 1 keys just before eviction.
        let reserve = if prealloc { capacity.saturating_add(1) } else { 0 };
        Self {
            map: FxHashMap::with_capacity_and_hasher(reserve, Default::default()),
            order: VecDeque::with_capacity(reserve),
            capacity,
        }
    }

    /// Retrieves a value by key without affecting eviction order.
    #[inline]
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.map.get(key)
    }

    /// Inserts or updates a key-value pair, returning the evicted entry.
    ///
    /// - Existing key: value replaced in place, queue position kept.
    /// - New key: appended at the back; if the cache now exceeds its
    ///   capacity, the single oldest entry is removed and returned.
    ///
    /// ```
    /// use memokit::policy::fifo::FifoCache;
    ///
    /// let mut cache = FifoCache::new(1);
    /// assert_eq!(cache.insert_evicting("a", 1), None);
    /// assert_eq!(cache.insert_evicting("b", 2), Some(("a", 1)));
    /// ```
    pub fn insert_evicting(&mut self, key: K, value: V) -> Option<(K, V)> {
        if self.capacity == 0 {
            return None;
        }

        if let Some(slot) = self.map.get_mut(&key) {
            *slot = value;
            return None;
        }

        self.order.push_back(key.clone());
        self.map.insert(key, value);

        let evicted = if self.map.len() > self.capacity {
            self.pop_oldest()
        } else {
            None
        };

        #[cfg(debug_assertions)]
        self.validate_invariants();

        evicted
    }

    fn pop_front_entry(&mut self) -> Option<(K, V)> {
        let key = self.order.pop_front()?;
        let value = self.map.remove(&key)?;
        Some((key, value))
    }

    /// Iterates keys from oldest to newest.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.order.iter()
    }

    /// Iterates entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.order
            .iter()
            .filter_map(move |k| self.map.get(k).map(|v| (k, v)))
    }

    /// Checks the map/queue invariants.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantError`] describing the first violated invariant.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.map.len() != self.order.len() {
            return Err(InvariantError::new(format!(
                "map has {} entries but order queue has {}",
                self.map.len(),
                self.order.len()
            )));
        }
        if self.map.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.map.len(),
                self.capacity
            )));
        }
        let mut seen = rustc_hash::FxHashSet::default();
        for key in &self.order {
            if !self.map.contains_key(key) {
                return Err(InvariantError::new("queued key missing from map"));
            }
            if !seen.insert(key) {
                return Err(InvariantError::new("duplicate key in order queue"));
            }
        }
        Ok(())
    }

    #[cfg(debug_assertions)]
    fn validate_invariants(&self) {
        let result = self.check_invariants();
        debug_assert!(result.is_ok(), "FifoCache invariant violated: {result:?}");
    }
}

impl<K, V> fmt::Debug for FifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FifoCache")
            .field("capacity", &self.capacity)
            .field("len", &self.map.len())
            .finish_non_exhaustive()
    }
}

impl<K, V> ReadOnlyCache<K, V> for FifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<K, V> CoreCache<K, V> for FifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    #[inline]
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(v) = self.map.get_mut(&key) {
            return Some(std::mem::replace(v, value));
        }
        self.insert_evicting(key, value);
        None
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        self.map.get(key)
    }

    fn clear(&mut self) {
        self.map.clear();
        self.order.clear();
    }
}

impl<K, V> FifoCacheTrait<K, V> for FifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn pop_oldest(&mut self) -> Option<(K, V)> {
        self.pop_front_entry()
    }

    fn peek_oldest(&self) -> Option<(&K, &V)> {
        let key = self.order.front()?;
        self.map.get(key).map(|v| (key, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==============================================
    // Basic Behavior
    // ==============================================

    mod basic_behavior {
        use super::*;

        #[test]
        fn insert_and_get() {
            let mut cache = FifoCache::new(3);
            assert_eq!(cache.insert("a", 1), None);
            assert_eq!(cache.get(&"a"), Some(&1));
            assert_eq!(cache.len(), 1);
        }

        #[test]
        fn update_returns_previous_value() {
            let mut cache = FifoCache::new(3);
            cache.insert("a", 1);
            assert_eq!(cache.insert("a", 2), Some(1));
            assert_eq!(cache.peek(&"a"), Some(&2));
            assert_eq!(cache.len(), 1);
        }

        #[test]
        fn keys_iterate_oldest_first() {
            let mut cache = FifoCache::new(5);
            for k in [3, 1, 2] {
                cache.insert(k, k * 10);
            }
            assert_eq!(cache.keys().copied().collect::<Vec<_>>(), vec![3, 1, 2]);
            assert_eq!(
                cache.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>(),
                vec![(3, 30), (1, 10), (2, 20)]
            );
        }
    }

    // ==============================================
    // Eviction
    // ==============================================

    mod eviction {
        use super::*;

        #[test]
        fn overflow_evicts_exactly_the_oldest() {
            let mut cache = FifoCache::new(2);
            assert_eq!(cache.insert_evicting(1, "a"), None);
            assert_eq!(cache.insert_evicting(2, "b"), None);
            assert_eq!(cache.insert_evicting(3, "c"), Some((1, "a")));
            assert_eq!(cache.len(), 2);
            assert_eq!(cache.keys().copied().collect::<Vec<_>>(), vec![2, 3]);
        }

        #[test]
        fn reads_do_not_bump_position() {
            let mut cache = FifoCache::new(2);
            cache.insert(1, 10);
            cache.insert(2, 20);
            for _ in 0..10 {
                cache.get(&1);
            }
            cache.insert(3, 30);
            assert!(!cache.contains(&1), "oldest insert evicted despite reads");
            assert!(cache.contains(&2));
            assert!(cache.contains(&3));
        }

        #[test]
        fn update_preserves_queue_position() {
            let mut cache = FifoCache::new(2);
            cache.insert(1, 10);
            cache.insert(2, 20);
            cache.insert(1, 100);
            cache.insert(3, 30);
            assert!(!cache.contains(&1));
            assert_eq!(cache.peek_oldest(), Some((&2, &20)));
        }

        #[test]
        fn zero_capacity_rejects_inserts() {
            let mut cache = FifoCache::new(0);
            assert_eq!(cache.insert_evicting("a", 1), None);
            assert!(cache.is_empty());
        }
    }

    // ==============================================
    // FIFO Trait
    // ==============================================

    mod fifo_trait {
        use super::*;

        #[test]
        fn pop_and_peek_oldest() {
            let mut cache = FifoCache::new(3);
            cache.insert(1, "first");
            cache.insert(2, "second");
            assert_eq!(cache.peek_oldest(), Some((&1, &"first")));
            assert_eq!(cache.pop_oldest(), Some((1, "first")));
            assert_eq!(cache.pop_oldest(), Some((2, "second")));
            assert_eq!(cache.pop_oldest(), None);
        }

        #[test]
        fn overflow_evicts_the_entry_peek_oldest_reported() {
            let mut cache = FifoCache::new(2);
            cache.insert('a', 1);
            cache.insert('b', 2);
            let oldest = cache.peek_oldest().map(|(k, v)| (*k, *v));
            assert_eq!(cache.insert_evicting('c', 3), oldest);
            assert_eq!(cache.peek_oldest(), Some((&'b', &2)));
        }

        #[test]
        fn clear_empties_both_structures() {
            let mut cache = FifoCache::new(3);
            cache.insert(1, 1);
            cache.insert(2, 2);
            cache.clear();
            assert!(cache.is_empty());
            assert_eq!(cache.keys().count(), 0);
            assert!(cache.check_invariants().is_ok());
        }
    }

    // ==============================================
    // Property Tests
    // ==============================================

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_len_never_exceeds_capacity(
                capacity in 1usize..20,
                keys in prop::collection::vec(0u32..40, 0..200)
            ) {
                let mut cache = FifoCache::new(capacity);
                for k in keys {
                    cache.insert(k, k);
                    prop_assert!(cache.len() <= capacity);
                    prop_assert!(cache.check_invariants().is_ok());
                }
            }

            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_matches_reference_queue(
                capacity in 1usize..10,
                keys in prop::collection::vec(0u32..20, 0..100)
            ) {
                let mut cache = FifoCache::new(capacity);
                let mut model: VecDeque<u32> = VecDeque::new();
                for k in keys {
                    cache.insert(k, ());
                    if !model.contains(&k) {
                        model.push_back(k);
                        if model.len() > capacity {
                            model.pop_front();
                        }
                    }
                }
                prop_assert_eq!(cache.keys().copied().collect::<Vec<_>>(), Vec::from(model));
            }
        }
    }
}
