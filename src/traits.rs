//! # Cache Trait Hierarchy
//!
//! Traits shared by the bounded caches in this crate.
//!
//! ```text
//!   ┌─────────────────────────────┐
//!   │   ReadOnlyCache<K, V>       │  contains / len / is_empty / capacity
//!   └──────────────┬──────────────┘
//!                  │
//!                  ▼
//!   ┌─────────────────────────────┐
//!   │   CoreCache<K, V>           │  insert / get / clear
//!   └──────────────┬──────────────┘
//!                  │
//!                  ▼
//!   ┌─────────────────────────────┐
//!   │   FifoCacheTrait<K, V>      │  pop_oldest / peek_oldest
//!   │   ⚠ No arbitrary removal!   │
//!   └─────────────────────────────┘
//! ```
//!
//! FIFO extends `CoreCache` directly and exposes no `remove(&K)`: removing
//! from the middle would break insertion-order tracking. Entries leave a
//! FIFO cache only by eviction, `pop_oldest`, or `clear`.
//!
//! `FifoCache` evicts through its own `pop_oldest`, and `peek_oldest` is
//! what `MemoCache::next_eviction` reports.
//!
//! ## Thread Safety
//!
//! Implementations are not thread-safe. Wrap them in a lock for shared
//! access (see `SyncMemoized` behind the `concurrency` feature).

/// Read-only inspection shared by every cache.
pub trait ReadOnlyCache<K, V> {
    /// Checks if a key exists without touching eviction state.
    fn contains(&self, key: &K) -> bool;

    /// Returns the current number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the cache contains no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum number of entries.
    fn capacity(&self) -> usize;
}

/// Core cache operations.
///
/// # Example
///
/// ```
/// use memokit::traits::{CoreCache, ReadOnlyCache};
/// use memokit::policy::fifo::FifoCache;
///
/// fn warm_cache<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
///     for (key, value) in data {
///         cache.insert(*key, value.clone());
///     }
/// }
///
/// let mut cache = FifoCache::new(100);
/// warm_cache(&mut cache, &[(1, "one".to_string()), (2, "two".to_string())]);
/// assert_eq!(cache.len(), 2);
/// ```
pub trait CoreCache<K, V>: ReadOnlyCache<K, V> {
    /// Inserts a key-value pair, returning the previous value if it existed.
    ///
    /// If the cache overflows, an entry is evicted according to the
    /// cache's policy.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Gets a reference to a value by key.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Removes all entries from the cache.
    fn clear(&mut self);
}

/// FIFO-specific operations that respect insertion order.
///
/// # Example
///
/// ```
/// use memokit::traits::{CoreCache, FifoCacheTrait, ReadOnlyCache};
/// use memokit::policy::fifo::FifoCache;
///
/// let mut cache = FifoCache::new(3);
/// cache.insert(1, "first");
/// cache.insert(2, "second");
/// cache.insert(3, "third");
///
/// assert_eq!(cache.peek_oldest(), Some((&1, &"first")));
/// assert_eq!(cache.pop_oldest(), Some((1, "first")));
/// assert_eq!(cache.len(), 2);
/// ```
pub trait FifoCacheTrait<K, V>: CoreCache<K, V> {
    /// Removes and returns the oldest entry (first inserted).
    fn pop_oldest(&mut self) -> Option<(K, V)>;

    /// Peeks at the oldest entry without removing it.
    fn peek_oldest(&self) -> Option<(&K, &V)>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Mock implementation for testing trait design
    struct MockFifoCache {
        data: Vec<(i32, String)>,
        capacity: usize,
    }

    impl ReadOnlyCache<i32, String> for MockFifoCache {
        fn contains(&self, key: &i32) -> bool {
            self.data.iter().any(|(k, _)| k == key)
        }

        fn len(&self) -> usize {
            self.data.len()
        }

        fn capacity(&self) -> usize {
            self.capacity
        }
    }

    impl CoreCache<i32, String> for MockFifoCache {
        fn insert(&mut self, key: i32, value: String) -> Option<String> {
            if let Some((_, existing)) = self.data.iter_mut().find(|(k, _)| *k == key) {
                return Some(std::mem::replace(existing, value));
            }
            self.data.push((key, value));
            if self.data.len() > self.capacity {
                self.data.remove(0);
            }
            None
        }

        fn get(&mut self, key: &i32) -> Option<&String> {
            self.data.iter().find(|(k, _)| k == key).map(|(_, v)| v)
        }

        fn clear(&mut self) {
            self.data.clear();
        }
    }

    impl FifoCacheTrait<i32, String> for MockFifoCache {
        fn pop_oldest(&mut self) -> Option<(i32, String)> {
            if self.data.is_empty() {
                None
            } else {
                Some(self.data.remove(0))
            }
        }

        fn peek_oldest(&self) -> Option<(&i32, &String)> {
            self.data.first().map(|(k, v)| (k, v))
        }
    }

    #[test]
    fn test_fifo_trait_design() {
        let mut cache = MockFifoCache {
            data: Vec::new(),
            capacity: 2,
        };

        cache.insert(1, "first".to_string());
        cache.insert(2, "second".to_string());
        assert_eq!(cache.len(), 2);
        assert!(cache.contains(&1));

        assert_eq!(cache.peek_oldest(), Some((&1, &"first".to_string())));
        assert_eq!(cache.pop_oldest(), Some((1, "first".to_string())));
        assert_eq!(cache.len(), 1);
    }
}
