//! Bounded, thread-safe caches shared by the selector, climate, and Voronoi modules.
//!
//! Eviction is bulk, not LRU: when a cache reaches its configured cap the oldest
//! 20% of entries (by insertion order) are dropped in one batch rather than one
//! entry per insert. This keeps the amortized cost of staying under the cap low
//! under heavy, bursty lookup traffic (chunk generation tends to touch thousands
//! of new keys in a short window, then go quiet).

use std::collections::VecDeque;

use hashbrown::HashMap;
use parking_lot::RwLock;
use tracing::debug;

struct Inner<V> {
    map: HashMap<u64, V>,
    order: VecDeque<u64>,
}

/// A bounded cache keyed by packed `u64` coordinates, evicting in 20% batches.
pub struct BoundedCache<V> {
    max_size: usize,
    inner: RwLock<Inner<V>>,
}

impl<V: Clone> BoundedCache<V> {
    pub fn new(max_size: usize) -> Self {
        let max_size = max_size.max(1);
        Self {
            max_size,
            inner: RwLock::new(Inner {
                map: HashMap::with_capacity(max_size.min(1024)),
                order: VecDeque::with_capacity(max_size.min(1024)),
            }),
        }
    }

    pub fn get(&self, key: u64) -> Option<V> {
        self.inner.read().map.get(&key).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.read().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the cached value for `key`, computing and inserting it via `compute`
    /// if absent. `compute` runs without holding the lock; if another thread wins
    /// the race and inserts first, the freshly computed value is discarded in favor
    /// of the one already stored (double-checked insertion).
    pub fn get_or_insert_with(&self, key: u64, compute: impl FnOnce() -> V) -> V {
        if let Some(existing) = self.get(key) {
            return existing;
        }

        let value = compute();

        let mut inner = self.inner.write();
        if let Some(existing) = inner.map.get(&key) {
            return existing.clone();
        }

        if inner.map.len() >= self.max_size {
            evict_batch(&mut inner, self.max_size);
        }

        inner.map.insert(key, value.clone());
        inner.order.push_back(key);
        value
    }
}

fn evict_batch<V>(inner: &mut Inner<V>, max_size: usize) {
    let evict_count = (max_size / 5).max(1);
    let mut evicted = 0;
    for _ in 0..evict_count {
        match inner.order.pop_front() {
            Some(old_key) => {
                inner.map.remove(&old_key);
                evicted += 1;
            }
            None => break,
        }
    }
    debug!(evicted, remaining = inner.map.len(), "cache eviction batch");
}

/// An unbounded cache for data that is cheap to keep forever (Voronoi cell contents
/// are stable once generated and the number of distinct cells visited by a single
/// world is small relative to `max_cache_size`).
pub struct GrowOnlyCache<V> {
    map: RwLock<HashMap<u64, V>>,
}

impl<V: Clone> GrowOnlyCache<V> {
    pub fn new() -> Self {
        Self {
            map: RwLock::new(HashMap::new()),
        }
    }

    pub fn get(&self, key: u64) -> Option<V> {
        self.map.read().get(&key).cloned()
    }

    pub fn get_or_insert_with(&self, key: u64, compute: impl FnOnce() -> V) -> V {
        if let Some(existing) = self.get(key) {
            return existing;
        }
        let value = compute();
        let mut map = self.map.write();
        if let Some(existing) = map.get(&key) {
            return existing.clone();
        }
        map.insert(key, value.clone());
        value
    }

    pub fn len(&self) -> usize {
        self.map.read().len()
    }
}

impl<V: Clone> Default for GrowOnlyCache<V> {
    fn default() -> Self {
        Self::new()
    }
}
