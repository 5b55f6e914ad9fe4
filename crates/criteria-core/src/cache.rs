//! Memo of values compiled from criteria trees, keyed by fingerprint.

use crate::{criteria::CriteriaExpression, fingerprint::CriteriaFingerprint};
use std::{
    collections::BTreeMap,
    sync::{
        Arc, Mutex, MutexGuard, PoisonError,
        atomic::{AtomicUsize, Ordering},
    },
};

///
/// CacheStats
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub size: usize,
}

///
/// CriteriaCache
///
/// Structurally equal trees share one entry: the key is the tree's
/// fingerprint, never its address.
///
/// The cache holds at most `capacity` entries. Inserting a new key into a
/// full cache evicts the entry with the lowest fingerprint, which is an
/// arbitrary but deterministic choice.
///

#[derive(Debug)]
pub struct CriteriaCache<V> {
    entries: Mutex<BTreeMap<CriteriaFingerprint, Arc<V>>>,
    capacity: usize,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

/// Entry bound used by [`CriteriaCache::new`].
pub const DEFAULT_CACHE_CAPACITY: usize = 4096;

impl<V> Default for CriteriaCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> CriteriaCache<V> {
    #[must_use]
    pub const fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    /// Cache bounded to `capacity` entries; zero is treated as one.
    #[must_use]
    pub const fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(BTreeMap::new()),
            capacity: if capacity == 0 { 1 } else { capacity },
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Cached value for `criteria`, building it with `build` on a miss.
    pub fn get_or_insert_with(
        &self,
        criteria: &CriteriaExpression,
        build: impl FnOnce(&CriteriaExpression) -> V,
    ) -> Arc<V> {
        let key = criteria.fingerprint();
        if let Some(hit) = self.get(&key) {
            return hit;
        }

        self.insert(key, build(criteria))
    }

    /// Like [`Self::get_or_insert_with`] for fallible builders; errors are
    /// returned and nothing is cached.
    pub fn try_get_or_insert_with<E>(
        &self,
        criteria: &CriteriaExpression,
        build: impl FnOnce(&CriteriaExpression) -> Result<V, E>,
    ) -> Result<Arc<V>, E> {
        let key = criteria.fingerprint();
        if let Some(hit) = self.get(&key) {
            return Ok(hit);
        }

        Ok(self.insert(key, build(criteria)?))
    }

    /// Lookup by fingerprint; counts a hit or a miss.
    pub fn get(&self, key: &CriteriaFingerprint) -> Option<Arc<V>> {
        let found = self.lock().get(key).cloned();

        // stats are best-effort; relaxed ordering is enough
        let counter = if found.is_some() {
            &self.hits
        } else {
            &self.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);

        found
    }

    /// Insert unless another caller got there first; returns the entry
    /// that ends up cached.
    pub fn insert(&self, key: CriteriaFingerprint, value: V) -> Arc<V> {
        let mut entries = self.lock();

        if !entries.contains_key(&key) && entries.len() >= self.capacity {
            entries.pop_first();
        }

        Arc::clone(entries.entry(key).or_insert_with(|| Arc::new(value)))
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            size: self.lock().len(),
        }
    }

    /// Drop every entry and zero the counters.
    pub fn clear(&self) {
        self.lock().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    // A panicking builder never runs under the lock, so a poisoned map is
    // still consistent.
    fn lock(&self) -> MutexGuard<'_, BTreeMap<CriteriaFingerprint, Arc<V>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        criteria::CompareCriteria, operation::OperationExpression,
        operator::CriteriaOperator, test_fixtures::PRODUCT,
    };
    use std::cell::Cell;

    fn qty_greater(n: i64) -> CriteriaExpression {
        let left = OperationExpression::member(&PRODUCT, "qty").expect("qty");
        CompareCriteria::with_value(left, CriteriaOperator::Greater, n)
            .expect("compare")
            .into()
    }

    #[test]
    fn equal_trees_share_one_entry() {
        let cache = CriteriaCache::new();
        let builds = Cell::new(0);

        let build = |c: &CriteriaExpression| {
            builds.set(builds.get() + 1);
            c.to_string()
        };

        let first = cache.get_or_insert_with(&qty_greater(1), build);
        let second = cache.get_or_insert_with(&qty_greater(1), build);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(builds.get(), 1);
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 1,
                misses: 1,
                size: 1
            }
        );
    }

    #[test]
    fn different_trees_get_different_entries() {
        let cache = CriteriaCache::new();

        cache.get_or_insert_with(&qty_greater(1), |_| 1);
        cache.get_or_insert_with(&qty_greater(2), |_| 2);

        assert_eq!(cache.stats().size, 2);
        assert_eq!(*cache.get_or_insert_with(&qty_greater(2), |_| 0), 2);
    }

    #[test]
    fn failed_build_is_not_cached() {
        let cache: CriteriaCache<u32> = CriteriaCache::new();

        let err = cache.try_get_or_insert_with(&qty_greater(1), |_| Err("boom"));
        assert_eq!(err, Err("boom"));
        assert_eq!(cache.stats().size, 0);

        let ok = cache.try_get_or_insert_with(&qty_greater(1), |_| Ok::<_, &str>(7));
        assert_eq!(ok.map(|v| *v), Ok(7));
    }

    #[test]
    fn full_cache_evicts_before_inserting() {
        let cache = CriteriaCache::with_capacity(2);

        for n in 1..=5 {
            cache.get_or_insert_with(&qty_greater(n), |_| n);
            assert!(cache.stats().size <= 2);
        }

        assert_eq!(cache.capacity(), 2);
        assert_eq!(cache.stats().size, 2);
        assert_eq!(*cache.get_or_insert_with(&qty_greater(5), |_| 0), 5);
    }

    #[test]
    fn clear_resets_entries_and_counters() {
        let cache = CriteriaCache::new();
        cache.get_or_insert_with(&qty_greater(1), |_| ());
        cache.clear();

        assert_eq!(cache.stats(), CacheStats::default());
    }
}
