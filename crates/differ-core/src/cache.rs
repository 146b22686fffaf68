//! Type-keyed comparator cache
//!
//! Comparators are built lazily on first use and never evicted. The
//! process-wide instance backs the free [`diff()`](crate::diff()) function;
//! a private cache can be injected through [`Differ::with_cache`](crate::Differ::with_cache).

use crate::comparator::{Comparator, ErasedComparator};
use crate::schema::Diffable;
use log::{debug, trace};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::any::TypeId;
use std::collections::hash_map::Entry;
use std::fmt;
use std::sync::{Arc, LazyLock};

/// Process-wide comparator cache
static GLOBAL_CACHE: LazyLock<Arc<ComparatorCache>> =
    LazyLock::new(|| Arc::new(ComparatorCache::new()));

/// Thread-safe map from a concrete type to its comparator
#[derive(Default)]
pub struct ComparatorCache {
    comparators: RwLock<FxHashMap<TypeId, Arc<dyn ErasedComparator>>>,
}

impl ComparatorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the process-wide cache
    pub fn global() -> Arc<ComparatorCache> {
        Arc::clone(&GLOBAL_CACHE)
    }

    /// Get the comparator for `T`, building it on first use
    ///
    /// # Panics
    ///
    /// Entries are keyed by their comparator's `TypeId`, so the entry found
    /// for `T` is always a `Comparator<T>` and the downcast cannot fail.
    pub fn comparator<T: Diffable>(&self) -> Arc<Comparator<T>> {
        self.erased::<T>()
            .into_any()
            .downcast::<Comparator<T>>()
            .unwrap_or_else(|_| unreachable!("comparator cache entry keyed by the wrong TypeId"))
    }

    /// Get the type-erased comparator for `T`, building it on first use
    ///
    /// Concurrent first uses may each build a comparator; the first one
    /// inserted wins and the others are dropped.
    pub fn erased<T: Diffable>(&self) -> Arc<dyn ErasedComparator> {
        let key = TypeId::of::<T>();
        if let Some(found) = self.comparators.read().get(&key) {
            trace!("comparator cache hit for {}", found.type_name());
            return Arc::clone(found);
        }

        let built = Comparator::<T>::build();
        debug!(
            "built comparator for {} ({} fields)",
            built.type_name(),
            built.len()
        );
        let built: Arc<dyn ErasedComparator> = Arc::new(built);

        match self.comparators.write().entry(key) {
            Entry::Occupied(entry) => {
                debug!(
                    "discarding redundant comparator for {}",
                    entry.get().type_name()
                );
                Arc::clone(entry.get())
            }
            Entry::Vacant(entry) => Arc::clone(entry.insert(built)),
        }
    }

    /// Check if a comparator for `T` has been built
    pub fn contains<T: Diffable>(&self) -> bool {
        self.comparators.read().contains_key(&TypeId::of::<T>())
    }

    /// Number of cached comparators
    pub fn len(&self) -> usize {
        self.comparators.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.comparators.read().is_empty()
    }

    /// Names of the types with a cached comparator, sorted
    pub fn type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self
            .comparators
            .read()
            .values()
            .map(|c| c.type_name())
            .collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for ComparatorCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComparatorCache")
            .field("types", &self.type_names())
            .finish()
    }
}
