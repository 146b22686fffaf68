//! Diff entry points

use crate::cache::ComparatorCache;
use crate::change::Change;
use crate::comparator::ErasedComparator;
use crate::schema::Diffable;
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiffError {
    #[error("Cannot diff {expected} against {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("Missing {0} instance")]
    MissingInstance(Side),
}

/// Which instance of a diff pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Original,
    Changed,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Original => f.write_str("original"),
            Side::Changed => f.write_str("changed"),
        }
    }
}

/// Changes found by one diff, in field declaration order
///
/// Iterating by reference any number of times yields the same changes.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffResult {
    /// Name of the diffed type
    pub subject: &'static str,
    changes: Vec<Change>,
}

impl DiffResult {
    pub fn new(subject: &'static str, changes: Vec<Change>) -> Self {
        Self { subject, changes }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Change> {
        self.changes.iter()
    }

    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    pub fn into_changes(self) -> Vec<Change> {
        self.changes
    }

    /// Get the change for a field by display name
    pub fn find(&self, name: &str) -> Option<&Change> {
        self.changes.iter().find(|c| c.name() == name)
    }

    pub fn get(&self, index: usize) -> Option<&Change> {
        self.changes.get(index)
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Check if the two instances were equal in every compared field
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

impl IntoIterator for DiffResult {
    type Item = Change;
    type IntoIter = std::vec::IntoIter<Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.into_iter()
    }
}

impl<'a> IntoIterator for &'a DiffResult {
    type Item = &'a Change;
    type IntoIter = std::slice::Iter<'a, Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}

/// A diffable value behind a trait object
///
/// Lets callers holding `&dyn Subject` diff by the runtime type of the
/// instance rather than a declared type.
pub trait Subject: Any {
    fn as_any(&self) -> &dyn Any;

    fn subject_type_name(&self) -> &'static str;

    /// Comparator for this value's concrete type
    fn comparator_in(&self, cache: &ComparatorCache) -> Arc<dyn ErasedComparator>;
}

impl<T: Diffable> Subject for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn subject_type_name(&self) -> &'static str {
        T::type_name()
    }

    fn comparator_in(&self, cache: &ComparatorCache) -> Arc<dyn ErasedComparator> {
        cache.erased::<T>()
    }
}

/// The diff engine
///
/// Holds the comparator cache it builds into. Cloning shares the cache.
#[derive(Debug, Clone)]
pub struct Differ {
    cache: Arc<ComparatorCache>,
}

impl Default for Differ {
    fn default() -> Self {
        Self {
            cache: Arc::new(ComparatorCache::new()),
        }
    }
}

impl Differ {
    /// Engine with its own empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine backed by the process-wide cache
    pub fn global() -> Self {
        Self {
            cache: ComparatorCache::global(),
        }
    }

    pub fn with_cache(mut self, cache: Arc<ComparatorCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn cache(&self) -> &Arc<ComparatorCache> {
        &self.cache
    }

    /// Diff two instances of the same type
    pub fn diff<T: Diffable>(&self, original: &T, changed: &T) -> DiffResult {
        let comparator = self.cache.comparator::<T>();
        DiffResult::new(comparator.type_name(), comparator.compare(original, changed))
    }

    /// Diff two trait objects, dispatching on the runtime type of `original`
    ///
    /// Fails before comparing anything when `changed` has a different
    /// concrete type.
    pub fn diff_dyn(
        &self,
        original: &dyn Subject,
        changed: &dyn Subject,
    ) -> Result<DiffResult, DiffError> {
        if original.as_any().type_id() != changed.as_any().type_id() {
            return Err(DiffError::TypeMismatch {
                expected: original.subject_type_name(),
                found: changed.subject_type_name(),
            });
        }

        let comparator = original.comparator_in(&self.cache);
        let changes = comparator.compare_any(original.as_any(), changed.as_any())?;
        Ok(DiffResult::new(comparator.type_name(), changes))
    }

    /// Diff two instances that may be missing
    pub fn diff_present<T: Diffable>(
        &self,
        original: Option<&T>,
        changed: Option<&T>,
    ) -> Result<DiffResult, DiffError> {
        let original = original.ok_or(DiffError::MissingInstance(Side::Original))?;
        let changed = changed.ok_or(DiffError::MissingInstance(Side::Changed))?;
        Ok(self.diff(original, changed))
    }
}

/// Diff two instances using the process-wide comparator cache
pub fn diff<T: Diffable>(original: &T, changed: &T) -> DiffResult {
    Differ::global().diff(original, changed)
}

/// Diff two trait objects using the process-wide comparator cache
pub fn diff_dyn(original: &dyn Subject, changed: &dyn Subject) -> Result<DiffResult, DiffError> {
    Differ::global().diff_dyn(original, changed)
}
