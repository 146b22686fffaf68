//! Per-type comparators built from selected fields

use crate::change::Change;
use crate::diff::DiffError;
use crate::schema::{select_fields, Diffable, SelectedField};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Field-by-field comparison routine for one record type
///
/// The field list and its order are fixed when the comparator is built.
pub struct Comparator<T> {
    type_name: &'static str,
    fields: Vec<SelectedField<T>>,
}

impl<T: Diffable> Comparator<T> {
    /// Build the comparator from `T`'s descriptor
    pub fn build() -> Self {
        Self {
            type_name: T::type_name(),
            fields: select_fields::<T>(),
        }
    }
}

impl<T> Comparator<T> {
    /// Compare two instances, returning one change per differing field
    pub fn compare(&self, original: &T, changed: &T) -> Vec<Change> {
        let mut changes = Vec::new();
        for field in &self.fields {
            if let Some((previous, new)) = (field.probe)(original, changed) {
                changes.push(Change::new(field.display_name, previous, new));
            }
        }
        changes
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Display names of the compared fields, in comparison order
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.display_name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<T> fmt::Debug for Comparator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Comparator")
            .field("type_name", &self.type_name)
            .field("fields", &self.fields)
            .finish()
    }
}

/// A comparator with its record type erased, as stored in the cache
pub trait ErasedComparator: Send + Sync {
    fn type_name(&self) -> &'static str;

    fn field_count(&self) -> usize;

    /// Compare two instances that must both be of the comparator's type
    fn compare_any(
        &self,
        original: &dyn Any,
        changed: &dyn Any,
    ) -> Result<Vec<Change>, DiffError>;

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: 'static> ErasedComparator for Comparator<T> {
    fn type_name(&self) -> &'static str {
        self.type_name
    }

    fn field_count(&self) -> usize {
        self.fields.len()
    }

    fn compare_any(
        &self,
        original: &dyn Any,
        changed: &dyn Any,
    ) -> Result<Vec<Change>, DiffError> {
        let mismatch = || DiffError::TypeMismatch {
            expected: self.type_name,
            found: "another type",
        };
        let original = original.downcast_ref::<T>().ok_or_else(mismatch)?;
        let changed = changed.downcast_ref::<T>().ok_or_else(mismatch)?;
        Ok(self.compare(original, changed))
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}
