//! Differ Core - field-by-field record diffing
//!
//! This library builds one comparator per record type from the type's field
//! descriptors, caches it by type, and uses it to list the fields that differ
//! between two instances.

pub mod cache;
pub mod change;
pub mod comparator;
pub mod diff;
pub mod equality;
pub mod schema;
pub mod value;

pub use cache::ComparatorCache;
pub use change::{Change, Value};
pub use comparator::{Comparator, ErasedComparator};
pub use diff::{diff, diff_dyn, DiffError, DiffResult, Differ, Side, Subject};
pub use equality::{are_equal, probe};
pub use schema::{select_fields, Diffable, FieldDescriptor, FieldKind, Probe, SelectedField};
pub use value::FieldValue;
