//! Differ - structural field-by-field diffing of records
//!
//! Derive [`Diff`] on a struct, then call [`diff`] with two instances to get
//! the fields whose values changed:
//!
//! ```
//! use differ::{diff, Diff, FieldValue};
//!
//! #[derive(FieldValue)]
//! enum Status {
//!     Active,
//!     Inactive,
//! }
//!
//! #[derive(Diff)]
//! struct Person {
//!     name: String,
//!     age: u32,
//!     status: Status,
//! }
//!
//! let before = Person { name: "Alice".into(), age: 30, status: Status::Active };
//! let after = Person { name: "Alice".into(), age: 31, status: Status::Inactive };
//!
//! let changes: Vec<String> = diff(&before, &after).iter().map(|c| c.to_string()).collect();
//! assert_eq!(changes, ["age: 30 -> 31", "status: Active -> Inactive"]);
//! ```

pub mod describe;

pub use describe::{to_friendly_description, FriendlyDescription};
pub use differ_core::{
    are_equal, diff, diff_dyn, probe, select_fields, Change, Comparator, ComparatorCache,
    DiffError, DiffResult, Diffable, Differ, ErasedComparator, FieldDescriptor, FieldKind,
    FieldValue, Probe, SelectedField, Side, Subject, Value,
};
pub use differ_derive::{Diff, FieldValue};
