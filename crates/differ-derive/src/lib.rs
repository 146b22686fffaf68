//! Derive macros for differ.
//!
//! # Diff derive macro
//!
//! Generates the field descriptor list the comparator engine builds from.
//!
//! ```ignore
//! #[derive(Diff)]
//! pub struct Customer {
//!     #[diff(name = "Full Name")]
//!     pub name: String,
//!     pub age: u32,
//!     pub status: Status,
//!     pub referrer: Option<u64>,
//!
//!     // never compared: container type
//!     pub tags: Vec<String>,
//!
//!     #[diff(skip)]
//!     pub cached_score: f64,
//! }
//!
//! #[derive(FieldValue)]
//! pub enum Status {
//!     Active,
//!     Inactive,
//! }
//! ```
//!
//! # Attributes
//!
//! Struct-level:
//! - `#[diff(name = "x")]` - Subject type name used in descriptions
//!
//! Field-level:
//! - `#[diff(name = "x")]` - Display name of the field (blank falls back to the field name)
//! - `#[diff(skip)]` - Leave the field out entirely
//! - `#[diff(value)]` - Compare the field even if its type looks like a container
//!
//! Variant-level (`FieldValue` on enums):
//! - `#[diff(name = "x")]` - Text shown for the variant
//!
//! # Field classification
//!
//! - `String`, `Cow<str>`, `&'static str`, `Box<str>`, `Arc<str>` → text
//! - primitives, and any other named type → scalar (must implement `FieldValue`)
//! - `Option<T>` with `T` comparable → optional
//! - other references, pointers, slices, arrays, tuples, smart pointers and std
//!   collections → not compared

mod attr;
mod diff;
mod field_value;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derive macro that implements `Diffable`.
#[proc_macro_derive(Diff, attributes(diff))]
pub fn derive_diff(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    diff::derive(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Derive macro that implements `FieldValue` for fieldless enums and newtypes.
#[proc_macro_derive(FieldValue, attributes(diff))]
pub fn derive_field_value(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    field_value::derive(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
