//! Equality policy applied to every compared field

use crate::change::Value;
use crate::value::FieldValue;

/// Decide whether two field values are equal
///
/// Two absent values are equal, one absent value never equals a present one,
/// and two present values defer to [`FieldValue::value_eq`].
pub fn are_equal<U: FieldValue>(a: &U, b: &U) -> bool {
    match (a.is_absent(), b.is_absent()) {
        (true, true) => true,
        (true, false) | (false, true) => false,
        (false, false) => a.value_eq(b),
    }
}

/// Compare one field read from two instances
///
/// Returns the erased `(previous, new)` pair when the values differ. Derived
/// and hand-written descriptors both route through here so every field type
/// gets the same policy.
pub fn probe<U: FieldValue>(original: &U, changed: &U) -> Option<(Value, Value)> {
    if are_equal(original, changed) {
        None
    } else {
        Some((original.to_value(), changed.to_value()))
    }
}
