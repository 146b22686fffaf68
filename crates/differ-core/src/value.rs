//! Conversion of field types into [`Value`]s

use crate::change::Value;
use crate::equality::are_equal;
use crate::schema::FieldKind;
use std::borrow::Cow;
use std::sync::Arc;

/// A type that can appear in a diffed field
///
/// Implemented for the primitive scalars, text, and `Option` of any of
/// these. Fieldless enums get an implementation from `#[derive(FieldValue)]`.
pub trait FieldValue: 'static {
    /// Kind tag recorded in the field descriptor
    const KIND: FieldKind;

    fn to_value(&self) -> Value;

    /// Whether this value is the absent state of an optional
    fn is_absent(&self) -> bool {
        false
    }

    /// Value equality for two present values
    fn value_eq(&self, other: &Self) -> bool;
}

macro_rules! scalar_field_value {
    ($variant:ident as $repr:ty => $($ty:ty),+ $(,)?) => {
        $(
            impl FieldValue for $ty {
                const KIND: FieldKind = FieldKind::Scalar;

                fn to_value(&self) -> Value {
                    Value::$variant(*self as $repr)
                }

                fn value_eq(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )+
    };
}

scalar_field_value!(Int as i64 => i8, i16, i32, i64, isize);
scalar_field_value!(UInt as u64 => u8, u16, u32, u64, usize);

impl FieldValue for bool {
    const KIND: FieldKind = FieldKind::Scalar;

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn value_eq(&self, other: &Self) -> bool {
        self == other
    }
}

impl FieldValue for char {
    const KIND: FieldKind = FieldKind::Scalar;

    fn to_value(&self) -> Value {
        Value::Char(*self)
    }

    fn value_eq(&self, other: &Self) -> bool {
        self == other
    }
}

// NaN compares equal to NaN so an untouched NaN field is not reported.
impl FieldValue for f32 {
    const KIND: FieldKind = FieldKind::Scalar;

    fn to_value(&self) -> Value {
        Value::Float32(*self)
    }

    fn value_eq(&self, other: &Self) -> bool {
        self == other || (self.is_nan() && other.is_nan())
    }
}

impl FieldValue for f64 {
    const KIND: FieldKind = FieldKind::Scalar;

    fn to_value(&self) -> Value {
        Value::Float(*self)
    }

    fn value_eq(&self, other: &Self) -> bool {
        self == other || (self.is_nan() && other.is_nan())
    }
}

macro_rules! text_field_value {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl FieldValue for $ty {
                const KIND: FieldKind = FieldKind::Text;

                fn to_value(&self) -> Value {
                    Value::Text(self.to_string())
                }

                fn value_eq(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )+
    };
}

text_field_value!(String, &'static str, Cow<'static, str>, Box<str>, Arc<str>);

impl<T: FieldValue> FieldValue for Option<T> {
    const KIND: FieldKind = FieldKind::Optional;

    fn to_value(&self) -> Value {
        match self {
            Some(inner) => inner.to_value(),
            None => Value::Null,
        }
    }

    // Only the outer `None` is absent; `Some(None)` is a present value.
    fn is_absent(&self) -> bool {
        self.is_none()
    }

    fn value_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => are_equal(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_widening() {
        assert_eq!(7u8.to_value(), Value::UInt(7));
        assert_eq!((-3i16).to_value(), Value::Int(-3));
        assert_eq!(usize::MAX.to_value(), Value::UInt(usize::MAX as u64));
    }

    #[test]
    fn test_option_values() {
        assert_eq!(Some(5i32).to_value(), Value::Int(5));
        assert_eq!(None::<i32>.to_value(), Value::Null);
        assert!(None::<String>.is_absent());
        assert!(!Some(String::new()).is_absent());
        assert_eq!(<Option<i32> as FieldValue>::KIND, FieldKind::Optional);
    }

    #[test]
    fn test_float_nan_is_stable() {
        assert!(f64::NAN.value_eq(&f64::NAN));
        assert!(!1.0f32.value_eq(&2.0f32));
        assert_eq!(1.5f32.to_value(), Value::Float32(1.5));
    }

    #[test]
    fn test_text_kinds() {
        assert_eq!(String::KIND, FieldKind::Text);
        let cow: Cow<'static, str> = Cow::Borrowed("hi");
        assert_eq!(cow.to_value(), Value::Text("hi".into()));

        assert_eq!(<&'static str>::KIND, FieldKind::Text);
        assert_eq!("hi".to_value(), Value::Text("hi".into()));
        assert!(!"a".value_eq(&"b"));
        let boxed: Box<str> = "hi".into();
        assert_eq!(boxed.to_value(), Value::Text("hi".into()));
        let shared: Arc<str> = Arc::from("hi");
        assert_eq!(<Arc<str>>::KIND, FieldKind::Text);
        assert!(shared.value_eq(&Arc::from("hi")));
    }

    #[test]
    fn test_f32_keeps_its_precision() {
        assert_eq!(0.1f32.to_value().to_string(), "0.1");
        assert_eq!(9.75f32.to_value().to_string(), "9.75");
    }

    #[test]
    fn test_nested_option_absence() {
        let outer: Option<Option<i32>> = None;
        let inner: Option<Option<i32>> = Some(None);
        assert!(outer.is_absent());
        assert!(!inner.is_absent());
        assert!(!are_equal(&outer, &inner));
        assert!(!are_equal(&inner, &outer));
        assert!(are_equal(&inner, &Some(None)));
        assert!(!are_equal(&inner, &Some(Some(1))));
    }
}
