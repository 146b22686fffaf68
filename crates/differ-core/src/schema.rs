//! Type descriptors and field selection

use crate::change::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reads one field from two instances and applies the equality policy
pub type Probe<T> = fn(&T, &T) -> Option<(Value, Value)>;

/// Value-kind tag of a described field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    /// Numeric, boolean, char or enumeration value
    Scalar,
    /// `Option` around an eligible value
    Optional,
    /// Owned text
    Text,
    /// Anything else; never compared
    Reference,
}

impl FieldKind {
    pub fn is_eligible(self) -> bool {
        self != FieldKind::Reference
    }
}

/// Description of a single declared field
///
/// Only used while a comparator is being built.
pub struct FieldDescriptor<T> {
    name: &'static str,
    display_name: Option<&'static str>,
    kind: FieldKind,
    probe: Option<Probe<T>>,
}

impl<T> FieldDescriptor<T> {
    pub fn new(name: &'static str, kind: FieldKind, probe: Probe<T>) -> Self {
        Self {
            name,
            display_name: None,
            kind,
            probe: Some(probe),
        }
    }

    /// A declared field whose type cannot be compared
    pub fn reference(name: &'static str) -> Self {
        Self {
            name,
            display_name: None,
            kind: FieldKind::Reference,
            probe: None,
        }
    }

    pub fn with_display_name(mut self, display_name: &'static str) -> Self {
        self.display_name = Some(display_name);
        self
    }

    /// Declared field name
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Display name override if non-blank, else the declared name
    pub fn display_name(&self) -> &'static str {
        match self.display_name {
            Some(display) if !display.trim().is_empty() => display,
            _ => self.name,
        }
    }

    pub fn is_eligible(&self) -> bool {
        self.kind.is_eligible() && self.probe.is_some()
    }

    fn select(self) -> Option<SelectedField<T>> {
        if !self.kind.is_eligible() {
            return None;
        }
        let display_name = self.display_name();
        self.probe.map(|probe| SelectedField {
            display_name,
            probe,
        })
    }
}

impl<T> Clone for FieldDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            display_name: self.display_name,
            kind: self.kind,
            probe: self.probe,
        }
    }
}

impl<T> fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("display_name", &self.display_name)
            .field("kind", &self.kind)
            .finish()
    }
}

/// A record type whose fields can be diffed
///
/// Usually produced by `#[derive(Diff)]`. A hand-written impl is an explicit
/// per-type registration and must list fields in declaration order.
pub trait Diffable: Sized + 'static {
    /// Name of the subject type shown in descriptions
    fn type_name() -> &'static str {
        short_type_name(std::any::type_name::<Self>())
    }

    /// All declared fields, in declaration order
    fn fields() -> Vec<FieldDescriptor<Self>>;
}

/// A field that survived selection, with its display name resolved
pub struct SelectedField<T> {
    pub display_name: &'static str,
    pub probe: Probe<T>,
}

impl<T> fmt::Debug for SelectedField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SelectedField")
            .field(&self.display_name)
            .finish()
    }
}

/// Enumerate the comparable fields of `T` in declaration order
pub fn select_fields<T: Diffable>() -> Vec<SelectedField<T>> {
    T::fields()
        .into_iter()
        .filter_map(FieldDescriptor::select)
        .collect()
}

/// Strip the module path and generic arguments from a type name
fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equality::probe;
    use pretty_assertions::assert_eq;

    struct Account {
        owner: String,
        balance: i64,
        parent: Option<Box<Account>>,
    }

    impl Diffable for Account {
        fn fields() -> Vec<FieldDescriptor<Self>> {
            vec![
                FieldDescriptor::<Self>::new("owner", FieldKind::Text, |a: &Self, b: &Self| {
                    probe(&a.owner, &b.owner)
                })
                .with_display_name("Account Owner"),
                FieldDescriptor::reference("parent"),
                FieldDescriptor::<Self>::new("balance", FieldKind::Scalar, |a: &Self, b: &Self| {
                    probe(&a.balance, &b.balance)
                })
                .with_display_name("   "),
            ]
        }
    }

    #[test]
    fn test_select_skips_references() {
        let selected = select_fields::<Account>();
        let names: Vec<_> = selected.iter().map(|f| f.display_name).collect();
        assert_eq!(names, vec!["Account Owner", "balance"]);
    }

    #[test]
    fn test_blank_display_name_falls_back() {
        let fields = Account::fields();
        assert_eq!(fields[2].display_name(), "balance");
        assert_eq!(fields[0].display_name(), "Account Owner");
        assert!(!fields[1].is_eligible());
    }

    #[test]
    fn test_default_type_name() {
        assert_eq!(Account::type_name(), "Account");
        assert_eq!(short_type_name("alloc::vec::Vec<u8>"), "Vec");
    }

    #[test]
    fn test_selected_probe_reads_fields() {
        let a = Account {
            owner: "ann".into(),
            balance: 1,
            parent: None,
        };
        let b = Account {
            owner: "ann".into(),
            balance: 2,
            parent: None,
        };
        let selected = select_fields::<Account>();
        assert_eq!((selected[0].probe)(&a, &b), None);
        assert_eq!(
            (selected[1].probe)(&a, &b),
            Some((Value::Int(1), Value::Int(2)))
        );
        assert!(a.parent.is_none());
    }
}
