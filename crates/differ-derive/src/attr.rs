//! `#[diff(...)]` attribute parsing.

use syn::{Attribute, LitStr};

/// Options collected from `#[diff(...)]` attributes on one item.
#[derive(Debug, Default)]
pub struct DiffAttrs {
    pub name: Option<String>,
    pub skip: bool,
    pub value: bool,
}

impl DiffAttrs {
    /// Parse every `#[diff(...)]` attribute in `attrs`.
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        for attr in attrs {
            if !attr.path().is_ident("diff") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let lit: LitStr = meta.value()?.parse()?;
                    out.name = Some(lit.value());
                } else if meta.path.is_ident("skip") {
                    out.skip = true;
                } else if meta.path.is_ident("value") {
                    out.value = true;
                } else {
                    return Err(meta.error("unknown diff attribute, expected `name`, `skip` or `value`"));
                }
                Ok(())
            })?;
        }
        Ok(out)
    }

    /// Reject options that make no sense at the given position.
    pub fn only_name(&self, attrs: &[Attribute], position: &str) -> syn::Result<()> {
        if !self.skip && !self.value {
            return Ok(());
        }
        let message = format!("only `name` is supported on {}", position);
        Err(match attrs.iter().find(|a| a.path().is_ident("diff")) {
            Some(attr) => syn::Error::new_spanned(attr, message),
            None => syn::Error::new(proc_macro2::Span::call_site(), message),
        })
    }
}
