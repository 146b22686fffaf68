//! FieldValue derive macro - fieldless enums and single-field newtypes.

use crate::attr::DiffAttrs;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields};

/// Generate the `FieldValue` implementation.
pub fn derive(input: &DeriveInput) -> syn::Result<TokenStream> {
    match &input.data {
        Data::Enum(data) => derive_enum(input, data),
        Data::Struct(data) => derive_newtype(input, &data.fields),
        Data::Union(_) => Err(syn::Error::new_spanned(
            &input.ident,
            "FieldValue cannot be derived for unions",
        )),
    }
}

fn derive_enum(input: &DeriveInput, data: &syn::DataEnum) -> syn::Result<TokenStream> {
    let name = &input.ident;
    DiffAttrs::parse(&input.attrs)?.only_name(&input.attrs, "enums")?;

    let mut arms = Vec::new();
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "FieldValue can only be derived for enums without fields",
            ));
        }
        let attrs = DiffAttrs::parse(&variant.attrs)?;
        attrs.only_name(&variant.attrs, "variants")?;
        let ident = &variant.ident;
        let label = attrs
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| ident.to_string());
        arms.push(quote! { #name::#ident => #label, });
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::differ::FieldValue for #name #ty_generics #where_clause {
            const KIND: ::differ::FieldKind = ::differ::FieldKind::Scalar;

            fn to_value(&self) -> ::differ::Value {
                let label: &'static str = match *self {
                    #(#arms)*
                };
                ::differ::Value::Enum(::std::string::String::from(label))
            }

            fn value_eq(&self, other: &Self) -> bool {
                ::core::mem::discriminant(self) == ::core::mem::discriminant(other)
            }
        }
    })
}

fn derive_newtype(input: &DeriveInput, fields: &Fields) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let inner = match fields {
        Fields::Unnamed(fields) if fields.unnamed.len() == 1 => &fields.unnamed[0].ty,
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "FieldValue can only be derived for single-field tuple structs",
            ))
        }
    };

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::differ::FieldValue for #name #ty_generics #where_clause {
            const KIND: ::differ::FieldKind = <#inner as ::differ::FieldValue>::KIND;

            fn to_value(&self) -> ::differ::Value {
                ::differ::FieldValue::to_value(&self.0)
            }

            fn is_absent(&self) -> bool {
                ::differ::FieldValue::is_absent(&self.0)
            }

            fn value_eq(&self, other: &Self) -> bool {
                ::differ::are_equal(&self.0, &other.0)
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn rejects_enums_with_data() {
        let input: DeriveInput = parse_quote! {
            enum Shape {
                Dot,
                Circle(f64),
            }
        };
        let err = derive(&input).unwrap_err();
        assert!(err.to_string().contains("without fields"));
    }

    #[test]
    fn uses_variant_display_names() {
        let input: DeriveInput = parse_quote! {
            enum Tier {
                #[diff(name = "Gold tier")]
                Gold,
                Silver,
            }
        };
        let tokens = derive(&input).unwrap().to_string();
        assert!(tokens.contains("\"Gold tier\""));
        assert!(tokens.contains("\"Silver\""));
    }

    #[test]
    fn rejects_multi_field_structs() {
        let input: DeriveInput = parse_quote! {
            struct Range(u32, u32);
        };
        assert!(derive(&input).is_err());
    }
}
