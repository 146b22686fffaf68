//! Diff derive macro - generates the `Diffable` field descriptors.

use crate::attr::DiffAttrs;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    parse_quote, Data, DeriveInput, Fields, GenericArgument, GenericParam, PathArguments, Type,
};

/// How a field type takes part in comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Class {
    Scalar,
    Optional,
    Text,
    Reference,
}

impl Class {
    fn is_eligible(self) -> bool {
        self != Class::Reference
    }
}

const PRIMITIVES: &[&str] = &[
    "bool", "char", "i8", "i16", "i32", "i64", "isize", "u8", "u16", "u32", "u64", "usize",
    "f32", "f64",
];

const CONTAINERS: &[&str] = &[
    "Box", "Rc", "Arc", "Weak", "Vec", "VecDeque", "LinkedList", "BinaryHeap", "HashMap",
    "BTreeMap", "HashSet", "BTreeSet", "Cell", "RefCell", "Mutex", "RwLock", "PhantomData",
];

/// Generate the `Diffable` implementation.
pub fn derive(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let struct_attrs = DiffAttrs::parse(&input.attrs)?;
    struct_attrs.only_name(&input.attrs, "structs")?;
    let type_name = struct_attrs
        .name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| name.to_string());

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => fields.named.iter().collect::<Vec<_>>(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Diff only works on structs with named fields",
                ))
            }
        },
        _ => return Err(syn::Error::new_spanned(name, "Diff only works on structs")),
    };

    let mut descriptors = Vec::new();
    let mut bounds = Vec::new();
    for field in fields {
        let attrs = DiffAttrs::parse(&field.attrs)?;
        if attrs.skip {
            continue;
        }
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let field_name = ident.to_string();
        let ty = &field.ty;

        let class = if attrs.value {
            Class::Scalar
        } else {
            classify(ty)
        };

        let descriptor = if class.is_eligible() {
            bounds.push(quote! { #ty: ::differ::FieldValue });
            quote! {
                ::differ::FieldDescriptor::<Self>::new(
                    #field_name,
                    <#ty as ::differ::FieldValue>::KIND,
                    |a: &Self, b: &Self| ::differ::probe(&a.#ident, &b.#ident),
                )
            }
        } else {
            quote! { ::differ::FieldDescriptor::<Self>::reference(#field_name) }
        };

        descriptors.push(match &attrs.name {
            Some(display) => quote! { #descriptor.with_display_name(#display) },
            None => descriptor,
        });
    }

    let mut generics = input.generics.clone();
    for param in generics.params.iter_mut() {
        if let GenericParam::Type(param) = param {
            param.bounds.push(parse_quote!('static));
        }
    }
    let where_clause = generics.make_where_clause();
    for bound in bounds {
        where_clause.predicates.push(parse_quote!(#bound));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::differ::Diffable for #name #ty_generics #where_clause {
            fn type_name() -> &'static str {
                #type_name
            }

            fn fields() -> ::std::vec::Vec<::differ::FieldDescriptor<Self>> {
                ::std::vec![
                    #(#descriptors),*
                ]
            }
        }
    })
}

/// Classify a field type by its syntax.
pub fn classify(ty: &Type) -> Class {
    match ty {
        Type::Paren(inner) => classify(&inner.elem),
        Type::Group(inner) => classify(&inner.elem),
        Type::Reference(r) if r.mutability.is_none() && is_str(&r.elem) => Class::Text,
        Type::Path(path) if path.qself.is_none() => {
            let Some(segment) = path.path.segments.last() else {
                return Class::Reference;
            };
            let ident = segment.ident.to_string();
            match ident.as_str() {
                "String" => Class::Text,
                "Cow" => match first_type_arg(&segment.arguments) {
                    Some(arg) if is_str(arg) => Class::Text,
                    _ => Class::Reference,
                },
                "Box" | "Arc" if first_type_arg(&segment.arguments).is_some_and(is_str) => {
                    Class::Text
                }
                "Option" => match first_type_arg(&segment.arguments).map(classify) {
                    Some(Class::Scalar | Class::Text | Class::Optional) => Class::Optional,
                    _ => Class::Reference,
                },
                s if PRIMITIVES.contains(&s) => Class::Scalar,
                s if CONTAINERS.contains(&s) => Class::Reference,
                _ => Class::Scalar,
            }
        }
        _ => Class::Reference,
    }
}

fn is_str(ty: &Type) -> bool {
    matches!(ty, Type::Path(path) if path.qself.is_none() && path.path.is_ident("str"))
}

fn first_type_arg(arguments: &PathArguments) -> Option<&Type> {
    let PathArguments::AngleBracketed(args) = arguments else {
        return None;
    };
    args.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class_of(ty: Type) -> Class {
        classify(&ty)
    }

    #[test]
    fn classifies_text_and_scalars() {
        assert_eq!(class_of(parse_quote!(String)), Class::Text);
        assert_eq!(class_of(parse_quote!(std::borrow::Cow<'static, str>)), Class::Text);
        assert_eq!(class_of(parse_quote!(&'static str)), Class::Text);
        assert_eq!(class_of(parse_quote!(Box<str>)), Class::Text);
        assert_eq!(class_of(parse_quote!(std::sync::Arc<str>)), Class::Text);
        assert_eq!(class_of(parse_quote!(Option<&'static str>)), Class::Optional);
        assert_eq!(class_of(parse_quote!(u32)), Class::Scalar);
        assert_eq!(class_of(parse_quote!(Status)), Class::Scalar);
    }

    #[test]
    fn classifies_optionals() {
        assert_eq!(class_of(parse_quote!(Option<i64>)), Class::Optional);
        assert_eq!(class_of(parse_quote!(Option<String>)), Class::Optional);
        assert_eq!(class_of(parse_quote!(Option<Vec<u8>>)), Class::Reference);
    }

    #[test]
    fn classifies_references() {
        assert_eq!(class_of(parse_quote!(&'static [u8])), Class::Reference);
        assert_eq!(class_of(parse_quote!(&'static mut str)), Class::Reference);
        assert_eq!(class_of(parse_quote!(Rc<str>)), Class::Reference);
        assert_eq!(class_of(parse_quote!(Vec<String>)), Class::Reference);
        assert_eq!(class_of(parse_quote!(std::collections::HashMap<String, u8>)), Class::Reference);
        assert_eq!(class_of(parse_quote!([u8; 4])), Class::Reference);
        assert_eq!(class_of(parse_quote!((u8, u8))), Class::Reference);
        assert_eq!(class_of(parse_quote!(Box<Customer>)), Class::Reference);
    }

    #[test]
    fn derive_rejects_tuple_structs() {
        let input: DeriveInput = parse_quote! {
            struct Pair(u8, u8);
        };
        let err = derive(&input).unwrap_err();
        assert!(err.to_string().contains("named fields"));
    }

    #[test]
    fn derive_emits_reference_for_containers() {
        let input: DeriveInput = parse_quote! {
            struct Order {
                id: u64,
                lines: Vec<String>,
                #[diff(skip)]
                note: String,
            }
        };
        let tokens = derive(&input).unwrap().to_string().replace(' ', "");
        assert!(tokens.contains("reference(\"lines\")"));
        assert!(!tokens.contains("\"note\""));
        assert!(tokens.contains("\"id\""));
    }
}
