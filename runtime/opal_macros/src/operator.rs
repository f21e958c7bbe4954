//! `#[derive(Operator)]` implementation.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parse_macro_input, Data, DeriveInput, Fields, GenericArgument, Ident, Index, Member,
    PathArguments, Type,
};

const KINDS: &[&str] = &["IdentityLike", "GetAttrLike", "Other"];

/// Parsed `#[operator(...)]` options.
#[derive(Default)]
struct OperatorAttrs {
    kind: Option<Ident>,
    fallback: bool,
}

/// Main entry point for the Operator derive macro.
pub fn derive_operator(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_operator_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn derive_operator_impl(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    let base = find_base_field(input)?;
    validate_target(input)?;
    let attrs = parse_operator_attrs(input)?;

    let kind = attrs
        .kind
        .unwrap_or_else(|| Ident::new("Other", proc_macro2::Span::call_site()));

    let fallback = if attrs.fallback {
        quote! {
            fn fallback(
                &self,
                inputs: &[::opal_ops::ValueRef],
            ) -> ::opal_ops::FallbackResult {
                <Self as ::opal_ops::Fallback>::compute(self, inputs)
            }
        }
    } else {
        quote! {}
    };

    Ok(quote! {
        #[automatically_derived]
        impl ::opal_ops::OperatorType for #name {
            const KIND: ::opal_ops::Kind = ::opal_ops::Kind::#kind;

            fn type_code() -> ::opal_ops::TypeCode {
                static TYPE_CODE: ::std::sync::OnceLock<::opal_ops::TypeCode> =
                    ::std::sync::OnceLock::new();
                *TYPE_CODE.get_or_init(|| {
                    ::opal_ops::registry().register(::opal_ops::TypeIdentity::of::<Self>())
                })
            }
        }

        #[automatically_derived]
        impl ::opal_ops::Operator for #name {
            #[inline]
            fn typecode(&self) -> ::opal_ops::TypeCode {
                self.#base.code()
            }

            #[inline]
            fn kind(&self) -> ::opal_ops::Kind {
                <Self as ::opal_ops::OperatorType>::KIND
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            #fallback
        }
    })
}

/// Reject inputs whose code could not be unique per concrete type.
fn validate_target(input: &DeriveInput) -> syn::Result<()> {
    // A static inside a generic impl is shared by every instantiation.
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Operator derive does not support generic types; \
             each instantiation would share one type code",
        ));
    }

    Ok(())
}

/// Locate the single `OpBase<Self>` field that registers the type when an
/// instance is built.
fn find_base_field(input: &DeriveInput) -> syn::Result<Member> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Operator derive only supports structs",
        ));
    };

    let fields: Vec<&syn::Field> = match &data.fields {
        Fields::Named(named) => named.named.iter().collect(),
        Fields::Unnamed(unnamed) => unnamed.unnamed.iter().collect(),
        Fields::Unit => Vec::new(),
    };

    let mut base = None;
    for (index, field) in fields.into_iter().enumerate() {
        let Some(arg) = op_base_argument(&field.ty) else {
            continue;
        };
        if !names_self(arg, &input.ident) {
            return Err(syn::Error::new_spanned(
                &field.ty,
                format!("the base field must be `OpBase<Self>` or `OpBase<{}>`", input.ident),
            ));
        }
        if base.is_some() {
            return Err(syn::Error::new_spanned(&field.ty, "duplicate `OpBase` field"));
        }
        base = Some(match &field.ident {
            Some(ident) => Member::Named(ident.clone()),
            None => Member::Unnamed(Index::from(index)),
        });
    }

    base.ok_or_else(|| {
        syn::Error::new_spanned(
            &input.ident,
            "Operator derive requires a field of type `OpBase<Self>`",
        )
    })
}

/// The `T` of a field typed `OpBase<T>` (by last path segment).
fn op_base_argument(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != "OpBase" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first() {
        Some(GenericArgument::Type(arg)) if args.args.len() == 1 => Some(arg),
        _ => None,
    }
}

fn names_self(ty: &Type, name: &Ident) -> bool {
    match ty {
        Type::Path(path) if path.qself.is_none() => {
            path.path.is_ident("Self") || path.path.is_ident(name)
        }
        _ => false,
    }
}

/// Parse every `#[operator(kind = ..., fallback)]` attribute on the type.
fn parse_operator_attrs(input: &DeriveInput) -> syn::Result<OperatorAttrs> {
    let mut attrs = OperatorAttrs::default();

    for attr in &input.attrs {
        if !attr.path().is_ident("operator") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("kind") {
                let kind: Ident = meta.value()?.parse()?;
                if !KINDS.iter().any(|k| kind == *k) {
                    return Err(syn::Error::new_spanned(
                        &kind,
                        format!("unknown operator kind `{kind}`, expected one of {KINDS:?}"),
                    ));
                }
                if attrs.kind.is_some() {
                    return Err(syn::Error::new_spanned(&meta.path, "duplicate `kind`"));
                }
                attrs.kind = Some(kind);
                Ok(())
            } else if meta.path.is_ident("fallback") {
                if attrs.fallback {
                    return Err(meta.error("duplicate `fallback`"));
                }
                attrs.fallback = true;
                Ok(())
            } else {
                Err(meta.error("unsupported operator attribute, expected `kind` or `fallback`"))
            }
        })?;
    }

    Ok(attrs)
}
