//! Derive macros for argbind
//!
//! This crate provides `#[derive(Bind)]`, generating code that fills a struct
//! from an `argbind::Registry`.
//!
//! # Usage
//!
//! ```text
//! use argbind::Bind;
//!
//! #[derive(Bind, Default)]
//! struct ServerConfig {
//!     #[config("port")]
//!     port: u16,
//!
//!     #[config(key = "s3_bucket")]
//!     bucket: Option<String>,
//!
//!     #[config(flatten)]
//!     limits: Limits,
//! }
//! ```

use proc_macro::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Expr, Fields, Lit, LitStr, Meta, parse_macro_input};

/// Derive macro for generating `argbind::Bind` implementations.
///
/// # Field attributes (`#[config(...)]`)
/// - `"key"` or `key = "key"` - Argument name to bind from (case-insensitive)
/// - `flatten` - Delegate to the field's own `Bind` implementation
///
/// Fields without `#[config]` are left untouched.
#[proc_macro_derive(Bind, attributes(config))]
pub fn derive_bind(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Bind can only be derived for structs with named fields.\n\nExample:\n  #[derive(Bind)]\n  struct MyConfig {\n      #[config(\"port\")]\n      port: u16,\n  }",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Bind can only be derived for structs.\n\nTry: #[derive(Bind)] on a struct, not an enum or union.",
            ));
        }
    };

    let mut statements = Vec::new();

    for field in fields {
        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };
        let field_label = field_name.to_string();

        match parse_field_attrs(&field.attrs)? {
            FieldBinding::None => {}
            FieldBinding::Key(key) => statements.push(quote! {
                registry.bind_field(#key, #field_label, &mut self.#field_name)?;
            }),
            FieldBinding::Flatten => statements.push(quote! {
                ::argbind::Bind::bind_from(&mut self.#field_name, registry)?;
            }),
        }
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::argbind::Bind for #name #ty_generics #where_clause {
            fn bind_from(&mut self, registry: &::argbind::Registry) -> ::argbind::Result<()> {
                #(#statements)*
                Ok(())
            }
        }
    })
}

/// How one field takes part in binding
enum FieldBinding {
    None,
    Key(String),
    Flatten,
}

fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldBinding> {
    let mut binding = FieldBinding::None;

    for attr in attrs {
        if !attr.path().is_ident("config") {
            continue;
        }
        if !matches!(binding, FieldBinding::None) {
            return Err(syn::Error::new_spanned(
                attr,
                "only one #[config(...)] attribute is allowed per field",
            ));
        }

        // #[config("key")]
        if let Ok(key) = attr.parse_args::<LitStr>() {
            binding = key_binding(&key)?;
            continue;
        }

        let nested = attr.parse_args_with(
            syn::punctuated::Punctuated::<Meta, syn::Token![,]>::parse_terminated,
        )?;
        for meta in nested {
            match meta {
                Meta::Path(path) if path.is_ident("flatten") => {
                    binding = FieldBinding::Flatten;
                }
                Meta::NameValue(nv) if nv.path.is_ident("key") => match &nv.value {
                    Expr::Lit(lit) => match &lit.lit {
                        Lit::Str(s) => binding = key_binding(s)?,
                        _ => {
                            return Err(syn::Error::new_spanned(
                                &nv.value,
                                "#[config(key)] must be a string literal.\n\nExample: #[config(key = \"port\")]",
                            ));
                        }
                    },
                    other => {
                        return Err(syn::Error::new_spanned(
                            other,
                            "#[config(key)] must be a string literal.\n\nExample: #[config(key = \"port\")]",
                        ));
                    }
                },
                other => {
                    return Err(syn::Error::new_spanned(
                        other,
                        "unknown #[config] option, expected \"key\", key = \"...\" or flatten",
                    ));
                }
            }
        }
    }

    Ok(binding)
}

fn key_binding(key: &LitStr) -> syn::Result<FieldBinding> {
    let value = key.value();
    if value.is_empty() {
        return Err(syn::Error::new_spanned(key, "#[config] key cannot be empty"));
    }
    Ok(FieldBinding::Key(value))
}
