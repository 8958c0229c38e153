//! RawBacked derive macro implementation

use std::collections::HashSet;

use heck::{ToKebabCase, ToLowerCamelCase, ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Attribute, Data, DataEnum, DeriveInput, Fields, LitStr, Type, parse_macro_input};

/// Implementation of the RawBacked derive macro
pub fn derive_raw_backed_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let Data::Enum(data_enum) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "RawBacked can only be derived for enums",
        ));
    };

    if let Some(variant) = data_enum
        .variants
        .iter()
        .find(|variant| !matches!(variant.fields, Fields::Unit))
    {
        return Err(syn::Error::new_spanned(
            variant,
            "RawBacked can only be derived for enums with unit variants",
        ));
    }

    let options = ContainerOptions::parse(&input.attrs)?;
    let body = match &options.repr {
        Some(repr) => integer_backed(repr, data_enum)?,
        None => string_backed(options.rename_all, data_enum)?,
    };

    let enum_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::json_mapper::RawBacked for #enum_name #ty_generics #where_clause {
            #body
        }
    })
}

/// Naming rule applied to variant names of string-backed enums
#[derive(Clone, Copy)]
enum RenameRule {
    SnakeCase,
    CamelCase,
    PascalCase,
    KebabCase,
    ScreamingSnakeCase,
    Lowercase,
}

impl RenameRule {
    fn parse(rule: &str) -> Option<Self> {
        match rule {
            "snake_case" => Some(Self::SnakeCase),
            "camelCase" => Some(Self::CamelCase),
            "PascalCase" => Some(Self::PascalCase),
            "kebab-case" => Some(Self::KebabCase),
            "SCREAMING_SNAKE_CASE" => Some(Self::ScreamingSnakeCase),
            "lowercase" => Some(Self::Lowercase),
            _ => None,
        }
    }

    fn apply(self, name: &str) -> String {
        match self {
            Self::SnakeCase => name.to_snake_case(),
            Self::CamelCase => name.to_lower_camel_case(),
            Self::PascalCase => name.to_upper_camel_case(),
            Self::KebabCase => name.to_kebab_case(),
            Self::ScreamingSnakeCase => name.to_shouty_snake_case(),
            Self::Lowercase => name.to_lowercase(),
        }
    }
}

/// Options from the container-level `#[raw_backed(...)]` attribute
struct ContainerOptions {
    repr:       Option<Type>,
    rename_all: RenameRule,
}

impl ContainerOptions {
    fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut repr = None;
        let mut rename_all = RenameRule::SnakeCase;

        for attr in attrs.iter().filter(|attr| attr.path().is_ident("raw_backed")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("repr") {
                    let s: LitStr = meta.value()?.parse()?;
                    repr = Some(s.parse::<Type>()?);
                    Ok(())
                } else if meta.path.is_ident("rename_all") {
                    let s: LitStr = meta.value()?.parse()?;
                    rename_all = RenameRule::parse(&s.value()).ok_or_else(|| {
                        syn::Error::new_spanned(
                            &s,
                            format!("unsupported rename_all rule '{}'", s.value()),
                        )
                    })?;
                    Ok(())
                } else {
                    Err(meta.error("unsupported raw_backed attribute"))
                }
            })?;
        }

        Ok(Self { repr, rename_all })
    }
}

/// Extract the `#[raw(value = "...")]` override of a variant
fn raw_override(attrs: &[Attribute]) -> syn::Result<Option<LitStr>> {
    let mut value = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("raw")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("value") {
                value = Some(meta.value()?.parse::<LitStr>()?);
                Ok(())
            } else {
                Err(meta.error("unsupported raw attribute"))
            }
        })?;
    }
    Ok(value)
}

fn string_backed(rule: RenameRule, data_enum: &DataEnum) -> syn::Result<TokenStream2> {
    let mut idents = Vec::new();
    let mut raws = Vec::new();
    let mut seen = HashSet::new();

    for variant in &data_enum.variants {
        if let Some((_, discriminant)) = &variant.discriminant {
            return Err(syn::Error::new_spanned(
                discriminant,
                "string-backed variants take their raw value from the name or #[raw(value = \
                 \"...\")]; add #[raw_backed(repr = \"...\")] to back the enum by its discriminants",
            ));
        }

        let raw = raw_override(&variant.attrs)?
            .map_or_else(|| rule.apply(&variant.ident.to_string()), |lit| lit.value());

        if !seen.insert(raw.clone()) {
            return Err(syn::Error::new_spanned(
                variant,
                format!("duplicate raw value '{raw}'"),
            ));
        }

        idents.push(&variant.ident);
        raws.push(raw);
    }

    Ok(quote! {
        type Raw = ::std::string::String;

        fn from_raw_value(raw: &Self::Raw) -> ::core::option::Option<Self> {
            match raw.as_str() {
                #(#raws => ::core::option::Option::Some(Self::#idents),)*
                _ => ::core::option::Option::None,
            }
        }

        fn raw_value(&self) -> Self::Raw {
            match *self {
                #(Self::#idents => ::std::string::String::from(#raws),)*
            }
        }
    })
}

fn integer_backed(repr: &Type, data_enum: &DataEnum) -> syn::Result<TokenStream2> {
    let mut idents = Vec::new();
    let mut discriminants = Vec::new();

    for variant in &data_enum.variants {
        if let Some(lit) = raw_override(&variant.attrs)? {
            return Err(syn::Error::new_spanned(
                lit,
                "integer-backed variants take their raw value from the discriminant",
            ));
        }

        let Some((_, discriminant)) = &variant.discriminant else {
            return Err(syn::Error::new_spanned(
                variant,
                "integer-backed variants need an explicit discriminant",
            ));
        };

        idents.push(&variant.ident);
        discriminants.push(discriminant);
    }

    Ok(quote! {
        type Raw = #repr;

        fn from_raw_value(raw: &Self::Raw) -> ::core::option::Option<Self> {
            #(
                if *raw == (#discriminants) {
                    return ::core::option::Option::Some(Self::#idents);
                }
            )*
            ::core::option::Option::None
        }

        fn raw_value(&self) -> Self::Raw {
            match *self {
                #(Self::#idents => #discriminants,)*
            }
        }
    })
}
