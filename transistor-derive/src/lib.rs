use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Error, Fields, Ident, Result, Variant, parse_macro_input};

// =============================================================================
// Flags derive
// =============================================================================

/// Implements `transistor::Flags` and `From<Self> for transistor::FlagRef`.
///
/// Without explicit discriminants, members resolve by declaration position
/// (`1 << index`). With explicit discriminants on every member, members
/// resolve to those values and the enum needs an unsigned `#[repr]`.
#[proc_macro_derive(Flags)]
pub fn derive_flags(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_flags_impl(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// How members map to flag references.
enum Shape {
    Positional,
    Backed,
}

fn derive_flags_impl(input: DeriveInput) -> Result<TokenStream2> {
    let variants = match &input.data {
        Data::Enum(data) => &data.variants,
        _ => {
            return Err(Error::new_spanned(
                &input,
                "Flags can only be derived for enums",
            ));
        }
    };

    if variants.is_empty() {
        return Err(Error::new_spanned(
            &input,
            "Flags requires at least one variant",
        ));
    }

    for variant in variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(Error::new_spanned(
                variant,
                "Flags variants cannot have fields",
            ));
        }
    }

    let variants: Vec<&Variant> = variants.iter().collect();
    let shape = parse_shape(&input, &variants)?;

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let all = variants.iter().map(|v| {
        let variant_name = &v.ident;
        quote! { #name::#variant_name, }
    });

    let name_arms = variants.iter().map(|v| {
        let variant_name = &v.ident;
        let label = variant_name.to_string();
        quote! { #name::#variant_name => #label, }
    });

    let ref_arms: Vec<TokenStream2> = match shape {
        Shape::Positional => variants
            .iter()
            .enumerate()
            .map(|(ordinal, v)| {
                let variant_name = &v.ident;
                let ordinal = ordinal as u32;
                quote! {
                    #name::#variant_name => ::transistor::FlagRef::positional(#ordinal),
                }
            })
            .collect(),
        Shape::Backed => variants
            .iter()
            .map(|v| {
                let variant_name = &v.ident;
                quote! {
                    #name::#variant_name => ::transistor::FlagRef::backed(#name::#variant_name as u64),
                }
            })
            .collect(),
    };

    Ok(quote! {
        impl #impl_generics ::transistor::Flags for #name #ty_generics #where_clause {
            const ALL: &'static [Self] = &[#(#all)*];

            #[inline]
            fn name(self) -> &'static str {
                match self {
                    #(#name_arms)*
                }
            }

            #[inline]
            fn flag_ref(self) -> ::transistor::FlagRef {
                match self {
                    #(#ref_arms)*
                }
            }
        }

        impl #impl_generics ::core::convert::From<#name #ty_generics> for ::transistor::FlagRef #where_clause {
            #[inline]
            fn from(flag: #name #ty_generics) -> Self {
                <#name #ty_generics as ::transistor::Flags>::flag_ref(flag)
            }
        }
    })
}

// =============================================================================
// Shape detection
// =============================================================================

fn parse_shape(input: &DeriveInput, variants: &[&Variant]) -> Result<Shape> {
    let explicit = variants
        .iter()
        .filter(|v| v.discriminant.is_some())
        .count();

    if explicit == 0 {
        if variants.len() > 64 {
            return Err(Error::new_spanned(
                input,
                format!(
                    "Flags supports at most 64 positional variants, found {}",
                    variants.len()
                ),
            ));
        }
        return Ok(Shape::Positional);
    }

    if explicit != variants.len() {
        let implicit = variants
            .iter()
            .find(|v| v.discriminant.is_none())
            .map(|v| &v.ident);
        return Err(Error::new_spanned(
            implicit,
            "Flags requires either all or no variants to declare a value",
        ));
    }

    parse_unsigned_repr(input)?;
    Ok(Shape::Backed)
}

fn parse_unsigned_repr(input: &DeriveInput) -> Result<Ident> {
    for attr in &input.attrs {
        if attr.path().is_ident("repr") {
            let repr: Ident = attr.parse_args()?;
            match repr.to_string().as_str() {
                "u8" | "u16" | "u32" | "u64" => {
                    return Ok(repr);
                }
                _ => {
                    return Err(Error::new_spanned(
                        repr,
                        "Flags with declared values requires repr(u8), repr(u16), repr(u32), or repr(u64)",
                    ));
                }
            }
        }
    }

    Err(Error::new_spanned(
        input,
        "Flags with declared values requires a #[repr(u8/u16/u32/u64)] attribute",
    ))
}
