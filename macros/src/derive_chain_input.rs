use proc_macro_error2::{Diagnostic, Level};
use quote::{quote, ToTokens};
use syn::{spanned::Spanned, Field, LitStr};

use crate::{
    attr::{
        extract_attr, get_chain_struct_attrs, get_langchain_field_attrs, get_serde_field_attrs,
        ChainInputKind,
    },
    check_type::{
        extract_option_inner_type, is_cow_str_type, is_message_slice_type, is_str_type,
        is_string_type, is_vec_message_type,
    },
    crate_path::default_crate_path,
    helpers::{get_fields, get_renamed_key},
};

struct ChainInputFieldSpec<'a> {
    field: &'a Field,
    ident: &'a syn::Ident,
    input_kind: ChainInputKind,
    rename: Option<LitStr>,
}

fn generate_text_replacement_conversion(
    spec: &ChainInputFieldSpec<'_>,
) -> proc_macro2::TokenStream {
    let ident = spec.ident;
    let ty = &spec.field.ty;

    if let Some(inner) = extract_option_inner_type(ty) {
        if is_str_type(inner) {
            return quote! { std::borrow::Cow::Borrowed(self.#ident.unwrap_or("")) };
        } else if is_string_type(inner) || is_cow_str_type(inner) {
            return quote! { std::borrow::Cow::Borrowed(self.#ident.as_deref().unwrap_or("")) };
        } else {
            return quote! {
                std::borrow::Cow::Owned(self.#ident.as_ref().map_or_else(String::new, |v| v.to_string()))
            };
        }
    }

    if is_str_type(ty) {
        quote! { std::borrow::Cow::Borrowed(self.#ident) }
    } else if is_string_type(ty) || is_cow_str_type(ty) {
        quote! { std::borrow::Cow::Borrowed(&*self.#ident) }
    } else {
        quote! { std::borrow::Cow::Owned(self.#ident.to_string()) }
    }
}

fn generate_placeholder_replacement_conversion(
    spec: &ChainInputFieldSpec<'_>,
) -> Result<proc_macro2::TokenStream, Diagnostic> {
    let ident = spec.ident;
    let ty = &spec.field.ty;

    if let Some(inner) = extract_option_inner_type(ty) {
        if is_message_slice_type(inner) {
            return Ok(quote! { std::borrow::Cow::Borrowed(self.#ident.unwrap_or(&[])) });
        } else if is_vec_message_type(inner) {
            return Ok(quote! { std::borrow::Cow::Borrowed(self.#ident.as_deref().unwrap_or(&[])) });
        }
    } else if is_message_slice_type(ty) {
        return Ok(quote! { std::borrow::Cow::Borrowed(self.#ident) });
    } else if is_vec_message_type(ty) {
        return Ok(quote! { std::borrow::Cow::Borrowed(self.#ident.as_slice()) });
    }

    Err(Diagnostic::spanned(
        ty.span(),
        Level::Error,
        format!(
            "Unsupported type for placeholder replacement: {}",
            ty.to_token_stream()
        ),
    ))
}

fn generate_replacement(
    spec: &ChainInputFieldSpec<'_>,
) -> Result<proc_macro2::TokenStream, Diagnostic> {
    let key = get_renamed_key(spec.field, &spec.rename)?;
    let value = match spec.input_kind {
        ChainInputKind::Text => generate_text_replacement_conversion(spec),
        ChainInputKind::Placeholder => generate_placeholder_replacement_conversion(spec)?,
    };

    Ok(quote! { (#key, #value) })
}

pub fn derive_chain_input(input: syn::DeriveInput) -> Result<proc_macro2::TokenStream, Diagnostic> {
    let struct_name = &input.ident;
    let fields = &get_fields(&input)?.named;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let crate_path = extract_attr(&input.attrs, get_chain_struct_attrs)?
        .crate_path
        .unwrap_or_else(default_crate_path);

    let mut field_specs = Vec::new();
    for field in fields {
        let langchain_attrs = extract_attr(&field.attrs, get_langchain_field_attrs)?;
        let Some(input_kind) = langchain_attrs.input_kind else {
            continue;
        };
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let serde_attrs = extract_attr(&field.attrs, get_serde_field_attrs)?;
        field_specs.push(ChainInputFieldSpec {
            field,
            ident,
            input_kind,
            rename: serde_attrs.rename,
        });
    }

    let text_replacements = field_specs
        .iter()
        .filter(|f| f.input_kind == ChainInputKind::Text)
        .map(generate_replacement)
        .collect::<Result<Vec<_>, _>>()?;

    let placeholder_replacements = field_specs
        .iter()
        .filter(|f| f.input_kind == ChainInputKind::Placeholder)
        .map(generate_replacement)
        .collect::<Result<Vec<_>, _>>()?;

    let expanded = quote! {
        #[automatically_derived]
        impl #impl_generics #crate_path::schemas::ChainInput for #struct_name #ty_generics
        #where_clause
        {
            fn text_replacements(&self) -> #crate_path::schemas::TextReplacements<'_> {
                std::collections::HashMap::from([
                    #(#text_replacements),*
                ])
            }

            fn placeholder_replacements(&self) -> #crate_path::schemas::PlaceholderReplacements<'_> {
                std::collections::HashMap::from([
                    #(#placeholder_replacements),*
                ])
            }
        }
    };

    Ok(expanded)
}
