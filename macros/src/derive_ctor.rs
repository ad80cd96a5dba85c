use proc_macro_error2::{Diagnostic, Level};
use quote::{format_ident, quote};
use syn::spanned::Spanned;

use crate::{
    attr::{extract_attr, get_chain_struct_attrs},
    crate_path::default_crate_path,
};

pub fn derive_ctor(input: syn::DeriveInput) -> Result<proc_macro2::TokenStream, Diagnostic> {
    let struct_name = &input.ident;
    let ctor_struct_name = format_ident!("{struct_name}Ctor");

    let crate_path = extract_attr(&input.attrs, get_chain_struct_attrs)?
        .crate_path
        .unwrap_or_else(default_crate_path);

    if let Some(param) = input.generics.type_params().next() {
        return Err(Diagnostic::spanned(
            param.span(),
            Level::Error,
            "Ctor can only be derived for structs without type parameters".into(),
        ));
    }

    let target_generics = match input.generics.lifetimes().count() {
        0 => quote! {},
        1 => quote! { <'a> },
        _ => {
            return Err(Diagnostic::spanned(
                input.generics.span(),
                Level::Error,
                "Ctor can only be derived for structs with at most one lifetime".into(),
            ))
        }
    };

    let vis = &input.vis;
    let expanded = quote! {
        #vis struct #ctor_struct_name;

        #[automatically_derived]
        impl #crate_path::schemas::InputCtor for #ctor_struct_name {
            type Target<'a> = #struct_name #target_generics;
        }
    };

    Ok(expanded)
}
