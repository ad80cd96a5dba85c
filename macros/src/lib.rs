use proc_macro::TokenStream;
use proc_macro_error2::proc_macro_error;
use syn::{parse_macro_input, DeriveInput};

mod attr;
mod check_type;
mod crate_path;
mod derive_chain_input;
mod derive_ctor;
mod helpers;

/// Derives `ChainInput` for a struct with named fields.
///
/// Only fields annotated with `#[langchain(into = "text")]` or
/// `#[langchain(into = "placeholder")]` are exposed to prompt templates. The
/// template key is the field name, or `#[serde(rename = "...")]` when present.
#[proc_macro_error]
#[proc_macro_derive(ChainInput, attributes(langchain, serde))]
pub fn derive_chain_input(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_chain_input::derive_chain_input(input) {
        Ok(expanded) => expanded.into(),
        Err(diagnostic) => diagnostic.abort(),
    }
}

/// Derives a `{Name}Ctor` marker type implementing `InputCtor`, so chains can be
/// generic over inputs that borrow their data.
#[proc_macro_error]
#[proc_macro_derive(Ctor, attributes(langchain))]
pub fn derive_ctor(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_ctor::derive_ctor(input) {
        Ok(expanded) => expanded.into(),
        Err(diagnostic) => diagnostic.abort(),
    }
}
