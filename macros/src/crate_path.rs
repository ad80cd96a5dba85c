use proc_macro_crate::{crate_name, FoundCrate};
use syn::parse_str;

pub fn default_crate_path() -> syn::Path {
    let path = match (
        crate_name("askdb"),
        std::env::var("CARGO_CRATE_NAME").as_deref(),
    ) {
        (Ok(FoundCrate::Itself), Ok("askdb")) => "crate".to_string(),
        (Ok(FoundCrate::Name(name)), _) => format!("::{name}"),
        _ => "::askdb".to_string(),
    };

    parse_str(&path).unwrap_or_else(|_| syn::parse_quote!(::askdb))
}
