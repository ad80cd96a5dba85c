use proc_macro_error2::{Diagnostic, Level};
use syn::{spanned::Spanned, Data, DeriveInput, Fields, FieldsNamed, LitStr};

pub fn get_fields(input: &DeriveInput) -> Result<&FieldsNamed, Diagnostic> {
    match &input.data {
        Data::Struct(data_struct) => match &data_struct.fields {
            Fields::Named(fields_named) => Ok(fields_named),
            other => Err(Diagnostic::spanned(
                other.span(),
                Level::Error,
                "ChainInput can only be derived for structs with named fields".into(),
            )),
        },
        _ => Err(Diagnostic::spanned(
            input.ident.span(),
            Level::Error,
            "ChainInput can only be derived for structs".into(),
        )),
    }
}

pub fn get_renamed_key(field: &syn::Field, rename: &Option<LitStr>) -> Result<String, Diagnostic> {
    if let Some(rename) = rename {
        return Ok(rename.value());
    }

    field
        .ident
        .as_ref()
        .map(ToString::to_string)
        .ok_or_else(|| {
            Diagnostic::spanned(field.span(), Level::Error, "Field must be named".into())
        })
}
