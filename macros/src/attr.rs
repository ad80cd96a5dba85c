use proc_macro_error2::{Diagnostic, Level};
use syn::{Attribute, LitStr, Path};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainInputKind {
    Text,
    Placeholder,
}

#[derive(Default)]
pub struct LangchainFieldAttrs {
    pub input_kind: Option<ChainInputKind>,
}

#[derive(Default)]
pub struct SerdeFieldAttrs {
    pub rename: Option<LitStr>,
}

#[derive(Default)]
pub struct LangchainStructAttrs {
    pub crate_path: Option<Path>,
}

pub fn extract_attr<T: Default>(
    attrs: &[Attribute],
    get_attr: impl Fn(&Attribute) -> Result<Option<T>, Diagnostic>,
) -> Result<T, Diagnostic> {
    attrs
        .iter()
        .find_map(|attr| get_attr(attr).transpose())
        .unwrap_or_else(|| Ok(T::default()))
}

fn to_diagnostic(kind: &str, e: syn::Error) -> Diagnostic {
    Diagnostic::spanned(
        e.span(),
        Level::Error,
        format!("Failed to parse {kind} attribute: {e}"),
    )
}

pub fn get_langchain_field_attrs(
    attr: &Attribute,
) -> Result<Option<LangchainFieldAttrs>, Diagnostic> {
    if !attr.path().is_ident("langchain") {
        return Ok(None);
    }

    let mut input_kind = None;
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("into") {
            let lit: LitStr = meta.value()?.parse()?;
            input_kind = match lit.value().as_str() {
                "text" => Some(ChainInputKind::Text),
                "placeholder" => Some(ChainInputKind::Placeholder),
                _ => {
                    return Err(syn::Error::new_spanned(
                        lit,
                        "Invalid value for `#[langchain(into = ...)]`, expected `text` or `placeholder`",
                    ))
                }
            };
            Ok(())
        } else {
            Err(syn::Error::new_spanned(
                meta.path,
                "Unknown key in `#[langchain(...)]`",
            ))
        }
    })
    .map_err(|e| to_diagnostic("langchain", e))?;

    Ok(Some(LangchainFieldAttrs { input_kind }))
}

pub fn get_serde_field_attrs(attr: &Attribute) -> Result<Option<SerdeFieldAttrs>, Diagnostic> {
    if !attr.path().is_ident("serde") {
        return Ok(None);
    }

    let mut rename = None;
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("rename") {
            rename = Some(meta.value()?.parse::<LitStr>()?);
        } else if meta.input.peek(syn::Token![=]) {
            // Other serde keys are not ours to interpret.
            meta.value()?.parse::<syn::Expr>()?;
        }
        Ok(())
    })
    .map_err(|e| to_diagnostic("serde", e))?;

    Ok(Some(SerdeFieldAttrs { rename }))
}

pub fn get_chain_struct_attrs(
    attr: &Attribute,
) -> Result<Option<LangchainStructAttrs>, Diagnostic> {
    if !attr.path().is_ident("langchain") {
        return Ok(None);
    }

    let mut crate_path = None;
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("crate") {
            let lit: LitStr = meta.value()?.parse()?;
            crate_path = Some(lit.parse::<Path>()?);
            Ok(())
        } else {
            Err(syn::Error::new_spanned(meta.path, "Unknown attribute"))
        }
    })
    .map_err(|e| to_diagnostic("langchain", e))?;

    Ok(Some(LangchainStructAttrs { crate_path }))
}
