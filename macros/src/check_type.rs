use syn::{GenericArgument, PathArguments, Type};

fn last_segment_args<'a>(ty: &'a Type, ident: &str) -> Option<&'a PathArguments> {
    let Type::Path(p) = ty else {
        return None;
    };
    let last = p.path.segments.last()?;
    (last.ident == ident).then_some(&last.arguments)
}

fn first_type_arg<'a>(args: &'a PathArguments) -> Option<&'a Type> {
    let PathArguments::AngleBracketed(args) = args else {
        return None;
    };

    args.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    })
}

pub fn extract_option_inner_type(ty: &Type) -> Option<&Type> {
    first_type_arg(last_segment_args(ty, "Option")?)
}

pub fn is_str_type(ty: &Type) -> bool {
    match ty {
        Type::Reference(r) => matches!(&*r.elem, Type::Path(p) if p.path.is_ident("str")),
        _ => false,
    }
}

pub fn is_string_type(ty: &Type) -> bool {
    last_segment_args(ty, "String").is_some()
}

pub fn is_cow_str_type(ty: &Type) -> bool {
    last_segment_args(ty, "Cow")
        .and_then(first_type_arg)
        .is_some_and(|inner| matches!(inner, Type::Path(p) if p.path.is_ident("str")))
}

fn is_message_type(ty: &Type) -> bool {
    last_segment_args(ty, "Message").is_some()
}

pub fn is_message_slice_type(ty: &Type) -> bool {
    match ty {
        Type::Reference(r) => matches!(&*r.elem, Type::Slice(s) if is_message_type(&s.elem)),
        _ => false,
    }
}

pub fn is_vec_message_type(ty: &Type) -> bool {
    last_segment_args(ty, "Vec")
        .and_then(first_type_arg)
        .is_some_and(is_message_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_recognizes_string_like_types() {
        assert!(is_str_type(&parse_quote!(&'a str)));
        assert!(is_string_type(&parse_quote!(String)));
        assert!(is_cow_str_type(&parse_quote!(std::borrow::Cow<'a, str>)));
        assert!(!is_cow_str_type(&parse_quote!(Cow<'a, [Message]>)));
        assert!(!is_str_type(&parse_quote!(usize)));
    }

    #[test]
    fn test_recognizes_message_collections() {
        assert!(is_message_slice_type(&parse_quote!(&'a [Message])));
        assert!(is_vec_message_type(&parse_quote!(Vec<Message>)));
        assert!(!is_vec_message_type(&parse_quote!(Vec<String>)));
    }

    #[test]
    fn test_extracts_option_inner_type() {
        let ty: Type = parse_quote!(Option<&'a str>);
        let inner = extract_option_inner_type(&ty).unwrap();
        assert!(is_str_type(inner));
        assert!(extract_option_inner_type(&parse_quote!(String)).is_none());
    }
}
