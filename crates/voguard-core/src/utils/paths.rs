//! Path and type rendering utilities.

use quote::ToTokens;
use syn::{
    GenericArgument, Path, PathArguments, PathSegment, ReturnType, TraitBoundModifier, Type, TypeParamBound,
};

/// Converts a syn Path to a string representation.
///
/// # Example
///
/// ```ignore
/// // For path `std::io::Error`
/// let s = path_to_string(&path);
/// assert_eq!(s, "std::io::Error");
/// ```
#[must_use]
pub fn path_to_string(path: &Path) -> String {
    path.segments
        .iter()
        .map(|seg| seg.ident.to_string())
        .collect::<Vec<_>>()
        .join("::")
}

/// Returns the identifier of the last path segment.
#[must_use]
pub fn last_segment(path: &Path) -> Option<String> {
    path.segments.last().map(|seg| seg.ident.to_string())
}

/// Renders a type the way it is usually written, e.g. `Vec<u8>`.
///
/// Common type forms are rendered from the syntax tree; anything else falls
/// back to the token stream.
#[must_use]
pub fn type_to_string(ty: &Type) -> String {
    let mut out = String::new();
    write_type(&mut out, ty);
    out
}

fn write_type(out: &mut String, ty: &Type) {
    match ty {
        Type::Path(p) => {
            if let Some(qself) = &p.qself {
                out.push('<');
                write_type(out, &qself.ty);
                if qself.position > 0 {
                    out.push_str(" as ");
                    write_segments(out, p.path.segments.iter().take(qself.position), p.path.leading_colon.is_some());
                }
                out.push_str(">::");
                write_segments(out, p.path.segments.iter().skip(qself.position), false);
            } else {
                write_segments(out, p.path.segments.iter(), p.path.leading_colon.is_some());
            }
        }
        Type::Reference(r) => {
            out.push('&');
            if let Some(lifetime) = &r.lifetime {
                out.push_str(&lifetime.to_string());
                out.push(' ');
            }
            if r.mutability.is_some() {
                out.push_str("mut ");
            }
            write_type(out, &r.elem);
        }
        Type::Ptr(p) => {
            out.push_str(if p.mutability.is_some() { "*mut " } else { "*const " });
            write_type(out, &p.elem);
        }
        Type::Slice(s) => {
            out.push('[');
            write_type(out, &s.elem);
            out.push(']');
        }
        Type::Array(a) => {
            out.push('[');
            write_type(out, &a.elem);
            out.push_str("; ");
            out.push_str(&a.len.to_token_stream().to_string());
            out.push(']');
        }
        Type::Tuple(t) => {
            out.push('(');
            write_separated(out, t.elems.iter(), ", ", write_type);
            if t.elems.len() == 1 {
                out.push(',');
            }
            out.push(')');
        }
        Type::Paren(p) => {
            out.push('(');
            write_type(out, &p.elem);
            out.push(')');
        }
        Type::Group(g) => write_type(out, &g.elem),
        Type::TraitObject(t) => {
            out.push_str("dyn ");
            write_separated(out, t.bounds.iter(), " + ", write_bound);
        }
        Type::ImplTrait(t) => {
            out.push_str("impl ");
            write_separated(out, t.bounds.iter(), " + ", write_bound);
        }
        Type::Never(_) => out.push('!'),
        Type::Infer(_) => out.push('_'),
        other => out.push_str(&other.to_token_stream().to_string()),
    }
}

fn write_separated<'a, T: 'a>(
    out: &mut String,
    items: impl Iterator<Item = &'a T>,
    separator: &str,
    write: fn(&mut String, &T),
) {
    for (i, item) in items.enumerate() {
        if i > 0 {
            out.push_str(separator);
        }
        write(out, item);
    }
}

fn write_segments<'a>(out: &mut String, segments: impl Iterator<Item = &'a PathSegment>, leading_colon: bool) {
    if leading_colon {
        out.push_str("::");
    }
    for (i, segment) in segments.enumerate() {
        if i > 0 {
            out.push_str("::");
        }
        out.push_str(&segment.ident.to_string());
        match &segment.arguments {
            PathArguments::None => {}
            PathArguments::AngleBracketed(args) => {
                out.push('<');
                write_separated(out, args.args.iter(), ", ", write_generic_argument);
                out.push('>');
            }
            PathArguments::Parenthesized(args) => {
                out.push('(');
                write_separated(out, args.inputs.iter(), ", ", write_type);
                out.push(')');
                if let ReturnType::Type(_, ty) = &args.output {
                    out.push_str(" -> ");
                    write_type(out, ty);
                }
            }
        }
    }
}

fn write_generic_argument(out: &mut String, arg: &GenericArgument) {
    match arg {
        GenericArgument::Lifetime(lifetime) => out.push_str(&lifetime.to_string()),
        GenericArgument::Type(ty) => write_type(out, ty),
        GenericArgument::AssocType(assoc) => {
            out.push_str(&assoc.ident.to_string());
            out.push_str(" = ");
            write_type(out, &assoc.ty);
        }
        other => out.push_str(&other.to_token_stream().to_string()),
    }
}

fn write_bound(out: &mut String, bound: &TypeParamBound) {
    match bound {
        TypeParamBound::Trait(t) => {
            if matches!(t.modifier, TraitBoundModifier::Maybe(_)) {
                out.push('?');
            }
            write_segments(out, t.path.segments.iter(), t.path.leading_colon.is_some());
        }
        TypeParamBound::Lifetime(lifetime) => out.push_str(&lifetime.to_string()),
        other => out.push_str(&other.to_token_stream().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_path_to_string() {
        let path: Path = parse_quote!(std::io::Error);
        assert_eq!(path_to_string(&path), "std::io::Error");
        assert_eq!(last_segment(&path).as_deref(), Some("Error"));
    }

    #[test]
    fn test_type_to_string() {
        let ty: Type = parse_quote!(std::collections::HashMap<String, Vec<u8>>);
        assert_eq!(
            type_to_string(&ty),
            "std::collections::HashMap<String, Vec<u8>>"
        );
        let ty: Type = parse_quote!(&[u8; 4]);
        assert_eq!(type_to_string(&ty), "&[u8; 4]");
    }

    #[test]
    fn test_type_to_string_lifetimes_and_bounds() {
        let cases: [(Type, &str); 7] = [
            (parse_quote!(&'static str), "&'static str"),
            (parse_quote!(&'a mut Vec<&'a str>), "&'a mut Vec<&'a str>"),
            (parse_quote!(Cow<'a, str>), "Cow<'a, str>"),
            (parse_quote!(Box<dyn Error + Send + Sync + 'static>), "Box<dyn Error + Send + Sync + 'static>"),
            (parse_quote!(Box<dyn Fn(u8) -> u8>), "Box<dyn Fn(u8) -> u8>"),
            (parse_quote!(<T as Iterator>::Item), "<T as Iterator>::Item"),
            (parse_quote!((u8,)), "(u8,)"),
        ];
        for (ty, expected) in &cases {
            assert_eq!(type_to_string(ty), *expected);
        }
    }
}
