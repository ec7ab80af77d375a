//! Parsing of `#[value_object(...)]` and `#[instance(...)]` arguments.

use crate::model::RawConversions;
use crate::utils::last_segment;
use quote::ToTokens;
use syn::parse::ParseStream;
use syn::{Attribute, Expr, ExprLit, Lit, LitStr, Meta, Type};
use tracing::warn;

/// Attribute marking a struct as a value object.
pub const VALUE_OBJECT_ATTR: &str = "value_object";

/// Attribute declaring a predefined instance.
pub const INSTANCE_ATTR: &str = "instance";

/// Arguments of one `#[value_object(...)]` attribute.
#[derive(Debug, Default)]
pub struct ValueObjectArgs {
    /// `underlying = ..`
    pub underlying: Option<Type>,
    /// `conversions = ..`, kept as the written expression.
    pub conversions: Option<Expr>,
    /// `throws = ..`
    pub throws: Option<Type>,
}

impl ValueObjectArgs {
    /// Parses the arguments of `attr`. A bare `#[value_object]` has none.
    ///
    /// # Errors
    ///
    /// Returns the syn error for malformed argument syntax.
    pub fn parse(attr: &Attribute) -> syn::Result<Self> {
        let mut args = Self::default();
        if matches!(attr.meta, Meta::Path(_)) {
            return Ok(args);
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("underlying") {
                args.underlying = Some(parse_type_value(meta.value()?)?);
            } else if meta.path.is_ident("conversions") {
                args.conversions = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("throws") {
                args.throws = Some(parse_type_value(meta.value()?)?);
            } else {
                let key = meta.path.to_token_stream().to_string();
                warn!("Ignoring unknown value_object argument `{key}`");
                if meta.input.peek(syn::Token![=]) {
                    let _: Expr = meta.value()?.parse()?;
                }
            }
            Ok(())
        })?;

        Ok(args)
    }
}

/// Accepts either a type (`u32`) or a string holding one (`"u32"`).
fn parse_type_value(input: ParseStream) -> syn::Result<Type> {
    if input.peek(LitStr) {
        let lit: LitStr = input.parse()?;
        lit.parse()
    } else {
        input.parse()
    }
}

/// Reads a conversions expression without judging it.
///
/// Strings split on `|`, integers become bits, paths and `|` chains of paths
/// become their last segments. Anything else is kept as text.
#[must_use]
pub fn raw_conversions(expr: &Expr) -> RawConversions {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Str(s), ..
        }) => RawConversions::Names(s.value().split('|').map(|n| n.trim().to_string()).collect()),
        Expr::Lit(ExprLit {
            lit: Lit::Int(i), ..
        }) => i.base10_parse::<u64>().map_or_else(
            |_| RawConversions::Unparsed(i.to_string()),
            RawConversions::Bits,
        ),
        _ => {
            let mut names = Vec::new();
            if collect_flag_names(expr, &mut names) {
                RawConversions::Names(names)
            } else {
                RawConversions::Unparsed(expr.to_token_stream().to_string())
            }
        }
    }
}

/// Reads a conversions default from configuration text.
#[must_use]
pub fn raw_conversions_from_str(value: &str) -> RawConversions {
    let value = value.trim();
    value.parse::<u64>().map_or_else(
        |_| RawConversions::Names(value.split('|').map(|n| n.trim().to_string()).collect()),
        RawConversions::Bits,
    )
}

fn collect_flag_names(expr: &Expr, names: &mut Vec<String>) -> bool {
    match expr {
        Expr::Path(p) => match last_segment(&p.path) {
            Some(name) => {
                names.push(name);
                true
            }
            None => false,
        },
        Expr::Paren(p) => collect_flag_names(&p.expr, names),
        Expr::Group(g) => collect_flag_names(&g.expr, names),
        Expr::Binary(b) if matches!(b.op, syn::BinOp::BitOr(_)) => {
            collect_flag_names(&b.left, names) && collect_flag_names(&b.right, names)
        }
        _ => false,
    }
}

/// Arguments of one `#[instance(...)]` attribute.
///
/// A key that is missing, or set to `None`, is `None`.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct InstanceArgs {
    /// `name = ..`
    pub name: Option<String>,
    /// `value = ..`
    pub value: Option<String>,
}

impl InstanceArgs {
    /// Parses the arguments of `attr`.
    ///
    /// # Errors
    ///
    /// Returns the syn error for malformed argument syntax.
    pub fn parse(attr: &Attribute) -> syn::Result<Self> {
        let mut args = Self::default();
        if matches!(attr.meta, Meta::Path(_)) {
            return Ok(args);
        }

        attr.parse_nested_meta(|meta| {
            let slot = if meta.path.is_ident("name") {
                &mut args.name
            } else if meta.path.is_ident("value") {
                &mut args.value
            } else {
                return Err(meta.error("expected `name` or `value`"));
            };
            let expr: Expr = meta.value()?.parse()?;
            *slot = instance_text(&expr);
            Ok(())
        })?;

        Ok(args)
    }
}

fn instance_text(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Path(p) if p.path.is_ident("None") => None,
        Expr::Lit(ExprLit {
            lit: Lit::Str(s), ..
        }) => Some(s.value()),
        other => Some(other.to_token_stream().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn parses_all_value_object_arguments() {
        let attr: Attribute = parse_quote!(
            #[value_object(underlying = u32, conversions = "serde | display", throws = IdError)]
        );
        let args = ValueObjectArgs::parse(&attr).expect("parses");
        assert_eq!(
            args.underlying.map(|t| t.to_token_stream().to_string()).as_deref(),
            Some("u32")
        );
        assert!(args.conversions.is_some());
        assert_eq!(
            args.throws.map(|t| t.to_token_stream().to_string()).as_deref(),
            Some("IdError")
        );
    }

    #[test]
    fn accepts_string_types() {
        let attr: Attribute = parse_quote!(#[value_object(underlying = "Vec<u8>")]);
        let args = ValueObjectArgs::parse(&attr).expect("parses");
        assert!(matches!(args.underlying, Some(Type::Path(_))));
    }

    #[test]
    fn bare_attribute_has_no_arguments() {
        let attr: Attribute = parse_quote!(#[value_object]);
        let args = ValueObjectArgs::parse(&attr).expect("parses");
        assert!(args.underlying.is_none());
        assert!(args.conversions.is_none());
        assert!(args.throws.is_none());
    }

    #[test]
    fn unknown_arguments_are_skipped() {
        let attr: Attribute = parse_quote!(#[value_object(customizations = 3, underlying = i64)]);
        let args = ValueObjectArgs::parse(&attr).expect("parses");
        assert!(args.underlying.is_some());
    }

    #[test]
    fn conversions_forms() {
        assert_eq!(
            raw_conversions(&parse_quote!("serde | display")),
            RawConversions::Names(vec!["serde".into(), "display".into()])
        );
        assert_eq!(raw_conversions(&parse_quote!(4242)), RawConversions::Bits(4242));
        assert_eq!(
            raw_conversions(&parse_quote!(Conversions::Serde | Conversions::FromStr)),
            RawConversions::Names(vec!["Serde".into(), "FromStr".into()])
        );
        assert!(matches!(
            raw_conversions(&parse_quote!(make_conversions())),
            RawConversions::Unparsed(_)
        ));
    }

    #[test]
    fn conversions_from_config_text() {
        assert_eq!(raw_conversions_from_str(" 6 "), RawConversions::Bits(6));
        assert_eq!(
            raw_conversions_from_str("serde|sqlx"),
            RawConversions::Names(vec!["serde".into(), "sqlx".into()])
        );
    }

    #[test]
    fn instance_arguments() {
        let attr: Attribute = parse_quote!(#[instance(name = "Unspecified", value = -1)]);
        assert_eq!(
            InstanceArgs::parse(&attr).expect("parses"),
            InstanceArgs {
                name: Some("Unspecified".into()),
                value: Some("- 1".into()),
            }
        );

        let attr: Attribute = parse_quote!(#[instance(name = None, value = 0)]);
        let args = InstanceArgs::parse(&attr).expect("parses");
        assert_eq!(args.name, None);
        assert_eq!(args.value.as_deref(), Some("0"));

        let attr: Attribute = parse_quote!(#[instance(value = 0)]);
        assert_eq!(InstanceArgs::parse(&attr).expect("parses").name, None);
    }
}
