//! Attribute lookup utilities.

use syn::{Attribute, Meta};

/// Checks if attributes contain a specific attribute.
///
/// Matches both `#[name]` and `#[some::path::name]`.
#[must_use]
pub fn has_attr(attrs: &[Attribute], name: &str) -> bool {
    find_attrs(attrs, name).next().is_some()
}

/// Iterates attributes whose path ends in `name`, in source order.
pub fn find_attrs<'a>(attrs: &'a [Attribute], name: &'a str) -> impl Iterator<Item = &'a Attribute> {
    attrs.iter().filter(move |attr| {
        attr.path()
            .segments
            .last()
            .is_some_and(|seg| seg.ident == name)
    })
}

/// Checks if a `#[derive(...)]` lists a trait whose path ends in `name`.
///
/// `has_derive(attrs, "Error")` matches `#[derive(Error)]` and
/// `#[derive(thiserror::Error)]`.
#[must_use]
pub fn has_derive(attrs: &[Attribute], name: &str) -> bool {
    for attr in attrs {
        if !attr.path().is_ident("derive") {
            continue;
        }
        let Meta::List(list) = &attr.meta else {
            continue;
        };

        let mut found = false;
        let _ = list.parse_nested_meta(|meta| {
            if meta.path.segments.last().is_some_and(|seg| seg.ident == name) {
                found = true;
            }
            Ok(())
        });
        if found {
            return true;
        }
    }

    false
}
