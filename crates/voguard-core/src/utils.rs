//! Utility functions for working with `syn` trees.

pub mod attributes;
pub mod paths;

#[doc(inline)]
pub use attributes::{find_attrs, has_attr, has_derive};
#[doc(inline)]
pub use paths::{last_segment, path_to_string, type_to_string};
