//! Checks on the wrapped (underlying) type.
//!
//! # Rationale
//!
//! A value object wraps exactly one primitive value. Wrapping a collection
//! gives equality and hashing semantics the generated code cannot provide,
//! and wrapping the value object itself never terminates.
//!
//! # Detected Patterns
//!
//! ```ignore
//! #[value_object(underlying = Vec<u8>)]   // VG003
//! pub struct Payload;
//!
//! #[value_object(underlying = Self)]      // VG002
//! pub struct Loop;
//! ```

use voguard_core::{CandidateType, Check, Diagnostic, DiagnosticFactory, DiagnosticKind};

/// Check code for underlying-not-collection.
pub const COLLECTION_CODE: &str = "VG003";

/// Check name for underlying-not-collection.
pub const COLLECTION_NAME: &str = "underlying-not-collection";

/// Check code for underlying-not-self.
pub const SELF_CODE: &str = "VG002";

/// Check name for underlying-not-self.
pub const SELF_NAME: &str = "underlying-not-self";

/// Forbids collection or sequence underlying types.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnderlyingNotCollection;

impl UnderlyingNotCollection {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Check for UnderlyingNotCollection {
    fn name(&self) -> &'static str {
        COLLECTION_NAME
    }

    fn kind(&self) -> DiagnosticKind {
        DiagnosticKind::UnderlyingTypeCannotBeCollection
    }

    fn description(&self) -> &'static str {
        "The underlying type must not be a collection"
    }

    fn check(&self, candidate: &CandidateType, factory: &DiagnosticFactory) -> Vec<Diagnostic> {
        candidate
            .config
            .underlying
            .iter()
            .filter(|underlying| underlying.is_collection)
            .map(|underlying| factory.underlying_type_cannot_be_collection(&candidate.symbol, underlying))
            .collect()
    }
}

/// Forbids a value object wrapping itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnderlyingNotSelf;

impl UnderlyingNotSelf {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Check for UnderlyingNotSelf {
    fn name(&self) -> &'static str {
        SELF_NAME
    }

    fn kind(&self) -> DiagnosticKind {
        DiagnosticKind::UnderlyingTypeMustNotBeSameAsValueObject
    }

    fn description(&self) -> &'static str {
        "The underlying type must not be the value object itself"
    }

    fn check(&self, candidate: &CandidateType, factory: &DiagnosticFactory) -> Vec<Diagnostic> {
        match &candidate.config.underlying {
            Some(underlying) if underlying.symbol.name == candidate.name() => {
                vec![factory.underlying_type_must_not_be_same_as_value_object(&candidate.symbol)]
            }
            _ => Vec::new(),
        }
    }
}
