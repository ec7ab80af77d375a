//! The `Check` capability implemented by every validation rule.

use crate::descriptor::DiagnosticKind;
use crate::diagnostic::Diagnostic;
use crate::factory::DiagnosticFactory;
use crate::model::CandidateType;

/// One validation rule over one candidate value object.
///
/// Checks are pure: the same candidate always yields the same diagnostics,
/// in the same order, and a check never fails. A check that finds nothing
/// returns an empty vector.
///
/// # Example
///
/// ```ignore
/// use voguard_core::{CandidateType, Check, Diagnostic, DiagnosticFactory, DiagnosticKind};
///
/// pub struct NoNesting;
///
/// impl Check for NoNesting {
///     fn name(&self) -> &'static str { "no-nesting" }
///     fn kind(&self) -> DiagnosticKind { DiagnosticKind::TypeCannotBeNested }
///
///     fn check(&self, candidate: &CandidateType, factory: &DiagnosticFactory) -> Vec<Diagnostic> {
///         candidate
///             .container
///             .iter()
///             .map(|c| factory.type_cannot_be_nested(&candidate.symbol, c))
///             .collect()
///     }
/// }
/// ```
pub trait Check: Send + Sync {
    /// Returns the kebab-case name of this check (e.g., "no-nesting").
    fn name(&self) -> &'static str;

    /// Returns the diagnostic kind this check reports.
    fn kind(&self) -> DiagnosticKind;

    /// Returns a brief description of what this check enforces.
    fn description(&self) -> &'static str {
        ""
    }

    /// Inspects one candidate and returns its violations.
    fn check(&self, candidate: &CandidateType, factory: &DiagnosticFactory) -> Vec<Diagnostic>;
}

/// Type alias for boxed `Check` trait objects.
pub type CheckBox = Box<dyn Check>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Symbol;
    use crate::types::Location;

    struct AlwaysInvalidConversions;

    impl Check for AlwaysInvalidConversions {
        fn name(&self) -> &'static str {
            "always-invalid"
        }
        fn kind(&self) -> DiagnosticKind {
            DiagnosticKind::InvalidConversions
        }

        fn check(&self, _candidate: &CandidateType, factory: &DiagnosticFactory) -> Vec<Diagnostic> {
            vec![factory.invalid_conversions(Location::None)]
        }
    }

    #[test]
    fn check_trait_defaults() {
        let check = AlwaysInvalidConversions;
        assert_eq!(check.name(), "always-invalid");
        assert_eq!(check.description(), "");

        let found = check.check(
            &CandidateType::new(Symbol::new("Id")),
            &DiagnosticFactory::default(),
        );
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind(), check.kind());
    }
}
