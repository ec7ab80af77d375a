//! Check that value objects define no constructors of their own.
//!
//! A constructor is an associated function without a receiver that returns
//! the value object, directly or wrapped in `Result`/`Option`. Only the
//! generated `from` may create instances; user checks belong in `validate`.

use voguard_core::{CandidateType, Check, Diagnostic, DiagnosticFactory, DiagnosticKind};

/// Check code for no-user-constructors.
pub const CODE: &str = "VG007";

/// Check name for no-user-constructors.
pub const NAME: &str = "no-user-constructors";

/// Forbids user-written constructors on value objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoUserConstructors;

impl NoUserConstructors {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Check for NoUserConstructors {
    fn name(&self) -> &'static str {
        NAME
    }

    fn kind(&self) -> DiagnosticKind {
        DiagnosticKind::CannotHaveUserConstructors
    }

    fn description(&self) -> &'static str {
        "Value objects must not define their own constructors"
    }

    fn check(&self, candidate: &CandidateType, factory: &DiagnosticFactory) -> Vec<Diagnostic> {
        candidate
            .constructors
            .iter()
            .map(|ctor| factory.cannot_have_user_constructors(ctor))
            .collect()
    }
}
