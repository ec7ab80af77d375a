//! Checks on the shape of the user validation hook.
//!
//! The generated `from` calls `T::validate(value)` before building an
//! instance, so the hook must be an associated function without a receiver
//! and must return `Validation`.
//!
//! The two requirements are separate checks. A hook that breaks both is
//! reported twice, once per requirement.
//!
//! # Good Patterns
//!
//! ```ignore
//! impl CustomerId {
//!     fn validate(value: u32) -> Validation {
//!         if value == 0 { Validation::invalid("must be positive") } else { Validation::Ok }
//!     }
//! }
//! ```

use voguard_core::{CandidateType, Check, Diagnostic, DiagnosticFactory, DiagnosticKind};

/// Check code for validation-returns-validation.
pub const RETURN_CODE: &str = "VG004";

/// Check name for validation-returns-validation.
pub const RETURN_NAME: &str = "validation-returns-validation";

/// Check code for validation-is-static.
pub const STATIC_CODE: &str = "VG005";

/// Check name for validation-is-static.
pub const STATIC_NAME: &str = "validation-is-static";

/// Type the validation hook must return.
pub const VALIDATION_TYPE: &str = "Validation";

/// Requires the validation hook to return `Validation`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationReturnsValidation;

impl ValidationReturnsValidation {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Check for ValidationReturnsValidation {
    fn name(&self) -> &'static str {
        RETURN_NAME
    }

    fn kind(&self) -> DiagnosticKind {
        DiagnosticKind::ValidationMustReturnValidationType
    }

    fn description(&self) -> &'static str {
        "The validation hook must return Validation"
    }

    fn check(&self, candidate: &CandidateType, factory: &DiagnosticFactory) -> Vec<Diagnostic> {
        candidate
            .validation_hooks
            .iter()
            .filter(|hook| hook.return_type.as_deref() != Some(VALIDATION_TYPE))
            .map(|hook| factory.validation_must_return_validation_type(&hook.symbol))
            .collect()
    }
}

/// Requires the validation hook to take no receiver.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationIsStatic;

impl ValidationIsStatic {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Check for ValidationIsStatic {
    fn name(&self) -> &'static str {
        STATIC_NAME
    }

    fn kind(&self) -> DiagnosticKind {
        DiagnosticKind::ValidationMustBeStatic
    }

    fn description(&self) -> &'static str {
        "The validation hook must not take self"
    }

    fn check(&self, candidate: &CandidateType, factory: &DiagnosticFactory) -> Vec<Diagnostic> {
        candidate
            .validation_hooks
            .iter()
            .filter(|hook| !hook.is_static)
            .map(|hook| factory.validation_must_be_static(&hook.symbol))
            .collect()
    }
}
