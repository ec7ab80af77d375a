//! Check that a custom validation error type is a real error.
//!
//! `throws = T` makes the generated `try_from` return `Result<Self, T>`,
//! which only composes with `?` and error reporters when `T` implements
//! `std::error::Error`.
//!
//! # Detected Patterns
//!
//! ```ignore
//! pub struct BadId;                       // no `impl Error`
//!
//! #[value_object(throws = BadId)]         // VG012: BadId must implement std::error::Error
//! pub struct CustomerId;
//! ```
//!
//! Types declared outside the project cannot be inspected and are accepted.

use voguard_core::{CandidateType, Check, Diagnostic, DiagnosticFactory, DiagnosticKind};

/// Check code for custom-error-is-error.
pub const CODE: &str = "VG012";

/// Check name for custom-error-is-error.
pub const NAME: &str = "custom-error-is-error";

/// Requires the `throws` type to implement `std::error::Error`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomErrorIsError;

impl CustomErrorIsError {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Check for CustomErrorIsError {
    fn name(&self) -> &'static str {
        NAME
    }

    fn kind(&self) -> DiagnosticKind {
        DiagnosticKind::CustomErrorMustImplementError
    }

    fn description(&self) -> &'static str {
        "Custom validation errors must implement std::error::Error"
    }

    fn check(&self, candidate: &CandidateType, factory: &DiagnosticFactory) -> Vec<Diagnostic> {
        candidate
            .config
            .throws
            .iter()
            .filter(|error| !error.implements_error)
            .map(|error| factory.custom_error_must_implement_error(&error.symbol))
            .collect()
    }
}
