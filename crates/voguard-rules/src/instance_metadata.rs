//! Checks that every `#[instance]` has a name and a value.
//!
//! A key that is missing counts the same as one set to `None`:
//!
//! ```ignore
//! #[value_object(underlying = i32)]
//! #[instance(name = "Unspecified", value = -1)]   // fine
//! #[instance(value = 0)]                          // VG010
//! #[instance(name = "Max", value = None)]         // VG011
//! pub struct Age;
//! ```
//!
//! The diagnostic points at the value object and carries the attribute as a
//! related location.

use voguard_core::{CandidateType, Check, Diagnostic, DiagnosticFactory, DiagnosticKind};

/// Check code for instance-has-name.
pub const NAME_CODE: &str = "VG010";

/// Check name for instance-has-name.
pub const NAME_NAME: &str = "instance-has-name";

/// Check code for instance-has-value.
pub const VALUE_CODE: &str = "VG011";

/// Check name for instance-has-value.
pub const VALUE_NAME: &str = "instance-has-value";

/// Requires a name on every instance.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstanceHasName;

impl InstanceHasName {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Check for InstanceHasName {
    fn name(&self) -> &'static str {
        NAME_NAME
    }

    fn kind(&self) -> DiagnosticKind {
        DiagnosticKind::InstanceCannotHaveNullName
    }

    fn description(&self) -> &'static str {
        "Every #[instance] must have a name"
    }

    fn check(&self, candidate: &CandidateType, factory: &DiagnosticFactory) -> Vec<Diagnostic> {
        candidate
            .instances
            .iter()
            .filter(|instance| instance.name.is_none())
            .map(|instance| factory.instance_cannot_have_null_name(&candidate.symbol, instance))
            .collect()
    }
}

/// Requires a value on every instance.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstanceHasValue;

impl InstanceHasValue {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Check for InstanceHasValue {
    fn name(&self) -> &'static str {
        VALUE_NAME
    }

    fn kind(&self) -> DiagnosticKind {
        DiagnosticKind::InstanceCannotHaveNullValue
    }

    fn description(&self) -> &'static str {
        "Every #[instance] must have a value"
    }

    fn check(&self, candidate: &CandidateType, factory: &DiagnosticFactory) -> Vec<Diagnostic> {
        candidate
            .instances
            .iter()
            .filter(|instance| instance.value.is_none())
            .map(|instance| factory.instance_cannot_have_null_value(&candidate.symbol, instance))
            .collect()
    }
}
