//! Check that the conversions setting only names known conversions.
//!
//! The value is re-validated here even though configuration defaults were
//! checked when loaded, because attribute values reach the checks as written.

use voguard_core::{
    CandidateType, Check, Conversions, Diagnostic, DiagnosticFactory, DiagnosticKind,
    RawConversions,
};

/// Check code for known-conversions.
pub const CODE: &str = "VG006";

/// Check name for known-conversions.
pub const NAME: &str = "known-conversions";

/// Rejects conversions outside the known set.
#[derive(Debug, Clone, Copy, Default)]
pub struct KnownConversions;

impl KnownConversions {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Interprets a raw conversions value, `None` if any part is unknown.
#[must_use]
pub fn resolve(raw: &RawConversions) -> Option<Conversions> {
    Conversions::resolve(raw)
}

impl Check for KnownConversions {
    fn name(&self) -> &'static str {
        NAME
    }

    fn kind(&self) -> DiagnosticKind {
        DiagnosticKind::InvalidConversions
    }

    fn description(&self) -> &'static str {
        "Conversions must be drawn from the known set"
    }

    fn check(&self, candidate: &CandidateType, factory: &DiagnosticFactory) -> Vec<Diagnostic> {
        match &candidate.config.conversions {
            Some(setting) if resolve(&setting.raw).is_none() => {
                vec![factory.invalid_conversions(setting.location.clone())]
            }
            _ => Vec::new(),
        }
    }
}
