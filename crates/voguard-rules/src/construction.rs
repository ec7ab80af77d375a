//! Checks that value objects are only built through the generated factory.
//!
//! # Rationale
//!
//! A value object is valid by construction: the generated `from` runs the
//! validation hook before handing out an instance. `Default` and direct
//! struct or tuple construction skip that step and produce values nobody
//! validated.
//!
//! # Detected Patterns
//!
//! - `CustomerId::default()`, `<CustomerId as Default>::default()`
//! - `let id: CustomerId = Default::default();`
//! - `CustomerId(42)`, `CustomerId { value: 42 }`
//! - `Self(..)` / `Self { .. }` inside `impl CustomerId`
//!
//! Each call site is reported separately.

use voguard_core::{CandidateType, Check, Diagnostic, DiagnosticFactory, DiagnosticKind};

/// Check code for no-default-construction.
pub const DEFAULT_CODE: &str = "VG008";

/// Check name for no-default-construction.
pub const DEFAULT_NAME: &str = "no-default-construction";

/// Check code for no-direct-construction.
pub const DIRECT_CODE: &str = "VG009";

/// Check name for no-direct-construction.
pub const DIRECT_NAME: &str = "no-direct-construction";

/// Forbids building value objects through `Default`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDefaultConstruction;

impl NoDefaultConstruction {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Check for NoDefaultConstruction {
    fn name(&self) -> &'static str {
        DEFAULT_NAME
    }

    fn kind(&self) -> DiagnosticKind {
        DiagnosticKind::UsingDefaultProhibited
    }

    fn description(&self) -> &'static str {
        "Value objects must not be built through Default"
    }

    fn check(&self, candidate: &CandidateType, factory: &DiagnosticFactory) -> Vec<Diagnostic> {
        candidate
            .default_constructions
            .iter()
            .map(|site| factory.using_default_prohibited(site.clone(), candidate.name()))
            .collect()
    }
}

/// Forbids struct literals and tuple-constructor calls of value objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDirectConstruction;

impl NoDirectConstruction {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Check for NoDirectConstruction {
    fn name(&self) -> &'static str {
        DIRECT_NAME
    }

    fn kind(&self) -> DiagnosticKind {
        DiagnosticKind::UsingNewProhibited
    }

    fn description(&self) -> &'static str {
        "Value objects must be built with the generated `from`"
    }

    fn check(&self, candidate: &CandidateType, factory: &DiagnosticFactory) -> Vec<Diagnostic> {
        candidate
            .direct_constructions
            .iter()
            .map(|site| factory.using_new_prohibited(site.clone(), candidate.name()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voguard_core::{extract_source, Location};

    fn check_code(check: &dyn Check, code: &str) -> Vec<Diagnostic> {
        let candidates = extract_source(code).expect("Failed to parse");
        let factory = DiagnosticFactory::default();
        candidates
            .iter()
            .flat_map(|c| check.check(c, &factory))
            .collect()
    }

    const DECL: &str = "#[value_object(underlying = u32)]\npub struct CustomerId;\n";

    #[test]
    fn test_detects_each_default_site() {
        let code = format!(
            "{DECL}
fn a() -> CustomerId {{ CustomerId::default() }}
fn b() -> CustomerId {{ <CustomerId as Default>::default() }}
fn c() {{ let id: CustomerId = Default::default(); }}
"
        );
        let diagnostics = check_code(&NoDefaultConstruction::new(), &code);
        assert_eq!(diagnostics.len(), 3);
        assert!(diagnostics.iter().all(|d| d.code() == DEFAULT_CODE));
        let lines: Vec<usize> = diagnostics
            .iter()
            .filter_map(|d| d.location().span().map(|s| s.line))
            .collect();
        assert_eq!(lines, vec![4, 5, 6]);
    }

    #[test]
    fn test_detects_direct_construction() {
        let code = format!(
            "{DECL}
fn a() -> CustomerId {{ CustomerId(1) }}
impl CustomerId {{
    fn validate(value: u32) -> Validation {{ let _ = Self {{ 0: value }}; Validation::Ok }}
}}
"
        );
        let diagnostics = check_code(&NoDirectConstruction::new(), &code);
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics.iter().all(|d| d.code() == DIRECT_CODE));
        assert!(diagnostics[0].message().contains("CustomerId"));
    }

    #[test]
    fn test_allows_generated_factory() {
        let code = format!(
            "{DECL}
fn a() -> CustomerId {{ CustomerId::from(1) }}
fn b() -> Result<CustomerId, Error> {{ CustomerId::try_from(1) }}
"
        );
        assert!(check_code(&NoDefaultConstruction::new(), &code).is_empty());
        assert!(check_code(&NoDirectConstruction::new(), &code).is_empty());
    }

    #[test]
    fn test_unrelated_types_are_ignored() {
        let code = format!(
            "{DECL}
fn a() {{ let x = Other::default(); let y = Other(1); }}
"
        );
        assert!(check_code(&NoDefaultConstruction::new(), &code).is_empty());
        assert!(check_code(&NoDirectConstruction::new(), &code).is_empty());
    }

    #[test]
    fn test_sentinel_call_site_is_still_reported() {
        let candidate = CandidateType::new(voguard_core::Symbol::new("CustomerId"))
            .default_construction(Location::None);
        let diagnostics =
            NoDefaultConstruction::new().check(&candidate, &DiagnosticFactory::default());
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].location().is_none());
    }
}
