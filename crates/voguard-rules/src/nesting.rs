//! Check that value objects are declared at module level.
//!
//! # Rationale
//!
//! Generated code is emitted next to the declaration. A struct declared
//! inside a function body is invisible to everything outside that body,
//! including the generated impls.
//!
//! # Detected Patterns
//!
//! ```ignore
//! fn build() {
//!     #[value_object]
//!     struct Inner; // VG001: Type 'Inner' cannot be nested - remove it from inside build
//! }
//! ```

use voguard_core::{CandidateType, Check, Diagnostic, DiagnosticFactory, DiagnosticKind};

/// Check code for no-nesting.
pub const CODE: &str = "VG001";

/// Check name for no-nesting.
pub const NAME: &str = "no-nesting";

/// Forbids value objects declared inside another item.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNesting;

impl NoNesting {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Check for NoNesting {
    fn name(&self) -> &'static str {
        NAME
    }

    fn kind(&self) -> DiagnosticKind {
        DiagnosticKind::TypeCannotBeNested
    }

    fn description(&self) -> &'static str {
        "Value objects must be declared at module level"
    }

    fn check(&self, candidate: &CandidateType, factory: &DiagnosticFactory) -> Vec<Diagnostic> {
        candidate
            .container
            .iter()
            .map(|container| factory.type_cannot_be_nested(&candidate.symbol, container))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voguard_core::{extract_source, Argument};

    fn check_code(code: &str) -> Vec<Diagnostic> {
        let candidates = extract_source(code).expect("Failed to parse");
        let factory = DiagnosticFactory::default();
        candidates
            .iter()
            .flat_map(|c| NoNesting::new().check(c, &factory))
            .collect()
    }

    #[test]
    fn test_detects_type_nested_in_function() {
        let diagnostics = check_code(
            r"
fn build() {
    #[value_object]
    struct Inner;
}
",
        );
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code(), CODE);
        assert_eq!(
            diagnostics[0].arguments(),
            &[Argument::symbol("Inner"), Argument::symbol("build")]
        );
        assert_eq!(
            diagnostics[0].message(),
            "Type 'Inner' cannot be nested - remove it from inside build"
        );
    }

    #[test]
    fn test_names_the_method_container() {
        let diagnostics = check_code(
            r"
struct Order;
impl Order {
    fn lines(&self) {
        #[value_object]
        struct LineId;
    }
}
",
        );
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].arguments()[1], Argument::symbol("Order::lines"));
    }

    #[test]
    fn test_allows_module_level_types() {
        let diagnostics = check_code(
            r"
#[value_object]
pub struct CustomerId;

mod inner {
    #[value_object]
    pub struct OrderId;
}
",
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_points_at_the_declaration() {
        let diagnostics = check_code("fn f() {\n    #[value_object]\n    struct Inner;\n}\n");
        let span = diagnostics[0].location().span().expect("has a span");
        assert_eq!(span.line, 3);
    }
}
