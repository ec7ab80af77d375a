//! The standard check list.

use crate::{
    CustomErrorIsError, InstanceHasName, InstanceHasValue, KnownConversions,
    NoDefaultConstruction, NoDirectConstruction, NoNesting, NoUserConstructors,
    UnderlyingNotCollection, UnderlyingNotSelf, ValidationIsStatic, ValidationReturnsValidation,
};
use voguard_core::{Analyzer, AnalyzerBuilder, CheckBox};

/// Every built-in check, in reporting order:
/// nesting, construction paths, constructors, underlying type, conversions,
/// validation hook, instance metadata, custom error.
#[must_use]
pub fn standard_checks() -> Vec<CheckBox> {
    let checks: [CheckBox; 12] = [
        Box::new(NoNesting::new()),
        Box::new(NoDefaultConstruction::new()),
        Box::new(NoDirectConstruction::new()),
        Box::new(NoUserConstructors::new()),
        Box::new(UnderlyingNotCollection::new()),
        Box::new(UnderlyingNotSelf::new()),
        Box::new(KnownConversions::new()),
        Box::new(ValidationReturnsValidation::new()),
        Box::new(ValidationIsStatic::new()),
        Box::new(InstanceHasName::new()),
        Box::new(InstanceHasValue::new()),
        Box::new(CustomErrorIsError::new()),
    ];
    checks.into()
}

/// An analyzer builder preloaded with [`standard_checks`].
#[must_use]
pub fn standard_analyzer() -> AnalyzerBuilder {
    Analyzer::builder().checks(standard_checks())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use voguard_core::{DescriptorTable, DiagnosticKind};

    #[test]
    fn covers_every_kind_once() {
        let kinds: Vec<DiagnosticKind> = standard_checks().iter().map(|c| c.kind()).collect();
        let unique: HashSet<_> = kinds.iter().collect();
        assert_eq!(kinds.len(), DiagnosticKind::ALL.len());
        assert_eq!(unique.len(), kinds.len());
    }

    #[test]
    fn names_are_unique_and_kebab_case() {
        let checks = standard_checks();
        let names: HashSet<&str> = checks.iter().map(|c| c.name()).collect();
        assert_eq!(names.len(), checks.len());
        assert!(names
            .iter()
            .all(|n| n.chars().all(|c| c.is_ascii_lowercase() || c == '-')));
    }

    #[test]
    fn order_follows_documented_groups() {
        let codes: Vec<&str> = standard_checks()
            .iter()
            .map(|c| DescriptorTable::standard().get(c.kind()).code)
            .collect();
        assert_eq!(
            codes,
            vec![
                "VG001", "VG008", "VG009", "VG007", "VG003", "VG002", "VG006", "VG004", "VG005",
                "VG010", "VG011", "VG012"
            ]
        );
    }

    #[test]
    fn standard_analyzer_runs_all_checks() {
        assert_eq!(standard_analyzer().build().check_count(), 12);
    }
}
