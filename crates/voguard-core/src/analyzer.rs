//! Runs checks over candidate value objects.

use crate::check::{Check, CheckBox};
use crate::descriptor::DescriptorTable;
use crate::factory::DiagnosticFactory;
use crate::model::CandidateType;
use crate::sink::DiagnosticSink;
use crate::types::Location;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// Produces generated code for a candidate that passed validation.
pub trait Emitter {
    /// What emission produces, e.g. a token stream or source text.
    type Output;

    /// Emits code for `candidate`. Only called when its sink has no errors.
    fn emit(&self, candidate: &CandidateType) -> Self::Output;
}

/// Diagnostics for one candidate.
#[derive(Debug, Clone, Serialize)]
pub struct TypeReport {
    /// Value object name.
    pub name: String,
    /// Where the value object is declared.
    pub location: Location,
    /// Everything reported for it.
    pub diagnostics: DiagnosticSink,
}

impl TypeReport {
    /// Whether generation may proceed for this type.
    #[must_use]
    pub fn can_emit(&self) -> bool {
        self.diagnostics.allows_emission()
    }
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    checks: Vec<CheckBox>,
    parallelism: Option<usize>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a check. Checks run in the order they were added.
    #[must_use]
    pub fn check<C: Check + 'static>(mut self, check: C) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    /// Appends a boxed check.
    #[must_use]
    pub fn check_box(mut self, check: CheckBox) -> Self {
        self.checks.push(check);
        self
    }

    /// Appends boxed checks in order.
    #[must_use]
    pub fn checks<I: IntoIterator<Item = CheckBox>>(mut self, checks: I) -> Self {
        self.checks.extend(checks);
        self
    }

    /// Sets how many worker threads [`Analyzer::analyze_all`] may use.
    #[must_use]
    pub fn parallelism(mut self, workers: Option<usize>) -> Self {
        self.parallelism = workers;
        self
    }

    /// Builds the analyzer.
    ///
    /// With more than one worker a thread pool is started here. If it
    /// cannot be started the analyzer runs sequentially.
    #[must_use]
    pub fn build(self) -> Analyzer {
        let workers = self.parallelism.unwrap_or(1).max(1);
        let pool = if workers > 1 {
            match ThreadPoolBuilder::new().num_threads(workers).build() {
                Ok(pool) => Some(pool),
                Err(e) => {
                    warn!("Failed to start {workers} analysis workers, running sequentially: {e}");
                    None
                }
            }
        } else {
            None
        };

        Analyzer {
            factory: DiagnosticFactory::new(DescriptorTable::standard()),
            checks: self.checks,
            pool,
        }
    }
}

/// Runs a fixed, ordered list of checks over candidates.
///
/// Use [`Analyzer::builder()`] to construct an instance. The analyzer holds no
/// mutable state and can be shared across threads.
pub struct Analyzer {
    factory: DiagnosticFactory,
    checks: Vec<CheckBox>,
    pool: Option<ThreadPool>,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the number of registered checks.
    #[must_use]
    pub fn check_count(&self) -> usize {
        self.checks.len()
    }

    /// Names of the registered checks, in run order.
    #[must_use]
    pub fn check_names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    /// Runs every check once, in order, into a fresh sink.
    ///
    /// A failing check never stops later checks.
    #[must_use]
    pub fn analyze(&self, candidate: &CandidateType) -> DiagnosticSink {
        let mut sink = DiagnosticSink::new();

        for check in &self.checks {
            let found = check.check(candidate, &self.factory);
            if !found.is_empty() {
                debug!(
                    "{}: {} reported {} diagnostic(s)",
                    candidate.name(),
                    check.name(),
                    found.len()
                );
            }
            sink.extend(found);
        }

        sink
    }

    /// Analyzes one candidate and wraps the result in a [`TypeReport`].
    #[must_use]
    pub fn report(&self, candidate: &CandidateType) -> TypeReport {
        TypeReport {
            name: candidate.name().to_string(),
            location: candidate
                .symbol
                .preferred_locations()
                .into_iter()
                .next()
                .unwrap_or_default(),
            diagnostics: self.analyze(candidate),
        }
    }

    /// Analyzes many candidates, one sink each, in input order.
    ///
    /// `cancelled` is read between candidates only; a candidate that has
    /// started is always finished. The result stops at the first candidate
    /// not reached. A panicking check panics the caller.
    #[must_use]
    pub fn analyze_all(&self, candidates: &[CandidateType], cancelled: &AtomicBool) -> Vec<TypeReport> {
        let reports = match &self.pool {
            Some(pool) if candidates.len() > 1 => {
                let reports: Vec<Option<TypeReport>> = pool.install(|| {
                    candidates
                        .par_iter()
                        .map(|candidate| (!cancelled.load(Ordering::Relaxed)).then(|| self.report(candidate)))
                        .collect()
                });
                reports.into_iter().map_while(|report| report).collect()
            }
            _ => {
                let mut reports = Vec::with_capacity(candidates.len());
                for candidate in candidates {
                    if cancelled.load(Ordering::Relaxed) {
                        break;
                    }
                    reports.push(self.report(candidate));
                }
                reports
            }
        };

        info!(
            "Analyzed {} of {} value object(s)",
            reports.len(),
            candidates.len()
        );
        reports
    }

    /// Validates `candidate` and emits code only if no error was reported.
    ///
    /// # Errors
    ///
    /// Returns the populated sink when it contains an error.
    pub fn generate<E: Emitter>(
        &self,
        candidate: &CandidateType,
        emitter: &E,
    ) -> Result<(E::Output, DiagnosticSink), DiagnosticSink> {
        let sink = self.analyze(candidate);
        if sink.has_errors() {
            debug!("{}: generation blocked", candidate.name());
            return Err(sink);
        }
        Ok((emitter.emit(candidate), sink))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::DiagnosticKind;
    use crate::diagnostic::Diagnostic;
    use crate::model::Symbol;

    struct Nested;

    impl Check for Nested {
        fn name(&self) -> &'static str {
            "nested"
        }
        fn kind(&self) -> DiagnosticKind {
            DiagnosticKind::TypeCannotBeNested
        }
        fn check(&self, candidate: &CandidateType, factory: &DiagnosticFactory) -> Vec<Diagnostic> {
            candidate
                .container
                .iter()
                .map(|c| factory.type_cannot_be_nested(&candidate.symbol, c))
                .collect()
        }
    }

    struct Conversions;

    impl Check for Conversions {
        fn name(&self) -> &'static str {
            "conversions"
        }
        fn kind(&self) -> DiagnosticKind {
            DiagnosticKind::InvalidConversions
        }
        fn check(&self, candidate: &CandidateType, factory: &DiagnosticFactory) -> Vec<Diagnostic> {
            candidate
                .config
                .conversions
                .iter()
                .map(|c| factory.invalid_conversions(c.location.clone()))
                .collect()
        }
    }

    struct Name;

    impl Emitter for Name {
        type Output = String;
        fn emit(&self, candidate: &CandidateType) -> String {
            format!("impl {} {{}}", candidate.name())
        }
    }

    fn analyzer() -> Analyzer {
        Analyzer::builder().check(Nested).check(Conversions).build()
    }

    fn nested_with_conversions(name: &str) -> CandidateType {
        CandidateType::new(Symbol::new(name))
            .nested_in(Symbol::new("outer"))
            .conversions(crate::model::RawConversions::Bits(999), Location::None)
    }

    #[test]
    fn runs_checks_in_registration_order() {
        let sink = analyzer().analyze(&nested_with_conversions("Id"));
        let codes: Vec<&str> = sink.iter().map(Diagnostic::code).collect();
        assert_eq!(codes, vec!["VG001", "VG006"]);
        assert!(sink.has_errors());
    }

    #[test]
    fn diagnostics_use_standard_descriptors() {
        let table = DescriptorTable::standard();
        let sink = analyzer().analyze(&nested_with_conversions("Id"));
        for diagnostic in sink.iter() {
            assert_eq!(diagnostic.code(), table.get(diagnostic.kind()).code);
        }
    }

    #[test]
    fn analysis_is_repeatable() {
        let analyzer = analyzer();
        let candidate = nested_with_conversions("Id");
        assert_eq!(analyzer.analyze(&candidate), analyzer.analyze(&candidate));
    }

    #[test]
    fn clean_candidate_can_be_generated() {
        let analyzer = analyzer();
        let (code, sink) = analyzer
            .generate(&CandidateType::new(Symbol::new("Id")), &Name)
            .expect("no errors");
        assert_eq!(code, "impl Id {}");
        assert!(sink.is_empty());
    }

    #[test]
    fn errors_block_generation() {
        let err = analyzer()
            .generate(&nested_with_conversions("Id"), &Name)
            .expect_err("nested type");
        assert_eq!(err.len(), 2);
    }

    #[test]
    fn one_sink_per_candidate() {
        let candidates = vec![
            nested_with_conversions("A"),
            CandidateType::new(Symbol::new("B")),
        ];
        let reports = analyzer().analyze_all(&candidates, &AtomicBool::new(false));
        assert_eq!(reports.len(), 2);
        assert!(!reports[0].can_emit());
        assert!(reports[1].can_emit());
    }

    #[test]
    fn cancellation_stops_before_next_candidate() {
        let candidates = vec![CandidateType::new(Symbol::new("A"))];
        let reports = analyzer().analyze_all(&candidates, &AtomicBool::new(true));
        assert!(reports.is_empty());
    }

    #[test]
    fn parallel_preserves_input_order() {
        let analyzer = Analyzer::builder()
            .check(Nested)
            .parallelism(Some(3))
            .build();
        let candidates: Vec<CandidateType> = (0..10)
            .map(|i| CandidateType::new(Symbol::new(format!("T{i}"))))
            .collect();
        let names: Vec<String> = analyzer
            .analyze_all(&candidates, &AtomicBool::new(false))
            .into_iter()
            .map(|r| r.name)
            .collect();
        let expected: Vec<String> = (0..10).map(|i| format!("T{i}")).collect();
        assert_eq!(names, expected);
    }

    struct FailsOn(&'static str);

    impl Check for FailsOn {
        fn name(&self) -> &'static str {
            "fails-on"
        }
        fn kind(&self) -> DiagnosticKind {
            DiagnosticKind::TypeCannotBeNested
        }
        fn check(&self, candidate: &CandidateType, _: &DiagnosticFactory) -> Vec<Diagnostic> {
            assert_ne!(candidate.name(), self.0, "check failed on {}", self.0);
            Vec::new()
        }
    }

    #[test]
    #[should_panic(expected = "check failed on T3")]
    fn parallel_check_panic_reaches_caller() {
        let analyzer = Analyzer::builder()
            .check(FailsOn("T3"))
            .parallelism(Some(4))
            .build();
        let candidates: Vec<CandidateType> = (0..8)
            .map(|i| CandidateType::new(Symbol::new(format!("T{i}"))))
            .collect();
        let _ = analyzer.analyze_all(&candidates, &AtomicBool::new(false));
    }

    #[test]
    fn parallel_cancellation_reports_nothing() {
        let analyzer = Analyzer::builder().check(Nested).parallelism(Some(2)).build();
        let candidates: Vec<CandidateType> = (0..4)
            .map(|i| CandidateType::new(Symbol::new(format!("T{i}"))))
            .collect();
        assert!(analyzer.analyze_all(&candidates, &AtomicBool::new(true)).is_empty());
    }
}
