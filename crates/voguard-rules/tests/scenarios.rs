//! End-to-end behaviour of the standard checks over source snippets.

use voguard_core::{extract_source, Analyzer, CandidateType, DiagnosticKind, DiagnosticSink, Emitter};
use voguard_rules::standard_analyzer;

fn analyze(code: &str) -> Vec<(String, DiagnosticSink)> {
    let analyzer = standard_analyzer().build();
    extract_source(code)
        .expect("Failed to parse")
        .iter()
        .map(|c| (c.name().to_string(), analyzer.analyze(c)))
        .collect()
}

fn kinds(sink: &DiagnosticSink) -> Vec<DiagnosticKind> {
    sink.iter().map(voguard_core::Diagnostic::kind).collect()
}

struct Names;

impl Emitter for Names {
    type Output = String;

    fn emit(&self, candidate: &CandidateType) -> String {
        format!("impl {} {{}}", candidate.name())
    }
}

#[test]
fn nested_type_reports_inner_and_container() {
    let results = analyze(
        r"
fn setup() {
    #[value_object]
    struct Inner;
}
",
    );
    let (_, sink) = &results[0];
    assert_eq!(kinds(sink), vec![DiagnosticKind::TypeCannotBeNested]);
    let args: Vec<String> = sink.as_slice()[0]
        .arguments()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(args, vec!["Inner", "setup"]);
}

#[test]
fn one_user_constructor_one_diagnostic() {
    let results = analyze(
        r"
#[value_object(underlying = u32)]
pub struct CustomerId;

impl CustomerId {
    pub fn create(value: u32) -> Self { todo!() }
}
",
    );
    let (_, sink) = &results[0];
    assert_eq!(kinds(sink), vec![DiagnosticKind::CannotHaveUserConstructors]);
}

#[test]
fn bad_validation_hook_reports_both_shapes() {
    let results = analyze(
        r"
#[value_object(underlying = u32)]
pub struct CustomerId;

impl CustomerId {
    fn validate(&self, value: u32) -> Result<(), String> { Ok(()) }
}
",
    );
    let (_, sink) = &results[0];
    assert_eq!(
        kinds(sink),
        vec![
            DiagnosticKind::ValidationMustReturnValidationType,
            DiagnosticKind::ValidationMustBeStatic,
        ]
    );
}

#[test]
fn custom_error_gates_emission() {
    let code = r#"
#[value_object(throws = NotAnError)]
pub struct A;

#[value_object(throws = IdError)]
pub struct B;

pub struct NotAnError;

#[derive(Debug, thiserror::Error)]
#[error("bad id")]
pub struct IdError;
"#;
    let analyzer = standard_analyzer().build();
    let candidates = extract_source(code).expect("Failed to parse");

    let blocked = analyzer.generate(&candidates[0], &Names).err().expect("blocked");
    assert_eq!(kinds(&blocked), vec![DiagnosticKind::CustomErrorMustImplementError]);
    assert!(blocked.as_slice()[0].message().contains("NotAnError"));

    let (output, sink) = analyzer.generate(&candidates[1], &Names).expect("emitted");
    assert_eq!(output, "impl B {}");
    assert!(!sink.has_errors());
}

#[test]
fn custom_error_points_at_the_error_type() {
    let code = r"#[value_object(throws = BadId)]
pub struct CustomerId;

pub struct BadId;
";
    let results = analyze(code);
    let (_, sink) = &results[0];
    assert_eq!(kinds(sink), vec![DiagnosticKind::CustomErrorMustImplementError]);

    let span = sink.as_slice()[0].location().span().expect("has a span");
    assert_eq!(span.line, 4);
    assert_eq!(&code[span.offset..span.offset + span.length], "pub struct BadId;");
}

#[test]
fn same_named_type_in_another_module_is_left_alone() {
    let results = analyze(
        r"
mod a {
    #[value_object]
    pub struct Id;
}

mod b {
    pub struct Id(u32);

    impl Id {
        pub fn new() -> Self { Id(0) }
    }

    fn f() -> Id { Id(1) }
}
",
    );
    assert_eq!(results.len(), 1);
    let (name, sink) = &results[0];
    assert_eq!(name, "Id");
    assert!(sink.is_empty(), "{:?}", kinds(sink));
}

#[test]
fn invalid_conversions_reported_alongside_other_violations() {
    let results = analyze(
        r#"
#[value_object(underlying = Vec<u8>, conversions = "json")]
#[instance(value = 1)]
pub struct Payload;

fn make() -> Payload { Payload::default() }
"#,
    );
    let (_, sink) = &results[0];
    assert_eq!(
        kinds(sink),
        vec![
            DiagnosticKind::UsingDefaultProhibited,
            DiagnosticKind::UnderlyingTypeCannotBeCollection,
            DiagnosticKind::InvalidConversions,
            DiagnosticKind::InstanceCannotHaveNullName,
        ]
    );
    let conversions = sink
        .iter()
        .filter(|d| d.kind() == DiagnosticKind::InvalidConversions)
        .count();
    assert_eq!(conversions, 1);
}

#[test]
fn analysis_is_idempotent() {
    let code = r#"
#[value_object(underlying = Self, conversions = 128)]
pub struct Loop;

impl Loop {
    pub fn new() -> Self { Loop(1) }
    fn validate(&self) -> bool { true }
}
"#;
    assert_eq!(analyze(code), analyze(code));
}

#[test]
fn clean_type_can_emit() {
    let results = analyze(
        r#"
#[value_object(underlying = u64, conversions = "serde | display")]
#[instance(name = "Zero", value = 0)]
pub struct OrderId;

impl OrderId {
    fn validate(value: u64) -> Validation { Validation::Ok }
}

fn make() -> OrderId { OrderId::from(7) }
"#,
    );
    let (name, sink) = &results[0];
    assert_eq!(name, "OrderId");
    assert!(sink.is_empty());
    assert!(sink.allows_emission());
}

#[test]
fn parallel_analysis_matches_sequential() {
    let code = r"
#[value_object(underlying = Vec<u8>)] pub struct A;
#[value_object] pub struct B;
#[value_object(throws = C)] pub struct C;
#[value_object(conversions = 999)] pub struct D;
";
    let candidates = extract_source(code).expect("Failed to parse");
    let cancelled = std::sync::atomic::AtomicBool::new(false);

    let sequential = standard_analyzer().build().analyze_all(&candidates, &cancelled);
    let parallel = Analyzer::builder()
        .checks(voguard_rules::standard_checks())
        .parallelism(Some(3))
        .build()
        .analyze_all(&candidates, &cancelled);

    let summary = |reports: &[voguard_core::TypeReport]| -> Vec<(String, usize)> {
        reports
            .iter()
            .map(|r| (r.name.clone(), r.diagnostics.len()))
            .collect()
    };
    assert_eq!(summary(&sequential), summary(&parallel));
    assert_eq!(
        summary(&sequential),
        vec![
            ("A".to_string(), 1),
            ("B".to_string(), 0),
            ("C".to_string(), 1),
            ("D".to_string(), 1),
        ]
    );
}
