//! Rich terminal rendering of diagnostics through `miette`.

use crate::descriptor::DiagnosticKind;
use crate::diagnostic::Diagnostic;
use crate::types::{Location, Severity};
use miette::{LabeledSpan, NamedSource, SourceCode};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::path::PathBuf;

/// A [`Diagnostic`] paired with the source it points into.
///
/// The primary location is the primary label; additional locations in the
/// same file become secondary labels.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct DiagnosticReport {
    code: &'static str,
    severity: Severity,
    message: String,
    help: &'static str,
    source_code: Option<NamedSource<String>>,
    labels: Vec<LabeledSpan>,
}

impl DiagnosticReport {
    /// Builds a report, looking source text up by relative path.
    #[must_use]
    pub fn new(diagnostic: &Diagnostic, sources: &BTreeMap<PathBuf, String>) -> Self {
        let primary = diagnostic.location().span();
        let text = primary.and_then(|span| sources.get(&span.file).map(|text| (span, text)));

        let (source_code, labels) = match text {
            Some((span, text)) => {
                let mut labels = vec![LabeledSpan::new_primary_with_span(
                    Some(diagnostic.title().to_string()),
                    (span.offset, span.length),
                )];
                labels.extend(
                    diagnostic
                        .additional_locations()
                        .iter()
                        .filter_map(Location::span)
                        .filter(|extra| extra.file == span.file)
                        .map(|extra| {
                            LabeledSpan::new_with_span(
                                Some("related".to_string()),
                                (extra.offset, extra.length),
                            )
                        }),
                );
                let name = span.file.display().to_string();
                (Some(NamedSource::new(name, text.clone())), labels)
            }
            None => (None, Vec::new()),
        };

        Self {
            code: diagnostic.code(),
            severity: diagnostic.severity(),
            message: diagnostic.message(),
            help: help(diagnostic.kind()),
            source_code,
            labels,
        }
    }
}

impl miette::Diagnostic for DiagnosticReport {
    fn code<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        Some(Box::new(self.code))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(match self.severity {
            Severity::Error => miette::Severity::Error,
            Severity::Warning => miette::Severity::Warning,
            Severity::Info => miette::Severity::Advice,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        Some(Box::new(self.help))
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.source_code.as_ref().map(|s| s as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        if self.labels.is_empty() {
            None
        } else {
            Some(Box::new(self.labels.iter().cloned()))
        }
    }
}

fn help(kind: DiagnosticKind) -> &'static str {
    match kind {
        DiagnosticKind::TypeCannotBeNested => "declare the value object at module level",
        DiagnosticKind::UnderlyingTypeMustNotBeSameAsValueObject => {
            "wrap a primitive or another existing type"
        }
        DiagnosticKind::UnderlyingTypeCannotBeCollection => {
            "wrap a single value, such as a number or a string"
        }
        DiagnosticKind::ValidationMustReturnValidationType => "return `Validation` from `validate`",
        DiagnosticKind::ValidationMustBeStatic => "remove the receiver from `validate`",
        DiagnosticKind::InvalidConversions => {
            "use: none, display, from_str, serde, sqlx, diesel, schemars or default"
        }
        DiagnosticKind::CannotHaveUserConstructors => {
            "remove the constructor and put checks in `validate`"
        }
        DiagnosticKind::UsingDefaultProhibited | DiagnosticKind::UsingNewProhibited => {
            "create instances with the generated `from` function"
        }
        DiagnosticKind::InstanceCannotHaveNullName => "give the instance a `name`",
        DiagnosticKind::InstanceCannotHaveNullValue => "give the instance a `value`",
        DiagnosticKind::CustomErrorMustImplementError => {
            "implement `std::error::Error`, or derive `thiserror::Error`"
        }
    }
}
