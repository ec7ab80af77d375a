//! Diagnostic records.

use crate::descriptor::{Descriptor, DiagnosticKind};
use crate::types::{Argument, Location, Severity};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// One reported violation.
///
/// Built through [`crate::DiagnosticFactory`]; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    descriptor: &'static Descriptor,
    location: Location,
    additional_locations: Vec<Location>,
    arguments: Vec<Argument>,
}

impl Diagnostic {
    /// Creates a diagnostic from its parts.
    #[must_use]
    pub fn new(
        descriptor: &'static Descriptor,
        location: Location,
        additional_locations: Vec<Location>,
        arguments: Vec<Argument>,
    ) -> Self {
        Self {
            descriptor,
            location,
            additional_locations,
            arguments,
        }
    }

    /// The descriptor this diagnostic was built from.
    #[must_use]
    pub fn descriptor(&self) -> &'static Descriptor {
        self.descriptor
    }

    /// The kind of violation.
    #[must_use]
    pub fn kind(&self) -> DiagnosticKind {
        self.descriptor.kind
    }

    /// Permanent code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        self.descriptor.code
    }

    /// Severity, taken from the descriptor.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.descriptor.severity
    }

    /// Short title.
    #[must_use]
    pub fn title(&self) -> &'static str {
        self.descriptor.title
    }

    /// Primary location.
    #[must_use]
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Secondary locations, in the order they were supplied.
    #[must_use]
    pub fn additional_locations(&self) -> &[Location] {
        &self.additional_locations
    }

    /// Message arguments in placeholder order.
    #[must_use]
    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// The template filled with this diagnostic's arguments.
    #[must_use]
    pub fn message(&self) -> String {
        self.descriptor.format(&self.arguments)
    }

    /// Formats the diagnostic for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!("{} {} at {}\n", self.code(), self.title(), self.location);
        let _ = writeln!(output, "  {}: {}", self.severity(), self.message());
        for extra in &self.additional_locations {
            let _ = writeln!(output, "  = also: {extra}");
        }
        output
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} [{}] {}",
            self.location,
            self.severity(),
            self.code(),
            self.message()
        )
    }
}

impl Serialize for Diagnostic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Diagnostic", 7)?;
        state.serialize_field("code", self.code())?;
        state.serialize_field("severity", &self.severity())?;
        state.serialize_field("title", self.title())?;
        state.serialize_field("message", &self.message())?;
        state.serialize_field("location", &self.location)?;
        state.serialize_field("additional_locations", &self.additional_locations)?;
        state.serialize_field("arguments", &self.arguments)?;
        state.end()
    }
}
