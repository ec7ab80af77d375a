//! Core types shared by descriptors, diagnostics and the symbol model.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message, does not block generation.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed before code is generated.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A concrete region of a source file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceSpan {
    /// File path relative to project root.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Byte offset in file (for miette integration).
    pub offset: usize,
    /// Length of the span in bytes.
    pub length: usize,
}

impl SourceSpan {
    /// Creates a new span with explicit values.
    #[must_use]
    pub fn new(file: PathBuf, line: usize, column: usize) -> Self {
        Self {
            file,
            line,
            column,
            offset: 0,
            length: 0,
        }
    }

    /// Sets the byte offset and length for this span.
    #[must_use]
    pub fn with_span(mut self, offset: usize, length: usize) -> Self {
        self.offset = offset;
        self.length = length;
        self
    }
}

/// Where a diagnostic points.
///
/// `None` is the sentinel used when no source position is known. A
/// diagnostic carrying it is still reported.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Location {
    /// No source position is available.
    #[default]
    None,
    /// A position in a source file.
    Source(SourceSpan),
}

impl Location {
    /// Returns `true` for the "no location" sentinel.
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns the underlying span, if any.
    #[must_use]
    pub fn span(&self) -> Option<&SourceSpan> {
        match self {
            Self::None => None,
            Self::Source(span) => Some(span),
        }
    }
}

impl From<SourceSpan> for Location {
    fn from(span: SourceSpan) -> Self {
        Self::Source(span)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "<no location>"),
            Self::Source(span) => write!(f, "{}:{}:{}", span.file.display(), span.line, span.column),
        }
    }
}

/// A value substituted into a message template placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Argument {
    /// Free text, e.g. a rendered type expression.
    Text(String),
    /// The name of a symbol (type, method, container).
    SymbolName(String),
    /// A count of something.
    Count(usize),
}

impl Argument {
    /// Creates a symbol-name argument.
    #[must_use]
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::SymbolName(name.into())
    }

    /// Creates a free-text argument.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}

impl std::fmt::Display for Argument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) | Self::SymbolName(s) => f.write_str(s),
            Self::Count(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for Argument {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Argument {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<usize> for Argument {
    fn from(n: usize) -> Self {
        Self::Count(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_location_is_sentinel() {
        assert!(Location::default().is_none());
        assert!(Location::default().span().is_none());
    }

    #[test]
    fn location_display() {
        let loc = Location::from(SourceSpan::new(PathBuf::from("src/id.rs"), 3, 5));
        assert_eq!(loc.to_string(), "src/id.rs:3:5");
        assert_eq!(Location::None.to_string(), "<no location>");
    }

    #[test]
    fn argument_display() {
        assert_eq!(Argument::symbol("CustomerId").to_string(), "CustomerId");
        assert_eq!(Argument::text("Vec<u8>").to_string(), "Vec<u8>");
        assert_eq!(Argument::Count(3).to_string(), "3");
    }

    #[test]
    fn severity_orders_error_highest() {
        assert!(Severity::Error > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
    }
}
