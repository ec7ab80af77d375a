//! Symbol model for one candidate value object.
//!
//! The model is host-agnostic. [`crate::extract`] fills it from Rust source,
//! but checks only ever see these types, so any front end that can resolve
//! symbols can drive the analyzer.

use crate::types::Location;

/// A named program element and where it lives.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Symbol {
    /// Simple name, e.g. `CustomerId`.
    pub name: String,
    /// Spans of the full declaring syntax (`pub struct CustomerId;`).
    pub declaring_syntax: Vec<Location>,
    /// Spans the host reports for the symbol itself (usually the identifier).
    pub locations: Vec<Location>,
}

impl Symbol {
    /// Creates a symbol with no locations.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declaring_syntax: Vec::new(),
            locations: Vec::new(),
        }
    }

    /// Adds a declaring-syntax span.
    #[must_use]
    pub fn with_declaration(mut self, location: impl Into<Location>) -> Self {
        self.declaring_syntax.push(location.into());
        self
    }

    /// Adds a symbol location.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<Location>) -> Self {
        self.locations.push(location.into());
        self
    }

    /// Where diagnostics about this symbol should point.
    ///
    /// Declaring syntax wins over symbol locations, which win over the
    /// sentinel.
    #[must_use]
    pub fn preferred_locations(&self) -> Vec<Location> {
        first_present([
            non_empty(&self.declaring_syntax),
            non_empty(&self.locations),
        ])
    }
}

fn non_empty(locations: &[Location]) -> Option<&[Location]> {
    (!locations.is_empty()).then_some(locations)
}

/// Reduces an ordered chain of optional lookups: the first present lookup
/// wins; when none is present the result is the sentinel alone.
#[must_use]
pub fn first_present<'a, I>(lookups: I) -> Vec<Location>
where
    I: IntoIterator<Item = Option<&'a [Location]>>,
{
    lookups
        .into_iter()
        .flatten()
        .next()
        .map_or_else(|| vec![Location::None], <[Location]>::to_vec)
}

/// A reference to a type used in configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    /// The referenced type; its name is the last path segment.
    pub symbol: Symbol,
    /// The type as written, e.g. `Vec<u8>`.
    pub display: String,
    /// Whether the type is a collection or sequence.
    pub is_collection: bool,
}

impl TypeRef {
    /// Creates a non-collection type reference.
    #[must_use]
    pub fn new(symbol: Symbol, display: impl Into<String>) -> Self {
        Self {
            symbol,
            display: display.into(),
            is_collection: false,
        }
    }

    /// Marks the type as a collection.
    #[must_use]
    pub fn collection(mut self) -> Self {
        self.is_collection = true;
        self
    }
}

/// The conversions value exactly as the user wrote it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawConversions {
    /// Names, e.g. `["serde", "display"]`.
    Names(Vec<String>),
    /// An integer bit pattern.
    Bits(u64),
    /// Something that is neither, e.g. a call expression.
    Unparsed(String),
}

/// A conversions setting and the expression it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionsSetting {
    /// Value as written.
    pub raw: RawConversions,
    /// Span of the configuration expression.
    pub location: Location,
}

/// A user-supplied error type for validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorTypeRef {
    /// The error type.
    pub symbol: Symbol,
    /// Whether it implements `std::error::Error`.
    pub implements_error: bool,
}

/// Configuration after defaults and per-type overrides were merged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedConfig {
    /// The wrapped primitive.
    pub underlying: Option<TypeRef>,
    /// Requested conversions.
    pub conversions: Option<ConversionsSetting>,
    /// Error type raised when validation fails.
    pub throws: Option<ErrorTypeRef>,
}

/// A user-declared validation hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationHook {
    /// The method; its declaring syntax is the whole `fn` item.
    pub symbol: Symbol,
    /// Declared without a receiver.
    pub is_static: bool,
    /// Last path segment of the return type, `None` for `()`.
    pub return_type: Option<String>,
}

/// One `#[instance(name = .., value = ..)]` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceMetadata {
    /// Instance name, `None` when missing.
    pub name: Option<String>,
    /// Instance value, `None` when missing.
    pub value: Option<String>,
    /// Span of the attribute.
    pub location: Location,
}

/// Everything known about one candidate value object.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CandidateType {
    /// The value object itself.
    pub symbol: Symbol,
    /// Item the type is declared inside, if any.
    pub container: Option<Symbol>,
    /// Merged configuration.
    pub config: ResolvedConfig,
    /// Call sites building the type through `Default`.
    pub default_constructions: Vec<Location>,
    /// Call sites building the type directly.
    pub direct_constructions: Vec<Location>,
    /// User-written constructors.
    pub constructors: Vec<Symbol>,
    /// User-written validation hooks.
    pub validation_hooks: Vec<ValidationHook>,
    /// Predefined instances.
    pub instances: Vec<InstanceMetadata>,
}

impl CandidateType {
    /// Creates a candidate with nothing but its symbol.
    #[must_use]
    pub fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            ..Self::default()
        }
    }

    /// The value object's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.symbol.name
    }

    /// Sets the container.
    #[must_use]
    pub fn nested_in(mut self, container: Symbol) -> Self {
        self.container = Some(container);
        self
    }

    /// Sets the underlying type.
    #[must_use]
    pub fn underlying(mut self, underlying: TypeRef) -> Self {
        self.config.underlying = Some(underlying);
        self
    }

    /// Sets the conversions setting.
    #[must_use]
    pub fn conversions(mut self, raw: RawConversions, location: impl Into<Location>) -> Self {
        self.config.conversions = Some(ConversionsSetting {
            raw,
            location: location.into(),
        });
        self
    }

    /// Sets the error type.
    #[must_use]
    pub fn throws(mut self, symbol: Symbol, implements_error: bool) -> Self {
        self.config.throws = Some(ErrorTypeRef {
            symbol,
            implements_error,
        });
        self
    }

    /// Adds a user constructor.
    #[must_use]
    pub fn constructor(mut self, constructor: Symbol) -> Self {
        self.constructors.push(constructor);
        self
    }

    /// Adds a validation hook.
    #[must_use]
    pub fn validation_hook(
        mut self,
        symbol: Symbol,
        is_static: bool,
        return_type: Option<&str>,
    ) -> Self {
        self.validation_hooks.push(ValidationHook {
            symbol,
            is_static,
            return_type: return_type.map(String::from),
        });
        self
    }

    /// Adds an instance.
    #[must_use]
    pub fn instance(
        mut self,
        name: Option<&str>,
        value: Option<&str>,
        location: impl Into<Location>,
    ) -> Self {
        self.instances.push(InstanceMetadata {
            name: name.map(String::from),
            value: value.map(String::from),
            location: location.into(),
        });
        self
    }

    /// Adds a `Default` call site.
    #[must_use]
    pub fn default_construction(mut self, location: impl Into<Location>) -> Self {
        self.default_constructions.push(location.into());
        self
    }

    /// Adds a direct construction call site.
    #[must_use]
    pub fn direct_construction(mut self, location: impl Into<Location>) -> Self {
        self.direct_constructions.push(location.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SourceSpan;
    use std::path::PathBuf;

    fn span(line: usize) -> Location {
        SourceSpan::new(PathBuf::from("src/lib.rs"), line, 1).into()
    }

    #[test]
    fn declaring_syntax_wins() {
        let symbol = Symbol::new("CustomerId")
            .with_declaration(span(1))
            .with_location(span(2));
        assert_eq!(symbol.preferred_locations(), vec![span(1)]);
    }

    #[test]
    fn falls_back_to_symbol_locations() {
        let symbol = Symbol::new("CustomerId").with_location(span(2)).with_location(span(7));
        assert_eq!(symbol.preferred_locations(), vec![span(2), span(7)]);
    }

    #[test]
    fn falls_back_to_sentinel() {
        assert_eq!(
            Symbol::new("External").preferred_locations(),
            vec![Location::None]
        );
    }

    #[test]
    fn first_present_skips_missing_lookups() {
        let second = [span(3)];
        assert_eq!(first_present([None, Some(&second[..])]), vec![span(3)]);
        assert_eq!(first_present(std::iter::empty()), vec![Location::None]);
    }
}
