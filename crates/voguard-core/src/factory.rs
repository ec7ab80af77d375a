//! Binds descriptors to arguments and locations.
//!
//! The typed constructors (`type_cannot_be_nested`, ...) fix the number and
//! kind of arguments per descriptor, so a check cannot supply the wrong
//! arity. The two general forms back them.

use crate::descriptor::{DescriptorTable, DiagnosticKind};
use crate::diagnostic::Diagnostic;
use crate::model::{InstanceMetadata, Symbol, TypeRef};
use crate::types::{Argument, Location};

/// Stateless builder of [`Diagnostic`] records.
#[derive(Debug, Clone, Copy)]
pub struct DiagnosticFactory {
    table: &'static DescriptorTable,
}

impl Default for DiagnosticFactory {
    fn default() -> Self {
        Self::new(DescriptorTable::standard())
    }
}

impl DiagnosticFactory {
    /// Creates a factory reading from `table`.
    #[must_use]
    pub fn new(table: &'static DescriptorTable) -> Self {
        Self { table }
    }

    /// The table descriptors are taken from.
    #[must_use]
    pub fn table(&self) -> &'static DescriptorTable {
        self.table
    }

    /// Single-location, single-argument form.
    #[must_use]
    pub fn build(
        &self,
        kind: DiagnosticKind,
        argument: impl Into<Argument>,
        location: Location,
    ) -> Diagnostic {
        self.build_at(kind, [location], vec![argument.into()])
    }

    /// General form.
    ///
    /// The first location is primary and the rest are attached as
    /// additional locations. An empty sequence yields the sentinel as
    /// primary location.
    #[must_use]
    pub fn build_at<I>(&self, kind: DiagnosticKind, locations: I, arguments: Vec<Argument>) -> Diagnostic
    where
        I: IntoIterator<Item = Location>,
    {
        let descriptor = self.table.get(kind);
        debug_assert!(
            arguments.len() >= descriptor.arity,
            "{} expects {} argument(s), got {}",
            descriptor.code,
            descriptor.arity,
            arguments.len()
        );

        let mut locations = locations.into_iter();
        let primary = locations.next().unwrap_or_default();
        Diagnostic::new(descriptor, primary, locations.collect(), arguments)
    }

    /// `Type '{0}' cannot be nested - remove it from inside {1}`.
    #[must_use]
    pub fn type_cannot_be_nested(&self, candidate: &Symbol, container: &Symbol) -> Diagnostic {
        self.build_at(
            DiagnosticKind::TypeCannotBeNested,
            candidate.preferred_locations(),
            vec![
                Argument::symbol(&candidate.name),
                Argument::symbol(&container.name),
            ],
        )
    }

    /// Default construction at one call site.
    #[must_use]
    pub fn using_default_prohibited(&self, call_site: Location, candidate: &str) -> Diagnostic {
        self.build(
            DiagnosticKind::UsingDefaultProhibited,
            Argument::symbol(candidate),
            call_site,
        )
    }

    /// Direct construction at one call site.
    #[must_use]
    pub fn using_new_prohibited(&self, call_site: Location, candidate: &str) -> Diagnostic {
        self.build(
            DiagnosticKind::UsingNewProhibited,
            Argument::symbol(candidate),
            call_site,
        )
    }

    /// A user-written constructor.
    #[must_use]
    pub fn cannot_have_user_constructors(&self, constructor: &Symbol) -> Diagnostic {
        self.build_at(
            DiagnosticKind::CannotHaveUserConstructors,
            constructor.preferred_locations(),
            Vec::new(),
        )
    }

    /// Underlying type is a collection.
    #[must_use]
    pub fn underlying_type_cannot_be_collection(
        &self,
        candidate: &Symbol,
        underlying: &TypeRef,
    ) -> Diagnostic {
        self.build_at(
            DiagnosticKind::UnderlyingTypeCannotBeCollection,
            candidate.preferred_locations(),
            vec![
                Argument::symbol(&candidate.name),
                Argument::text(&underlying.display),
            ],
        )
    }

    /// Underlying type is the value object itself.
    #[must_use]
    pub fn underlying_type_must_not_be_same_as_value_object(&self, candidate: &Symbol) -> Diagnostic {
        self.build_at(
            DiagnosticKind::UnderlyingTypeMustNotBeSameAsValueObject,
            candidate.preferred_locations(),
            vec![Argument::symbol(&candidate.name)],
        )
    }

    /// Unknown conversions value.
    #[must_use]
    pub fn invalid_conversions(&self, location: Location) -> Diagnostic {
        self.build_at(DiagnosticKind::InvalidConversions, [location], Vec::new())
    }

    /// Validation hook returns something other than `Validation`.
    #[must_use]
    pub fn validation_must_return_validation_type(&self, method: &Symbol) -> Diagnostic {
        self.build_at(
            DiagnosticKind::ValidationMustReturnValidationType,
            method.preferred_locations(),
            vec![Argument::symbol(&method.name)],
        )
    }

    /// Validation hook takes a receiver.
    #[must_use]
    pub fn validation_must_be_static(&self, method: &Symbol) -> Diagnostic {
        self.build_at(
            DiagnosticKind::ValidationMustBeStatic,
            method.preferred_locations(),
            vec![Argument::symbol(&method.name)],
        )
    }

    /// Instance without a name. The attribute span is attached as an
    /// additional location when known.
    #[must_use]
    pub fn instance_cannot_have_null_name(
        &self,
        candidate: &Symbol,
        instance: &InstanceMetadata,
    ) -> Diagnostic {
        self.build_at(
            DiagnosticKind::InstanceCannotHaveNullName,
            with_attribute(candidate, instance),
            vec![Argument::symbol(&candidate.name)],
        )
    }

    /// Instance without a value.
    #[must_use]
    pub fn instance_cannot_have_null_value(
        &self,
        candidate: &Symbol,
        instance: &InstanceMetadata,
    ) -> Diagnostic {
        self.build_at(
            DiagnosticKind::InstanceCannotHaveNullValue,
            with_attribute(candidate, instance),
            vec![Argument::symbol(&candidate.name)],
        )
    }

    /// Error type does not implement `Error`.
    #[must_use]
    pub fn custom_error_must_implement_error(&self, error_type: &Symbol) -> Diagnostic {
        self.build_at(
            DiagnosticKind::CustomErrorMustImplementError,
            error_type.preferred_locations(),
            vec![Argument::symbol(&error_type.name)],
        )
    }
}

fn with_attribute(candidate: &Symbol, instance: &InstanceMetadata) -> Vec<Location> {
    let mut locations = candidate.preferred_locations();
    if !instance.location.is_none() {
        locations.push(instance.location.clone());
    }
    locations
}
