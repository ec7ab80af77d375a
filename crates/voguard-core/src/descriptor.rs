//! The fixed table of diagnostic descriptors.
//!
//! Every [`DiagnosticKind`] maps to exactly one [`Descriptor`]. Codes are a
//! public contract: editors and CI pipelines filter on them, so a code is
//! never reassigned to a different rule. New kinds take the next free number.

use crate::types::Severity;
use serde::Serialize;

/// Category shared by every descriptor in the standard table.
pub const CATEGORY: &str = "voguard";

/// The closed set of violations voguard reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// A value object is declared inside another item.
    TypeCannotBeNested,
    /// The underlying type is the value object itself.
    UnderlyingTypeMustNotBeSameAsValueObject,
    /// The underlying type is a collection.
    UnderlyingTypeCannotBeCollection,
    /// The validation hook does not return `Validation`.
    ValidationMustReturnValidationType,
    /// The validation hook takes a receiver.
    ValidationMustBeStatic,
    /// The conversions value is not part of the known set.
    InvalidConversions,
    /// The value object defines its own constructor.
    CannotHaveUserConstructors,
    /// A value object is built through `Default`.
    UsingDefaultProhibited,
    /// A value object is built directly instead of through `from`.
    UsingNewProhibited,
    /// An `#[instance]` attribute has no name.
    InstanceCannotHaveNullName,
    /// An `#[instance]` attribute has no value.
    InstanceCannotHaveNullValue,
    /// The configured error type does not implement `Error`.
    CustomErrorMustImplementError,
}

impl DiagnosticKind {
    /// Every kind, in code order.
    pub const ALL: [Self; 12] = [
        Self::TypeCannotBeNested,
        Self::UnderlyingTypeMustNotBeSameAsValueObject,
        Self::UnderlyingTypeCannotBeCollection,
        Self::ValidationMustReturnValidationType,
        Self::ValidationMustBeStatic,
        Self::InvalidConversions,
        Self::CannotHaveUserConstructors,
        Self::UsingDefaultProhibited,
        Self::UsingNewProhibited,
        Self::InstanceCannotHaveNullName,
        Self::InstanceCannotHaveNullValue,
        Self::CustomErrorMustImplementError,
    ];

    const fn index(self) -> usize {
        self as usize
    }
}

/// Immutable description of one diagnostic kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Descriptor {
    /// The kind this descriptor describes.
    pub kind: DiagnosticKind,
    /// Permanent code, e.g. `VG001`.
    pub code: &'static str,
    /// Short title.
    pub title: &'static str,
    /// Message template with `{0}`, `{1}`, ... placeholders.
    pub template: &'static str,
    /// Number of placeholders in `template`.
    pub arity: usize,
    /// Severity fixed at construction.
    pub severity: Severity,
    /// Grouping category.
    pub category: &'static str,
    /// Whether users may change the severity or silence the diagnostic.
    pub configurable: bool,
}

impl Descriptor {
    /// Creates a descriptor. Error descriptors are never configurable.
    #[must_use]
    pub const fn new(
        kind: DiagnosticKind,
        code: &'static str,
        title: &'static str,
        template: &'static str,
        arity: usize,
        severity: Severity,
    ) -> Self {
        Self {
            kind,
            code,
            title,
            template,
            arity,
            severity,
            category: CATEGORY,
            configurable: !matches!(severity, Severity::Error),
        }
    }

    const fn error(
        kind: DiagnosticKind,
        code: &'static str,
        title: &'static str,
        template: &'static str,
        arity: usize,
    ) -> Self {
        Self::new(kind, code, title, template, arity, Severity::Error)
    }

    /// Fills the template's positional placeholders.
    ///
    /// Placeholders without a matching argument are left as written.
    #[must_use]
    pub fn format<T: std::fmt::Display>(&self, args: &[T]) -> String {
        let mut out = String::with_capacity(self.template.len());
        let mut rest = self.template;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let Some(close) = after.find('}') else {
                out.push_str(&rest[open..]);
                return out;
            };
            match after[..close].parse::<usize>().ok().and_then(|i| args.get(i)) {
                Some(arg) => out.push_str(&arg.to_string()),
                None => out.push_str(&rest[open..=open + 1 + close]),
            }
            rest = &after[close + 1..];
        }

        out.push_str(rest);
        out
    }
}

/// Read-only registry of every descriptor, indexed by kind.
#[derive(Debug)]
pub struct DescriptorTable {
    descriptors: &'static [Descriptor],
}

static STANDARD: DescriptorTable = DescriptorTable {
    descriptors: &[
        Descriptor::error(
            DiagnosticKind::TypeCannotBeNested,
            "VG001",
            "Types cannot be nested",
            "Type '{0}' cannot be nested - remove it from inside {1}",
            2,
        ),
        Descriptor::error(
            DiagnosticKind::UnderlyingTypeMustNotBeSameAsValueObject,
            "VG002",
            "Invalid underlying type",
            "Type '{0}' has the same underlying type - must specify a primitive underlying type",
            1,
        ),
        Descriptor::error(
            DiagnosticKind::UnderlyingTypeCannotBeCollection,
            "VG003",
            "Underlying type cannot be collection",
            "Type '{0}' has an underlying type of {1} which is not valid",
            2,
        ),
        Descriptor::error(
            DiagnosticKind::ValidationMustReturnValidationType,
            "VG004",
            "Validation returns incorrect type",
            "{0} must return a Validation type",
            1,
        ),
        Descriptor::error(
            DiagnosticKind::ValidationMustBeStatic,
            "VG005",
            "Validation must be static",
            "{0} must be static",
            1,
        ),
        Descriptor::error(
            DiagnosticKind::InvalidConversions,
            "VG006",
            "Invalid conversions",
            "The conversions specified do not match any known conversions - see the Conversions type",
            0,
        ),
        Descriptor::error(
            DiagnosticKind::CannotHaveUserConstructors,
            "VG007",
            "Cannot have user defined constructors",
            "Cannot have user defined constructors, please use the from method for creation.",
            0,
        ),
        Descriptor::error(
            DiagnosticKind::UsingDefaultProhibited,
            "VG008",
            "Using default of value objects is prohibited",
            "Type '{0}' cannot be constructed with default as it is prohibited.",
            1,
        ),
        Descriptor::error(
            DiagnosticKind::UsingNewProhibited,
            "VG009",
            "Direct construction of value objects is prohibited. Please use the from method for creation.",
            "Type '{0}' cannot be constructed directly as it is prohibited.",
            1,
        ),
        Descriptor::error(
            DiagnosticKind::InstanceCannotHaveNullName,
            "VG010",
            "Instance attribute cannot have null name",
            "{0} cannot have a null name",
            1,
        ),
        Descriptor::error(
            DiagnosticKind::InstanceCannotHaveNullValue,
            "VG011",
            "Instance attribute cannot have null value",
            "{0} cannot have a null value",
            1,
        ),
        Descriptor::error(
            DiagnosticKind::CustomErrorMustImplementError,
            "VG012",
            "Invalid custom error",
            "{0} must implement std::error::Error",
            1,
        ),
    ],
};

impl DescriptorTable {
    /// Returns the process-wide standard table.
    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    /// Looks up the descriptor for `kind`.
    #[must_use]
    pub fn get(&self, kind: DiagnosticKind) -> &Descriptor {
        &self.descriptors[kind.index()]
    }

    /// Looks up a descriptor by its code.
    #[must_use]
    pub fn by_code(&self, code: &str) -> Option<&Descriptor> {
        self.descriptors.iter().find(|d| d.code == code)
    }

    /// Iterates descriptors in code order.
    pub fn iter(&self) -> impl Iterator<Item = &Descriptor> {
        self.descriptors.iter()
    }
}
