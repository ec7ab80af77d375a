//! # voguard-rules
//!
//! Built-in checks for value object declarations.
//!
//! ## Available Checks
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | VG001 | `no-nesting` | Value objects are declared at module level |
//! | VG002 | `underlying-not-self` | The underlying type is not the value object itself |
//! | VG003 | `underlying-not-collection` | The underlying type is not a collection |
//! | VG004 | `validation-returns-validation` | `validate` returns `Validation` |
//! | VG005 | `validation-is-static` | `validate` takes no receiver |
//! | VG006 | `known-conversions` | Conversions come from the known set |
//! | VG007 | `no-user-constructors` | No hand-written constructors |
//! | VG008 | `no-default-construction` | No construction through `Default` |
//! | VG009 | `no-direct-construction` | No struct literals or tuple-constructor calls |
//! | VG010 | `instance-has-name` | Every `#[instance]` has a name |
//! | VG011 | `instance-has-value` | Every `#[instance]` has a value |
//! | VG012 | `custom-error-is-error` | The `throws` type implements `std::error::Error` |
//!
//! ## Usage
//!
//! ```ignore
//! use voguard_core::Analyzer;
//! use voguard_rules::standard_checks;
//!
//! let analyzer = Analyzer::builder()
//!     .checks(standard_checks())
//!     .build();
//! let sink = analyzer.analyze(&candidate);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod construction;
pub mod conversions;
pub mod custom_error;
pub mod instance_metadata;
pub mod nesting;
mod presets;
pub mod underlying_type;
pub mod user_constructors;
pub mod validation_hook;

pub use construction::{NoDefaultConstruction, NoDirectConstruction};
pub use conversions::{resolve as resolve_conversions, KnownConversions};
pub use custom_error::CustomErrorIsError;
pub use instance_metadata::{InstanceHasName, InstanceHasValue};
pub use nesting::NoNesting;
pub use presets::{standard_analyzer, standard_checks};
pub use underlying_type::{UnderlyingNotCollection, UnderlyingNotSelf};
pub use user_constructors::NoUserConstructors;
pub use validation_hook::{ValidationIsStatic, ValidationReturnsValidation, VALIDATION_TYPE};

/// Re-export core types for convenience.
pub use voguard_core::{Check, Diagnostic, DiagnosticKind, Severity};
