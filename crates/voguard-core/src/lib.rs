//! # voguard-core
//!
//! Core framework for validating value object declarations before code is
//! generated for them.
//!
//! This crate provides:
//!
//! - [`DescriptorTable`] holding the permanent, numbered diagnostic kinds
//! - [`DiagnosticFactory`] binding descriptors to arguments and locations
//! - [`DiagnosticSink`] collecting diagnostics for one type
//! - [`CandidateType`] and friends, the host-agnostic symbol model
//! - [`Check`] trait implemented by each validation rule
//! - [`Analyzer`] running checks and gating emission
//! - [`Scanner`] driving the whole pipeline over a project tree
//!
//! ## Example
//!
//! ```ignore
//! use voguard_core::{Analyzer, Scanner};
//!
//! let analyzer = Analyzer::builder()
//!     .checks(voguard_rules::standard_checks())
//!     .build();
//!
//! let result = Scanner::builder()
//!     .root("./src")
//!     .analyzer(analyzer)
//!     .build()?
//!     .scan()?;
//! result.print_report();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod check;
mod config;
mod context;
mod conversions;
mod descriptor;
mod diagnostic;
mod factory;
mod model;
mod report;
mod scanner;
mod sink;
mod types;

/// Building candidates from Rust source.
pub mod extract;

/// Utility modules for working with `syn` trees.
pub mod utils;

pub use analyzer::{Analyzer, AnalyzerBuilder, Emitter, TypeReport};
pub use check::{Check, CheckBox};
pub use config::{Config, ConfigError, Defaults, ScanConfig};
pub use context::FileContext;
pub use conversions::Conversions;
pub use descriptor::{Descriptor, DescriptorTable, DiagnosticKind, CATEGORY};
pub use diagnostic::Diagnostic;
pub use extract::{extract_source, ExtractError, Extractor, SourceFile};
pub use factory::DiagnosticFactory;
pub use model::{
    first_present, CandidateType, ConversionsSetting, ErrorTypeRef, InstanceMetadata,
    RawConversions, ResolvedConfig, Symbol, TypeRef, ValidationHook,
};
pub use report::DiagnosticReport;
pub use scanner::{ScanError, ScanResult, Scanner, ScannerBuilder};
pub use sink::DiagnosticSink;
pub use types::{Argument, Location, Severity, SourceSpan};
