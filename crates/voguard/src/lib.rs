//! # voguard
//!
//! Static validation of value object declarations.
//!
//! This is the facade crate that re-exports the core framework and the
//! standard checks.
//!
//! ## Quick Start: `cargo test` Integration
//!
//! ```toml
//! [dev-dependencies]
//! voguard = "0.3"
//! ```
//!
//! ```rust,ignore
//! // tests/value_objects.rs
//! voguard::check!();
//! ```
//!
//! The generated test scans the workspace containing the calling crate and
//! fails with a report listing every diagnostic. Configure it through
//! `voguard.toml`, or point at another file:
//!
//! ```rust,ignore
//! voguard::check!(config = "ci/voguard.toml");
//! ```
//!
//! ## Programmatic Usage
//!
//! ```rust,ignore
//! use voguard::{rules::standard_analyzer, Scanner};
//!
//! let scanner = Scanner::builder()
//!     .root("./src")
//!     .analyzer(standard_analyzer().build())
//!     .build()?;
//!
//! let result = scanner.scan()?;
//! for name in result.emittable() {
//!     println!("{name} is ready to generate");
//! }
//! ```

#![forbid(unsafe_code)]

// Re-export core types and traits
pub use voguard_core::*;

/// Built-in checks and the standard order.
pub mod rules {
    pub use voguard_rules::*;
}

mod runner;

#[doc(hidden)]
pub mod __internal {
    pub use crate::runner::run_check;
}

/// Generates a `#[test]` that fails when any value object in the workspace
/// has an error.
///
/// Accepts an optional `config = "path"` relative to the workspace root.
#[macro_export]
macro_rules! check {
    () => {
        #[test]
        fn voguard_check() {
            $crate::__internal::run_check(::core::option::Option::None);
        }
    };
    (config = $path:literal $(,)?) => {
        #[test]
        fn voguard_check() {
            $crate::__internal::run_check(::core::option::Option::Some($path));
        }
    };
}
