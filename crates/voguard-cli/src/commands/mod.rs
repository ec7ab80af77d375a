//! Subcommand implementations.

pub mod check;
pub mod init;
pub mod list_codes;
pub mod output;
