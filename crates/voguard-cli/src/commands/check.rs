//! Check command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;
use voguard_core::{Analyzer, CheckBox, DescriptorTable, Scanner};
use voguard_rules::standard_checks;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Flags accepted by `voguard check`.
pub struct CheckOptions {
    /// How to print results.
    pub format: OutputFormat,
    /// Comma-separated check names or codes; all checks when `None`.
    pub checks: Option<String>,
    /// Extra exclude patterns.
    pub exclude: Vec<String>,
    /// Abort on the first unparsable file.
    pub fail_on_parse_error: bool,
}

/// Runs the check command.
pub fn run(path: &Path, options: &CheckOptions, source: &ConfigSource) -> Result<()> {
    let config = source.load()?;

    let checks = checks_for(options.checks.as_deref())?;

    let analyzer = Analyzer::builder()
        .checks(checks)
        .parallelism(config.scan.parallelism)
        .build();

    tracing::info!("Checking {:?} with {} checks", path, analyzer.check_count());

    let scanner = Scanner::builder()
        .root(path)
        .config(config)
        .excludes(options.exclude.iter().cloned())
        .fail_on_parse_error(options.fail_on_parse_error)
        .analyzer(analyzer)
        .build()
        .context("Failed to build scanner")?;

    let result = scanner.scan().context("Scan failed")?;

    super::output::print(&result, options.format)?;

    if result.has_errors() {
        std::process::exit(1);
    }

    Ok(())
}

/// The checks `--checks` asks for, or every standard check without a filter.
///
/// # Errors
///
/// Returns an error if the filter names no known check.
fn checks_for(filter: Option<&str>) -> Result<Vec<CheckBox>> {
    let Some(filter) = filter else {
        return Ok(standard_checks());
    };

    let wanted: Vec<&str> = filter.split(',').map(str::trim).filter(|w| !w.is_empty()).collect();
    let checks = select_checks(&wanted);
    if checks.is_empty() {
        bail!("No known checks selected by --checks {filter:?}; run `voguard list-codes` to see them");
    }
    Ok(checks)
}

/// Keeps the standard checks whose name or code is listed, in standard order.
fn select_checks(wanted: &[&str]) -> Vec<CheckBox> {
    let table = DescriptorTable::standard();
    let all = standard_checks();

    for name in wanted {
        let known = all
            .iter()
            .any(|c| c.name() == *name || table.get(c.kind()).code.eq_ignore_ascii_case(name));
        if !known {
            tracing::warn!("Unknown check: {}", name);
        }
    }

    all.into_iter()
        .filter(|c| {
            let code = table.get(c.kind()).code;
            wanted
                .iter()
                .any(|w| c.name() == *w || code.eq_ignore_ascii_case(w))
        })
        .collect()
}
