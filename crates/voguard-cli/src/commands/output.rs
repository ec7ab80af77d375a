//! Shared output formatting for scan results.

use anyhow::Result;
use voguard_core::{DiagnosticReport, ScanResult};

use crate::OutputFormat;

/// Print scan results in the specified format.
pub fn print(result: &ScanResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
    }
    Ok(())
}

fn print_text(result: &ScanResult) {
    let (errors, warnings, _) = result.count_by_severity();

    for diagnostic in result.diagnostics() {
        let report = miette::Report::new(DiagnosticReport::new(diagnostic, &result.sources));
        println!("{report:?}");
    }

    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    let emittable = result.emittable().len();
    println!(
        "{}Found {} error(s) in {} value object(s), {} ready to generate, {} file(s) checked\x1b[0m",
        summary_color,
        errors,
        result.reports.len(),
        emittable,
        result.files_checked
    );
}

fn print_json(result: &ScanResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &ScanResult) {
    for line in compact_lines(result) {
        println!("{line}");
    }
}

fn compact_lines(result: &ScanResult) -> Vec<String> {
    result
        .diagnostics()
        .map(|d| format!("{}: {} [{}] {}", d.location(), d.severity(), d.code(), d.message()))
        .collect()
}
