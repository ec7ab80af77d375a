//! Internal runner for `check!()` macro integration.
//!
//! Called by the test function generated by `voguard::check!()`; not part of
//! the public API.

use std::path::{Path, PathBuf};
use voguard_core::{Config, ScanResult, Scanner, Severity};
use voguard_rules::standard_analyzer;

/// Config file names to search for, in priority order.
const CONFIG_CANDIDATES: [&str; 2] = ["voguard.toml", ".voguard.toml"];

/// Scans the calling workspace as part of `cargo test`.
///
/// # Panics
///
/// Panics with a formatted report if any value object has an error, or if
/// the configuration cannot be loaded or the scan fails.
pub fn run_check(config_path: Option<&str>) {
    let root = find_project_root();
    let result = scan(&root, config_path);

    if result.has_diagnostics_at(Severity::Error) {
        panic!("{}", result.format_test_report(Severity::Error));
    }
}

fn scan(root: &Path, config_path: Option<&str>) -> ScanResult {
    let config = load_config(root, config_path);
    let parallelism = config.scan.parallelism;

    let scanner = Scanner::builder()
        .root(root)
        .config(config)
        .analyzer(standard_analyzer().parallelism(parallelism).build())
        .build()
        .unwrap_or_else(|e| panic!("voguard: failed to build scanner: {e}"));

    scanner
        .scan()
        .unwrap_or_else(|e| panic!("voguard: scan failed: {e}"))
}

/// Loads the explicit config, else the first project config, else defaults.
fn load_config(root: &Path, explicit_path: Option<&str>) -> Config {
    let path = match explicit_path {
        Some(path) if Path::new(path).is_absolute() => Some(PathBuf::from(path)),
        Some(path) => Some(root.join(path)),
        None => CONFIG_CANDIDATES
            .iter()
            .map(|name| root.join(name))
            .find(|candidate| candidate.is_file()),
    };

    match path {
        Some(path) => Config::from_file(&path).unwrap_or_else(|e| panic!("voguard: {e}")),
        None => Config::default(),
    }
}

/// Checks whether a `Cargo.toml` declares a `[workspace]` table.
fn has_workspace_section(cargo_toml: &Path) -> bool {
    std::fs::read_to_string(cargo_toml)
        .ok()
        .and_then(|content| content.parse::<toml::Table>().ok())
        .is_some_and(|table| table.contains_key("workspace"))
}

/// Walks up from `CARGO_MANIFEST_DIR` to the workspace root.
fn find_project_root() -> PathBuf {
    let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") else {
        return std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    };
    let manifest_dir = PathBuf::from(manifest_dir);

    manifest_dir
        .ancestors()
        .find(|dir| has_workspace_section(&dir.join("Cargo.toml")))
        .map_or_else(|| manifest_dir.clone(), Path::to_path_buf)
}
