//! Project scanner: discovers files, extracts candidates, runs the analyzer.

use crate::analyzer::{Analyzer, TypeReport};
use crate::config::{Config, ConfigError};
use crate::extract::{ExtractError, Extractor, SourceFile};
use crate::types::Severity;

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while scanning a project.
#[derive(Debug, Error)]
pub enum ScanError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error walking the directory tree.
    #[error("Failed to walk directory: {0}")]
    Walk(#[from] ignore::Error),

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A file failed to parse and parse errors are fatal.
    #[error(transparent)]
    Parse(#[from] ExtractError),

    /// The root directory does not exist.
    #[error("Root directory not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// No analyzer was supplied to the builder.
    #[error("Scanner requires an analyzer")]
    MissingAnalyzer,
}

/// Builder for configuring a [`Scanner`].
#[derive(Default)]
pub struct ScannerBuilder {
    root: Option<PathBuf>,
    analyzer: Option<Analyzer>,
    exclude_patterns: Vec<String>,
    include_patterns: Vec<String>,
    config: Option<Config>,
    fail_on_parse_error: bool,
}

impl ScannerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to scan.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Sets the analyzer that checks each value object.
    #[must_use]
    pub fn analyzer(mut self, analyzer: Analyzer) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Adds an include glob pattern, matched against paths relative to
    /// the root.
    #[must_use]
    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.include_patterns.push(pattern.into());
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets whether to fail on parse errors (default: false).
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = fail;
        self
    }

    /// Builds the scanner.
    ///
    /// # Errors
    ///
    /// Returns an error if no analyzer was set, the root directory doesn't
    /// exist, or a configured default is invalid.
    pub fn build(self) -> Result<Scanner, ScanError> {
        let analyzer = self.analyzer.ok_or(ScanError::MissingAnalyzer)?;
        let config = self.config.unwrap_or_default();

        let root = self.root.unwrap_or_else(|| config.scan.root.clone());
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };
        if !root.is_dir() {
            return Err(ScanError::RootNotFound(root));
        }

        let mut exclude_patterns = self.exclude_patterns;
        exclude_patterns.extend(config.scan.exclude.iter().cloned());

        let mut include_patterns = Vec::new();
        for pattern in self.include_patterns.iter().chain(&config.scan.include) {
            include_patterns.push(glob::Pattern::new(pattern)?);
        }

        let extractor = Extractor::new(&root).with_defaults(&config.defaults)?;

        Ok(Scanner {
            root,
            analyzer,
            extractor,
            exclude_patterns,
            include_patterns,
            respect_gitignore: config.scan.respect_gitignore,
            fail_on_parse_error: self.fail_on_parse_error,
        })
    }
}

/// Checks every value object under a project root.
///
/// Use [`Scanner::builder()`] to construct an instance.
pub struct Scanner {
    root: PathBuf,
    analyzer: Analyzer,
    extractor: Extractor,
    exclude_patterns: Vec<String>,
    include_patterns: Vec<glob::Pattern>,
    respect_gitignore: bool,
    fail_on_parse_error: bool,
}

impl Scanner {
    /// Creates a new builder for configuring a scanner.
    #[must_use]
    pub fn builder() -> ScannerBuilder {
        ScannerBuilder::new()
    }

    /// Returns the root directory being scanned.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the analyzer used for each value object.
    #[must_use]
    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    /// Scans the project to completion.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery fails, or if a file fails to
    /// parse and parse errors are fatal.
    pub fn scan(&self) -> Result<ScanResult, ScanError> {
        self.scan_cancellable(&AtomicBool::new(false))
    }

    /// Scans the project, stopping between value objects once `cancelled`
    /// is set.
    ///
    /// # Errors
    ///
    /// See [`Scanner::scan`].
    pub fn scan_cancellable(&self, cancelled: &AtomicBool) -> Result<ScanResult, ScanError> {
        info!("Starting scan at {:?}", self.root);

        let paths = self.discover_files()?;
        info!("Found {} files to scan", paths.len());

        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            debug!("Parsing: {}", path.display());
            let content = std::fs::read_to_string(&path)?;
            match SourceFile::parse(path, content) {
                Ok(file) => files.push(file),
                Err(e) => {
                    warn!("{e}");
                    if self.fail_on_parse_error {
                        return Err(e.into());
                    }
                }
            }
        }

        let candidates = self.extractor.extract(&files);
        let reports = self.analyzer.analyze_all(&candidates, cancelled);

        let sources = files
            .into_iter()
            .map(|file| (self.relative(&file.path), file.content))
            .collect::<BTreeMap<_, _>>();

        let result = ScanResult {
            files_checked: sources.len(),
            reports,
            sources,
        };

        let (errors, _, _) = result.count_by_severity();
        info!(
            "Scan complete: {} error(s) across {} value object(s) in {} files",
            errors,
            result.reports.len(),
            result.files_checked
        );

        Ok(result)
    }

    fn relative(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf)
    }

    /// Discovers all Rust source files to scan.
    fn discover_files(&self) -> Result<Vec<PathBuf>, ScanError> {
        let candidates = if self.respect_gitignore {
            self.walk_files()?
        } else {
            self.glob_files()?
        };

        let mut files: Vec<PathBuf> = candidates
            .into_iter()
            .filter(|path| {
                let excluded = self.should_exclude(path);
                if excluded {
                    debug!("Excluding: {}", path.display());
                }
                !excluded && self.should_include(path)
            })
            .collect();

        files.sort();
        Ok(files)
    }

    fn walk_files(&self) -> Result<Vec<PathBuf>, ScanError> {
        let mut builder = ignore::WalkBuilder::new(&self.root);
        builder.hidden(false).git_ignore(true).require_git(false);

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "rs") {
                files.push(path.to_path_buf());
            }
        }
        Ok(files)
    }

    fn glob_files(&self) -> Result<Vec<PathBuf>, ScanError> {
        let pattern = format!("{}/**/*.rs", self.root.display());
        let mut files = Vec::new();

        for entry in glob::glob(&pattern)? {
            files.push(entry.map_err(glob::GlobError::into_error)?);
        }
        Ok(files)
    }

    /// Checks if a path should be excluded. Patterns are matched against
    /// the path relative to the root.
    fn should_exclude(&self, path: &Path) -> bool {
        let relative = self.relative(path);
        let relative = relative.to_string_lossy();
        let rooted = format!("/{relative}");

        self.exclude_patterns.iter().any(|pattern| {
            if glob::Pattern::new(pattern).is_ok_and(|p| p.matches(&relative)) {
                return true;
            }

            // Also check as substring for patterns like "**/target/**"
            let normalized = pattern.replace("**", "");
            !normalized.is_empty() && normalized != "/" && rooted.contains(&normalized)
        })
    }

    fn should_include(&self, path: &Path) -> bool {
        if self.include_patterns.is_empty() {
            return true;
        }
        let relative = self.relative(path);
        self.include_patterns
            .iter()
            .any(|p| p.matches_path(&relative))
    }
}

/// Result of scanning a project.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanResult {
    /// One report per value object, in discovery order.
    pub reports: Vec<TypeReport>,
    /// Number of files parsed.
    pub files_checked: usize,
    /// Source text of every parsed file, keyed by path relative to the root.
    #[serde(skip)]
    pub sources: BTreeMap<PathBuf, String>,
}

impl ScanResult {
    /// Returns true if any value object has an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.reports.iter().any(|r| r.diagnostics.has_errors())
    }

    /// Every diagnostic, grouped by value object.
    pub fn diagnostics(&self) -> impl Iterator<Item = &crate::diagnostic::Diagnostic> {
        self.reports.iter().flat_map(|r| r.diagnostics.iter())
    }

    /// Counts diagnostics by severity.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        self.reports
            .iter()
            .map(|r| r.diagnostics.count_by_severity())
            .fold((0, 0, 0), |(e, w, i), (de, dw, di)| (e + de, w + dw, i + di))
    }

    /// Value objects that may be generated.
    #[must_use]
    pub fn emittable(&self) -> Vec<&str> {
        self.reports
            .iter()
            .filter(|r| r.can_emit())
            .map(|r| r.name.as_str())
            .collect()
    }

    /// Prints a summary report to stdout.
    pub fn print_report(&self) {
        let (errors, warnings, infos) = self.count_by_severity();

        for diagnostic in self.diagnostics() {
            println!("{}", diagnostic.format());
        }

        println!(
            "\nFound {} error(s), {} warning(s), {} info(s) in {} value object(s), {} file(s)",
            errors,
            warnings,
            infos,
            self.reports.len(),
            self.files_checked
        );
    }

    /// Formats diagnostics as a test failure report.
    ///
    /// Produces a human-readable multi-line report suitable for `panic!()`
    /// messages in `cargo test` integration.
    #[must_use]
    pub fn format_test_report(&self, fail_on: Severity) -> String {
        use std::fmt::Write;

        let failing: Vec<_> = self
            .diagnostics()
            .filter(|d| d.severity() >= fail_on)
            .collect();

        let mut report = String::new();
        let _ = writeln!(
            report,
            "\n=== voguard: {} diagnostic(s) ===\n",
            failing.len()
        );

        for d in &failing {
            let _ = writeln!(report, "{} [{}] at {}", d.title(), d.code(), d.location());
            let _ = writeln!(report, "  {}: {}", d.severity(), d.message());
            for also in d.additional_locations() {
                let _ = writeln!(report, "  = also: {also}");
            }
            let _ = writeln!(report);
        }

        let (errors, warnings, infos) = self.count_by_severity();
        let _ = writeln!(
            report,
            "Total: {} error(s), {} warning(s), {} info(s) in {} file(s)",
            errors, warnings, infos, self.files_checked
        );

        report
    }

    /// Checks if any diagnostic meets or exceeds the given severity.
    #[must_use]
    pub fn has_diagnostics_at(&self, severity: Severity) -> bool {
        self.diagnostics().any(|d| d.severity() >= severity)
    }
}
