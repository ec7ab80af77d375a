//! Finds and loads `voguard.toml`.
//!
//! Lookup order:
//!
//! 1. `--config` flag (or `$VOGUARD_CONFIG`)
//! 2. `{project}/voguard.toml` or `{project}/.voguard.toml`
//! 3. `$VOGUARD_CONFIG_DIR/config.toml`, else `~/.voguard/config.toml`
//! 4. Built-in defaults

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use voguard_core::Config;

/// Where the configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given on the command line.
    Explicit(PathBuf),
    /// Found next to the project being checked.
    Project(PathBuf),
    /// Found in the user's global config directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// Config file path, if one was found.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Reads and parses the file, or returns defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load(&self) -> Result<Config> {
        let Some(path) = self.path() else {
            tracing::debug!("No config file found, using defaults");
            return Ok(Config::default());
        };
        if matches!(self, Self::Global(_)) {
            tracing::info!("Using global config: {}", path.display());
        }
        Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
    }
}

/// File names looked for in the project directory, in order.
const PROJECT_FILES: [&str; 2] = ["voguard.toml", ".voguard.toml"];

/// File name inside the global directory.
const GLOBAL_FILE: &str = "config.toml";

/// Environment variable overriding the global directory.
const GLOBAL_DIR_ENV: &str = "VOGUARD_CONFIG_DIR";

/// Resolves which configuration file applies to `project_dir`.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    let global = std::env::var_os(GLOBAL_DIR_ENV)
        .map(PathBuf::from)
        .or_else(|| home::home_dir().map(|h| h.join(".voguard")));
    resolve_in(project_dir, explicit, global.as_deref())
}

fn resolve_in(project_dir: &Path, explicit: Option<&Path>, global_dir: Option<&Path>) -> ConfigSource {
    if let Some(path) = explicit {
        return ConfigSource::Explicit(path.to_path_buf());
    }

    let project = PROJECT_FILES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|candidate| candidate.is_file());
    if let Some(path) = project {
        tracing::debug!("Found project config: {}", path.display());
        return ConfigSource::Project(path);
    }

    match global_dir.map(|dir| dir.join(GLOBAL_FILE)) {
        Some(path) if path.is_file() => {
            tracing::debug!("Found global config: {}", path.display());
            ConfigSource::Global(path)
        }
        _ => ConfigSource::Default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn explicit_wins_even_if_missing() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join("voguard.toml"), "").unwrap();

        let source = resolve_in(project.path(), Some(Path::new("/missing.toml")), None);
        assert_eq!(source, ConfigSource::Explicit(PathBuf::from("/missing.toml")));
        assert!(source.load().is_err());
    }

    #[test]
    fn plain_name_preferred_over_hidden() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join(".voguard.toml"), "").unwrap();
        assert_eq!(
            resolve_in(project.path(), None, None),
            ConfigSource::Project(project.path().join(".voguard.toml"))
        );

        fs::write(project.path().join("voguard.toml"), "").unwrap();
        assert_eq!(
            resolve_in(project.path(), None, None),
            ConfigSource::Project(project.path().join("voguard.toml"))
        );
    }

    #[test]
    fn global_used_only_without_project_config() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        fs::write(global.path().join("config.toml"), "[defaults]\nunderlying = \"u64\"\n").unwrap();

        let source = resolve_in(project.path(), None, Some(global.path()));
        assert_eq!(source, ConfigSource::Global(global.path().join("config.toml")));
        let config = source.load().unwrap();
        assert_eq!(config.defaults.underlying.as_deref(), Some("u64"));

        fs::write(project.path().join("voguard.toml"), "").unwrap();
        assert!(matches!(
            resolve_in(project.path(), None, Some(global.path())),
            ConfigSource::Project(_)
        ));
    }

    #[test]
    fn nothing_found_loads_defaults() {
        let project = TempDir::new().unwrap();
        let empty_global = TempDir::new().unwrap();

        let source = resolve_in(project.path(), None, Some(empty_global.path()));
        assert_eq!(source, ConfigSource::Default);
        assert!(source.path().is_none());

        let config = source.load().unwrap();
        assert!(config.scan.respect_gitignore);
        assert!(config.defaults.throws.is_none());
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join("voguard.toml"), "[scan\n").unwrap();

        let err = resolve_in(project.path(), None, None).load().unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }
}
