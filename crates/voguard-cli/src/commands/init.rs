//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const CONFIG_FILE: &str = "voguard.toml";

const DEFAULT_CONFIG: &str = r#"# voguard configuration

[scan]
# Root directory to scan (default: current directory)
# root = "./src"

# Glob patterns to exclude from scanning
exclude = [
    "**/target/**",
    "**/vendor/**",
]

# Glob patterns to include (default: every *.rs file)
# include = ["src/**/*.rs"]

# Respect .gitignore files
respect_gitignore = true

# Value objects analyzed in parallel (default: sequential)
# parallelism = 4

# Used when #[value_object(...)] leaves an argument out
[defaults]
# underlying = "i32"
# conversions = "display | serde"
# throws = "crate::DomainError"
"#;

/// Writes a starter `voguard.toml` into `dir`.
pub fn run(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to set project defaults");
    println!("  2. Run: voguard check");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use voguard_core::{Config, Extractor};

    #[test]
    fn template_is_a_valid_config() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.scan.exclude, vec!["**/target/**", "**/vendor/**"]);
        assert!(Extractor::new(".").with_defaults(&config.defaults).is_ok());
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "# mine\n").unwrap();

        assert!(run(dir.path(), false).is_err());
        let kept = std::fs::read_to_string(dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(kept, "# mine\n");

        run(dir.path(), true).unwrap();
        let written = std::fs::read_to_string(dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(written, DEFAULT_CONFIG);
    }
}
