//! User configuration (`config.yaml`)

use crate::version::{PrefixMatch, SelectionPolicy, VersionSpecifier, LATEST};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable pointing at an alternative config file
pub const CONFIG_PATH_ENV: &str = "CODEGAME_CONFIG";

/// Port game servers listen on during `run`
pub const DEFAULT_DEV_PORT: u16 = 8080;

fn default_dev_port() -> u16 {
    DEFAULT_DEV_PORT
}

fn default_library_version() -> String {
    LATEST.to_string()
}

/// Settings shared by all CodeGame modules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Port passed to servers started with `run`
    #[serde(default = "default_dev_port")]
    pub dev_port: u16,

    /// Library version used when none is given on the command line
    #[serde(default = "default_library_version")]
    pub library_version: String,

    /// Pick the highest patch release instead of the newest listed tag
    #[serde(default)]
    pub prefer_highest_patch: bool,

    /// Only match tags where `major.minor` ends on a component boundary
    #[serde(default)]
    pub strict_version_prefix: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            dev_port: DEFAULT_DEV_PORT,
            library_version: default_library_version(),
            prefer_highest_patch: false,
            strict_version_prefix: false,
        }
    }
}

impl CliConfig {
    /// Location of the config file: `$CODEGAME_CONFIG` or
    /// `<config dir>/codegame/config.yaml`
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("codegame").join("config.yaml"))
    }

    /// Load the config from its default location, falling back to defaults
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load the config from `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Version specifier to use when the command line doesn't give one
    pub fn library_version(&self) -> Result<VersionSpecifier> {
        self.library_version.parse().with_context(|| {
            format!(
                "Invalid library_version in config: {}",
                self.library_version
            )
        })
    }

    /// Tag selection policy, with `force_highest` taking precedence
    pub fn selection_policy(&self, force_highest: bool) -> SelectionPolicy {
        if force_highest || self.prefer_highest_patch {
            SelectionPolicy::HighestPatch
        } else {
            SelectionPolicy::ProviderOrder
        }
    }

    /// Prefix matching rule, with `force_strict` taking precedence
    pub fn prefix_match(&self, force_strict: bool) -> PrefixMatch {
        if force_strict || self.strict_version_prefix {
            PrefixMatch::ComponentBoundary
        } else {
            PrefixMatch::Literal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::LibraryVersion;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = CliConfig::load_from(&dir.path().join("config.yaml")).unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.dev_port, 8080);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "dev_port: 9000\nlibrary_version: \"0.8\"\n").unwrap();

        let config = CliConfig::load_from(&path).unwrap();
        assert_eq!(config.dev_port, 9000);
        assert!(!config.prefer_highest_patch);
        assert_eq!(
            config.library_version().unwrap(),
            VersionSpecifier::Exact(LibraryVersion::new(0, 8))
        );
    }

    #[test]
    fn test_invalid_yaml_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "dev_port: [not a port").unwrap();

        let err = CliConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("config.yaml"));
    }

    #[test]
    fn test_selection_policy() {
        let mut config = CliConfig::default();
        assert_eq!(config.selection_policy(false), SelectionPolicy::ProviderOrder);
        assert_eq!(config.selection_policy(true), SelectionPolicy::HighestPatch);
        config.prefer_highest_patch = true;
        assert_eq!(config.selection_policy(false), SelectionPolicy::HighestPatch);
    }

    #[test]
    fn test_prefix_match_defaults_to_literal() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "dev_port: 9000\n").unwrap();
        let config = CliConfig::load_from(&path).unwrap();
        assert_eq!(config.prefix_match(false), PrefixMatch::Literal);
        assert_eq!(config.prefix_match(true), PrefixMatch::ComponentBoundary);

        std::fs::write(&path, "strict_version_prefix: true\n").unwrap();
        let config = CliConfig::load_from(&path).unwrap();
        assert_eq!(config.prefix_match(false), PrefixMatch::ComponentBoundary);
    }
}
