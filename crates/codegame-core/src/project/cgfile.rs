//! The `.codegame.json` project descriptor

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// File name of the project descriptor
pub const CODEGAME_FILE: &str = ".codegame.json";

/// Kind of application a project builds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Client,
    Server,
}

impl ProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Client => "client",
            ProjectType::Server => "server",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProjectType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "client" => Ok(ProjectType::Client),
            "server" => Ok(ProjectType::Server),
            other => anyhow::bail!("Unknown project type: {}", other),
        }
    }
}

/// Contents of `.codegame.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeGameFile {
    /// Name of the game
    pub game: String,

    /// Project type, kept as written so unknown types can be reported
    #[serde(rename = "type")]
    pub project_type: String,

    /// Language module that owns the project (e.g. "go")
    pub lang: String,

    /// Game server URL (clients only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Keys written by other tools, preserved on save
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CodeGameFile {
    pub fn new(game: impl Into<String>, project_type: ProjectType, lang: impl Into<String>) -> Self {
        Self {
            game: game.into(),
            project_type: project_type.to_string(),
            lang: lang.into(),
            url: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Parsed project type; fails for types this module doesn't know
    pub fn kind(&self) -> Result<ProjectType> {
        self.project_type.parse()
    }

    /// Load the descriptor from `dir`
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CODEGAME_FILE);
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Write the descriptor into `dir`
    pub fn save(&self, dir: &Path) -> Result<()> {
        let path = dir.join(CODEGAME_FILE);
        let content =
            serde_json::to_string_pretty(self).context("Failed to serialize project file")?;
        std::fs::write(&path, content + "\n")
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}

/// Find the closest directory at or above `start` containing `.codegame.json`
pub fn find_project_root(start: &Path) -> Result<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(CODEGAME_FILE).is_file())
        .map(Path::to_path_buf)
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Not inside a CodeGame project: no {} found in {} or any parent directory",
                CODEGAME_FILE,
                start.display()
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let file = CodeGameFile::new("tic_tac_toe", ProjectType::Client, "go")
            .with_url("games.example.com/tic-tac-toe");
        file.save(dir.path()).unwrap();

        let loaded = CodeGameFile::load(dir.path()).unwrap();
        assert_eq!(loaded, file);
        assert_eq!(loaded.kind().unwrap(), ProjectType::Client);
    }

    #[test]
    fn test_unknown_keys_preserved() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(CODEGAME_FILE),
            r#"{"game":"pong","type":"server","lang":"go","lang_config":{"x":1}}"#,
        )
        .unwrap();

        let loaded = CodeGameFile::load(dir.path()).unwrap();
        assert!(loaded.url.is_none());
        assert!(loaded.extra.contains_key("lang_config"));

        loaded.save(dir.path()).unwrap();
        let raw = std::fs::read_to_string(dir.path().join(CODEGAME_FILE)).unwrap();
        assert!(raw.contains("lang_config"));
        assert!(!raw.contains("\"url\""));
    }

    #[test]
    fn test_unknown_project_type() {
        let file = CodeGameFile {
            project_type: "bot".to_string(),
            ..CodeGameFile::new("pong", ProjectType::Server, "go")
        };
        let err = file.kind().unwrap_err();
        assert!(err.to_string().contains("Unknown project type: bot"));
    }

    #[test]
    fn test_find_project_root_walks_up() {
        let dir = tempdir().unwrap();
        CodeGameFile::new("pong", ProjectType::Server, "go")
            .save(dir.path())
            .unwrap();
        let nested = dir.path().join("pong").join("internal");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_project_root(&nested).unwrap(), dir.path());
    }

    #[test]
    fn test_find_project_root_missing() {
        let dir = tempdir().unwrap();
        assert!(find_project_root(dir.path()).is_err());
    }
}
