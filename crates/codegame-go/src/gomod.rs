//! `go.mod` helpers

use anyhow::{Context, Result};
use std::path::Path;

/// Module path declared in `<project_root>/go.mod`
pub fn module_name(project_root: &Path) -> Result<String> {
    let path = project_root.join("go.mod");
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to open '{}'", path.display()))?;

    content
        .lines()
        .find_map(|line| line.trim().strip_prefix("module "))
        .map(|module| {
            module
                .trim()
                .trim_matches('"')
                .trim_end_matches('/')
                .to_string()
        })
        .filter(|module| !module.is_empty())
        .ok_or_else(|| anyhow::anyhow!("Missing 'module' statement in '{}'", path.display()))
}

/// Check that `path` is usable as a Go module path
pub fn validate_module_path(path: &str) -> Result<(), String> {
    if path.is_empty() {
        return Err("module path must not be empty".to_string());
    }
    if let Some(c) = path
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '~' | '/' | '-')))
    {
        return Err(format!("invalid character {:?} in module path", c));
    }
    if path.starts_with('/') || path.ends_with('/') {
        return Err("module path must not start or end with '/'".to_string());
    }
    for element in path.split('/') {
        if element.is_empty() {
            return Err("module path must not contain empty elements ('//')".to_string());
        }
        if element.starts_with('.') {
            return Err(format!("path element {:?} must not start with '.'", element));
        }
    }
    Ok(())
}

/// `validate_module_path` as an error naming the rejected path
pub fn check_module_path(path: &str) -> Result<()> {
    validate_module_path(path)
        .map_err(|message| anyhow::anyhow!("Invalid module path '{}': {}", path, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_module_name() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("go.mod"),
            "module github.com/someone/pong/\n\ngo 1.21\n",
        )
        .unwrap();
        assert_eq!(module_name(dir.path()).unwrap(), "github.com/someone/pong");
    }

    #[test]
    fn test_module_name_missing_statement() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("go.mod"), "go 1.21\n").unwrap();
        let err = module_name(dir.path()).unwrap_err();
        assert!(err.to_string().contains("Missing 'module' statement"));
    }

    #[test]
    fn test_module_name_missing_file() {
        let dir = tempdir().unwrap();
        assert!(module_name(dir.path()).is_err());
    }

    #[test]
    fn test_validate_module_path() {
        assert!(validate_module_path("pong").is_ok());
        assert!(validate_module_path("github.com/some-one/pong_v2").is_ok());
        assert!(validate_module_path("").is_err());
        assert!(validate_module_path("my game").is_err());
        assert!(validate_module_path("/pong").is_err());
        assert!(validate_module_path("pong/").is_err());
        assert!(validate_module_path("a//b").is_err());
        assert!(validate_module_path("a/.hidden").is_err());
    }
}
