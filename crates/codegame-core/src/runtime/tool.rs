//! Toolchain detection
//!
//! Checks that the language toolchain a module shells out to (e.g. `go`)
//! is installed, and points the user at its install docs when it isn't.

use anyhow::Result;
use colored::Colorize;
use std::process::Command;

/// Configuration for a toolchain binary
#[derive(Debug, Clone)]
pub struct ToolConfig {
    /// Name of the binary (e.g., "go")
    pub name: &'static str,
    /// Display name for user-facing messages
    pub display_name: &'static str,
    /// Arguments that make the binary print its version
    pub version_args: &'static [&'static str],
    /// URL to the installation instructions
    pub docs_url: &'static str,
}

/// Manager for checking a toolchain binary
pub struct ToolManager {
    config: ToolConfig,
}

impl ToolManager {
    /// Create a new tool manager with the given configuration
    pub fn new(config: ToolConfig) -> Self {
        Self { config }
    }

    /// Get the tool configuration
    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    /// Check if the tool is installed and available in PATH
    pub fn is_installed(&self) -> bool {
        which::which(self.config.name).is_ok()
    }

    /// Get the installed tool version (if available)
    pub fn get_version(&self) -> Option<String> {
        Command::new(self.config.name)
            .args(self.config.version_args)
            .output()
            .ok()
            .and_then(|output| {
                if output.status.success() {
                    String::from_utf8(output.stdout)
                        .ok()
                        .map(|s| s.trim().to_string())
                } else {
                    None
                }
            })
    }

    /// Fail with install instructions unless the tool is installed
    pub fn require(&self) -> Result<()> {
        if self.is_installed() {
            return Ok(());
        }
        anyhow::bail!(
            "'{}' is not installed. Install {} from {} and try again.",
            self.config.name,
            self.config.display_name,
            self.config.docs_url
        );
    }

    /// Open the tool's installation docs in the default browser
    pub fn open_docs(&self) -> Result<()> {
        println!(
            "{}",
            format!(
                "Opening {} installation instructions in your browser...",
                self.config.display_name
            )
            .cyan()
        );
        open::that(self.config.docs_url)?;
        Ok(())
    }
}
