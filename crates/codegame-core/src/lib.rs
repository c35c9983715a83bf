//! CodeGame Core - Shared library for CodeGame language module CLIs
//!
//! This library provides the functionality shared by language modules that
//! scaffold, update, run and build CodeGame client and server projects.
//! A module binary (e.g. `codegame-go`) supplies its `ModuleConfig`, its
//! templates and its workflows on top of it.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Version resolution, tag providers, CGE parsing,
//!   project descriptor and config loading
//! - **Layer 2: Seams** - `TagProvider`, `CommandRunner`, `TemplateRenderer` and
//!   `Feedback` traits that workflows are written against
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based console and prompts
//!
//! # Example Usage
//!
//! ```ignore
//! use codegame_core::{GitHubTags, VersionResolver, VersionSpecifier};
//!
//! let resolver = VersionResolver::new(GitHubTags::from_env("codegame-go")?);
//! let resolved = resolver.resolve(&GO_CLIENT, &"0.8".parse()?).await?;
//! println!("go get {}", resolved.go_get_target());
//! ```

pub mod config;
pub mod error;
pub mod feedback;
pub mod game;
pub mod library;
pub mod module_config;
pub mod project;
pub mod runtime;
pub mod tags;
pub mod templates;
pub mod version;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::CliConfig;
pub use error::ResolveError;
pub use feedback::Feedback;
pub use library::Library;
pub use module_config::{ModuleConfig, ModuleInfo};
pub use project::{CodeGameFile, ProjectType};
pub use runtime::{CommandRunner, CommandSpec, SystemRunner};
pub use tags::{GitHubTags, StaticTags, TagProvider};
pub use templates::{FsRenderer, TemplateRenderer, TemplateSet};
pub use version::{
    LibraryVersion, PrefixMatch, ResolvedLibrary, SelectionPolicy, VersionResolver,
    VersionSpecifier,
};
