//! Module configuration trait for language module binaries
//!
//! Each language module (e.g. Go) implements this trait to describe the
//! libraries its projects depend on and the toolchain it drives.

use crate::library::Library;
use crate::project::cgfile::ProjectType;
use crate::runtime::tool::{ToolConfig, ToolManager};
use crate::version::{check_compatibility, LibraryVersion, ResolvedLibrary};
use serde::Serialize;
use std::collections::BTreeMap;

/// Configuration trait for language modules
///
/// Each module implements this trait to define:
/// - Module identity (name, display name)
/// - Support library per project type
/// - The library versions its templates were written for
/// - The toolchain it requires
pub trait ModuleConfig: Clone + Send + Sync + 'static {
    /// Language identifier stored in `.codegame.json` (e.g. "go")
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Support library for a project type
    fn library(&self, project_type: ProjectType) -> Library;

    /// Library version the module's templates target
    fn supported_version(&self, project_type: ProjectType) -> LibraryVersion;

    /// Toolchain binary the module shells out to
    fn toolchain(&self) -> ToolConfig;

    /// Actions the module implements, as reported by `info`
    fn actions(&self) -> &'static [&'static str];

    /// Upgrade/install command shown in compatibility warnings
    fn upgrade_command(&self) -> &'static str;

    /// User agent string for HTTP requests
    fn user_agent(&self) -> &'static str {
        self.name()
    }

    /// Tool manager for the module's toolchain
    fn tool(&self) -> ToolManager {
        ToolManager::new(self.toolchain())
    }

    /// Warning when `resolved` is newer than the templates expect
    fn compatibility_warning(
        &self,
        project_type: ProjectType,
        resolved: &ResolvedLibrary,
    ) -> Option<String> {
        check_compatibility(
            self.library(project_type).name,
            resolved.version,
            self.supported_version(project_type),
            self.upgrade_command(),
        )
    }
}

/// Machine-readable description of a module, printed by `info`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleInfo {
    pub actions: Vec<String>,
    pub library_versions: BTreeMap<String, Vec<String>>,
    pub application_types: Vec<String>,
}

impl ModuleInfo {
    pub fn from_config<C: ModuleConfig>(config: &C) -> Self {
        let types = [ProjectType::Client, ProjectType::Server];
        Self {
            actions: config.actions().iter().map(|a| a.to_string()).collect(),
            library_versions: types
                .iter()
                .map(|t| {
                    (
                        t.to_string(),
                        vec![config.supported_version(*t).to_string()],
                    )
                })
                .collect(),
            application_types: types.iter().map(ToString::to_string).collect(),
        }
    }
}
