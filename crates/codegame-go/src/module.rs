//! Go module configuration

use codegame_core::library::Library;
use codegame_core::runtime::ToolConfig;
use codegame_core::{LibraryVersion, ModuleConfig, ProjectType};

/// Client support library
pub const GO_CLIENT: Library = Library {
    name: "go-client",
    owner: "code-game-project",
    repository: "go-client",
    import_root: "github.com/code-game-project/go-client/cg",
};

/// Server support library
pub const GO_SERVER: Library = Library {
    name: "go-server",
    owner: "code-game-project",
    repository: "go-server",
    import_root: "github.com/code-game-project/go-server/cg",
};

/// Go module configuration
#[derive(Clone)]
pub struct GoModule;

impl ModuleConfig for GoModule {
    fn name(&self) -> &'static str {
        "go"
    }

    fn display_name(&self) -> &'static str {
        "CodeGame Go"
    }

    fn library(&self, project_type: ProjectType) -> Library {
        match project_type {
            ProjectType::Client => GO_CLIENT,
            ProjectType::Server => GO_SERVER,
        }
    }

    fn supported_version(&self, project_type: ProjectType) -> LibraryVersion {
        match project_type {
            ProjectType::Client => LibraryVersion::new(0, 9),
            ProjectType::Server => LibraryVersion::new(0, 9),
        }
    }

    fn toolchain(&self) -> ToolConfig {
        ToolConfig {
            name: "go",
            display_name: "Go",
            version_args: &["version"],
            docs_url: "https://go.dev/doc/install",
        }
    }

    fn actions(&self) -> &'static [&'static str] {
        &["info", "new", "update", "run", "build"]
    }

    fn upgrade_command(&self) -> &'static str {
        "cargo install codegame-go --force"
    }

    fn user_agent(&self) -> &'static str {
        concat!("codegame-go/", env!("CARGO_PKG_VERSION"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codegame_core::ModuleInfo;

    #[test]
    fn test_libraries_per_project_type() {
        assert_eq!(GoModule.library(ProjectType::Client).name, "go-client");
        assert_eq!(GoModule.library(ProjectType::Server).name, "go-server");
    }

    #[test]
    fn test_module_info_json() {
        let info = ModuleInfo::from_config(&GoModule);
        let json = serde_json::to_value(&info).unwrap();

        assert_eq!(json["application_types"], serde_json::json!(["client", "server"]));
        assert_eq!(json["library_versions"]["client"], serde_json::json!(["0.9"]));
        assert!(json["actions"]
            .as_array()
            .unwrap()
            .iter()
            .any(|a| a == "new"));
    }
}
