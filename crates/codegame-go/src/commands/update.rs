//! `update`: move a project to another library version

use anyhow::{Context, Result};
use codegame_core::game::CgeDefinitions;
use codegame_core::project::package_name;
use codegame_core::{CodeGameFile, ProjectType, ResolvedLibrary, TagProvider, VersionSpecifier};

use super::new_client::render_game_package;
use crate::gomod::module_name;
use crate::session::Session;
use crate::templates::ClientData;

/// Warning shown before a client's generated package is replaced
pub fn client_warning(descriptor: &CodeGameFile) -> String {
    format!(
        "This action will ERASE and regenerate ALL files in '{}/'.\nYou will have to manually update your code to work with the new version.",
        package_name(&descriptor.game)
    )
}

/// Warning shown before a server's dependencies are upgraded
pub const SERVER_WARNING: &str = "This update might include breaking changes. You will have to manually update your code to work with the new version.";

/// Regenerate the client package from `definitions` and upgrade the library
pub async fn update_client<P: TagProvider>(
    session: &Session<'_, P>,
    descriptor: &CodeGameFile,
    definitions: &CgeDefinitions,
    library_version: &VersionSpecifier,
) -> Result<()> {
    let resolved = session
        .resolve(ProjectType::Client, library_version)
        .await?;
    let module = module_name(&session.project_dir)?;

    let data = ClientData::new(&descriptor.game, &module, &resolved.import_path, definitions);
    let package_dir = session.project_dir.join(&data.package_name);
    if package_dir.exists() {
        std::fs::remove_dir_all(&package_dir)
            .with_context(|| format!("Failed to remove '{}'", package_dir.display()))?;
    }
    render_game_package(session, &data)?;

    upgrade_dependencies(session, &resolved)?;
    session
        .feedback
        .success(&format!("Updated client to {}", resolved.go_get_target()));
    Ok(())
}

/// Upgrade a server's dependencies, pinning the library to the resolved tag
pub async fn update_server<P: TagProvider>(
    session: &Session<'_, P>,
    library_version: &VersionSpecifier,
) -> Result<()> {
    let resolved = session
        .resolve(ProjectType::Server, library_version)
        .await?;

    upgrade_dependencies(session, &resolved)?;
    session
        .feedback
        .success(&format!("Updated server to {}", resolved.go_get_target()));
    Ok(())
}

fn upgrade_dependencies<P: TagProvider>(
    session: &Session<'_, P>,
    resolved: &ResolvedLibrary,
) -> Result<()> {
    session.step(
        "Updating dependencies...",
        &session.go(["get", "-u", "./..."]),
    )?;
    session.install_library(resolved)?;
    session.step("Tidying dependencies...", &session.go(["mod", "tidy"]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::testing::Harness;

    fn client_descriptor() -> CodeGameFile {
        CodeGameFile::new("tic-tac-toe", ProjectType::Client, "go").with_url("games.example.com")
    }

    fn definitions() -> CgeDefinitions {
        CgeDefinitions {
            version: "0.5".to_string(),
            name: None,
            events: vec!["board".to_string(), "winner".to_string()],
            commands: vec![],
        }
    }

    fn write_go_mod(harness: &Harness) {
        std::fs::write(
            harness.path("go.mod"),
            "module github.com/someone/ttt\n\ngo 1.21\n",
        )
        .unwrap();
    }

    #[test]
    fn test_client_warning_names_package_dir() {
        assert!(client_warning(&client_descriptor()).contains("ALL files in 'tictactoe/'"));
    }

    #[tokio::test]
    async fn test_update_client_regenerates_package() {
        let harness = Harness::new(&["v0.9.4", "v0.9.0"]);
        write_go_mod(&harness);
        std::fs::create_dir_all(harness.path("tictactoe")).unwrap();
        std::fs::write(harness.path("tictactoe/stale.go"), "package tictactoe\n").unwrap();
        std::fs::write(harness.path("main.go"), "package main // mine\n").unwrap();

        update_client(
            &harness.session(),
            &client_descriptor(),
            &definitions(),
            &VersionSpecifier::Latest,
        )
        .await
        .unwrap();

        assert!(!harness.path("tictactoe/stale.go").exists());
        assert!(harness.read("tictactoe/events.go").contains("WinnerEvent"));
        assert_eq!(harness.read("main.go"), "package main // mine\n");
        assert_eq!(
            harness.runner.command_lines(),
            vec![
                "go get -u ./...",
                "go get github.com/code-game-project/go-client/cg@v0.9.4",
                "go mod tidy",
            ]
        );
    }

    #[tokio::test]
    async fn test_update_client_requires_go_mod() {
        let harness = Harness::new(&["v0.9.4"]);
        let err = update_client(
            &harness.session(),
            &client_descriptor(),
            &definitions(),
            &VersionSpecifier::Latest,
        )
        .await
        .unwrap_err();

        assert!(err.to_string().contains("go.mod"));
        assert!(harness.runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_update_server_pins_library() {
        let harness = Harness::new(&["v1.2.0", "v0.9.1"]);
        update_server(&harness.session(), &"0.9".parse().unwrap())
            .await
            .unwrap();

        assert_eq!(
            harness.runner.command_lines(),
            vec![
                "go get -u ./...",
                "go get github.com/code-game-project/go-server/cg@v0.9.1",
                "go mod tidy",
            ]
        );
    }

    #[tokio::test]
    async fn test_update_server_unknown_version() {
        let harness = Harness::new(&["v0.9.1"]);
        let err = update_server(&harness.session(), &"0.7".parse().unwrap())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("0.7"));
        assert!(harness.runner.calls().is_empty());
    }
}
