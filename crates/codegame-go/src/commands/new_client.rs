//! `new client`: scaffold a Go client for a running game

use anyhow::Result;
use codegame_core::game::{trim_url, CgeDefinitions};
use codegame_core::{CodeGameFile, ModuleConfig, ProjectType, TagProvider, VersionSpecifier};
use std::path::Path;

use crate::gomod::check_module_path;
use crate::session::Session;
use crate::templates::{self, ClientData};

/// Inputs of `new client`, already prompted for
#[derive(Debug, Clone)]
pub struct NewClientOptions {
    pub game_name: String,
    pub url: String,
    pub module_path: String,
    pub library_version: VersionSpecifier,
    /// Events and commands of the game, from its CGE file
    pub definitions: CgeDefinitions,
}

pub async fn run<P: TagProvider>(
    session: &Session<'_, P>,
    options: &NewClientOptions,
) -> Result<()> {
    check_module_path(&options.module_path)?;

    let resolved = session
        .resolve(ProjectType::Client, &options.library_version)
        .await?;

    session.step(
        "Initializing Go module...",
        &session.go(["mod", "init", options.module_path.as_str()]),
    )?;
    session.install_library(&resolved)?;

    let data = ClientData::new(
        &options.game_name,
        &options.module_path,
        &resolved.import_path,
        &options.definitions,
    );
    render_files(session, &data)?;
    session.feedback.warn(&format!(
        "DO NOT EDIT the `{}/` directory inside of the project. ALL CHANGES WILL BE LOST when running `codegame update`.",
        data.package_name
    ));

    session.step("Tidying dependencies...", &session.go(["mod", "tidy"]))?;

    CodeGameFile::new(&options.game_name, ProjectType::Client, session.module.name())
        .with_url(trim_url(&options.url))
        .save(&session.project_dir)?;

    session.feedback.success(&format!(
        "Created {} client for '{}'",
        session.module.display_name(),
        options.game_name
    ));
    Ok(())
}

fn render_files<P: TagProvider>(session: &Session<'_, P>, data: &ClientData) -> Result<()> {
    session.render(templates::CLIENT_MAIN, Path::new("main.go"), data)?;
    session.render(templates::GITIGNORE, Path::new(".gitignore"), data)?;
    render_game_package(session, data)
}

/// Write the generated `<pkg>/game.go` and `<pkg>/events.go`
pub fn render_game_package<P: TagProvider>(
    session: &Session<'_, P>,
    data: &ClientData,
) -> Result<()> {
    let package_dir = Path::new(&data.package_name);
    session.render(templates::CLIENT_GAME, &package_dir.join("game.go"), data)?;
    session.render(templates::CLIENT_EVENTS, &package_dir.join("events.go"), data)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::testing::Harness;
    use codegame_core::runtime::RecordingRunner;

    fn options() -> NewClientOptions {
        NewClientOptions {
            game_name: "tic-tac-toe".to_string(),
            url: " https://games.example.com/ttt/ ".to_string(),
            module_path: "github.com/someone/ttt-client".to_string(),
            library_version: VersionSpecifier::Latest,
            definitions: CgeDefinitions {
                version: "0.5".to_string(),
                name: Some("tic_tac_toe".to_string()),
                events: vec!["board".to_string()],
                commands: vec!["mark".to_string()],
            },
        }
    }

    #[tokio::test]
    async fn test_new_client_runs_go_in_order() {
        let harness = Harness::new(&["v2.1.0", "v1.9.0"]);
        run(&harness.session(), &options()).await.unwrap();

        assert_eq!(
            harness.runner.command_lines(),
            vec![
                "go mod init github.com/someone/ttt-client",
                "go get github.com/code-game-project/go-client/v2/cg@v2.1.0",
                "go mod tidy",
            ]
        );
        for call in harness.runner.calls() {
            assert_eq!(call.dir.as_deref(), Some(harness.dir.path()));
        }
    }

    #[tokio::test]
    async fn test_new_client_writes_files_and_descriptor() {
        let harness = Harness::new(&["v0.9.3", "v0.9.1"]);
        run(&harness.session(), &options()).await.unwrap();

        assert!(harness.path("main.go").is_file());
        assert!(harness.path(".gitignore").is_file());
        assert!(harness.read("tictactoe/events.go").contains("BoardEvent"));
        assert!(harness
            .read("tictactoe/game.go")
            .contains("\"github.com/code-game-project/go-client/cg\""));

        let descriptor = CodeGameFile::load(harness.dir.path()).unwrap();
        assert_eq!(descriptor.game, "tic-tac-toe");
        assert_eq!(descriptor.kind().unwrap(), ProjectType::Client);
        assert_eq!(descriptor.lang, "go");
        assert_eq!(descriptor.url.as_deref(), Some("games.example.com/ttt"));

        assert!(harness.feedback.contains("warn", "DO NOT EDIT the `tictactoe/` directory"));
    }

    #[tokio::test]
    async fn test_resolution_failure_leaves_directory_untouched() {
        let harness = Harness::new(&["v1.0.0"]);
        let mut options = options();
        options.library_version = "9.0".parse().unwrap();

        assert!(run(&harness.session(), &options).await.is_err());
        assert!(harness.runner.calls().is_empty());
        assert!(!harness.path(".codegame.json").exists());
    }

    #[tokio::test]
    async fn test_invalid_module_path() {
        let harness = Harness::new(&["v0.9.0"]);
        let mut options = options();
        options.module_path = "my client".to_string();

        let err = run(&harness.session(), &options).await.unwrap_err();
        assert!(err.to_string().contains("Invalid module path"));
        assert!(harness.runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failed_go_get_stops_before_rendering() {
        let harness = Harness::with_runner(&["v0.9.0"], RecordingRunner::failing_on("go get"));
        assert!(run(&harness.session(), &options()).await.is_err());

        assert!(!harness.path("main.go").exists());
        assert!(!harness.path(".codegame.json").exists());
        assert!(harness.feedback.contains("fail", "go get"));
    }
}
