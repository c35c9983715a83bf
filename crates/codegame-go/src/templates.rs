//! Go project templates embedded into the binary

use anyhow::Result;
use codegame_core::game::CgeDefinitions;
use codegame_core::project::pascal_case;
use codegame_core::TemplateSet;
use serde::Serialize;

pub const GITIGNORE: &str = "gitignore";

pub const CLIENT_MAIN: &str = "client/main.go";
pub const CLIENT_GAME: &str = "client/game.go";
pub const CLIENT_EVENTS: &str = "client/events.go";

pub const SERVER_MAIN: &str = "server/main.go";
pub const SERVER_GAME: &str = "server/game.go";
pub const SERVER_EVENT_DEFINITIONS: &str = "server/event_definitions.go";
pub const SERVER_EVENTS_CGE: &str = "server/events.cge";
pub const SERVER_DOCKERFILE: &str = "server/Dockerfile";
pub const SERVER_DOCKERIGNORE: &str = "server/dockerignore";

const TEMPLATES: &[(&str, &str)] = &[
    (GITIGNORE, include_str!("templates/gitignore.jinja")),
    (CLIENT_MAIN, include_str!("templates/client/main.go.jinja")),
    (CLIENT_GAME, include_str!("templates/client/game.go.jinja")),
    (CLIENT_EVENTS, include_str!("templates/client/events.go.jinja")),
    (SERVER_MAIN, include_str!("templates/server/main.go.jinja")),
    (SERVER_GAME, include_str!("templates/server/game.go.jinja")),
    (
        SERVER_EVENT_DEFINITIONS,
        include_str!("templates/server/event_definitions.go.jinja"),
    ),
    (SERVER_EVENTS_CGE, include_str!("templates/server/events.cge.jinja")),
    (SERVER_DOCKERFILE, include_str!("templates/server/Dockerfile.jinja")),
    (SERVER_DOCKERIGNORE, include_str!("templates/server/dockerignore.jinja")),
];

/// All Go templates, ready to render
pub fn go_templates() -> Result<TemplateSet> {
    TemplateSet::new().with_templates(TEMPLATES)
}

/// An event or command name as the templates see it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identifier {
    pub name: String,
    pub pascal_name: String,
}

impl Identifier {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            pascal_name: pascal_case(name),
        }
    }
}

/// Template data for the generated client package
#[derive(Debug, Clone, Serialize)]
pub struct ClientData {
    pub game_name: String,
    pub package_name: String,
    pub module_path: String,
    pub library_url: String,
    pub events: Vec<Identifier>,
    pub commands: Vec<Identifier>,
}

impl ClientData {
    pub fn new(
        game_name: &str,
        module_path: &str,
        library_url: &str,
        definitions: &CgeDefinitions,
    ) -> Self {
        Self {
            game_name: game_name.to_string(),
            package_name: codegame_core::project::package_name(game_name),
            module_path: module_path.to_string(),
            library_url: library_url.to_string(),
            events: definitions.events.iter().map(|e| Identifier::new(e)).collect(),
            commands: definitions
                .commands
                .iter()
                .map(|c| Identifier::new(c))
                .collect(),
        }
    }
}

/// Template data for a new server project
#[derive(Debug, Clone, Serialize)]
pub struct ServerData {
    pub name: String,
    pub package_name: String,
    pub module_path: String,
    pub library_url: String,
}

impl ServerData {
    pub fn new(name: &str, module_path: &str, library_url: &str) -> Self {
        Self {
            name: name.to_string(),
            package_name: codegame_core::project::package_name(name),
            module_path: module_path.to_string(),
            library_url: library_url.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::Value;

    fn definitions() -> CgeDefinitions {
        CgeDefinitions {
            version: "0.5".to_string(),
            name: Some("tic_tac_toe".to_string()),
            events: vec!["board".to_string(), "game_over".to_string()],
            commands: vec!["mark".to_string()],
        }
    }

    #[test]
    fn test_all_templates_parse() {
        let set = go_templates().unwrap();
        let server = Value::from_serialize(ServerData::new(
            "pong",
            "github.com/someone/pong",
            "github.com/code-game-project/go-server/cg",
        ));
        for name in [
            SERVER_MAIN,
            SERVER_GAME,
            SERVER_EVENT_DEFINITIONS,
            SERVER_EVENTS_CGE,
            SERVER_DOCKERFILE,
            SERVER_DOCKERIGNORE,
            GITIGNORE,
        ] {
            assert!(set.render(name, &server).is_ok(), "{} failed to render", name);
        }
    }

    #[test]
    fn test_client_events_use_pascal_case() {
        let set = go_templates().unwrap();
        let data = ClientData::new(
            "tic-tac_toe",
            "example.com/ttt",
            "github.com/code-game-project/go-client/v2/cg",
            &definitions(),
        );
        let out = set
            .render(CLIENT_EVENTS, &Value::from_serialize(&data))
            .unwrap();

        assert!(out.contains("package tictactoe"));
        assert!(out.contains("\"github.com/code-game-project/go-client/v2/cg\""));
        assert!(out.contains("const GameOverEvent cg.EventName = \"game_over\""));
        assert!(out.contains("func (g *Game) SendMark("));
    }

    #[test]
    fn test_client_events_without_definitions_has_no_imports() {
        let set = go_templates().unwrap();
        let data = ClientData::new(
            "pong",
            "pong",
            "github.com/code-game-project/go-client/cg",
            &CgeDefinitions::default(),
        );
        let out = set
            .render(CLIENT_EVENTS, &Value::from_serialize(&data))
            .unwrap();
        assert!(!out.contains("import"));
    }

    #[test]
    fn test_client_main_imports_game_package() {
        let set = go_templates().unwrap();
        let data = ClientData::new(
            "pong",
            "github.com/someone/pong-client",
            "github.com/code-game-project/go-client/cg",
            &definitions(),
        );
        let out = set
            .render(CLIENT_MAIN, &Value::from_serialize(&data))
            .unwrap();
        assert!(out.contains("\"github.com/someone/pong-client/pong\""));
        assert!(out.contains("game.OnBoard("));
    }
}
