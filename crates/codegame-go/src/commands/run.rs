//! `run`: start a project with `go run .`

use anyhow::Result;
use codegame_core::game::trim_url;
use codegame_core::{CodeGameFile, CommandSpec, TagProvider};

use crate::session::Session;

/// How to connect a client to its game
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientRunOptions {
    /// Replaces the URL stored in `.codegame.json`
    pub override_url: Option<String>,
    pub game_id: Option<String>,
    pub player_id: Option<String>,
    pub player_secret: Option<String>,
    pub spectate: bool,
    /// Passed through to the program
    pub args: Vec<String>,
}

/// `go run .` for a client, configured through `CG_*` variables
pub fn client_command<P: TagProvider>(
    session: &Session<'_, P>,
    descriptor: &CodeGameFile,
    options: &ClientRunOptions,
) -> Result<CommandSpec> {
    let url = options
        .override_url
        .as_deref()
        .or(descriptor.url.as_deref())
        .map(trim_url)
        .filter(|url| !url.is_empty())
        .ok_or_else(|| {
            anyhow::anyhow!("Missing game URL in .codegame.json; pass one with --override-url")
        })?;

    let mut spec = go_run(session, &options.args).env("CG_GAME_URL", url);
    if let Some(game_id) = &options.game_id {
        spec = spec.env("CG_GAME_ID", game_id.as_str());
    }
    if options.spectate {
        spec = spec.env("CG_SPECTATE", "1");
    } else {
        if let Some(player_id) = &options.player_id {
            spec = spec.env("CG_PLAYER_ID", player_id.as_str());
        }
        if let Some(player_secret) = &options.player_secret {
            spec = spec.env("CG_PLAYER_SECRET", player_secret.as_str());
        }
    }
    Ok(spec)
}

/// `go run .` for a server listening on `port`. The server exits with a
/// non-zero status when interrupted, which is not treated as a failure.
pub fn server_command<P: TagProvider>(
    session: &Session<'_, P>,
    port: u16,
    args: &[String],
) -> CommandSpec {
    go_run(session, args)
        .env("CG_PORT", port.to_string())
        .allow_failure()
}

fn go_run<P: TagProvider>(session: &Session<'_, P>, args: &[String]) -> CommandSpec {
    session
        .go(["run", "."])
        .args(args.iter().cloned())
        .inherit_output()
}

/// Run the program in the foreground
pub fn run<P: TagProvider>(session: &Session<'_, P>, spec: &CommandSpec) -> Result<()> {
    session.runner.run(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::testing::Harness;
    use codegame_core::runtime::{OutputMode, RecordingRunner};
    use codegame_core::ProjectType;

    fn descriptor() -> CodeGameFile {
        CodeGameFile::new("pong", ProjectType::Client, "go").with_url("games.example.com")
    }

    #[test]
    fn test_client_player_env() {
        let harness = Harness::new(&[]);
        let options = ClientRunOptions {
            game_id: Some("g1".to_string()),
            player_id: Some("p1".to_string()),
            player_secret: Some("s3cret".to_string()),
            args: vec!["--fast".to_string()],
            ..Default::default()
        };
        let spec = client_command(&harness.session(), &descriptor(), &options).unwrap();

        assert_eq!(spec.args, vec!["run", ".", "--fast"]);
        assert_eq!(spec.output, OutputMode::Inherit);
        assert_eq!(spec.env_value("CG_GAME_URL"), Some("games.example.com"));
        assert_eq!(spec.env_value("CG_GAME_ID"), Some("g1"));
        assert_eq!(spec.env_value("CG_PLAYER_ID"), Some("p1"));
        assert_eq!(spec.env_value("CG_PLAYER_SECRET"), Some("s3cret"));
        assert_eq!(spec.env_value("CG_SPECTATE"), None);
    }

    #[test]
    fn test_client_spectate_skips_player_credentials() {
        let harness = Harness::new(&[]);
        let options = ClientRunOptions {
            override_url: Some("https://other.example.com/".to_string()),
            player_id: Some("p1".to_string()),
            spectate: true,
            ..Default::default()
        };
        let spec = client_command(&harness.session(), &descriptor(), &options).unwrap();

        assert_eq!(spec.env_value("CG_GAME_URL"), Some("other.example.com"));
        assert_eq!(spec.env_value("CG_SPECTATE"), Some("1"));
        assert_eq!(spec.env_value("CG_PLAYER_ID"), None);
        assert_eq!(spec.env_value("CG_GAME_ID"), None);
    }

    #[test]
    fn test_client_without_url() {
        let harness = Harness::new(&[]);
        let descriptor = CodeGameFile::new("pong", ProjectType::Client, "go");
        let err = client_command(&harness.session(), &descriptor, &ClientRunOptions::default())
            .unwrap_err();
        assert!(err.to_string().contains("Missing game URL"));
    }

    #[test]
    fn test_server_interrupt_is_not_an_error() {
        let harness = Harness::with_runner(&[], RecordingRunner::failing_on("go run"));
        let session = harness.session();
        let spec = server_command(&session, 8081, &[]);

        assert_eq!(spec.env_value("CG_PORT"), Some("8081"));
        assert!(run(&session, &spec).is_ok());
        assert_eq!(harness.runner.command_lines(), vec!["CG_PORT=8081 go run ."]);
    }

    #[test]
    fn test_client_failure_is_reported() {
        let harness = Harness::with_runner(&[], RecordingRunner::failing_on("go run"));
        let session = harness.session();
        let spec = client_command(&session, &descriptor(), &ClientRunOptions::default()).unwrap();
        assert!(run(&session, &spec).is_err());
    }
}
