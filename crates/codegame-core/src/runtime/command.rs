//! External command execution

use anyhow::{Context, Result};
use colored::Colorize;
use std::cell::RefCell;
use std::fmt;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// What happens to a command's stdout/stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Captured; shown only if the command fails
    #[default]
    Hidden,
    /// Attached to the terminal (stdin included)
    Inherit,
}

/// A command to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub envs: Vec<(String, String)>,
    pub dir: Option<PathBuf>,
    pub output: OutputMode,
    /// Treat a non-zero exit status as success
    pub allow_failure: bool,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            envs: Vec::new(),
            dir: None,
            output: OutputMode::default(),
            allow_failure: false,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    pub fn inherit_output(mut self) -> Self {
        self.output = OutputMode::Inherit;
        self
    }

    pub fn allow_failure(mut self) -> Self {
        self.allow_failure = true;
        self
    }

    /// Value of an environment variable set on this command
    pub fn env_value(&self, key: &str) -> Option<&str> {
        self.envs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for CommandSpec {
    /// Shell-like rendering, e.g. `GOOS=linux go build -o app`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = self
            .envs
            .iter()
            .map(|(k, v)| format!("{}={}", k, quote(v)))
            .collect();
        parts.push(self.program.clone());
        parts.extend(self.args.iter().map(|arg| quote(arg)));
        write!(f, "{}", parts.join(" "))
    }
}

fn quote(value: &str) -> String {
    if value.is_empty() || value.contains(char::is_whitespace) {
        format!("'{}'", value)
    } else {
        value.to_string()
    }
}

/// Runs external commands
pub trait CommandRunner {
    /// Run the command to completion; fails on a non-zero exit status unless
    /// `allow_failure` is set
    fn run(&self, spec: &CommandSpec) -> Result<()>;
}

/// Runs commands as child processes of this CLI
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    echo: bool,
}

impl SystemRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Print each command before running it
    pub fn verbose(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> Result<()> {
        let program = which::which(&spec.program)
            .map_err(|_| anyhow::anyhow!("'{}' is not installed", spec.program))?;

        if self.echo {
            eprintln!("{} {}", "Running:".dimmed(), spec.to_string().yellow());
        }

        let mut command = Command::new(program);
        command.args(&spec.args);
        command.envs(spec.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        if let Some(dir) = &spec.dir {
            command.current_dir(dir);
        }

        match spec.output {
            OutputMode::Hidden => {
                let output = command
                    .stdin(Stdio::null())
                    .output()
                    .with_context(|| format!("Failed to start '{}'", spec))?;

                if output.status.success() || spec.allow_failure {
                    return Ok(());
                }

                let mut captured = String::from_utf8_lossy(&output.stdout).into_owned();
                captured.push_str(&String::from_utf8_lossy(&output.stderr));
                anyhow::bail!(
                    "Failed to run '{}' (exit code {}):\n{}",
                    spec,
                    output.status.code().unwrap_or(-1),
                    captured.trim_end().dimmed()
                );
            }
            OutputMode::Inherit => {
                let status = command
                    .stdin(Stdio::inherit())
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit())
                    .status()
                    .with_context(|| format!("Failed to start '{}'", spec))?;

                if status.success() || spec.allow_failure {
                    Ok(())
                } else {
                    anyhow::bail!(
                        "Failed to run '{}' (exit code {})",
                        spec,
                        status.code().unwrap_or(-1)
                    );
                }
            }
        }
    }
}

/// Records commands instead of running them
#[derive(Debug, Default)]
pub struct RecordingRunner {
    calls: RefCell<Vec<CommandSpec>>,
    fail_on: Option<String>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every command whose rendering contains `pattern`
    pub fn failing_on(pattern: impl Into<String>) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            fail_on: Some(pattern.into()),
        }
    }

    /// Commands run so far
    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.borrow().clone()
    }

    /// Commands run so far, rendered like a shell line
    pub fn command_lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(ToString::to_string).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, spec: &CommandSpec) -> Result<()> {
        self.calls.borrow_mut().push(spec.clone());
        match &self.fail_on {
            Some(pattern) if spec.to_string().contains(pattern.as_str()) && !spec.allow_failure => {
                anyhow::bail!("Failed to run '{}' (exit code 1)", spec)
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_renders_env_and_quotes() {
        let spec = CommandSpec::new("go")
            .args(["build", "-o", "app", "-ldflags", "-X m/p.URL=x"])
            .env("GOOS", "linux");
        assert_eq!(
            spec.to_string(),
            "GOOS=linux go build -o app -ldflags '-X m/p.URL=x'"
        );
    }

    #[test]
    fn test_env_value_last_wins() {
        let spec = CommandSpec::new("go").env("CG_PORT", "80").env("CG_PORT", "81");
        assert_eq!(spec.env_value("CG_PORT"), Some("81"));
        assert_eq!(spec.env_value("MISSING"), None);
    }

    #[test]
    fn test_missing_program_is_reported() {
        let err = SystemRunner::new()
            .run(&CommandSpec::new("definitely-not-a-real-program-cg"))
            .unwrap_err();
        assert!(err.to_string().contains("is not installed"));
    }

    #[test]
    fn test_recording_runner_failure() {
        let runner = RecordingRunner::failing_on("mod tidy");
        assert!(runner.run(&CommandSpec::new("go").args(["get", "x"])).is_ok());
        assert!(runner.run(&CommandSpec::new("go").args(["mod", "tidy"])).is_err());
        assert_eq!(runner.command_lines(), vec!["go get x", "go mod tidy"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_hidden_failure_includes_output() {
        let spec = CommandSpec::new("sh").args(["-c", "echo broken >&2; exit 3"]);
        let err = SystemRunner::new().run(&spec).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("exit code 3"));
        assert!(message.contains("broken"));
    }

    #[cfg(unix)]
    #[test]
    fn test_allow_failure() {
        let spec = CommandSpec::new("sh").args(["-c", "exit 1"]).allow_failure();
        assert!(SystemRunner::new().run(&spec).is_ok());
    }
}
