//! Charm-style CLI prompts using cliclack

use crate::runtime::tool::ToolManager;
use anyhow::Result;

/// Ask for a value unless one was given on the command line.
/// `validate` returns an error message for rejected input.
pub fn input_or_prompt<F>(
    given: Option<String>,
    prompt: &str,
    default: &str,
    validate: F,
) -> Result<String>
where
    F: Fn(&str) -> Result<(), String> + 'static,
{
    if let Some(value) = given {
        if let Err(message) = validate(&value) {
            anyhow::bail!("{}: {}", prompt, message);
        }
        cliclack::log::info(format!("{} {}", prompt, value))?;
        return Ok(value);
    }

    let mut input = cliclack::input(prompt).validate(move |value: &String| validate(value));
    if !default.is_empty() {
        input = input.placeholder(default).default_input(default);
    }
    let value: String = input.interact()?;
    Ok(value)
}

/// Ask a yes/no question; `--yes` answers it with yes
pub fn confirm(message: &str, initial: bool, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    let answer: bool = cliclack::confirm(message).initial_value(initial).interact()?;
    Ok(answer)
}

/// Make sure the toolchain is installed, offering to open its install docs
pub fn check_toolchain(tool: &ToolManager, yes: bool) -> Result<()> {
    if tool.is_installed() {
        let version = tool.get_version().unwrap_or_else(|| "unknown".to_string());
        cliclack::log::success(format!(
            "{} installed ({})",
            tool.config().display_name,
            version
        ))?;
        return Ok(());
    }

    cliclack::log::warning(format!("{} is not installed", tool.config().display_name))?;

    // In non-interactive mode there is nothing to choose
    if yes {
        return tool.require();
    }

    let action: &str = cliclack::select("What would you like to do?")
        .item(
            "docs",
            format!("Open installation instructions ({})", tool.config().docs_url),
            "",
        )
        .item("abort", "Abort", "")
        .interact()?;

    if action == "docs" {
        tool.open_docs()?;
        cliclack::outro(format!(
            "After installing {}, run this command again.",
            tool.config().display_name
        ))?;
    }

    anyhow::bail!("Setup cancelled.");
}
