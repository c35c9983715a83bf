//! `build`: compile a project with `go build`

use anyhow::Result;
use codegame_core::project::package_name;
use codegame_core::{CodeGameFile, CommandSpec, ProjectType, TagProvider};
use std::path::Path;

use crate::gomod::module_name;
use crate::session::Session;

/// Target and output of a build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    pub output: Option<String>,
    pub os: String,
    pub arch: String,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            output: None,
            os: "current".to_string(),
            arch: "current".to_string(),
        }
    }
}

/// `GOOS` value for a user-facing OS name; empty means the host
pub fn normalize_os(os: &str) -> String {
    match os.trim().to_lowercase().as_str() {
        "current" | "" => String::new(),
        "macos" => "darwin".to_string(),
        other => other.to_string(),
    }
}

/// `GOARCH` value for a user-facing architecture name; empty means the host
pub fn normalize_arch(arch: &str) -> String {
    match arch.trim().to_lowercase().as_str() {
        "current" | "" => String::new(),
        "x86" => "386".to_string(),
        "x64" => "amd64".to_string(),
        "arm32" => "arm".to_string(),
        other => other.to_string(),
    }
}

/// Output file name for a build of the project in `project_dir`
pub fn output_name(
    project_dir: &Path,
    project_type: ProjectType,
    output: Option<&str>,
    goos: &str,
) -> Result<String> {
    let mut name = match output.filter(|o| !o.is_empty()) {
        Some(output) => output.to_string(),
        None => {
            let mut name = project_dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| {
                    anyhow::anyhow!("Cannot derive an output name from '{}'", project_dir.display())
                })?;
            if project_type == ProjectType::Server && project_dir.join(&name).is_dir() {
                name.push_str("-server");
            }
            name
        }
    };

    let windows = goos == "windows" || (goos.is_empty() && cfg!(windows));
    if windows && !name.ends_with(".exe") {
        name.push_str(".exe");
    }

    if project_dir.join(&name).is_dir() {
        anyhow::bail!(
            "'{}' already exists and is a directory. Specify another output name with '-o <name>'.",
            name
        );
    }
    Ok(name)
}

/// The `go build` invocation for a project
pub fn build_command<P: TagProvider>(
    session: &Session<'_, P>,
    descriptor: &CodeGameFile,
    options: &BuildOptions,
) -> Result<CommandSpec> {
    let project_type = descriptor.kind()?;
    let goos = normalize_os(&options.os);
    let goarch = normalize_arch(&options.arch);
    let output = output_name(
        &session.project_dir,
        project_type,
        options.output.as_deref(),
        &goos,
    )?;

    let mut spec = session.go(["build", "-o", output.as_str()]);
    if project_type == ProjectType::Client {
        let url = descriptor
            .url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or_else(|| anyhow::anyhow!("Missing game URL in .codegame.json"))?;
        let module = module_name(&session.project_dir)?;
        spec = spec.arg("-ldflags").arg(format!(
            "-X {}/{}.URL={}",
            module,
            package_name(&descriptor.game),
            url
        ));
    }

    if !goos.is_empty() {
        spec = spec.env("GOOS", goos);
    }
    if !goarch.is_empty() {
        spec = spec.env("GOARCH", goarch);
    }
    Ok(spec)
}

pub fn run<P: TagProvider>(
    session: &Session<'_, P>,
    descriptor: &CodeGameFile,
    options: &BuildOptions,
) -> Result<()> {
    let spec = build_command(session, descriptor, options)?;
    session.step("Building...", &spec)?;
    session.feedback.success("Build finished");
    Ok(())
}
