//! `new server`: scaffold a Go game server

use anyhow::Result;
use codegame_core::{CodeGameFile, ModuleConfig, ProjectType, TagProvider, VersionSpecifier};
use std::path::Path;

use crate::gomod::check_module_path;
use crate::session::Session;
use crate::templates::{self, ServerData};

/// Inputs of `new server`, already prompted for
#[derive(Debug, Clone)]
pub struct NewServerOptions {
    /// Project (and game) name, usually the directory name
    pub name: String,
    pub module_path: String,
    pub library_version: VersionSpecifier,
}

pub async fn run<P: TagProvider>(
    session: &Session<'_, P>,
    options: &NewServerOptions,
) -> Result<()> {
    check_module_path(&options.module_path)?;

    let resolved = session
        .resolve(ProjectType::Server, &options.library_version)
        .await?;

    session.step(
        "Initializing Go module...",
        &session.go(["mod", "init", options.module_path.as_str()]),
    )?;
    session.install_library(&resolved)?;

    let data = ServerData::new(&options.name, &options.module_path, &resolved.import_path);
    let package_dir = Path::new(&data.package_name);
    for (template, dest) in [
        (templates::SERVER_MAIN, Path::new("main.go").to_path_buf()),
        (templates::GITIGNORE, Path::new(".gitignore").to_path_buf()),
        (templates::SERVER_DOCKERFILE, Path::new("Dockerfile").to_path_buf()),
        (templates::SERVER_DOCKERIGNORE, Path::new(".dockerignore").to_path_buf()),
        (templates::SERVER_EVENTS_CGE, Path::new("events.cge").to_path_buf()),
        (templates::SERVER_GAME, package_dir.join("game.go")),
        (
            templates::SERVER_EVENT_DEFINITIONS,
            package_dir.join("event_definitions.go"),
        ),
    ] {
        session.render(template, &dest, &data)?;
    }

    session.step("Tidying dependencies...", &session.go(["mod", "tidy"]))?;

    CodeGameFile::new(&options.name, ProjectType::Server, session.module.name())
        .save(&session.project_dir)?;

    session.feedback.success(&format!(
        "Created {} server '{}'",
        session.module.display_name(),
        options.name
    ));
    Ok(())
}
