//! Collaborators shared by every workflow

use anyhow::Result;
use codegame_core::{
    CommandRunner, CommandSpec, Feedback, Library, ModuleConfig, ProjectType, ResolvedLibrary,
    TagProvider, TemplateRenderer, VersionResolver, VersionSpecifier,
};
use minijinja::Value;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::module::GoModule;

/// Everything a workflow talks to, bound to one project directory
pub struct Session<'a, P> {
    pub module: &'a GoModule,
    pub resolver: &'a VersionResolver<P>,
    pub runner: &'a dyn CommandRunner,
    pub renderer: &'a dyn TemplateRenderer,
    pub feedback: &'a dyn Feedback,
    pub project_dir: PathBuf,
}

impl<'a, P: TagProvider> Session<'a, P> {
    /// `go <args>` inside the project directory
    pub fn go<I, S>(&self, args: I) -> CommandSpec
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandSpec::new("go")
            .args(args)
            .current_dir(&self.project_dir)
    }

    /// Run a command as one progress step
    pub fn step(&self, message: &str, spec: &CommandSpec) -> Result<()> {
        self.feedback.begin(message);
        match self.runner.run(spec) {
            Ok(()) => {
                self.feedback.finish(message.trim_end_matches("..."));
                Ok(())
            }
            Err(e) => {
                self.feedback.fail(&format!("Failed to run '{}'", spec));
                Err(e)
            }
        }
    }

    /// Resolve the support library for `project_type`, warning when the
    /// templates predate the selected version
    pub async fn resolve(
        &self,
        project_type: ProjectType,
        specifier: &VersionSpecifier,
    ) -> Result<ResolvedLibrary> {
        let library: Library = self.module.library(project_type);
        self.feedback
            .begin(&format!("Resolving {} version {}...", library.name, specifier));

        let resolved = match self.resolver.resolve(&library, specifier).await {
            Ok(resolved) => resolved,
            Err(e) => {
                self.feedback
                    .fail(&format!("Failed to resolve {} version", library.name));
                return Err(e.into());
            }
        };
        self.feedback
            .finish(&format!("Using {} {}", library.name, resolved.tag));

        if let Some(warning) = self.module.compatibility_warning(project_type, &resolved) {
            self.feedback.warn(&warning);
        }
        Ok(resolved)
    }

    /// Render `template` into `dest` below the project directory
    pub fn render<T: Serialize>(&self, template: &str, dest: &Path, data: &T) -> Result<PathBuf> {
        self.renderer
            .render_file(template, dest, &Value::from_serialize(data))
    }

    /// `<import_path>@<tag>` into the module, then tidy
    pub fn install_library(&self, resolved: &ResolvedLibrary) -> Result<()> {
        self.step(
            &format!("Installing {}...", resolved.go_get_target()),
            &self.go(["get".to_string(), resolved.go_get_target()]),
        )
    }
}


#[cfg(test)]
mod tests {
    use super::testing::Harness;
    use super::*;
    use codegame_core::runtime::RecordingRunner;

    #[tokio::test]
    async fn test_resolve_reports_selected_tag() {
        let harness = Harness::new(&["v0.9.2", "v0.9.1"]);
        let resolved = harness
            .session()
            .resolve(ProjectType::Client, &VersionSpecifier::Latest)
            .await
            .unwrap();

        assert_eq!(resolved.tag, "v0.9.2");
        assert!(harness.feedback.contains("finish", "Using go-client v0.9.2"));
        assert!(!harness
            .feedback
            .messages()
            .iter()
            .any(|m| m.starts_with("warn: ")));
    }

    #[tokio::test]
    async fn test_resolve_warns_about_newer_library() {
        let harness = Harness::new(&["v0.10.0", "v0.9.1"]);
        harness
            .session()
            .resolve(ProjectType::Server, &VersionSpecifier::Latest)
            .await
            .unwrap();
        assert!(harness.feedback.contains("warn", "go-server"));
    }

    #[tokio::test]
    async fn test_resolve_failure_marks_step_failed() {
        let harness = Harness::new(&[]);
        let err = harness
            .session()
            .resolve(ProjectType::Client, &VersionSpecifier::Latest)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("go-client"));
        assert!(harness.feedback.contains("fail", "go-client"));
    }

    #[test]
    fn test_step_failure_names_command() {
        let harness = Harness::with_runner(&[], RecordingRunner::failing_on("mod tidy"));
        let session = harness.session();
        let result = session.step("Tidying...", &session.go(["mod", "tidy"]));

        assert!(result.is_err());
        assert!(harness.feedback.contains("fail", "go mod tidy"));
    }
}
