//! Template rendering for generated source files
//!
//! Templates are MiniJinja sources embedded by the module binary. The
//! `TemplateRenderer` trait is the seam workflows write files through.

use anyhow::{Context, Result};
use minijinja::{AutoEscape, Environment, UndefinedBehavior, Value};
use std::path::{Path, PathBuf};

/// A named collection of templates
pub struct TemplateSet {
    env: Environment<'static>,
}

impl TemplateSet {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        // Generated files are source code, never HTML
        env.set_auto_escape_callback(|_| AutoEscape::None);
        Self { env }
    }

    /// Register a template under `name`
    pub fn add(&mut self, name: &'static str, source: &'static str) -> Result<()> {
        self.env
            .add_template(name, source)
            .with_context(|| format!("Failed to parse template '{}'", name))
    }

    /// Register several templates at once
    pub fn with_templates(mut self, templates: &[(&'static str, &'static str)]) -> Result<Self> {
        for (name, source) in templates {
            self.add(name, source)?;
        }
        Ok(self)
    }

    /// Render a template to a string
    pub fn render(&self, name: &str, ctx: &Value) -> Result<String> {
        let template = self
            .env
            .get_template(name)
            .with_context(|| format!("Unknown template '{}'", name))?;
        template
            .render(ctx)
            .with_context(|| format!("Failed to render template '{}'", name))
    }
}

impl Default for TemplateSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders templates into files
pub trait TemplateRenderer {
    /// Render `template` with `ctx` into `dest` (relative to the renderer's
    /// root), creating parent directories. Returns the written path.
    fn render_file(&self, template: &str, dest: &Path, ctx: &Value) -> Result<PathBuf>;
}

/// Writes rendered templates below a project directory
pub struct FsRenderer {
    templates: TemplateSet,
    root: PathBuf,
}

impl FsRenderer {
    pub fn new(templates: TemplateSet, root: impl Into<PathBuf>) -> Self {
        Self {
            templates,
            root: root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TemplateRenderer for FsRenderer {
    fn render_file(&self, template: &str, dest: &Path, ctx: &Value) -> Result<PathBuf> {
        let content = self.templates.render(template, ctx)?;
        let target_path = self.root.join(dest);

        if let Some(parent) = target_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        std::fs::write(&target_path, content)
            .with_context(|| format!("Failed to write file: {}", target_path.display()))?;

        Ok(target_path)
    }
}
