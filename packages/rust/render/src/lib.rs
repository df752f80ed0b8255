//! Template rendering for guidegen reports.
//!
//! The generators hand a template name and a data object to a
//! [`TemplateRenderer`]; [`JinjaRenderer`] is the MiniJinja-backed
//! implementation with the two report templates embedded at compile time.

use std::path::Path;

use tracing::debug;

use guidegen_shared::{GuidegenError, Result};

/// Embedded default templates, keyed by the names the generators use.
const BUILTIN_TEMPLATES: [(&str, &str); 2] = [
    (
        "auditguides.md",
        include_str!("../templates/auditguides.md"),
    ),
    (
        "path-guidelist.md",
        include_str!("../templates/path-guidelist.md"),
    ),
];

/// Turns a named template and a data object into output text.
pub trait TemplateRenderer: Send + Sync {
    /// Render `name` with `ctx`. Unknown names are an error.
    fn render(&self, name: &str, ctx: serde_json::Value) -> Result<String>;
}

/// MiniJinja-backed [`TemplateRenderer`].
///
/// Starts from the embedded defaults; [`JinjaRenderer::with_template_dir`]
/// overrides or extends them from a directory of `.md` template files.
#[derive(Debug)]
pub struct JinjaRenderer {
    env: minijinja::Environment<'static>,
}

impl JinjaRenderer {
    /// Renderer with only the embedded default templates.
    pub fn new() -> Self {
        let mut env = minijinja::Environment::new();
        env.set_undefined_behavior(minijinja::UndefinedBehavior::Chainable);

        for (name, source) in BUILTIN_TEMPLATES {
            // Embedded sources are known-good; a parse failure here is a bug.
            env.add_template(name, source)
                .unwrap_or_else(|e| panic!("builtin template {name} failed to parse: {e}"));
        }

        Self { env }
    }

    /// Renderer that additionally loads every `.md` file in `dir` as a
    /// template named after the file, overriding embedded defaults.
    pub fn with_template_dir(dir: &Path) -> Result<Self> {
        let mut renderer = Self::new();

        let entries =
            std::fs::read_dir(dir).map_err(|e| GuidegenError::io(dir, e))?;

        for entry in entries {
            let entry = entry.map_err(|e| GuidegenError::io(dir, e))?;
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != "md") {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            let source =
                std::fs::read_to_string(&path).map_err(|e| GuidegenError::io(&path, e))?;
            renderer
                .env
                .add_template_owned(name.to_string(), source)
                .map_err(|e| GuidegenError::Template(format!("{name}: {e}")))?;

            debug!(name, "loaded template override");
        }

        Ok(renderer)
    }
}

impl Default for JinjaRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for JinjaRenderer {
    fn render(&self, name: &str, ctx: serde_json::Value) -> Result<String> {
        let template = self
            .env
            .get_template(name)
            .map_err(|e| GuidegenError::Template(format!("{name}: {e}")))?;

        template
            .render(minijinja::Value::from_serialize(&ctx))
            .map_err(|e| GuidegenError::Template(format!("{name}: {e}")))
    }
}
