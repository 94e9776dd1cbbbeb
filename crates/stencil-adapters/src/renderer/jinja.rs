//! MiniJinja-backed artifact renderer.

use std::{fs, path::Path};

use minijinja::{Environment, UndefinedBehavior};
use serde_json::Value;
use tracing::{debug, instrument};

use stencil_core::{
    application::{ApplicationError, ports::ArtifactRenderer},
    application::services::emitters::php_string,
    error::{StencilError, StencilResult},
};

use super::builtin::BUILTIN_TEMPLATES;

/// Renders artifact models with MiniJinja.
///
/// Undefined variables are errors, output is never HTML-escaped, and block
/// tags do not leave blank lines behind.
pub struct MiniJinjaRenderer {
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Renderer with only the built-in templates.
    pub fn with_builtin() -> StencilResult<Self> {
        let mut env = base_environment();
        for (name, source) in BUILTIN_TEMPLATES {
            env.add_template(name, source)
                .map_err(|e| rendering_failed(name, &e))?;
        }
        Ok(Self { env })
    }

    /// Built-in templates, shadowed by same-named files in `dir`.
    ///
    /// Only names that match a built-in template are considered; other files
    /// in the directory are ignored.
    #[instrument(fields(dir = %dir.display()))]
    pub fn with_overrides(dir: &Path) -> StencilResult<Self> {
        let mut renderer = Self::with_builtin()?;
        for (name, _) in BUILTIN_TEMPLATES {
            let path = dir.join(name);
            if !path.is_file() {
                continue;
            }
            let source = fs::read_to_string(&path).map_err(|e| ApplicationError::FilesystemError {
                path: path.clone(),
                reason: format!("Failed to read template override: {e}"),
            })?;
            renderer
                .env
                .add_template_owned(name.to_string(), source)
                .map_err(|e| rendering_failed(name, &e))?;
            debug!(template = *name, "using local template override");
        }
        Ok(renderer)
    }

    /// Names of all registered templates, sorted.
    pub fn template_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .env
            .templates()
            .map(|(name, _)| name.to_string())
            .collect();
        names.sort();
        names
    }
}

impl ArtifactRenderer for MiniJinjaRenderer {
    #[instrument(skip(self, model))]
    fn render(&self, template: &str, model: &Value) -> StencilResult<String> {
        let tmpl = self
            .env
            .get_template(template)
            .map_err(|e| rendering_failed(template, &e))?;
        tmpl.render(model)
            .map_err(|e| rendering_failed(template, &e))
    }
}

fn base_environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_auto_escape_callback(|_| minijinja::AutoEscape::None);
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);
    env.add_filter("php_string", |value: String| php_string(&value));
    env
}

fn rendering_failed(template: &str, e: &minijinja::Error) -> StencilError {
    let mut reason = e.to_string();
    if let Some(detail) = e.detail() {
        if !reason.contains(detail) {
            reason = format!("{reason}: {detail}");
        }
    }
    ApplicationError::RenderingFailed {
        template: template.to_string(),
        reason,
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn strict_undefined_variables_fail() {
        let renderer = MiniJinjaRenderer::with_builtin().unwrap();
        let err = renderer
            .render("request.php.j2", &json!({ "namespace": "App\\Http\\Requests" }))
            .unwrap_err();
        assert!(err.to_string().contains("request.php.j2"));
    }

    #[test]
    fn unknown_template_is_a_rendering_error() {
        let renderer = MiniJinjaRenderer::with_builtin().unwrap();
        assert!(renderer.render("nope.j2", &json!({})).is_err());
    }

    #[test]
    fn output_is_not_escaped() {
        let renderer = MiniJinjaRenderer::with_builtin().unwrap();
        let out = renderer
            .render("base_dto.php.j2", &json!({ "namespace": "App\\DTO" }))
            .unwrap();
        assert!(out.contains("namespace App\\DTO;"));
        assert!(out.contains("=> static::normalize($item)"));
        assert!(out.ends_with("}\n"));
    }

    #[test]
    fn local_override_shadows_builtin() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("base_dto.php.j2"), "custom {{ namespace }}").unwrap();
        fs::write(tmp.path().join("unrelated.j2"), "ignored").unwrap();

        let renderer = MiniJinjaRenderer::with_overrides(tmp.path()).unwrap();
        let out = renderer
            .render("base_dto.php.j2", &json!({ "namespace": "App\\DTO" }))
            .unwrap();

        assert_eq!(out, "custom App\\DTO");
        assert!(!renderer.template_names().contains(&"unrelated.j2".to_string()));
    }

    #[test]
    fn php_string_filter_quotes() {
        let mut renderer = MiniJinjaRenderer::with_builtin().unwrap();
        renderer
            .env
            .add_template("escape", "{{ message|php_string }}")
            .unwrap();
        let out = renderer
            .render("escape", &json!({ "message": "Author's list" }))
            .unwrap();
        assert_eq!(out, "'Author\\'s list'");
    }
}
