//! Theme engine
//!
//! Template rendering using Tera. A theme is a directory of `.html`
//! templates under the themes path; the engine loads the active theme's
//! templates with theme-relative names (`article/article.html`) and
//! renders view models against them.

use anyhow::{Context, Result};
use std::error::Error as StdError;
use std::fs;
use std::path::{Path, PathBuf};
use tera::{Context as TeraContext, Tera};

mod error;

pub use error::ThemeError;

/// Theme engine for rendering templates
pub struct ThemeEngine {
    /// Tera instance holding the active theme's templates
    tera: Tera,
    /// Path to themes directory
    themes_path: PathBuf,
    /// Currently active theme name
    current_theme: String,
}

impl ThemeEngine {
    /// Create a new theme engine and load the given theme's templates.
    pub fn new(themes_path: &Path, theme: &str) -> Result<Self> {
        let mut engine = Self {
            tera: Tera::default(),
            themes_path: themes_path.to_path_buf(),
            current_theme: theme.to_string(),
        };
        engine.load_theme_templates(theme)?;
        Ok(engine)
    }

    /// Load templates for a specific theme
    fn load_theme_templates(&mut self, theme: &str) -> Result<()> {
        let theme_path = self.themes_path.join(theme);
        if !theme_path.exists() {
            return Err(ThemeError::NotFound(theme.to_string()).into());
        }

        let mut templates: Vec<(String, String)> = Vec::new();
        collect_templates(&theme_path, &theme_path, &mut templates)?;

        // Base templates must be registered before templates extending them
        templates.sort_by(|a, b| {
            let a_is_base = a.0 == "base.html" || a.0.ends_with("/base.html");
            let b_is_base = b.0 == "base.html" || b.0.ends_with("/base.html");
            b_is_base.cmp(&a_is_base)
        });

        let mut tera = Tera::default();
        for (name, content) in templates {
            tera.add_raw_template(&name, &content).map_err(|e| {
                ThemeError::TemplateError(format!("Failed to add template {}: {}", name, e))
            })?;
        }
        tera.build_inheritance_chains().map_err(|e| {
            ThemeError::TemplateError(format!("Failed to build template inheritance: {}", e))
        })?;

        self.tera = tera;
        Ok(())
    }

    /// Render a theme-relative template with the given context.
    pub fn render(&self, template: &str, context: &TeraContext) -> Result<String> {
        self.tera.render(template, context).map_err(|e| {
            let mut error_msg = format!("Failed to render '{}': {}", template, e);
            let mut source = e.source();
            while let Some(s) = source {
                error_msg.push_str(&format!("\n  Caused by: {}", s));
                source = s.source();
            }
            ThemeError::TemplateError(error_msg).into()
        })
    }

    /// Reload the active theme's templates from disk.
    pub fn reload_templates(&mut self) -> Result<()> {
        self.load_theme_templates(&self.current_theme.clone())
    }

    /// Get the current theme name
    pub fn current_theme(&self) -> &str {
        &self.current_theme
    }

    /// Path to the active theme's static asset directory
    pub fn static_path(&self) -> PathBuf {
        self.themes_path.join(&self.current_theme).join("static")
    }
}

/// Recursively collect `.html` templates with forward-slash relative names
fn collect_templates(
    base_path: &Path,
    current_path: &Path,
    templates: &mut Vec<(String, String)>,
) -> Result<()> {
    if !current_path.exists() {
        return Ok(());
    }

    for entry in fs::read_dir(current_path)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            collect_templates(base_path, &path, templates)?;
        } else if path.extension().map_or(false, |ext| ext == "html") {
            let relative_path = path.strip_prefix(base_path).map_err(|_| {
                ThemeError::TemplateError("Failed to get relative path".to_string())
            })?;
            let template_name = relative_path.to_string_lossy().replace('\\', "/");

            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read template: {:?}", path))?;

            templates.push((template_name, content));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn theme_dir(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            let path = dir.path().join("default").join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        dir
    }

    #[test]
    fn test_missing_theme_is_error() {
        let dir = TempDir::new().unwrap();
        assert!(ThemeEngine::new(dir.path(), "nope").is_err());
    }

    #[test]
    fn test_render_nested_template() {
        let dir = theme_dir(&[("article/article.html", "title: {{ article.title }}")]);
        let engine = ThemeEngine::new(dir.path(), "default").unwrap();

        let mut ctx = TeraContext::new();
        ctx.insert("article", &serde_json::json!({ "title": "hello" }));

        let html = engine.render("article/article.html", &ctx).unwrap();
        assert_eq!(html, "title: hello");
    }

    #[test]
    fn test_template_inheritance() {
        let dir = theme_dir(&[
            ("base.html", "[{% block body %}{% endblock %}]"),
            (
                "page/page.html",
                "{% extends \"base.html\" %}{% block body %}{{ page.title }}{% endblock %}",
            ),
        ]);
        let engine = ThemeEngine::new(dir.path(), "default").unwrap();

        let mut ctx = TeraContext::new();
        ctx.insert("page", &serde_json::json!({ "title": "About" }));

        let html = engine.render("page/page.html", &ctx).unwrap();
        assert_eq!(html, "[About]");
    }

    #[test]
    fn test_render_unknown_template_is_error() {
        let dir = theme_dir(&[("index.html", "hi")]);
        let engine = ThemeEngine::new(dir.path(), "default").unwrap();
        assert!(engine.render("missing.html", &TeraContext::new()).is_err());
    }

    #[test]
    fn test_static_path() {
        let dir = theme_dir(&[("index.html", "hi")]);
        let engine = ThemeEngine::new(dir.path(), "default").unwrap();
        assert!(engine.static_path().ends_with("default/static"));
    }
}
