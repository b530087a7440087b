//! Template options

use std::path::PathBuf;

use mailstyle_html::Palette;
use mailstyle_js::SandboxLimits;
use serde::{Deserialize, Serialize};

use crate::error::TemplateResult;

/// Options for reading and rendering a template
///
/// Every field has a default, so a configuration file only needs the fields it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Directory that template paths are resolved against
    pub root: Option<PathBuf>,
    /// Move `<style>` rules into inline `style` attributes
    pub inline_styles: bool,
    /// Evaluate `{{ code }}` expressions
    pub evaluate_expressions: bool,
    /// Declarations for the class of failed-expression spans
    pub error_style: String,
    /// Default colors for colorized output
    pub palette: Palette,
    /// Global variables visible to expressions
    pub globals: serde_json::Map<String, serde_json::Value>,
    /// Limits for the expression sandbox
    pub sandbox: SandboxLimits,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            root: None,
            inline_styles: true,
            evaluate_expressions: true,
            error_style: String::new(),
            palette: Palette::default(),
            globals: serde_json::Map::new(),
            sandbox: SandboxLimits::default(),
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from JSON
    pub fn from_json(json: &str) -> TemplateResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn with_error_style(mut self, style: impl Into<String>) -> Self {
        self.error_style = style.into();
        self
    }

    pub fn with_global(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.globals.insert(name.into(), value);
        self
    }

    pub fn without_inlining(mut self) -> Self {
        self.inline_styles = false;
        self
    }

    pub fn without_expressions(mut self) -> Self {
        self.evaluate_expressions = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TemplateError;

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert!(options.inline_styles);
        assert!(options.evaluate_expressions);
        assert!(options.error_style.is_empty());
        assert!(options.root.is_none());
        assert_eq!(options.palette, Palette::default());
    }

    #[test]
    fn test_partial_json() {
        let options = Options::from_json(
            r#"{
                "root": "templates",
                "inline_styles": false,
                "error_style": "color: red;",
                "globals": { "contentText": { "title": "Hi" } },
                "sandbox": { "time_limit_ms": 250 }
            }"#,
        )
        .unwrap();

        assert_eq!(options.root, Some(PathBuf::from("templates")));
        assert!(!options.inline_styles);
        assert!(options.evaluate_expressions);
        assert_eq!(options.error_style, "color: red;");
        assert_eq!(options.globals["contentText"]["title"], "Hi");
        assert_eq!(options.sandbox.time_limit_ms, Some(250));
        assert_eq!(options.sandbox.memory_limit, None);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(Options::from_json("{"), Err(TemplateError::Config(_))));
    }

    #[test]
    fn test_builders() {
        let options = Options::new()
            .with_root("/srv/mail")
            .with_error_style("x:y;")
            .with_global("year", serde_json::json!(2024))
            .without_inlining()
            .without_expressions();

        assert_eq!(options.root, Some(PathBuf::from("/srv/mail")));
        assert_eq!(options.error_style, "x:y;");
        assert_eq!(options.globals["year"], 2024);
        assert!(!options.inline_styles);
        assert!(!options.evaluate_expressions);
    }
}
