//! Mailstyle Templates
//!
//! Renders email templates: evaluates `{{ code }}` expressions, tokenizes the
//! markup, inlines `<style>` rules into `style` attributes and serializes the
//! result.

mod error;
mod options;
mod rendered;

pub use error::{TemplateError, TemplateResult};
pub use options::Options;
pub use rendered::Rendered;

pub use mailstyle_html::{ConsoleColor, Palette, Token, TokenColor, TokenKind};
pub use mailstyle_js::SandboxLimits;

use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};

use mailstyle_html::tokenize;
use mailstyle_js::{interpolate, Sandbox};
use mailstyle_style::inline_styles;

/// Render template text
///
/// Each call gets its own expression sandbox; nothing is shared between
/// calls. Failing expressions are rendered into the document, so the only
/// error is a sandbox that cannot be started.
pub fn parse(text: &str, options: &Options) -> TemplateResult<Rendered> {
    let source = if options.evaluate_expressions {
        let mut sandbox = Sandbox::with_globals(&options.sandbox, &options.globals)?;
        Cow::Owned(interpolate(text, &mut sandbox, &options.error_style))
    } else {
        Cow::Borrowed(text)
    };

    let mut tokens = tokenize(&source);
    if options.inline_styles {
        tokens = inline_styles(tokens);
    }

    log::debug!("rendered template into {} tokens", tokens.len());
    Ok(Rendered::new(tokens, options.palette.clone()))
}

/// Read a template file and render it
///
/// `path` is resolved against `options.root` when one is set, and then never
/// leaves it: a leading `/` is dropped and `..` is rejected. Nothing is
/// rendered if the file cannot be read.
pub async fn read(path: impl AsRef<Path>, options: &Options) -> TemplateResult<Rendered> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(TemplateError::argument("a template path is required"));
    }

    let full_path = resolve(options.root.as_deref(), path)?;

    log::debug!("reading template {}", full_path.display());
    let text = tokio::fs::read_to_string(&full_path)
        .await
        .map_err(|source| TemplateError::Io {
            path: full_path.clone(),
            source,
        })?;

    parse(&text, options)
}

/// Join `path` under `root`
fn resolve(root: Option<&Path>, path: &Path) -> TemplateResult<PathBuf> {
    let Some(root) = root else {
        return Ok(path.to_path_buf());
    };

    let mut full_path = root.to_path_buf();
    for component in path.components() {
        match component {
            Component::Normal(part) => full_path.push(part),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
            Component::ParentDir => {
                return Err(TemplateError::argument(format!(
                    "template path {} leaves the root directory",
                    path.display()
                )));
            }
        }
    }
    Ok(full_path)
}
