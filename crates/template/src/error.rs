//! Template error types

use std::path::PathBuf;

use mailstyle_js::JsError;
use thiserror::Error;

/// Template result type
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Template errors
///
/// A failing template expression is not an error: it is rendered into the
/// document as an error span.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error("Failed to read template {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to start expression sandbox: {0}")]
    Sandbox(#[from] JsError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl TemplateError {
    pub fn argument(message: impl Into<String>) -> Self {
        Self::Argument(message.into())
    }
}
