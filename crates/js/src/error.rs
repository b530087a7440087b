//! JavaScript error types

use thiserror::Error;

/// JavaScript result type
pub type JsResult<T> = Result<T, JsError>;

/// JavaScript sandbox error
#[derive(Debug, Error)]
pub enum JsError {
    /// A template expression threw; the message is the thrown value as a string
    #[error("{0}")]
    Thrown(String),

    #[error("QuickJS error: {0}")]
    QuickJs(String),

    #[error("Invalid global '{name}': {message}")]
    Global { name: String, message: String },
}

impl JsError {
    pub fn thrown(message: impl Into<String>) -> Self {
        Self::Thrown(message.into())
    }
}

impl From<rquickjs::Error> for JsError {
    fn from(err: rquickjs::Error) -> Self {
        Self::QuickJs(err.to_string())
    }
}
