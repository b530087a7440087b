//! Rendered templates

use std::fmt;

use mailstyle_html::{colorize, to_text, Palette, Token};

/// The result of rendering a template: a read-only token stream
#[derive(Debug, Clone)]
pub struct Rendered {
    tokens: Vec<Token>,
    palette: Palette,
}

impl Rendered {
    pub fn new(tokens: Vec<Token>, palette: Palette) -> Self {
        Self { tokens, palette }
    }

    /// The document as markup
    pub fn text(&self) -> String {
        to_text(&self.tokens)
    }

    /// The document with every token colored for a terminal
    ///
    /// Uses `palette` when given, otherwise the palette from the options the
    /// template was rendered with.
    pub fn colorize(&self, palette: Option<&Palette>) -> String {
        colorize(&self.tokens, palette.unwrap_or(&self.palette))
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}
