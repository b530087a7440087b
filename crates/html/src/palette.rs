//! Terminal colors for token debugging output

use serde::{Deserialize, Serialize};

use crate::token::TokenKind;

/// ANSI SGR color codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ConsoleColor {
    FgBlack = 30,
    FgRed = 31,
    FgGreen = 32,
    FgYellow = 33,
    FgBlue = 34,
    FgMagenta = 35,
    FgCyan = 36,
    FgWhite = 37,

    BgBlack = 40,
    BgRed = 41,
    BgGreen = 42,
    BgYellow = 43,
    BgBlue = 44,
    BgMagenta = 45,
    BgCyan = 46,
    BgWhite = 47,
}

impl ConsoleColor {
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Foreground/background SGR pair for one token kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenColor {
    pub fg: Option<u8>,
    pub bg: Option<u8>,
}

impl TokenColor {
    pub fn fg(color: ConsoleColor) -> Self {
        Self { fg: Some(color.code()), bg: None }
    }

    pub fn with_bg(mut self, color: ConsoleColor) -> Self {
        self.bg = Some(color.code());
        self
    }

    /// Wrap `text` in this color, resetting afterwards
    pub fn paint(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() + 14);
        if let Some(bg) = self.bg {
            out.push_str(&format!("\x1b[{}m", bg));
        }
        if let Some(fg) = self.fg {
            out.push_str(&format!("\x1b[{}m", fg));
        }
        out.push_str(text);
        out.push_str("\x1b[0m");
        out
    }
}

/// Color for every token kind
///
/// Built on demand and passed by value; there is no process-wide palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Palette {
    pub tag_open: TokenColor,
    pub tag_close: TokenColor,
    pub content: TokenColor,
    pub tag_continuation: TokenColor,
    pub attribute_name: TokenColor,
    pub attribute_equals: TokenColor,
    pub attribute_value: TokenColor,
}

impl Palette {
    /// Color for a token kind
    pub fn get(&self, kind: TokenKind) -> &TokenColor {
        match kind {
            TokenKind::TagOpen => &self.tag_open,
            TokenKind::TagClose => &self.tag_close,
            TokenKind::Content => &self.content,
            TokenKind::TagContinuation => &self.tag_continuation,
            TokenKind::AttributeName => &self.attribute_name,
            TokenKind::AttributeEquals => &self.attribute_equals,
            TokenKind::AttributeValue => &self.attribute_value,
        }
    }

    /// Replace the color for a token kind
    pub fn set(&mut self, kind: TokenKind, color: TokenColor) {
        let slot = match kind {
            TokenKind::TagOpen => &mut self.tag_open,
            TokenKind::TagClose => &mut self.tag_close,
            TokenKind::Content => &mut self.content,
            TokenKind::TagContinuation => &mut self.tag_continuation,
            TokenKind::AttributeName => &mut self.attribute_name,
            TokenKind::AttributeEquals => &mut self.attribute_equals,
            TokenKind::AttributeValue => &mut self.attribute_value,
        };
        *slot = color;
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            tag_open: TokenColor::fg(ConsoleColor::FgCyan),
            tag_close: TokenColor::fg(ConsoleColor::FgCyan),
            content: TokenColor::fg(ConsoleColor::FgWhite),
            tag_continuation: TokenColor::fg(ConsoleColor::FgRed),
            attribute_name: TokenColor::fg(ConsoleColor::FgYellow),
            attribute_equals: TokenColor::fg(ConsoleColor::FgWhite),
            attribute_value: TokenColor::fg(ConsoleColor::FgGreen),
        }
    }
}
