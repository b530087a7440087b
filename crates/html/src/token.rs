//! Markup tokens
//!
//! The lexer produces a flat, ordered token stream. Nesting is only implied by
//! order; no tree is ever built.

use serde::{Deserialize, Serialize};

/// Kind of a markup token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenKind {
    /// Opening tag name (`<div` renders from the text `div`)
    TagOpen,
    /// Closing tag name (`</div` renders from the text `div`)
    TagClose,
    /// Text between tags
    Content,
    /// Whitespace between a tag name and its attributes, or between attributes
    TagContinuation,
    /// Attribute name
    AttributeName,
    /// The `=` separating an attribute name from its value
    AttributeEquals,
    /// Attribute value, stored without its quotes
    AttributeValue,
}

impl TokenKind {
    /// All token kinds, in declaration order
    pub const ALL: [TokenKind; 7] = [
        TokenKind::TagOpen,
        TokenKind::TagClose,
        TokenKind::Content,
        TokenKind::TagContinuation,
        TokenKind::AttributeName,
        TokenKind::AttributeEquals,
        TokenKind::AttributeValue,
    ];

    /// Opening or closing tag name
    pub fn is_tag(self) -> bool {
        matches!(self, TokenKind::TagOpen | TokenKind::TagClose)
    }

    /// Tokens that end a tag span
    fn ends_span(self) -> bool {
        matches!(self, TokenKind::TagOpen | TokenKind::TagClose | TokenKind::Content)
    }
}

/// A markup token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self { kind, text: text.into() }
    }

    /// Text with surrounding whitespace removed, lowercased
    ///
    /// Tag and attribute names keep the whitespace that ended them, so every
    /// name comparison goes through this.
    pub fn name(&self) -> String {
        self.text.trim().to_ascii_lowercase()
    }

    /// Check if this is a name token (tag or attribute) called `name`
    pub fn is_named(&self, name: &str) -> bool {
        self.text.trim().eq_ignore_ascii_case(name)
    }
}

/// A tag token together with the attribute tokens that belong to it
///
/// `tag` indexes the `TagOpen`/`TagClose` token, `end` is exclusive and points at
/// the next tag or content token (or the end of the stream).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagSpan {
    pub tag: usize,
    pub end: usize,
}

impl TagSpan {
    /// Indices of the tokens following the tag token
    pub fn attributes(&self) -> std::ops::Range<usize> {
        self.tag + 1..self.end
    }
}

/// Locate every tag span in a token stream, in stream order
pub fn tag_spans(tokens: &[Token]) -> Vec<TagSpan> {
    let mut spans = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        if tokens[i].kind.is_tag() {
            let end = tokens[i + 1..]
                .iter()
                .position(|t| t.kind.ends_span())
                .map(|offset| i + 1 + offset)
                .unwrap_or(tokens.len());
            spans.push(TagSpan { tag: i, end });
            i = end;
        } else {
            i += 1;
        }
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(kind: TokenKind, text: &str) -> Token {
        Token::new(kind, text)
    }

    #[test]
    fn test_name_is_trimmed_and_lowercased() {
        let t = tok(TokenKind::TagOpen, " STYLE ");
        assert_eq!(t.name(), "style");
        assert!(t.is_named("style"));
        assert!(!t.is_named("styles"));
    }

    #[test]
    fn test_tag_spans() {
        let tokens = vec![
            tok(TokenKind::TagOpen, "p "),
            tok(TokenKind::AttributeName, "id"),
            tok(TokenKind::AttributeEquals, "="),
            tok(TokenKind::AttributeValue, "a"),
            tok(TokenKind::TagContinuation, ""),
            tok(TokenKind::Content, "x"),
            tok(TokenKind::TagClose, "p"),
            tok(TokenKind::Content, ""),
        ];

        let spans = tag_spans(&tokens);
        assert_eq!(spans, vec![TagSpan { tag: 0, end: 5 }, TagSpan { tag: 6, end: 7 }]);
        assert_eq!(spans[0].attributes(), 1..5);
        assert!(spans[1].attributes().is_empty());
    }

    #[test]
    fn test_tag_span_runs_to_end_of_stream() {
        let tokens = vec![
            tok(TokenKind::Content, "a"),
            tok(TokenKind::TagOpen, "div "),
            tok(TokenKind::TagContinuation, ""),
            tok(TokenKind::AttributeName, "hidden"),
        ];

        assert_eq!(tag_spans(&tokens), vec![TagSpan { tag: 1, end: 4 }]);
    }

    #[test]
    fn test_kind_serializes_camel_case() {
        let json = serde_json::to_string(&tok(TokenKind::AttributeValue, "x")).unwrap();
        assert_eq!(json, r#"{"kind":"attributeValue","text":"x"}"#);
    }
}
