//! Token stream serialization
//!
//! Rebuilds markup text from tokens, either plain or wrapped in terminal
//! colors.

use crate::palette::Palette;
use crate::token::{Token, TokenKind};

/// Render tokens back to markup
pub fn to_text(tokens: &[Token]) -> String {
    serialize_with(tokens, |token| token.text.clone())
}

/// Render tokens back to markup, coloring each token's text by kind
pub fn colorize(tokens: &[Token], palette: &Palette) -> String {
    serialize_with(tokens, |token| palette.get(token.kind).paint(&token.text))
}

/// Render tokens, mapping each token's text through `render`
///
/// The markup punctuation (`<`, `</`, `>` and value quotes) is written outside
/// of `render`.
pub fn serialize_with<F>(tokens: &[Token], render: F) -> String
where
    F: Fn(&Token) -> String,
{
    let mut out = String::new();

    for (i, token) in tokens.iter().enumerate() {
        let prev = i.checked_sub(1).map(|p| tokens[p].kind);
        let next = tokens.get(i + 1).map(|t| t.kind);

        match token.kind {
            TokenKind::TagOpen | TokenKind::TagClose => {
                out.push_str(if token.kind == TokenKind::TagOpen { "<" } else { "</" });
                out.push_str(&render(token));
                // a tag with attributes gets its `>` from the content that follows them
                if next == Some(TokenKind::Content) {
                    out.push('>');
                }
            }
            TokenKind::Content => {
                if prev.is_some_and(closes_before_content) {
                    out.push('>');
                }
                out.push_str(&render(token));
            }
            TokenKind::AttributeValue => {
                out.push('"');
                out.push_str(&render(token));
                out.push('"');
            }
            TokenKind::TagContinuation | TokenKind::AttributeName | TokenKind::AttributeEquals => {
                out.push_str(&render(token));
            }
        }
    }

    out.trim().to_string()
}

/// Attribute tokens after which content needs the tag's `>`
fn closes_before_content(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::TagContinuation
            | TokenKind::AttributeName
            | TokenKind::AttributeEquals
            | TokenKind::AttributeValue
    )
}
