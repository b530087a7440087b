//! Style block collection
//!
//! Pulls every `<style>...</style>` run out of the token stream and gathers
//! its text so the rules can be inlined instead.

use mailstyle_html::{Token, TokenKind};

/// Tokens left after removing style blocks, plus the blocks' text
#[derive(Debug, Default)]
pub struct CollectedStyles {
    pub tokens: Vec<Token>,
    pub css: String,
}

/// Remove style blocks from a token stream
///
/// Everything from an opening `style` tag through the matching closing tag is
/// dropped, attributes included. Content inside is concatenated into `css`. A
/// style block that is never closed runs to the end of the stream.
pub fn collect_style_blocks(tokens: Vec<Token>) -> CollectedStyles {
    let mut collected = CollectedStyles::default();
    let mut in_style = false;
    // attribute tokens of the closing tag still belong to the block
    let mut closing = false;
    let mut blocks = 0usize;

    for token in tokens {
        if closing {
            if !token.kind.is_tag() && token.kind != TokenKind::Content {
                continue;
            }
            closing = false;
        }

        match token.kind {
            TokenKind::TagOpen if token.is_named("style") => {
                in_style = true;
                blocks += 1;
            }
            TokenKind::TagClose if in_style && token.is_named("style") => {
                in_style = false;
                closing = true;
            }
            TokenKind::Content if in_style => collected.css.push_str(&token.text),
            _ if in_style => {}
            _ => collected.tokens.push(token),
        }
    }

    if in_style {
        log::warn!("unterminated <style> block; dropped the rest of the document");
    }
    log::debug!("collected {} style blocks ({} bytes)", blocks, collected.css.len());
    collected
}
