//! Mailstyle Style Engine
//!
//! Collects `<style>` blocks, matches their rules against tags and classes,
//! and inlines the declarations into `style` attributes.

pub mod collect;
pub mod inject;
pub mod matching;

use mailstyle_css::Stylesheet;
use mailstyle_html::Token;

pub use collect::{collect_style_blocks, CollectedStyles};
pub use inject::StyleInjector;
pub use matching::{declarations_for, matching_rules};

/// Move every `<style>` rule in the stream into inline `style` attributes
pub fn inline_styles(tokens: Vec<Token>) -> Vec<Token> {
    let CollectedStyles { mut tokens, css } = collect_style_blocks(tokens);
    let sheet = Stylesheet::parse(&css);
    StyleInjector::new(&sheet).inject(&mut tokens);
    tokens
}
