//! Mailstyle CSS
//!
//! Flat stylesheet parser and wildcard selector patterns.

mod selector;
mod stylesheet;

pub use selector::{SelectorKind, SelectorPattern};
pub use stylesheet::{normalize_declarations, StyleRule, Stylesheet};
