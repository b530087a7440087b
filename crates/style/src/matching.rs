//! Selector Matching
//!
//! Matches stylesheet rules against tag and class names.

use mailstyle_css::{SelectorKind, StyleRule, Stylesheet};

/// Rules whose selector matches `name`, in definition order
pub fn matching_rules<'a>(
    rules: &'a [StyleRule],
    name: &'a str,
) -> impl Iterator<Item = &'a StyleRule> + 'a {
    rules.iter().filter(move |rule| rule.selector.is_match(name))
}

/// Concatenated declarations for a tag with the given classes
///
/// Class rules come first, ordered by the class's position in the attribute
/// and then by rule order; element rules follow in rule order. Nothing is
/// deduplicated.
pub fn declarations_for(sheet: &Stylesheet, tag_name: &str, classes: &[&str]) -> String {
    let mut declarations = String::new();

    for class in classes {
        for rule in matching_rules(sheet.rules(SelectorKind::Class), class) {
            declarations.push_str(&rule.declarations);
        }
    }

    for rule in matching_rules(sheet.rules(SelectorKind::Element), tag_name) {
        declarations.push_str(&rule.declarations);
    }

    declarations
}
