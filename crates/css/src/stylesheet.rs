//! Stylesheet parser
//!
//! Parses the flat subset of CSS that can be inlined: blocks of the form
//! `name { declarations }` or `.name { declarations }`. There are no
//! combinators, at-rules or comments. Anything outside the subset produces
//! rules whose selectors never match a real tag or class name.

use crate::selector::{SelectorKind, SelectorPattern};

/// A selector and the declarations it carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    pub selector: SelectorPattern,
    /// Normalized declarations, each terminated by `;` (e.g. `color:red;margin:0;`)
    pub declarations: String,
}

/// Element and class rules, each in source order
#[derive(Debug, Default, Clone)]
pub struct Stylesheet {
    pub elements: Vec<StyleRule>,
    pub classes: Vec<StyleRule>,
}

impl Stylesheet {
    /// Create a new empty stylesheet
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse stylesheet text
    pub fn parse(input: &str) -> Self {
        let mut parser = StylesheetParser::new();
        for c in input.chars() {
            parser.step(c);
        }
        let sheet = parser.sheet;
        log::debug!(
            "parsed stylesheet: {} element rules, {} class rules",
            sheet.elements.len(),
            sheet.classes.len()
        );
        sheet
    }

    /// Rules of one selector kind
    pub fn rules(&self, kind: SelectorKind) -> &[StyleRule] {
        match kind {
            SelectorKind::Element => &self.elements,
            SelectorKind::Class => &self.classes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty() && self.classes.is_empty()
    }

    /// Append a rule, keeping earlier rules for the same selector
    pub fn push(&mut self, kind: SelectorKind, rule: StyleRule) {
        match kind {
            SelectorKind::Element => self.elements.push(rule),
            SelectorKind::Class => self.classes.push(rule),
        }
    }
}

/// Capture state
#[derive(Debug)]
enum State {
    /// Between rules
    Idle,
    /// Reading a selector name
    Selector(SelectorKind),
    /// Reading declarations for a closed selector name
    Declarations { kind: SelectorKind, name: String },
    /// Inside a block that had no selector
    Anonymous,
}

struct StylesheetParser {
    state: State,
    buffer: String,
    sheet: Stylesheet,
}

impl StylesheetParser {
    fn new() -> Self {
        Self {
            state: State::Idle,
            buffer: String::new(),
            sheet: Stylesheet::new(),
        }
    }

    fn step(&mut self, c: char) {
        match std::mem::replace(&mut self.state, State::Idle) {
            State::Idle => self.idle(c),
            State::Selector(kind) => self.selector(kind, c),
            State::Declarations { kind, name } => self.declarations(kind, name, c),
            State::Anonymous => {
                if c != '}' {
                    self.state = State::Anonymous;
                }
            }
        }
    }

    fn idle(&mut self, c: char) {
        self.buffer.clear();
        match c {
            '.' => self.state = State::Selector(SelectorKind::Class),
            '{' => self.state = State::Anonymous,
            '}' => {}
            c if c.is_whitespace() => {}
            c => {
                self.buffer.push(c);
                self.state = State::Selector(SelectorKind::Element);
            }
        }
    }

    fn selector(&mut self, kind: SelectorKind, c: char) {
        match c {
            '{' => {
                let name = self.buffer.trim().to_string();
                self.buffer.clear();
                self.state = State::Declarations { kind, name };
            }
            // a selector without a block is dropped
            '}' => self.buffer.clear(),
            c => {
                self.buffer.push(c);
                self.state = State::Selector(kind);
            }
        }
    }

    fn declarations(&mut self, kind: SelectorKind, name: String, c: char) {
        if c != '}' {
            self.buffer.push(c);
            self.state = State::Declarations { kind, name };
            return;
        }

        let declarations = normalize_declarations(&self.buffer);
        self.buffer.clear();

        if name.is_empty() {
            log::trace!("dropping {:?} rule without a name", kind);
            return;
        }

        self.sheet.push(
            kind,
            StyleRule {
                selector: SelectorPattern::new(&name),
                declarations,
            },
        );
    }
}

/// Normalize a declaration block for use in a `style` attribute
///
/// Line breaks and tabs become spaces rather than being deleted outright, so
/// `margin:\n0 auto` keeps its value separator. Whitespace around `;` is
/// removed, empty declarations are dropped, and every declaration ends with `;`.
pub fn normalize_declarations(block: &str) -> String {
    let flattened: String = block
        .chars()
        .map(|c| if matches!(c, '\r' | '\n' | '\t') { ' ' } else { c })
        .collect();

    let mut out = String::new();
    for declaration in flattened.split(';').map(str::trim).filter(|d| !d.is_empty()) {
        out.push_str(declaration);
        out.push(';');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(rules: &[StyleRule]) -> Vec<&str> {
        rules.iter().map(|r| r.selector.as_str()).collect()
    }

    #[test]
    fn test_element_and_class_rules() {
        let sheet = Stylesheet::parse(".red{color:red;} p{font-weight:bold;}");
        assert_eq!(names(&sheet.classes), vec!["red"]);
        assert_eq!(names(&sheet.elements), vec!["p"]);
        assert_eq!(sheet.classes[0].declarations, "color:red;");
        assert_eq!(sheet.elements[0].declarations, "font-weight:bold;");
    }

    #[test]
    fn test_multiline_block() {
        let sheet = Stylesheet::parse(
            "\n  td {\r\n\tpadding: 4px 8px ;\n\tborder: 1px\tsolid #ccc\n  }\n",
        );
        assert_eq!(names(&sheet.elements), vec!["td"]);
        assert_eq!(
            sheet.elements[0].declarations,
            "padding: 4px 8px;border: 1px solid #ccc;"
        );
    }

    #[test]
    fn test_source_order_and_repeats_are_kept() {
        let sheet = Stylesheet::parse("p{a:1} h?{b:2} p{c:3}");
        assert_eq!(names(&sheet.elements), vec!["p", "h?", "p"]);
        assert_eq!(sheet.elements[2].declarations, "c:3;");
    }

    #[test]
    fn test_decimal_in_declarations() {
        let sheet = Stylesheet::parse(".x{margin:0.5em;line-height:1.4}");
        assert_eq!(names(&sheet.classes), vec!["x"]);
        assert!(sheet.elements.is_empty());
        assert_eq!(sheet.classes[0].declarations, "margin:0.5em;line-height:1.4;");
    }

    #[test]
    fn test_empty_block() {
        let sheet = Stylesheet::parse(".empty{ }");
        assert_eq!(sheet.classes[0].declarations, "");
    }

    #[test]
    fn test_anonymous_block_is_dropped() {
        let sheet = Stylesheet::parse("{color:red} p{x:y}");
        assert_eq!(names(&sheet.elements), vec!["p"]);
        assert!(sheet.classes.is_empty());
    }

    #[test]
    fn test_unsupported_syntax_is_harmless() {
        let sheet = Stylesheet::parse("@media (max-width:600px){ p{color:red} } .a{b:c}");
        assert_eq!(names(&sheet.classes), vec!["a"]);
        assert_eq!(sheet.elements.len(), 1);
        assert!(!sheet.elements[0].selector.is_match("p"));
    }

    #[test]
    fn test_unterminated_block() {
        let sheet = Stylesheet::parse("p{color:red");
        assert!(sheet.is_empty());
    }

    #[test]
    fn test_rules_by_kind() {
        let sheet = Stylesheet::parse(".a{x:1}");
        assert_eq!(sheet.rules(SelectorKind::Class).len(), 1);
        assert!(sheet.rules(SelectorKind::Element).is_empty());
    }

    #[test]
    fn test_normalize_declarations() {
        assert_eq!(normalize_declarations(" a : b ;; c:d "), "a : b;c:d;");
        assert_eq!(normalize_declarations("  \n "), "");
    }

    #[test]
    fn test_line_breaks_become_spaces() {
        assert_eq!(normalize_declarations("margin:\n0\tauto;\r\npadding:0"), "margin: 0 auto;padding:0;");
    }
}
