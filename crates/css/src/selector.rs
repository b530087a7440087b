//! Selector patterns
//!
//! Selectors are flat names with shell-style wildcards: `*` matches any run of
//! characters (including none), `?` matches exactly one character, and every
//! other character matches itself. Matching ignores case.

use std::fmt;

/// What a selector applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorKind {
    /// Tag name selector (e.g., p, h?, td)
    Element,
    /// Class selector (e.g., .btn-*)
    Class,
}

/// One compiled pattern character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PatternPart {
    /// `*`
    AnyRun,
    /// `?`
    AnyOne,
    Literal(char),
}

/// A compiled, case-insensitive wildcard selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorPattern {
    source: String,
    parts: Vec<PatternPart>,
}

impl SelectorPattern {
    /// Compile a selector pattern
    pub fn new(source: &str) -> Self {
        let parts = source
            .chars()
            .flat_map(char::to_lowercase)
            .map(|c| match c {
                '*' => PatternPart::AnyRun,
                '?' => PatternPart::AnyOne,
                c => PatternPart::Literal(c),
            })
            .collect();

        Self {
            source: source.to_string(),
            parts,
        }
    }

    /// The pattern as written
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Check if the whole of `name` matches this pattern
    pub fn is_match(&self, name: &str) -> bool {
        let text: Vec<char> = name.chars().flat_map(char::to_lowercase).collect();

        let mut p = 0;
        let mut t = 0;
        // last `*` seen, and the text position it is currently assumed to end at
        let mut backtrack: Option<(usize, usize)> = None;

        while t < text.len() {
            match self.parts.get(p) {
                Some(PatternPart::Literal(c)) if *c == text[t] => {
                    p += 1;
                    t += 1;
                }
                Some(PatternPart::AnyOne) => {
                    p += 1;
                    t += 1;
                }
                Some(PatternPart::AnyRun) => {
                    backtrack = Some((p, t));
                    p += 1;
                }
                _ => match backtrack {
                    Some((star, end)) => {
                        p = star + 1;
                        t = end + 1;
                        backtrack = Some((star, end + 1));
                    }
                    None => return false,
                },
            }
        }

        self.parts[p..].iter().all(|part| *part == PatternPart::AnyRun)
    }
}

impl fmt::Display for SelectorPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
