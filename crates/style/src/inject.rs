//! Style injection
//!
//! Folds matched stylesheet declarations into each tag's `style` attribute and
//! strips `class` attributes. The token stream is edited in place with
//! position-based splices; tags are visited back to front so earlier
//! positions stay valid.

use std::ops::Range;

use smallvec::SmallVec;

use mailstyle_css::Stylesheet;
use mailstyle_html::{tag_spans, TagSpan, Token, TokenKind};

use crate::matching::declarations_for;

/// The first `style` attribute of a tag span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StyleAttribute {
    /// A complete group; index of its value token
    Value(usize),
    /// `style` or `style=` without a value; index of its last token
    Bare { last: usize, has_equals: bool },
}

/// What a tag span contains, found before any edit is made
#[derive(Debug, Default)]
struct SpanAttributes {
    /// Class names, in attribute order
    classes: SmallVec<[String; 4]>,
    /// Token ranges of every `class` attribute, in stream order
    class_ranges: SmallVec<[Range<usize>; 1]>,
    style: Option<StyleAttribute>,
}

/// Injects stylesheet rules into tag tokens
pub struct StyleInjector<'a> {
    sheet: &'a Stylesheet,
}

impl<'a> StyleInjector<'a> {
    pub fn new(sheet: &'a Stylesheet) -> Self {
        Self { sheet }
    }

    /// Inline the stylesheet into `tokens`
    pub fn inject(&self, tokens: &mut Vec<Token>) {
        let spans = tag_spans(tokens);
        let mut styled = 0usize;

        for span in spans.into_iter().rev() {
            if self.inject_span(tokens, span) {
                styled += 1;
            }
        }

        log::debug!("inlined styles into {} tags", styled);
    }

    /// Process one tag; returns whether declarations were added
    fn inject_span(&self, tokens: &mut Vec<Token>, span: TagSpan) -> bool {
        let mut attrs = scan_span(tokens, span);

        let declarations = if tokens[span.tag].kind == TokenKind::TagOpen {
            let classes: SmallVec<[&str; 4]> = attrs.classes.iter().map(String::as_str).collect();
            declarations_for(self.sheet, tokens[span.tag].text.trim(), &classes)
        } else {
            String::new()
        };

        match attrs.style {
            Some(StyleAttribute::Value(value)) => {
                tokens[value].text.insert_str(0, &declarations);
            }
            Some(StyleAttribute::Bare { last, has_equals }) if !declarations.is_empty() => {
                let mut group: SmallVec<[Token; 2]> = SmallVec::new();
                if !has_equals {
                    group.push(Token::new(TokenKind::AttributeEquals, "="));
                }
                group.push(Token::new(TokenKind::AttributeValue, declarations.as_str()));

                let added = group.len();
                tokens.splice(last + 1..last + 1, group);
                for range in attrs.class_ranges.iter_mut().filter(|r| r.start > last) {
                    *range = range.start + added..range.end + added;
                }
            }
            _ => {}
        }

        for range in attrs.class_ranges.into_iter().rev() {
            tokens.drain(range);
        }

        if declarations.is_empty() {
            return false;
        }

        if attrs.style.is_none() {
            insert_style_attribute(tokens, span.tag, declarations);
        }
        true
    }
}

/// Find class names, class attribute ranges and the style value in a span
fn scan_span(tokens: &[Token], span: TagSpan) -> SpanAttributes {
    let mut attrs = SpanAttributes::default();
    let mut i = span.tag + 1;

    while i < span.end {
        let token = &tokens[i];
        if token.kind != TokenKind::AttributeName {
            i += 1;
            continue;
        }

        let (value, group_end) = attribute_group(tokens, i, span.end);

        if token.is_named("class") {
            if let Some(v) = value {
                attrs.classes.extend(tokens[v].text.split_whitespace().map(str::to_string));
            }
            // whitespace after the class attribute goes with it
            let mut start = i;
            let mut end = group_end;
            while end < span.end && is_blank_continuation(&tokens[end]) {
                end += 1;
            }
            // a trailing class attribute takes the whitespace before it instead
            if end == span.end {
                while let Some(prev) = attrs.class_ranges.last().cloned() {
                    if prev.end != start {
                        break;
                    }
                    start = prev.start;
                    attrs.class_ranges.pop();
                }
                let floor = attrs.class_ranges.last().map_or(span.tag + 1, |r| r.end);
                while start > floor && is_blank_continuation(&tokens[start - 1]) {
                    start -= 1;
                }
            }
            attrs.class_ranges.push(start..end);
            i = end;
            continue;
        }

        if token.is_named("style") && attrs.style.is_none() {
            attrs.style = Some(match value {
                Some(value) => StyleAttribute::Value(value),
                None => StyleAttribute::Bare {
                    last: group_end - 1,
                    has_equals: group_end > i + 1,
                },
            });
        }
        i = group_end;
    }

    attrs
}

fn is_blank_continuation(token: &Token) -> bool {
    token.kind == TokenKind::TagContinuation && token.text.trim().is_empty()
}

/// The attribute starting at `name`: index of its value token, if any, and the
/// end of its name/equals/value group
fn attribute_group(tokens: &[Token], name: usize, end: usize) -> (Option<usize>, usize) {
    let equals = name + 1;
    if equals >= end || tokens[equals].kind != TokenKind::AttributeEquals {
        return (None, equals);
    }

    let value = equals + 1;
    if value >= end || tokens[value].kind != TokenKind::AttributeValue {
        return (None, value);
    }

    (Some(value), value + 1)
}

/// Splice a new `style` attribute right after the tag token
fn insert_style_attribute(tokens: &mut Vec<Token>, tag: usize, declarations: String) {
    // keep the tag name and the new attribute apart
    if !tokens[tag].text.ends_with(|c: char| c.is_whitespace()) {
        tokens[tag].text.push(' ');
    }

    let group = [
        Token::new(TokenKind::AttributeName, "style"),
        Token::new(TokenKind::AttributeEquals, "="),
        Token::new(TokenKind::AttributeValue, declarations),
        Token::new(TokenKind::TagContinuation, " "),
    ];
    tokens.splice(tag + 1..tag + 1, group);
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailstyle_html::{to_text, tokenize};

    fn inline(css: &str, html: &str) -> String {
        let sheet = Stylesheet::parse(css);
        let mut tokens = tokenize(html);
        StyleInjector::new(&sheet).inject(&mut tokens);
        to_text(&tokens)
    }

    #[test]
    fn test_element_rule() {
        assert_eq!(
            inline("p{font-weight:bold;}", "<p>x</p>"),
            r#"<p style="font-weight:bold;" >x</p>"#
        );
    }

    #[test]
    fn test_class_then_element() {
        assert_eq!(
            inline(".red{color:red;} p{font-weight:bold;}", r#"<p class="red">x</p>"#),
            r#"<p style="color:red;font-weight:bold;" >x</p>"#
        );
    }

    #[test]
    fn test_merge_with_existing_style() {
        let out = inline(
            ".red{color:red;} p{font-weight:bold;}",
            r#"<p style="margin:0;" class="red">x</p>"#,
        );
        assert_eq!(out, r#"<p style="color:red;font-weight:bold;margin:0;">x</p>"#);
        assert_eq!(out.matches("style=").count(), 1);
    }

    #[test]
    fn test_existing_style_after_class() {
        assert_eq!(
            inline(".a{x:1}", r#"<td class="a" style="y:2;">z</td>"#),
            r#"<td style="x:1;y:2;">z</td>"#
        );
    }

    #[test]
    fn test_class_stripped_without_match() {
        assert_eq!(
            inline(".other{x:1}", r#"<span class="a" id="b">z</span>"#),
            r#"<span id="b">z</span>"#
        );
    }

    #[test]
    fn test_class_stripped_keeps_other_attributes() {
        assert_eq!(
            inline(".a{x:1}", r##"<a href="#" class="a" title="t">z</a>"##),
            r##"<a style="x:1;" href="#" title="t">z</a>"##
        );
    }

    #[test]
    fn test_wildcard_class() {
        assert_eq!(
            inline(".btn-*{padding:4px;}", r#"<a class="btn btn-primary">go</a>"#),
            r#"<a style="padding:4px;" >go</a>"#
        );
    }

    #[test]
    fn test_nested_tags() {
        assert_eq!(
            inline("td{a:1} .c{b:2}", r#"<tr><td class="c">1</td><td>2</td></tr>"#),
            r#"<tr><td style="b:2;a:1;" >1</td><td style="a:1;" >2</td></tr>"#
        );
    }

    #[test]
    fn test_closing_tags_untouched() {
        assert_eq!(inline("p{a:1}", "</p>"), "</p>");
    }

    #[test]
    fn test_unmatched_tag_untouched() {
        let html = r#"<div id="x">y</div>"#;
        assert_eq!(inline("p{a:1}", html), html);
    }

    #[test]
    fn test_trailing_class_takes_leading_whitespace() {
        assert_eq!(
            inline(".a{x:1}", r##"<a href="#" class="a">z</a>"##),
            r##"<a style="x:1;" href="#">z</a>"##
        );
        assert_eq!(
            inline(".other{x:1}", r#"<td id="c" class="a" class="b">z</td>"#),
            r#"<td id="c">z</td>"#
        );
    }

    #[test]
    fn test_bare_style_attribute_gets_value() {
        let out = inline("p{a:1;}", "<p style>x</p>");
        assert_eq!(out, r#"<p style="a:1;">x</p>"#);
        assert_eq!(out.matches("style").count(), 1);
    }

    #[test]
    fn test_style_without_value_gets_value() {
        assert_eq!(
            inline("p{a:1;}", "<p style=>x</p>"),
            r#"<p style="a:1;">x</p>"#
        );
    }

    #[test]
    fn test_bare_style_before_class() {
        assert_eq!(
            inline(".c{b:2}", r#"<p style class="c" id="i">x</p>"#),
            r#"<p style="b:2;" id="i">x</p>"#
        );
    }

    #[test]
    fn test_bare_style_without_match_untouched() {
        assert_eq!(inline("div{a:1}", "<p style>x</p>"), "<p style>x</p>");
    }

    #[test]
    fn test_unterminated_tag() {
        assert_eq!(inline("div{a:1}", "<div"), r#"<div style="a:1;""#);
    }
}
