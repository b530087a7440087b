//! Template expression substitution
//!
//! Finds `{{ code }}` regions in template text, evaluates them and splices the
//! escaped result into the text. A failing expression is replaced by an error
//! span and the rest of the template carries on.

use crate::Evaluator;

/// Class of the span that replaces a failed expression
pub const ERROR_CLASS: &str = "jserror";

/// Brace scanning states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BraceState {
    /// Outside any expression
    Idle,
    /// One `{` seen
    OneOpen,
    /// Inside `{{`, capturing code
    Capturing,
    /// One `}` seen while capturing
    OneClose,
}

/// Substitute every `{{ code }}` region of `template`
///
/// The output always starts with a `<style>` block that styles the error
/// class with `error_style`, so failed expressions are visible once styles are
/// inlined. A lone brace is copied through, and an expression left open at the
/// end of the input is copied through as written.
pub fn interpolate<E>(template: &str, evaluator: &mut E, error_style: &str) -> String
where
    E: Evaluator + ?Sized,
{
    let mut out = format!("<style>.{}{{{}}}</style>", ERROR_CLASS, error_style);
    let mut code = String::new();
    let mut state = BraceState::Idle;
    let mut fragments = 0usize;

    for c in template.chars() {
        state = match (state, c) {
            (BraceState::Idle, '{') => BraceState::OneOpen,
            (BraceState::Idle, c) => {
                out.push(c);
                BraceState::Idle
            }
            (BraceState::OneOpen, '{') => {
                code.clear();
                BraceState::Capturing
            }
            (BraceState::OneOpen, c) => {
                out.push('{');
                out.push(c);
                BraceState::Idle
            }
            (BraceState::Capturing, '}') => BraceState::OneClose,
            (BraceState::Capturing, c) => {
                code.push(c);
                BraceState::Capturing
            }
            (BraceState::OneClose, '}') => {
                fragments += 1;
                render_fragment(evaluator, &code, &mut out);
                BraceState::Idle
            }
            (BraceState::OneClose, c) => {
                code.push('}');
                code.push(c);
                BraceState::Capturing
            }
        };
    }

    match state {
        BraceState::Idle => {}
        BraceState::OneOpen => out.push('{'),
        BraceState::Capturing => {
            out.push_str("{{");
            out.push_str(&code);
        }
        BraceState::OneClose => {
            out.push_str("{{");
            out.push_str(&code);
            out.push('}');
        }
    }

    log::debug!("evaluated {} template expressions", fragments);
    out
}

/// Evaluate one expression and append its output
fn render_fragment<E>(evaluator: &mut E, code: &str, out: &mut String)
where
    E: Evaluator + ?Sized,
{
    match evaluator.evaluate(code) {
        Ok(Some(text)) => out.push_str(&escape_html(&text)),
        Ok(None) => {}
        Err(err) => {
            log::warn!("template expression `{}` failed: {}", code.trim(), err);
            out.push_str("<span class=\"");
            out.push_str(ERROR_CLASS);
            out.push_str("\">");
            out.push_str(&escape_html(&err.to_string()));
            out.push_str("</span>");
        }
    }
}

/// Escape text for inclusion in markup; newlines become `<br>`
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            '\n' => out.push_str("<br>"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{JsError, JsResult, Sandbox, SandboxLimits};

    const PREFIX: &str = "<style>.jserror{}</style>";

    /// Echoes the trimmed code, fails on `fail`, yields nothing on `none`
    struct Echo {
        seen: Vec<String>,
    }

    impl Evaluator for Echo {
        fn evaluate(&mut self, code: &str) -> JsResult<Option<String>> {
            self.seen.push(code.to_string());
            match code.trim() {
                "fail" => Err(JsError::thrown("Error: <boom>")),
                "none" => Ok(None),
                other => Ok(Some(other.to_string())),
            }
        }
    }

    fn echo(template: &str) -> (String, Vec<String>) {
        let mut evaluator = Echo { seen: Vec::new() };
        let out = interpolate(template, &mut evaluator, "");
        (out, evaluator.seen)
    }

    #[test]
    fn test_plain_text_gets_prefix() {
        let (out, seen) = echo("<p>hi</p>");
        assert_eq!(out, format!("{}<p>hi</p>", PREFIX));
        assert!(seen.is_empty());
    }

    #[test]
    fn test_error_style_in_prefix() {
        let mut evaluator = Echo { seen: Vec::new() };
        let out = interpolate("", &mut evaluator, "color:red;");
        assert_eq!(out, "<style>.jserror{color:red;}</style>");
    }

    #[test]
    fn test_code_is_captured_verbatim() {
        let (out, seen) = echo("a {{ x }} b {{y}}c");
        assert_eq!(out, format!("{}a x b yc", PREFIX));
        assert_eq!(seen, vec![" x ", "y"]);
    }

    #[test]
    fn test_single_braces_pass_through() {
        let (out, seen) = echo("p { color: red; } {x}");
        assert_eq!(out, format!("{}p {{ color: red; }} {{x}}", PREFIX));
        assert!(seen.is_empty());
    }

    #[test]
    fn test_single_close_inside_code() {
        let (_, seen) = echo("{{ a}b }}");
        assert_eq!(seen, vec![" a}b "]);
    }

    #[test]
    fn test_result_is_escaped() {
        let (out, _) = echo("{{<b>&'\"}}");
        assert_eq!(out, format!("{}&lt;b&gt;&amp;&#039;&quot;", PREFIX));
    }

    #[test]
    fn test_failure_renders_error_span() {
        let (out, _) = echo("before {{ fail }} after");
        assert_eq!(
            out,
            format!("{}before <span class=\"jserror\">Error: &lt;boom&gt;</span> after", PREFIX)
        );
    }

    #[test]
    fn test_empty_result() {
        let (out, _) = echo("[{{ none }}]");
        assert_eq!(out, format!("{}[]", PREFIX));
    }

    #[test]
    fn test_unterminated_expression() {
        assert_eq!(echo("a {{ b").0, format!("{}a {{{{ b", PREFIX));
        assert_eq!(echo("a {{ b }").0, format!("{}a {{{{ b }}", PREFIX));
        assert_eq!(echo("a {").0, format!("{}a {{", PREFIX));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a\nb"), "a<br>b");
        assert_eq!(escape_html("x & y"), "x &amp; y");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_with_sandbox() {
        let mut sandbox = Sandbox::new(&SandboxLimits::default()).unwrap();
        let out = interpolate(r#"Hello {{ "wor" + "ld" }}!"#, &mut sandbox, "");
        assert_eq!(out, format!("{}Hello world!", PREFIX));

        let out = interpolate("{{ throwsError() }}", &mut sandbox, "");
        assert!(out.starts_with(PREFIX));
        assert!(out.contains("<span class=\"jserror\">ReferenceError"));
        assert!(out.ends_with("</span>"));
    }
}
