//! The HTML of the question form.

use learnloop_tutor::Level;
use std::fmt::Write;

/// The title of the page.
pub const TITLE: &str = "LearnLoop — adaptive learning platform";

/// The placeholder of the question box.
pub const PLACEHOLDER: &str = "e.g., simplify (x^2 - 1)/(x - 1)";

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// The current state of the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState<'a> {
    /// The question in the text box.
    pub question: &'a str,

    /// The selected level.
    pub level: Level,

    /// Whether the step-by-step box is checked.
    pub step_by_step: bool,

    /// The response to show below the form, if a question was submitted.
    pub answer: Option<&'a str>,
}

impl FormState<'_> {
    /// An empty form with the given level preselected.
    pub fn empty(level: Level) -> Self {
        FormState {
            question: "",
            level,
            step_by_step: true,
            answer: None,
        }
    }
}

/// Renders the whole page.
pub fn render(state: &FormState) -> String {
    let mut options = String::new();
    for level in Level::ALL {
        let selected = if level == state.level { " selected" } else { "" };
        // writing into a `String` cannot fail
        let _ = write!(options, r#"<option value="{0}"{1}>{0}</option>"#, level, selected);
    }

    let checked = if state.step_by_step { " checked" } else { "" };
    let answer = state.answer
        .map(|answer| format!(r#"<section class="answer"><h2>Answer</h2><pre>{}</pre></section>"#, html_escape(answer)))
        .unwrap_or_default();

    format!(r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
    <style>
        body {{ font-family: sans-serif; max-width: 48rem; margin: 2rem auto; padding: 0 1rem; }}
        input[type=text] {{ width: 100%; padding: 0.5rem; box-sizing: border-box; }}
        .row {{ margin: 1rem 0; display: flex; gap: 1.5rem; align-items: center; }}
        pre {{ white-space: pre-wrap; background: #f4f4f4; padding: 1rem; }}
    </style>
</head>
<body>
    <h1>{title}</h1>
    <p>Ask about math, programming, or grammar. SymPy validates math expressions.</p>
    <form method="post" action="/explain">
        <div class="row">
            <label for="question">Your question</label>
        </div>
        <input type="text" id="question" name="question" placeholder="{placeholder}" value="{question}">
        <div class="row">
            <label>Level <select name="level">{options}</select></label>
            <label><input type="checkbox" name="step_by_step" value="on"{checked}> Step-by-step</label>
        </div>
        <button type="submit">Explain</button>
    </form>
    {answer}
</body>
</html>
"#,
        title = TITLE,
        placeholder = html_escape(PLACEHOLDER),
        question = html_escape(state.question),
        options = options,
        checked = checked,
        answer = answer,
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn escape_special_characters() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("x & y"), "x &amp; y");
        assert_eq!(html_escape(r#""a" 'b'"#), "&quot;a&quot; &#39;b&#39;");
    }

    #[test]
    fn empty_form() {
        let html = render(&FormState::empty(Level::Intermediate));
        assert!(html.contains("<title>LearnLoop — adaptive learning platform</title>"));
        assert!(html.contains(r#"placeholder="e.g., simplify (x^2 - 1)/(x - 1)""#));
        assert!(html.contains(r#"<option value="Intermediate" selected>Intermediate</option>"#));
        assert!(html.contains(r#"<option value="Beginner">Beginner</option>"#));
        assert!(html.contains(r#"value="on" checked>"#));
        assert!(!html.contains("<pre>"));
    }

    #[test]
    fn answer_is_escaped() {
        let html = render(&FormState {
            question: "<b>2+2</b>",
            level: Level::Beginner,
            step_by_step: false,
            answer: Some("a < b"),
        });
        assert!(html.contains(r#"value="&lt;b&gt;2+2&lt;/b&gt;""#));
        assert!(html.contains("<pre>a &lt; b</pre>"));
        assert!(html.contains(r#"value="on">"#));
    }
}
