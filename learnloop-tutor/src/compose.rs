//! The response composer: assembles the templated answer to a question.

use crate::{config::TutorConfig, level::Level, verify::{describe, try_verify}};
use learnloop_error::Error;
use tracing::debug;

/// Characters whose presence marks a question as math.
const MATH_CHARS: &[char] = &['+', '-', '*', '/', '=', '^'];

/// Leading words that mark a question as math, compared case-insensitively.
const MATH_PREFIXES: &[&str] = &["simplify", "derive", "integrate"];

/// The placeholder standing in for a real answer.
pub const PLACEHOLDER: &str =
    "**Answer (stub):** This is a minimal placeholder response. Replace with an LLM.";

/// The verification line for questions that are not math.
pub const NO_VERIFICATION: &str = "No math verification needed.";

/// The body in step-by-step mode.
pub const STEP_BY_STEP_BODY: [&str; 4] = [
    "1) Rephrase the question in simpler terms.",
    "2) Identify the key concept(s).",
    "3) Work through the solution methodically.",
    "4) Summarize and suggest a follow-up exercise.",
];

/// The body in concise mode.
pub const CONCISE_BODY: &str = "Here's a concise explanation based on core concepts.";

/// Returns true if the question should go through the math verifier.
pub fn needs_verification(question: &str) -> bool {
    if question.contains(MATH_CHARS) {
        return true;
    }

    let lower = question.to_lowercase();
    MATH_PREFIXES.iter().any(|prefix| lower.starts_with(prefix))
}

/// The label of the mode selected by the step-by-step flag.
pub fn mode_label(step_by_step: bool) -> &'static str {
    if step_by_step {
        "step-by-step"
    } else {
        "concise"
    }
}

/// The verification line for a question. If the question looks like math but cannot be verified,
/// `on_failure` is given the error before it becomes the fallback line.
pub fn verification_note(question: &str, on_failure: impl FnOnce(&Error)) -> String {
    if !needs_verification(question) {
        return NO_VERIFICATION.to_string();
    }

    let outcome = try_verify(question);
    if let Err(err) = &outcome {
        on_failure(err);
    }
    describe(question, &outcome)
}

/// Builds the full response to a question. The output depends only on the arguments.
pub fn structured_answer(question: &str, level: Level, step_by_step: bool) -> String {
    assemble(level, step_by_step, &verification_note(question, |_| ()))
}

/// Builds the response around a verification line.
fn assemble(level: Level, step_by_step: bool, note: &str) -> String {
    let intro = format!("Level: **{}**  |  Mode: {}", level, mode_label(step_by_step));

    let body = if step_by_step {
        STEP_BY_STEP_BODY.join("\n")
    } else {
        CONCISE_BODY.to_string()
    };

    format!("{}\n\n{}\n\n**SymPy check:** {}\n\n{}", intro, PLACEHOLDER, note, body)
}

/// One submission of the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// The question as typed. Surrounding whitespace is ignored.
    pub question: String,

    /// The selected level, or [`None`] to use the configured default.
    pub level: Option<Level>,

    /// Whether the step-by-step body is wanted.
    pub step_by_step: bool,
}

/// The tutor, holding its configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tutor {
    config: TutorConfig,
}

impl Tutor {
    /// Creates a tutor with the given configuration.
    pub fn new(config: TutorConfig) -> Self {
        Self { config }
    }

    /// The configuration of this tutor.
    pub fn config(&self) -> &TutorConfig {
        &self.config
    }

    /// Answers a submission.
    pub fn answer(&self, submission: &Submission) -> String {
        self.answer_reporting(submission, |_| ())
    }

    /// Answers a submission. If the question cannot be verified, `on_failure` is given the error,
    /// whose spans point into the trimmed question.
    pub fn answer_reporting(&self, submission: &Submission, on_failure: impl FnOnce(&Error)) -> String {
        let level = submission.level.unwrap_or(self.config.default_level);
        debug!(%level, step_by_step = submission.step_by_step, "answering question");
        let note = verification_note(submission.question.trim(), on_failure);
        assemble(level, submission.step_by_step, &note)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    /// The lines of the body, after the verification line.
    fn body_lines(response: &str) -> Vec<&str> {
        response.split("\n\n").nth(3).unwrap().lines().collect()
    }

    #[test]
    fn non_math_question() {
        for level in Level::ALL {
            for step_by_step in [true, false] {
                let response = structured_answer("What is a noun?", level, step_by_step);
                assert!(response.contains(&format!("Level: **{}**", level)));
                assert!(response.contains(&format!("Mode: {}", mode_label(step_by_step))));
                assert!(response.contains(NO_VERIFICATION));
            }
        }
    }

    #[test]
    fn exact_layout() {
        let response = structured_answer("What is a noun?", Level::Beginner, false);
        assert_eq!(response, "Level: **Beginner**  |  Mode: concise\n\n\
            **Answer (stub):** This is a minimal placeholder response. Replace with an LLM.\n\n\
            **SymPy check:** No math verification needed.\n\n\
            Here's a concise explanation based on core concepts.");
    }

    #[test]
    fn math_question_is_verified() {
        let response = structured_answer("2+2", Level::Intermediate, true);
        assert!(response.contains("**SymPy check:** Simplified: $4$"));
    }

    #[test]
    fn broken_math_still_answers() {
        let response = structured_answer("2+*", Level::Advanced, true);
        assert!(response.contains("**SymPy check:** Could not verify with SymPy:"));
        assert!(response.ends_with(STEP_BY_STEP_BODY[3]));
    }

    #[test]
    fn body_follows_flag() {
        for question in ["What is a noun?", "2+2", "2+*", ""] {
            assert_eq!(body_lines(&structured_answer(question, Level::Beginner, true)), STEP_BY_STEP_BODY);
            assert_eq!(body_lines(&structured_answer(question, Level::Beginner, false)), [CONCISE_BODY]);
        }
    }

    #[test]
    fn idempotent() {
        for question in ["What is a noun?", "simplify (x^2 - 1)/(x - 1)", "2+*"] {
            assert_eq!(
                structured_answer(question, Level::Advanced, true),
                structured_answer(question, Level::Advanced, true),
            );
        }
    }

    #[test]
    fn routing_heuristic() {
        assert!(needs_verification("x^2"));
        assert!(needs_verification("a = b"));
        assert!(needs_verification("Simplify this"));
        assert!(needs_verification("integrate sin(x)"));
        assert!(!needs_verification("What is a noun?"));
        assert!(!needs_verification(""));
        // the prefix check is a plain prefix match
        assert!(needs_verification("derived words"));
    }

    #[test]
    fn tutor_uses_default_level_and_trims() {
        let tutor = Tutor::new(TutorConfig::with_default_level(Level::Advanced));
        let response = tutor.answer(&Submission {
            question: "  What is a noun?  ".to_string(),
            level: None,
            step_by_step: false,
        });
        assert_eq!(response, structured_answer("What is a noun?", Level::Advanced, false));

        let response = tutor.answer(&Submission {
            question: "2+2".to_string(),
            level: Some(Level::Beginner),
            step_by_step: true,
        });
        assert!(response.starts_with("Level: **Beginner**"));
    }

    #[test]
    fn failure_is_reported_once() {
        let tutor = Tutor::default();
        let submission = Submission {
            question: " 1/0 ".to_string(),
            level: None,
            step_by_step: false,
        };

        let mut failures = Vec::new();
        let response = tutor.answer_reporting(&submission, |err| failures.push(err.message()));
        assert_eq!(failures, ["division by zero"]);
        assert_eq!(response, tutor.answer(&submission));
    }

    #[test]
    fn success_is_not_reported() {
        let mut reported = false;
        let note = verification_note("2+2", |_| reported = true);
        assert_eq!(note, "Simplified: $4$");
        assert!(!reported);
    }
}
