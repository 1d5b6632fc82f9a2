//! The math verifier: parses a question as a formula, runs its command and typesets the result.

use crate::command::{Command, Request};
use learnloop_algebra::{latex::Latex, Simplified};
use learnloop_error::Error;
use tracing::{debug, info};

/// The outcome of a successful verification.
#[derive(Debug, Clone, PartialEq)]
pub struct Verified {
    /// The command that was run.
    pub command: Command,

    /// The variable of differentiation or integration, if any.
    pub variable: Option<String>,

    /// The simplified result.
    pub result: Simplified,
}

impl Verified {
    /// The result, typeset as LaTeX.
    pub fn latex(&self) -> String {
        self.result.as_display().to_string()
    }
}

/// Parses `input`, runs its command and simplifies the result.
///
/// Errors keep their spans, pointing into `input`, so that callers can build a report with
/// [`Error::build_report`]. Errors that arise after parsing, such as a division by zero found
/// during simplification, point at the whole formula.
pub fn try_verify(input: &str) -> Result<Verified, Error> {
    debug!(input, "verifying math");
    let request = Request::parse(input)?;
    let span = request.span.clone();

    let result = match (request.command, request.variable.as_deref()) {
        (Command::Derive, Some(var)) => request.formula.derive(var)
            .and_then(|derived| derived.simplify()),
        (Command::Integrate, Some(var)) => request.formula.integrate(var)
            .and_then(|integrated| integrated.simplify()),
        _ => request.formula.simplify(),
    }.map_err(|err| err.or_span(span))?;

    Ok(Verified {
        command: request.command,
        variable: request.variable,
        result,
    })
}

/// Describes the outcome of [`try_verify`] on `input` in one line. An error becomes a fallback
/// line carrying the error's message.
pub fn describe(input: &str, outcome: &Result<Verified, Error>) -> String {
    match outcome {
        Ok(verified) => format!("Simplified: ${}$", verified.latex()),
        Err(err) => {
            info!(input, error = %err.message(), "math verification failed");
            format!("Could not verify with SymPy: {}", err.message())
        },
    }
}

/// Verifies `input` and describes the outcome in one line. This never fails: any error becomes a
/// fallback line carrying the error's message.
pub fn verify_math(input: &str) -> String {
    describe(input, &try_verify(input))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn simplify_arithmetic() {
        assert_eq!(verify_math("2+2"), "Simplified: $4$");
        assert_eq!(verify_math("1/2 + 1/3"), "Simplified: $\\frac{5}{6}$");
    }

    #[test]
    fn simplify_command() {
        assert_eq!(verify_math("simplify (x^2 - 1)/(x - 1)"), "Simplified: $x + 1$");
        assert_eq!(verify_math("Simplify x + x"), "Simplified: $2 x$");
    }

    #[test]
    fn derive_command() {
        assert_eq!(verify_math("derive x^2 + 3x"), "Simplified: $2 x + 3$");
        assert_eq!(verify_math("derive sin(x)"), "Simplified: $\\cos{\\left(x \\right)}$");
    }

    #[test]
    fn integrate_command() {
        assert_eq!(verify_math("integrate 2x"), "Simplified: $x^{2}$");
        assert_eq!(verify_math("integrate cos(t), t"), "Simplified: $\\sin{\\left(t \\right)}$");
    }

    #[test]
    fn equations() {
        assert_eq!(verify_math("2 + 2 = 4"), "Simplified: $\\text{True}$");
        assert_eq!(verify_math("x + x = 4"), "Simplified: $2 x = 4$");
    }

    #[test]
    fn parse_failure_falls_back() {
        let output = verify_math("2+*");
        assert!(output.starts_with("Could not verify with SymPy:"), "{}", output);
    }

    #[test]
    fn algebra_failure_falls_back() {
        assert_eq!(verify_math("1/0"), "Could not verify with SymPy: division by zero");
        assert_eq!(
            verify_math("integrate x sin(x)"),
            "Could not verify with SymPy: cannot integrate `x * sin(x)`",
        );
    }

    #[test]
    fn sentences_are_not_multiplied() {
        assert_eq!(
            verify_math("How do I compute 3 - 1"),
            "Could not verify with SymPy: expected end of input",
        );
        assert_eq!(verify_math("x y + x y"), "Simplified: $2 x y$");
    }

    #[test]
    fn deep_nesting_falls_back() {
        let nested = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
        assert_eq!(verify_math(&nested), "Could not verify with SymPy: expression is nested too deeply");

        let negated = format!("{}1", "-".repeat(10_000));
        assert_eq!(verify_math(&negated), "Could not verify with SymPy: expression is nested too deeply");

        let powers = format!("{}2", "2^".repeat(10_000));
        assert_eq!(verify_math(&powers), "Could not verify with SymPy: expression is nested too deeply");
    }

    #[test]
    fn long_sum() {
        let sum = vec!["1"; 5_000].join(" + ");
        assert_eq!(verify_math(&sum), "Simplified: $5000$");
    }

    #[test]
    fn errors_keep_spans() {
        let err = try_verify("simplify 1/(x - x)").unwrap_err();
        assert_eq!(err.message(), "division by zero");
        assert_eq!(err.spans, vec![9..18]);

        let report = err.render_report("question", "simplify 1/(x - x)");
        let plain = String::from_utf8(strip_ansi_escapes::strip(report)).unwrap();
        assert!(plain.contains("division by zero"));
    }

    #[test]
    fn verified_result() {
        let verified = try_verify("derive t^3").unwrap();
        assert_eq!(verified.command, Command::Derive);
        assert_eq!(verified.variable.as_deref(), Some("t"));
        assert_eq!(verified.result.to_string(), "3 * t^2");
    }
}
