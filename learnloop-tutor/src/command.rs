//! The leading command word of a question, and its arguments.
//!
//! A question such as `derive x^2 sin(x)` or `integrate a x^2, x` starts with a command word,
//! followed by an expression and, for the calculus commands, an optional variable after a comma.
//! Questions without a command word are simplified.

use crate::error::{AmbiguousVariable, ExpectedVariable, TooManyArguments, UnexpectedVariable};
use learnloop_algebra::Formula;
use learnloop_error::Error;
use learnloop_parser::{
    parser::{ast::{Expr as AstExpr, Literal}, Parser},
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

/// What to do with the expression in a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Command {
    /// Simplify the expression, or decide the equation.
    #[default]
    Simplify,

    /// Differentiate, then simplify.
    Derive,

    /// Integrate, then simplify.
    Integrate,
}

impl Command {
    /// Every command.
    pub const ALL: [Command; 3] = [Command::Simplify, Command::Derive, Command::Integrate];

    /// The word that starts a question with this command.
    pub fn word(&self) -> &'static str {
        match self {
            Command::Simplify => "simplify",
            Command::Derive => "derive",
            Command::Integrate => "integrate",
        }
    }

    /// Splits a leading command word off `input`. The word is matched case-insensitively and only
    /// if it stands alone, so `simplifyx` is not the `simplify` command.
    ///
    /// Returns the command, if any, and the byte offset at which the rest of the input starts.
    pub fn split(input: &str) -> (Option<Command>, usize) {
        for command in Command::ALL {
            let word = command.word();
            let Some(head) = input.get(..word.len()) else {
                continue;
            };
            if !head.eq_ignore_ascii_case(word) {
                continue;
            }

            let rest = &input[word.len()..];
            if rest.chars().next().map_or(true, |c| !c.is_alphanumeric() && c != '_') {
                return (Some(command), word.len());
            }
        }
        (None, 0)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.word())
    }
}

/// A question whose command, formula and variable have been worked out.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// The command to run.
    pub command: Command,

    /// The formula to run it on.
    pub formula: Formula,

    /// The variable of differentiation or integration. [`None`] for [`Command::Simplify`].
    pub variable: Option<String>,

    /// The span of the formula in the question, used to point errors without a location of their
    /// own somewhere useful.
    pub span: Range<usize>,
}

/// Picks the variable to differentiate or integrate with respect to, when none was named.
///
/// This is the only free symbol of the formula, or `x` if the formula has no free symbols or has
/// `x` among several.
pub fn choose_variable(formula: &Formula, span: Range<usize>) -> Result<String, Error> {
    let symbols = formula.free_symbols();
    if symbols.len() == 1 {
        if let Some(symbol) = symbols.iter().next() {
            return Ok(symbol.clone());
        }
    } else if symbols.is_empty() || symbols.contains("x") {
        return Ok("x".to_string());
    }

    Err(Error::new(vec![span], AmbiguousVariable {
        symbols: symbols.iter()
            .map(|symbol| format!("`{}`", symbol))
            .collect::<Vec<_>>()
            .join(", "),
    }))
}

impl Request {
    /// Parses a question into a request. Spans in the returned error refer to `input`.
    pub fn parse(input: &str) -> Result<Self, Error> {
        let (command, offset) = Command::split(input);
        let command = command.unwrap_or_default();
        let source = &input[offset..];

        let args = Parser::new(source)
            .try_parse_full_delimited::<AstExpr>(TokenKind::Comma)
            .map_err(|err| Error::from(err).offset_spans(offset))?;

        let shift = |span: Range<usize>| span.start + offset..span.end + offset;
        let (expr, variable) = match args.as_slice() {
            [expr] => (expr, None),
            [expr, variable] => (expr, Some(variable)),
            [_, _, extra, ..] => {
                return Err(Error::new(vec![shift(extra.span())], TooManyArguments {
                    command: command.word(),
                }));
            },
            // at least one value is always parsed
            [] => unreachable!(),
        };

        let span = shift(expr.span());
        let formula = Formula::try_from_ast(expr)
            .map_err(|err| err.offset_spans(offset))?;

        let variable = match (command, variable) {
            (Command::Simplify, None) => None,
            (Command::Simplify, Some(variable)) => {
                return Err(Error::new(vec![shift(variable.span())], UnexpectedVariable));
            },
            (_, Some(variable)) => match variable.innermost() {
                AstExpr::Literal(Literal::Symbol(sym)) => Some(sym.name.clone()),
                other => return Err(Error::new(vec![shift(other.span())], ExpectedVariable)),
            },
            (_, None) => Some(choose_variable(&formula, span.clone())?),
        };

        Ok(Self { command, formula, variable, span })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn split_command_word() {
        assert_eq!(Command::split("simplify x + x"), (Some(Command::Simplify), 8));
        assert_eq!(Command::split("Derive x^2"), (Some(Command::Derive), 6));
        assert_eq!(Command::split("integrate(x)"), (Some(Command::Integrate), 9));
        assert_eq!(Command::split("integrate"), (Some(Command::Integrate), 9));
    }

    #[test]
    fn word_must_stand_alone() {
        assert_eq!(Command::split("derived + 1"), (None, 0));
        assert_eq!(Command::split("simplify_me"), (None, 0));
        assert_eq!(Command::split("2 + 2"), (None, 0));
    }

    #[test]
    fn plain_expression_is_simplified() {
        let request = Request::parse("2 + 2").unwrap();
        assert_eq!(request.command, Command::Simplify);
        assert_eq!(request.variable, None);
        assert_eq!(request.span, 0..5);
    }

    #[test]
    fn explicit_variable() {
        let request = Request::parse("derive x y^2, y").unwrap();
        assert_eq!(request.command, Command::Derive);
        assert_eq!(request.variable.as_deref(), Some("y"));
    }

    #[test]
    fn implied_variable() {
        assert_eq!(Request::parse("derive t^2").unwrap().variable.as_deref(), Some("t"));
        assert_eq!(Request::parse("integrate a x").unwrap().variable.as_deref(), Some("x"));
        assert_eq!(Request::parse("integrate 5").unwrap().variable.as_deref(), Some("x"));
    }

    #[test]
    fn ambiguous_variable() {
        let err = Request::parse("derive a b").unwrap_err();
        assert_eq!(err.message(), "cannot tell which variable to use among `a`, `b`");
        assert_eq!(err.spans, vec![7..10]);
    }

    #[test]
    fn variable_must_be_a_symbol() {
        let err = Request::parse("derive x^2, 2").unwrap_err();
        assert_eq!(err.message(), "expected a variable after the comma");
        assert_eq!(err.spans, vec![12..13]);
    }

    #[test]
    fn simplify_takes_no_variable() {
        let err = Request::parse("simplify x, x").unwrap_err();
        assert_eq!(err.message(), "`simplify` does not take a variable");
    }

    #[test]
    fn parse_errors_point_into_the_question() {
        let err = Request::parse("simplify 2 +").unwrap_err();
        assert!(err.spans.iter().all(|span| span.start >= 9));
    }
}
