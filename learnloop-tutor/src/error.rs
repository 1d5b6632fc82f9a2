//! Errors in the command part of a question, such as `derive x*y, 2`.

use ariadne::Fmt;
use learnloop_attrs::ErrorKind;
use learnloop_error::EXPR;

/// The variable to differentiate or integrate with respect to could not be chosen.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot tell which variable to use among {}", symbols),
    labels = ["this expression"],
    help = format!("name the variable after a comma, as in {}", "`derive x*y, y`".fg(EXPR)),
)]
pub struct AmbiguousVariable {
    /// The candidate variables, comma separated.
    pub symbols: String,
}

/// The second argument of `derive` or `integrate` was not a variable.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected a variable after the comma",
    labels = ["this is not a variable"],
)]
pub struct ExpectedVariable;

/// A command was given more than an expression and a variable.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` takes an expression and at most one variable", command),
    labels = ["unexpected argument"],
)]
pub struct TooManyArguments {
    /// The command word, such as `derive`.
    pub command: &'static str,
}

/// A command that only accepts an expression was given a variable.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "`simplify` does not take a variable",
    labels = ["remove this"],
)]
pub struct UnexpectedVariable;
