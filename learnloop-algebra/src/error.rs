//! Errors that can occur while converting, simplifying, differentiating or integrating an
//! expression.

use ariadne::Fmt;
use learnloop_attrs::ErrorKind;
use learnloop_error::EXPR;

/// A number literal could not be read as an exact rational.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("invalid number `{}`", literal),
    labels = ["this number"],
)]
pub struct InvalidNumber {
    /// The literal as written.
    pub literal: String,
}

/// An expression was divided by zero.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "division by zero",
    labels = [format!("this {} is zero", "divisor".fg(EXPR))],
)]
pub struct DivisionByZero;

/// An `=` appeared somewhere other than the top level.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "`=` can only separate the two sides of an equation",
    labels = ["this equation is nested inside another expression"],
    help = "write a single equation, such as `x + 1 = 3`",
)]
pub struct NestedEquation;

/// A known function was called with the wrong number of arguments.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` takes {} argument(s), but {} were given", name, expected, given),
    labels = ["this call"],
)]
pub struct WrongArgumentCount {
    /// The name of the function.
    pub name: String,

    /// The accepted argument counts, as text.
    pub expected: &'static str,

    /// The number of arguments that were given.
    pub given: usize,
}

/// The factorial of a number that is not a non-negative integer.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "factorial is only defined for non-negative integers",
    labels = ["this factorial"],
)]
pub struct InvalidFactorial;

/// A derivative could not be computed symbolically.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot differentiate `{}`", expr),
    labels = ["in this expression"],
)]
pub struct NotDifferentiable {
    /// The subexpression that could not be differentiated.
    pub expr: String,
}

/// An antiderivative could not be found with the supported rules.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot integrate `{}`", expr),
    labels = ["in this expression"],
    help = "only sums of powers, reciprocals, exponentials, sines and cosines of linear expressions are supported",
)]
pub struct NotIntegrable {
    /// The subexpression that could not be integrated.
    pub expr: String,
}
