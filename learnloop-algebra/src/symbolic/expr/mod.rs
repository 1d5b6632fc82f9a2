//! A representation of mathematical expressions that is easier to manipulate than an AST.
//!
//! The [`Expr`](learnloop_parser::parser::ast::Expr) type from `learnloop_parser` is a recursive
//! `enum` that represents the AST of a math expression. It's convenient for parsing, but not so
//! much for algebraic manipulation.
//!
//! This module defines [`SymExpr`], which recursively flattens the AST into lists of terms or
//! factors, depending on the operation, and normalizes subtraction and division into addition and
//! multiplication: `a - b` is `a + (-1)*b`, and `a / b` is `a * b^-1`.
//!
//! # Strict equality
//!
//! Deciding whether two expressions are mathematically equal is about as hard as simplifying them,
//! which is what equality is needed for in the first place (to find like terms, for example). To
//! break the cycle, [`SymExpr`] implements **strict equality**. Two expressions are strictly equal
//! if:
//!
//! - They are the same type of expression (i.e. both [`SymExpr::Primary`], both [`SymExpr::Add`],
//!   etc.).
//! - If both are [`SymExpr::Primary`], both expressions must have strictly equal values.
//! - If both are [`SymExpr::Add`] or [`SymExpr::Mul`], both expressions must have strictly equal
//!   terms / factors, in any order.
//! - If both are [`SymExpr::Exp`], both expressions must have strictly equal base and exponent.
//!
//! `x^2 + 2x + 1` and `(x + 1)^2` are mathematically equal but not strictly equal. Strict equality
//! never reports false positives, and it does not depend on simplification.
//!
//! The [`PartialEq`] and [`Eq`] implementations for [`SymExpr`] implement **strict equality**.

mod iter;

use crate::{error, primitive::{is_integer, rat, rational_from_str}};
use crate::symbolic::simplify::{
    fraction::{join_coefficient, split_coefficient},
    rules::power::exact_power,
};
use iter::ExprIter;
use learnloop_error::Error;
use learnloop_parser::parser::{
    ast::{Binary, Call, Expr as AstExpr, Literal},
    token::op::{BinOpKind, UnaryOpKind},
    Precedence,
};
use rug::{Integer, Rational};
use std::{
    collections::BTreeSet,
    fmt,
    ops::{Add, AddAssign, Mul, MulAssign, Neg},
};

/// The name of the symbol representing the circle constant.
pub const PI: &str = "pi";

/// The name of the symbol representing Euler's number.
pub const E: &str = "E";

/// Functions with a known meaning, and the number of arguments each accepts.
const KNOWN_FUNCTIONS: &[(&str, &[usize], &str)] = &[
    ("sin", &[1], "1"),
    ("cos", &[1], "1"),
    ("tan", &[1], "1"),
    ("cot", &[1], "1"),
    ("sec", &[1], "1"),
    ("csc", &[1], "1"),
    ("asin", &[1], "1"),
    ("acos", &[1], "1"),
    ("atan", &[1], "1"),
    ("sinh", &[1], "1"),
    ("cosh", &[1], "1"),
    ("tanh", &[1], "1"),
    ("exp", &[1], "1"),
    ("ln", &[1], "1"),
    ("log", &[1, 2], "1 or 2"),
    ("sqrt", &[1], "1"),
    ("cbrt", &[1], "1"),
    ("abs", &[1], "1"),
    ("factorial", &[1], "1"),
];

/// Names of single-letter functions. Any other single letter followed by parentheses, such as
/// `x(x + 1)`, is a multiplication.
const FUNCTION_LETTERS: &[&str] = &["f", "g", "h"];

/// Returns true if `name` is a function with a known meaning.
pub fn is_known_function(name: &str) -> bool {
    KNOWN_FUNCTIONS.iter().any(|(known, _, _)| *known == name)
}

/// A single term / factor, such as a number, variable, or function call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Primary {
    /// An exact rational number, such as `2`, `-3` or `1/2`.
    Number(Rational),

    /// A variable, such as `x` or `y`, or a named constant such as `pi`.
    Symbol(String),

    /// A function call, such as `sin(x)` or `f(x, y)`.
    Call(String, Vec<SymExpr>),
}

impl fmt::Display for Primary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(num) => write!(f, "{}", num),
            Self::Symbol(sym) => write!(f, "{}", sym),
            Self::Call(name, args) => {
                write!(f, "{}(", name)?;
                let mut iter = args.iter();
                if let Some(arg) = iter.next() {
                    write!(f, "{}", arg)?;
                    for arg in iter {
                        write!(f, ", {}", arg)?;
                    }
                }
                write!(f, ")")
            },
        }
    }
}

/// Adds two [`Primary`]s together. If both are numbers, the numbers are added together.
/// Otherwise, the two [`Primary`]s are wrapped in a [`SymExpr::Add`].
impl Add<Primary> for Primary {
    type Output = SymExpr;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Primary::Number(lhs), Primary::Number(rhs)) => {
                SymExpr::Primary(Primary::Number(lhs + rhs))
            },
            (lhs, rhs) => SymExpr::Add(vec![
                SymExpr::Primary(lhs),
                SymExpr::Primary(rhs),
            ]),
        }
    }
}

/// Multiplies two [`Primary`]s together. If both are numbers, the numbers are multiplied
/// together. Otherwise, the two [`Primary`]s are wrapped in a [`SymExpr::Mul`].
impl Mul<Primary> for Primary {
    type Output = SymExpr;

    fn mul(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Primary::Number(lhs), Primary::Number(rhs)) => {
                SymExpr::Primary(Primary::Number(lhs * rhs))
            },
            (lhs, rhs) => SymExpr::Mul(vec![
                SymExpr::Primary(lhs),
                SymExpr::Primary(rhs),
            ]),
        }
    }
}

/// A mathematical expression with information about its terms and factors.
///
/// This type should be distinguished from the [`learnloop_parser::parser::ast::Expr`] type. The
/// main difference is that this type **flattens** out the tree structure. For example, the
/// expression `x + (y + z)` is represented as a single [`SymExpr::Add`] node with _three_
/// children, `x`, `y`, and `z`.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone, Eq)]
pub enum SymExpr {
    /// A single term or factor.
    Primary(Primary),

    /// Multiple terms added together.
    Add(Vec<SymExpr>),

    /// Multiple factors multiplied together.
    Mul(Vec<SymExpr>),

    /// An expression raised to a power.
    Exp(Box<SymExpr>, Box<SymExpr>),
}

impl fmt::Display for SymExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        /// Writes `expr`, wrapped in parentheses if it binds no tighter than `parent`.
        fn write_operand(f: &mut fmt::Formatter<'_>, expr: &SymExpr, parent: Precedence) -> fmt::Result {
            match expr.precedence() {
                Some(prec) if prec <= parent => write!(f, "({})", expr),
                _ => write!(f, "{}", expr),
            }
        }

        match self {
            Self::Primary(primary) => write!(f, "{}", primary),
            Self::Add(terms) => {
                let mut iter = terms.iter();
                if let Some(term) = iter.next() {
                    write!(f, "{}", term)?;
                    for term in iter {
                        let (coefficient, rest) = split_coefficient(term);
                        if coefficient < 0 {
                            write!(f, " - ")?;
                            write_operand(f, &join_coefficient(-coefficient, rest), Precedence::Term)?;
                        } else {
                            write!(f, " + {}", term)?;
                        }
                    }
                }
                Ok(())
            },
            Self::Mul(factors) => {
                let mut iter = factors.iter();
                if let Some(factor) = iter.next() {
                    write_operand(f, factor, Precedence::Term)?;
                    for factor in iter {
                        write!(f, " * ")?;
                        write_operand(f, factor, Precedence::Neg)?;
                    }
                }
                Ok(())
            },
            Self::Exp(base, exp) => {
                write_operand(f, base, Precedence::Exp)?;
                write!(f, "^")?;
                write_operand(f, exp, Precedence::Exp)
            },
        }
    }
}

impl SymExpr {
    /// Creates an expression holding the given number.
    pub fn number<T>(n: T) -> Self
    where
        Rational: From<T>,
    {
        Self::Primary(Primary::Number(rat(n)))
    }

    /// Creates an expression holding the given symbol.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Primary(Primary::Symbol(name.into()))
    }

    /// Creates an expression calling the given function.
    pub fn call(name: impl Into<String>, args: Vec<SymExpr>) -> Self {
        Self::Primary(Primary::Call(name.into(), args))
    }

    /// Creates the expression `base^exp`. No simplification is done.
    pub fn pow(base: SymExpr, exp: SymExpr) -> Self {
        Self::Exp(Box::new(base), Box::new(exp))
    }

    /// Returns the precedence of the expression when printed.
    fn precedence(&self) -> Option<Precedence> {
        match self {
            Self::Primary(Primary::Number(num)) if *num < 0 => Some(Precedence::Neg),
            Self::Primary(Primary::Number(num)) if !is_integer(num) => Some(Precedence::Factor),
            Self::Primary(_) => None,
            Self::Add(_) => Some(BinOpKind::Add.precedence()),
            Self::Mul(_) => Some(BinOpKind::Mul.precedence()),
            Self::Exp(_, _) => Some(BinOpKind::Exp.precedence()),
        }
    }

    /// If the expression is a [`Primary::Number`], returns a reference to the contained number.
    pub fn as_number(&self) -> Option<&Rational> {
        match self {
            Self::Primary(Primary::Number(num)) => Some(num),
            _ => None,
        }
    }

    /// If the expression is a [`Primary::Number`], returns the contained number.
    pub fn into_number(self) -> Option<Rational> {
        match self {
            Self::Primary(Primary::Number(num)) => Some(num),
            _ => None,
        }
    }

    /// Returns true if the expression is a [`Primary::Number`].
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Primary(Primary::Number(_)))
    }

    /// If the expression is a [`Primary::Number`] with no fractional part, returns the integer.
    pub fn as_integer(&self) -> Option<&Integer> {
        self.as_number()
            .filter(|num| is_integer(num))
            .map(Rational::numer)
    }

    /// Returns true if the expression is the number zero.
    pub fn is_zero(&self) -> bool {
        self.as_number().is_some_and(|num| *num == 0)
    }

    /// Returns true if the expression is the number one.
    pub fn is_one(&self) -> bool {
        self.as_number().is_some_and(|num| *num == 1)
    }

    /// If the expression is a [`Primary::Symbol`], returns a reference to the contained symbol.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Primary(Primary::Symbol(sym)) => Some(sym),
            _ => None,
        }
    }

    /// If the expression is a call to the function `name`, returns its arguments.
    pub fn as_call(&self, name: &str) -> Option<&[SymExpr]> {
        match self {
            Self::Primary(Primary::Call(target, args)) if target == name => Some(args),
            _ => None,
        }
    }

    /// Trivially downgrades the expression into a simpler form.
    ///
    /// Some operations may result in a [`SymExpr::Add`] with zero / one term, or a
    /// [`SymExpr::Mul`] with zero / one factor. This function checks for these cases and
    /// simplifies the expression into the single term / factor, or the number 0 or 1.
    pub fn downgrade(self) -> Self {
        match self {
            Self::Add(mut terms) => {
                if terms.is_empty() {
                    Self::number(0)
                } else if terms.len() == 1 {
                    terms.remove(0)
                } else {
                    Self::Add(terms)
                }
            },
            Self::Mul(mut factors) => {
                if factors.is_empty() {
                    Self::number(1)
                } else if factors.len() == 1 {
                    factors.remove(0)
                } else {
                    Self::Mul(factors)
                }
            },
            _ => self,
        }
    }

    /// Returns the square root of this expression. No simplification is done.
    pub fn sqrt(self) -> Self {
        Self::pow(self, Self::number((1, 2)))
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first), including the arguments of function calls.
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }

    /// Returns true if the symbol `name` appears anywhere in the expression.
    pub fn contains_symbol(&self, name: &str) -> bool {
        self.post_order_iter().any(|expr| expr.as_symbol() == Some(name))
    }

    /// Returns the variables in the expression, in alphabetical order. The named constants
    /// [`PI`] and [`E`] are not variables.
    pub fn free_symbols(&self) -> BTreeSet<String> {
        self.post_order_iter()
            .filter_map(SymExpr::as_symbol)
            .filter(|sym| *sym != PI && *sym != E)
            .map(str::to_owned)
            .collect()
    }

    /// Evaluates the expression exactly if it contains only numbers, as in `(1/2)` or `2 - 5`.
    ///
    /// Returns [`None`] if the expression contains a symbol or a call, or if a power cannot be
    /// evaluated exactly.
    pub fn fold_number(&self) -> Option<Rational> {
        match self {
            Self::Primary(Primary::Number(num)) => Some(num.clone()),
            Self::Primary(_) => None,
            Self::Add(terms) => terms.iter()
                .try_fold(rat(0), |sum, term| Some(sum + term.fold_number()?)),
            Self::Mul(factors) => factors.iter()
                .try_fold(rat(1), |product, factor| Some(product * factor.fold_number()?)),
            Self::Exp(base, exp) => {
                let exp = exp.fold_number().filter(is_integer)?;
                exact_power(&base.fold_number()?, exp.numer())
            },
        }
    }

    /// Converts a parsed expression into a [`SymExpr`].
    ///
    /// An `=` anywhere in the tree is an error here; equations are handled one level up by
    /// [`Formula`](crate::formula::Formula).
    pub fn try_from_ast(expr: &AstExpr) -> Result<Self, Error> {
        match expr {
            AstExpr::Literal(Literal::Number(num)) => rational_from_str(&num.value)
                .map(|num| Self::Primary(Primary::Number(num)))
                .ok_or_else(|| Error::new(vec![num.span.clone()], error::InvalidNumber {
                    literal: num.value.clone(),
                })),
            AstExpr::Literal(Literal::Symbol(sym)) => Ok(Self::symbol(sym.name.clone())),
            AstExpr::Paren(paren) => Self::try_from_ast(paren.innermost()),
            AstExpr::Call(call) => Self::try_from_call(call),
            AstExpr::Unary(unary) => {
                let operand = Self::try_from_ast(&unary.operand)?;
                match unary.op.kind {
                    // treat this as -1 * operand
                    UnaryOpKind::Neg => Ok(operand.neg()),
                    UnaryOpKind::Pos => Ok(operand),
                    UnaryOpKind::Factorial => {
                        let valid = operand.fold_number()
                            .map_or(true, |num| is_integer(&num) && num >= 0);
                        if valid {
                            Ok(Self::call("factorial", vec![operand]))
                        } else {
                            Err(Error::new(vec![unary.span.clone()], error::InvalidFactorial))
                        }
                    },
                }
            },
            AstExpr::Binary(bin) => {
                // chains such as `1 + 2 + ... + n` nest to the left, so walk down them iteratively
                let mut chain = vec![bin];
                let mut leftmost = &*bin.lhs;
                while let AstExpr::Binary(inner) = leftmost {
                    chain.push(inner);
                    leftmost = &*inner.lhs;
                }

                let mut lhs = Self::try_from_ast(leftmost)?;
                for bin in chain.into_iter().rev() {
                    lhs = Self::try_from_binary(bin, lhs, Self::try_from_ast(&bin.rhs)?)?;
                }
                Ok(lhs)
            },
        }
    }

    /// Combines the converted operands of a binary expression.
    fn try_from_binary(bin: &Binary, lhs: Self, rhs: Self) -> Result<Self, Error> {
        match bin.op.kind {
            BinOpKind::Exp => Ok(Self::pow(lhs, rhs)),
            // flattening happens in the `Mul` and `Add` implementations
            BinOpKind::Mul => Ok(lhs * rhs),
            BinOpKind::Add => Ok(lhs + rhs),
            // treat this as lhs + -1 * rhs
            BinOpKind::Sub => Ok(lhs + rhs.neg()),
            // treat this as lhs * rhs^-1
            BinOpKind::Div => {
                if rhs.is_zero() {
                    return Err(Error::new(vec![bin.rhs.span()], error::DivisionByZero));
                }
                Ok(lhs * Self::pow(rhs, Self::number(-1)))
            },
            BinOpKind::Eq => Err(Error::new(vec![bin.op.span.clone()], error::NestedEquation)),
        }
    }

    /// Converts a function call, checking the argument count of known functions.
    fn try_from_call(call: &Call) -> Result<Self, Error> {
        let name = call.name.name.as_str();
        let args = call.args.iter()
            .map(Self::try_from_ast)
            .collect::<Result<Vec<_>, _>>()?;

        if let Some((_, counts, expected)) = KNOWN_FUNCTIONS.iter().find(|(known, _, _)| *known == name) {
            if !counts.contains(&args.len()) {
                return Err(Error::new(call.outer_span().to_vec(), error::WrongArgumentCount {
                    name: name.to_string(),
                    expected: *expected,
                    given: args.len(),
                }));
            }
        } else if name.chars().count() == 1 && !FUNCTION_LETTERS.contains(&name) && args.len() == 1 {
            // `x(x + 1)` is implicit multiplication
            let mut args = args;
            return Ok(Self::symbol(name) * args.remove(0));
        }

        let mut args = args.into_iter();
        match (name, args.next(), args.next()) {
            ("sqrt", Some(arg), None) => Ok(arg.sqrt()),
            ("cbrt", Some(arg), None) => Ok(Self::pow(arg, Self::number((1, 3)))),
            ("ln" | "log", Some(arg), None) => Ok(Self::call("log", vec![arg])),
            // change of base
            ("log", Some(arg), Some(base)) => Ok(
                Self::call("log", vec![arg])
                    * Self::pow(Self::call("log", vec![base]), Self::number(-1))
            ),
            (_, first, second) => Ok(Self::call(
                name,
                first.into_iter().chain(second).chain(args).collect(),
            )),
        }
    }
}

/// Returns true if `lhs` and `rhs` contain strictly equal elements, in any order.
fn same_elements(lhs: &[SymExpr], rhs: &[SymExpr]) -> bool {
    if lhs.len() != rhs.len() {
        return false;
    }

    let mut used = vec![false; rhs.len()];
    lhs.iter().all(|l| {
        let found = rhs.iter()
            .enumerate()
            .position(|(idx, r)| !used[idx] && l == r);
        match found {
            Some(idx) => {
                used[idx] = true;
                true
            },
            None => false,
        }
    })
}

/// Checks if two expressions are **strictly** equal.
///
/// For more information about strict equality, see the [module-level documentation](self).
impl PartialEq for SymExpr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs == rhs,
            (Self::Add(lhs), Self::Add(rhs)) | (Self::Mul(lhs), Self::Mul(rhs)) => {
                same_elements(lhs, rhs)
            },
            (Self::Exp(lhs_base, lhs_exp), Self::Exp(rhs_base, rhs_exp)) => {
                lhs_base == rhs_base && lhs_exp == rhs_exp
            },
            _ => false,
        }
    }
}

/// Adds two [`SymExpr`]s together. No simplification is done, except for the case where the
/// operands are a mix of [`Primary`] and / or [`SymExpr::Add`], in which case both are combined in
/// one list of terms (flattening).
impl Add for SymExpr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs + rhs,
            (Self::Add(mut terms), Self::Add(rhs_terms)) => {
                terms.extend(rhs_terms);
                Self::Add(terms)
            },
            (Self::Add(mut terms), other) | (other, Self::Add(mut terms)) => {
                terms.push(other);
                Self::Add(terms)
            },
            (lhs, rhs) => Self::Add(vec![lhs, rhs]),
        }
    }
}

/// Adds two [`SymExpr`]s together. The behavior is the same as [`Add`].
impl AddAssign for SymExpr {
    fn add_assign(&mut self, rhs: Self) {
        let lhs = std::mem::replace(self, Self::Add(Vec::new()));
        *self = lhs + rhs;
    }
}

/// Multiplies two [`SymExpr`]s together. No simplification is done, except for the case where
/// the operands are a mix of [`Primary`] and / or [`SymExpr::Mul`], in which case both are
/// combined in one list of factors (flattening).
impl Mul for SymExpr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs * rhs,
            (Self::Mul(mut factors), Self::Mul(other)) => {
                factors.extend(other);
                Self::Mul(factors)
            },
            (Self::Mul(mut factors), other) | (other, Self::Mul(mut factors)) => {
                factors.push(other);
                Self::Mul(factors)
            },
            (lhs, rhs) => Self::Mul(vec![lhs, rhs]),
        }
    }
}

/// Multiplies two [`SymExpr`]s together. The behavior is the same as [`Mul`].
impl MulAssign for SymExpr {
    fn mul_assign(&mut self, rhs: Self) {
        let lhs = std::mem::replace(self, Self::Mul(Vec::new()));
        *self = lhs * rhs;
    }
}

/// Multiplies this expression by -1. No simplification is done, except for the case where the
/// expression is a number, in which case the number is negated.
impl Neg for SymExpr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Primary(Primary::Number(num)) => Self::Primary(Primary::Number(-num)),
            expr => Self::number(-1) * expr,
        }
    }
}

/// The output of `pretty_assertions` for failing tests can be confusing here, because strict
/// equality ignores the order of terms and factors while the diff does not.
#[cfg(test)]
mod tests {
    use learnloop_parser::parser::{ast::Expr as AstExpr, Parser};
    use pretty_assertions::assert_eq;
    use super::*;

    /// Parse the given expression and return the [`SymExpr`] representation.
    fn parse_expr(input: &str) -> SymExpr {
        let expr = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        SymExpr::try_from_ast(&expr).unwrap()
    }

    fn convert_err(input: &str) -> Error {
        let expr = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        SymExpr::try_from_ast(&expr).unwrap_err()
    }

    fn sym(name: &str) -> SymExpr {
        SymExpr::symbol(name)
    }

    #[test]
    fn strict_equality() {
        let a = parse_expr("2(x + (y - 5))");
        let b = parse_expr("(y - 5 + x) * 2");
        assert_eq!(a, b);
    }

    #[test]
    fn strict_equality_2() {
        // these are NOT strictly equal (but are semantically equal)
        let a = parse_expr("2(x + (y - 5))");
        let b = parse_expr("2x + 2y - 10");
        assert_ne!(a, b);
    }

    #[test]
    fn strict_equality_counts_repeats() {
        let a = SymExpr::Mul(vec![sym("a"), sym("a"), sym("b")]);
        let b = SymExpr::Mul(vec![sym("a"), sym("b"), sym("b")]);
        assert_ne!(a, b);
    }

    #[test]
    fn simple_expr() {
        let expr = parse_expr("x^2 + 5x + 6");
        assert_eq!(expr, SymExpr::Add(vec![
            SymExpr::pow(sym("x"), SymExpr::number(2)),
            SymExpr::Mul(vec![SymExpr::number(5), sym("x")]),
            SymExpr::number(6),
        ]));
    }

    #[test]
    fn decimals_are_exact() {
        assert_eq!(parse_expr("0.5"), SymExpr::number((1, 2)));
    }

    #[test]
    fn factors_only() {
        let expr = parse_expr("-2x^2y^-3/5");
        assert_eq!(expr, SymExpr::Mul(vec![
            SymExpr::number(-2),
            SymExpr::pow(sym("x"), SymExpr::number(2)),
            SymExpr::pow(sym("y"), SymExpr::number(-3)),
            SymExpr::pow(SymExpr::number(5), SymExpr::number(-1)),
        ]));
    }

    #[test]
    fn subtraction_is_negated_addition() {
        let expr = parse_expr("x - y");
        assert_eq!(expr, SymExpr::Add(vec![
            sym("x"),
            SymExpr::Mul(vec![SymExpr::number(-1), sym("y")]),
        ]));
    }

    #[test]
    fn known_functions() {
        assert_eq!(parse_expr("sqrt(x)"), SymExpr::pow(sym("x"), SymExpr::number((1, 2))));
        assert_eq!(parse_expr("ln(x)"), SymExpr::call("log", vec![sym("x")]));
        assert_eq!(parse_expr("3!"), SymExpr::call("factorial", vec![SymExpr::number(3)]));
    }

    #[test]
    fn single_letter_call_is_multiplication() {
        assert_eq!(parse_expr("x(x + 1)"), SymExpr::Mul(vec![
            sym("x"),
            SymExpr::Add(vec![sym("x"), SymExpr::number(1)]),
        ]));
        assert_eq!(parse_expr("f(x)"), SymExpr::call("f", vec![sym("x")]));
    }

    #[test]
    fn free_symbols_skip_constants() {
        let expr = parse_expr("y sin(pi x) + E^z");
        assert_eq!(
            expr.free_symbols().into_iter().collect::<Vec<_>>(),
            vec!["x".to_string(), "y".to_string(), "z".to_string()],
        );
    }

    #[test]
    fn literal_division_by_zero() {
        let err = convert_err("1/0");
        assert_eq!(err.message(), "division by zero");
        assert_eq!(err.spans, vec![2..3]);
    }

    #[test]
    fn nested_equation() {
        let err = convert_err("(x = 1) + 2");
        assert_eq!(err.message(), "`=` can only separate the two sides of an equation");
    }

    #[test]
    fn wrong_argument_count() {
        let err = convert_err("sin(x, y)");
        assert_eq!(err.message(), "`sin` takes 1 argument(s), but 2 were given");
        assert_eq!(err.spans, vec![0..4, 8..9]);
    }

    #[test]
    fn invalid_factorial() {
        assert_eq!(convert_err("(1/2)!").message(), "factorial is only defined for non-negative integers");
        assert_eq!(convert_err("(-3)!").message(), "factorial is only defined for non-negative integers");
        assert_eq!(convert_err("(2 - 5)!").message(), "factorial is only defined for non-negative integers");
        assert!(parse_expr("(4/2)!").as_call("factorial").is_some());
    }

    #[test]
    fn fmt_expr() {
        assert_eq!(parse_expr("2x^2 + 3").to_string(), "2 * x^2 + 3");
        assert_eq!(parse_expr("x - 2y").to_string(), "x - 2 * y");
        assert_eq!(parse_expr("(x + 1)^2").to_string(), "(x + 1)^2");
        assert_eq!(parse_expr("x^0.5").to_string(), "x^(1/2)");
        assert_eq!(parse_expr("x * -2").to_string(), "x * (-2)");
    }
}
