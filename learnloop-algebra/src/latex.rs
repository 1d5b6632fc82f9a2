//! Typesetting of expressions as LaTeX.
//!
//! The output follows the conventions of common computer algebra systems, so that it renders the
//! way students are used to seeing it: `\frac{x}{2}`, `\sqrt{x}`, `\sin{\left(x \right)}`,
//! `e^{x}`, and so on.

use crate::primitive::is_integer;
use crate::symbolic::expr::{SymExpr, Primary, E};
use crate::symbolic::simplify::fraction::{join_coefficient, split_coefficient};
use rug::Rational;
use std::fmt::{self, Display, Formatter};

/// A trait for types that can be formatted as LaTeX.
pub trait Latex {
    /// Format the value as LaTeX.
    fn fmt_latex(&self, f: &mut Formatter) -> fmt::Result;

    /// Wraps the value in a [`LatexFormatter`], which implements [`Display`].
    fn as_display(&self) -> LatexFormatter<'_, Self> {
        LatexFormatter(self)
    }
}

/// A wrapper type that implements [`Display`] for any type that implements [`Latex`].
pub struct LatexFormatter<'a, T: ?Sized>(&'a T);

impl<T: ?Sized> Display for LatexFormatter<'_, T>
where
    T: Latex,
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        self.0.fmt_latex(f)
    }
}

/// Symbol names that are typeset as Greek letters.
const GREEK: &[&str] = &[
    "alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta", "iota", "kappa",
    "lambda", "mu", "nu", "xi", "pi", "rho", "sigma", "tau", "upsilon", "phi", "chi", "psi",
    "omega", "Gamma", "Delta", "Theta", "Lambda", "Xi", "Pi", "Sigma", "Upsilon", "Phi", "Psi",
    "Omega",
];

/// Functions with their own LaTeX command.
const COMMANDS: &[&str] = &[
    "sin", "cos", "tan", "cot", "sec", "csc", "sinh", "cosh", "tanh", "log",
];

/// Functions written with `\operatorname`.
const OPERATORS: &[&str] = &["asin", "acos", "atan"];

/// Writes a symbol, turning Greek letter names into commands and `a_1` into a subscript.
fn fmt_symbol(f: &mut Formatter, name: &str) -> fmt::Result {
    if name == E {
        return write!(f, "e");
    }

    let (base, subscript) = match name.split_once('_') {
        Some((base, subscript)) if !base.is_empty() && !subscript.is_empty() => {
            (base, Some(subscript))
        },
        _ => (name, None),
    };

    if GREEK.contains(&base) {
        write!(f, "\\{}", base)?;
    } else {
        write!(f, "{}", base)?;
    }

    match subscript {
        Some(subscript) => write!(f, "_{{{}}}", subscript),
        None => Ok(()),
    }
}

/// Writes a rational number, as a fraction if it is not an integer.
fn fmt_number(f: &mut Formatter, num: &Rational) -> fmt::Result {
    if is_integer(num) {
        return write!(f, "{}", num);
    }

    if *num < 0 {
        write!(f, "- ")?;
    }
    write!(f, "\\frac{{{}}}{{{}}}", num.numer().clone().abs(), num.denom())
}

/// Writes the arguments of a function call, wrapped in `{\left( ... \right)}`.
fn fmt_args(f: &mut Formatter, args: &[SymExpr]) -> fmt::Result {
    write!(f, "{{\\left(")?;
    let mut iter = args.iter();
    if let Some(arg) = iter.next() {
        arg.fmt_latex(f)?;
        for arg in iter {
            write!(f, ", ")?;
            arg.fmt_latex(f)?;
        }
    }
    write!(f, " \\right)}}")
}

/// Writes the name of a function, without its arguments.
fn fmt_function_name(f: &mut Formatter, name: &str) -> fmt::Result {
    if COMMANDS.contains(&name) {
        write!(f, "\\{}", name)
    } else if OPERATORS.contains(&name) || name.chars().count() > 1 {
        write!(f, "\\operatorname{{{}}}", name)
    } else {
        write!(f, "{}", name)
    }
}

/// Writes a function call.
fn fmt_call(f: &mut Formatter, name: &str, args: &[SymExpr]) -> fmt::Result {
    match (name, args) {
        ("exp", [arg]) => {
            write!(f, "e^{{")?;
            arg.fmt_latex(f)?;
            write!(f, "}}")
        },
        ("abs", [arg]) => {
            write!(f, "\\left|{{")?;
            arg.fmt_latex(f)?;
            write!(f, "}}\\right|")
        },
        ("factorial", [arg]) => {
            let bare = arg.as_symbol().is_some()
                || arg.as_number().is_some_and(|n| is_integer(n) && *n >= 0);
            if bare {
                arg.fmt_latex(f)?;
            } else {
                wrap_paren(f, arg)?;
            }
            write!(f, "!")
        },
        _ => {
            fmt_function_name(f, name)?;
            fmt_args(f, args)
        },
    }
}

/// Writes `expr` in `\left( ... \right)`.
fn wrap_paren(f: &mut Formatter, expr: &SymExpr) -> fmt::Result {
    write!(f, "\\left(")?;
    expr.fmt_latex(f)?;
    write!(f, "\\right)")
}

/// Returns true if `expr` must be parenthesized when it is the base of a power.
fn base_needs_paren(expr: &SymExpr) -> bool {
    match expr {
        SymExpr::Primary(Primary::Number(num)) => *num < 0 || !is_integer(num),
        SymExpr::Primary(_) => false,
        SymExpr::Add(_) | SymExpr::Mul(_) | SymExpr::Exp(_, _) => true,
    }
}

/// Writes `base^exp`.
fn fmt_pow(f: &mut Formatter, base: &SymExpr, exp: &SymExpr) -> fmt::Result {
    if let Some(num) = exp.as_number() {
        if *num < 0 {
            // x^-2 = 1 / x^2
            let positive = SymExpr::pow(base.clone(), SymExpr::number(-num.clone()));
            write!(f, "\\frac{{1}}{{")?;
            if *num == -1 {
                base.fmt_latex(f)?;
            } else {
                positive.fmt_latex(f)?;
            }
            return write!(f, "}}");
        }

        if *num.numer() == 1 && *num.denom() > 1 {
            if *num.denom() == 2 {
                write!(f, "\\sqrt{{")?;
            } else {
                write!(f, "\\sqrt[{}]{{", num.denom())?;
            }
            base.fmt_latex(f)?;
            return write!(f, "}}");
        }

        // sin(x)^2 is written \sin^{2}{\left(x \right)}
        if let SymExpr::Primary(Primary::Call(name, args)) = base {
            if COMMANDS.contains(&name.as_str()) && is_integer(num) {
                fmt_function_name(f, name)?;
                write!(f, "^{{{}}}", num)?;
                return fmt_args(f, args);
            }
        }
    }

    if base.as_symbol() == Some(E) {
        write!(f, "e")?;
    } else if base_needs_paren(base) {
        wrap_paren(f, base)?;
    } else {
        base.fmt_latex(f)?;
    }

    write!(f, "^{{")?;
    exp.fmt_latex(f)?;
    write!(f, "}}")
}

/// Writes the factors of a product side by side. Sums are parenthesized unless they stand alone
/// without a sign, and two adjacent factors that would read as one number are separated with `\cdot`.
fn fmt_factors(f: &mut Formatter, factors: &[SymExpr], negated: bool) -> fmt::Result {
    for (idx, factor) in factors.iter().enumerate() {
        let rendered = if (negated || factors.len() > 1) && matches!(factor, SymExpr::Add(_)) {
            format!("\\left({}\\right)", factor.as_display())
        } else {
            factor.as_display().to_string()
        };

        if idx > 0 {
            if rendered.starts_with(|c: char| c.is_ascii_digit()) {
                write!(f, " \\cdot ")?;
            } else {
                write!(f, " ")?;
            }
        }
        write!(f, "{}", rendered)?;
    }
    Ok(())
}

/// Writes a product, moving factors with a negative exponent into the denominator of a fraction.
fn fmt_mul(f: &mut Formatter, factors: &[SymExpr]) -> fmt::Result {
    let mut coefficient = Rational::from(1);
    let mut numerator = Vec::new();
    let mut denominator = Vec::new();

    for factor in factors {
        match factor {
            SymExpr::Primary(Primary::Number(num)) => coefficient *= num,
            SymExpr::Exp(base, exp) if exp.as_number().is_some_and(|n| *n < 0) => {
                let positive = exp.as_number().map(|n| -n.clone()).unwrap_or_default();
                if positive == 1 {
                    denominator.push((**base).clone());
                } else {
                    denominator.push(SymExpr::pow((**base).clone(), SymExpr::number(positive)));
                }
            },
            factor => numerator.push(factor.clone()),
        }
    }

    let negated = coefficient < 0;
    if negated {
        write!(f, "- ")?;
        coefficient = -coefficient;
    }
    if *coefficient.numer() != 1 {
        numerator.insert(0, SymExpr::number(coefficient.numer().clone()));
    }
    if *coefficient.denom() != 1 {
        denominator.insert(0, SymExpr::number(coefficient.denom().clone()));
    }

    if denominator.is_empty() {
        if numerator.is_empty() {
            return write!(f, "1");
        }
        return fmt_factors(f, &numerator, negated);
    }

    write!(f, "\\frac{{")?;
    if numerator.is_empty() {
        write!(f, "1")?;
    } else {
        fmt_factors(f, &numerator, false)?;
    }
    write!(f, "}}{{")?;
    fmt_factors(f, &denominator, false)?;
    write!(f, "}}")
}

impl Latex for SymExpr {
    fn fmt_latex(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Primary(Primary::Number(num)) => fmt_number(f, num),
            Self::Primary(Primary::Symbol(sym)) => fmt_symbol(f, sym),
            Self::Primary(Primary::Call(name, args)) => fmt_call(f, name, args),
            Self::Add(terms) => {
                let mut iter = terms.iter();
                if let Some(term) = iter.next() {
                    term.fmt_latex(f)?;
                    for term in iter {
                        let (coefficient, rest) = split_coefficient(term);
                        if coefficient < 0 {
                            write!(f, " - ")?;
                            join_coefficient(-coefficient, rest).fmt_latex(f)?;
                        } else {
                            write!(f, " + ")?;
                            term.fmt_latex(f)?;
                        }
                    }
                }
                Ok(())
            },
            Self::Mul(factors) => fmt_mul(f, factors),
            Self::Exp(base, exp) => fmt_pow(f, base, exp),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::symbolic::simplify;
    use learnloop_parser::parser::{ast::Expr as AstExpr, Parser};
    use pretty_assertions::assert_eq;
    use super::*;

    /// Simplifies the expression and typesets the result.
    fn latex(input: &str) -> String {
        let expr = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        let expr = simplify(&SymExpr::try_from_ast(&expr).unwrap()).unwrap();
        expr.as_display().to_string()
    }

    #[test]
    fn fractions() {
        assert_eq!(latex("x/2"), "\\frac{x}{2}");
        assert_eq!(latex("1/2 + 1/3"), "\\frac{5}{6}");
        assert_eq!(latex("-1/2"), "- \\frac{1}{2}");
        assert_eq!(latex("1/x"), "\\frac{1}{x}");
        assert_eq!(latex("3/(x + 1)"), "\\frac{3}{x + 1}");
    }

    #[test]
    fn powers_and_roots() {
        assert_eq!(latex("x^2"), "x^{2}");
        assert_eq!(latex("sqrt(x)"), "\\sqrt{x}");
        assert_eq!(latex("cbrt(x)"), "\\sqrt[3]{x}");
        assert_eq!(latex("sqrt(8)"), "2 \\sqrt{2}");
        assert_eq!(latex("E^x"), "e^{x}");
    }

    #[test]
    fn functions() {
        assert_eq!(latex("sin(x)"), "\\sin{\\left(x \\right)}");
        assert_eq!(latex("ln(x)"), "\\log{\\left(x \\right)}");
        assert_eq!(latex("abs(x)"), "\\left|{x}\\right|");
        assert_eq!(latex("exp(x)"), "e^{x}");
        assert_eq!(latex("sin(x)^2"), "\\sin^{2}{\\left(x \\right)}");
        assert_eq!(latex("-sin(x)"), "- \\sin{\\left(x \\right)}");
    }

    #[test]
    fn sums_and_products() {
        assert_eq!(latex("x - 2y"), "x - 2 y");
        assert_eq!(latex("2 * 3^x"), "2 \\cdot 3^{x}");
    }

    #[test]
    fn symbols() {
        assert_eq!(latex("alpha + pi"), "\\alpha + \\pi");
        assert_eq!(latex("x_1"), "x_{1}");
    }
}
