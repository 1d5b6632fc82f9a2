//! Canonical ordering of terms and factors.
//!
//! Strict equality ignores order, but printing does not. Terms are sorted by descending degree,
//! with numbers last (`x^2 + 2x + 1`), and factors are sorted with numbers first and function
//! calls last (`2x cos(x)`).

use crate::primitive::rat;
use crate::symbolic::{
    expr::{SymExpr, Primary, E, PI},
    simplify::fraction::split_coefficient,
};
use rug::Rational;
use std::cmp::Ordering;

/// The total degree of an expression in all of its variables. Expressions that are not
/// polynomial-like have degree zero.
fn degree(expr: &SymExpr) -> Rational {
    match expr {
        SymExpr::Primary(Primary::Symbol(sym)) if sym != PI && sym != E => rat(1),
        SymExpr::Primary(_) => rat(0),
        SymExpr::Add(terms) => terms.iter().map(degree).max().unwrap_or_else(|| rat(0)),
        SymExpr::Mul(factors) => factors.iter().map(degree).fold(rat(0), |sum, d| sum + d),
        SymExpr::Exp(base, exp) => match exp.as_number() {
            Some(exp) => degree(base) * exp,
            None => rat(0),
        },
    }
}

/// Orders terms of a sum.
fn compare_terms(a: &SymExpr, b: &SymExpr) -> Ordering {
    degree(b).cmp(&degree(a))
        .then_with(|| a.is_number().cmp(&b.is_number()))
        .then_with(|| split_coefficient(a).1.to_string().cmp(&split_coefficient(b).1.to_string()))
}

/// Numbers come first in a product, then symbols and their powers, then everything else.
fn factor_rank(expr: &SymExpr) -> u8 {
    let base = match expr {
        SymExpr::Exp(base, _) => &**base,
        expr => expr,
    };
    if expr.is_number() {
        0
    } else if base.as_symbol().is_some() {
        1
    } else {
        2
    }
}

/// The base of a power, or the expression itself, as text.
fn base_text(expr: &SymExpr) -> String {
    match expr {
        SymExpr::Exp(base, _) => base.to_string(),
        expr => expr.to_string(),
    }
}

/// Orders factors of a product.
fn compare_factors(a: &SymExpr, b: &SymExpr) -> Ordering {
    factor_rank(a).cmp(&factor_rank(b))
        .then_with(|| base_text(a).cmp(&base_text(b)))
        .then_with(|| a.to_string().cmp(&b.to_string()))
}

/// Sorts every sum and product in the expression into canonical order.
pub(crate) fn canonicalize(expr: SymExpr) -> SymExpr {
    match expr {
        SymExpr::Primary(Primary::Call(name, args)) => {
            SymExpr::call(name, args.into_iter().map(canonicalize).collect())
        },
        SymExpr::Primary(primary) => SymExpr::Primary(primary),
        SymExpr::Add(terms) => {
            let mut terms = terms.into_iter().map(canonicalize).collect::<Vec<_>>();
            terms.sort_by(compare_terms);
            SymExpr::Add(terms)
        },
        SymExpr::Mul(factors) => {
            let mut factors = factors.into_iter().map(canonicalize).collect::<Vec<_>>();
            factors.sort_by(compare_factors);
            SymExpr::Mul(factors)
        },
        SymExpr::Exp(base, exp) => SymExpr::pow(canonicalize(*base), canonicalize(*exp)),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> SymExpr {
        SymExpr::symbol("x")
    }

    #[test]
    fn descending_degree() {
        let expr = SymExpr::Add(vec![
            SymExpr::number(1),
            SymExpr::Mul(vec![x(), SymExpr::number(2)]),
            SymExpr::pow(x(), SymExpr::number(2)),
        ]);
        assert_eq!(canonicalize(expr).to_string(), "x^2 + 2 * x + 1");
    }

    #[test]
    fn symbols_before_calls() {
        let expr = SymExpr::Mul(vec![
            SymExpr::call("cos", vec![x()]),
            x(),
            SymExpr::number(2),
        ]);
        assert_eq!(canonicalize(expr).to_string(), "2 * x * cos(x)");
    }

    #[test]
    fn alphabetical_within_degree() {
        let expr = SymExpr::Add(vec![
            SymExpr::Mul(vec![SymExpr::number(-2), SymExpr::symbol("y")]),
            x(),
        ]);
        assert_eq!(canonicalize(expr).to_string(), "x - 2 * y");
    }
}
