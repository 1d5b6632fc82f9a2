//! Tools to help manipulate fractions and numerical coefficients.

use crate::primitive::rat;
use crate::symbolic::expr::{SymExpr, Primary};
use rug::Rational;

/// Create a [`SymExpr`] representing a fraction with the given numerator and denominator.
///
/// The representation is a [`SymExpr::Mul`] containing two factors. The first factor is the
/// numerator, and the second factor is the denominator raised to the power of -1.
pub(crate) fn make_fraction(numerator: SymExpr, denominator: SymExpr) -> SymExpr {
    numerator * SymExpr::pow(denominator, SymExpr::number(-1))
}

/// Returns true if the expression is the reciprocal of a sum, such as `(x - 1)^-1`.
pub(crate) fn is_sum_recip(expr: &SymExpr) -> bool {
    match expr {
        SymExpr::Exp(base, exp) => {
            matches!(**base, SymExpr::Add(_))
                && exp.as_number().is_some_and(|n| *n < 0)
        },
        _ => false,
    }
}

/// Splits a term into its numerical coefficient and the product of its remaining factors.
///
/// - `3` -> `(3, 1)`
/// - `2*x*y` -> `(2, x*y)`
/// - `x` -> `(1, x)`
pub(crate) fn split_coefficient(term: &SymExpr) -> (Rational, SymExpr) {
    match term {
        SymExpr::Primary(Primary::Number(num)) => (num.clone(), SymExpr::number(1)),
        SymExpr::Mul(factors) => {
            let mut coefficient = rat(1);
            let mut rest = Vec::with_capacity(factors.len());
            for factor in factors {
                match factor.as_number() {
                    Some(num) => coefficient *= num,
                    None => rest.push(factor.clone()),
                }
            }
            (coefficient, SymExpr::Mul(rest).downgrade())
        },
        _ => (rat(1), term.clone()),
    }
}

/// Joins a coefficient and the remaining factors of a term back together. This is the inverse of
/// [`split_coefficient`].
pub(crate) fn join_coefficient(coefficient: Rational, rest: SymExpr) -> SymExpr {
    if rest.is_one() {
        SymExpr::Primary(Primary::Number(coefficient))
    } else if coefficient == 1 {
        rest
    } else {
        SymExpr::Primary(Primary::Number(coefficient)) * rest
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn split_product() {
        let term = SymExpr::Mul(vec![
            SymExpr::number(2),
            SymExpr::symbol("x"),
            SymExpr::number(3),
            SymExpr::symbol("y"),
        ]);
        let (coefficient, rest) = split_coefficient(&term);
        assert_eq!(coefficient, rat(6));
        assert_eq!(rest, SymExpr::Mul(vec![SymExpr::symbol("x"), SymExpr::symbol("y")]));
    }

    #[test]
    fn split_then_join() {
        let term = SymExpr::Mul(vec![SymExpr::number(-1), SymExpr::symbol("x")]);
        let (coefficient, rest) = split_coefficient(&term);
        assert_eq!(rest, SymExpr::symbol("x"));
        assert_eq!(join_coefficient(coefficient, rest), term);
        assert_eq!(join_coefficient(rat(5), SymExpr::number(1)), SymExpr::number(5));
    }

    #[test]
    fn fraction_is_product_with_reciprocal() {
        let fraction = make_fraction(SymExpr::symbol("x"), SymExpr::number(2));
        assert_eq!(fraction, SymExpr::Mul(vec![
            SymExpr::symbol("x"),
            SymExpr::pow(SymExpr::number(2), SymExpr::number(-1)),
        ]));
    }

    #[test]
    fn reciprocal_of_sum() {
        let sum = SymExpr::symbol("x") + SymExpr::number(-1);
        assert!(is_sum_recip(&SymExpr::pow(sum.clone(), SymExpr::number(-1))));
        assert!(!is_sum_recip(&SymExpr::pow(sum, SymExpr::number(2))));
    }
}
