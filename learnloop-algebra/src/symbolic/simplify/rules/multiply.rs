//! Simplification rules for expressions involving multiplication, including combining like
//! factors.

use crate::primitive::{is_integer, rat};
use crate::symbolic::{
    expr::{SymExpr, Primary},
    simplify::{rules::do_multiply, step::Step},
    step_collector::StepCollector,
};

/// Returns true if the expression is zero raised to a negative power, such as `0^-1`.
fn is_zero_recip(expr: &SymExpr) -> bool {
    match expr {
        SymExpr::Exp(base, exp) => base.is_zero() && exp.as_number().is_some_and(|n| *n < 0),
        _ => false,
    }
}

/// Returns true if the expression is a number with no fractional part.
fn is_integer_number(expr: &SymExpr) -> bool {
    expr.as_number().is_some_and(is_integer)
}

/// `0*a = 0`
/// `a*0 = 0`
///
/// A product that also divides by zero is left alone, so the division can be reported.
pub fn multiply_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        if factors.iter().any(SymExpr::is_zero) && !factors.iter().any(is_zero_recip) {
            Some(SymExpr::number(0))
        } else {
            None
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::MultiplyZero);
    Some(opt)
}

/// `1*a = a`
/// `a*1 = a`
pub fn multiply_one(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let new_factors = factors.iter()
            .filter(|factor| !factor.is_one())
            .cloned()
            .collect::<Vec<_>>();

        if new_factors.len() == factors.len() {
            None
        } else {
            Some(SymExpr::Mul(new_factors).downgrade())
        }
    })?;

    step_collector.push(Step::MultiplyOne);
    Some(opt)
}

/// Multiplies all numerical factors together.
///
/// `2*x*3 = 6x`
/// `4*(1/8) = 1/2`
pub fn combine_numbers(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        if factors.iter().filter(|factor| factor.is_number()).count() < 2 {
            return None;
        }

        let mut product = rat(1);
        let mut new_factors = Vec::with_capacity(factors.len());
        for factor in factors {
            match factor.as_number() {
                Some(num) => product *= num,
                None => new_factors.push(factor.clone()),
            }
        }

        new_factors.insert(0, SymExpr::Primary(Primary::Number(product)));
        Some(SymExpr::Mul(new_factors).downgrade())
    })?;

    step_collector.push(Step::CombineNumbers);
    Some(opt)
}

/// Combines like factors.
///
/// `a^b*a^c = a^(b+c)`
/// `a^c*b^c = (a*b)^c`, where `a` and `b` are positive numbers and `c` is not an integer
///
/// A number is only merged with another power of itself if neither exponent is an integer, so
/// `2*2^(1/2)` stays as it is, instead of becoming `2^(3/2)` and being split apart again.
pub fn combine_like_factors(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let mut new_factors = factors.to_vec();
        let mut current_factor_idx = 0;

        /// Utility function to extract the base and exponent of an expression. If the expression
        /// is not [`SymExpr::Exp`], the exponent is `1`.
        ///
        /// - `a^b` -> `(a, b)`
        /// - `a` -> `(a, 1)`
        fn get_exp(expr: &SymExpr) -> (SymExpr, SymExpr) {
            match expr {
                SymExpr::Exp(lhs, rhs) => (*lhs.clone(), *rhs.clone()),
                expr => (expr.clone(), SymExpr::number(1)),
            }
        }

        /// Returns true if the number `base` can be raised to both exponents at once.
        fn numeric_base_mergeable(lhs_exp: &SymExpr, rhs_exp: &SymExpr) -> bool {
            !is_integer_number(lhs_exp) && !is_integer_number(rhs_exp)
        }

        // this is O(n^2) worst case, due to scanning the whole vec for each factor
        while current_factor_idx < new_factors.len() {
            let (mut current_factor, mut current_factor_exp) = get_exp(&new_factors[current_factor_idx]);

            // look at every factor after `current_factor`
            let mut next_factor_idx = current_factor_idx + 1;
            while next_factor_idx < new_factors.len() {
                let (next_factor, next_factor_exp) = get_exp(&new_factors[next_factor_idx]);

                if current_factor == next_factor
                    && (!current_factor.is_number() || numeric_base_mergeable(&current_factor_exp, &next_factor_exp)) {
                    // bases must be strictly equal
                    // if they are, apply a^b*a^c = a^(b+c)
                    current_factor_exp += next_factor_exp;
                    new_factors.swap_remove(next_factor_idx);
                } else if current_factor_exp == next_factor_exp
                    && !is_integer_number(&current_factor_exp)
                    && current_factor.as_number().is_some_and(|n| *n > 0)
                    && next_factor.as_number().is_some_and(|n| *n > 0) {
                    // degrees must be strictly equal
                    // if they are, apply a^c*b^c = (a*b)^c
                    current_factor *= next_factor;
                    new_factors.swap_remove(next_factor_idx);
                } else {
                    next_factor_idx += 1;
                }
            }

            // after all combining, update the current factor
            if current_factor_exp.is_one() {
                new_factors[current_factor_idx] = current_factor;
            } else {
                new_factors[current_factor_idx] = SymExpr::pow(current_factor, current_factor_exp);
            }

            current_factor_idx += 1;
        }

        if new_factors.len() == factors.len() {
            None
        } else {
            Some(SymExpr::Mul(new_factors).downgrade())
        }
    })?;

    step_collector.push(Step::CombineLikeFactors);
    Some(opt)
}

/// Applies all multiplication rules.
///
/// All multiplication rules will reduce the complexity of the expression.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    multiply_zero(expr, step_collector)
        .or_else(|| multiply_one(expr, step_collector))
        .or_else(|| combine_numbers(expr, step_collector))
        .or_else(|| combine_like_factors(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn sym(name: &str) -> SymExpr {
        SymExpr::symbol(name)
    }

    #[test]
    fn zero_factor() {
        let expr = SymExpr::Mul(vec![sym("x"), SymExpr::number(0), sym("y")]);
        assert_eq!(multiply_zero(&expr, &mut ()), Some(SymExpr::number(0)));
    }

    #[test]
    fn zero_factor_keeps_division_by_zero() {
        let expr = SymExpr::Mul(vec![
            SymExpr::number(0),
            SymExpr::pow(SymExpr::number(0), SymExpr::number(-1)),
        ]);
        assert_eq!(multiply_zero(&expr, &mut ()), None);
    }

    #[test]
    fn numbers_multiply() {
        let expr = SymExpr::Mul(vec![SymExpr::number(2), sym("x"), SymExpr::number((3, 4))]);
        assert_eq!(combine_numbers(&expr, &mut ()), Some(SymExpr::Mul(vec![
            SymExpr::number((3, 2)),
            sym("x"),
        ])));
    }

    #[test]
    fn like_factors() {
        // a * b * a^3 * b^4 = a^4 * b^5
        let expr = SymExpr::Mul(vec![
            sym("a"),
            sym("b"),
            SymExpr::pow(sym("a"), SymExpr::number(3)),
            SymExpr::pow(sym("b"), SymExpr::number(4)),
        ]);
        assert_eq!(combine_like_factors(&expr, &mut ()), Some(SymExpr::Mul(vec![
            SymExpr::pow(sym("a"), SymExpr::number(4)),
            SymExpr::pow(sym("b"), SymExpr::number(5)),
        ])));
    }

    #[test]
    fn quotient_of_like_factors() {
        // x * x^-1 = x^0
        let expr = SymExpr::Mul(vec![sym("x"), SymExpr::pow(sym("x"), SymExpr::number(-1))]);
        assert_eq!(
            combine_like_factors(&expr, &mut ()),
            Some(SymExpr::pow(sym("x"), SymExpr::number(0))),
        );
    }

    #[test]
    fn numeric_roots_merge() {
        let half = || SymExpr::number((1, 2));
        let expr = SymExpr::Mul(vec![
            SymExpr::pow(SymExpr::number(2), half()),
            SymExpr::pow(SymExpr::number(3), half()),
        ]);
        assert_eq!(
            combine_like_factors(&expr, &mut ()),
            Some(SymExpr::pow(SymExpr::number(6), half())),
        );
    }

    #[test]
    fn number_and_its_root_stay_apart() {
        let expr = SymExpr::Mul(vec![
            SymExpr::number(2),
            SymExpr::pow(SymExpr::number(2), SymExpr::number((1, 2))),
        ]);
        assert_eq!(combine_like_factors(&expr, &mut ()), None);
    }
}
