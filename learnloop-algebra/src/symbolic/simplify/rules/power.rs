//! Simplification rules for powers, including exact evaluation of numerical powers and roots.

use crate::primitive::{int, is_integer};
use crate::symbolic::{
    expr::{SymExpr, Primary},
    simplify::{rules::do_power, step::Step},
    step_collector::StepCollector,
};
use rug::{ops::Pow, Integer, Rational};

/// The largest integer exponent that a number is raised to exactly.
const MAX_EXPONENT: u32 = 256;

/// Powers whose result would need more bits than this are left unevaluated.
const MAX_BITS: u64 = 1 << 16;

/// Largest root index that perfect powers are extracted from.
const MAX_ROOT_INDEX: u32 = 64;

/// Largest trial factor when pulling perfect powers out of a root.
const MAX_ROOT_FACTOR: u32 = 1000;

/// Returns the number of bits needed to store the larger of the numerator and denominator.
fn bits(num: &Rational) -> u64 {
    u64::from(num.numer().significant_bits().max(num.denom().significant_bits()))
}

/// Raises `base` to the integer power `exp` exactly.
///
/// Returns [`None`] if the exponent or the result would be too large, or if `base` is zero and
/// `exp` is negative.
pub(crate) fn exact_power(base: &Rational, exp: &Integer) -> Option<Rational> {
    let magnitude = exp.clone().abs().to_u32().filter(|m| *m <= MAX_EXPONENT)?;
    if bits(base) * u64::from(magnitude) > MAX_BITS {
        return None;
    }

    let value = base.clone().pow(magnitude);
    if *exp < 0 {
        if value == 0 {
            None
        } else {
            Some(value.recip())
        }
    } else {
        Some(value)
    }
}

/// Splits `n` into `(outside, inside)` such that `n = outside^root * inside`, pulling out as
/// large a perfect `root`-th power as trial division finds.
fn extract_perfect_power(n: &Integer, root: u32) -> (Integer, Integer) {
    let exact = n.clone().root(root);
    if exact.clone().pow(root) == *n {
        return (exact, int(1));
    }

    let mut outside = int(1);
    let mut inside = n.clone();
    for factor in 2..=MAX_ROOT_FACTOR {
        let power = int(factor).pow(root);
        if power > inside {
            break;
        }

        while inside.is_divisible(&power) {
            inside /= &power;
            outside *= factor;
        }
    }

    (outside, inside)
}

/// `a^0 = 1`
pub fn power_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |_, rhs| {
        if rhs.is_zero() {
            Some(SymExpr::number(1))
        } else {
            None
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::PowerZero);
    Some(opt)
}

/// `0^a = 0`, for positive numbers `a`
pub fn power_zero_left(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        if lhs.is_zero() && rhs.as_number().is_some_and(|n| *n > 0) {
            Some(SymExpr::number(0))
        } else {
            None
        }
    })?;

    step_collector.push(Step::PowerZeroLeft);
    Some(opt)
}

/// `1^a = 1`
pub fn power_one_left(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, _| {
        if lhs.is_one() {
            Some(SymExpr::number(1))
        } else {
            None
        }
    })?;

    step_collector.push(Step::PowerOneLeft);
    Some(opt)
}

/// `a^1 = a`
pub fn power_one(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        if rhs.is_one() {
            Some(lhs.clone())
        } else {
            None
        }
    })?;

    step_collector.push(Step::PowerOne);
    Some(opt)
}

/// `(a^b)^c = a^(b*c)`, for integers `c`
pub fn power_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        if let SymExpr::Exp(base, exp) = lhs {
            if rhs.as_integer().is_some() {
                return Some(SymExpr::pow(*base.clone(), *exp.clone() * rhs.clone()));
            }
        }

        None
    })?;

    step_collector.push(Step::PowerPower);
    Some(opt)
}

/// Evaluates a number raised to an integer power.
///
/// `2^3 = 8`
/// `(2/3)^-2 = 9/4`
pub fn evaluate_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        let base = lhs.as_number()?;
        let exp = rhs.as_integer()?;
        exact_power(base, exp).map(|value| SymExpr::Primary(Primary::Number(value)))
    })?;

    step_collector.push(Step::EvaluatePower);
    Some(opt)
}

/// Simplifies a positive number raised to a fractional power, so that what remains under the
/// root is as small as possible and the exponent is between 0 and 1.
///
/// `8^(1/2) = 2*2^(1/2)`
/// `4^(3/2) = 8`
/// `2^(-1/2) = 2^(1/2)/2`
/// `(1/4)^(1/2) = 4^(-1/2)`
pub fn extract_root(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        let base = lhs.as_number().filter(|n| **n > 0)?;
        let exp = rhs.as_number().filter(|n| !is_integer(n))?;

        if *base.denom() != 1 {
            // (a/b)^c = a^c * b^-c
            return Some(SymExpr::Mul(vec![
                SymExpr::pow(
                    SymExpr::Primary(Primary::Number(Rational::from(base.numer().clone()))),
                    rhs.clone(),
                ),
                SymExpr::pow(
                    SymExpr::Primary(Primary::Number(Rational::from(base.denom().clone()))),
                    SymExpr::Primary(Primary::Number(-exp.clone())),
                ),
            ]));
        }

        let whole = exp.clone().floor();
        if whole != 0 {
            // a^c = a^floor(c) * a^(c - floor(c))
            let outside = exact_power(base, whole.numer())?;
            let fraction = exp.clone() - whole;
            return Some(SymExpr::Mul(vec![
                SymExpr::Primary(Primary::Number(outside)),
                SymExpr::pow(lhs.clone(), SymExpr::Primary(Primary::Number(fraction))),
            ]));
        }

        // 0 < c < 1, so the numerator of `c` is positive
        let root = exp.denom().to_u32().filter(|root| *root <= MAX_ROOT_INDEX)?;
        let (outside, inside) = extract_perfect_power(base.numer(), root);
        if outside == 1 {
            return None;
        }

        let outside = exact_power(&Rational::from(outside), exp.numer())?;
        if inside == 1 {
            Some(SymExpr::Primary(Primary::Number(outside)))
        } else {
            Some(SymExpr::Mul(vec![
                SymExpr::Primary(Primary::Number(outside)),
                SymExpr::pow(SymExpr::Primary(Primary::Number(Rational::from(inside))), rhs.clone()),
            ]))
        }
    })?;

    step_collector.push(Step::ExtractRoot);
    Some(opt)
}

/// Applies all power rules.
///
/// All power rules will reduce the complexity of the expression.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    power_zero(expr, step_collector)
        .or_else(|| power_zero_left(expr, step_collector))
        .or_else(|| power_one_left(expr, step_collector))
        .or_else(|| power_one(expr, step_collector))
        .or_else(|| power_power(expr, step_collector))
        .or_else(|| evaluate_power(expr, step_collector))
        .or_else(|| extract_root(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn num_pow(base: i32, exp: (i32, i32)) -> SymExpr {
        SymExpr::pow(SymExpr::number(base), SymExpr::number(exp))
    }

    #[test]
    fn integer_powers() {
        let expr = SymExpr::pow(SymExpr::number((2, 3)), SymExpr::number(-2));
        assert_eq!(evaluate_power(&expr, &mut ()), Some(SymExpr::number((9, 4))));
    }

    #[test]
    fn huge_power_is_left_alone() {
        let expr = SymExpr::pow(SymExpr::number(2), SymExpr::number(100_000));
        assert_eq!(evaluate_power(&expr, &mut ()), None);
    }

    #[test]
    fn zero_to_negative_power_is_left_alone() {
        let expr = SymExpr::pow(SymExpr::number(0), SymExpr::number(-1));
        assert_eq!(all(&expr, &mut ()), None);
    }

    #[test]
    fn perfect_root() {
        assert_eq!(extract_root(&num_pow(16, (1, 2)), &mut ()), Some(SymExpr::number(4)));
        assert_eq!(extract_root(&num_pow(8, (2, 3)), &mut ()), Some(SymExpr::number(4)));
    }

    #[test]
    fn partial_root() {
        assert_eq!(extract_root(&num_pow(12, (1, 2)), &mut ()), Some(SymExpr::Mul(vec![
            SymExpr::number(2),
            num_pow(3, (1, 2)),
        ])));
    }

    #[test]
    fn prime_under_root() {
        assert_eq!(extract_root(&num_pow(7, (1, 2)), &mut ()), None);
    }

    #[test]
    fn whole_part_of_exponent() {
        assert_eq!(extract_root(&num_pow(2, (3, 2)), &mut ()), Some(SymExpr::Mul(vec![
            SymExpr::number(2),
            num_pow(2, (1, 2)),
        ])));
        assert_eq!(extract_root(&num_pow(2, (-1, 2)), &mut ()), Some(SymExpr::Mul(vec![
            SymExpr::number((1, 2)),
            num_pow(2, (1, 2)),
        ])));
    }

    #[test]
    fn power_of_power() {
        let x = SymExpr::symbol("x");
        let expr = SymExpr::pow(SymExpr::pow(x.clone(), SymExpr::number(2)), SymExpr::number(3));
        assert_eq!(
            power_power(&expr, &mut ()),
            Some(SymExpr::pow(x, SymExpr::number(6))),
        );
    }
}
