//! Symbolic integration.
//!
//! Only a small table of antiderivatives is supported: linearity, constant multiples, the power
//! rule, and the exponential and trigonometric functions of a linear argument `a*x + b`. Anything
//! else, including products of two non-constant factors, is reported as an error rather than
//! attempted with heuristics.

use crate::error::NotIntegrable;
use learnloop_error::Error;
use super::expr::{SymExpr, Primary, E};

/// Returns `(a, b)` such that `expr = a*var + b`, where neither `a` nor `b` contains `var`.
fn linear_coeffs(expr: &SymExpr, var: &str) -> Option<(SymExpr, SymExpr)> {
    if !expr.contains_symbol(var) {
        return Some((SymExpr::number(0), expr.clone()));
    }

    match expr {
        SymExpr::Primary(Primary::Symbol(sym)) if sym == var => {
            Some((SymExpr::number(1), SymExpr::number(0)))
        },
        SymExpr::Mul(factors) => {
            // exactly one factor may be the variable itself
            let (vars, constants): (Vec<_>, Vec<_>) = factors.iter()
                .partition(|factor| factor.contains_symbol(var));
            match vars.as_slice() {
                [single] if single.as_symbol() == Some(var) => Some((
                    SymExpr::Mul(constants.into_iter().cloned().collect()).downgrade(),
                    SymExpr::number(0),
                )),
                _ => None,
            }
        },
        SymExpr::Add(terms) => {
            let mut a = SymExpr::Add(Vec::new());
            let mut b = SymExpr::Add(Vec::new());
            for term in terms {
                let (term_a, term_b) = linear_coeffs(term, var)?;
                if !term_a.is_zero() {
                    a += term_a;
                }
                if !term_b.is_zero() {
                    b += term_b;
                }
            }
            Some((a.downgrade(), b.downgrade()))
        },
        _ => None,
    }
}

/// Divides `expr` by `divisor`, leaving out division by the literal one.
fn divide(expr: SymExpr, divisor: SymExpr) -> SymExpr {
    if divisor.is_one() {
        expr
    } else {
        expr * SymExpr::pow(divisor, SymExpr::number(-1))
    }
}

/// Integrates `u^n`, where `u` is linear in the variable and `n` is constant.
fn power_rule(base: &SymExpr, exp: &SymExpr, var: &str) -> Option<SymExpr> {
    let (a, _) = linear_coeffs(base, var)?;
    if exp.contains_symbol(var) {
        return None;
    }

    if exp.as_number().is_some_and(|n| *n == -1) {
        // integral of 1/(ax + b) = ln(ax + b) / a
        return Some(divide(SymExpr::call("log", vec![base.clone()]), a));
    }

    // integral of (ax + b)^n = (ax + b)^(n + 1) / (a * (n + 1))
    let new_exp = exp.clone() + SymExpr::number(1);
    Some(divide(SymExpr::pow(base.clone(), new_exp.clone()), a * new_exp))
}

/// Integrates `c^u`, where `c` is constant and `u` is linear in the variable.
fn exponential_rule(base: &SymExpr, exp: &SymExpr, var: &str) -> Option<SymExpr> {
    if base.contains_symbol(var) {
        return None;
    }
    let (a, _) = linear_coeffs(exp, var)?;
    let expr = SymExpr::pow(base.clone(), exp.clone());

    if base.as_symbol() == Some(E) {
        Some(divide(expr, a))
    } else {
        Some(divide(expr, a * SymExpr::call("log", vec![base.clone()])))
    }
}

/// Integrates a call to a known function of a linear argument.
fn function_rule(name: &str, args: &[SymExpr], var: &str) -> Option<SymExpr> {
    let [arg] = args else {
        return None;
    };
    let (a, _) = linear_coeffs(arg, var)?;

    let antiderivative = match name {
        "sin" => -SymExpr::call("cos", vec![arg.clone()]),
        "cos" => SymExpr::call("sin", vec![arg.clone()]),
        "exp" => SymExpr::call("exp", vec![arg.clone()]),
        _ => return None,
    };
    Some(divide(antiderivative, a))
}

/// Integrates a product, pulling out the factors that do not contain the variable.
fn constant_multiple(factors: &[SymExpr], var: &str) -> Option<SymExpr> {
    let (dependent, constants): (Vec<_>, Vec<_>) = factors.iter()
        .cloned()
        .partition(|factor| factor.contains_symbol(var));
    if constants.is_empty() {
        // a product of two or more factors with the variable
        return None;
    }

    let rest = integrate(&SymExpr::Mul(dependent).downgrade(), var)?;
    Some(SymExpr::Mul(constants).downgrade() * rest)
}

/// Builds the antiderivative, or returns [`None`] if no rule applies.
fn integrate(expr: &SymExpr, var: &str) -> Option<SymExpr> {
    // integral of c = c * x
    if !expr.contains_symbol(var) {
        return Some(expr.clone() * SymExpr::symbol(var));
    }

    match expr {
        SymExpr::Primary(Primary::Symbol(_)) => {
            // integral of x = x^2 / 2
            Some(SymExpr::number((1, 2)) * SymExpr::pow(expr.clone(), SymExpr::number(2)))
        },
        SymExpr::Primary(Primary::Call(name, args)) => function_rule(name, args, var),
        SymExpr::Primary(Primary::Number(_)) => None,
        SymExpr::Add(terms) => {
            let mut sum = SymExpr::Add(Vec::new());
            for term in terms {
                sum += integrate(term, var)?;
            }
            Some(sum.downgrade())
        },
        SymExpr::Mul(factors) => constant_multiple(factors, var),
        SymExpr::Exp(base, exp) => {
            power_rule(base, exp, var).or_else(|| exponential_rule(base, exp, var))
        },
    }
}

/// Computes an antiderivative of the given expression with respect to the variable `var`. No
/// constant of integration is added, and the result is not simplified.
///
/// Returns [`Err`] if none of the supported rules apply.
pub fn integral(f: &SymExpr, var: &str) -> Result<SymExpr, Error> {
    integrate(f, var)
        .ok_or_else(|| Error::new(Vec::new(), NotIntegrable { expr: f.to_string() }))
}
