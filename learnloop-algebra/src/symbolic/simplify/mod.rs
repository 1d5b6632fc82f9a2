//! Module to simplify expressions.
//!
//! This module provides the [`simplify`] function, which attempts to reduce the complexity of an
//! expression. It does this by repeatedly applying rewriting rules to the expression in multiple
//! passes, until no more rules apply. Afterwards, rational functions of a single variable have
//! their common polynomial factors cancelled, and terms and factors are sorted into a canonical
//! order.
//!
//! Complexity is an informal, arbitrary metric that is used to determine whether one expression is
//! simpler than another. The default complexity heuristic used is [`default_complexity`] (click
//! for more information). However, this can be overridden by providing a custom complexity
//! function to the [`simplify_with`] function.

pub(crate) mod fraction;
mod order;
mod polynomial;
pub mod rules;
pub mod step;

use crate::error::{DivisionByZero, InvalidFactorial};
use crate::primitive::is_integer;
use crate::symbolic::step_collector::StepCollector;
use learnloop_error::Error;
use step::Step;
use super::expr::{SymExpr, Primary};
use tracing::trace;

/// Maximum number of passes over a single node. Rule sets that keep rewriting each other are cut
/// off here.
const MAX_PASSES: usize = 64;

/// The default complexity heuristic function.
///
/// This function computes complexity using these simple rules:
///
/// - `complexity(number) = bits(numerator) + bits(denominator) - 1`
/// - `complexity(symbol) = length(symbol)`
/// - `complexity(call) = length(name) + length(args) + sum(complexity(args))`
/// - `complexity(add) = 3 + sum(complexity(terms))`
/// - `complexity(mul) = 2 + sum(complexity(factors))`
/// - `complexity(exp) = 1 + complexity(lhs) + complexity(rhs)`
pub fn default_complexity(expr: &SymExpr) -> usize {
    let mut complexity = 0usize;
    let mut stack = vec![expr];
    while let Some(expr) = stack.pop() {
        let cost = match expr {
            SymExpr::Primary(primary) => {
                match primary {
                    Primary::Number(num) => {
                        let bits = num.numer().significant_bits() + num.denom().significant_bits() - 1;
                        usize::try_from(bits).unwrap_or(usize::MAX)
                    },
                    Primary::Symbol(sym) => sym.len(),
                    Primary::Call(name, args) => {
                        stack.extend(args.iter());
                        name.len() + args.len()
                    },
                }
            },
            SymExpr::Add(terms) => {
                stack.extend(terms.iter());
                3
            },
            SymExpr::Mul(factors) => {
                stack.extend(factors.iter());
                2
            },
            SymExpr::Exp(lhs, rhs) => {
                stack.push(lhs);
                stack.push(rhs);
                1
            },
        };
        complexity = complexity.saturating_add(cost);
    }
    complexity
}

/// Base implementation of the rewriting loop.
fn inner_simplify_with<F>(
    expr: &SymExpr,
    complexity: F,
    step_collector: &mut dyn StepCollector<Step>,
) -> (SymExpr, bool)
where
    F: Copy + Fn(&SymExpr) -> usize,
{
    let mut expr = expr.clone();
    let mut changed_at_least_once = false;

    for _ in 0..MAX_PASSES {
        let mut changed_in_this_pass = false;

        // try to simplify this expression using all rules
        if let Some(new_expr) = rules::all(&expr, step_collector) {
            expr = new_expr;
            changed_in_this_pass = true;
            changed_at_least_once = true;
        }

        // then begin recursing into the expression's children
        match expr {
            SymExpr::Primary(Primary::Call(_, ref mut args)) => {
                for arg in args.iter_mut() {
                    let result = inner_simplify_with(arg, complexity, step_collector);
                    *arg = result.0;
                    // use |= instead of = to not reset these variables to false if already true
                    changed_in_this_pass |= result.1;
                    changed_at_least_once |= result.1;
                }
            },
            SymExpr::Primary(primary) => return (SymExpr::Primary(primary), changed_at_least_once),
            SymExpr::Add(ref mut terms) => {
                for term in terms.iter_mut() {
                    let result = inner_simplify_with(term, complexity, step_collector);
                    *term = result.0;
                    changed_in_this_pass |= result.1;
                    changed_at_least_once |= result.1;
                }
            },
            SymExpr::Mul(ref mut factors) => {
                for factor in factors.iter_mut() {
                    let result = inner_simplify_with(factor, complexity, step_collector);
                    *factor = result.0;
                    changed_in_this_pass |= result.1;
                    changed_at_least_once |= result.1;
                }
            },
            SymExpr::Exp(ref mut lhs, ref mut rhs) => {
                let result_l = inner_simplify_with(&**lhs, complexity, step_collector);
                let result_r = inner_simplify_with(&**rhs, complexity, step_collector);

                **lhs = result_l.0;
                **rhs = result_r.0;
                changed_in_this_pass |= result_l.1 || result_r.1;
                changed_at_least_once |= result_l.1 || result_r.1;
            },
        }

        // sums and products whose children simplified into sums and products are flattened
        expr = flatten(expr);

        if !changed_in_this_pass {
            return (expr, changed_at_least_once);
        }
    }

    trace!(expr = %expr, "simplification stopped after the maximum number of passes");
    (expr, changed_at_least_once)
}

/// Merges nested sums into their parent sum, and nested products into their parent product.
fn flatten(expr: SymExpr) -> SymExpr {
    match expr {
        SymExpr::Add(terms) if terms.iter().any(|term| matches!(term, SymExpr::Add(_))) => {
            terms.into_iter().fold(SymExpr::Add(Vec::new()), |sum, term| sum + term)
        },
        SymExpr::Mul(factors) if factors.iter().any(|factor| matches!(factor, SymExpr::Mul(_))) => {
            factors.into_iter().fold(SymExpr::Mul(Vec::new()), |product, factor| product * factor)
        },
        expr => expr,
    }
}

/// Returns an error if the simplified expression is undefined: it still divides by zero, as in
/// `0^-1`, or takes the factorial of a negative or fractional number, as in `(-3)!`.
fn check_undefined(expr: &SymExpr) -> Result<(), Error> {
    for expr in expr.post_order_iter() {
        match expr {
            SymExpr::Exp(base, exp) if base.is_zero() && exp.as_number().is_some_and(|n| *n < 0) => {
                return Err(Error::new(Vec::new(), DivisionByZero));
            },
            SymExpr::Primary(Primary::Call(name, args)) if name == "factorial" => {
                let invalid = args.first()
                    .and_then(SymExpr::as_number)
                    .is_some_and(|n| !is_integer(n) || *n < 0);
                if invalid {
                    return Err(Error::new(Vec::new(), InvalidFactorial));
                }
            },
            _ => (),
        }
    }

    Ok(())
}

/// The full simplification pipeline: rewriting rules, polynomial cancellation, canonical order,
/// and the check for undefined results.
fn simplify_pipeline<F>(
    expr: &SymExpr,
    complexity: F,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<SymExpr, Error>
where
    F: Copy + Fn(&SymExpr) -> usize,
{
    let (mut expr, _) = inner_simplify_with(expr, complexity, step_collector);
    if let Some(cancelled) = polynomial::cancel_all(&expr, complexity) {
        step_collector.push(Step::CancelPolynomial);
        expr = inner_simplify_with(&cancelled, complexity, step_collector).0;
    }

    let expr = order::canonicalize(expr);
    check_undefined(&expr)?;
    Ok(expr)
}

/// Simplify the given expression, using the default complexity heuristic function.
///
/// Returns an error if the expression divides by zero.
pub fn simplify(expr: &SymExpr) -> Result<SymExpr, Error> {
    simplify_pipeline(expr, default_complexity, &mut ())
}

/// Simplify the given expression, using the given complexity heuristic function.
///
/// The complexity heuristic function should return a number that represents the complexity of the
/// given expression. The lower the number, the simpler the expression.
pub fn simplify_with<F>(expr: &SymExpr, complexity: F) -> Result<SymExpr, Error>
where
    F: Copy + Fn(&SymExpr) -> usize,
{
    simplify_pipeline(expr, complexity, &mut ())
}

/// Simplify the given expression, using the default complexity heuristic function. The steps taken
/// by the simplifier will also be collected and returned. This is useful for debugging, and also
/// for displaying the steps taken to the user.
pub fn simplify_with_steps(expr: &SymExpr) -> Result<(SymExpr, Vec<Step>), Error> {
    let mut steps = Vec::new();
    let expr = simplify_pipeline(expr, default_complexity, &mut steps)?;
    Ok((expr, steps))
}
