//! Symbolic differentiation.

mod function;

use crate::error::NotDifferentiable;
use learnloop_error::Error;
use super::expr::{SymExpr, Primary};

/// Returns `true` if the given [`SymExpr`] is "clearly" zero. This is intended to clean up ASTs
/// and is not mathematically rigorous.
fn is_trivially_zero(e: &SymExpr) -> bool {
    match e {
        SymExpr::Primary(Primary::Number(n)) => *n == 0,
        SymExpr::Add(sum) => sum.iter().all(is_trivially_zero),
        SymExpr::Mul(mul) => mul.iter().any(is_trivially_zero),
        SymExpr::Exp(base, exponent) => {
            is_trivially_zero(base) && exponent.as_number().is_some_and(|n| *n > 0)
        },
        _ => false,
    }
}

/// Returns `true` if the given [`SymExpr`] is "clearly" one. This is intended to clean up ASTs
/// and is not mathematically rigorous.
fn is_trivially_unity(e: &SymExpr) -> bool {
    match e {
        SymExpr::Primary(Primary::Number(n)) => *n == 1,
        SymExpr::Mul(exprs) => exprs.iter().all(is_trivially_unity),
        SymExpr::Exp(expr, expr1) => is_trivially_zero(expr1) || is_trivially_unity(expr),
        SymExpr::Add(expr) => expr.len() == 1 && is_trivially_unity(&expr[0]),
        _ => false,
    }
}

/// Helper struct to build a product of expressions while applying basic simplification rules. If
/// any of the expressions are zero, the product is reduced to zero.
#[derive(Default)]
struct MultBuilder(Vec<SymExpr>);

impl From<MultBuilder> for SymExpr {
    fn from(value: MultBuilder) -> Self {
        SymExpr::Mul(value.0).downgrade()
    }
}

impl MultBuilder {
    fn mult(&mut self, e: SymExpr) {
        if is_trivially_zero(&e) || self.0.first().is_some_and(is_trivially_zero) {
            self.0 = vec![SymExpr::number(0)];
            return;
        }

        if !is_trivially_unity(&e) {
            self.0.push(e)
        }
    }
}

/// Helper struct to build a summation of expressions while applying basic simplification rules.
/// Only non-zero expressions are added to the sum.
#[derive(Default)]
struct SumBuilder(Vec<SymExpr>);

impl From<SumBuilder> for SymExpr {
    fn from(value: SumBuilder) -> Self {
        SymExpr::Add(value.0).downgrade()
    }
}

impl SumBuilder {
    fn add(&mut self, e: SymExpr) {
        if !is_trivially_zero(&e) {
            self.0.push(e)
        }
    }
}

/// The error for an expression whose derivative cannot be computed symbolically.
fn not_differentiable(expr: &SymExpr) -> Error {
    Error::new(Vec::new(), NotDifferentiable { expr: expr.to_string() })
}

/// `(f + g)' = f' + g'`
fn sum_rule(exprs: &[SymExpr], var: &str) -> Result<SymExpr, Error> {
    let mut sum = SumBuilder::default();
    for elem in exprs {
        sum.add(derivative(elem, var)?);
    }
    Ok(sum.into())
}

/// `(f * g * h)' = f' * g * h + f * g' * h + f * g * h'`
fn product_rule(product: &[SymExpr], with: &str) -> Result<SymExpr, Error> {
    let mut outer_sum = SumBuilder::default();

    // Produces a derivative according the product rule:
    // f'*g*h + f*g'*h + f*g*h'
    for derivative_index in 0..product.len() {
        let mut inner_mult = MultBuilder::default();
        for (term_index, term) in product.iter().enumerate() {
            let term = if derivative_index == term_index {
                derivative(term, with)?
            } else {
                term.clone()
            };

            inner_mult.mult(term);
        }

        outer_sum.add(inner_mult.into());
    }

    Ok(outer_sum.into())
}

/// `(f^g)'`, choosing the power rule, the exponential rule, or the general rule depending on
/// which side contains the variable.
fn power_rule(base: &SymExpr, exp: &SymExpr, with: &str) -> Result<SymExpr, Error> {
    let mut mult_group = MultBuilder::default();
    match (base.contains_symbol(with), exp.contains_symbol(with)) {
        (_, false) => {
            // (f^c)' = c * f^(c - 1) * f'
            mult_group.mult(exp.clone());
            mult_group.mult(SymExpr::pow(base.clone(), exp.clone() + SymExpr::number(-1)));
            mult_group.mult(derivative(base, with)?);
        },
        (false, true) => {
            // (a^g)' = a^g * ln(a) * g'
            mult_group.mult(SymExpr::pow(base.clone(), exp.clone()));
            mult_group.mult(SymExpr::call("log", vec![base.clone()]));
            mult_group.mult(derivative(exp, with)?);
        },
        (true, true) => {
            // (f^g)' = f^g * (g' * ln(f) + g * f' / f)
            let mut inner = SumBuilder::default();

            let mut log_term = MultBuilder::default();
            log_term.mult(derivative(exp, with)?);
            log_term.mult(SymExpr::call("log", vec![base.clone()]));
            inner.add(log_term.into());

            let mut quotient_term = MultBuilder::default();
            quotient_term.mult(exp.clone());
            quotient_term.mult(derivative(base, with)?);
            quotient_term.mult(SymExpr::pow(base.clone(), SymExpr::number(-1)));
            inner.add(quotient_term.into());

            mult_group.mult(SymExpr::pow(base.clone(), exp.clone()));
            mult_group.mult(inner.into());
        },
    }

    Ok(mult_group.into())
}

/// Computes the derivative of the given expression with respect to the variable `with`. The
/// result is not simplified.
///
/// Returns [`Err`] if the derivative could not be symbolically computed, such as for calls to
/// unknown functions of the variable.
pub fn derivative(f: &SymExpr, with: &str) -> Result<SymExpr, Error> {
    if is_trivially_zero(f) || !f.contains_symbol(with) {
        return Ok(SymExpr::number(0));
    }

    let expr = match f {
        SymExpr::Primary(Primary::Number(_)) => SymExpr::number(0),
        SymExpr::Primary(Primary::Symbol(sym)) => {
            if sym == with {
                SymExpr::number(1)
            } else {
                SymExpr::number(0)
            }
        },
        SymExpr::Primary(Primary::Call(func, args)) => {
            function::function_derivative(f, func, args, with)?
        },
        SymExpr::Add(exprs) => sum_rule(exprs, with)?,
        SymExpr::Mul(exprs) => product_rule(exprs, with)?,
        SymExpr::Exp(base, exp) => power_rule(base, exp, with)?,
    };

    if is_trivially_zero(&expr) {
        Ok(SymExpr::number(0))
    } else {
        Ok(expr)
    }
}

#[cfg(test)]
mod tests {
    use crate::symbolic::simplify;
    use learnloop_parser::parser::{ast::Expr as AstExpr, Parser};
    use pretty_assertions::assert_eq;
    use super::*;

    /// Differentiates the given expression with respect to `x`, and simplifies the result.
    fn derive(input: &str) -> Result<String, Error> {
        let expr = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        let expr = SymExpr::try_from_ast(&expr).unwrap();
        let derivative = derivative(&expr, "x")?;
        Ok(simplify(&derivative)?.to_string())
    }

    #[test]
    fn power_rule() {
        assert_eq!(derive("x^2 + x + 1").unwrap(), "2 * x + 1");
        assert_eq!(derive("x^3").unwrap(), "3 * x^2");
        assert_eq!(derive("5").unwrap(), "0");
    }

    #[test]
    fn other_variables_are_constant() {
        assert_eq!(derive("y^2 + 3").unwrap(), "0");
        assert_eq!(derive("x y").unwrap(), "y");
    }

    #[test]
    fn product_rule() {
        assert_eq!(derive("x sin(x)").unwrap(), "x * cos(x) + sin(x)");
    }

    #[test]
    fn chain_rule() {
        assert_eq!(derive("sin(x^2)").unwrap(), "2 * x * cos(x^2)");
        assert_eq!(derive("exp(3x)").unwrap(), "3 * exp(3 * x)");
    }

    #[test]
    fn exponential() {
        assert_eq!(derive("E^x").unwrap(), "E^x");
    }

    #[test]
    fn unknown_function() {
        let err = derive("f(x)").unwrap_err();
        assert_eq!(err.message(), "cannot differentiate `f(x)`");
        assert!(err.spans.is_empty());
    }
}
