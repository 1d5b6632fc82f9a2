//! Univariate polynomials and rational functions with rational coefficients.
//!
//! After the rewriting rules have run, any subexpression that is a rational function of a single
//! variable is converted into a quotient of two polynomials, and the greatest common divisor of
//! the numerator and denominator is cancelled. This is how `(x^2 - 1)/(x - 1)` becomes `x + 1`,
//! and how `(x + 1)^2 - x^2 - 2x - 1` becomes `0`.

use crate::primitive::rat;
use crate::symbolic::{
    expr::{SymExpr, Primary},
    simplify::fraction::{join_coefficient, make_fraction},
};
use rug::Rational;

/// Largest integer exponent expanded when converting an expression into a polynomial.
const MAX_EXPONENT: usize = 16;

/// Largest degree of any intermediate polynomial.
const MAX_DEGREE: usize = 64;

/// A polynomial in one variable. `coefficients[i]` is the coefficient of `x^i`, and the last
/// coefficient is never zero.
#[derive(Debug, Clone, PartialEq)]
struct Poly {
    coefficients: Vec<Rational>,
}

impl Poly {
    fn new(mut coefficients: Vec<Rational>) -> Self {
        while coefficients.last().is_some_and(|c| *c == 0) {
            coefficients.pop();
        }
        Self { coefficients }
    }

    fn constant(c: Rational) -> Self {
        Self::new(vec![c])
    }

    fn variable() -> Self {
        Self::new(vec![rat(0), rat(1)])
    }

    fn is_zero(&self) -> bool {
        self.coefficients.is_empty()
    }

    fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    fn leading(&self) -> Option<&Rational> {
        self.coefficients.last()
    }

    fn add(&self, other: &Self) -> Self {
        let len = self.coefficients.len().max(other.coefficients.len());
        let coefficients = (0..len)
            .map(|i| {
                let mut sum = rat(0);
                if let Some(c) = self.coefficients.get(i) {
                    sum += c;
                }
                if let Some(c) = other.coefficients.get(i) {
                    sum += c;
                }
                sum
            })
            .collect();
        Self::new(coefficients)
    }

    fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::new(Vec::new());
        }

        let mut coefficients = vec![rat(0); self.coefficients.len() + other.coefficients.len() - 1];
        for (i, a) in self.coefficients.iter().enumerate() {
            for (j, b) in other.coefficients.iter().enumerate() {
                coefficients[i + j] += Rational::from(a * b);
            }
        }
        Self::new(coefficients)
    }

    fn scale(&self, factor: &Rational) -> Self {
        Self::new(self.coefficients.iter().map(|c| Rational::from(c * factor)).collect())
    }

    fn pow(&self, exp: usize) -> Self {
        let mut result = Self::constant(rat(1));
        for _ in 0..exp {
            result = result.mul(self);
        }
        result
    }

    /// Polynomial long division. Returns the quotient and remainder, or [`None`] if `divisor` is
    /// zero.
    fn div_rem(&self, divisor: &Self) -> Option<(Self, Self)> {
        let lead = divisor.leading()?;
        if self.coefficients.len() < divisor.coefficients.len() {
            return Some((Self::new(Vec::new()), self.clone()));
        }

        let d = divisor.degree();
        let mut remainder = self.coefficients.clone();
        let mut quotient = vec![rat(0); remainder.len() - d];
        for i in (0..quotient.len()).rev() {
            let coefficient = Rational::from(&remainder[i + d] / lead);
            for (j, c) in divisor.coefficients.iter().enumerate() {
                remainder[i + j] -= Rational::from(&coefficient * c);
            }
            quotient[i] = coefficient;
        }
        remainder.truncate(d);

        Some((Self::new(quotient), Self::new(remainder)))
    }

    /// Scales the polynomial so that its leading coefficient is one.
    fn monic(&self) -> Self {
        match self.leading() {
            Some(lead) => self.scale(&Rational::from(lead.recip_ref())),
            None => self.clone(),
        }
    }

    /// The monic greatest common divisor of two polynomials, using the Euclidean algorithm.
    fn gcd(&self, other: &Self) -> Self {
        let (mut a, mut b) = (self.clone(), other.clone());
        while !b.is_zero() {
            let Some((_, remainder)) = a.div_rem(&b) else {
                break;
            };
            a = b;
            b = remainder;
        }
        a.monic()
    }

    /// Converts the polynomial back into an expression, in descending order of degree.
    fn to_expr(&self, var: &str) -> SymExpr {
        let terms = self.coefficients.iter()
            .enumerate()
            .rev()
            .filter(|(_, c)| **c != 0)
            .map(|(degree, c)| {
                let power = match degree {
                    0 => SymExpr::number(1),
                    1 => SymExpr::symbol(var),
                    // degrees are bounded by `MAX_DEGREE`
                    _ => SymExpr::pow(SymExpr::symbol(var), SymExpr::number(degree as u32)),
                };
                join_coefficient(c.clone(), power)
            })
            .collect::<Vec<_>>();
        SymExpr::Add(terms).downgrade()
    }
}

/// A quotient of two polynomials in the same variable.
#[derive(Debug, Clone, PartialEq)]
struct RationalFn {
    num: Poly,
    den: Poly,
}

impl RationalFn {
    fn polynomial(num: Poly) -> Self {
        Self { num, den: Poly::constant(rat(1)) }
    }

    fn add(&self, other: &Self) -> Self {
        Self {
            num: self.num.mul(&other.den).add(&other.num.mul(&self.den)),
            den: self.den.mul(&other.den),
        }
    }

    fn mul(&self, other: &Self) -> Self {
        Self {
            num: self.num.mul(&other.num),
            den: self.den.mul(&other.den),
        }
    }

    fn degree(&self) -> usize {
        self.num.degree().max(self.den.degree())
    }

    /// Converts an expression in the variable `var` into a rational function. Returns [`None`]
    /// if the expression contains any other symbol, a function call, or a non-integer power.
    fn from_expr(expr: &SymExpr, var: &str) -> Option<Self> {
        let result = match expr {
            SymExpr::Primary(_) => {
                if let Some(num) = expr.as_number() {
                    Self::polynomial(Poly::constant(num.clone()))
                } else if expr.as_symbol() == Some(var) {
                    Self::polynomial(Poly::variable())
                } else {
                    return None;
                }
            },
            SymExpr::Add(terms) => terms.iter()
                .try_fold(Self::polynomial(Poly::new(Vec::new())), |sum, term| {
                    Some(sum.add(&Self::from_expr(term, var)?))
                })?,
            SymExpr::Mul(factors) => factors.iter()
                .try_fold(Self::polynomial(Poly::constant(rat(1))), |product, factor| {
                    Some(product.mul(&Self::from_expr(factor, var)?))
                })?,
            SymExpr::Exp(base, exp) => {
                let exp = exp.as_integer()?.to_i32()?;
                let magnitude = usize::try_from(exp.unsigned_abs()).ok()
                    .filter(|m| *m <= MAX_EXPONENT)?;
                let base = Self::from_expr(base, var)?;
                let raised = Self { num: base.num.pow(magnitude), den: base.den.pow(magnitude) };
                if exp < 0 {
                    if raised.num.is_zero() {
                        return None;
                    }
                    Self { num: raised.den, den: raised.num }
                } else {
                    raised
                }
            },
        };

        (result.degree() <= MAX_DEGREE).then_some(result)
    }

    /// Cancels the greatest common divisor of the numerator and denominator, and makes the
    /// denominator monic. Returns the reduced function and the degree of the cancelled divisor.
    fn reduce(&self) -> Option<(Self, usize)> {
        let gcd = self.num.gcd(&self.den);
        let (num, _) = self.num.div_rem(&gcd)?;
        let (den, _) = self.den.div_rem(&gcd)?;

        let lead = Rational::from(den.leading()?.recip_ref());
        Some((Self { num: num.scale(&lead), den: den.scale(&lead) }, gcd.degree()))
    }

    fn to_expr(&self, var: &str) -> SymExpr {
        let num = self.num.to_expr(var);
        if self.den.degree() == 0 {
            num
        } else if num.is_one() {
            SymExpr::pow(self.den.to_expr(var), SymExpr::number(-1))
        } else {
            make_fraction(num, self.den.to_expr(var))
        }
    }
}

/// Attempts to cancel common polynomial factors in the given expression, which must be a
/// rational function of exactly one variable.
///
/// The result is used if a factor was cancelled, or if it is less complex than the input.
fn cancel<F>(expr: &SymExpr, complexity: F) -> Option<SymExpr>
where
    F: Fn(&SymExpr) -> usize,
{
    if matches!(expr, SymExpr::Primary(_)) {
        return None;
    }

    let symbols = expr.free_symbols();
    let var = match symbols.iter().next() {
        Some(var) if symbols.len() == 1 => var.as_str(),
        _ => return None,
    };

    let (reduced, cancelled) = RationalFn::from_expr(expr, var)?.reduce()?;
    let candidate = reduced.to_expr(var);
    if candidate != *expr && (cancelled > 0 || complexity(&candidate) < complexity(expr)) {
        Some(candidate)
    } else {
        None
    }
}

/// Rebuilds `expr` bottom-up, cancelling every subexpression that [`cancel`] accepts.
fn cancel_children<F>(expr: &SymExpr, complexity: F, changed: &mut bool) -> SymExpr
where
    F: Copy + Fn(&SymExpr) -> usize,
{
    let rebuilt = match expr {
        SymExpr::Primary(Primary::Call(name, args)) => SymExpr::call(
            name.clone(),
            args.iter().map(|arg| cancel_children(arg, complexity, changed)).collect(),
        ),
        SymExpr::Primary(_) => return expr.clone(),
        SymExpr::Add(terms) => SymExpr::Add(
            terms.iter().map(|term| cancel_children(term, complexity, changed)).collect()
        ),
        SymExpr::Mul(factors) => SymExpr::Mul(
            factors.iter().map(|factor| cancel_children(factor, complexity, changed)).collect()
        ),
        SymExpr::Exp(base, exp) => SymExpr::pow(
            cancel_children(base, complexity, changed),
            cancel_children(exp, complexity, changed),
        ),
    };

    match cancel(&rebuilt, complexity) {
        Some(cancelled) => {
            *changed = true;
            cancelled
        },
        None => rebuilt,
    }
}

/// Cancels common polynomial factors throughout the expression. Returns [`None`] if nothing was
/// cancelled.
pub(crate) fn cancel_all<F>(expr: &SymExpr, complexity: F) -> Option<SymExpr>
where
    F: Copy + Fn(&SymExpr) -> usize,
{
    let mut changed = false;
    let result = cancel_children(expr, complexity, &mut changed);
    changed.then_some(result)
}

#[cfg(test)]
mod tests {
    use crate::symbolic::simplify::default_complexity;
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> SymExpr {
        SymExpr::symbol("x")
    }

    fn poly(coefficients: &[i32]) -> Poly {
        Poly::new(coefficients.iter().map(|c| rat(*c)).collect())
    }

    #[test]
    fn long_division() {
        // (x^2 - 1) / (x - 1) = x + 1
        let (quotient, remainder) = poly(&[-1, 0, 1]).div_rem(&poly(&[-1, 1])).unwrap();
        assert_eq!(quotient, poly(&[1, 1]));
        assert!(remainder.is_zero());
    }

    #[test]
    fn gcd_is_monic() {
        // gcd(2x^2 - 2, 3x - 3) = x - 1
        assert_eq!(poly(&[-2, 0, 2]).gcd(&poly(&[-3, 3])), poly(&[-1, 1]));
    }

    #[test]
    fn cancel_difference_of_squares() {
        let expr = make_fraction(
            SymExpr::Add(vec![SymExpr::pow(x(), SymExpr::number(2)), SymExpr::number(-1)]),
            SymExpr::Add(vec![x(), SymExpr::number(-1)]),
        );
        assert_eq!(
            cancel_all(&expr, default_complexity),
            Some(SymExpr::Add(vec![x(), SymExpr::number(1)])),
        );
    }

    #[test]
    fn expanded_square_cancels_to_zero() {
        // (x + 1)^2 - x^2 - 2x - 1
        let expr = SymExpr::Add(vec![
            SymExpr::pow(SymExpr::Add(vec![x(), SymExpr::number(1)]), SymExpr::number(2)),
            SymExpr::Mul(vec![SymExpr::number(-1), SymExpr::pow(x(), SymExpr::number(2))]),
            SymExpr::Mul(vec![SymExpr::number(-2), x()]),
            SymExpr::number(-1),
        ]);
        assert_eq!(cancel_all(&expr, default_complexity), Some(SymExpr::number(0)));
    }

    #[test]
    fn square_is_not_expanded() {
        let expr = SymExpr::pow(SymExpr::Add(vec![x(), SymExpr::number(1)]), SymExpr::number(2));
        assert_eq!(cancel_all(&expr, default_complexity), None);
    }

    #[test]
    fn several_variables_are_left_alone() {
        let expr = make_fraction(
            SymExpr::Add(vec![x(), SymExpr::symbol("y")]),
            SymExpr::Add(vec![x(), SymExpr::symbol("y")]),
        );
        assert_eq!(cancel_all(&expr, default_complexity), None);
    }
}
