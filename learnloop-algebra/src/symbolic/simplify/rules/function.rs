//! Simplification rules for known functions: exact values of the trigonometric functions at
//! multiples of `pi`, and identities of `log`, `exp`, `abs` and `factorial`.

use crate::primitive::{is_integer, rat};
use crate::symbolic::{
    expr::{SymExpr, Primary, E, PI},
    simplify::{rules::do_call, step::Step},
    step_collector::StepCollector,
};
use rug::{Integer, Rational};

/// Largest argument of `factorial` that is evaluated.
const MAX_FACTORIAL: u32 = 1000;

/// If the expression is a rational multiple of `pi`, returns the multiple.
///
/// - `0` -> `0`
/// - `pi` -> `1`
/// - `pi/6` -> `1/6`
fn pi_multiple(expr: &SymExpr) -> Option<Rational> {
    match expr {
        SymExpr::Primary(Primary::Number(num)) if *num == 0 => Some(rat(0)),
        SymExpr::Primary(Primary::Symbol(sym)) if sym == PI => Some(rat(1)),
        SymExpr::Mul(factors) => match factors.as_slice() {
            [a, b] | [b, a] if b.as_symbol() == Some(PI) => a.as_number().cloned(),
            _ => None,
        },
        _ => None,
    }
}

/// Returns `coefficient * n^(1/2)`.
fn scaled_sqrt(coefficient: (i32, i32), n: i32) -> SymExpr {
    SymExpr::Mul(vec![SymExpr::number(coefficient), SymExpr::number(n).sqrt()])
}

/// Returns `x - floor(x / period) * period`, which lies in `[0, period)`.
fn reduce(x: &Rational, period: i32) -> Rational {
    let turns = Rational::from(x / period).floor();
    x.clone() - turns * period
}

/// `sin(t*pi)` for `t` in `[0, 1/2]`.
fn sin_first_quadrant(t: &Rational) -> Option<SymExpr> {
    if *t == 0 {
        return Some(SymExpr::number(0));
    }

    match (t.numer().to_i32()?, t.denom().to_i32()?) {
        (1, 6) => Some(SymExpr::number((1, 2))),
        (1, 4) => Some(scaled_sqrt((1, 2), 2)),
        (1, 3) => Some(scaled_sqrt((1, 2), 3)),
        (1, 2) => Some(SymExpr::number(1)),
        _ => None,
    }
}

/// `sin(r*pi)`, using the symmetries of the sine function to reduce `r` to `[0, 1/2]`.
fn sin_of_pi_multiple(r: &Rational) -> Option<SymExpr> {
    let mut t = reduce(r, 2);
    let negate = t >= 1;
    if negate {
        t -= 1;
    }
    if t > rat((1, 2)) {
        t = rat(1) - t;
    }

    let value = sin_first_quadrant(&t)?;
    Some(if negate { -value } else { value })
}

/// `tan(r*pi)`. Returns [`None`] at the poles.
fn tan_of_pi_multiple(r: &Rational) -> Option<SymExpr> {
    let mut t = reduce(r, 1);
    let negate = t > rat((1, 2));
    if negate {
        t = rat(1) - t;
    }

    let value = if t == 0 {
        SymExpr::number(0)
    } else {
        match (t.numer().to_i32()?, t.denom().to_i32()?) {
            (1, 6) => scaled_sqrt((1, 3), 3),
            (1, 4) => SymExpr::number(1),
            (1, 3) => SymExpr::number(3).sqrt(),
            _ => return None,
        }
    };
    Some(if negate { -value } else { value })
}

/// `sin(x)`
pub fn sin(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, "sin", |args| {
        sin_of_pi_multiple(&pi_multiple(args.first()?)?)
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::Sin);
    Some(opt)
}

/// `cos(x) = sin(x + pi/2)`
pub fn cos(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, "cos", |args| {
        let r = pi_multiple(args.first()?)?;
        sin_of_pi_multiple(&(r + rat((1, 2))))
    })?;

    step_collector.push(Step::Cos);
    Some(opt)
}

/// `tan(x)`
pub fn tan(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, "tan", |args| {
        tan_of_pi_multiple(&pi_multiple(args.first()?)?)
    })?;

    step_collector.push(Step::Tan);
    Some(opt)
}

/// `log(1) = 0`
/// `log(E) = 1`
pub fn log(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, "log", |args| {
        match args {
            [arg] if arg.is_one() => Some(SymExpr::number(0)),
            [arg] if arg.as_symbol() == Some(E) => Some(SymExpr::number(1)),
            _ => None,
        }
    })?;

    step_collector.push(Step::Log);
    Some(opt)
}

/// `exp(0) = 1`
/// `exp(1) = E`
/// `exp(log(a)) = a`
pub fn exp(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, "exp", |args| {
        match args {
            [arg] if arg.is_zero() => Some(SymExpr::number(1)),
            [arg] if arg.is_one() => Some(SymExpr::symbol(E)),
            [arg] => arg.as_call("log")
                .and_then(|inner| match inner {
                    [inner] => Some(inner.clone()),
                    _ => None,
                }),
            _ => None,
        }
    })?;

    step_collector.push(Step::Exp);
    Some(opt)
}

/// `abs(-3) = 3`
pub fn abs(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, "abs", |args| {
        let num = args.first()?.as_number()?;
        Some(SymExpr::Primary(Primary::Number(num.clone().abs())))
    })?;

    step_collector.push(Step::Abs);
    Some(opt)
}

/// `3! = 6`
pub fn factorial(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, "factorial", |args| {
        let num = args.first()?.as_number().filter(|num| is_integer(num))?;
        let n = num.numer().to_u32().filter(|n| *n <= MAX_FACTORIAL)?;
        Some(SymExpr::Primary(Primary::Number(Rational::from(Integer::from(Integer::factorial(n))))))
    })?;

    step_collector.push(Step::Factorial);
    Some(opt)
}

/// Applies all function rules.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    sin(expr, step_collector)
        .or_else(|| cos(expr, step_collector))
        .or_else(|| tan(expr, step_collector))
        .or_else(|| log(expr, step_collector))
        .or_else(|| exp(expr, step_collector))
        .or_else(|| abs(expr, step_collector))
        .or_else(|| factorial(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn call(name: &str, arg: SymExpr) -> SymExpr {
        SymExpr::call(name, vec![arg])
    }

    fn pi_times(n: i32, d: i32) -> SymExpr {
        SymExpr::Mul(vec![SymExpr::number((n, d)), SymExpr::symbol(PI)])
    }

    #[test]
    fn sin_values() {
        assert_eq!(sin(&call("sin", SymExpr::number(0)), &mut ()), Some(SymExpr::number(0)));
        assert_eq!(sin(&call("sin", SymExpr::symbol(PI)), &mut ()), Some(SymExpr::number(0)));
        assert_eq!(sin(&call("sin", pi_times(1, 6)), &mut ()), Some(SymExpr::number((1, 2))));
        assert_eq!(sin(&call("sin", pi_times(3, 2)), &mut ()), Some(SymExpr::number(-1)));
        assert_eq!(sin(&call("sin", pi_times(1, 4)), &mut ()), Some(scaled_sqrt((1, 2), 2)));
        assert_eq!(sin(&call("sin", pi_times(1, 5)), &mut ()), None);
        assert_eq!(sin(&call("sin", SymExpr::symbol("x")), &mut ()), None);
    }

    #[test]
    fn cos_values() {
        assert_eq!(cos(&call("cos", SymExpr::number(0)), &mut ()), Some(SymExpr::number(1)));
        assert_eq!(cos(&call("cos", SymExpr::symbol(PI)), &mut ()), Some(SymExpr::number(-1)));
        assert_eq!(cos(&call("cos", pi_times(1, 3)), &mut ()), Some(SymExpr::number((1, 2))));
        assert_eq!(cos(&call("cos", pi_times(-1, 2)), &mut ()), Some(SymExpr::number(0)));
    }

    #[test]
    fn tan_values() {
        assert_eq!(tan(&call("tan", pi_times(1, 4)), &mut ()), Some(SymExpr::number(1)));
        assert_eq!(tan(&call("tan", pi_times(3, 4)), &mut ()), Some(SymExpr::number(-1)));
        assert_eq!(tan(&call("tan", pi_times(1, 2)), &mut ()), None);
    }

    #[test]
    fn log_and_exp() {
        assert_eq!(log(&call("log", SymExpr::number(1)), &mut ()), Some(SymExpr::number(0)));
        assert_eq!(log(&call("log", SymExpr::symbol(E)), &mut ()), Some(SymExpr::number(1)));
        assert_eq!(exp(&call("exp", SymExpr::number(0)), &mut ()), Some(SymExpr::number(1)));

        let x = SymExpr::symbol("x");
        assert_eq!(exp(&call("exp", call("log", x.clone())), &mut ()), Some(x));
    }

    #[test]
    fn abs_and_factorial() {
        assert_eq!(abs(&call("abs", SymExpr::number(-3)), &mut ()), Some(SymExpr::number(3)));
        assert_eq!(factorial(&call("factorial", SymExpr::number(5)), &mut ()), Some(SymExpr::number(120)));
        assert_eq!(factorial(&call("factorial", SymExpr::number(100_000)), &mut ()), None);
    }
}
