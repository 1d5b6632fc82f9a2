//! Symbolic derivatives of the known functions.

use crate::symbolic::SymExpr;

use super::MultBuilder;
use super::derivative;
use super::not_differentiable;
use learnloop_error::Error;

/// `1 - u^2` or `1 + u^2`, used by the inverse trigonometric functions.
fn one_plus_square(arg: &SymExpr, sign: i32) -> SymExpr {
    SymExpr::number(1)
        + SymExpr::number(sign) * SymExpr::pow(arg.clone(), SymExpr::number(2))
}

/// Computes the derivative of a supported function and performs the chain rule.
pub(super) fn function_derivative(
    call: &SymExpr,
    func: &str,
    args: &[SymExpr],
    with: &str,
) -> Result<SymExpr, Error> {
    let [arg] = args else {
        return Err(not_differentiable(call));
    };

    let mut mult_group = MultBuilder::default();
    mult_group.mult(derivative(arg, with)?);

    match func {
        "sin" => {
            mult_group.mult(SymExpr::call("cos", vec![arg.clone()]));
        },
        "cos" => {
            mult_group.mult(SymExpr::number(-1));
            mult_group.mult(SymExpr::call("sin", vec![arg.clone()]));
        },
        "tan" => {
            // tan(u)' = (tan(u)^2 + 1) * u'
            mult_group.mult(
                SymExpr::pow(SymExpr::call("tan", vec![arg.clone()]), SymExpr::number(2))
                    + SymExpr::number(1),
            );
        },
        "log" => {
            mult_group.mult(SymExpr::pow(arg.clone(), SymExpr::number(-1)));
        },
        "exp" => {
            mult_group.mult(SymExpr::call("exp", vec![arg.clone()]));
        },
        "asin" => {
            mult_group.mult(SymExpr::pow(one_plus_square(arg, -1), SymExpr::number((-1, 2))));
        },
        "acos" => {
            mult_group.mult(SymExpr::number(-1));
            mult_group.mult(SymExpr::pow(one_plus_square(arg, -1), SymExpr::number((-1, 2))));
        },
        "atan" => {
            mult_group.mult(SymExpr::pow(one_plus_square(arg, 1), SymExpr::number(-1)));
        },
        "sinh" => {
            mult_group.mult(SymExpr::call("cosh", vec![arg.clone()]));
        },
        "cosh" => {
            mult_group.mult(SymExpr::call("sinh", vec![arg.clone()]));
        },
        _ => return Err(not_differentiable(call)),
    };

    Ok(mult_group.into())
}

#[cfg(test)]
mod tests {
    use crate::symbolic::simplify;
    use pretty_assertions::assert_eq;
    use super::*;

    fn d(func: &str) -> String {
        let call = SymExpr::call(func, vec![SymExpr::symbol("x")]);
        simplify(&derivative(&call, "x").unwrap()).unwrap().to_string()
    }

    #[test]
    fn trigonometric() {
        assert_eq!(d("sin"), "cos(x)");
        assert_eq!(d("cos"), "-1 * sin(x)");
        assert_eq!(d("tan"), "tan(x)^2 + 1");
    }

    #[test]
    fn logarithm() {
        assert_eq!(d("log"), "x^(-1)");
    }

    #[test]
    fn inverse_tangent() {
        assert_eq!(d("atan"), "(x^2 + 1)^(-1)");
    }

    #[test]
    fn absolute_value_is_not_differentiable() {
        let call = SymExpr::call("abs", vec![SymExpr::symbol("x")]);
        assert_eq!(
            derivative(&call, "x").unwrap_err().message(),
            "cannot differentiate `abs(x)`",
        );
    }
}
