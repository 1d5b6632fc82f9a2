//! A top-level formula: either a single expression, or an equation between two expressions.

use crate::latex::Latex;
use crate::symbolic::{derivative, integral, simplify, SymExpr};
use learnloop_error::Error;
use learnloop_parser::parser::{ast::Expr as AstExpr, token::op::BinOpKind, Parser};
use std::{collections::BTreeSet, fmt};

/// An expression, or an equation `lhs = rhs`.
#[derive(Debug, Clone, PartialEq)]
pub enum Formula {
    /// A single expression, such as `x^2 + 1`.
    Expr(SymExpr),

    /// An equation, such as `2x = 4`.
    Equation(SymExpr, SymExpr),
}

/// The result of simplifying a [`Formula`].
#[derive(Debug, Clone, PartialEq)]
pub enum Simplified {
    /// The simplified expression.
    Expr(SymExpr),

    /// An equation whose sides could not be decided; both sides are simplified.
    Equation(SymExpr, SymExpr),

    /// An equation whose sides differ by a number: `True` if the difference is zero.
    Bool(bool),
}

impl Formula {
    /// Parses and converts the given source into a formula.
    pub fn parse(input: &str) -> Result<Self, Error> {
        let ast = Parser::new(input).try_parse_full::<AstExpr>()?;
        Self::try_from_ast(&ast)
    }

    /// Converts a parsed expression into a formula. An `=` is only accepted at the top level.
    pub fn try_from_ast(expr: &AstExpr) -> Result<Self, Error> {
        match expr.innermost() {
            AstExpr::Binary(bin) if bin.op.kind == BinOpKind::Eq => Ok(Self::Equation(
                SymExpr::try_from_ast(&bin.lhs)?,
                SymExpr::try_from_ast(&bin.rhs)?,
            )),
            expr => SymExpr::try_from_ast(expr).map(Self::Expr),
        }
    }

    /// Returns the variables appearing anywhere in the formula, in alphabetical order.
    pub fn free_symbols(&self) -> BTreeSet<String> {
        match self {
            Self::Expr(expr) => expr.free_symbols(),
            Self::Equation(lhs, rhs) => {
                let mut symbols = lhs.free_symbols();
                symbols.extend(rhs.free_symbols());
                symbols
            },
        }
    }

    /// Simplifies the formula. Both sides of an equation are simplified, and the equation is
    /// decided if their difference simplifies to a number.
    pub fn simplify(&self) -> Result<Simplified, Error> {
        match self {
            Self::Expr(expr) => simplify(expr).map(Simplified::Expr),
            Self::Equation(lhs, rhs) => {
                let difference = simplify(&(lhs.clone() + -rhs.clone()))?;
                if let Some(num) = difference.as_number() {
                    return Ok(Simplified::Bool(*num == 0));
                }
                Ok(Simplified::Equation(simplify(lhs)?, simplify(rhs)?))
            },
        }
    }

    /// Applies `op` to the expression, or to both sides of the equation.
    fn map_sides<F>(&self, op: F) -> Result<Self, Error>
    where
        F: Fn(&SymExpr) -> Result<SymExpr, Error>,
    {
        match self {
            Self::Expr(expr) => op(expr).map(Self::Expr),
            Self::Equation(lhs, rhs) => Ok(Self::Equation(op(lhs)?, op(rhs)?)),
        }
    }

    /// Differentiates the formula with respect to `var`. For an equation, both sides are
    /// differentiated. The result is not simplified.
    pub fn derive(&self, var: &str) -> Result<Self, Error> {
        self.map_sides(|expr| derivative(expr, var))
    }

    /// Integrates the formula with respect to `var`, without a constant of integration. Each side
    /// is simplified first so that the integration rules see a canonical form. The result itself
    /// is not simplified.
    pub fn integrate(&self, var: &str) -> Result<Self, Error> {
        self.map_sides(|expr| integral(&simplify(expr)?, var))
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expr(expr) => write!(f, "{}", expr),
            Self::Equation(lhs, rhs) => write!(f, "{} = {}", lhs, rhs),
        }
    }
}

impl fmt::Display for Simplified {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expr(expr) => write!(f, "{}", expr),
            Self::Equation(lhs, rhs) => write!(f, "{} = {}", lhs, rhs),
            Self::Bool(true) => write!(f, "True"),
            Self::Bool(false) => write!(f, "False"),
        }
    }
}

impl Latex for Simplified {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Expr(expr) => expr.fmt_latex(f),
            Self::Equation(lhs, rhs) => {
                lhs.fmt_latex(f)?;
                write!(f, " = ")?;
                rhs.fmt_latex(f)
            },
            Self::Bool(true) => write!(f, "\\text{{True}}"),
            Self::Bool(false) => write!(f, "\\text{{False}}"),
        }
    }
}
