use crate::parser::{
    ast::{expr::Expr, literal::Literal, unary::Unary},
    error::{kind, Error},
    token::op::{BinOp, BinOpKind},
    Associativity,
    Precedence,
    Parser,
};
use std::{fmt, ops::Range};

/// A binary operator that was either written out or implied.
#[derive(Debug, Clone, PartialEq)]
enum BinOpExt {
    /// A binary operator, such as `+` or `*`.
    Op(BinOp),

    /// Implicit multiplication, such as `2x` or `3(x + 1)`.
    ///
    /// This is not a real operator, but it is treated as one for the purposes of parsing.
    ImplicitMultiplication,
}

impl BinOpExt {
    /// Returns the precedence of the binary operator.
    fn precedence(&self) -> Precedence {
        match self {
            BinOpExt::Op(op) => op.precedence(),
            BinOpExt::ImplicitMultiplication => Precedence::Factor,
        }
    }
}

/// Returns the operand written last in `expr`, such as `x` in `2 + 3x`.
fn rightmost(mut expr: &Expr) -> &Expr {
    loop {
        match expr {
            Expr::Binary(binary) => expr = &*binary.rhs,
            Expr::Unary(unary) if unary.op.associativity() == Associativity::Right => expr = &*unary.operand,
            _ => return expr,
        }
    }
}

/// Returns the operand written first in `expr`, such as `x` in `x^2!`.
fn leftmost(mut expr: &Expr) -> &Expr {
    loop {
        match expr {
            Expr::Binary(binary) => expr = &*binary.lhs,
            Expr::Unary(unary) if unary.op.associativity() == Associativity::Left => expr = &*unary.operand,
            _ => return expr,
        }
    }
}

/// Returns true if the name is a single letter, optionally with a subscript, such as `x` or
/// `x_1`, or the constant `pi`.
fn is_letter(name: &str) -> bool {
    let mut chars = name.chars();
    name == "pi"
        || chars.next().is_some_and(|c| c.is_ascii_alphabetic()) && matches!(chars.next(), None | Some('_'))
}

/// Returns true if `lhs` directly followed by `rhs` is an implicit multiplication.
///
/// Numbers, parentheses, function calls and factorials can be followed by any operand, as in `2x`
/// or `(x + 1)y`. A symbol can only be followed by a single-letter symbol or a function call, as
/// in `x y` or `a sin(x)`, so that the words of a sentence are never multiplied together.
fn is_implicit_product(lhs: &Expr, rhs: &Expr) -> bool {
    match rightmost(lhs) {
        Expr::Literal(Literal::Symbol(sym)) if is_letter(&sym.name) => match leftmost(rhs) {
            Expr::Literal(Literal::Symbol(sym)) => is_letter(&sym.name),
            Expr::Literal(Literal::Number(_)) => false,
            _ => true,
        },
        Expr::Literal(Literal::Symbol(_)) => false,
        _ => true,
    }
}

/// A binary expression, such as `1 + 2`. Binary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    /// The left-hand side of the binary expression.
    pub lhs: Box<Expr>,

    /// The operator of the binary expression.
    pub op: BinOp,

    /// The right-hand side of the binary expression.
    pub rhs: Box<Expr>,

    /// The region of the source code that this binary expression was parsed from.
    pub span: Range<usize>,
}

impl Binary {
    /// Returns the span of the binary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// After parsing the left-hand-side, the operator, and the right-hand-side of a potential
    /// binary expression, parse ahead to see if the right-hand-side is incomplete.
    ///
    /// In `1 + 2 * 3`, the right-hand-side of `+` starts as `2`. The operator after it binds
    /// tighter, so the expression starting at `2` is parsed first and `2 * 3` becomes the
    /// right-hand-side. In `3 * 2 + 1`, the node `3 * 2` is built first and [`Self::parse_expr`]
    /// picks up `+ 1` afterwards.
    ///
    /// When no operator follows the right-hand-side, implicit multiplication is assumed if an
    /// operand follows instead. [`Self::parse_expr`] reports whether it consumed anything; if it
    /// did not, there is nothing left to multiply and the loop ends.
    fn complete_rhs(input: &mut Parser, lhs: Expr, op: BinOpExt, mut rhs: Expr) -> Result<Expr, Error> {
        let precedence = op.precedence();

        loop {
            // clone the input stream to emulate peeking
            let mut input_ahead = input.clone();
            if let Ok(next_op) = input_ahead.try_parse::<BinOp>() {
                if next_op.precedence() > precedence || next_op.associativity() == Associativity::Right {
                    // this operator binds tighter, or is right associative: parse its expression
                    // starting with `rhs` first
                    rhs = input.try_parse_nested(|input| {
                        Ok(Self::parse_expr(input, rhs, next_op.precedence())?.0)
                    })?;
                } else {
                    // lower precedence, or equal precedence and left-associativity, such as
                    // `1 * 2 + 3` or `1 * 2 * 3`; let `lhs op rhs` be built first
                    break;
                }
            } else {
                // no operator; this could be implicit multiplication, unless the previous operator
                // binds at least as tightly as multiplication
                if precedence >= Precedence::Factor {
                    break;
                }

                let (expr, changed) = Self::parse_expr(input, rhs, Precedence::Factor)?;
                rhs = expr;

                if !changed {
                    break;
                }
            }
        }

        let (start_span, end_span) = (lhs.span().start, rhs.span().end);
        let op = match op {
            BinOpExt::Op(op) => op,
            BinOpExt::ImplicitMultiplication => BinOp {
                kind: BinOpKind::Mul,
                implicit: true,
                span: lhs.span().end..rhs.span().start,
            },
        };

        Ok(Expr::Binary(Binary {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
            span: start_span..end_span,
        }))
    }

    /// After parsing the left-hand-side of a potential binary expression, parse ahead to see if
    /// there is a binary operator and a right-hand-side.
    ///
    /// The returned boolean is true if anything was parsed after `lhs`.
    pub fn parse_expr(input: &mut Parser, mut lhs: Expr, precedence: Precedence) -> Result<(Expr, bool), Error> {
        let mut changed = false;
        loop {
            let mut input_ahead = input.clone();
            if let Ok(op) = input_ahead.try_parse_then::<BinOp, _>(|bin_op, input| {
                if bin_op.precedence() >= precedence {
                    Ok(())
                } else {
                    Err(input.error(kind::NonFatal))
                }
            }) {
                input.set_cursor(&input_ahead);
                let rhs = Unary::parse_or_lower(input)?;
                lhs = Self::complete_rhs(input, lhs, BinOpExt::Op(op), rhs)?;
            } else if Precedence::Factor >= precedence {
                // ensure that we get here because there is *no* operator, not because the operator
                // has lower precedence
                if input_ahead.clone().try_parse::<BinOp>().is_ok() {
                    break;
                }

                let rhs = match Unary::parse_or_lower(&mut input_ahead) {
                    Ok(rhs) => rhs,
                    Err(err) if err.fatal => return Err(err),
                    Err(_) => break,
                };
                if !is_implicit_product(&lhs, &rhs) {
                    break;
                }

                input.set_cursor(&input_ahead);
                lhs = Self::complete_rhs(input, lhs, BinOpExt::ImplicitMultiplication, rhs)?;
            } else {
                break;
            }

            changed = true;
        }

        Ok((lhs, changed))
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.lhs.fmt(f)?;
        self.op.fmt(f)?;
        self.rhs.fmt(f)
    }
}
