use crate::{
    parser::{
        ast::{binary::Binary, expr::{Expr, Primary}},
        error::{kind, Error},
        token::op::UnaryOp,
        Associativity,
        Parser,
    },
    try_parse_catch_fatal,
};
use std::{fmt, ops::Range};

/// Attempt to parse a unary operator with the correct associativity. Returns a non-fatal error if
/// the operator is not of the correct associativity.
fn try_parse_unary_op(input: &mut Parser, associativity: Associativity) -> Result<UnaryOp, Error> {
    input.try_parse_then::<UnaryOp, _>(|op, input| {
        if op.associativity() == associativity {
            Ok(())
        } else {
            Err(input.error(kind::NonFatal))
        }
    })
}

/// A unary expression, such as `-x` or `3!`. Unary expressions can include nested expressions.
///
/// Unary expressions do not implement [`Parse`] directly, since left-associative operators must
/// be parsed after their operand. Use [`Unary::parse_or_lower`] instead.
///
/// [`Parse`]: crate::parser::Parse
#[derive(Debug, Clone, PartialEq)]
pub struct Unary {
    /// The operand of the unary expression (left or right, depending on the associativity).
    pub operand: Box<Expr>,

    /// The operator of the unary expression.
    pub op: UnaryOp,

    /// The region of the source code that this unary expression was parsed from.
    pub span: Range<usize>,
}

impl Unary {
    /// Returns the span of the unary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parse a unary expression with right-associativity.
    pub fn parse_right(input: &mut Parser) -> Result<Self, Error> {
        let op = try_parse_unary_op(input, Associativity::Right)?;
        let op_precedence = op.precedence();
        let start_span = op.span.start;
        let operand = input.try_parse_nested(|input| {
            let lhs = Unary::parse_or_lower(input)?;
            Ok(Binary::parse_expr(input, lhs, op_precedence)?.0)
        })?;
        let end_span = operand.span().end;
        Ok(Self {
            operand: Box::new(operand),
            op,
            span: start_span..end_span,
        })
    }

    /// Parse a unary expression with left-associativity.
    ///
    /// The operand has to be parsed first. If no operator follows it, the operand is returned on
    /// its own instead of backtracking and parsing it again.
    pub fn parse_left_or_operand(input: &mut Parser) -> Result<Expr, Error> {
        let operand = input.try_parse::<Primary>()?;
        let start_span = operand.span().start;

        // one operator must be present
        let op = match try_parse_unary_op(input, Associativity::Left) {
            Ok(op) => op,
            Err(_) => return Ok(operand.into()),
        };
        let mut result = Self {
            operand: Box::new(operand.into()),
            span: start_span..op.span.end,
            op,
        };

        // iteratively find any other left-associative operators
        let mut levels = 1;
        while let Ok(next_op) = try_parse_unary_op(input, Associativity::Left) {
            levels += 1;
            input.check_depth(levels)?;
            result = Self {
                operand: Box::new(Expr::Unary(result)),
                span: start_span..next_op.span.end,
                op: next_op,
            };
        }

        Ok(Expr::Unary(result))
    }

    /// Parses a unary expression, or lower precedence expressions.
    pub fn parse_or_lower(input: &mut Parser) -> Result<Expr, Error> {
        let _ = try_parse_catch_fatal!(
            input.try_parse_with_fn(Self::parse_right).map(Expr::Unary),
        );
        Self::parse_left_or_operand(input)
    }
}

impl fmt::Display for Unary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.op.associativity() {
            Associativity::Left => {
                self.operand.fmt(f)?;
                self.op.fmt(f)
            },
            Associativity::Right => {
                self.op.fmt(f)?;
                self.operand.fmt(f)
            },
        }
    }
}
