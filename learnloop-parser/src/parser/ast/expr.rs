use crate::{
    parser::{
        ast::{
            binary::Binary,
            call::Call,
            literal::Literal,
            paren::Paren,
            unary::Unary,
        },
        error::{kind, Error},
        token::CloseParen,
        Parse,
        Parser,
        Precedence,
    },
    try_parse_catch_fatal,
};
use std::{fmt, ops::Range};

/// Represents any kind of expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value.
    Literal(Literal),

    /// A parenthesized expression, such as `(1 + 2)`.
    Paren(Paren),

    /// A function call, such as `sin(x)`.
    Call(Call),

    /// A unary operation, such as `-1` or `3!`.
    Unary(Unary),

    /// A binary operation, such as `1 + 2`.
    Binary(Binary),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Expr::Literal(literal) => literal.span(),
            Expr::Paren(paren) => paren.span(),
            Expr::Call(call) => call.span(),
            Expr::Unary(unary) => unary.span(),
            Expr::Binary(binary) => binary.span(),
        }
    }

    /// If this expression is an [`Expr::Paren`], returns the innermost expression in the
    /// parenthesized expression. Otherwise, returns `self`.
    pub fn innermost(&self) -> &Expr {
        let mut inner = self;
        while let Expr::Paren(paren) = inner {
            inner = &paren.expr;
        }
        inner
    }
}

impl Parse for Expr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        if input.clone().try_parse::<CloseParen>().is_ok() {
            return Err(input.error(kind::UnclosedParenthesis { opening: false }));
        }

        let lhs = Unary::parse_or_lower(input)?;
        Ok(Binary::parse_expr(input, lhs, Precedence::Any)?.0)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Literal(literal) => literal.fmt(f),
            Expr::Paren(paren) => paren.fmt(f),
            Expr::Call(call) => call.fmt(f),
            Expr::Unary(unary) => unary.fmt(f),
            Expr::Binary(binary) => binary.fmt(f),
        }
    }
}

/// Represents a primary expression: an operand that binds tighter than any operator.
#[derive(Debug, Clone, PartialEq)]
pub enum Primary {
    Literal(Literal),
    Paren(Paren),
    Call(Call),
}

impl Primary {
    /// Returns the span of the primary expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Primary::Literal(literal) => literal.span(),
            Primary::Paren(paren) => paren.span(),
            Primary::Call(call) => call.span(),
        }
    }
}

impl Parse for Primary {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        // function calls must be tried before symbols, since both start with a name
        let err = try_parse_catch_fatal!(
            input.try_parse::<Call>().map(Primary::Call),
            input.try_parse::<Literal>().map(Primary::Literal),
            input.try_parse::<Paren>().map(Primary::Paren),
        );
        Err(err.unwrap_or_else(|| input.error(kind::NonFatal)))
    }
}

impl From<Primary> for Expr {
    fn from(primary: Primary) -> Self {
        match primary {
            Primary::Literal(literal) => Self::Literal(literal),
            Primary::Paren(paren) => Self::Paren(paren),
            Primary::Call(call) => Self::Call(call),
        }
    }
}
