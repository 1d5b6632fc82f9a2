use crate::{
    parser::{
        error::{kind, Error},
        token::{Float, Int, Name},
        Parse,
        Parser,
    },
    try_parse_catch_fatal,
};
use std::{fmt, ops::Range};

/// A number literal, such as `16` or `3.14`. The value is kept as written, so that the consumer
/// can convert it exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LitNum {
    /// The value of the number literal as a string.
    pub value: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl Parse for LitNum {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let err = try_parse_catch_fatal!(
            input.try_parse::<Int>().map(|int| Self { value: int.lexeme, span: int.span }),
            input.try_parse::<Float>().map(|float| Self { value: float.lexeme, span: float.span }),
        );
        Err(err.unwrap_or_else(|| input.error(kind::NonFatal)))
    }
}

impl fmt::Display for LitNum {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A symbol literal, such as `x` or `pi`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LitSym {
    /// The name of the symbol.
    pub name: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl Parse for LitSym {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        input
            .try_parse::<Name>()
            .map(|name| Self {
                name: name.lexeme,
                span: name.span,
            })
    }
}

impl fmt::Display for LitSym {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Represents a literal value in an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    /// A number literal.
    Number(LitNum),

    /// A symbol literal.
    Symbol(LitSym),
}

impl Literal {
    /// Returns the span of the literal.
    pub fn span(&self) -> Range<usize> {
        match self {
            Literal::Number(num) => num.span.clone(),
            Literal::Symbol(sym) => sym.span.clone(),
        }
    }
}

impl Parse for Literal {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let err = try_parse_catch_fatal!(
            input.try_parse::<LitNum>().map(Literal::Number),
            input.try_parse::<LitSym>().map(Literal::Symbol),
        );
        Err(err.unwrap_or_else(|| input.error(kind::NonFatal)))
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Literal::Number(num) => num.fmt(f),
            Literal::Symbol(sym) => sym.fmt(f),
        }
    }
}
