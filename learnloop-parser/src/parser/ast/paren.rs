use crate::parser::{
    ast::expr::Expr,
    error::{kind, Error},
    token::{CloseParen, OpenParen},
    Parse,
    Parser,
};
use std::{fmt, ops::Range};

/// A parenthesized expression. A [`Paren`] can only contain a single expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Paren {
    /// The inner expression.
    pub expr: Box<Expr>,

    /// The region of the source code that this [`Paren`] was parsed from.
    pub span: Range<usize>,
}

impl Paren {
    /// Returns the span of the parenthesized expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns the innermost expression in the parenthesized expression.
    pub fn innermost(&self) -> &Expr {
        let mut inner = &self.expr;
        while let Expr::Paren(paren) = inner.as_ref() {
            inner = &paren.expr;
        }
        inner
    }
}

impl Parse for Paren {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let open_paren = input.try_parse::<OpenParen>()?;

        if let Ok(close_paren) = input.try_parse::<CloseParen>() {
            return Err(Error::new_fatal(
                vec![open_paren.span.start..close_paren.span.end],
                kind::EmptyParenthesis,
            ));
        }

        let expr = input.try_parse_nested(|input| input.try_parse::<Expr>())?;
        let close_paren = input.try_parse::<CloseParen>()
            .map_err(|_| Error::new_fatal(
                vec![open_paren.span.clone()],
                kind::UnclosedParenthesis { opening: true },
            ))?;

        Ok(Self {
            expr: Box::new(expr),
            span: open_paren.span.start..close_paren.span.end,
        })
    }
}

impl fmt::Display for Paren {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(")?;
        self.expr.fmt(f)?;
        write!(f, ")")
    }
}
