use crate::parser::{
    ast::{expr::Expr, literal::LitSym},
    error::{kind, Error},
    token::{CloseParen, Comma, OpenParen},
    Parse,
    Parser,
};
use std::{fmt, ops::Range};

/// A function call, such as `sin(x)` or `log(x, 2)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    /// The name of the function to call.
    pub name: LitSym,

    /// The arguments to the function.
    pub args: Vec<Expr>,

    /// The region of the source code that this function call was parsed from.
    pub span: Range<usize>,

    /// The span of the parentheses that surround the arguments.
    pub paren_span: Range<usize>,
}

impl Call {
    /// Returns the span of the function call.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns a set of two spans, where the first is the span of the function name (with the
    /// opening parenthesis) and the second is the span of the closing parenthesis.
    pub fn outer_span(&self) -> [Range<usize>; 2] {
        [
            self.name.span.start..self.paren_span.start + 1,
            self.paren_span.end - 1..self.paren_span.end,
        ]
    }
}

impl Parse for Call {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let name = input.try_parse::<LitSym>()?;
        let open_paren = input.try_parse::<OpenParen>()?;

        let mut args = Vec::new();
        let close_paren = match input.try_parse::<CloseParen>() {
            Ok(close_paren) => close_paren,
            Err(_) => input.try_parse_nested(|input| {
                args.push(input.try_parse::<Expr>()?);
                while input.try_parse::<Comma>().is_ok() {
                    args.push(input.try_parse::<Expr>()?);
                }

                input.try_parse::<CloseParen>()
                    .map_err(|_| Error::new_fatal(
                        vec![open_paren.span.clone()],
                        kind::UnclosedParenthesis { opening: true },
                    ))
            })?,
        };

        Ok(Self {
            span: name.span.start..close_paren.span.end,
            name,
            args,
            paren_span: open_paren.span.start..close_paren.span.end,
        })
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.name.fmt(f)?;
        write!(f, "(")?;
        if let Some((last, args)) = self.args.split_last() {
            for arg in args {
                arg.fmt(f)?;
                write!(f, ", ")?;
            }
            last.fmt(f)?;
        }
        write!(f, ")")
    }
}
