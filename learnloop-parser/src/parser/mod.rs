pub mod ast;
pub mod error;
pub mod token;

use error::{Error, kind};
use learnloop_error::ErrorKind;
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use std::{ops::Range, rc::Rc};

/// The deepest that parentheses, function calls and operators can nest inside one another.
pub const MAX_DEPTH: usize = 32;

/// Attempts to parse a value from the given stream of tokens, using multiple parsing functions
/// in order. The first function that succeeds is used to parse the value.
///
/// This macro can also catch fatal errors and immediately short-circuit the parsing process.
///
/// If parsing is successful, the value is returned from the enclosing function. Otherwise, the
/// error of the last attempted parsing function is the value of the macro invocation.
#[macro_export]
macro_rules! try_parse_catch_fatal {
    ($($expr:expr),+ $(,)?) => {{
        let mut last_err = None;
        $(
            match $expr {
                Ok(value) => return Ok(value),
                Err(err) if err.fatal => return Err(err),
                // ignore this error and try the next parser, or return it
                Err(err) => last_err = Some(err),
            }
        )+
        last_err
    }};
}

/// A high-level parser for math expressions. This is the type to use to parse an arbitrary piece
/// of text into an abstract syntax tree.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing. Shared between clones of the parser.
    tokens: Rc<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,

    /// How many nested expressions enclose the cursor.
    depth: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source).into(),
            cursor: 0,
            depth: 0,
        }
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Creates a fatal error that points at the current token, or the end of the source code if
    /// the cursor is at the end of the stream.
    pub fn error_fatal(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new_fatal(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the current non-whitespace token, or the end of the source code if
    /// there are no more tokens.
    pub fn span(&self) -> Range<usize> {
        self.tokens[self.cursor.min(self.tokens.len())..]
            .iter()
            .find(|token| !token.is_whitespace())
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Sets the cursor of this parser to the cursor of another parser over the same source.
    /// This is used to commit to a path that was explored on a clone of the parser.
    pub fn set_cursor(&mut self, other: &Parser) {
        self.cursor = other.cursor;
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        while self.cursor < self.tokens.len() {
            let token = &self.tokens[self.cursor];
            self.cursor += 1;
            if token.is_whitespace() {
                continue;
            } else {
                // cloning is cheap: only Range<_> is cloned
                return Ok(token.clone());
            }
        }

        Err(self.error(kind::UnexpectedEof))
    }

    /// Returns true if only whitespace remains in the stream.
    pub fn is_at_end(&self) -> bool {
        self.tokens[self.cursor.min(self.tokens.len())..]
            .iter()
            .all(Token::is_whitespace)
    }

    /// Speculatively parses a value from the given stream of tokens. This function can be used
    /// in the [`Parse::parse`] implementation of a type with the given [`Parser`], as it will
    /// automatically backtrack the cursor position if parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        self.try_parse_with_fn(T::parse)
    }

    /// Speculatively parses a value from the given stream of tokens, using a custom parsing
    /// function to parse the value.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        let start = self.cursor;
        match f(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Parses a value one level deeper in the expression tree, such as the inside of a pair of
    /// parentheses or the operand of a unary operator.
    ///
    /// Returns a fatal error if this would nest deeper than [`MAX_DEPTH`].
    pub fn try_parse_nested<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        if self.depth >= MAX_DEPTH {
            return Err(self.error_fatal(kind::NestingTooDeep));
        }

        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Returns a fatal error if `levels` more levels of nesting would be deeper than
    /// [`MAX_DEPTH`].
    pub fn check_depth(&self, levels: usize) -> Result<(), Error> {
        if self.depth + levels > MAX_DEPTH {
            Err(self.error_fatal(kind::NestingTooDeep))
        } else {
            Ok(())
        }
    }

    /// Speculatively parses a value from the given stream of tokens, with a validation predicate.
    /// The value must parse successfully, **and** the predicate must return [`Ok`] for this
    /// function to return successfully.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_then<T: Parse, F>(&mut self, predicate: F) -> Result<T, Error>
    where
        F: FnOnce(&T, &Parser) -> Result<(), Error>,
    {
        self.try_parse_with_fn(|input| {
            let value = T::parse(input)?;
            predicate(&value, input)?;
            Ok(value)
        })
    }

    /// Builds the error reported when tokens remain after a complete parse. A stray `)` is
    /// reported as an unbalanced parenthesis rather than as generic leftover input.
    fn leftover_error(&self) -> Error {
        let stray_paren = self.tokens[self.cursor.min(self.tokens.len())..]
            .iter()
            .find(|token| !token.is_whitespace())
            .is_some_and(|token| token.kind == TokenKind::CloseParen);

        if stray_paren {
            self.error(kind::UnclosedParenthesis { opening: false })
        } else {
            self.error(kind::ExpectedEof)
        }
    }

    /// Attempts to parse a value from the given stream of tokens. All the tokens must be consumed
    /// by the parser; if not, an error is returned.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        let value = T::parse(self)?;
        if self.is_at_end() {
            Ok(value)
        } else {
            Err(self.leftover_error())
        }
    }

    /// Attempts to parse one or more values, each delimited by a token of the given kind. All the
    /// tokens must be consumed by the parser; if not, an error is returned.
    pub fn try_parse_full_delimited<T: Parse>(&mut self, delimiter: TokenKind) -> Result<Vec<T>, Error> {
        let mut values = vec![T::parse(self)?];

        loop {
            if self.is_at_end() {
                return Ok(values);
            }

            let token = self.next_token()?;
            if token.kind != delimiter {
                self.cursor -= 1;
                return Err(self.leftover_error());
            }

            values.push(T::parse(self)?);
        }
    }
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    ///
    /// This function should be used by consumers of the library.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

/// The associativity of a binary or unary operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    /// The binary / unary operation is left-associative.
    ///
    /// For binary operations, this means `a op b op c` is evaluated as `(a op b) op c`. For unary
    /// operations, this means `a op op` is evaluated as `(a op) op` (the operators appear to the
    /// right of the operand).
    Left,

    /// The binary / unary operation is right-associative.
    ///
    /// For binary operations, this means `a op b op c` is evaluated as `a op (b op c)`. For unary
    /// operations, this means `op op a` is evaluated as `op (op a)` (the operators appear to the
    /// left of the operand).
    Right,
}

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Any precedence.
    Any,

    /// Precedence of an equation (`=`).
    Equation,

    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (`*`) and division (`/`), which separate factors.
    Factor,

    /// Precedence of unary negation (`-`) and unary plus (`+`).
    Neg,

    /// Precedence of exponentiation (`^` or `**`).
    Exp,

    /// Precedence of factorial (`!`).
    Factorial,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use ast::{Binary, Call, Expr, Literal, LitNum, LitSym, Paren, Unary};
    use token::op::{BinOp, BinOpKind, UnaryOp, UnaryOpKind};

    fn num(value: &str, span: Range<usize>) -> Box<Expr> {
        Box::new(Expr::Literal(Literal::Number(LitNum { value: value.to_string(), span })))
    }

    fn sym(name: &str, span: Range<usize>) -> Box<Expr> {
        Box::new(Expr::Literal(Literal::Symbol(LitSym { name: name.to_string(), span })))
    }

    #[test]
    fn literal_int() {
        let mut parser = Parser::new("16");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, *num("16", 0..2));
    }

    #[test]
    fn literal_float() {
        let mut parser = Parser::new("3.14");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, *num("3.14", 0..4));
    }

    #[test]
    fn literal_symbol() {
        let mut parser = Parser::new("pi");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, *sym("pi", 0..2));
    }

    #[test]
    fn trailing_whitespace() {
        let mut parser = Parser::new("x   ");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, *sym("x", 0..1));
    }

    #[test]
    fn unary_left_associativity() {
        let mut parser = Parser::new("3!!");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Unary(Unary {
            operand: Box::new(Expr::Unary(Unary {
                operand: num("3", 0..1),
                op: UnaryOp { kind: UnaryOpKind::Factorial, span: 1..2 },
                span: 0..2,
            })),
            op: UnaryOp { kind: UnaryOpKind::Factorial, span: 2..3 },
            span: 0..3,
        }));
    }

    #[test]
    fn unary_right_associativity() {
        let mut parser = Parser::new("--3");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Unary(Unary {
            operand: Box::new(Expr::Unary(Unary {
                operand: num("3", 2..3),
                op: UnaryOp { kind: UnaryOpKind::Neg, span: 1..2 },
                span: 1..3,
            })),
            op: UnaryOp { kind: UnaryOpKind::Neg, span: 0..1 },
            span: 0..3,
        }));
    }

    #[test]
    fn negation_binds_looser_than_power() {
        let mut parser = Parser::new("-x^2");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Unary(Unary {
            operand: Box::new(Expr::Binary(Binary {
                lhs: sym("x", 1..2),
                op: BinOp { kind: BinOpKind::Exp, implicit: false, span: 2..3 },
                rhs: num("2", 3..4),
                span: 1..4,
            })),
            op: UnaryOp { kind: UnaryOpKind::Neg, span: 0..1 },
            span: 0..4,
        }));
    }

    #[test]
    fn binary_left_associativity() {
        let mut parser = Parser::new("3 - 2 - 1");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(Expr::Binary(Binary {
                lhs: num("3", 0..1),
                op: BinOp { kind: BinOpKind::Sub, implicit: false, span: 2..3 },
                rhs: num("2", 4..5),
                span: 0..5,
            })),
            op: BinOp { kind: BinOpKind::Sub, implicit: false, span: 6..7 },
            rhs: num("1", 8..9),
            span: 0..9,
        }));
    }

    #[test]
    fn binary_right_associativity() {
        let mut parser = Parser::new("2^3^4");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: num("2", 0..1),
            op: BinOp { kind: BinOpKind::Exp, implicit: false, span: 1..2 },
            rhs: Box::new(Expr::Binary(Binary {
                lhs: num("3", 2..3),
                op: BinOp { kind: BinOpKind::Exp, implicit: false, span: 3..4 },
                rhs: num("4", 4..5),
                span: 2..5,
            })),
            span: 0..5,
        }));
    }

    #[test]
    fn binary_mixed_precedence() {
        let mut parser = Parser::new("1 + 2 * 3");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: num("1", 0..1),
            op: BinOp { kind: BinOpKind::Add, implicit: false, span: 2..3 },
            rhs: Box::new(Expr::Binary(Binary {
                lhs: num("2", 4..5),
                op: BinOp { kind: BinOpKind::Mul, implicit: false, span: 6..7 },
                rhs: num("3", 8..9),
                span: 4..9,
            })),
            span: 0..9,
        }));
    }

    #[test]
    fn implicit_multiplication() {
        let mut parser = Parser::new("2x^2");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: num("2", 0..1),
            op: BinOp { kind: BinOpKind::Mul, implicit: true, span: 1..1 },
            rhs: Box::new(Expr::Binary(Binary {
                lhs: sym("x", 1..2),
                op: BinOp { kind: BinOpKind::Exp, implicit: false, span: 2..3 },
                rhs: num("2", 3..4),
                span: 1..4,
            })),
            span: 0..4,
        }));
    }

    #[test]
    fn implicit_multiplication_with_paren() {
        let mut parser = Parser::new("3(x + 1)");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: num("3", 0..1),
            op: BinOp { kind: BinOpKind::Mul, implicit: true, span: 1..1 },
            rhs: Box::new(Expr::Paren(Paren {
                expr: Box::new(Expr::Binary(Binary {
                    lhs: sym("x", 2..3),
                    op: BinOp { kind: BinOpKind::Add, implicit: false, span: 4..5 },
                    rhs: num("1", 6..7),
                    span: 2..7,
                })),
                span: 1..8,
            })),
            span: 0..8,
        }));
    }

    #[test]
    fn equation() {
        let mut parser = Parser::new("x = 2");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: sym("x", 0..1),
            op: BinOp { kind: BinOpKind::Eq, implicit: false, span: 2..3 },
            rhs: num("2", 4..5),
            span: 0..5,
        }));
    }

    #[test]
    fn function_call() {
        let mut parser = Parser::new("sin(x, 2)");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Call(Call {
            name: LitSym { name: "sin".to_string(), span: 0..3 },
            args: vec![*sym("x", 4..5), *num("2", 7..8)],
            span: 0..9,
            paren_span: 3..9,
        }));
    }

    #[test]
    fn delimited_list() {
        let mut parser = Parser::new("x^2 y, y");
        let exprs = parser.try_parse_full_delimited::<Expr>(TokenKind::Comma).unwrap();

        assert_eq!(exprs.len(), 2);
        assert_eq!(exprs[0].to_string(), "x^2y");
        assert_eq!(exprs[1], *sym("y", 7..8));
    }

    #[test]
    fn dangling_operator() {
        let mut parser = Parser::new("2+*");
        let err = parser.try_parse_full::<Expr>().unwrap_err();

        assert_eq!(err.message(), "unexpected token `*`");
        assert_eq!(err.spans, vec![2..3]);
    }

    #[test]
    fn trailing_operator() {
        let mut parser = Parser::new("2 +");
        let err = parser.try_parse_full::<Expr>().unwrap_err();

        assert_eq!(err.message(), "unexpected end of input");
    }

    #[test]
    fn unclosed_paren() {
        let mut parser = Parser::new("(x + 1");
        let err = parser.try_parse_full::<Expr>().unwrap_err();

        assert!(err.fatal);
        assert_eq!(err.message(), "unclosed parenthesis");
        assert_eq!(err.spans, vec![0..1]);
    }

    #[test]
    fn unopened_paren() {
        let mut parser = Parser::new("x + 1)");
        let err = parser.try_parse_full::<Expr>().unwrap_err();

        assert_eq!(err.message(), "unclosed parenthesis");
        assert_eq!(err.spans, vec![5..6]);
    }

    #[test]
    fn empty_paren() {
        let mut parser = Parser::new("2 * ()");
        let err = parser.try_parse_full::<Expr>().unwrap_err();

        assert_eq!(err.message(), "missing expression inside parenthesis");
    }

    #[test]
    fn sentence_is_not_an_expression() {
        let mut parser = Parser::new("What is 2+2?");
        let err = parser.try_parse_full::<Expr>().unwrap_err();

        assert_eq!(err.message(), "expected end of input");
        assert_eq!(err.spans, vec![5..7]);
    }

    #[test]
    fn words_are_not_multiplied() {
        let mut parser = Parser::new("How do I compute 3 - 1");
        let err = parser.try_parse_full::<Expr>().unwrap_err();

        assert_eq!(err.message(), "expected end of input");
        assert_eq!(err.spans, vec![4..6]);
    }

    #[test]
    fn letters_are_multiplied() {
        let mut parser = Parser::new("x y");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: sym("x", 0..1),
            op: BinOp { kind: BinOpKind::Mul, implicit: true, span: 1..2 },
            rhs: sym("y", 2..3),
            span: 0..3,
        }));

        for input in ["a sin(x)", "x_1 x_2", "2 pi r^2", "(x + 1) y", "3! x"] {
            assert!(Parser::new(input).try_parse_full::<Expr>().is_ok(), "{}", input);
        }
        for input in ["x 2", "ab c", "x cd"] {
            assert!(Parser::new(input).try_parse_full::<Expr>().is_err(), "{}", input);
        }
    }

    #[test]
    fn nesting_limit() {
        let nested = format!("{}x{}", "(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
        assert!(Parser::new(&nested).try_parse_full::<Expr>().is_ok());

        let nested = format!("{}x{}", "(".repeat(10_000), ")".repeat(10_000));
        let err = Parser::new(&nested).try_parse_full::<Expr>().unwrap_err();
        assert!(err.fatal);
        assert_eq!(err.message(), "expression is nested too deeply");
    }

    #[test]
    fn nesting_limit_for_operators() {
        for input in [
            format!("{}1", "-".repeat(10_000)),
            format!("1{}", "!".repeat(10_000)),
            format!("{}2", "2^".repeat(10_000)),
            format!("{}x{}", "sin(".repeat(10_000), ")".repeat(10_000)),
        ] {
            let err = Parser::new(&input).try_parse_full::<Expr>().unwrap_err();
            assert_eq!(err.message(), "expression is nested too deeply");
        }
    }

    #[test]
    fn long_chains_are_not_nested() {
        let sum = vec!["1"; 5_000].join(" + ");
        assert!(Parser::new(&sum).try_parse_full::<Expr>().is_ok());
    }
}
