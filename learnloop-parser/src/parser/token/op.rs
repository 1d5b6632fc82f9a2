//! Structs to help parse binary and unary operators.

use crate::{
    parser::{
        error::{Error, kind},
        Associativity,
        Parse,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

/// The unary operation that is being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOpKind {
    Neg,
    Pos,
    Factorial,
}

impl UnaryOpKind {
    /// Returns the precedence of the unary operation.
    pub fn precedence(&self) -> Precedence {
        match self {
            Self::Neg | Self::Pos => Precedence::Neg,
            Self::Factorial => Precedence::Factorial,
        }
    }

    /// Returns the associativity of the unary operation.
    pub fn associativity(&self) -> Associativity {
        match self {
            Self::Neg | Self::Pos => Associativity::Right,
            Self::Factorial => Associativity::Left,
        }
    }
}

/// A unary operator that takes one operand.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOp {
    /// The kind of unary operator.
    pub kind: UnaryOpKind,

    /// The region of the source code that this operator was parsed from.
    pub span: Range<usize>,
}

impl UnaryOp {
    /// Returns the precedence of the unary operator.
    pub fn precedence(&self) -> Precedence {
        self.kind.precedence()
    }

    /// Returns the associativity of the unary operator.
    pub fn associativity(&self) -> Associativity {
        self.kind.associativity()
    }
}

impl Parse for UnaryOp {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token()?;
        let kind = match token.kind {
            TokenKind::Sub => UnaryOpKind::Neg,
            TokenKind::Add => UnaryOpKind::Pos,
            TokenKind::Factorial => UnaryOpKind::Factorial,
            _ => return Err(Error::new(vec![token.span], kind::UnexpectedToken {
                expected: &[
                    TokenKind::Sub,
                    TokenKind::Add,
                    TokenKind::Factorial,
                ],
                found: token.kind,
                lexeme: token.lexeme.to_owned(),
            })),
        };

        Ok(Self {
            kind,
            span: token.span,
        })
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            UnaryOpKind::Neg => write!(f, "-"),
            UnaryOpKind::Pos => write!(f, "+"),
            UnaryOpKind::Factorial => write!(f, "!"),
        }
    }
}

/// The binary operation that is being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOpKind {
    Exp,
    Mul,
    Div,
    Add,
    Sub,
    Eq,
}

impl BinOpKind {
    /// Returns the precedence of the binary operation.
    pub fn precedence(&self) -> Precedence {
        match self {
            Self::Exp => Precedence::Exp,
            Self::Mul | Self::Div => Precedence::Factor,
            Self::Add | Self::Sub => Precedence::Term,
            Self::Eq => Precedence::Equation,
        }
    }

    /// Returns the associativity of the binary operation.
    pub fn associativity(&self) -> Associativity {
        match self {
            Self::Exp => Associativity::Right,
            _ => Associativity::Left,
        }
    }
}

/// A binary operator that takes two operands.
#[derive(Debug, Clone, PartialEq)]
pub struct BinOp {
    /// The kind of binary operator.
    pub kind: BinOpKind,

    /// Whether this binary operator was implicitly inserted by the parser. This is only used for
    /// implicit multiplication, such as `2x`.
    pub implicit: bool,

    /// The region of the source code that this operator was parsed from.
    pub span: Range<usize>,
}

impl BinOp {
    /// Returns the precedence of the binary operator.
    pub fn precedence(&self) -> Precedence {
        self.kind.precedence()
    }

    /// Returns the associativity of the binary operator.
    pub fn associativity(&self) -> Associativity {
        self.kind.associativity()
    }
}

impl Parse for BinOp {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token()?;
        let kind = match token.kind {
            TokenKind::Exp => BinOpKind::Exp,
            TokenKind::Mul => BinOpKind::Mul,
            TokenKind::Div => BinOpKind::Div,
            TokenKind::Add => BinOpKind::Add,
            TokenKind::Sub => BinOpKind::Sub,
            TokenKind::Eq => BinOpKind::Eq,
            _ => return Err(Error::new(vec![token.span], kind::UnexpectedToken {
                expected: &[
                    TokenKind::Exp,
                    TokenKind::Mul,
                    TokenKind::Div,
                    TokenKind::Add,
                    TokenKind::Sub,
                    TokenKind::Eq,
                ],
                found: token.kind,
                lexeme: token.lexeme.to_owned(),
            })),
        };

        Ok(Self {
            kind,
            implicit: false,
            span: token.span,
        })
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.implicit {
            return Ok(());
        }

        match self.kind {
            BinOpKind::Exp => write!(f, "^"),
            BinOpKind::Mul => write!(f, " * "),
            BinOpKind::Div => write!(f, "/"),
            BinOpKind::Add => write!(f, " + "),
            BinOpKind::Sub => write!(f, " - "),
            BinOpKind::Eq => write!(f, " = "),
        }
    }
}
