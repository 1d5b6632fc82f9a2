//! Tokenizer and parser for the math expressions typed into the LearnLoop question box.
//!
//! The grammar is a small, conventional infix math language: numbers, symbols, function calls,
//! `+ - * /`, exponentiation with either `^` or `**`, postfix factorial `!`, implicit
//! multiplication (`2x`, `3(x + 1)`), and a top-level `=` for equations.
//!
//! ```
//! use learnloop_parser::parser::{ast::Expr, Parser};
//!
//! let mut parser = Parser::new("2x^2 + 3");
//! let expr = parser.try_parse_full::<Expr>().unwrap();
//! assert_eq!(expr.to_string(), "2x^2 + 3");
//! ```

pub mod parser;
pub mod tokenizer;
