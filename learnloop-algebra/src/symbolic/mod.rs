//! Algebraic manipulation of expressions.
//!
//! # Expression representation
//!
//! Algebraic expressions in this module are represented as a tree of [`SymExpr`] nodes. It's
//! similar to the [`learnloop_parser::parser::ast::Expr`] nodes produced by [`learnloop_parser`],
//! with the main difference being that [`SymExpr`] nodes **flatten** out the tree structure.
//!
//! For example, the expression `x + (y + z)` is represented as a single [`SymExpr::Add`] node
//! with _three_ children, `x`, `y`, and `z`, where as the AST node has two children, `x` and
//! `(y + z)`. Combining like terms (`x + x = 2x`) is much easier when the terms in question are
//! all at the same level in the tree.
//!
//! Conversion from the AST is fallible, since the AST can still contain things like a literal
//! division by zero:
//!
//! ```
//! use learnloop_algebra::symbolic::expr::{Primary, SymExpr};
//! use learnloop_parser::parser::{ast::Expr, Parser};
//!
//! let mut parser = Parser::new("x + (y + z)");
//! let ast_expr = parser.try_parse_full::<Expr>().unwrap();
//!
//! let expr = SymExpr::try_from_ast(&ast_expr).unwrap();
//! assert_eq!(expr, SymExpr::Add(vec![
//!     SymExpr::Primary(Primary::Symbol("x".to_string())),
//!     SymExpr::Primary(Primary::Symbol("y".to_string())),
//!     SymExpr::Primary(Primary::Symbol("z".to_string())),
//! ]));
//! ```
//!
//! # Simplification
//!
//! Expressions are reduced to a canonical form with the [`simplify()`] function. An expression is
//! considered simplified when no rewriting rule in [`simplify::rules`] applies to it anymore, its
//! rational functions have no common polynomial factors, and its terms and factors are sorted.
//!
//! ```
//! use learnloop_algebra::symbolic::{expr::SymExpr, simplify};
//! use learnloop_parser::parser::{ast::Expr, Parser};
//!
//! let mut parser = Parser::new("x + x + x");
//! let ast_expr = parser.try_parse_full::<Expr>().unwrap();
//! let simplified = simplify(&SymExpr::try_from_ast(&ast_expr).unwrap()).unwrap();
//!
//! assert_eq!(simplified.to_string(), "3 * x");
//! ```
//!
//! # Calculus
//!
//! [`derivative()`] and [`integral()`] build unsimplified results; pass them through
//! [`simplify()`] before showing them.

pub mod derivative;
pub mod expr;
pub mod integral;
pub mod simplify;
pub mod step_collector;

pub use derivative::derivative;
pub use expr::SymExpr;
pub use integral::integral;
pub use simplify::{simplify, simplify_with, simplify_with_steps};
pub use step_collector::StepCollector;
