//! Exact computer algebra for LearnLoop.
//!
//! Expressions parsed by [`learnloop_parser`] are converted into [`symbolic::SymExpr`] trees of
//! exact rational numbers, symbols and function calls. From there they can be simplified,
//! differentiated or integrated, and typeset with the [`latex::Latex`] trait.
//!
//! ```
//! use learnloop_algebra::{formula::Formula, latex::Latex};
//!
//! let formula = Formula::parse("(x^2 - 1)/(x - 1)").unwrap();
//! let simplified = formula.simplify().unwrap();
//! assert_eq!(simplified.as_display().to_string(), "x + 1");
//! ```

pub mod error;
pub mod formula;
pub mod latex;
pub mod primitive;
pub mod symbolic;

pub use formula::{Formula, Simplified};
