//! The core of the LearnLoop tutor.
//!
//! A submission consists of a free-text question, a [`Level`] and a step-by-step flag. The
//! [`structured_answer`] composer turns it into a templated markdown response. If the question
//! looks like math, the response includes the outcome of [`verify_math`], which hands the question
//! to the [`learnloop_algebra`] engine and typesets the simplified result.
//!
//! ```
//! use learnloop_tutor::{structured_answer, Level};
//!
//! let response = structured_answer("simplify x + x", Level::Beginner, false);
//! assert!(response.contains("Simplified: $2 x$"));
//! ```
//!
//! Everything here is synchronous and stateless, so a single [`Tutor`] can serve any number of
//! concurrent submissions.

pub mod command;
pub mod compose;
pub mod config;
pub mod error;
pub mod level;
pub mod verify;

pub use command::{Command, Request};
pub use compose::{needs_verification, structured_answer, verification_note, Submission, Tutor};
pub use config::TutorConfig;
pub use level::{Level, ParseLevelError};
pub use verify::{describe, try_verify, verify_math, Verified};
