//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages.

// lets `#[derive(ErrorKind)]` resolve `learnloop_error::...` paths in this crate's own tests
extern crate self as learnloop_error;

use ariadne::{Color, Report, Source};
use std::{fmt::Debug, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send + Sync {
    /// Returns the one-line description of this error, without any source highlighting.
    fn message(&self) -> String;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Returns the one-line description of this error.
    pub fn message(&self) -> String {
        self.kind.message()
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Renders the report for this error against the given source code into a string.
    pub fn render_report(&self, src_id: &str, src: &str) -> String {
        let mut buf = Vec::new();
        // writing into a `Vec` cannot fail
        let _ = self.build_report(src_id).write((src_id, Source::from(src)), &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Shifts every span of this error to the right by `offset` bytes. This is used when the
    /// erroneous source was a slice of a larger input.
    pub fn offset_spans(mut self, offset: usize) -> Self {
        for span in &mut self.spans {
            *span = span.start + offset..span.end + offset;
        }
        self
    }

    /// Points the error at `span` if it does not point anywhere yet. Errors raised deep inside an
    /// algorithm (such as "cannot integrate") do not know which part of the input they belong to.
    pub fn or_span(mut self, span: Range<usize>) -> Self {
        if self.spans.is_empty() {
            self.spans.push(span);
        }
        self
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use learnloop_attrs::ErrorKind;
    use super::*;

    #[derive(Debug, ErrorKind)]
    #[error(
        message = format!("unknown variable `{}`", name),
        labels = ["this variable"],
        help = "check the spelling",
    )]
    struct UnknownVariable {
        name: String,
    }

    #[test]
    fn message_uses_fields() {
        let err = Error::new(vec![4..5], UnknownVariable { name: "y".to_string() });
        assert_eq!(err.message(), "unknown variable `y`");
        assert_eq!(err.to_string(), "unknown variable `y`");
    }

    #[test]
    fn report_highlights_span() {
        let err = Error::new(vec![4..5], UnknownVariable { name: "y".to_string() });
        let rendered = err.render_report("input", "2 + y");
        let plain = String::from_utf8(strip_ansi_escapes::strip(rendered)).unwrap();

        assert!(plain.contains("unknown variable `y`"));
        assert!(plain.contains("this variable"));
        assert!(plain.contains("check the spelling"));
    }

    #[test]
    fn offset_spans_shifts_right() {
        let err = Error::new(vec![0..2, 3..4], UnknownVariable { name: "x".to_string() })
            .offset_spans(9);
        assert_eq!(err.spans, vec![9..11, 12..13]);
    }

    #[test]
    fn or_span_only_fills_empty() {
        let err = Error::new(vec![], UnknownVariable { name: "x".to_string() }).or_span(0..5);
        assert_eq!(err.spans, vec![0..5]);

        let err = Error::new(vec![1..2], UnknownVariable { name: "x".to_string() }).or_span(0..5);
        assert_eq!(err.spans, vec![1..2]);
    }
}
