//! The interactive prompt.

use ariadne::Source;
use learnloop_error::Error;
use learnloop_tutor::{Level, Submission, Tutor};
use rustyline::{error::ReadlineError, DefaultEditor};
use tracing::warn;

/// The source name shown in error reports.
const SOURCE_ID: &str = "question";

/// Prints a report of why the question could not be verified to stderr.
fn report_failure(question: &str, err: &Error) {
    let report = err.build_report(SOURCE_ID);
    if let Err(io_err) = report.eprint((SOURCE_ID, Source::from(question))) {
        warn!(error = %io_err, "failed to print error report");
    }
}

/// Answers one question, printing the report of any verification failure first.
pub fn answer(tutor: &Tutor, question: &str, level: Option<Level>, step_by_step: bool) -> String {
    let question = question.trim();
    let submission = Submission {
        question: question.to_string(),
        level,
        step_by_step,
    };
    tutor.answer_reporting(&submission, |err| report_failure(question, err))
}

/// Runs the prompt until end of input or Ctrl-C.
pub fn run(tutor: &Tutor, level: Option<Level>, step_by_step: bool) -> Result<(), ReadlineError> {
    let mut rl = DefaultEditor::new()?;

    fn process_line(
        rl: &mut DefaultEditor,
        tutor: &Tutor,
        level: Option<Level>,
        step_by_step: bool,
    ) -> Result<(), ReadlineError> {
        let input = rl.readline("> ")?;
        if input.trim().is_empty() {
            return Ok(());
        }

        rl.add_history_entry(&input)?;

        println!("{}\n", answer(tutor, &input, level, step_by_step));
        Ok(())
    }

    loop {
        if let Err(err) = process_line(&mut rl, tutor, level, step_by_step) {
            return match err {
                ReadlineError::Eof | ReadlineError::Interrupted => Ok(()),
                err => Err(err),
            };
        }
    }
}
