//! Orchestration for one verification run.
//!
//! The verifier pulls the case count once, then for every case reads the
//! input window, the candidate window and the reference window, runs the
//! comparator and records diagnostics. A [`JudgeError`] stops the loop;
//! anything attributable to the contestant is recorded and the loop goes on
//! so the feedback covers every case.

use std::any::Any;
use std::io::BufRead;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, info, instrument, warn};

use crate::core::checker::Checker;
use crate::core::comparator::CaseComparator;
use crate::core::diagnostics::{Diagnostics, Fault, Report};
use crate::core::header::{expected_header, preview};
use crate::core::types::{CaseContext, CaseWindows, Diagnostic};
use crate::error::{JudgeError, JudgeResult};
use crate::io::lines::{LineReader, LineSource};
use crate::segment::{CaseSegmenter, Segment};

/// Verify buffered byte streams (files, stdin, in-memory buffers).
pub fn verify_streams<I, C, R>(checker: &Checker, input: I, candidate: C, reference: R) -> Report
where
    I: BufRead,
    C: BufRead,
    R: BufRead,
{
    verify(
        checker,
        LineReader::new("input", input),
        LineReader::new("candidate", candidate),
        LineReader::new("reference", reference),
    )
}

/// Verify the candidate stream against the reference stream.
///
/// Always returns a report; faults are folded into a `JudgingError` verdict.
#[instrument(skip_all, fields(comparator = checker.comparator.name()))]
pub fn verify<I, C, R>(checker: &Checker, input: I, candidate: C, reference: R) -> Report
where
    I: LineSource,
    C: LineSource,
    R: LineSource,
{
    let mut run = Run {
        checker,
        input,
        candidate: CaseSegmenter::new(candidate),
        reference: CaseSegmenter::new(reference),
        diagnostics: Diagnostics::new(),
        declared_cases: None,
        cases_checked: 0,
    };

    let fatal = match run.drive() {
        Ok(()) => None,
        Err((ctx, err)) => {
            warn!(case = ctx.map(|ctx| ctx.index), error = %err, "judging error");
            Some(Fault {
                case: ctx.map(|ctx| ctx.index),
                message: err.to_string(),
            })
        }
    };

    let report = Report::finalize(
        run.diagnostics,
        run.declared_cases,
        run.cases_checked,
        fatal,
    );
    info!(
        verdict = ?report.verdict,
        cases = report.cases_checked,
        diagnostics = report.diagnostics.len(),
        "verification finished"
    );
    report
}

/// State of one run; exclusively owns the three streams.
struct Run<'a, I, C, R> {
    checker: &'a Checker,
    input: I,
    candidate: CaseSegmenter<C>,
    reference: CaseSegmenter<R>,
    diagnostics: Diagnostics,
    declared_cases: Option<usize>,
    cases_checked: usize,
}

impl<I, C, R> Run<'_, I, C, R>
where
    I: LineSource,
    C: LineSource,
    R: LineSource,
{
    fn drive(&mut self) -> Result<(), (Option<CaseContext>, JudgeError)> {
        let total = self
            .checker
            .case_count
            .resolve(&mut self.input)
            .map_err(|err| (None, err))?;
        self.declared_cases = Some(total);
        debug!(total, "case count resolved");

        for index in 1..=total {
            let ctx = CaseContext::new(index);
            self.check_case(ctx).map_err(|err| (Some(ctx), err))?;
            self.cases_checked += 1;
        }
        self.check_trailing(total).map_err(|err| (None, err))
    }

    /// After the last case every stream must be exhausted.
    ///
    /// Extra candidate output is the contestant's mistake and is charged to
    /// the last case; extra reference output is a fault in the test data.
    fn check_trailing(&mut self, last: usize) -> JudgeResult<()> {
        if self.candidate.has_remaining()? {
            let line = self.candidate.pending().unwrap_or_default();
            self.diagnostics.record(Diagnostic {
                case: last,
                message: "Trailing output".to_string(),
                expected: None,
                actual: Some(preview(line)),
            });
        }
        if self.reference.has_remaining()? {
            let found = self.reference.pending().unwrap_or_default();
            return Err(JudgeError::TrailingReference {
                found: preview(found),
            });
        }
        Ok(())
    }

    fn check_case(&mut self, ctx: CaseContext) -> JudgeResult<()> {
        let input = self.read_input_window()?;

        let candidate = match self.candidate.next_window(ctx)? {
            Segment::Window(lines) => Some(lines),
            Segment::MissingHeader => {
                self.diagnostics.record(Diagnostic {
                    case: ctx.index,
                    message: "Case header seems to be missing".to_string(),
                    expected: Some(expected_header(ctx.index)),
                    actual: None,
                });
                None
            }
            Segment::IncorrectHeader { found } => {
                self.diagnostics.record(Diagnostic {
                    case: ctx.index,
                    message: "Incorrect case header".to_string(),
                    expected: Some(expected_header(ctx.index)),
                    actual: Some(preview(&found)),
                });
                None
            }
        };

        let reference = match self.reference.next_window(ctx)? {
            Segment::Window(lines) => lines,
            Segment::MissingHeader if ctx.index == 1 => return Err(JudgeError::EmptyReference),
            Segment::MissingHeader => {
                return Err(JudgeError::MissingReferenceHeader { case: ctx.index });
            }
            Segment::IncorrectHeader { found } => {
                return Err(JudgeError::ReferenceHeader {
                    expected: expected_header(ctx.index),
                    found: preview(&found),
                });
            }
        };

        let Some(candidate) = candidate else {
            debug!(
                case = ctx.index,
                "candidate case rejected before comparison"
            );
            return Ok(());
        };

        let windows = CaseWindows {
            input: &input,
            candidate: &candidate,
            reference: &reference,
        };
        self.compare(ctx, &windows);
        Ok(())
    }

    fn read_input_window(&mut self) -> JudgeResult<Vec<String>> {
        let header = self
            .input
            .next_line()?
            .ok_or(JudgeError::UnexpectedEndOfInput)?;
        let extra = self.checker.input_sizing.extra_lines(&header)?;
        let mut window = vec![header];
        for _ in 0..extra {
            let line = self
                .input
                .next_line()?
                .ok_or(JudgeError::UnexpectedEndOfInput)?;
            window.push(line);
        }
        Ok(window)
    }

    /// Run the comparator, downgrading errors and panics to a diagnostic.
    fn compare(&mut self, ctx: CaseContext, windows: &CaseWindows<'_>) {
        let before = self.diagnostics.len();
        let comparator = &self.checker.comparator;
        let mut findings = self.diagnostics.findings(ctx);
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            comparator.compare(windows, &mut findings)
        }));

        let crash = match outcome {
            Ok(Ok(())) => None,
            Ok(Err(err)) => Some(format!("{err:#}")),
            Err(payload) => Some(panic_message(payload.as_ref())),
        };
        if let Some(reason) = crash {
            warn!(case = ctx.index, %reason, "comparator crashed");
            findings.fail(format!("Comparator crashed: {reason}"));
        }
        debug!(
            case = ctx.index,
            failures = self.diagnostics.len() - before,
            "case compared"
        );
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::comparator::Comparator;
    use crate::core::permutation::{PermutationComparator, PermutationLayout};
    use crate::core::precision::{ErrorMode, PrecisionComparator};
    use crate::core::strategy::{CaseCount, InputSizing};
    use crate::core::types::Verdict;
    use crate::test_support::{CrashingComparator, run};

    fn precision(eps: f64) -> Checker {
        Checker::new(
            CaseCount::Multiple,
            InputSizing::SingleLine,
            Comparator::Precision(PrecisionComparator::new(eps, ErrorMode::Absolute)),
        )
    }

    #[test]
    fn identical_outputs_are_accepted() {
        let output = "Case #1: 1.5\nCase #2: 2 3\nCase #3:\nimpossible\n";
        let report = run(&precision(1e-9), "3\na\nb\nc\n", output, output);
        assert_eq!(report.verdict, Verdict::Accepted);
        assert!(report.diagnostics.is_empty());
        assert_eq!(report.cases_checked, 3);
        assert_eq!(report.declared_cases, Some(3));
    }

    #[test]
    fn wrong_answers_do_not_stop_later_cases() {
        let reference = "Case #1: 1\nCase #2: 2\nCase #3: 3\n";
        let candidate = "Case #1: 9\nCase #2: 2\nCase #3: 8\n";
        let report = run(&precision(1e-6), "3\na\nb\nc\n", candidate, reference);
        assert_eq!(report.verdict, Verdict::WrongAnswer);
        let cases: Vec<usize> = report.diagnostics.iter().map(|d| d.case).collect();
        assert_eq!(cases, vec![1, 3]);
        assert_eq!(report.cases_checked, 3);
    }

    #[test]
    fn input_windows_follow_first_integer_sizing() {
        let checker = Checker::new(
            CaseCount::Multiple,
            InputSizing::FirstInteger,
            Comparator::Permutation(PermutationComparator::new(PermutationLayout::MultiLine)),
        );
        let input = "2\n2\nx\ny\n1\nz\n";
        let reference = "Case #1:\nx\ny\nCase #2: z\n";
        let candidate = "Case #1: y\nx\nCase #2:\nz\n";
        let report = run(&checker, input, candidate, reference);
        assert_eq!(report.verdict, Verdict::Accepted);
        assert_eq!(report.cases_checked, 2);
    }

    #[test]
    fn premature_end_of_input_is_a_judging_error() {
        let checker = Checker::new(
            CaseCount::Multiple,
            InputSizing::FirstInteger,
            Comparator::Precision(PrecisionComparator::default()),
        );
        let output = "Case #1: 1\n";
        let report = run(&checker, "1\n3\nonly one\n", output, output);
        assert_eq!(report.verdict, Verdict::JudgingError);
        let fatal = report.fatal.expect("fatal");
        assert_eq!(fatal.case, Some(1));
        assert_eq!(fatal.message, "Unexpected end of input");
    }

    #[test]
    fn declared_cases_beyond_input_is_a_judging_error() {
        let output = "Case #1: 1\nCase #2: 2\n";
        let report = run(&precision(1e-6), "2\na\n", output, output);
        assert_eq!(report.verdict, Verdict::JudgingError);
        assert_eq!(report.cases_checked, 1);
    }

    #[test]
    fn malformed_case_count_is_a_judging_error() {
        let report = run(&precision(1e-6), "many\n", "Case #1: 1\n", "Case #1: 1\n");
        assert_eq!(report.verdict, Verdict::JudgingError);
        assert_eq!(report.declared_cases, None);
        assert_eq!(report.fatal.expect("fatal").case, None);
    }

    #[test]
    fn empty_reference_is_a_judging_error() {
        let report = run(&precision(1e-6), "1\na\n", "Case #1: 1\n", "");
        assert_eq!(report.verdict, Verdict::JudgingError);
        assert_eq!(
            report.fatal.expect("fatal").message,
            "reference output empty"
        );
    }

    #[test]
    fn malformed_reference_header_stops_processing() {
        let reference = "Case #1: 1\nCase #3: 3\nCase #3: 3\n";
        let candidate = "Case #1: 2\nCase #2: 2\nCase #3: 3\n";
        let report = run(&precision(1e-6), "3\na\nb\nc\n", candidate, reference);
        assert_eq!(report.verdict, Verdict::JudgingError);
        assert_eq!(report.cases_checked, 1);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].case, 1);
        assert_eq!(report.fatal.expect("fatal").case, Some(2));
    }

    #[test]
    fn malformed_candidate_header_is_a_wrong_answer() {
        let reference = "Case #1: 1\nCase #2: 2\n";
        let candidate = "Case 1: 1\nCase #2: 2\n";
        let report = run(&precision(1e-6), "2\na\nb\n", candidate, reference);
        assert_eq!(report.verdict, Verdict::WrongAnswer);
        assert_eq!(report.diagnostics.len(), 1);
        let diagnostic = &report.diagnostics[0];
        assert_eq!(diagnostic.message, "Incorrect case header");
        assert_eq!(diagnostic.expected.as_deref(), Some("Case #1:"));
        assert_eq!(report.cases_checked, 2);
    }

    #[test]
    fn missing_candidate_cases_are_reported_per_case() {
        let reference = "Case #1: 1\nCase #2: 2\n";
        let report = run(&precision(1e-6), "2\na\nb\n", "Case #1: 1\n", reference);
        assert_eq!(report.verdict, Verdict::WrongAnswer);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].case, 2);
        assert_eq!(report.diagnostics[0].message, "Case header seems to be missing");
    }

    #[test]
    fn trailing_candidate_output_is_a_wrong_answer() {
        let report = run(
            &precision(1e-6),
            "1\na\n",
            "Case #1: 1\nCase #2: 99\n",
            "Case #1: 1\n",
        );
        assert_eq!(report.verdict, Verdict::WrongAnswer);
        assert_eq!(report.cases_checked, 1);
        assert_eq!(report.diagnostics.len(), 1);
        let diagnostic = &report.diagnostics[0];
        assert_eq!(diagnostic.case, 1);
        assert_eq!(diagnostic.message, "Trailing output");
        assert_eq!(diagnostic.actual.as_deref(), Some("Case #2: 9..."));
    }

    #[test]
    fn trailing_reference_output_is_a_judging_error() {
        let report = run(
            &precision(1e-6),
            "1\na\n",
            "Case #1: 1\n",
            "Case #1: 1\nCase #2: 99\n",
        );
        assert_eq!(report.verdict, Verdict::JudgingError);
        assert_eq!(report.cases_checked, 1);
        assert!(report.diagnostics.is_empty());
        let fatal = report.fatal.expect("fatal");
        assert_eq!(fatal.case, None);
        assert!(fatal.message.starts_with("reference output has data after"));
    }

    #[test]
    fn comparator_crashes_are_recorded_and_processing_continues() {
        for panics in [false, true] {
            let checker = Checker::new(
                CaseCount::Multiple,
                InputSizing::SingleLine,
                Comparator::Custom(Box::new(CrashingComparator::on_case(1, panics))),
            );
            let output = "Case #1: 1\nCase #2: 2\n";
            let report = run(&checker, "2\na\nb\n", output, output);
            assert_eq!(report.verdict, Verdict::WrongAnswer);
            assert_eq!(report.cases_checked, 2);
            assert_eq!(report.diagnostics.len(), 1);
            assert!(
                report.diagnostics[0]
                    .message
                    .starts_with("Comparator crashed:")
            );
        }
    }
}
