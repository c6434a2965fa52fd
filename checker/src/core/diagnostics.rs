//! Diagnostics sink and verdict reduction.
//!
//! Diagnostics are append-only: comparators and the verifier push records in
//! processing order and nothing is rewritten afterwards. The final [`Report`]
//! is derived once from the recorded entries plus an optional fatal fault.

use std::fmt::{Display, Write as _};

use serde::{Deserialize, Serialize};

use crate::core::types::{CaseContext, Diagnostic, Verdict};

/// Ordered collection of diagnostics for one run.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    /// Recorder bound to one case; every entry is stamped with `ctx.index`.
    pub fn findings(&mut self, ctx: CaseContext) -> Findings<'_> {
        Findings { ctx, sink: self }
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn into_entries(self) -> Vec<Diagnostic> {
        self.entries
    }
}

/// Per-case recorder handed to comparators.
pub struct Findings<'a> {
    ctx: CaseContext,
    sink: &'a mut Diagnostics,
}

impl Findings<'_> {
    pub fn context(&self) -> CaseContext {
        self.ctx
    }

    /// Record a failure without expected/actual values.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.push(message.into(), None, None);
    }

    /// Record a failure together with the expected and the observed value.
    pub fn mismatch(
        &mut self,
        message: impl Into<String>,
        expected: impl Display,
        actual: impl Display,
    ) {
        self.push(
            message.into(),
            Some(expected.to_string()),
            Some(actual.to_string()),
        );
    }

    fn push(&mut self, message: String, expected: Option<String>, actual: Option<String>) {
        self.sink.record(Diagnostic {
            case: self.ctx.index,
            message,
            expected,
            actual,
        });
    }
}

/// Fatal fault that ended a run early.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fault {
    /// Case being processed when the fault occurred; `None` before the first case.
    pub case: Option<usize>,
    pub message: String,
}

/// Outcome of one verification run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub verdict: Verdict,
    /// Number of cases the run was asked to verify, once known.
    pub declared_cases: Option<usize>,
    /// Cases fully processed (segmented and compared or rejected).
    pub cases_checked: usize,
    pub diagnostics: Vec<Diagnostic>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fatal: Option<Fault>,
}

impl Report {
    /// Reduce recorded diagnostics and an optional fault to the final report.
    pub fn finalize(
        diagnostics: Diagnostics,
        declared_cases: Option<usize>,
        cases_checked: usize,
        fatal: Option<Fault>,
    ) -> Self {
        let diagnostics = diagnostics.into_entries();
        let verdict = reduce_verdict(&diagnostics, fatal.is_some());
        Self {
            verdict,
            declared_cases,
            cases_checked,
            diagnostics,
            fatal,
        }
    }

    /// Human-readable feedback in the `Testcase <n>: <message>` format.
    pub fn render_text(&self) -> String {
        let mut buf = String::new();
        for diagnostic in &self.diagnostics {
            render_diagnostic(&mut buf, diagnostic);
        }
        if let Some(fault) = &self.fatal {
            match fault.case {
                Some(case) => {
                    let _ = writeln!(buf, "Testcase {}: {}", case, fault.message);
                }
                None => {
                    let _ = writeln!(buf, "{}", fault.message);
                }
            }
        }
        buf
    }
}

/// `JudgingError` wins over everything; any diagnostic means `WrongAnswer`.
pub fn reduce_verdict(diagnostics: &[Diagnostic], fatal: bool) -> Verdict {
    if fatal {
        Verdict::JudgingError
    } else if diagnostics.is_empty() {
        Verdict::Accepted
    } else {
        Verdict::WrongAnswer
    }
}

fn render_diagnostic(buf: &mut String, diagnostic: &Diagnostic) {
    let _ = writeln!(buf, "Testcase {}: {}", diagnostic.case, diagnostic.message);
    if let Some(expected) = &diagnostic.expected {
        let _ = writeln!(buf, "Expected: {expected}");
    }
    if let Some(actual) = &diagnostic.actual {
        let _ = writeln!(buf, "Value was: {actual}");
    }
}
