//! Shared deterministic types for checker core logic.
//!
//! These types define stable contracts between the verifier, the comparators
//! and the report writers.

use serde::{Deserialize, Serialize};

use crate::exit_codes;

/// Position of the case currently being verified.
///
/// Passed explicitly to every strategy and comparator call instead of living
/// in shared mutable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaseContext {
    /// 1-based case index, equal to the `<n>` of the expected `Case #<n>:` header.
    pub index: usize,
}

impl CaseContext {
    pub fn new(index: usize) -> Self {
        Self { index }
    }
}

/// Final classification of a verification run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Accepted,
    WrongAnswer,
    /// Test data or environment fault; never attributed to the contestant.
    JudgingError,
}

impl Verdict {
    /// Process exit status the judge expects for this verdict.
    pub fn exit_code(self) -> i32 {
        match self {
            Verdict::Accepted => exit_codes::ACCEPTED,
            Verdict::WrongAnswer => exit_codes::WRONG_ANSWER,
            Verdict::JudgingError => exit_codes::JUDGING_ERROR,
        }
    }
}

/// One recorded failure, attributed to a case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub case: usize,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
}

/// The three line windows of one case, as handed to a comparator.
///
/// All lines are trimmed and non-empty. Candidate and reference windows no
/// longer contain the `Case #<n>:` prefix.
#[derive(Debug, Clone, Copy)]
pub struct CaseWindows<'a> {
    pub input: &'a [String],
    pub candidate: &'a [String],
    pub reference: &'a [String],
}
