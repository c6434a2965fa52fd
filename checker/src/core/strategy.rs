//! Case count and input sizing strategies.
//!
//! Both are closed sets of built-in variants plus a `Custom` arm carrying a
//! user implementation of the same contract.

use crate::error::{JudgeError, JudgeResult};
use crate::io::lines::LineSource;

/// Contract for custom case count strategies.
///
/// Implementations may consume any number of lines from the start of the
/// input stream and must produce a non-negative case count.
pub trait CaseCountStrategy {
    fn count_cases(&self, input: &mut dyn LineSource) -> JudgeResult<usize>;
}

/// Contract for custom input sizing strategies.
///
/// Only the first line of the case's input is available; implementations
/// cannot peek at the lines that follow.
pub trait InputSizingStrategy {
    fn extra_lines(&self, header: &str) -> JudgeResult<usize>;
}

/// How many cases one input file holds.
pub enum CaseCount {
    /// Exactly one case; nothing is read up front.
    Singular,
    /// The first input line starts with the number of cases.
    Multiple,
    Custom(Box<dyn CaseCountStrategy>),
}

impl CaseCount {
    pub fn resolve(&self, input: &mut dyn LineSource) -> JudgeResult<usize> {
        match self {
            CaseCount::Singular => Ok(1),
            CaseCount::Multiple => {
                let line = input.next_line()?.unwrap_or_default();
                parse_leading_count(&line)
            }
            CaseCount::Custom(strategy) => strategy.count_cases(input),
        }
    }
}

/// How many input lines follow the first line of a case.
pub enum InputSizing {
    /// Each case's input is a single line.
    SingleLine,
    /// The first token of the case's first line is the number of lines that follow.
    FirstInteger,
    Custom(Box<dyn InputSizingStrategy>),
}

impl InputSizing {
    pub fn extra_lines(&self, header: &str) -> JudgeResult<usize> {
        match self {
            InputSizing::SingleLine => Ok(0),
            InputSizing::FirstInteger => parse_leading_count(header),
            InputSizing::Custom(strategy) => strategy.extra_lines(header),
        }
    }
}

/// Parse the first whitespace-delimited token as a non-negative integer.
pub fn parse_leading_count(line: &str) -> JudgeResult<usize> {
    line.split_whitespace()
        .next()
        .and_then(|token| token.parse::<usize>().ok())
        .ok_or_else(|| JudgeError::MalformedCount {
            line: line.to_string(),
        })
}
