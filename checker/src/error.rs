//! Fatal judging faults.
//!
//! A [`JudgeError`] aborts the per-case loop and turns the verdict into
//! `JudgingError`. Contestant mistakes are never expressed with this type;
//! they are recorded as [`Diagnostic`](crate::core::types::Diagnostic) values
//! and processing continues.

use thiserror::Error;

/// Faults in the test data or the judging environment.
#[derive(Error, Debug)]
pub enum JudgeError {
    /// A case count (global or per-case input size) could not be parsed.
    #[error("malformed count: no non-negative integer in '{line}'")]
    MalformedCount { line: String },

    /// The input stream ended before the declared cases were read.
    #[error("Unexpected end of input")]
    UnexpectedEndOfInput,

    /// The reference output contains no lines at all.
    #[error("reference output empty")]
    EmptyReference,

    /// The reference output ended before the header of the given case.
    #[error("reference output is missing the header for case {case}")]
    MissingReferenceHeader { case: usize },

    /// The reference output has a malformed or out-of-order case header.
    #[error("Testcase output file case header incorrect: expected '{expected}', found '{found}'")]
    ReferenceHeader { expected: String, found: String },

    /// The reference output continues past the last declared case.
    #[error("reference output has data after the last case: '{found}'")]
    TrailingReference { found: String },

    /// A stream could not be read.
    #[error("unreadable {stream} stream: {source}")]
    Io {
        stream: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Result alias for operations that may hit a fatal judging fault.
pub type JudgeResult<T> = Result<T, JudgeError>;
