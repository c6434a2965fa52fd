//! Stable exit codes for the checker binary.
//!
//! The judge reads the verdict from the process status only.

/// Candidate output was accepted.
pub const ACCEPTED: i32 = 42;
/// Candidate output was rejected.
pub const WRONG_ANSWER: i32 = 43;
/// Judging fault: malformed test data, unreadable files or invalid invocation.
/// Never attributed to the contestant.
pub const JUDGING_ERROR: i32 = 1;
