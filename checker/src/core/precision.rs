//! Floating-point comparison with a configurable error bound.
//!
//! Tokens that do not parse as floating-point numbers must match exactly,
//! so mixed outputs like `possible 3.1416` are handled token by token.

use std::ops::ControlFlow;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::core::comparator::{CaseComparator, paired_tokens, same_line_count};
use crate::core::diagnostics::Findings;
use crate::core::types::CaseWindows;

/// How the tolerance `epsilon` is applied to a numeric token pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ErrorMode {
    /// `|reference - candidate| <= epsilon`.
    #[default]
    Absolute,
    /// `|candidate / reference - 1| <= epsilon`, or `|candidate| <= epsilon`
    /// when the reference itself is within epsilon of zero.
    Relative,
    /// Either the absolute or the relative bound holds.
    AbsoluteOrRelative,
    /// Candidate lies between `reference` and `reference * epsilon`.
    FactorBounds,
}

/// Tolerance used when none is configured.
pub const DEFAULT_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrecisionComparator {
    pub epsilon: f64,
    pub mode: ErrorMode,
}

impl Default for PrecisionComparator {
    fn default() -> Self {
        Self::new(DEFAULT_EPSILON, ErrorMode::default())
    }
}

impl PrecisionComparator {
    pub fn new(epsilon: f64, mode: ErrorMode) -> Self {
        Self { epsilon, mode }
    }

    fn check_token(
        &self,
        expected: &str,
        actual: &str,
        findings: &mut Findings<'_>,
    ) -> ControlFlow<()> {
        let parsed = (parse_float(expected), parse_float(actual));
        let (Some(reference), Some(candidate)) = parsed else {
            if expected != actual {
                findings.mismatch("Result does not match", expected, actual);
                return ControlFlow::Break(());
            }
            return ControlFlow::Continue(());
        };

        if candidate.is_nan() {
            findings.mismatch("Result is NaN", show(reference), show(candidate));
            return ControlFlow::Break(());
        }
        if reference.is_infinite() != candidate.is_infinite() {
            findings.mismatch("Unmatched infinity", show(reference), show(candidate));
            return ControlFlow::Break(());
        }
        // Both infinite: accepted without comparing signs or magnitudes.
        if reference.is_infinite() {
            return ControlFlow::Continue(());
        }

        let eps = self.epsilon;
        match self.mode {
            ErrorMode::Absolute => {
                let abs = (reference - candidate).abs();
                if abs > eps {
                    findings.mismatch(
                        format!("Absolute result error too large (abs: {abs:?})"),
                        show(reference),
                        show(candidate),
                    );
                    return ControlFlow::Break(());
                }
            }
            ErrorMode::Relative => {
                let rel = relative_error(reference, candidate, eps);
                if rel > eps {
                    findings.mismatch(
                        format!("Relative result error too large (rel: {rel:?})"),
                        show(reference),
                        show(candidate),
                    );
                    return ControlFlow::Break(());
                }
            }
            ErrorMode::AbsoluteOrRelative => {
                let abs = (reference - candidate).abs();
                let rel = relative_error(reference, candidate, eps);
                if abs > eps && rel > eps {
                    findings.mismatch(
                        format!(
                            "Absolute and relative error too large (abs: {abs:?}, rel: {rel:?})"
                        ),
                        show(reference),
                        show(candidate),
                    );
                    return ControlFlow::Break(());
                }
            }
            ErrorMode::FactorBounds => {
                let scaled = reference * eps;
                let min = reference.min(scaled);
                let max = reference.max(scaled);
                // Both bounds are checked independently and neither stops the case.
                if candidate < min {
                    findings.mismatch("Approximation too small.", show(reference), show(candidate));
                }
                if candidate > max {
                    findings.mismatch("Approximation too large.", show(reference), show(candidate));
                }
            }
        }
        ControlFlow::Continue(())
    }
}

impl CaseComparator for PrecisionComparator {
    fn compare(&self, case: &CaseWindows<'_>, findings: &mut Findings<'_>) -> Result<()> {
        if !same_line_count(case.reference, case.candidate, findings) {
            return Ok(());
        }
        for (line, (expected, actual)) in case.reference.iter().zip(case.candidate).enumerate() {
            let Some(pairs) = paired_tokens(line + 1, expected, actual, findings) else {
                return Ok(());
            };
            for (expected, actual) in pairs {
                if self.check_token(expected, actual, findings).is_break() {
                    return Ok(());
                }
            }
        }
        Ok(())
    }
}

/// Decimal literal, `Infinity` or `NaN`, each with an optional sign.
///
/// Spellings such as `inf` or `nan` stay plain tokens and must match exactly.
fn parse_float(token: &str) -> Option<f64> {
    let unsigned = token.strip_prefix(['+', '-']).unwrap_or(token);
    let literal = matches!(unsigned, "Infinity" | "NaN")
        || unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.');
    if !literal {
        return None;
    }
    token.parse().ok()
}

fn relative_error(reference: f64, candidate: f64, eps: f64) -> f64 {
    if reference.abs() > eps {
        (candidate / reference - 1.0).abs()
    } else {
        candidate.abs()
    }
}

/// Debug formatting keeps the fractional part (`3.0`, not `3`).
fn show(value: f64) -> String {
    format!("{value:?}")
}
