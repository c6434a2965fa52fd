//! Exact comparison of `p/q` fractions.
//!
//! Fractions are compared by cross-multiplication in arbitrary precision, so
//! `1/2` and `2/4` are equal and no value is ever rounded.

use anyhow::Result;
use num_bigint::BigInt;

use crate::core::comparator::{CaseComparator, paired_tokens, same_line_count};
use crate::core::diagnostics::Findings;
use crate::core::types::CaseWindows;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RationalComparator;

/// Why a token is not a well-formed `p/q` fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Malformed {
    Slash,
    Digits,
}

impl Malformed {
    fn message(self) -> &'static str {
        match self {
            Malformed::Slash => {
                "Expected a rational number but got something else (should contain exactly one slash)"
            }
            Malformed::Digits => {
                "Expected a rational number but got something else (should consist of numbers and a slash only)"
            }
        }
    }
}

impl RationalComparator {
    /// Compare one token pair, recording at most one failure.
    fn check_token(&self, expected: &str, actual: &str, findings: &mut Findings<'_>) {
        if expected == actual {
            return;
        }
        let reference = match parse_fraction(expected) {
            Ok(value) => value,
            Err(reason) => {
                findings.mismatch(reason.message(), "rational number", expected);
                return;
            }
        };
        let candidate = match parse_fraction(actual) {
            Ok(value) => value,
            Err(reason) => {
                findings.mismatch(reason.message(), "rational number", actual);
                return;
            }
        };
        let (n1, d1) = reference;
        let (n2, d2) = candidate;
        if n1 * &d2 != n2 * &d1 {
            findings.mismatch(
                "Rational numbers do not represent the same value",
                expected,
                actual,
            );
        }
    }
}

impl CaseComparator for RationalComparator {
    fn compare(&self, case: &CaseWindows<'_>, findings: &mut Findings<'_>) -> Result<()> {
        if !same_line_count(case.reference, case.candidate, findings) {
            return Ok(());
        }
        for (line, (expected, actual)) in case.reference.iter().zip(case.candidate).enumerate() {
            let Some(pairs) = paired_tokens(line + 1, expected, actual, findings) else {
                return Ok(());
            };
            // Value mismatches do not stop the case: every token is reported.
            for (expected, actual) in pairs {
                self.check_token(expected, actual, findings);
            }
        }
        Ok(())
    }
}

fn parse_fraction(token: &str) -> Result<(BigInt, BigInt), Malformed> {
    let mut parts = token.split('/');
    let (Some(numerator), Some(denominator), None) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(Malformed::Slash);
    };
    let numerator = parse_integer(numerator).ok_or(Malformed::Digits)?;
    let denominator = parse_integer(denominator).ok_or(Malformed::Digits)?;
    Ok((numerator, denominator))
}

/// Optional sign followed by at least one ASCII digit.
fn parse_integer(text: &str) -> Option<BigInt> {
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let magnitude: BigInt = digits.parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
