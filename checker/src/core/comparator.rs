//! Pluggable per-case correctness predicates.
//!
//! The [`CaseComparator`] trait is the single contract every policy
//! implements. [`Comparator`] is the closed set of built-in policies plus a
//! `Custom` arm, dispatched through that same trait.
//!
//! A comparator reports contestant mistakes through [`Findings`]. Returning
//! `Err` (or panicking) means the comparator itself broke; the verifier
//! records that as a crash diagnostic and moves on to the next case.

use anyhow::Result;

use crate::core::diagnostics::Findings;
use crate::core::exact::ExactComparator;
use crate::core::permutation::PermutationComparator;
use crate::core::precision::PrecisionComparator;
use crate::core::rational::RationalComparator;
use crate::core::types::CaseWindows;

/// Contract shared by built-in and custom comparators.
pub trait CaseComparator {
    fn compare(&self, case: &CaseWindows<'_>, findings: &mut Findings<'_>) -> Result<()>;
}

/// Comparison policy applied to every case.
pub enum Comparator {
    Precision(PrecisionComparator),
    Permutation(PermutationComparator),
    Rational(RationalComparator),
    Exact(ExactComparator),
    Custom(Box<dyn CaseComparator>),
}

impl Comparator {
    /// Short policy name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Comparator::Precision(_) => "precision",
            Comparator::Permutation(_) => "permutation",
            Comparator::Rational(_) => "rational",
            Comparator::Exact(_) => "exact",
            Comparator::Custom(_) => "custom",
        }
    }
}

impl CaseComparator for Comparator {
    fn compare(&self, case: &CaseWindows<'_>, findings: &mut Findings<'_>) -> Result<()> {
        match self {
            Comparator::Precision(inner) => inner.compare(case, findings),
            Comparator::Permutation(inner) => inner.compare(case, findings),
            Comparator::Rational(inner) => inner.compare(case, findings),
            Comparator::Exact(inner) => inner.compare(case, findings),
            Comparator::Custom(inner) => inner.compare(case, findings),
        }
    }
}

/// Record a failure and return `false` if the windows differ in line count.
pub(crate) fn same_line_count(
    reference: &[String],
    candidate: &[String],
    findings: &mut Findings<'_>,
) -> bool {
    if reference.len() != candidate.len() {
        findings.mismatch(
            "Incorrect number of output lines",
            reference.len(),
            candidate.len(),
        );
        return false;
    }
    true
}

/// Split one line pair on whitespace and pair up the tokens.
///
/// Records a failure and returns `None` if the token counts differ.
/// `line_no` is 1-based and only used in the message.
pub(crate) fn paired_tokens<'a>(
    line_no: usize,
    reference: &'a str,
    candidate: &'a str,
    findings: &mut Findings<'_>,
) -> Option<Vec<(&'a str, &'a str)>> {
    let expected: Vec<&str> = reference.split_whitespace().collect();
    let actual: Vec<&str> = candidate.split_whitespace().collect();
    if expected.len() != actual.len() {
        findings.mismatch(
            format!("Incorrect number of outputs in line {line_no}"),
            expected.len(),
            actual.len(),
        );
        return None;
    }
    Some(expected.into_iter().zip(actual).collect())
}
