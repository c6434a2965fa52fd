//! Token-for-token comparison.
//!
//! The default policy for problems whose answers are not numeric: lines and
//! tokens must match exactly, whitespace amounts aside.

use anyhow::Result;

use crate::core::comparator::{CaseComparator, paired_tokens, same_line_count};
use crate::core::diagnostics::Findings;
use crate::core::types::CaseWindows;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExactComparator {
    pub case_sensitive: bool,
}

impl Default for ExactComparator {
    fn default() -> Self {
        Self {
            case_sensitive: true,
        }
    }
}

impl ExactComparator {
    pub fn new(case_sensitive: bool) -> Self {
        Self { case_sensitive }
    }

    fn tokens_match(&self, expected: &str, actual: &str) -> bool {
        if self.case_sensitive {
            expected == actual
        } else {
            expected.to_lowercase() == actual.to_lowercase()
        }
    }
}

impl CaseComparator for ExactComparator {
    fn compare(&self, case: &CaseWindows<'_>, findings: &mut Findings<'_>) -> Result<()> {
        if !same_line_count(case.reference, case.candidate, findings) {
            return Ok(());
        }
        for (line, (expected, actual)) in case.reference.iter().zip(case.candidate).enumerate() {
            let Some(pairs) = paired_tokens(line + 1, expected, actual, findings) else {
                return Ok(());
            };
            if let Some((expected, actual)) = pairs
                .into_iter()
                .find(|(expected, actual)| !self.tokens_match(expected, actual))
            {
                findings.mismatch("Result does not match", expected, actual);
                return Ok(());
            }
        }
        Ok(())
    }
}
