//! Order-insensitive comparison: the candidate must be a permutation of the reference.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::core::comparator::CaseComparator;
use crate::core::diagnostics::Findings;
use crate::core::types::CaseWindows;

/// Where the permuted elements live in a case window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum PermutationLayout {
    /// Whitespace-separated tokens of the first line.
    #[default]
    SingleLine,
    /// One element per line.
    MultiLine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PermutationComparator {
    pub layout: PermutationLayout,
}

impl PermutationComparator {
    pub fn new(layout: PermutationLayout) -> Self {
        Self { layout }
    }

    fn elements<'a>(&self, window: &'a [String]) -> Vec<&'a str> {
        match self.layout {
            PermutationLayout::SingleLine => window
                .first()
                .map(|line| line.split_whitespace().collect())
                .unwrap_or_default(),
            PermutationLayout::MultiLine => window.iter().map(String::as_str).collect(),
        }
    }
}

impl CaseComparator for PermutationComparator {
    fn compare(&self, case: &CaseWindows<'_>, findings: &mut Findings<'_>) -> Result<()> {
        let mut expected = self.elements(case.reference);
        let mut actual = self.elements(case.candidate);

        if expected.len() != actual.len() {
            findings.mismatch("Incorrect number of outputs", expected.len(), actual.len());
            return Ok(());
        }

        expected.sort_unstable();
        actual.sort_unstable();
        if let Some((want, got)) = expected.iter().zip(&actual).find(|(want, got)| want != got) {
            findings.mismatch("Not a permutation! First difference:", want, got);
        }
        Ok(())
    }
}
