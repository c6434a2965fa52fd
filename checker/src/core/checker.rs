//! A complete checking policy: case count, input sizing and comparator.

use crate::core::comparator::Comparator;
use crate::core::precision::PrecisionComparator;
use crate::core::strategy::{CaseCount, InputSizing};

/// The three capabilities the verifier asks of a problem's checker.
pub struct Checker {
    pub case_count: CaseCount,
    pub input_sizing: InputSizing,
    pub comparator: Comparator,
}

impl Checker {
    pub fn new(case_count: CaseCount, input_sizing: InputSizing, comparator: Comparator) -> Self {
        Self {
            case_count,
            input_sizing,
            comparator,
        }
    }
}

impl Default for Checker {
    /// Multiple single-line cases compared with the default precision policy.
    fn default() -> Self {
        Self::new(
            CaseCount::Multiple,
            InputSizing::SingleLine,
            Comparator::Precision(PrecisionComparator::default()),
        )
    }
}
