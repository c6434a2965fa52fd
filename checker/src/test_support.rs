//! Test-only helpers for building streams, checkers and on-disk fixtures.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use tempfile::TempDir;

use crate::core::checker::Checker;
use crate::core::comparator::CaseComparator;
use crate::core::diagnostics::{Findings, Report};
use crate::core::types::CaseWindows;
use crate::io::lines::LineReader;
use crate::verify::verify_streams;

/// Line reader over an in-memory string.
pub fn lines(text: &str) -> LineReader<Cursor<Vec<u8>>> {
    LineReader::new("test", Cursor::new(text.as_bytes().to_vec()))
}

/// Owned window from string literals.
pub fn window(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|line| (*line).to_string()).collect()
}

/// Verify three in-memory streams.
pub fn run(checker: &Checker, input: &str, candidate: &str, reference: &str) -> Report {
    verify_streams(
        checker,
        input.as_bytes(),
        candidate.as_bytes(),
        reference.as_bytes(),
    )
}

/// Comparator that fails on one case, either by panicking or by returning an error.
pub struct CrashingComparator {
    case: usize,
    panics: bool,
}

impl CrashingComparator {
    pub fn on_case(case: usize, panics: bool) -> Self {
        Self { case, panics }
    }
}

impl CaseComparator for CrashingComparator {
    fn compare(&self, _case: &CaseWindows<'_>, findings: &mut Findings<'_>) -> Result<()> {
        if findings.context().index != self.case {
            return Ok(());
        }
        if self.panics {
            panic!("comparator blew up on case {}", self.case);
        }
        bail!("comparator gave up on case {}", self.case)
    }
}

/// Temporary directory holding an input file, an answer file and a feedback dir.
pub struct Fixture {
    temp: TempDir,
}

impl Fixture {
    pub fn new(input: &str, answer: &str) -> Self {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::write(temp.path().join("input.txt"), input).expect("write input");
        fs::write(temp.path().join("answer.txt"), answer).expect("write answer");
        fs::create_dir(temp.path().join("feedback")).expect("create feedback dir");
        Self { temp }
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    pub fn input(&self) -> PathBuf {
        self.root().join("input.txt")
    }

    pub fn answer(&self) -> PathBuf {
        self.root().join("answer.txt")
    }

    pub fn feedback_dir(&self) -> PathBuf {
        self.root().join("feedback")
    }

    /// Write `checker.toml` next to the data files and return its path.
    pub fn write_config(&self, contents: &str) -> PathBuf {
        let path = self.root().join("checker.toml");
        fs::write(&path, contents).expect("write config");
        path
    }

    /// Read a feedback file, empty when absent.
    pub fn feedback(&self, name: &str) -> String {
        fs::read_to_string(self.feedback_dir().join(name)).unwrap_or_default()
    }
}
