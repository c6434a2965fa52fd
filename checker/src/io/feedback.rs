//! Feedback directory output.
//!
//! `judgemessage.txt` is appended to so earlier validators in the same run
//! keep their text; `teammessage.txt` and `report.json` are overwritten.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::core::diagnostics::Report;
use crate::core::types::Verdict;

pub const JUDGE_MESSAGE: &str = "judgemessage.txt";
pub const TEAM_MESSAGE: &str = "teammessage.txt";
pub const REPORT_JSON: &str = "report.json";

/// Write the report into an existing feedback directory.
pub fn write_feedback(dir: &Path, report: &Report) -> Result<()> {
    append_judge_message(&dir.join(JUDGE_MESSAGE), &report.render_text())?;

    let team_path = dir.join(TEAM_MESSAGE);
    let team = match report.verdict {
        Verdict::WrongAnswer => "Wrong Answer\n",
        Verdict::Accepted | Verdict::JudgingError => "",
    };
    fs::write(&team_path, team).with_context(|| format!("write {}", team_path.display()))?;

    write_report(&dir.join(REPORT_JSON), report)
}

/// Pretty-printed JSON with a trailing newline.
pub fn write_report(path: &Path, report: &Report) -> Result<()> {
    let contents = serde_json::to_string_pretty(report).context("serialize report")?;
    fs::write(path, format!("{contents}\n"))
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

fn append_judge_message(path: &Path, text: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open {}", path.display()))?;
    file.write_all(text.as_bytes())
        .with_context(|| format!("append {}", path.display()))?;
    Ok(())
}
