//! Output validator for judged programming problems.
//!
//! Reads the candidate's output from stdin and verifies it against the
//! reference answer, case by case. Exit code 42 accepts, 43 rejects and
//! 1 signals a judging error.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use checker::core::diagnostics::Report;
use checker::core::permutation::PermutationLayout;
use checker::core::precision::ErrorMode;
use checker::exit_codes;
use checker::io::config::{
    CaseCountKind, CheckerConfig, ComparatorKind, ConfigOverrides, InputLinesKind, apply_overrides,
    load_config, read_config,
};
use checker::io::feedback::write_feedback;
use checker::verify::verify_streams;
use clap::Parser;
use tracing::debug;

/// Config file picked up from the working directory when `--config` is absent.
const DEFAULT_CONFIG: &str = "checker.toml";

#[derive(Parser, Debug)]
#[command(
    name = "checker",
    version,
    about = "Verify a candidate's output (stdin) against the reference answer"
)]
struct Cli {
    /// Test input file.
    input: PathBuf,
    /// Reference output file.
    answer: PathBuf,
    /// Existing directory receiving judgemessage.txt, teammessage.txt and report.json.
    feedback_dir: Option<PathBuf>,

    /// Checker configuration (TOML). Defaults to ./checker.toml if present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, value_enum)]
    comparator: Option<ComparatorKind>,
    #[arg(long, value_enum)]
    cases: Option<CaseCountKind>,
    #[arg(long, value_enum)]
    input_lines: Option<InputLinesKind>,
    /// Error bound for the precision comparator.
    #[arg(long, alias = "precision")]
    epsilon: Option<f64>,
    #[arg(long, value_enum)]
    mode: Option<ErrorMode>,
    #[arg(long, value_enum)]
    layout: Option<PermutationLayout>,
    /// Compare tokens case-insensitively (exact comparator).
    #[arg(long)]
    case_insensitive: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            cases: self.cases,
            input_lines: self.input_lines,
            comparator: self.comparator,
            epsilon: self.epsilon,
            mode: self.mode,
            layout: self.layout,
            case_insensitive: self.case_insensitive,
        }
    }
}

fn main() {
    checker::logging::init();
    match run(Cli::parse()) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::JUDGING_ERROR);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    let config = resolve_config(&cli)?;
    debug!(?config, "configuration resolved");
    let checker = config.to_checker();

    let input = open(&cli.input)?;
    let answer = open(&cli.answer)?;
    let report = verify_streams(&checker, input, io::stdin().lock(), answer);

    emit(&report, cli.feedback_dir.as_deref())?;
    Ok(report.verdict.exit_code())
}

fn resolve_config(cli: &Cli) -> Result<CheckerConfig> {
    let base = match &cli.config {
        Some(path) => read_config(path)?,
        None => load_config(Path::new(DEFAULT_CONFIG))?,
    };
    apply_overrides(base, &cli.overrides()).context("apply command-line overrides")
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    Ok(BufReader::new(file))
}

fn emit(report: &Report, feedback_dir: Option<&Path>) -> Result<()> {
    print!("{}", report.render_text());
    if let Some(fault) = &report.fatal {
        eprintln!("judging error: {}", fault.message);
    }
    if let Some(dir) = feedback_dir {
        write_feedback(dir, report)?;
    }
    Ok(())
}
