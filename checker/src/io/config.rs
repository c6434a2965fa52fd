//! Checker configuration stored as TOML next to the problem data.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::checker::Checker;
use crate::core::comparator::Comparator;
use crate::core::exact::ExactComparator;
use crate::core::permutation::{PermutationComparator, PermutationLayout};
use crate::core::precision::{DEFAULT_EPSILON, ErrorMode, PrecisionComparator};
use crate::core::rational::RationalComparator;
use crate::core::strategy::{CaseCount, InputSizing};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum CaseCountKind {
    Singular,
    #[default]
    Multiple,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum InputLinesKind {
    #[default]
    SingleLine,
    FirstInteger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ComparatorKind {
    #[default]
    Precision,
    Permutation,
    Rational,
    Exact,
}

/// Checker configuration (TOML).
///
/// Every field is optional; a missing file or section means the default
/// policy: multiple single-line cases compared with absolute precision.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CheckerConfig {
    pub cases: CaseCountKind,
    pub input_lines: InputLinesKind,
    pub comparator: ComparatorKind,
    pub precision: PrecisionConfig,
    pub permutation: PermutationConfig,
    pub exact: ExactConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PrecisionConfig {
    pub epsilon: f64,
    pub mode: ErrorMode,
}

impl Default for PrecisionConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            mode: ErrorMode::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PermutationConfig {
    pub layout: PermutationLayout,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExactConfig {
    pub case_sensitive: bool,
}

impl Default for ExactConfig {
    fn default() -> Self {
        Self {
            case_sensitive: true,
        }
    }
}

/// Values given on the command line; `None` keeps the configured value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub cases: Option<CaseCountKind>,
    pub input_lines: Option<InputLinesKind>,
    pub comparator: Option<ComparatorKind>,
    pub epsilon: Option<f64>,
    pub mode: Option<ErrorMode>,
    pub layout: Option<PermutationLayout>,
    pub case_insensitive: bool,
}

impl CheckerConfig {
    pub fn validate(&self) -> Result<()> {
        let epsilon = self.precision.epsilon;
        if !epsilon.is_finite() {
            return Err(anyhow!("precision.epsilon must be finite"));
        }
        if epsilon < 0.0 {
            return Err(anyhow!("precision.epsilon must be >= 0"));
        }
        if self.precision.mode == ErrorMode::FactorBounds && epsilon == 0.0 {
            return Err(anyhow!(
                "precision.epsilon must be non-zero in factor_bounds mode"
            ));
        }
        Ok(())
    }

    /// Build the checker this configuration describes.
    pub fn to_checker(&self) -> Checker {
        let case_count = match self.cases {
            CaseCountKind::Singular => CaseCount::Singular,
            CaseCountKind::Multiple => CaseCount::Multiple,
        };
        let input_sizing = match self.input_lines {
            InputLinesKind::SingleLine => InputSizing::SingleLine,
            InputLinesKind::FirstInteger => InputSizing::FirstInteger,
        };
        let comparator = match self.comparator {
            ComparatorKind::Precision => Comparator::Precision(PrecisionComparator::new(
                self.precision.epsilon,
                self.precision.mode,
            )),
            ComparatorKind::Permutation => {
                Comparator::Permutation(PermutationComparator::new(self.permutation.layout))
            }
            ComparatorKind::Rational => Comparator::Rational(RationalComparator),
            ComparatorKind::Exact => {
                Comparator::Exact(ExactComparator::new(self.exact.case_sensitive))
            }
        };
        Checker::new(case_count, input_sizing, comparator)
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `CheckerConfig::default()`.
pub fn load_config(path: &Path) -> Result<CheckerConfig> {
    if !path.exists() {
        let cfg = CheckerConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    read_config(path)
}

/// Load config from a TOML file that must exist.
pub fn read_config(path: &Path) -> Result<CheckerConfig> {
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: CheckerConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Apply command-line overrides to the base config.
pub fn apply_overrides(
    mut base: CheckerConfig,
    overrides: &ConfigOverrides,
) -> Result<CheckerConfig> {
    if let Some(cases) = overrides.cases {
        base.cases = cases;
    }
    if let Some(input_lines) = overrides.input_lines {
        base.input_lines = input_lines;
    }
    if let Some(comparator) = overrides.comparator {
        base.comparator = comparator;
    }
    if let Some(epsilon) = overrides.epsilon {
        base.precision.epsilon = epsilon;
    }
    if let Some(mode) = overrides.mode {
        base.precision.mode = mode;
    }
    if let Some(layout) = overrides.layout {
        base.permutation.layout = layout;
    }
    if overrides.case_insensitive {
        base.exact.case_sensitive = false;
    }
    base.validate()?;
    Ok(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, CheckerConfig::default());
        assert_eq!(cfg.precision.epsilon, DEFAULT_EPSILON);
        assert!(cfg.exact.case_sensitive);
    }

    #[test]
    fn read_missing_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        assert!(read_config(&temp.path().join("missing.toml")).is_err());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("checker.toml");
        fs::write(
            &path,
            "comparator = \"permutation\"\ninput_lines = \"first_integer\"\n\n[permutation]\nlayout = \"multi_line\"\n",
        )
        .expect("write");
        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.comparator, ComparatorKind::Permutation);
        assert_eq!(cfg.input_lines, InputLinesKind::FirstInteger);
        assert_eq!(cfg.permutation.layout, PermutationLayout::MultiLine);
        assert_eq!(cfg.cases, CaseCountKind::Multiple);
        assert_eq!(cfg.precision, PrecisionConfig::default());
    }

    #[test]
    fn rejects_unusable_epsilon() {
        let mut cfg = CheckerConfig::default();
        cfg.precision.epsilon = -1.0;
        assert!(cfg.validate().is_err());
        cfg.precision.epsilon = f64::NAN;
        assert!(cfg.validate().is_err());
        cfg.precision.epsilon = 0.0;
        assert!(cfg.validate().is_ok());
        cfg.precision.mode = ErrorMode::FactorBounds;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn invalid_file_reports_path() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("checker.toml");
        fs::write(&path, "comparator = \"fuzzy\"\n").expect("write");
        let err = load_config(&path).expect_err("invalid comparator");
        assert!(format!("{err:#}").contains("checker.toml"));
    }

    #[test]
    fn overrides_win_over_file_values() {
        let mut base = CheckerConfig::default();
        base.precision.epsilon = 0.5;
        base.comparator = ComparatorKind::Rational;
        let overrides = ConfigOverrides {
            comparator: Some(ComparatorKind::Exact),
            epsilon: Some(1e-3),
            case_insensitive: true,
            ..ConfigOverrides::default()
        };
        let merged = apply_overrides(base, &overrides).expect("merge");
        assert_eq!(merged.comparator, ComparatorKind::Exact);
        assert_eq!(merged.precision.epsilon, 1e-3);
        assert!(!merged.exact.case_sensitive);
        assert_eq!(merged.cases, CaseCountKind::Multiple);
    }

    #[test]
    fn overrides_are_validated() {
        let overrides = ConfigOverrides {
            epsilon: Some(-0.1),
            ..ConfigOverrides::default()
        };
        assert!(apply_overrides(CheckerConfig::default(), &overrides).is_err());
    }

    #[test]
    fn builds_selected_comparator() {
        let cfg = CheckerConfig {
            comparator: ComparatorKind::Exact,
            exact: ExactConfig {
                case_sensitive: false,
            },
            ..CheckerConfig::default()
        };
        let checker = cfg.to_checker();
        assert_eq!(checker.comparator.name(), "exact");
        assert!(matches!(checker.case_count, CaseCount::Multiple));
        assert!(matches!(checker.input_sizing, InputSizing::SingleLine));
    }
}
