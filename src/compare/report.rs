//! Report types for the comparison battery.
//!
//! A comparison produces an ordered list of [`Check`] results plus the
//! optional labeled error breakdown. Rendering to ANSI-colored text is a
//! presentation concern layered on top; the structured report is the
//! contract and serializes cleanly.

use crate::fit::LineFit;
use crate::rel_errors::{render_rel_errors, RelError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Write as _;

/// Outcome of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// The check's threshold was met.
    Pass,
    /// The check's threshold was not met.
    Fail,
    /// Diagnostic output carrying no pass/fail judgment.
    Info,
}

impl Verdict {
    /// Status icon for terminal rendering.
    #[must_use]
    pub fn icon(&self) -> &'static str {
        match self {
            Verdict::Pass => "✓",
            Verdict::Fail => "✗",
            Verdict::Info => "·",
        }
    }

    /// ANSI color escape for terminal rendering (green/red/yellow).
    #[must_use]
    pub fn color(&self) -> &'static str {
        match self {
            Verdict::Pass => "\x1b[32m",
            Verdict::Fail => "\x1b[31m",
            Verdict::Info => "\x1b[33m",
        }
    }

    /// True for `Pass`.
    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }

    /// True for `Fail`.
    #[must_use]
    pub fn is_fail(&self) -> bool {
        matches!(self, Verdict::Fail)
    }
}

/// The computed value attached to a check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CheckValue {
    /// A plain number (distance, similarity, mean error...).
    Num(f64),
    /// Free-form text (e.g. why a check did not run).
    Text(String),
    /// A count out of a total, rendered as `count/total (pct%)`.
    Ratio {
        /// Matching entries
        count: usize,
        /// Total entries
        total: usize,
    },
    /// A least-squares fit summary.
    Fit(LineFit),
}

impl fmt::Display for CheckValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckValue::Num(v) => write!(f, "{v}"),
            CheckValue::Text(s) => write!(f, "{s}"),
            CheckValue::Ratio { count, total } => {
                let pct = if *total == 0 {
                    0.0
                } else {
                    *count as f64 * 100.0 / *total as f64
                };
                write!(f, "{count}/{total} ({pct:.1}%)")
            }
            CheckValue::Fit(fit) => write!(
                f,
                "slope={}, intercept={}, residual={}",
                fit.slope, fit.intercept, fit.residual
            ),
        }
    }
}

/// One named check from the battery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Check {
    /// Check name (e.g. `"cosine-sim"`).
    pub name: String,
    /// Computed value.
    pub value: CheckValue,
    /// Pass/fail/informational outcome.
    pub verdict: Verdict,
}

/// Ordered results of one comparison run.
///
/// Checks appear in the fixed order the battery ran them. The report is
/// returned to the caller and not retained anywhere; comparisons share no
/// state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Optional comparison label.
    pub name: Option<String>,
    /// Number of compared entries.
    pub n: usize,
    /// Display label for the expected vector.
    pub expect_label: String,
    /// Display label for the computed vector.
    pub got_label: String,
    /// The check battery results, in execution order.
    pub checks: Vec<Check>,
    /// Labeled breakdown of the largest relative errors (empty unless an
    /// alphabet was supplied).
    pub rel_errors: Vec<RelError>,
}

impl Report {
    /// Looks up a check by name.
    #[must_use]
    pub fn check(&self, name: &str) -> Option<&Check> {
        self.checks.iter().find(|c| c.name == name)
    }

    /// True when no check failed (informational checks don't count).
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| !c.verdict.is_fail())
    }

    /// Number of passing checks.
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.verdict.is_pass()).count()
    }

    /// Number of failing checks.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.verdict.is_fail()).count()
    }

    /// Generates a one-line summary.
    #[must_use]
    pub fn summary(&self) -> String {
        let passed = self.passed_count();
        let failed = self.failed_count();
        if self.all_passed() {
            format!("\x1b[32m✓ all {passed} checks passed\x1b[0m")
        } else {
            format!(
                "\x1b[31m✗ {failed}/{} checks failed\x1b[0m",
                self.checks.len()
            )
        }
    }

    /// Renders the full report as ANSI-colored text, one check per line.
    ///
    /// Green marks passing checks, red failing ones, yellow informational
    /// output. The labeled error breakdown follows when present.
    #[must_use]
    pub fn render(&self) -> String {
        const RESET: &str = "\x1b[0m";

        let mut out = String::new();
        match &self.name {
            Some(name) => {
                let _ = writeln!(out, "Comparison ({name}): n={}", self.n);
            }
            None => {
                let _ = writeln!(out, "Comparison: n={}", self.n);
            }
        }
        for check in &self.checks {
            let color = check.verdict.color();
            let _ = writeln!(
                out,
                "  {color}{}{RESET} {}: {color}{}{RESET}",
                check.verdict.icon(),
                check.name,
                check.value
            );
        }
        if !self.rel_errors.is_empty() {
            out.push_str(&render_rel_errors(&self.rel_errors));
        }
        out
    }
}
