//! The comparator: a fixed battery of numerical agreement checks.
//!
//! Given two equal-length vectors `expect` and `got`, [`compare`] runs every
//! check and returns an ordered [`Report`]. There is no early exit: a failed
//! check never stops the battery, so the report always covers the full
//! suite. Checks that need at least two points are skipped (not failed) for
//! shorter input.
//!
//! Two input modes are supported: raw slices ([`compare`] /
//! [`compare_with`]) and named columns of a [`DataFrame`]
//! ([`compare_columns`]). Both resolve to the same pair-of-slices path
//! before any check runs.

pub mod report;

pub use report::{Check, CheckValue, Report, Verdict};

use crate::data::DataFrame;
use crate::distance::{cosine, linf};
use crate::error::{CotejarError, Result};
use crate::fit::least_squares;
use crate::rel_errors::largest_rel_errors;

/// Pass threshold for the cosine similarity check.
pub const COSINE_THRESHOLD: f64 = 0.99999;
/// Pass threshold for the L-infinity distance check.
pub const LINF_THRESHOLD: f64 = 1e-10;
/// Pass threshold for the mean relative error check.
pub const MEAN_REL_ERROR_THRESHOLD: f64 = 0.01;
/// Pass threshold for the mean rescaled error check.
pub const MEAN_RESCALED_ERROR_THRESHOLD: f64 = 1e-5;

/// Options for a comparison run.
///
/// All options are independently toggleable; the defaults match a plain
/// `compare(expect, got)` call.
///
/// # Examples
///
/// ```
/// use cotejar::compare::CompareOptions;
///
/// let options = CompareOptions::new()
///     .with_name("gradient check")
///     .with_regression(true)
///     .with_p_larger(0.95);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CompareOptions {
    name: Option<String>,
    p_larger: Option<f64>,
    regression: bool,
    alphabet: Option<Vec<String>>,
    expect_label: Option<String>,
    got_label: Option<String>,
}

impl CompareOptions {
    /// Creates options with defaults: no name, `p_larger = 0.9`, no
    /// regression fit, no alphabet, labels `"expect"` / `"got"`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the report header label.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the systematic-bias threshold: the fraction of entries at which
    /// one side must exceed the other before the bias check fires.
    ///
    /// Must be in `(0, 1]`; validated when the comparison runs.
    #[must_use]
    pub fn with_p_larger(mut self, p_larger: f64) -> Self {
        self.p_larger = Some(p_larger);
        self
    }

    /// Enables the least-squares regression diagnostic.
    #[must_use]
    pub fn with_regression(mut self, regression: bool) -> Self {
        self.regression = regression;
        self
    }

    /// Supplies per-element labels, enabling the largest-relative-error
    /// breakdown. Must match the input length.
    #[must_use]
    pub fn with_alphabet<S: Into<String>>(mut self, alphabet: Vec<S>) -> Self {
        self.alphabet = Some(alphabet.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the display label for the expected vector.
    #[must_use]
    pub fn with_expect_label(mut self, label: impl Into<String>) -> Self {
        self.expect_label = Some(label.into());
        self
    }

    /// Sets the display label for the computed vector.
    #[must_use]
    pub fn with_got_label(mut self, label: impl Into<String>) -> Self {
        self.got_label = Some(label.into());
        self
    }
}

/// Compares two vectors with default options.
///
/// # Examples
///
/// ```
/// use cotejar::compare::compare;
///
/// let report = compare(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]).unwrap();
/// assert!(report.all_passed());
/// assert!(report.check("Linf").unwrap().verdict.is_pass());
/// ```
///
/// # Errors
///
/// Returns `DimensionMismatch` if the slices differ in length and
/// `EmptyInput` for zero-length input.
pub fn compare(expect: &[f64], got: &[f64]) -> Result<Report> {
    compare_with(expect, got, CompareOptions::new())
}

/// Compares two vectors with explicit options.
///
/// # Errors
///
/// Returns `DimensionMismatch` if the slices (or alphabet) differ in
/// length, `EmptyInput` for zero-length input, and `InvalidOption` if
/// `p_larger` is outside `(0, 1]`.
pub fn compare_with(expect: &[f64], got: &[f64], options: CompareOptions) -> Result<Report> {
    let expect_label = options
        .expect_label
        .clone()
        .unwrap_or_else(|| "expect".to_string());
    let got_label = options
        .got_label
        .clone()
        .unwrap_or_else(|| "got".to_string());
    run_battery(expect, got, &options, expect_label, got_label)
}

/// Compares two named columns of a [`DataFrame`].
///
/// Column names double as display labels unless overridden in `options`.
///
/// # Examples
///
/// ```
/// use cotejar::compare::{compare_columns, CompareOptions};
/// use cotejar::data::DataFrame;
///
/// let df = DataFrame::new(vec![
///     ("analytic".to_string(), vec![1.0, 2.0]),
///     ("numeric".to_string(), vec![1.0, 2.0]),
/// ]).unwrap();
///
/// let report = compare_columns(&df, "analytic", "numeric", CompareOptions::new()).unwrap();
/// assert!(report.all_passed());
/// assert_eq!(report.expect_label, "analytic");
/// ```
///
/// # Errors
///
/// Returns `ColumnNotFound` if either column is missing, plus every error
/// [`compare_with`] can return.
pub fn compare_columns(
    data: &DataFrame,
    expect_col: &str,
    got_col: &str,
    options: CompareOptions,
) -> Result<Report> {
    let expect = data.column(expect_col)?;
    let got = data.column(got_col)?;
    let expect_label = options
        .expect_label
        .clone()
        .unwrap_or_else(|| expect_col.to_string());
    let got_label = options
        .got_label
        .clone()
        .unwrap_or_else(|| got_col.to_string());
    run_battery(expect, got, &options, expect_label, got_label)
}

/// The fixed check battery over a resolved pair of slices.
fn run_battery(
    expect: &[f64],
    got: &[f64],
    options: &CompareOptions,
    expect_label: String,
    got_label: String,
) -> Result<Report> {
    let p_larger = options.p_larger.unwrap_or(0.9);
    if !(p_larger > 0.0 && p_larger <= 1.0) {
        return Err(CotejarError::InvalidOption {
            param: "p_larger".to_string(),
            value: format!("{p_larger}"),
            constraint: "0 < p <= 1".to_string(),
        });
    }

    if expect.len() != got.len() {
        return Err(CotejarError::dimension_mismatch(
            "expect len",
            expect.len(),
            got.len(),
        ));
    }
    let n = expect.len();
    if n == 0 {
        return Err(CotejarError::empty_input("expect/got"));
    }
    if let Some(alphabet) = &options.alphabet {
        if alphabet.len() != n {
            return Err(CotejarError::dimension_mismatch(
                "alphabet len",
                n,
                alphabet.len(),
            ));
        }
    }

    let mut checks = Vec::new();

    // Finiteness: emitted only when something is non-finite, as a failure.
    let got_finite = got.iter().filter(|v| v.is_finite()).count();
    if got_finite < n {
        checks.push(Check {
            name: "got finite".to_string(),
            value: CheckValue::Ratio {
                count: got_finite,
                total: n,
            },
            verdict: Verdict::Fail,
        });
    }
    let expect_finite = expect.iter().filter(|v| v.is_finite()).count();
    if expect_finite < n {
        checks.push(Check {
            name: "expect finite".to_string(),
            value: CheckValue::Ratio {
                count: expect_finite,
                total: n,
            },
            verdict: Verdict::Fail,
        });
    }

    // Cosine similarity. NaN (undefined direction, or non-finite input)
    // compares false and fails.
    let c = cosine(expect, got);
    checks.push(Check {
        name: "cosine-sim".to_string(),
        value: CheckValue::Num(c),
        verdict: verdict_if(c > COSINE_THRESHOLD),
    });

    // L-infinity distance.
    let d = linf(expect, got);
    checks.push(Check {
        name: "Linf".to_string(),
        value: CheckValue::Num(d),
        verdict: verdict_if(d < LINF_THRESHOLD),
    });

    // Same-sign agreement. The per-index test is literally
    // !((x > 0) ^ (y > 0)): zero never counts as positive, so zero paired
    // with a positive value disagrees and zero paired with zero agrees.
    let agree = expect
        .iter()
        .zip(got.iter())
        .filter(|(&x, &y)| !((x > 0.0) ^ (y > 0.0)))
        .count();
    checks.push(Check {
        name: "same-sign".to_string(),
        value: CheckValue::Ratio {
            count: agree,
            total: n,
        },
        verdict: verdict_if(agree == n),
    });

    // Mean relative error: |x - y| / max(|x|, |y|), denominator 1.0 when
    // either value is exactly zero. Non-finite per-index results are
    // excluded from the mean (finiteness is its own check above).
    let rel_errors_per_index = expect.iter().zip(got.iter()).map(|(&x, &y)| {
        let denom = if x != 0.0 && y != 0.0 {
            x.abs().max(y.abs())
        } else {
            1.0
        };
        (x - y).abs() / denom
    });
    let finite: Vec<f64> = rel_errors_per_index.filter(|r| r.is_finite()).collect();
    let mean_rel = if finite.is_empty() {
        f64::NAN
    } else {
        finite.iter().sum::<f64>() / finite.len() as f64
    };
    checks.push(Check {
        name: "mean relative error".to_string(),
        value: CheckValue::Num(mean_rel),
        verdict: verdict_if(mean_rel <= MEAN_REL_ERROR_THRESHOLD),
    });

    if n >= 2 {
        // Rescaled error: normalize each vector by its own max-abs so a
        // shared multiplicative constant cancels out.
        let mut es = expect.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
        let mut gs = got.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
        if es == 0.0 {
            es = 1.0;
        }
        if gs == 0.0 {
            gs = 1.0;
        }
        let mean_rescaled = expect
            .iter()
            .zip(got.iter())
            .map(|(&x, &y)| (x / es - y / gs).abs())
            .sum::<f64>()
            / n as f64;
        checks.push(Check {
            name: "mean rescaled error".to_string(),
            value: CheckValue::Num(mean_rescaled),
            verdict: verdict_if(mean_rescaled <= MEAN_RESCALED_ERROR_THRESHOLD),
        });

        if options.regression {
            checks.push(regression_check(expect, got));
        }

        // Systematic bias: fires only when one side is larger at an
        // unusually high fraction of indices.
        let expect_larger = expect
            .iter()
            .zip(got.iter())
            .filter(|(&x, &y)| x - y > 0.0)
            .count();
        if expect_larger as f64 >= p_larger * n as f64 {
            checks.push(Check {
                name: "expect is larger".to_string(),
                value: CheckValue::Ratio {
                    count: expect_larger,
                    total: n,
                },
                verdict: Verdict::Fail,
            });
        }
        let got_larger = expect
            .iter()
            .zip(got.iter())
            .filter(|(&x, &y)| y - x > 0.0)
            .count();
        if got_larger as f64 >= p_larger * n as f64 {
            checks.push(Check {
                name: "got is larger".to_string(),
                value: CheckValue::Ratio {
                    count: got_larger,
                    total: n,
                },
                verdict: Verdict::Fail,
            });
        }
    }

    let rel_errors = match &options.alphabet {
        Some(alphabet) => largest_rel_errors(expect, got, alphabet)?,
        None => Vec::new(),
    };

    Ok(Report {
        name: options.name.clone(),
        n,
        expect_label,
        got_label,
        checks,
        rel_errors,
    })
}

/// The regression diagnostic: fit `expect ≈ slope * got + intercept` and
/// report the parameters without judging them.
fn regression_check(expect: &[f64], got: &[f64]) -> Check {
    let all_finite =
        expect.iter().all(|v| v.is_finite()) && got.iter().all(|v| v.is_finite());
    let value = if all_finite {
        match least_squares(got, expect) {
            Ok(fit) => CheckValue::Fit(fit),
            Err(err) => CheckValue::Text(format!("did not run: {err}")),
        }
    } else {
        CheckValue::Text("did not run due to non-finite values".to_string())
    };
    Check {
        name: "regression".to_string(),
        value,
        verdict: Verdict::Info,
    }
}

fn verdict_if(passed: bool) -> Verdict {
    if passed {
        Verdict::Pass
    } else {
        Verdict::Fail
    }
}
