//! Largest-relative-error breakdown.
//!
//! When each index of the compared vectors has a meaningful label (an
//! "alphabet"), this module reports which labeled dimensions disagree the
//! most, flagging sign errors along the way.

use crate::error::{CotejarError, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Relative errors at or below this threshold are dropped from the breakdown.
pub const REL_ERROR_FLOOR: f64 = 0.00001;

/// Which side of a disagreeing pair is numerically larger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// `got` is larger than `expect`.
    Bigger,
    /// `got` is smaller than (or equal to) `expect`.
    Smaller,
}

/// One labeled entry of the largest-relative-error breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelError {
    /// Per-index label from the alphabet.
    pub label: String,
    /// Relative error `|expect - got| / max(|expect|, |got|)` (denominator
    /// 1.0 when both values are zero).
    pub error: f64,
    /// Raw expected value.
    pub expect: f64,
    /// Raw computed value.
    pub got: f64,
    /// Whether `got` is bigger or smaller than `expect`.
    pub direction: Direction,
    /// True when `sign(expect) != sign(got)`.
    pub sign_mismatch: bool,
}

fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Computes the per-index relative error used throughout the comparator:
/// `|x - y| / max(|x|, |y|)`, with denominator 1.0 when the maximum is zero.
#[must_use]
pub fn rel_error(x: f64, y: f64) -> f64 {
    let mut scale = x.abs().max(y.abs());
    if scale == 0.0 {
        scale = 1.0;
    }
    (x - y).abs() / scale
}

/// Produces the largest-relative-error breakdown for a labeled comparison.
///
/// Entries with relative error at or below [`REL_ERROR_FLOOR`] are dropped.
/// The rest are sorted by descending error, with descending label as the
/// tie-break.
///
/// # Examples
///
/// ```
/// use cotejar::rel_errors::largest_rel_errors;
///
/// let expect = [1.0, 2.0, -3.0];
/// let got = [1.0, 2.5, 3.0];
/// let labels = ["a", "b", "c"];
/// let breakdown = largest_rel_errors(&expect, &got, &labels).unwrap();
///
/// assert_eq!(breakdown.len(), 2); // "a" agrees exactly and is dropped
/// assert_eq!(breakdown[0].label, "c"); // sign flip is the worst offender
/// assert!(breakdown[0].sign_mismatch);
/// ```
///
/// # Errors
///
/// Returns `DimensionMismatch` if the three slices disagree in length.
pub fn largest_rel_errors<S: AsRef<str>>(
    expect: &[f64],
    got: &[f64],
    labels: &[S],
) -> Result<Vec<RelError>> {
    if expect.len() != got.len() {
        return Err(CotejarError::dimension_mismatch(
            "expect len",
            expect.len(),
            got.len(),
        ));
    }
    if labels.len() != expect.len() {
        return Err(CotejarError::dimension_mismatch(
            "alphabet len",
            expect.len(),
            labels.len(),
        ));
    }

    let mut entries: Vec<RelError> = Vec::new();
    for ((&x, &y), label) in expect.iter().zip(got.iter()).zip(labels.iter()) {
        let e = rel_error(x, y);
        if e <= REL_ERROR_FLOOR {
            continue;
        }
        entries.push(RelError {
            label: label.as_ref().to_string(),
            error: e,
            expect: x,
            got: y,
            direction: if x < y {
                Direction::Bigger
            } else {
                Direction::Smaller
            },
            sign_mismatch: sign(x) != sign(y),
        });
    }

    // Descending by (error, label); NaN errors sort first so they are not
    // buried at the bottom of the list.
    entries.sort_by(|a, b| {
        b.error
            .partial_cmp(&a.error)
            .unwrap_or_else(|| b.error.is_nan().cmp(&a.error.is_nan()))
            .then_with(|| b.label.cmp(&a.label))
    });

    Ok(entries)
}

/// Renders the breakdown as an ANSI-colored text table.
///
/// Entries with error above 0.01 are tagged `bad` in red, the rest `ok` in
/// green; sign mismatches are highlighted.
#[must_use]
pub fn render_rel_errors(entries: &[RelError]) -> String {
    const GREEN: &str = "\x1b[32m";
    const RED: &str = "\x1b[31m";
    const RESET: &str = "\x1b[0m";

    if entries.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    out.push_str(" Relative errors\n");
    out.push_str(" ===============\n");
    for e in entries {
        let judgment = if e.error <= 0.01 {
            format!("{GREEN}ok{RESET}")
        } else {
            format!("{RED}bad{RESET}")
        };
        let mut tags = vec![match e.direction {
            Direction::Bigger => "bigger",
            Direction::Smaller => "smaller",
        }
        .to_string()];
        if e.sign_mismatch {
            tags.push(format!("{RED}wrong sign{RESET}"));
        }
        let _ = writeln!(
            out,
            "  {:<15} {:.5} {} {} {} ({})",
            e.label,
            e.error,
            e.expect,
            e.got,
            judgment,
            tags.join(",")
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rel_error_zero_denominator() {
        assert_eq!(rel_error(0.0, 0.0), 0.0);
        assert_eq!(rel_error(0.0, 0.5), 1.0);
    }

    #[test]
    fn test_rel_error_uses_larger_magnitude() {
        // |1 - 2| / max(1, 2) = 0.5
        assert_eq!(rel_error(1.0, 2.0), 0.5);
        assert_eq!(rel_error(2.0, 1.0), 0.5);
        assert_eq!(rel_error(-2.0, 1.0), 1.5);
    }

    #[test]
    fn test_exact_matches_dropped() {
        let breakdown =
            largest_rel_errors(&[1.0, 2.0], &[1.0, 2.0], &["a", "b"]).unwrap();
        assert!(breakdown.is_empty());
    }

    #[test]
    fn test_sorted_descending_with_label_tiebreak() {
        let expect = [1.0, 1.0, 1.0];
        let got = [2.0, 1.5, 2.0]; // errors: 0.5, 1/3, 0.5
        let breakdown = largest_rel_errors(&expect, &got, &["a", "b", "c"]).unwrap();
        assert_eq!(breakdown.len(), 3);
        assert_eq!(breakdown[0].label, "c"); // tie broken by descending label
        assert_eq!(breakdown[1].label, "a");
        assert_eq!(breakdown[2].label, "b");
    }

    #[test]
    fn test_direction_and_sign_flags() {
        let breakdown =
            largest_rel_errors(&[1.0, -1.0], &[2.0, 1.0], &["up", "flip"]).unwrap();
        let up = breakdown.iter().find(|e| e.label == "up").unwrap();
        assert_eq!(up.direction, Direction::Bigger);
        assert!(!up.sign_mismatch);

        let flip = breakdown.iter().find(|e| e.label == "flip").unwrap();
        assert_eq!(flip.direction, Direction::Bigger);
        assert!(flip.sign_mismatch);
    }

    #[test]
    fn test_zero_vs_positive_is_sign_mismatch() {
        let breakdown = largest_rel_errors(&[0.0], &[1.0], &["z"]).unwrap();
        assert_eq!(breakdown.len(), 1);
        assert!(breakdown[0].sign_mismatch);
        assert_eq!(breakdown[0].error, 1.0);
    }

    #[test]
    fn test_length_mismatch_errors() {
        assert!(largest_rel_errors(&[1.0], &[1.0, 2.0], &["a"]).is_err());
        assert!(largest_rel_errors(&[1.0], &[1.0], &["a", "b"]).is_err());
    }

    #[test]
    fn test_render_contains_labels_and_tags() {
        let breakdown =
            largest_rel_errors(&[1.0, -1.0], &[2.0, 1.0], &["up", "flip"]).unwrap();
        let text = render_rel_errors(&breakdown);
        assert!(text.contains("Relative errors"));
        assert!(text.contains("up"));
        assert!(text.contains("flip"));
        assert!(text.contains("wrong sign"));
        assert!(render_rel_errors(&[]).is_empty());
    }

    proptest! {
        /// Output is in non-increasing error order and every entry clears
        /// the floor.
        #[test]
        fn prop_breakdown_ordering(
            pairs in prop::collection::vec((-100.0_f64..100.0, -100.0_f64..100.0), 0..24)
        ) {
            let expect: Vec<f64> = pairs.iter().map(|p| p.0).collect();
            let got: Vec<f64> = pairs.iter().map(|p| p.1).collect();
            let labels: Vec<String> = (0..pairs.len()).map(|i| format!("dim{i}")).collect();

            let breakdown = largest_rel_errors(&expect, &got, &labels).unwrap();
            for pair in breakdown.windows(2) {
                prop_assert!(pair[0].error >= pair[1].error);
            }
            for entry in &breakdown {
                prop_assert!(entry.error > REL_ERROR_FLOOR);
            }
        }

        /// Relative error is invariant under a shared positive scaling.
        #[test]
        fn prop_rel_error_scale_invariant(
            x in -100.0_f64..100.0,
            y in -100.0_f64..100.0,
            k in 0.01_f64..100.0,
        ) {
            prop_assume!(x != 0.0 && y != 0.0);
            let base = rel_error(x, y);
            let scaled = rel_error(k * x, k * y);
            prop_assert!((base - scaled).abs() < 1e-9 * base.max(1.0));
        }
    }
}
