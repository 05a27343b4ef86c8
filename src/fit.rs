//! Least-squares line fitting for the regression diagnostic.
//!
//! The comparator's regression check fits `expect ≈ slope * got + intercept`
//! by ordinary least squares. Fit parameters near `slope=1, intercept=0`
//! indicate agreement; the acceptable residual is problem-dependent, so the
//! fit is reported without a pass/fail judgment.

use crate::error::{CotejarError, Result};

/// An ordinary least squares fit of a line `y ≈ slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LineFit {
    /// Slope coefficient.
    pub slope: f64,
    /// Intercept (bias) term.
    pub intercept: f64,
    /// Sum of squared residuals at the fitted parameters.
    pub residual: f64,
}

impl LineFit {
    /// Evaluates the fitted line at `x`.
    #[must_use]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fits `y ≈ slope * x + intercept` by ordinary least squares.
///
/// Uses the closed-form solution for a single predictor with intercept:
///
/// ```text
/// slope     = Σ (x - x̄)(y - ȳ) / Σ (x - x̄)²
/// intercept = ȳ - slope * x̄
/// ```
///
/// # Examples
///
/// ```
/// use cotejar::fit::least_squares;
///
/// // y = 2x + 1, exactly.
/// let fit = least_squares(&[1.0, 2.0, 3.0, 4.0], &[3.0, 5.0, 7.0, 9.0]).unwrap();
/// assert!((fit.slope - 2.0).abs() < 1e-12);
/// assert!((fit.intercept - 1.0).abs() < 1e-12);
/// assert!(fit.residual < 1e-20);
/// ```
///
/// # Errors
///
/// Returns an error if the slices have different lengths, fewer than two
/// points, any non-finite entry, or a degenerate design (all `x` equal).
pub fn least_squares(x: &[f64], y: &[f64]) -> Result<LineFit> {
    if x.len() != y.len() {
        return Err(CotejarError::dimension_mismatch("x len", x.len(), y.len()));
    }
    let n = x.len();
    if n < 2 {
        return Err(CotejarError::Other(format!(
            "least squares needs at least 2 points, got {n}"
        )));
    }
    if !x.iter().all(|v| v.is_finite()) || !y.iter().all(|v| v.is_finite()) {
        return Err("least squares input contains non-finite values".into());
    }

    let nf = n as f64;
    let x_mean = x.iter().sum::<f64>() / nf;
    let y_mean = y.iter().sum::<f64>() / nf;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        sxy += (xi - x_mean) * (yi - y_mean);
        sxx += (xi - x_mean) * (xi - x_mean);
    }

    if sxx == 0.0 {
        return Err(CotejarError::Other(format!(
            "singular system: all x values equal ({x_mean})"
        )));
    }

    let slope = sxy / sxx;
    let intercept = y_mean - slope * x_mean;

    let residual = x
        .iter()
        .zip(y.iter())
        .map(|(&xi, &yi)| {
            let r = yi - (slope * xi + intercept);
            r * r
        })
        .sum();

    Ok(LineFit {
        slope,
        intercept,
        residual,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_line() {
        let fit = least_squares(&[0.0, 1.0, 2.0], &[1.0, 3.0, 5.0]).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-12);
        assert!((fit.intercept - 1.0).abs() < 1e-12);
        assert!(fit.residual < 1e-24);
        assert!((fit.predict(3.0) - 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_noisy_line_recovers_parameters() {
        // y = x with symmetric noise at the endpoints.
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [1.1, 1.9, 3.1, 3.9];
        let fit = least_squares(&x, &y).unwrap();
        assert!((fit.slope - 0.98).abs() < 0.05);
        assert!(fit.intercept.abs() < 0.1);
        assert!(fit.residual > 0.0);
    }

    #[test]
    fn test_length_mismatch() {
        assert!(matches!(
            least_squares(&[1.0, 2.0], &[1.0]),
            Err(CotejarError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_too_few_points() {
        assert!(least_squares(&[1.0], &[1.0]).is_err());
        assert!(least_squares(&[], &[]).is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(least_squares(&[1.0, f64::NAN], &[1.0, 2.0]).is_err());
        assert!(least_squares(&[1.0, 2.0], &[f64::INFINITY, 2.0]).is_err());
    }

    #[test]
    fn test_degenerate_x() {
        let err = least_squares(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]).unwrap_err();
        assert!(err.to_string().contains("singular"));
    }
}
