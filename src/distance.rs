//! Distance and similarity primitives for numeric vectors.
//!
//! These are the leaf functions the comparator's check battery is built on.
//! All operate on `&[f64]` slices and are pure.

/// Computes the dot product of two vectors.
///
/// # Panics
///
/// Panics if vectors have different lengths.
#[must_use]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "Vectors must have same length");
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Computes the Euclidean (L2) norm of a vector.
#[must_use]
pub fn norm(a: &[f64]) -> f64 {
    a.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Computes the L-infinity distance: the maximum absolute per-index
/// difference between two vectors.
///
/// Symmetric in its arguments, and `linf(a, a) == 0.0` for finite `a`.
/// Returns NaN if any per-index difference is NaN, so non-finite entries
/// are surfaced rather than silently skipped.
///
/// # Examples
///
/// ```
/// use cotejar::distance::linf;
///
/// assert_eq!(linf(&[1.0, 2.0, 3.0], &[1.0, 2.5, 3.0]), 0.5);
/// assert_eq!(linf(&[1.0, 2.0], &[1.0, 2.0]), 0.0);
/// ```
///
/// # Panics
///
/// Panics if vectors have different lengths.
#[must_use]
pub fn linf(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "Vectors must have same length");

    let mut worst = 0.0_f64;
    for (x, y) in a.iter().zip(b.iter()) {
        let d = (x - y).abs();
        if d.is_nan() {
            return f64::NAN;
        }
        if d > worst {
            worst = d;
        }
    }
    worst
}

/// Computes the cosine similarity between two vectors.
///
/// Measures directional agreement independent of magnitude:
/// `dot(a, b) / (norm(a) * norm(b))`.
///
/// Special cases:
/// - returns NaN if either vector contains a non-finite entry;
/// - returns 1.0 if both vectors have zero norm (both are the null vector,
///   trivially the same direction);
/// - returns NaN if exactly one vector has zero norm (undefined direction).
///
/// # Examples
///
/// ```
/// use cotejar::distance::cosine;
///
/// // Same direction, different scale.
/// let c = cosine(&[1.0, 2.0], &[100.0, 200.0]);
/// assert!((c - 1.0).abs() < 1e-12);
///
/// assert_eq!(cosine(&[0.0, 0.0], &[0.0, 0.0]), 1.0);
/// assert!(cosine(&[0.0, 0.0], &[1.0, 0.0]).is_nan());
/// ```
///
/// # Panics
///
/// Panics if vectors have different lengths.
#[must_use]
pub fn cosine(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "Vectors must have same length");

    if !a.iter().all(|x| x.is_finite()) || !b.iter().all(|x| x.is_finite()) {
        return f64::NAN;
    }

    let na = norm(a);
    let nb = norm(b);
    if na == 0.0 && nb == 0.0 {
        1.0
    } else if na != 0.0 && nb != 0.0 {
        dot(a, b) / (na * nb)
    } else {
        f64::NAN
    }
}
