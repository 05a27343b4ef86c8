//! Standalone statistics and probability helpers.
//!
//! Small, closed-form numerical routines that often sit next to the
//! comparator in test code: information-theoretic quantities (in bits),
//! numerically-stable softmax/log-sum-exp, simple normalizations, an
//! empirical CDF, Student-t confidence intervals, and discrete/mixture
//! sampling. All are pure over their inputs except the samplers, which
//! draw from a caller-supplied RNG.

use crate::error::Result;
use rand::{Rng, RngCore};
use std::f64::consts::{LN_2, PI};

// ============================================================================
// Information theory (all in bits)
// ============================================================================

/// Entropy of a discrete distribution `p`, in bits.
///
/// Zero entries contribute nothing (the `0 log 0 = 0` convention).
///
/// # Examples
///
/// ```
/// use cotejar::stats::entropy;
///
/// assert_eq!(entropy(&[0.5, 0.5]), 1.0);
/// assert!((entropy(&[0.75, 0.25]) - 0.8112781244).abs() < 1e-10);
/// ```
#[must_use]
pub fn entropy(p: &[f64]) -> f64 {
    -p.iter()
        .filter(|&&pi| pi != 0.0)
        .map(|&pi| pi * pi.ln())
        .sum::<f64>()
        / LN_2
}

/// KL divergence `KL(p || q)` of two discrete distributions, in bits.
///
/// Terms with `p[i] == 0` contribute nothing. If `q[i] == 0` where
/// `p[i] > 0`, the divergence is infinite.
///
/// # Panics
///
/// Panics if the slices have different lengths.
#[must_use]
pub fn kl_divergence(p: &[f64], q: &[f64]) -> f64 {
    assert_eq!(p.len(), q.len(), "Distributions must have same length");
    p.iter()
        .zip(q.iter())
        .filter(|(&pi, _)| pi != 0.0)
        .map(|(&pi, &qi)| pi * (pi.ln() - qi.ln()))
        .sum::<f64>()
        / LN_2
}

/// Cross entropy `CE(p, q) = -Σ p[i] log2 q[i]`, in bits.
///
/// Satisfies `CE(p, q) = entropy(p) + kl_divergence(p, q)`.
///
/// # Panics
///
/// Panics if the slices have different lengths.
#[must_use]
pub fn cross_entropy(p: &[f64], q: &[f64]) -> f64 {
    assert_eq!(p.len(), q.len(), "Distributions must have same length");
    -p.iter()
        .zip(q.iter())
        .filter(|(&pi, _)| pi > 0.0)
        .map(|(&pi, &qi)| pi * qi.ln())
        .sum::<f64>()
        / LN_2
}

/// A borrowed row-major view of a 2-D joint distribution.
///
/// Keeps [`mutual_information`]'s signature free of any matrix dependency.
#[derive(Debug, Clone, Copy)]
pub struct Joint2d<'a> {
    data: &'a [f64],
    n_rows: usize,
    n_cols: usize,
}

impl<'a> Joint2d<'a> {
    /// Wraps a row-major slice as an `n_rows` x `n_cols` joint.
    ///
    /// # Errors
    ///
    /// Returns an error if `data.len() != n_rows * n_cols`.
    pub fn new(data: &'a [f64], n_rows: usize, n_cols: usize) -> Result<Self> {
        if data.len() != n_rows * n_cols {
            return Err(crate::error::CotejarError::dimension_mismatch(
                "joint len",
                n_rows * n_cols,
                data.len(),
            ));
        }
        Ok(Self {
            data,
            n_rows,
            n_cols,
        })
    }

    fn row_marginals(&self) -> Vec<f64> {
        (0..self.n_rows)
            .map(|i| {
                self.data[i * self.n_cols..(i + 1) * self.n_cols]
                    .iter()
                    .sum()
            })
            .collect()
    }

    fn col_marginals(&self) -> Vec<f64> {
        let mut py = vec![0.0; self.n_cols];
        for i in 0..self.n_rows {
            for (j, p) in py.iter_mut().enumerate() {
                *p += self.data[i * self.n_cols + j];
            }
        }
        py
    }
}

/// Mutual information of a joint distribution, in bits.
///
/// `MI(x, y) = KL( p(x, y) || p(x) p(y) )`, with the marginals computed
/// from the joint by the law of total probability. Symmetric in x and y.
///
/// # Examples
///
/// ```
/// use cotejar::stats::{mutual_information, Joint2d};
///
/// // Independent joint: MI is zero.
/// let joint = [0.25, 0.25, 0.25, 0.25];
/// let mi = mutual_information(&Joint2d::new(&joint, 2, 2).unwrap());
/// assert!(mi.abs() < 1e-12);
/// ```
#[must_use]
pub fn mutual_information(joint: &Joint2d<'_>) -> f64 {
    let px = joint.row_marginals();
    let py = joint.col_marginals();
    let independent: Vec<f64> = px
        .iter()
        .flat_map(|&pxi| py.iter().map(move |&pyj| pxi * pyj))
        .collect();
    kl_divergence(joint.data, &independent)
}

// ============================================================================
// Stable exponentials and normalization
// ============================================================================

/// Computes `log(Σ exp(x))` with the max-subtraction trick to avoid
/// overflow and underflow.
///
/// Returns negative infinity for empty input (the empty sum).
///
/// # Examples
///
/// ```
/// use cotejar::stats::logsumexp;
///
/// let xs: Vec<f64> = (0..10).map(f64::from).collect();
/// let naive = xs.iter().map(|x| x.exp()).sum::<f64>().ln();
/// assert!((logsumexp(&xs) - naive).abs() < 1e-12);
///
/// // No overflow even for huge inputs.
/// assert!((logsumexp(&[1000.0, 1000.0]) - (1000.0 + 2.0_f64.ln())).abs() < 1e-9);
/// ```
#[must_use]
pub fn logsumexp(xs: &[f64]) -> f64 {
    let vmax = xs.iter().fold(f64::NEG_INFINITY, |m, &v| m.max(v));
    if vmax == f64::NEG_INFINITY {
        return f64::NEG_INFINITY;
    }
    vmax + xs.iter().map(|&x| (x - vmax).exp()).sum::<f64>().ln()
}

/// Softmax with temperature, computed stably via max-subtraction.
///
/// `exp_normalize(x, 1.0)` equals `exp(x) / Σ exp(x)` without the overflow.
#[must_use]
pub fn exp_normalize(xs: &[f64], temperature: f64) -> Vec<f64> {
    let scaled: Vec<f64> = xs.iter().map(|&x| x / temperature).collect();
    let vmax = scaled.iter().fold(f64::NEG_INFINITY, |m, &v| m.max(v));
    let exps: Vec<f64> = scaled.iter().map(|&x| (x - vmax).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.iter().map(|&e| e / total).collect()
}

/// Normalizes nonnegative weights to sum to one.
#[must_use]
pub fn normalize(p: &[f64]) -> Vec<f64> {
    let total: f64 = p.iter().sum();
    p.iter().map(|&pi| pi / total).collect()
}

/// Lidstone smoothing: adds `delta` to every count, then normalizes.
///
/// `delta = 1` recovers Laplace smoothing.
#[must_use]
pub fn lidstone(p: &[f64], delta: f64) -> Vec<f64> {
    let shifted: Vec<f64> = p.iter().map(|&pi| pi + delta).collect();
    normalize(&shifted)
}

/// Cumulative average of a sequence.
///
/// # Examples
///
/// ```
/// use cotejar::stats::cumavg;
///
/// assert_eq!(cumavg(&[1.0, 2.0, 3.0, 4.0, 5.0]), vec![1.0, 1.5, 2.0, 2.5, 3.0]);
/// ```
#[must_use]
pub fn cumavg(xs: &[f64]) -> Vec<f64> {
    let mut total = 0.0;
    xs.iter()
        .enumerate()
        .map(|(i, &x)| {
            total += x;
            total / (i + 1) as f64
        })
        .collect()
}

/// Shifts and rescales data to zero mean and unit variance (population
/// standard deviation). A zero standard deviation is replaced by 1.0 to
/// avoid dividing by zero.
#[must_use]
pub fn normalize_zscore(xs: &[f64]) -> Vec<f64> {
    let n = xs.len() as f64;
    let mean = xs.iter().sum::<f64>() / n;
    let mut std = (xs.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / n).sqrt();
    if std == 0.0 {
        std = 1.0;
    }
    xs.iter().map(|&x| (x - mean) / std).collect()
}

/// Shifts and rescales data to lie in `[0, 1]`. A zero range is replaced
/// by 1.0 to avoid dividing by zero.
#[must_use]
pub fn normalize_interval(xs: &[f64]) -> Vec<f64> {
    let min = xs.iter().fold(f64::INFINITY, |m, &v| m.min(v));
    let max = xs.iter().fold(f64::NEG_INFINITY, |m, &v| m.max(v));
    let mut range = max - min;
    if range == 0.0 {
        range = 1.0;
    }
    xs.iter().map(|&x| (x - min) / range).collect()
}

// ============================================================================
// Confidence intervals
// ============================================================================

/// Inverse CDF of the standard normal distribution (Acklam's rational
/// approximation, absolute error below 1.2e-9).
///
/// # Panics
///
/// Panics unless `0 < p < 1`.
#[must_use]
pub fn inverse_normal_cdf(p: f64) -> f64 {
    assert!(p > 0.0 && p < 1.0, "p must be in (0, 1)");

    const A: [f64; 6] = [
        -3.969_683_028_665_376e1,
        2.209_460_984_245_205e2,
        -2.759_285_104_469_687e2,
        1.383_577_518_672_69e2,
        -3.066_479_806_614_716e1,
        2.506_628_277_459_239,
    ];
    const B: [f64; 5] = [
        -5.447_609_879_822_406e1,
        1.615_858_368_580_409e2,
        -1.556_989_798_598_866e2,
        6.680_131_188_771_972e1,
        -1.328_068_155_288_572e1,
    ];
    const C: [f64; 6] = [
        -7.784_894_002_430_293e-3,
        -3.223_964_580_411_365e-1,
        -2.400_758_277_161_838,
        -2.549_732_539_343_734,
        4.374_664_141_464_968,
        2.938_163_982_698_783,
    ];
    const D: [f64; 4] = [
        7.784_695_709_041_462e-3,
        3.224_671_290_700_398e-1,
        2.445_134_137_142_996,
        3.754_408_661_907_416,
    ];
    const P_LOW: f64 = 0.02425;

    if p < P_LOW {
        let q = (-2.0 * p.ln()).sqrt();
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    } else if p <= 1.0 - P_LOW {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        -(((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    }
}

/// Approximate inverse CDF of Student's t distribution with `df` degrees
/// of freedom (Cornish-Fisher expansion around the normal quantile,
/// Abramowitz & Stegun 26.7.5). Accurate to a few 1e-3 for `df >= 5`.
///
/// # Panics
///
/// Panics unless `0 < p < 1` and `df > 0`.
#[must_use]
pub fn students_t_quantile(p: f64, df: f64) -> f64 {
    assert!(df > 0.0, "degrees of freedom must be positive");
    let z = inverse_normal_cdf(p);
    let z3 = z * z * z;
    let z5 = z3 * z * z;
    let z7 = z5 * z * z;
    let z9 = z7 * z * z;

    let g1 = (z3 + z) / 4.0;
    let g2 = (5.0 * z5 + 16.0 * z3 + 3.0 * z) / 96.0;
    let g3 = (3.0 * z7 + 19.0 * z5 + 17.0 * z3 - 15.0 * z) / 384.0;
    let g4 = (79.0 * z9 + 776.0 * z7 + 1482.0 * z5 - 1920.0 * z3 - 945.0 * z) / 92160.0;

    z + g1 / df + g2 / (df * df) + g3 / (df * df * df) + g4 / (df * df * df * df)
}

/// Mean and two-sided confidence interval `(mean, lower, upper)` of a
/// sample, using the Student-t distribution with `n - 1` degrees of
/// freedom and the sample (ddof = 1) standard deviation.
///
/// # Panics
///
/// Panics if the sample has fewer than two points or `confidence` is not
/// in `(0, 1)`.
#[must_use]
pub fn mean_confidence_interval(xs: &[f64], confidence: f64) -> (f64, f64, f64) {
    let n = xs.len();
    assert!(n >= 2, "confidence interval needs at least 2 points");
    assert!(
        confidence > 0.0 && confidence < 1.0,
        "confidence must be in (0, 1)"
    );

    let nf = n as f64;
    let mean = xs.iter().sum::<f64>() / nf;
    let var = xs.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / (nf - 1.0);
    let std = var.sqrt();

    let t = students_t_quantile((1.0 + confidence) / 2.0, nf - 1.0);
    let h = std / nf.sqrt() * t;
    (mean, mean - h, mean + h)
}

// ============================================================================
// Empirical CDF
// ============================================================================

/// Empirical CDF of a sample: maps a value to the fraction of sample
/// points less than or equal to it.
///
/// # Examples
///
/// ```
/// use cotejar::stats::Ecdf;
///
/// let g = Ecdf::new(&[5.0, 10.0, 15.0]);
/// assert!((g.eval(5.0) - 1.0 / 3.0).abs() < 1e-12);
/// assert!((g.eval(13.0) - 2.0 / 3.0).abs() < 1e-12);
/// assert_eq!(g.eval(100.0), 1.0);
///
/// // Ties count together: p(x <= 5) = 2/3.
/// let g = Ecdf::new(&[5.0, 5.0, 15.0]);
/// assert!((g.eval(5.0) - 2.0 / 3.0).abs() < 1e-12);
/// assert_eq!(g.eval(0.0), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct Ecdf {
    sorted: Vec<f64>,
}

impl Ecdf {
    /// Builds the CDF from a sample, keeping a sorted copy.
    ///
    /// # Panics
    ///
    /// Panics if the sample is empty.
    #[must_use]
    pub fn new(xs: &[f64]) -> Self {
        assert!(!xs.is_empty(), "Ecdf needs a non-empty sample");
        let mut sorted = xs.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        Self { sorted }
    }

    /// Evaluates the CDF at `z`: the fraction of sample points `<= z`.
    #[must_use]
    pub fn eval(&self, z: f64) -> f64 {
        let count = self.sorted.partition_point(|&v| v <= z);
        count as f64 / self.sorted.len() as f64
    }
}

// ============================================================================
// Sampling
// ============================================================================

/// Draws an index from an unnormalized discrete distribution via the
/// inverse-CDF method.
///
/// # Panics
///
/// Panics if the weights are empty or sum to zero.
pub fn sample_discrete<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> usize {
    assert!(!weights.is_empty(), "weights must be non-empty");
    let mut cum = Vec::with_capacity(weights.len());
    let mut total = 0.0;
    for &w in weights {
        total += w;
        cum.push(total);
    }
    assert!(total > 0.0, "weights must have positive total mass");

    let r = rng.gen::<f64>() * total;
    cum.partition_point(|&c| c < r).min(weights.len() - 1)
}

/// Draws an index from an unnormalized log-space distribution, using
/// max-subtraction before exponentiating.
pub fn log_sample<R: Rng + ?Sized>(log_weights: &[f64], rng: &mut R) -> usize {
    let vmax = log_weights.iter().fold(f64::NEG_INFINITY, |m, &v| m.max(v));
    let weights: Vec<f64> = log_weights.iter().map(|&w| (w - vmax).exp()).collect();
    sample_discrete(&weights, rng)
}

/// Draws a standard normal via the Box-Muller transform.
fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // 1 - u keeps the argument of ln strictly positive.
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// Generates a random unit vector from a spherical Gaussian.
pub fn spherical<R: Rng + ?Sized>(dim: usize, rng: &mut R) -> Vec<f64> {
    assert!(dim > 0, "dimension must be positive");
    let mut v: Vec<f64> = (0..dim).map(|_| standard_normal(rng)).collect();
    let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    for x in &mut v {
        *x /= norm;
    }
    v
}

// ============================================================================
// Mixture distributions
// ============================================================================

/// A univariate probability density that can be evaluated and sampled.
pub trait Density {
    /// Density at `x`.
    fn pdf(&self, x: f64) -> f64;
    /// Draws one sample.
    fn sample(&self, rng: &mut dyn RngCore) -> f64;
}

/// Univariate Gaussian density.
#[derive(Debug, Clone, Copy)]
pub struct Gaussian {
    mean: f64,
    std: f64,
}

impl Gaussian {
    /// Creates a Gaussian with the given mean and standard deviation.
    ///
    /// # Panics
    ///
    /// Panics unless `std > 0`.
    #[must_use]
    pub fn new(mean: f64, std: f64) -> Self {
        assert!(std > 0.0, "standard deviation must be positive");
        Self { mean, std }
    }
}

impl Density for Gaussian {
    fn pdf(&self, x: f64) -> f64 {
        let z = (x - self.mean) / self.std;
        (-0.5 * z * z).exp() / (self.std * (2.0 * PI).sqrt())
    }

    fn sample(&self, rng: &mut dyn RngCore) -> f64 {
        self.mean + self.std * standard_normal(rng)
    }
}

/// Mixture of several densities with fixed component weights.
pub struct Mixture {
    weights: Vec<f64>,
    cdf: Vec<f64>,
    components: Vec<Box<dyn Density>>,
}

impl Mixture {
    /// Creates a mixture from component weights and densities.
    ///
    /// # Errors
    ///
    /// Returns an error if lengths differ, any weight is negative, or the
    /// weights do not sum to one (within 1e-10).
    pub fn new(weights: Vec<f64>, components: Vec<Box<dyn Density>>) -> Result<Self> {
        if weights.len() != components.len() {
            return Err(crate::error::CotejarError::dimension_mismatch(
                "weights len",
                components.len(),
                weights.len(),
            ));
        }
        if weights.iter().any(|&w| w < 0.0) {
            return Err("mixture weights must be nonnegative".into());
        }
        let total: f64 = weights.iter().sum();
        if (1.0 - total).abs() > 1e-10 {
            return Err(format!("mixture weights must sum to 1, got {total}").into());
        }

        let mut cdf = Vec::with_capacity(weights.len());
        let mut acc = 0.0;
        for &w in &weights {
            acc += w;
            cdf.push(acc);
        }

        Ok(Self {
            weights,
            cdf,
            components,
        })
    }

    /// Mixture density at `x`: the weighted sum of component densities.
    #[must_use]
    pub fn pdf(&self, x: f64) -> f64 {
        self.weights
            .iter()
            .zip(self.components.iter())
            .map(|(&w, c)| w * c.pdf(x))
            .sum()
    }

    /// Draws one sample: picks a component by weight, then samples from it.
    pub fn sample(&self, rng: &mut dyn RngCore) -> f64 {
        let r: f64 = rng.gen();
        let idx = self
            .cdf
            .partition_point(|&c| c < r)
            .min(self.components.len() - 1);
        self.components[idx].sample(rng)
    }
}
