use crate::theory::{bfs_beta, bfs_kingman};
use crate::SpectrumError;

/// Euclidean norm.
pub fn l2_norm(x: &[f64]) -> f64 {
    x.iter().map(|v| v * v).sum::<f64>().sqrt()
}

/// Scale `x` to unit Euclidean norm.
///
/// # Errors
///
/// [`SpectrumError::ZeroNorm`] if `x` is empty or all zero.
pub fn normalize(x: &[f64]) -> Result<Vec<f64>, SpectrumError> {
    let norm = l2_norm(x);
    if norm == 0.0 || !norm.is_finite() {
        return Err(SpectrumError::ZeroNorm);
    }
    Ok(x.iter().map(|v| v / norm).collect())
}

/// Euclidean distance between two vectors of equal length.
pub fn l2_distance(a: &[f64], b: &[f64]) -> Result<f64, SpectrumError> {
    if a.len() != b.len() {
        return Err(SpectrumError::LengthMismatch(a.len(), b.len()));
    }
    Ok(a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt())
}

/// Which theoretical spectra [`compare_bfs`] should use.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ComparisonOptions {
    /// Compare with the Kingman coalescent.
    pub kingman: bool,
    /// Compare with a Beta coalescent with this `alpha`.
    pub beta: Option<f64>,
}

impl Default for ComparisonOptions {
    fn default() -> Self {
        Self {
            kingman: true,
            beta: None,
        }
    }
}

impl ComparisonOptions {
    /// Set whether to compare with the Kingman coalescent.
    pub fn kingman(mut self, kingman: bool) -> Self {
        self.kingman = kingman;
        self
    }

    /// Compare with a Beta coalescent.
    pub fn beta(mut self, alpha: f64) -> Self {
        self.beta = Some(alpha);
        self
    }
}

/// An observed branch frequency spectrum set against theory.
///
/// All spectra are normalized to unit L2 norm and indexed by
/// `abscissa`, the number of descendant samples.
#[derive(Clone, Debug, PartialEq)]
pub struct SpectrumComparison {
    /// Number of descendants for each entry, `1..n`
    pub abscissa: Vec<usize>,
    /// Normalized observed spectrum
    pub observed: Vec<f64>,
    /// Normalized Kingman spectrum, if requested
    pub kingman: Option<Vec<f64>>,
    /// Normalized Beta spectrum, if requested
    pub beta: Option<Vec<f64>>,
    /// L2 distance between `observed` and `kingman`
    pub kingman_error: Option<f64>,
    /// L2 distance between `observed` and `beta`
    pub beta_error: Option<f64>,
}

/// Compare a branch frequency spectrum with coalescent theory.
///
/// `bfs[i]` is the total length of branches subtending `i + 1`
/// samples, so the sample size is `bfs.len() + 1`.  Requesting a Beta
/// coalescent with `alpha = 2` is a Kingman comparison.
///
/// # Errors
///
/// * [`SpectrumError::ZeroNorm`] if `bfs` is empty or all zero.
/// * Any error of [`bfs_kingman`] or [`bfs_beta`].
///
/// # Example
///
/// ```
/// use coalescent_tree_stats::{compare_bfs, ComparisonOptions};
///
/// let bfs: Vec<f64> = (1..10).map(|i| 1.0 / i as f64).collect();
/// let c = compare_bfs(&bfs, ComparisonOptions::default()).unwrap();
/// assert!(c.kingman_error.unwrap() < 1e-12);
/// assert!(c.beta_error.is_none());
/// ```
pub fn compare_bfs(
    bfs: &[f64],
    options: ComparisonOptions,
) -> Result<SpectrumComparison, SpectrumError> {
    let sample_size = bfs.len() + 1;
    let observed = normalize(bfs)?;

    let beta_is_kingman = matches!(options.beta, Some(alpha) if (alpha - 2.0).abs() < 1e-9);
    let kingman = if options.kingman || beta_is_kingman {
        Some(bfs_kingman(sample_size, true)?)
    } else {
        None
    };
    let beta = match options.beta {
        Some(alpha) if !beta_is_kingman => Some(bfs_beta(sample_size, alpha, true)?),
        _ => None,
    };

    let kingman_error = kingman
        .as_deref()
        .map(|k| l2_distance(&observed, k))
        .transpose()?;
    let beta_error = beta
        .as_deref()
        .map(|b| l2_distance(&observed, b))
        .transpose()?;

    Ok(SpectrumComparison {
        abscissa: (1..sample_size).collect(),
        observed,
        kingman,
        beta,
        kingman_error,
        beta_error,
    })
}
